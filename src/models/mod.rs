pub mod feed_entry;
pub mod last_posts;
