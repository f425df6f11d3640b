use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Last link announced per feed key.
///
/// Stored as a flat JSON object; keys are kept sorted so the file is stable
/// between runs.
///
/// Keys embed the link, so every delivered entry adds a key and none is ever
/// removed. The file grows by one line per announced article; that is
/// expected.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LastPosts(BTreeMap<String, String>);

impl LastPosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed_key(source: &str, link: &str) -> String {
        format!("{source}_{link}")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// True when `link` is already the recorded link for this source.
    pub fn is_current(&self, source: &str, link: &str) -> bool {
        self.get(&Self::feed_key(source, link)) == Some(link)
    }

    /// True when `link` was recorded under any source.
    pub fn has_link(&self, link: &str) -> bool {
        self.0.values().any(|recorded| recorded == link)
    }

    pub fn record(&mut self, source: &str, link: &str) {
        self.0
            .insert(Self::feed_key(source, link), link.to_string());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// JSON file holding [`LastPosts`] between runs.
#[derive(Debug, Clone)]
pub struct LastPostStore {
    path: PathBuf,
}

impl LastPostStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Never fails: a missing, unreadable or malformed file yields an empty
    /// mapping, which makes every entry look new.
    pub fn load(&self) -> LastPosts {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No state file yet, starting empty");
                return LastPosts::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Unable to read state file: {e}");
                return LastPosts::new();
            }
        };

        match serde_json::from_str::<LastPosts>(&data) {
            Ok(posts) => {
                tracing::info!(
                    path = %self.path.display(),
                    entries = posts.len(),
                    "Loaded last posts"
                );
                posts
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring malformed state file: {e}");
                LastPosts::new()
            }
        }
    }

    pub fn save(&self, posts: &LastPosts) -> Result<(), StateError> {
        let data = serde_json::to_string_pretty(posts)?;
        std::fs::write(&self.path, data).map_err(|source| StateError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(
            path = %self.path.display(),
            entries = posts.len(),
            "Saved last posts"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::temp_state_path;

    #[test]
    fn test_feed_key_joins_source_and_link() {
        assert_eq!(
            LastPosts::feed_key("Steam News", "https://example.com/a"),
            "Steam News_https://example.com/a"
        );
    }

    #[test]
    fn test_record_then_is_current() {
        let mut posts = LastPosts::new();
        assert!(!posts.is_current("Steam News", "https://example.com/a"));

        posts.record("Steam News", "https://example.com/a");
        assert!(posts.is_current("Steam News", "https://example.com/a"));
        assert!(!posts.is_current("Steam Community", "https://example.com/a"));
        assert!(!posts.is_current("Steam News", "https://example.com/b"));
        assert_eq!(
            posts.get("Steam News_https://example.com/a"),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn test_has_link_looks_across_sources() {
        let mut posts = LastPosts::new();
        posts.record("Steam News", "https://example.com/a");
        assert!(posts.has_link("https://example.com/a"));
        assert!(!posts.has_link("https://example.com/b"));
        assert!(!posts.is_current("Steam Community", "https://example.com/a"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_dir, path) = temp_state_path();
        let store = LastPostStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let (_dir, path) = temp_state_path();
        std::fs::write(&path, "{ this is not json").unwrap();
        assert!(LastPostStore::new(&path).load().is_empty());

        std::fs::write(&path, "[\"a\", \"b\"]").unwrap();
        assert!(LastPostStore::new(&path).load().is_empty());

        std::fs::write(&path, "").unwrap();
        assert!(LastPostStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, path) = temp_state_path();
        let store = LastPostStore::new(&path);

        let mut posts = LastPosts::new();
        posts.record("Steam News", "https://example.com/новости");
        posts.record("Steam Community", "https://example.com/b");
        store.save(&posts).unwrap();

        assert_eq!(store.load(), posts);
    }

    #[test]
    fn test_saved_file_is_indented_utf8() {
        let (_dir, path) = temp_state_path();
        let store = LastPostStore::new(&path);

        let mut posts = LastPosts::new();
        posts.record("Steam News", "https://example.com/новости");
        store.save(&posts).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            raw,
            "{\n  \"Steam News_https://example.com/новости\": \"https://example.com/новости\"\n}"
        );
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let (dir, _path) = temp_state_path();
        let store = LastPostStore::new(dir.path().join("missing").join("state.json"));

        let err = store.save(&LastPosts::new()).unwrap_err();
        assert!(matches!(err, StateError::Io { .. }));
    }
}
