//! Builtin description cache
//!
//! A static JSON snapshot mapping builtin names to help text, read at most
//! once per cache object. A missing or unreadable snapshot is not an error:
//! the cache simply reports itself unavailable and every lookup misses.
//!
//! Snapshot format (key order is preserved):
//!
//! ```json
//! {
//!   "cd": { "shortDescription": "Change directory", "description": "...", "args": "[ -qsLP ] [ arg ]" },
//!   "echo": { "description": "Write arguments to standard output" }
//! }
//! ```

use crate::error::DescriptionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// File name of the snapshot shipped alongside the binary
pub const SNAPSHOT_FILE_NAME: &str = "zsh_builtins_cache.json";

/// One snapshot record
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<String>,
}

/// What a completion shows for a described builtin
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandDescription {
    /// Summary: the short description when present, else the long one
    pub description: String,
    pub args: Option<String>,
    /// Always the long description
    pub documentation: String,
}

impl From<DescriptionEntry> for CommandDescription {
    fn from(entry: DescriptionEntry) -> Self {
        Self {
            description: entry.short_description.unwrap_or_else(|| entry.description.clone()),
            args: entry.args,
            documentation: entry.description,
        }
    }
}

/// Outcome of the one load attempt
#[derive(Debug)]
pub enum CacheState {
    Loaded(Map<String, Value>),
    Unavailable(String),
}

/// Load-once description cache, shared between completion providers as
/// `Arc<DescriptionCache>`.
#[derive(Debug)]
pub struct DescriptionCache {
    path: PathBuf,
    state: OnceLock<CacheState>,
}

impl DescriptionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: OnceLock::new(),
        }
    }

    /// Cache over the default snapshot location
    pub fn with_default_path() -> Self {
        Self::new(Self::default_path())
    }

    /// Next to the running executable if a snapshot is there, otherwise the
    /// `resources/` directory of the source tree this binary was built from.
    ///
    /// The fallback is an absolute build-time path. It only resolves for
    /// binaries run from their checkout (`cargo run`, tests); installed
    /// binaries need the snapshot copied beside them or an explicit path.
    pub fn default_path() -> PathBuf {
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(SNAPSHOT_FILE_NAME)));
        match beside_exe {
            Some(path) if path.exists() => path,
            _ => Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("resources")
                .join(SNAPSHOT_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot if no attempt has been made yet. Later calls return
    /// the first outcome without touching the file.
    pub fn load_once(&self) -> &CacheState {
        self.state.get_or_init(|| read_snapshot(&self.path))
    }

    /// `None` until `load_once` has run
    pub fn state(&self) -> Option<&CacheState> {
        self.state.get()
    }

    pub fn is_available(&self) -> bool {
        matches!(self.state(), Some(CacheState::Loaded(_)))
    }

    fn entries(&self) -> Option<&Map<String, Value>> {
        match self.state() {
            Some(CacheState::Loaded(map)) => Some(map),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached names in snapshot order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries().into_iter().flat_map(|map| map.keys().map(String::as_str))
    }

    /// Raw entry decode: `Ok(None)` when the cache is unavailable or has no
    /// such name, `Err` when the entry is present but malformed.
    pub fn entry(&self, name: &str) -> Result<Option<DescriptionEntry>, DescriptionError> {
        let Some(value) = self.entries().and_then(|map| map.get(name)) else {
            return Ok(None);
        };
        DescriptionEntry::deserialize(value)
            .map(Some)
            .map_err(|source| DescriptionError {
                name: name.to_string(),
                source,
            })
    }

    /// Like [`lookup`](Self::lookup) but reports malformed entries
    pub fn describe(&self, name: &str) -> Result<Option<CommandDescription>, DescriptionError> {
        Ok(self.entry(name)?.map(CommandDescription::from))
    }

    /// Display triple for `name`, or `None` if the cache never loaded, has
    /// no such name, or the entry is malformed.
    pub fn lookup(&self, name: &str) -> Option<CommandDescription> {
        self.describe(name).ok().flatten()
    }
}

fn read_snapshot(path: &Path) -> CacheState {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "builtin description cache not found");
        return CacheState::Unavailable(format!("{} not found", path.display()));
    }

    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            serde_json::from_str::<Map<String, Value>>(&content).map_err(|e| e.to_string())
        });

    match parsed {
        Ok(map) => {
            tracing::debug!(path = %path.display(), entries = map.len(), "loaded builtin description cache");
            CacheState::Loaded(map)
        }
        Err(reason) => {
            tracing::error!(path = %path.display(), error = %reason, "failed to load builtin description cache");
            CacheState::Unavailable(reason)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = r#"{
        "cd": { "shortDescription": "Change directory", "description": "Change the current working directory.", "args": "[ -qsLP ] [ arg ]" },
        "echo": { "description": "Write each argument on the standard output." },
        "broken": { "shortDescription": 42 }
    }"#;

    #[test]
    fn test_short_description_preferred() {
        let file = snapshot(SAMPLE);
        let cache = DescriptionCache::new(file.path());
        cache.load_once();

        let cd = cache.lookup("cd").unwrap();
        assert_eq!(cd.description, "Change directory");
        assert_eq!(cd.documentation, "Change the current working directory.");
        assert_ne!(cd.description, cd.documentation);
        assert_eq!(cd.args.as_deref(), Some("[ -qsLP ] [ arg ]"));
    }

    #[test]
    fn test_long_description_used_for_both() {
        let file = snapshot(SAMPLE);
        let cache = DescriptionCache::new(file.path());
        cache.load_once();

        let echo = cache.lookup("echo").unwrap();
        assert_eq!(echo.description, echo.documentation);
        assert_eq!(echo.args, None);
    }

    #[test]
    fn test_names_in_snapshot_order() {
        let file = snapshot(SAMPLE);
        let cache = DescriptionCache::new(file.path());
        cache.load_once();

        assert!(cache.is_available());
        assert_eq!(cache.names().collect::<Vec<_>>(), vec!["cd", "echo", "broken"]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_malformed_entry_is_isolated() {
        let file = snapshot(SAMPLE);
        let cache = DescriptionCache::new(file.path());
        cache.load_once();

        let err = cache.describe("broken").unwrap_err();
        assert_eq!(err.name, "broken");
        assert!(cache.lookup("broken").is_none());
        assert!(cache.lookup("cd").is_some());
    }

    #[test]
    fn test_lookup_before_load_misses() {
        let file = snapshot(SAMPLE);
        let cache = DescriptionCache::new(file.path());
        assert!(cache.state().is_none());
        assert!(cache.lookup("cd").is_none());
        assert_eq!(cache.names().count(), 0);
    }

    #[test]
    fn test_load_happens_once() {
        let file = snapshot(SAMPLE);
        let cache = DescriptionCache::new(file.path());
        cache.load_once();
        let before = cache.lookup("cd");

        std::fs::write(file.path(), r#"{"cd": {"description": "changed"}}"#).unwrap();
        cache.load_once();

        assert_eq!(cache.lookup("cd"), before);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DescriptionCache::new(dir.path().join(SNAPSHOT_FILE_NAME));

        assert!(matches!(cache.load_once(), CacheState::Unavailable(_)));
        assert!(!cache.is_available());
        assert!(cache.lookup("cd").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_unavailable() {
        let file = snapshot("{ not json");
        let cache = DescriptionCache::new(file.path());
        assert!(matches!(cache.load_once(), CacheState::Unavailable(_)));
        assert!(cache.lookup("cd").is_none());

        let array = snapshot(r#"["cd", "echo"]"#);
        let cache = DescriptionCache::new(array.path());
        assert!(matches!(cache.load_once(), CacheState::Unavailable(_)));
    }

    #[test]
    fn test_default_path_falls_back_to_source_tree() {
        let path = DescriptionCache::default_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(SNAPSHOT_FILE_NAME));

        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        if !exe_dir.join(SNAPSHOT_FILE_NAME).exists() {
            assert!(path.starts_with(env!("CARGO_MANIFEST_DIR")));
            assert!(path.exists());
        }
    }

    #[test]
    fn test_shipped_snapshot_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("resources")
            .join(SNAPSHOT_FILE_NAME);
        let cache = DescriptionCache::new(path);
        cache.load_once();

        assert!(cache.is_available());
        for name in cache.names() {
            assert!(cache.describe(name).is_ok(), "bad shipped entry {name}");
        }
    }
}
