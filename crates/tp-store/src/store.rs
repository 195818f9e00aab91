//! Store operations: the load → mutate → save cycle.
//!
//! [`WarpStore`] loads the whole mapping from its [`Backend`] on every call.
//! Queries (`lookup`, `list`) never write. Mutations (`add`, `remove`,
//! `remove_by_target`, `prune`) write the whole mapping back, and skip the
//! write when nothing changed.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::{Result, StoreError};
use crate::file::FileBackend;
use crate::keys::{validate_key, validate_target, ReservedWords};
use crate::types::WarpPoint;

/// Warp point store over a [`Backend`].
#[derive(Debug)]
pub struct WarpStore<B: Backend> {
    backend: B,
    reserved: ReservedWords,
}

impl WarpStore<FileBackend> {
    /// Open the file-backed store at `path`. The file need not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(path))
    }
}

impl<B: Backend> WarpStore<B> {
    /// Create a store that rejects the default reserved words as keys.
    pub fn new(backend: B) -> Self {
        Self::with_reserved(backend, ReservedWords::default())
    }

    pub fn with_reserved(backend: B, reserved: ReservedWords) -> Self {
        Self { backend, reserved }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn reserved(&self) -> &ReservedWords {
        &self.reserved
    }

    /// Add or overwrite the warp point `key` → `target`.
    ///
    /// The key and target are validated before the store is touched. Returns
    /// the target that was replaced, if any.
    pub fn add(&self, key: &str, target: &str) -> Result<Option<String>> {
        validate_key(key, &self.reserved)?;
        validate_target(target)?;
        let mut warp_points = self.backend.load()?;
        let previous = warp_points.insert(key, target);
        if let Some(prev) = &previous {
            debug!(key, previous = %prev, dir = target, "overwriting warp point");
        }
        self.backend.save(&warp_points)?;
        Ok(previous)
    }

    /// Target directory of `key`.
    pub fn lookup(&self, key: &str) -> Result<String> {
        let warp_points = self.backend.load()?;
        warp_points
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    /// Remove `key`. Returns whether it existed; removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut warp_points = self.backend.load()?;
        if warp_points.remove(key).is_none() {
            debug!(key, "no warp point to remove");
            return Ok(false);
        }
        self.backend.save(&warp_points)?;
        Ok(true)
    }

    /// Remove the first warp point (in key order) aimed at `target`.
    ///
    /// Returns the removed key, if any.
    pub fn remove_by_target(&self, target: &str) -> Result<Option<String>> {
        let mut warp_points = self.backend.load()?;
        let Some(key) = warp_points.remove_by_target(target) else {
            debug!(dir = target, "no warp point aimed at directory");
            return Ok(None);
        };
        self.backend.save(&warp_points)?;
        Ok(Some(key))
    }

    /// All warp points in ascending key order.
    pub fn list(&self) -> Result<Vec<WarpPoint>> {
        Ok(self.backend.load()?.to_vec())
    }

    /// Remove every warp point whose target is not an existing directory.
    ///
    /// Any failure to stat a target counts as "not a directory"; only loading
    /// and saving the store can fail. Returns the pruned warp points in key
    /// order.
    pub fn prune(&self) -> Result<Vec<WarpPoint>> {
        let mut warp_points = self.backend.load()?;
        let pruned: Vec<WarpPoint> = warp_points
            .iter()
            .filter(|(_, target)| !is_directory(target))
            .map(|(key, target)| WarpPoint::new(key, target))
            .collect();
        if pruned.is_empty() {
            return Ok(pruned);
        }
        for wp in &pruned {
            info!(key = %wp.key, dir = %wp.target, "pruning warp point");
            warp_points.remove(&wp.key);
        }
        self.backend.save(&warp_points)?;
        Ok(pruned)
    }
}

fn is_directory(target: &str) -> bool {
    match fs::metadata(target) {
        Ok(meta) => meta.is_dir(),
        Err(e) => {
            debug!(dir = target, error = %e, "cannot stat warp point target");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use crate::types::WarpPoints;

    fn store_with(entries: &[(&str, &str)]) -> WarpStore<InMemoryBackend> {
        let wps: WarpPoints = entries.iter().copied().collect();
        WarpStore::new(InMemoryBackend::with_warp_points(wps))
    }

    #[test]
    fn add_then_lookup() {
        let store = store_with(&[]);
        assert_eq!(store.add("proj", "/home/u/proj").unwrap(), None);
        assert_eq!(store.lookup("proj").unwrap(), "/home/u/proj");
    }

    #[test]
    fn add_overwrites_silently() {
        let store = store_with(&[("proj", "/old")]);
        let prev = store.add("proj", "/new").unwrap();
        assert_eq!(prev.as_deref(), Some("/old"));
        assert_eq!(store.lookup("proj").unwrap(), "/new");
    }

    #[test]
    fn add_rejects_reserved_word_without_touching_store() {
        let store = store_with(&[]);
        let err = store.add("list", "/x").unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey { .. }));
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn add_rejects_invalid_characters() {
        let store = store_with(&[]);
        assert!(store.add("a=b", "/x").is_err());
        assert!(store.add("two words", "/x").is_err());
        assert!(store.add("", "/x").is_err());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn add_rejects_comment_marker_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = WarpStore::open(dir.path().join(".tp"));
        let err = store.add("#proj", "/p").unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey { .. }));
        assert!(!dir.path().join(".tp").exists());
    }

    #[test]
    fn add_rejects_multiline_target_and_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".tp");
        let store = WarpStore::open(&path);
        store.add("ok", "/ok").unwrap();

        let err = store.add("evil", "/tmp/a\nb").unwrap_err();
        assert!(matches!(err, StoreError::InvalidTarget { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "ok = /ok\n");
        store.add("next", "/next").unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn custom_reserved_words() {
        let store = WarpStore::with_reserved(InMemoryBackend::new(), ReservedWords::new(["go"]));
        assert!(store.add("go", "/x").is_err());
        assert!(store.add("list", "/x").is_ok());
    }

    #[test]
    fn lookup_missing_key_is_not_found() {
        let store = store_with(&[("a", "/a")]);
        let err = store.lookup("b").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref key } if key == "b"));
    }

    #[test]
    fn queries_never_write() {
        let store = store_with(&[("a", "/a")]);
        store.lookup("a").unwrap();
        let _ = store.lookup("missing");
        store.list().unwrap();
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn remove_existing_key() {
        let store = store_with(&[("a", "/a"), ("b", "/b")]);
        assert!(store.remove("a").unwrap());
        assert_eq!(store.list().unwrap(), vec![WarpPoint::new("b", "/b")]);
    }

    #[test]
    fn remove_absent_key_is_noop() {
        let store = store_with(&[("a", "/a")]);
        assert!(!store.remove("nope").unwrap());
        assert_eq!(store.list().unwrap(), vec![WarpPoint::new("a", "/a")]);
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn remove_by_target_removes_one_match() {
        let store = store_with(&[("x", "/here"), ("y", "/here"), ("z", "/there")]);
        assert_eq!(store.remove_by_target("/here").unwrap().as_deref(), Some("x"));
        let keys: Vec<String> = store.list().unwrap().into_iter().map(|wp| wp.key).collect();
        assert_eq!(keys, vec!["y", "z"]);
        assert_eq!(store.remove_by_target("/nowhere").unwrap(), None);
    }

    #[test]
    fn list_is_sorted() {
        let store = store_with(&[]);
        store.add("zeta", "/z").unwrap();
        store.add("alpha", "/a").unwrap();
        store.add("mid", "/m").unwrap();
        let keys: Vec<String> = store.list().unwrap().into_iter().map(|wp| wp.key).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn prune_removes_missing_targets() {
        let dir = tempfile::tempdir().unwrap();
        let exists = dir.path().to_str().unwrap().to_string();
        let store = store_with(&[("a", exists.as_str()), ("b", "/does/not/exist")]);

        let pruned = store.prune().unwrap();
        assert_eq!(pruned, vec![WarpPoint::new("b", "/does/not/exist")]);
        assert_eq!(store.list().unwrap(), vec![WarpPoint::new("a", &exists)]);
    }

    #[test]
    fn prune_removes_non_directory_targets() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "not a dir").unwrap();
        let store = store_with(&[("f", file.to_str().unwrap())]);

        assert_eq!(store.prune().unwrap().len(), 1);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn prune_treats_any_stat_failure_as_prunable() {
        // A path under a regular file fails with ENOTDIR, not "not found".
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let under_file = file.join("child");
        let store = store_with(&[("n", under_file.to_str().unwrap())]);

        let pruned = store.prune().unwrap();
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].key, "n");
    }

    #[test]
    fn prune_without_stale_entries_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let exists = dir.path().to_str().unwrap().to_string();
        let store = store_with(&[("a", exists.as_str())]);

        assert!(store.prune().unwrap().is_empty());
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn file_store_full_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".tp");
        let store = WarpStore::open(&path);

        assert!(store.list().unwrap().is_empty());
        store.add("proj", "/home/u/proj").unwrap();
        store.add("etc", "/etc").unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "etc = /etc\nproj = /home/u/proj\n"
        );

        assert!(store.remove("etc").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "proj = /home/u/proj\n");
        assert_eq!(WarpStore::open(&path).lookup("proj").unwrap(), "/home/u/proj");
    }

    #[test]
    fn malformed_store_aborts_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".tp");
        fs::write(&path, "a = /a\nbroken\n").unwrap();
        let store = WarpStore::open(&path);

        assert!(matches!(
            store.add("b", "/b").unwrap_err(),
            StoreError::Malformed { .. }
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a = /a\nbroken\n");
    }
}
