//! In-memory backend for testing and embedding.
//!
//! [`InMemoryBackend`] keeps the mapping behind a `RwLock` and counts saves,
//! so tests can assert that read-only operations never write.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::backend::Backend;
use crate::error::Result;
use crate::types::WarpPoints;

/// An in-memory implementation of [`Backend`]. Data is lost on drop.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: RwLock<WarpPoints>,
    saves: AtomicUsize,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing mapping.
    pub fn with_warp_points(warp_points: WarpPoints) -> Self {
        Self {
            data: RwLock::new(warp_points),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of times [`Backend::save`] has been called.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> io::Error {
    io::Error::other(format!("lock poisoned: {e}"))
}

impl Backend for InMemoryBackend {
    fn load(&self) -> Result<WarpPoints> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.clone())
    }

    fn save(&self, warp_points: &WarpPoints) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        *data = warp_points.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let backend = InMemoryBackend::new();
        assert!(backend.load().unwrap().is_empty());
        assert_eq!(backend.save_count(), 0);
    }

    #[test]
    fn save_replaces_contents() {
        let backend = InMemoryBackend::with_warp_points([("a", "/a")].into_iter().collect());
        backend
            .save(&[("b", "/b")].into_iter().collect::<WarpPoints>())
            .unwrap();

        let wps = backend.load().unwrap();
        assert_eq!(wps.get("a"), None);
        assert_eq!(wps.get("b"), Some("/b"));
        assert_eq!(backend.save_count(), 1);
    }
}
