//! File-backed warp point store.
//!
//! The store is a single text file read and rewritten wholesale on every
//! mutation. There is no locking: two processes racing on the same file both
//! read, both write, and the last writer wins.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::backend::Backend;
use crate::codec;
use crate::error::Result;
use crate::types::WarpPoints;

/// How [`save`] writes the store file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// Truncate and rewrite the file in place. A crash mid-write can leave a
    /// truncated store.
    #[default]
    Truncate,
    /// Write a temporary file next to the store and rename it over the store.
    Replace,
}

/// Load warp points from `path`. A missing file yields an empty mapping.
pub fn load(path: &Path) -> Result<WarpPoints> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file not found; starting empty");
            return Ok(WarpPoints::new());
        }
        Err(e) => return Err(e.into()),
    };
    let warp_points = codec::read_from(BufReader::new(file))?;
    debug!(path = %path.display(), count = warp_points.len(), "loaded warp points");
    Ok(warp_points)
}

/// Truncate or create the file at `path` and write `warp_points` to it.
pub fn save(path: &Path, warp_points: &WarpPoints) -> Result<()> {
    save_with(path, warp_points, SaveMode::Truncate)
}

/// Write `warp_points` to `path` using the given [`SaveMode`].
///
/// Missing parent directories are created.
pub fn save_with(path: &Path, warp_points: &WarpPoints, mode: SaveMode) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    match mode {
        SaveMode::Truncate => {
            let file = File::create(path)?;
            codec::write_to(BufWriter::new(file), warp_points)?;
        }
        SaveMode::Replace => {
            let mut tmp = NamedTempFile::new_in(parent)?;
            codec::write_to(BufWriter::new(tmp.as_file_mut()), warp_points)?;
            tmp.as_file().sync_all()?;
            tmp.persist(path).map_err(|e| e.error)?;
        }
    }
    debug!(path = %path.display(), count = warp_points.len(), ?mode, "saved warp points");
    Ok(())
}

/// A [`Backend`] that persists to one text file.
#[derive(Clone, Debug)]
pub struct FileBackend {
    path: PathBuf,
    mode: SaveMode,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: SaveMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: SaveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn load(&self) -> Result<WarpPoints> {
        load(&self.path)
    }

    fn save(&self, warp_points: &WarpPoints) -> Result<()> {
        save_with(&self.path, warp_points, self.mode)
    }
}
