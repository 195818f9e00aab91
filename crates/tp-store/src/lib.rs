//! Warp point store for the `teleport` directory-bookmarking tool.
//!
//! A warp point maps a short key to a directory. The full set of warp points
//! lives in one text file (by default `~/.tp`) that is loaded at the start of
//! every operation and rewritten in full after every mutation.
//!
//! # Modules
//!
//! - [`error`] — [`StoreError`] and the [`Result`] alias
//! - [`types`] — [`WarpPoint`] and the [`WarpPoints`] mapping
//! - [`keys`] — key validation against [`ReservedWords`], target validation
//! - [`codec`] — the `key = target` text format
//! - [`backend`] — the [`Backend`] persistence trait
//! - [`file`] — the file-backed store ([`FileBackend`])
//! - [`memory`] — [`InMemoryBackend`] for tests
//! - [`location`] — resolution of the store path ([`StoreLocation`])
//! - [`store`] — [`WarpStore`]: add, lookup, remove, list, prune
//!
//! # Concurrency
//!
//! There is no locking. Concurrent invocations race on read-modify-write of
//! the store file and the last writer wins; changes made by the other
//! invocation in between are lost.

pub mod backend;
pub mod codec;
pub mod error;
pub mod file;
pub mod keys;
pub mod location;
pub mod memory;
pub mod store;
pub mod types;

pub use backend::Backend;
pub use codec::{decode, encode};
pub use error::{Result, StoreError};
pub use file::{FileBackend, SaveMode};
pub use keys::{validate_key, validate_target, ReservedWords};
pub use location::StoreLocation;
pub use memory::InMemoryBackend;
pub use store::WarpStore;
pub use types::{WarpPoint, WarpPoints};
