//! The [`Backend`] trait: where a store's warp points are persisted.
//!
//! Every store operation loads the full mapping, applies one change, and
//! saves the full mapping back. Backends only need whole-mapping reads and
//! writes.

use crate::error::Result;
use crate::types::WarpPoints;

/// Persistence backend for a warp point store.
pub trait Backend: Send + Sync {
    /// Load the complete mapping.
    ///
    /// A store that has never been written loads as an empty mapping.
    fn load(&self) -> Result<WarpPoints>;

    /// Replace the persisted mapping with `warp_points`.
    fn save(&self, warp_points: &WarpPoints) -> Result<()>;
}
