//! Reading and writing grids in the `;`-separated text format

use std::path::Path;

use crate::io::error::{GenerationError, Result};
use crate::spatial::TileGrid;

/// Load a sample grid from a text file
///
/// Malformed content (unequal row lengths, empty fields) is logged and
/// yields an empty grid rather than an error.
///
/// # Errors
///
/// Returns an error if the file cannot be read
pub fn read_grid(path: &Path) -> Result<TileGrid> {
    let text = std::fs::read_to_string(path).map_err(|e| GenerationError::FileSystem {
        path: path.to_path_buf(),
        operation: "read grid",
        source: e,
    })?;
    match TileGrid::parse(&text) {
        Ok(grid) => Ok(grid),
        Err(error) => {
            log::warn!("{}: {error}; using an empty grid", path.display());
            Ok(TileGrid::empty())
        }
    }
}

/// Write a grid as text, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written
pub fn write_grid(grid: &TileGrid, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    log::debug!("writing {}x{} grid to {}", grid.width(), grid.height(), path.display());
    std::fs::write(path, grid.to_text()).map_err(|e| GenerationError::FileSystem {
        path: path.to_path_buf(),
        operation: "write grid",
        source: e,
    })
}
