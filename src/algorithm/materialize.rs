//! Conversion of a collapsed wave grid into tile labels

use crate::algorithm::wave::WaveGrid;
use crate::analysis::catalog::Catalog;
use crate::io::error::{Result, invariant_violation};
use crate::math::probability::first_argmax;
use crate::spatial::TileGrid;

/// Emit the most probable label of every cell in row-major order
///
/// Ties keep the earliest catalog index.
///
/// # Errors
///
/// Returns an invariant violation if a selected index is outside the catalog
pub fn materialize(wave: &WaveGrid, catalog: &Catalog) -> Result<TileGrid> {
    let mut grid = TileGrid::with_dimensions(wave.width(), wave.height());

    for cell in wave.as_array().rows() {
        let type_index = first_argmax(&cell.to_vec()).unwrap_or(0);
        let label = catalog.label(type_index).ok_or_else(|| {
            invariant_violation(
                "materialize",
                &format!(
                    "type index {type_index} outside catalog of {}",
                    catalog.len()
                ),
            )
        })?;
        grid.push(label)?;
    }

    Ok(grid)
}
