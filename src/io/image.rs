//! PNG preview export with one palette colour per catalog entry

use crate::analysis::catalog::Catalog;
use crate::io::configuration::PREVIEW_TILE_PIXELS;
use crate::io::error::{GenerationError, Result, invalid_parameter};
use crate::spatial::TileGrid;
use image::{ImageBuffer, Rgba};
use std::path::Path;

const PALETTE: [[u8; 4]; 12] = [
    [38, 84, 166, 255],
    [95, 168, 64, 255],
    [222, 196, 120, 255],
    [120, 120, 120, 255],
    [26, 92, 40, 255],
    [240, 240, 240, 255],
    [150, 80, 40, 255],
    [200, 60, 50, 255],
    [110, 190, 220, 255],
    [230, 150, 40, 255],
    [130, 70, 160, 255],
    [30, 30, 30, 255],
];

/// Colour assigned to a catalog index, cycling through the palette
pub fn palette_color(type_index: usize) -> [u8; 4] {
    PALETTE
        .get(type_index % PALETTE.len())
        .copied()
        .unwrap_or([0, 0, 0, 255])
}

/// Export a grid as a PNG image, one square block per tile
///
/// # Errors
///
/// Returns an error if:
/// - The grid does not hold exactly `width * height` labels
/// - A label is missing from the catalog
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &TileGrid, catalog: &Catalog, output_path: &Path) -> Result<()> {
    if !grid.is_complete() {
        return Err(invalid_parameter(
            "grid",
            &grid.len(),
            &format!(
                "expected {}x{} labels for a preview",
                grid.width(),
                grid.height()
            ),
        ));
    }
    let scale = PREVIEW_TILE_PIXELS;
    let width = grid.width() as u32 * scale;
    let height = grid.height() as u32 * scale;
    let mut img = ImageBuffer::new(width, height);

    for (index, label) in grid.labels().iter().enumerate() {
        let type_index = catalog
            .index_of(label)
            .ok_or_else(|| GenerationError::UnknownLabel {
                label: label.clone(),
            })?;
        let row = (index / grid.width().max(1)) as u32;
        let col = (index % grid.width().max(1)) as u32;
        let color = Rgba(palette_color(type_index));

        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(col * scale + dx, row * scale + dy, color);
            }
        }
    }

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| GenerationError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
