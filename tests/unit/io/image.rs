//! Tests for PNG preview export

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use wavetile::GenerationError;
    use wavetile::analysis::catalog::Catalog;
    use wavetile::io::configuration::PREVIEW_TILE_PIXELS;
    use wavetile::io::image::{export_grid_as_png, palette_color};
    use wavetile::spatial::TileGrid;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), palette_color(12));
        assert_ne!(palette_color(0), palette_color(1));
        assert_eq!(palette_color(3)[3], 255);
    }

    #[test]
    fn test_export_scales_tiles_to_blocks() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("preview.png");
        let grid = TileGrid::parse("A;B;A\nB;B;A").expect("valid grid");
        let catalog = Catalog::from_labels(["A", "B"]);

        export_grid_as_png(&grid, &catalog, &path).expect("export succeeds");

        let image = ::image::open(&path).expect("readable png").to_rgba8();
        assert_eq!(image.width(), 3 * PREVIEW_TILE_PIXELS);
        assert_eq!(image.height(), 2 * PREVIEW_TILE_PIXELS);
        assert_eq!(image.get_pixel(0, 0).0, palette_color(0));
        assert_eq!(
            image.get_pixel(PREVIEW_TILE_PIXELS, PREVIEW_TILE_PIXELS).0,
            palette_color(1)
        );
    }

    #[test]
    fn test_incomplete_grid_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("partial.png");
        let mut grid = TileGrid::with_dimensions(2, 1);
        grid.push("A").expect("room left");
        let catalog = Catalog::from_labels(["A"]);

        let result = export_grid_as_png(&grid, &catalog, &path);
        assert!(matches!(
            result,
            Err(GenerationError::InvalidParameter { parameter: "grid", .. })
        ));
        assert!(!path.exists());
    }

    // Surplus labels never reach the image buffer
    #[test]
    fn test_overfilled_grid_exports_declared_shape() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("overfilled.png");
        let mut grid = TileGrid::with_dimensions(2, 1);
        grid.extend(["A", "B", "A"].map(String::from));
        let catalog = Catalog::from_labels(["A", "B"]);

        export_grid_as_png(&grid, &catalog, &path).expect("export succeeds");
        let image = ::image::open(&path).expect("readable png").to_rgba8();
        assert_eq!(image.width(), 2 * PREVIEW_TILE_PIXELS);
        assert_eq!(image.height(), PREVIEW_TILE_PIXELS);
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let grid = TileGrid::parse("A;Z").expect("valid grid");
        let catalog = Catalog::from_labels(["A"]);
        let result = export_grid_as_png(&grid, &catalog, &dir.path().join("bad.png"));
        assert!(matches!(
            result,
            Err(GenerationError::UnknownLabel { label }) if label == "Z"
        ));
    }
}
