//! Generation constants and runtime configuration defaults

use crate::analysis::adjacency::UnobservedPolicy;

// One seeded cell per this many output cells breaks the initial entropy symmetry
/// Divisor of the output cell count giving the number of randomly seeded cells
pub const SEEDING_RATIO: usize = 90;

/// Field separator within a row of the grid text format
pub const FIELD_DELIMITER: char = ';';

// Safety limit to prevent excessive memory allocation
/// Maximum number of cells in a generated grid
pub const MAX_GRID_CELLS: usize = 4_000_000;

/// Default output width when none is given on the command line
pub const DEFAULT_WIDTH: usize = 60;

/// Default output height when none is given on the command line
pub const DEFAULT_HEIGHT: usize = 60;

/// Default number of maps generated per sample file
pub const DEFAULT_COUNT: usize = 1;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_generated";
/// Extension of sample and output grid files
pub const GRID_EXTENSION: &str = "txt";
/// Side length in pixels of one tile in PNG previews
pub const PREVIEW_TILE_PIXELS: u32 = 4;

/// Runtime options for a single generation call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Explicit random seed; wall-clock time is used when absent
    pub seed: Option<u64>,
    /// How learned adjacency distributions with no observations constrain neighbors
    pub unobserved: UnobservedPolicy,
}

impl GenerationConfig {
    /// Configuration with a fixed seed and default policy
    pub const fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            unobserved: UnobservedPolicy::Forbid,
        }
    }

    /// Replace the unobserved-adjacency policy
    #[must_use]
    pub const fn with_unobserved(mut self, unobserved: UnobservedPolicy) -> Self {
        self.unobserved = unobserved;
        self
    }

    /// Seed to use for this call, falling back to the wall clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(wall_clock_seed)
    }
}

/// Seed derived from the current wall-clock time
pub fn wall_clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}
