//! Command-line interface for batch generation from sample grid files

use crate::analysis::adjacency::UnobservedPolicy;
use crate::analysis::model::SampleModel;
use crate::io::configuration::{
    DEFAULT_COUNT, DEFAULT_HEIGHT, DEFAULT_WIDTH, GRID_EXTENSION, GenerationConfig, OUTPUT_SUFFIX,
};
use crate::io::error::{GenerationError, Result};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::text::{read_grid, write_grid};
use crate::spatial::TileGrid;
use clap::Parser;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate tile maps resembling a sample grid using wave function collapse"
)]
/// Command-line arguments for the map generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Sample grid file (`;`-separated text) or directory of samples
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Width of each generated map in tiles
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Height of each generated map in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation (defaults to the wall clock)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of maps to generate per sample
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Write generated maps to standard output as well
    #[arg(short, long)]
    pub print: bool,

    /// Also export a PNG preview of every generated map
    #[arg(long)]
    pub png: bool,

    /// Treat never-observed neighbor relationships as unconstrained
    #[arg(long)]
    pub allow_unobserved: bool,

    /// Print the learned catalog, frequencies and neighbor likelihoods
    #[arg(long)]
    pub summary: bool,

    /// Process samples even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every contradiction and learning detail
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Logging threshold implied by `--quiet` and `--verbose`
    pub const fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Warn
        } else if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// Policy for adjacency pairs never seen in the sample
    pub const fn unobserved_policy(&self) -> UnobservedPolicy {
        if self.allow_unobserved {
            UnobservedPolicy::Ignore
        } else {
            UnobservedPolicy::Forbid
        }
    }

    /// Runtime configuration for the `map_index`-th map of a sample
    ///
    /// An explicit seed is offset by the map index so repeated maps differ
    /// while staying reproducible.
    pub fn generation_config(&self, map_index: usize) -> GenerationConfig {
        GenerationConfig {
            seed: self.seed.map(|seed| seed.wrapping_add(map_index as u64)),
            unobserved: self.unobserved_policy(),
        }
    }
}

/// Orchestrates batch processing of sample files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, generation or file output fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            log::info!("nothing to do for {}", self.cli.target.display());
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if Self::is_sample_file(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::io_error(
                    "Target file must be a .txt sample grid",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if Self::is_sample_file(&path)
                    && !Self::is_generated_file(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::io_error(
                "Target must be a .txt sample grid or a directory",
            ))
        }
    }

    fn is_sample_file(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(GRID_EXTENSION)
    }

    fn is_generated_file(path: &Path) -> bool {
        path.file_stem()
            .is_some_and(|stem| stem.to_string_lossy().contains(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path, 0, self.cli.count);
        if output_path.exists() {
            log::info!("skipping {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();

        let sample = read_grid(input_path)?;
        let model = match SampleModel::learn(&sample) {
            Ok(model) => model,
            Err(GenerationError::EmptyModel) => {
                self.outside_bars(|| {
                    log::warn!("{}: sample is empty, skipping", input_path.display());
                });
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        if self.cli.summary {
            Self::write_stdout(&model.summary())?;
        }

        let cells_per_map = self.cli.width.saturating_mul(self.cli.height);
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(
                index,
                input_path,
                cells_per_map.saturating_mul(self.cli.count),
            );
        }

        for map_index in 0..self.cli.count {
            let config = self.cli.generation_config(map_index);
            let mut engine = model.engine(self.cli.width, self.cli.height, &config)?;
            while engine.step()? {
                if let Some(ref mut pm) = self.progress_manager {
                    pm.update_cells(index, map_index * cells_per_map + engine.progress().0);
                }
            }
            let report = engine.report();
            let grid = engine.materialize()?;
            self.outside_bars(|| {
                log::info!(
                    "{} map {}: seed {}, {} contradictions resolved",
                    input_path.display(),
                    map_index + 1,
                    report.seed,
                    report.contradictions
                );
            });

            self.emit(&grid, &model, input_path, map_index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    fn emit(
        &self,
        grid: &TileGrid,
        model: &SampleModel,
        input_path: &Path,
        map_index: usize,
    ) -> Result<()> {
        let output_path = Self::get_output_path(input_path, map_index, self.cli.count);
        write_grid(grid, &output_path)?;

        if self.cli.png {
            export_grid_as_png(grid, model.catalog(), &output_path.with_extension("png"))?;
        }

        if self.cli.print {
            Self::write_stdout(&format!("{grid}\n"))?;
        }
        Ok(())
    }

    /// Log without tearing the progress bars
    fn outside_bars(&self, f: impl FnOnce()) {
        match self.progress_manager {
            Some(ref pm) => pm.suspend(f),
            None => f(),
        }
    }

    fn write_stdout(text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    /// Output path for one generated map, numbered when several are requested
    pub fn get_output_path(input_path: &Path, map_index: usize, count: usize) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = if count > 1 {
            format!(
                "{}{}_{}.{}",
                stem.to_string_lossy(),
                OUTPUT_SUFFIX,
                map_index + 1,
                GRID_EXTENSION
            )
        } else {
            format!(
                "{}{}.{}",
                stem.to_string_lossy(),
                OUTPUT_SUFFIX,
                GRID_EXTENSION
            )
        };

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
