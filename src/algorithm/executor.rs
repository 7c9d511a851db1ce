use crate::{
    algorithm::contradiction::ContradictionLog,
    algorithm::materialize::materialize,
    algorithm::propagation::PropagationRules,
    algorithm::queue::EntropyQueue,
    algorithm::selection::RandomSelector,
    algorithm::wave::WaveGrid,
    analysis::model::SampleModel,
    io::configuration::{GenerationConfig, MAX_GRID_CELLS, SEEDING_RATIO},
    io::error::{GenerationError, Result, invalid_parameter, invariant_violation},
    spatial::TileGrid,
};

/// Stage of a generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Collapsing randomly picked cells from the sample frequencies
    Seeding,
    /// Collapsing the lowest-entropy cell from its own distribution
    Collapsing,
    /// Every cell is collapsed
    Complete,
}

/// A cell collapsed by the most recent step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollapsedCell {
    /// Row-major cell index
    pub cell: usize,
    /// Chosen tile type
    pub type_index: usize,
    /// Entropy recorded in the queue when the cell was removed
    pub entropy: f64,
    /// Whether the cell was picked during seeding
    pub seeded: bool,
}

/// Summary of a finished generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// Seed the generation ran with
    pub seed: u64,
    /// Cells collapsed during seeding
    pub seeded: usize,
    /// Cells collapsed by the entropy-ordered loop
    pub collapsed: usize,
    /// Contradictions resolved by resetting to uniform
    pub contradictions: usize,
}

/// Wave function collapse state machine for one output grid
///
/// Owns the wave grid, entropy queue and random source of a single
/// generation while borrowing the shared sample model. Seeding collapses
/// `cells / SEEDING_RATIO` random cells first; afterwards each step collapses
/// the lowest-entropy cell, lowest index first on ties.
pub struct CollapseEngine<'m> {
    model: &'m SampleModel,
    rules: PropagationRules<'m>,
    wave: WaveGrid,
    queue: EntropyQueue,
    selector: RandomSelector,
    contradictions: ContradictionLog,
    phase: Phase,
    seed: u64,
    seeds_planned: usize,
    seeds_done: usize,
    collapses_planned: usize,
    collapses_done: usize,
    last_collapsed: Option<CollapsedCell>,
}

impl<'m> CollapseEngine<'m> {
    /// Allocate the wave grid and queue for a `width x height` output
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model learned no tile types
    /// - Either dimension is zero
    /// - The cell count overflows or exceeds `MAX_GRID_CELLS`
    pub fn new(
        model: &'m SampleModel,
        width: usize,
        height: usize,
        config: &GenerationConfig,
    ) -> Result<Self> {
        if model.frequencies().is_empty() {
            return Err(GenerationError::EmptyModel);
        }
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"must be positive"));
        }
        if height == 0 {
            return Err(invalid_parameter("height", &height, &"must be positive"));
        }
        let cells = width
            .checked_mul(height)
            .filter(|&cells| cells <= MAX_GRID_CELLS)
            .ok_or_else(|| {
                invalid_parameter(
                    "dimensions",
                    &format!("{width}x{height}"),
                    &format!("at most {MAX_GRID_CELLS} cells are supported"),
                )
            })?;

        let seed = config.resolve_seed();
        let seeds_planned = cells / SEEDING_RATIO;
        let phase = if seeds_planned > 0 {
            Phase::Seeding
        } else {
            Phase::Collapsing
        };

        log::debug!(
            "generating {width}x{height} map from {} tile types (seed {seed})",
            model.type_count()
        );

        Ok(Self {
            model,
            rules: PropagationRules::new(model.adjacency(), config.unobserved),
            wave: WaveGrid::new(width, height, model.frequencies().as_slice()),
            queue: EntropyQueue::untouched(cells),
            selector: RandomSelector::new(seed),
            contradictions: ContradictionLog::new(),
            phase,
            seed,
            seeds_planned,
            seeds_done: 0,
            collapses_planned: cells - seeds_planned,
            collapses_done: 0,
            last_collapsed: None,
        })
    }

    /// Collapse one cell
    ///
    /// Returns `false` once every cell is collapsed.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the queue and wave grid disagree or
    /// a probability becomes not-a-number
    pub fn step(&mut self) -> Result<bool> {
        match self.phase {
            Phase::Seeding => {
                self.seed_cell()?;
                if self.seeds_done == self.seeds_planned {
                    self.collapses_planned = self.queue.len();
                    self.phase = Phase::Collapsing;
                }
            }
            Phase::Collapsing => {
                if self.collapses_done < self.collapses_planned {
                    self.collapse_lowest()?;
                }
                if self.collapses_done == self.collapses_planned {
                    self.finish()?;
                }
            }
            Phase::Complete => return Ok(false),
        }
        Ok(self.phase != Phase::Complete)
    }

    /// Run every remaining step
    ///
    /// # Errors
    ///
    /// Propagates the first invariant violation encountered
    pub fn run(&mut self) -> Result<GenerationReport> {
        while self.step()? {}
        Ok(self.report())
    }

    /// Convert the collapsed wave grid into tile labels
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if cells remain uncollapsed or a chosen
    /// type is outside the catalog
    pub fn materialize(&self) -> Result<TileGrid> {
        if !self.wave.is_fully_collapsed() {
            return Err(invariant_violation(
                "materialize",
                &format!(
                    "{} of {} cells are still uncollapsed",
                    self.wave.len() - self.wave.collapsed_count(),
                    self.wave.len()
                ),
            ));
        }
        materialize(&self.wave, self.model.catalog())
    }

    /// Current stage
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Seed driving the random choices
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Live wave grid
    pub const fn wave(&self) -> &WaveGrid {
        &self.wave
    }

    /// Queue of still-uncollapsed cells
    pub const fn queue(&self) -> &EntropyQueue {
        &self.queue
    }

    /// Contradictions resolved so far
    pub const fn contradictions(&self) -> &ContradictionLog {
        &self.contradictions
    }

    /// Cell collapsed by the latest step
    pub const fn last_collapsed(&self) -> Option<CollapsedCell> {
        self.last_collapsed
    }

    /// Number of cells collapsed seeding included, and total cells
    pub fn progress(&self) -> (usize, usize) {
        (self.seeds_done + self.collapses_done, self.wave.len())
    }

    /// Counters of the generation so far
    pub fn report(&self) -> GenerationReport {
        GenerationReport {
            seed: self.seed,
            seeded: self.seeds_done,
            collapsed: self.collapses_done,
            contradictions: self.contradictions.count(),
        }
    }

    fn seed_cell(&mut self) -> Result<()> {
        let expected = self.wave.len() - self.seeds_done;
        if self.queue.len() != expected {
            return Err(invariant_violation(
                "seed_cell",
                &format!(
                    "queue holds {} cells, expected {expected}",
                    self.queue.len()
                ),
            ));
        }

        let entry = self
            .selector
            .pick_slot(self.queue.len())
            .and_then(|slot| self.queue.entry_at(slot))
            .ok_or_else(|| invariant_violation("seed_cell", &"queue is empty"))?;
        let type_index = self
            .selector
            .sample_type(self.model.frequencies().as_slice())?;

        self.resolve(entry.cell, type_index, true)?;
        self.seeds_done += 1;
        Ok(())
    }

    fn collapse_lowest(&mut self) -> Result<()> {
        let entry = self.queue.peek().ok_or_else(|| {
            invariant_violation(
                "collapse_lowest",
                &format!(
                    "queue emptied after {} of {} collapses",
                    self.collapses_done, self.collapses_planned
                ),
            )
        })?;
        let distribution = self.wave.cell_vec(entry.cell).ok_or_else(|| {
            invariant_violation(
                "collapse_lowest",
                &format!("queued cell {} outside wave grid", entry.cell),
            )
        })?;
        let type_index = self.selector.sample_type(&distribution)?;

        self.resolve(entry.cell, type_index, false)?;
        self.collapses_done += 1;
        Ok(())
    }

    /// Collapse, propagate, then dequeue a cell
    fn resolve(&mut self, cell: usize, type_index: usize, seeded: bool) -> Result<()> {
        self.wave.collapse(cell, type_index)?;
        let entropy = self.wave.entropy(cell).unwrap_or_default();
        if !self.queue.update(cell, entropy) {
            return Err(invariant_violation(
                "resolve",
                &format!("collapsed cell {cell} was not queued"),
            ));
        }

        self.rules.propagate(
            &mut self.wave,
            &mut self.queue,
            &mut self.contradictions,
            cell,
            type_index,
        )?;

        let removed = self
            .queue
            .remove(cell)
            .ok_or_else(|| invariant_violation("resolve", &format!("cell {cell} vanished from queue")))?;
        if removed.entropy.is_nan() || removed.entropy > 0.0 {
            return Err(invariant_violation(
                "resolve",
                &format!("collapsed cell {cell} left the queue with entropy {}", removed.entropy),
            ));
        }

        self.last_collapsed = Some(CollapsedCell {
            cell,
            type_index,
            entropy: removed.entropy,
            seeded,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if !self.queue.is_empty() {
            return Err(invariant_violation(
                "finish",
                &format!("{} cells left in queue after the collapse loop", self.queue.len()),
            ));
        }
        self.phase = Phase::Complete;
        log::debug!(
            "generation complete: {} seeded, {} collapsed, {} contradictions",
            self.seeds_done,
            self.collapses_done,
            self.contradictions.count()
        );
        Ok(())
    }
}
