//! Tests for neighbor propagation and contradiction recovery

#[cfg(test)]
mod tests {
    use ndarray::Array3;
    use wavetile::GenerationError;
    use wavetile::algorithm::contradiction::ContradictionLog;
    use wavetile::algorithm::propagation::{Combined, PropagationRules, combine};
    use wavetile::algorithm::queue::{EntropyQueue, UNTOUCHED_ENTROPY};
    use wavetile::algorithm::wave::WaveGrid;
    use wavetile::analysis::adjacency::{AdjacencyModel, UnobservedPolicy};
    use wavetile::spatial::Direction;

    fn adjacency_with(entries: &[(usize, Direction, usize, f64)], types: usize) -> AdjacencyModel {
        let mut likelihoods = Array3::zeros((types, 8, types));
        for &(from, direction, to, p) in entries {
            likelihoods[[from, direction.index(), to]] = p;
        }
        AdjacencyModel::from_array(likelihoods).expect("valid shape")
    }

    fn collapse(wave: &mut WaveGrid, queue: &mut EntropyQueue, cell: usize, type_index: usize) {
        wave.collapse(cell, type_index).expect("valid collapse");
        assert!(queue.update(cell, 0.0));
    }

    #[test]
    fn test_combine_multiplies_and_normalizes() {
        let combined = combine(&[0.25, 0.75], &[0.5, 0.5], UnobservedPolicy::Forbid);
        assert_eq!(combined.ok(), Some(Combined::Distribution(vec![0.25, 0.75])));
    }

    #[test]
    fn test_combine_without_overlap_is_contradiction() {
        let combined = combine(&[0.0, 1.0], &[1.0, 0.0], UnobservedPolicy::Forbid);
        assert_eq!(combined.ok(), Some(Combined::Contradiction));

        let unobserved = combine(&[0.0, 0.0], &[0.5, 0.5], UnobservedPolicy::Forbid);
        assert_eq!(unobserved.ok(), Some(Combined::Contradiction));
    }

    #[test]
    fn test_combine_ignore_policy_skips_all_zero_evidence() {
        let combined = combine(&[0.0, 0.0], &[0.2, 0.8], UnobservedPolicy::Ignore);
        assert_eq!(combined.ok(), Some(Combined::Distribution(vec![0.2, 0.8])));

        // Observed evidence still applies under the relaxed policy
        let observed = combine(&[0.0, 1.0], &[1.0, 0.0], UnobservedPolicy::Ignore);
        assert_eq!(observed.ok(), Some(Combined::Contradiction));
    }

    #[test]
    fn test_combine_rejects_bad_inputs() {
        assert!(matches!(
            combine(&[1.0], &[0.5, 0.5], UnobservedPolicy::Forbid),
            Err(GenerationError::InvariantViolation { .. })
        ));
        assert!(matches!(
            combine(&[f64::NAN, 0.5], &[1.0, 1.0], UnobservedPolicy::Forbid),
            Err(GenerationError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_propagate_updates_neighbor_and_queue() {
        let adjacency = adjacency_with(&[(0, Direction::East, 0, 0.25), (0, Direction::East, 1, 0.75)], 2);
        let rules = PropagationRules::new(&adjacency, UnobservedPolicy::Forbid);
        let mut wave = WaveGrid::new(2, 1, &[0.5, 0.5]);
        let mut queue = EntropyQueue::untouched(2);
        let mut log = ContradictionLog::new();

        collapse(&mut wave, &mut queue, 0, 0);
        let updated = rules
            .propagate(&mut wave, &mut queue, &mut log, 0, 0)
            .expect("propagation succeeds");

        assert_eq!(updated, 1);
        assert_eq!(wave.cell_vec(1), Some(vec![0.25, 0.75]));
        assert_eq!(queue.entropy_of(1), wave.entropy(1));
        assert!(log.is_empty());
    }

    // Cell 0 forces type 1 to its east, but cell 1 only allows type 0
    #[test]
    fn test_contradiction_resets_to_uniform() {
        let adjacency = adjacency_with(&[(0, Direction::East, 1, 1.0)], 2);
        let rules = PropagationRules::new(&adjacency, UnobservedPolicy::Forbid);
        let mut wave = WaveGrid::new(3, 1, &[1.0, 0.0]);
        let mut queue = EntropyQueue::untouched(3);
        let mut log = ContradictionLog::new();

        collapse(&mut wave, &mut queue, 0, 0);
        rules
            .propagate(&mut wave, &mut queue, &mut log, 0, 0)
            .expect("contradictions are recoverable");

        assert_eq!(wave.cell_vec(1), Some(vec![0.5, 0.5]));
        assert_eq!(log.count(), 1);
        assert!(log.involves(1));
        assert_eq!(log.events().first().map(|e| e.direction), Some(Direction::East));
        assert_eq!(queue.entropy_of(1), Some(1.0));
        assert_eq!(queue.entropy_of(2), Some(UNTOUCHED_ENTROPY));
        assert_eq!(wave.cell_vec(2), Some(vec![1.0, 0.0]));
    }

    #[test]
    fn test_collapsed_neighbors_are_left_alone() {
        let adjacency = adjacency_with(&[(0, Direction::East, 1, 1.0), (0, Direction::West, 1, 1.0)], 2);
        let rules = PropagationRules::new(&adjacency, UnobservedPolicy::Forbid);
        let mut wave = WaveGrid::new(3, 1, &[0.5, 0.5]);
        let mut queue = EntropyQueue::untouched(3);
        let mut log = ContradictionLog::new();

        collapse(&mut wave, &mut queue, 0, 0);
        assert!(queue.remove(0).is_some());
        collapse(&mut wave, &mut queue, 1, 0);
        let updated = rules
            .propagate(&mut wave, &mut queue, &mut log, 1, 0)
            .expect("propagation succeeds");

        assert_eq!(updated, 1);
        assert_eq!(wave.cell_vec(0), Some(vec![1.0, 0.0]));
        assert_eq!(wave.cell_vec(2), Some(vec![0.0, 1.0]));
        assert!(log.is_empty());
    }

    #[test]
    fn test_unqueued_uncollapsed_neighbor_is_fatal() {
        let adjacency = adjacency_with(&[(0, Direction::East, 0, 1.0)], 1);
        let rules = PropagationRules::new(&adjacency, UnobservedPolicy::Forbid);
        let mut wave = WaveGrid::new(2, 1, &[1.0]);
        let mut queue = EntropyQueue::untouched(2);
        let mut log = ContradictionLog::new();

        collapse(&mut wave, &mut queue, 0, 0);
        assert!(queue.remove(1).is_some());
        let result = rules.propagate(&mut wave, &mut queue, &mut log, 0, 0);
        assert!(result.as_ref().is_err_and(GenerationError::is_fatal));
    }

    #[test]
    fn test_ignore_policy_keeps_unconstrained_neighbors() {
        let adjacency = adjacency_with(&[], 2);
        let rules = PropagationRules::new(&adjacency, UnobservedPolicy::Ignore);
        let mut wave = WaveGrid::new(2, 2, &[0.75, 0.25]);
        let mut queue = EntropyQueue::untouched(4);
        let mut log = ContradictionLog::new();

        collapse(&mut wave, &mut queue, 0, 1);
        let updated = rules
            .propagate(&mut wave, &mut queue, &mut log, 0, 1)
            .expect("propagation succeeds");

        assert_eq!(updated, 3);
        assert!(log.is_empty());
        for cell in 1..4 {
            assert_eq!(wave.cell_vec(cell), Some(vec![0.75, 0.25]));
            assert_eq!(queue.entropy_of(cell), wave.entropy(cell));
        }
    }
}
