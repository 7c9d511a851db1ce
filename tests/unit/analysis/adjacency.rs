//! Tests for directional adjacency learning and normalization

#[cfg(test)]
mod tests {
    use ndarray::Array3;
    use wavetile::analysis::adjacency::{
        AdjacencyModel, UnobservedPolicy, count_neighbors, normalize_lanes,
    };
    use wavetile::GenerationError;
    use wavetile::analysis::catalog::Catalog;
    use wavetile::spatial::{Direction, TileGrid};

    fn learn(text: &str) -> AdjacencyModel {
        let grid = TileGrid::parse(text).expect("valid sample");
        let catalog = Catalog::from_labels(grid.labels().iter().map(String::as_str));
        AdjacencyModel::learn(&grid, &catalog)
    }

    fn distribution(model: &AdjacencyModel, type_index: usize, direction: Direction) -> Vec<f64> {
        model
            .distribution(type_index, direction)
            .map(|d| d.to_vec())
            .unwrap_or_default()
    }

    // Sample: A A / A B, so B sits south-east of the top-left A
    #[test]
    fn test_learned_distributions_of_small_sample() {
        let model = learn("A;A\nA;B");
        assert_eq!(model.type_count(), 2);

        assert_eq!(distribution(&model, 0, Direction::West), vec![1.0, 0.0]);
        assert_eq!(distribution(&model, 0, Direction::East), vec![0.5, 0.5]);
        assert_eq!(distribution(&model, 0, Direction::South), vec![0.5, 0.5]);
        assert_eq!(distribution(&model, 0, Direction::SouthEast), vec![0.0, 1.0]);
        assert_eq!(distribution(&model, 1, Direction::NorthWest), vec![1.0, 0.0]);
    }

    #[test]
    fn test_unobserved_directions_stay_all_zero() {
        let model = learn("A;A\nA;B");
        assert!(!model.is_observed(0, Direction::NorthWest));
        assert_eq!(distribution(&model, 0, Direction::NorthWest), vec![0.0, 0.0]);
        assert!(!model.is_observed(1, Direction::South));
        assert!(!model.is_observed(1, Direction::East));
        assert!(model.is_observed(1, Direction::North));
    }

    #[test]
    fn test_observed_distributions_sum_to_one() {
        let model = learn("W;W;W;G\nW;G;G;S\nW;G;S;S\nW;W;G;S");
        for type_index in 0..model.type_count() {
            for direction in Direction::ALL {
                let sum: f64 = distribution(&model, type_index, direction).iter().sum();
                if model.is_observed(type_index, direction) {
                    assert!((sum - 1.0).abs() < 1e-12, "{type_index} {direction:?}: {sum}");
                } else {
                    assert_eq!(sum, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_raw_counts_before_normalization() {
        let grid = TileGrid::parse("A;A\nA;B").expect("valid sample");
        let catalog = Catalog::from_labels(grid.labels().iter().map(String::as_str));
        let counts = count_neighbors(&grid, &catalog);
        assert_eq!(counts.dim(), (2, 8, 2));
        assert_eq!(counts[[0, Direction::East.index(), 0]], 1.0);
        assert_eq!(counts[[0, Direction::East.index(), 1]], 1.0);
        assert_eq!(counts[[1, Direction::North.index(), 0]], 1.0);
        assert_eq!(counts.sum(), 12.0);
    }

    #[test]
    fn test_normalize_lanes_keeps_zero_lanes() {
        let mut counts = Array3::zeros((1, 8, 2));
        counts[[0, 0, 0]] = 2.0;
        counts[[0, 0, 1]] = 6.0;
        normalize_lanes(&mut counts);
        assert_eq!(counts[[0, 0, 0]], 0.25);
        assert_eq!(counts[[0, 0, 1]], 0.75);
        assert_eq!(counts[[0, 1, 0]], 0.0);
    }

    #[test]
    fn test_from_array_rejects_malformed_shapes() {
        for shape in [(2, 3, 2), (2, 8, 3), (1, 9, 1)] {
            assert!(matches!(
                AdjacencyModel::from_array(Array3::zeros(shape)),
                Err(GenerationError::InvalidParameter { parameter: "adjacency", .. })
            ));
        }

        let model = AdjacencyModel::from_array(Array3::zeros((2, 8, 2))).expect("valid shape");
        assert_eq!(model.type_count(), 2);
        assert!(model.distribution(1, Direction::SouthWest).is_some());
        assert!(!model.is_observed(1, Direction::SouthWest));
    }

    #[test]
    fn test_out_of_range_type_has_no_distribution() {
        let model = learn("A");
        assert!(model.distribution(1, Direction::East).is_none());
        assert!(!model.is_observed(0, Direction::East));
        assert_eq!(UnobservedPolicy::default(), UnobservedPolicy::Forbid);
    }
}
