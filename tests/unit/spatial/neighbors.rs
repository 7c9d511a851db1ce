//! Tests for eight-way neighbor addressing without edge wrapping

#[cfg(test)]
mod tests {
    use wavetile::spatial::neighbors::{Direction, neighbor_index, neighbors};

    #[test]
    fn test_direction_order_is_clockwise_from_west() {
        let labels: Vec<&str> = Direction::ALL.iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["W", "NW", "N", "NE", "E", "SE", "S", "SW"]);
        for (position, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), position);
        }
    }

    #[test]
    fn test_offsets_are_distinct_unit_steps() {
        let offsets: std::collections::HashSet<(isize, isize)> =
            Direction::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(offsets.len(), Direction::COUNT);
        assert!(!offsets.contains(&(0, 0)));
        assert!(offsets.iter().all(|(dx, dy)| dx.abs() <= 1 && dy.abs() <= 1));
    }

    #[test]
    fn test_center_cell_has_all_neighbors() {
        let found: Vec<(Direction, usize)> = neighbors(4, 3, 3).collect();
        assert_eq!(
            found,
            vec![
                (Direction::West, 3),
                (Direction::NorthWest, 0),
                (Direction::North, 1),
                (Direction::NorthEast, 2),
                (Direction::East, 5),
                (Direction::SouthEast, 8),
                (Direction::South, 7),
                (Direction::SouthWest, 6),
            ]
        );
    }

    #[test]
    fn test_corner_cell_neighbors() {
        let found: Vec<(Direction, usize)> = neighbors(0, 3, 3).collect();
        assert_eq!(
            found,
            vec![
                (Direction::East, 1),
                (Direction::SouthEast, 4),
                (Direction::South, 3)
            ]
        );
        let last: Vec<usize> = neighbors(8, 3, 3).map(|(_, n)| n).collect();
        assert_eq!(last, vec![7, 4, 5]);
    }

    // Horizontal steps must not spill into the next or previous row
    #[test]
    fn test_no_wrapping_across_rows() {
        assert_eq!(neighbor_index(2, 3, 3, Direction::East), None);
        assert_eq!(neighbor_index(3, 3, 3, Direction::West), None);
        assert_eq!(neighbor_index(2, 3, 3, Direction::SouthEast), None);
        assert_eq!(neighbor_index(3, 3, 3, Direction::NorthWest), None);
        assert_eq!(neighbor_index(3, 3, 3, Direction::North), Some(0));
    }

    #[test]
    fn test_out_of_range_inputs() {
        assert_eq!(neighbor_index(9, 3, 3, Direction::West), None);
        assert_eq!(neighbor_index(0, 0, 0, Direction::East), None);
        assert_eq!(neighbors(0, 1, 1).count(), 0);
    }

    #[test]
    fn test_single_row_grid() {
        let found: Vec<usize> = neighbors(1, 4, 1).map(|(_, n)| n).collect();
        assert_eq!(found, vec![0, 2]);
    }
}
