//! Tests for grid extents, coordinate mapping and cell storage

#[cfg(test)]
mod tests {
    use tilecollapse::GenerationError;
    use tilecollapse::io::configuration::MAX_GRID_DIMENSION;
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::grid::{Coord, Dimensions, Grid};

    fn dims(width: usize, height: usize, depth: usize) -> Dimensions {
        Dimensions::new(width, height, depth).expect("valid dimensions")
    }

    // Tests zero and oversized axes are rejected as configuration errors
    // Verified by removing the zero check
    #[test]
    fn test_dimension_validation() {
        for (w, h, d) in [(0, 1, 1), (1, 0, 1), (1, 1, 0)] {
            let error = Dimensions::new(w, h, d).expect_err("zero axis accepted");
            assert!(matches!(error, GenerationError::InvalidConfiguration { .. }));
        }

        let error = Dimensions::new(MAX_GRID_DIMENSION + 1, 1, 1).expect_err("oversized axis");
        assert!(matches!(
            error,
            GenerationError::InvalidConfiguration {
                parameter: "width",
                ..
            }
        ));

        let error = Dimensions::new(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION, MAX_GRID_DIMENSION)
            .expect_err("too many cells");
        assert!(matches!(
            error,
            GenerationError::InvalidConfiguration {
                parameter: "dimensions",
                ..
            }
        ));
    }

    // Tests the flat index is row-major over x, y, z and round-trips through coord_of
    // Verified by swapping height and depth in index_of
    #[test]
    fn test_index_mapping() {
        let dimensions = dims(3, 4, 5);
        assert_eq!(dimensions.cell_count(), 60);
        assert_eq!(dimensions.index_of(Coord::new(0, 0, 1)), Some(1));
        assert_eq!(dimensions.index_of(Coord::new(0, 1, 0)), Some(5));
        assert_eq!(dimensions.index_of(Coord::new(1, 0, 0)), Some(20));

        for index in 0..dimensions.cell_count() {
            let coord = dimensions.coord_of(index).expect("index in range");
            assert_eq!(dimensions.index_of(coord), Some(index));
        }
        assert_eq!(dimensions.coord_of(60), None);
    }

    // Tests out-of-range coordinates are reported rather than wrapped
    // Verified by clamping coordinates in checked_index
    #[test]
    fn test_checked_index() {
        let dimensions = dims(2, 2, 2);
        assert_eq!(dimensions.checked_index(Coord::new(1, 1, 1)).ok(), Some(7));

        let error = dimensions
            .checked_index(Coord::new(2, 0, 0))
            .expect_err("outside grid");
        assert!(matches!(
            error,
            GenerationError::IndexOutOfBounds { coordinate, .. } if coordinate == Coord::new(2, 0, 0)
        ));
    }

    // Tests neighbours stop at the grid edge in every direction
    // Verified by allowing negative steps to wrap around
    #[test]
    fn test_neighbors_at_edges() {
        let dimensions = dims(2, 3, 2);
        let origin = Coord::new(0, 0, 0);
        assert_eq!(dimensions.neighbor(origin, Direction::Below), None);
        assert_eq!(dimensions.neighbor(origin, Direction::Left), None);
        assert_eq!(dimensions.neighbor(origin, Direction::Back), None);
        assert_eq!(
            dimensions.neighbor(origin, Direction::Above),
            Some(Coord::new(0, 1, 0))
        );

        let top = Coord::new(1, 2, 1);
        assert_eq!(dimensions.neighbor(top, Direction::Above), None);
        assert_eq!(dimensions.neighbor(top, Direction::Right), None);
        assert_eq!(dimensions.neighbor(top, Direction::Front), None);

        let inside = dimensions
            .neighbors(Coord::new(0, 1, 0))
            .filter(|(_, neighbor)| neighbor.is_some())
            .count();
        assert_eq!(inside, 4);
    }

    // Tests storage reads and writes by coordinate and iterates in index order
    // Verified by iterating the array in column-major order
    #[test]
    fn test_grid_storage() {
        let dimensions = dims(2, 2, 2);
        let mut grid = Grid::from_fn(dimensions, |coord| coord.x * 100 + coord.y * 10 + coord.z);
        assert_eq!(grid.get(Coord::new(1, 0, 1)), Some(&101));
        assert_eq!(grid.get(Coord::new(2, 0, 0)), None);

        if let Some(cell) = grid.get_mut(Coord::new(0, 1, 1)) {
            *cell = 7;
        }
        assert_eq!(grid.get_index(3), Some(&7));

        let order: Vec<Coord> = grid.iter().map(|(coord, _)| coord).collect();
        for (index, coord) in order.iter().enumerate() {
            assert_eq!(dimensions.index_of(*coord), Some(index));
        }

        let doubled = grid.map_array(|value| value * 2);
        assert_eq!(doubled[[1, 1, 1]], 222);
        assert_eq!(Grid::filled(dimensions, 0u8).as_array().len(), 8);
    }

    // Tests display forms
    // Verified by changing the separator
    #[test]
    fn test_display() {
        assert_eq!(dims(4, 5, 6).to_string(), "4x5x6");
        assert_eq!(Coord::from((1, 2, 3)).to_string(), "(1, 2, 3)");
    }
}
