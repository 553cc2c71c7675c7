//! Tests for the fixed-assignment grid handed back by runs

#[cfg(test)]
mod tests {
    use tilecollapse::GenerationError;
    use tilecollapse::WaveCollapse;
    use tilecollapse::spatial::assignment::AssignmentGrid;
    use tilecollapse::spatial::grid::{Coord, Dimensions};
    use tilecollapse::spatial::tiles::{BOUNDARY, TileCategory, TileDefinition};

    fn single_tile_run(size: (usize, usize, usize)) -> WaveCollapse {
        WaveCollapse::from_parts(
            vec![TileDefinition::new(5, 1.0, TileCategory::Plant)],
            size,
            1,
        )
        .expect("valid run")
    }

    // Tests a fresh assignment is empty and reports unfilled cells as BOUNDARY
    // Verified by starting the filled counter at one
    #[test]
    fn test_empty_assignment() {
        let dimensions = Dimensions::new(2, 1, 2).expect("valid dimensions");
        let assignment = AssignmentGrid::new(dimensions);

        assert_eq!(assignment.filled_count(), 0);
        assert!(!assignment.is_complete());
        assert!(!assignment.is_filled(Coord::new(0, 0, 0)));
        assert_eq!(assignment.tile_id(Coord::new(1, 0, 1)).ok(), Some(None));
        assert_eq!(assignment.ids(), vec![BOUNDARY; 4]);
        assert_eq!(assignment.placements().count(), 0);
    }

    // Tests out-of-range reads are errors, not empty cells
    // Verified by mapping out-of-range reads to Ok(None)
    #[test]
    fn test_out_of_range_reads() {
        let dimensions = Dimensions::new(1, 1, 1).expect("valid dimensions");
        let assignment = AssignmentGrid::new(dimensions);
        let error = assignment
            .get(Coord::new(0, 1, 0))
            .expect_err("read outside grid");
        assert!(matches!(error, GenerationError::IndexOutOfBounds { .. }));
    }

    // Tests a completed run fills every cell with placement records
    // Verified by leaving the last cell unplaced
    #[test]
    fn test_completed_assignment() {
        let assignment = single_tile_run((2, 2, 1)).run().expect("run completes");

        assert!(assignment.is_complete());
        assert_eq!(assignment.filled_count(), 4);
        assert_eq!(assignment.ids(), vec![5; 4]);

        let placed = assignment
            .get(Coord::new(1, 1, 0))
            .expect("inside grid")
            .expect("filled cell");
        assert_eq!(placed.coord, Coord::new(1, 1, 0));
        assert_eq!(placed.category, TileCategory::Plant);

        let array = assignment.to_id_array();
        assert_eq!(array.shape(), &[2, 2, 1]);
        assert!(array.iter().all(|&id| id == 5));
    }
}
