//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use tilecollapse::GenerationError;
    use tilecollapse::io::error::{
        ContradictionReport, NeighborSnapshot, NeighborState, file_system_error,
        invalid_configuration, invalid_placement,
    };
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::grid::{Coord, Dimensions};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system_error("/tmp/catalog.json", "read catalog")(io_error);

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("read catalog"));
        assert!(message.contains("/tmp/catalog.json"));

        let parse = serde_json::from_str::<u8>("nope").expect_err("invalid json");
        let error = GenerationError::CatalogParse {
            path: "bad.json".into(),
            source: parse,
        };
        assert!(error.source().is_some());
    }

    // Tests contradiction messages name the cell and each neighbour
    // Verified by omitting neighbour snapshots from the message
    #[test]
    fn test_contradiction_message() {
        let error = GenerationError::from(ContradictionReport {
            coordinate: Coord::new(0, 1, 0),
            last_candidates: vec![0, 1],
            neighbors: vec![
                NeighborSnapshot {
                    direction: Direction::Above,
                    state: NeighborState::Boundary,
                },
                NeighborSnapshot {
                    direction: Direction::Below,
                    state: NeighborState::Fixed(4),
                },
                NeighborSnapshot {
                    direction: Direction::Left,
                    state: NeighborState::Open(vec![2, 3]),
                },
            ],
            collapsed: 6,
        });

        let message = error.to_string();
        assert!(message.contains("(0, 1, 0)"));
        assert!(message.contains("after 6 collapses"));
        assert!(message.contains("above boundary"));
        assert!(message.contains("below fixed 4"));
        assert!(message.contains("left open [2, 3]"));
        assert!(error.source().is_none());
    }

    // Tests InvalidConfiguration error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_configuration_error() {
        let error = invalid_configuration("width", &0, &"grid axes must be positive");
        let message = error.to_string();
        assert!(message.contains("width"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be positive"));
        assert!(error.contradiction().is_none());
    }

    // Tests placement and bounds errors name the coordinate
    // Verified by printing the grid size instead of the coordinate
    #[test]
    fn test_placement_and_bounds_errors() {
        let placement = invalid_placement(Coord::new(1, 2, 3), 7, &"cell already filled");
        assert_eq!(
            placement.to_string(),
            "Cannot place tile 7 at (1, 2, 3): cell already filled"
        );

        let bounds = GenerationError::IndexOutOfBounds {
            coordinate: Coord::new(5, 0, 0),
            dimensions: Dimensions::new(2, 2, 2).expect("valid dimensions"),
        };
        assert_eq!(
            bounds.to_string(),
            "Coordinate (5, 0, 0) is outside the 2x2x2 grid"
        );
    }

    // Tests plain I/O errors convert with a placeholder path
    // Verified by dropping the From implementation's source
    #[test]
    fn test_from_io_error() {
        let error: GenerationError = std::io::Error::other("disk full").into();
        assert!(matches!(error, GenerationError::FileSystem { .. }));
        assert!(error.to_string().contains("disk full"));
    }
}
