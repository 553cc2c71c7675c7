//! Tests for worklist propagation of neighbour constraints

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::algorithm::cache::SupportCache;
    use tilecollapse::algorithm::constraints::StructuralRules;
    use tilecollapse::algorithm::possibility::{PossibilityGrid, ids_of};
    use tilecollapse::algorithm::propagation::{Worklist, propagate};
    use tilecollapse::algorithm::rules::RuleSet;
    use tilecollapse::spatial::assignment::AssignmentGrid;
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::grid::{Coord, Dimensions};
    use tilecollapse::spatial::tiles::{BOUNDARY, TileCatalog, TileCategory, TileDefinition};

    fn rules_for(tiles: Vec<TileDefinition>) -> RuleSet {
        RuleSet::new(
            TileCatalog::new(tiles).expect("valid catalog"),
            StructuralRules::none(),
        )
    }

    fn layered_rules() -> RuleSet {
        rules_for(vec![
            TileDefinition::new(10, 1.0, TileCategory::Floor)
                .accepting(Direction::Below, [BOUNDARY]),
            TileDefinition::new(20, 1.0, TileCategory::Empty)
                .accepting(Direction::Below, [10, 20]),
        ])
    }

    fn all_coords(dimensions: Dimensions) -> Vec<Coord> {
        (0..dimensions.cell_count())
            .filter_map(|index| dimensions.coord_of(index))
            .collect()
    }

    // Tests the worklist queues each cell once while it waits and is FIFO
    // Verified by skipping the queued flag check in push
    #[test]
    fn test_worklist_deduplicates() {
        let dimensions = Dimensions::new(2, 1, 1).expect("valid dimensions");
        let a = Coord::new(0, 0, 0);
        let b = Coord::new(1, 0, 0);
        let mut worklist = Worklist::new(dimensions.cell_count());

        assert!(worklist.push(a, 0));
        assert!(worklist.push(b, 1));
        assert!(!worklist.push(a, 0));
        assert_eq!(worklist.len(), 2);

        assert_eq!(worklist.pop(|coord| dimensions.index_of(coord)), Some(a));
        assert!(worklist.push(a, 0));
        assert_eq!(worklist.pop(|coord| dimensions.index_of(coord)), Some(b));
        assert_eq!(worklist.pop(|coord| dimensions.index_of(coord)), Some(a));
        assert!(worklist.is_empty());
    }

    // Tests a column settles into ground below sky from the full catalog
    // Verified by not re-queueing neighbours after a reduction
    #[test]
    fn test_column_settles() {
        let rules = layered_rules();
        let dimensions = Dimensions::new(1, 3, 1).expect("valid dimensions");
        let mut space = PossibilityGrid::full(&rules, dimensions);
        let assignment = AssignmentGrid::new(dimensions);
        let mut cache = SupportCache::new();

        let outcome = propagate(
            &mut space,
            &assignment,
            &rules,
            &mut cache,
            all_coords(dimensions),
        )
        .expect("column is satisfiable");

        let ids_at = |y| {
            ids_of(
                space.candidates(Coord::new(0, y, 0)).expect("cell present"),
                rules.catalog(),
            )
        };
        assert_eq!(ids_at(0), vec![10]);
        assert_eq!(ids_at(1), vec![20]);
        assert_eq!(ids_at(2), vec![20]);
        assert_eq!(outcome.reductions, 3);
        assert_eq!(outcome.removed, 3);
        assert!(outcome.visited >= 3);
    }

    // Tests propagation only ever removes candidates
    // Verified by assigning the admissible set without intersecting
    #[test]
    fn test_monotone_narrowing() {
        let rules = rules_for(vec![
            TileDefinition::new(0, 1.0, TileCategory::Empty).accepting(Direction::Right, [1]),
            TileDefinition::new(1, 1.0, TileCategory::Plant).accepting(Direction::Right, [0, 2]),
            TileDefinition::new(2, 1.0, TileCategory::Cliff).accepting(Direction::Front, [2]),
        ]);
        let dimensions = Dimensions::new(3, 1, 3).expect("valid dimensions");
        let mut space = PossibilityGrid::full(&rules, dimensions);
        let assignment = AssignmentGrid::new(dimensions);
        let mut cache = SupportCache::new();

        // Restrict one corner and let the change spread
        let corner = Coord::new(0, 0, 0);
        space.set(corner, TileBitset::singleton(3, 1), rules.catalog());
        let before: Vec<TileBitset> = space
            .iter()
            .map(|(_, cell)| cell.candidates.clone())
            .collect();

        let _ = propagate(
            &mut space,
            &assignment,
            &rules,
            &mut cache,
            dimensions.neighbors(corner).filter_map(|(_, neighbor)| neighbor),
        );

        for ((_, cell), previous) in space.iter().zip(&before) {
            assert!(cell.candidates.is_subset(previous));
        }
    }

    // Tests the first emptied cell is reported with its last candidates
    // Verified by continuing past an emptied cell
    #[test]
    fn test_emptied_cell_reported() {
        // The only tile needs the grid edge both above and below
        let rules = rules_for(vec![
            TileDefinition::new(0, 1.0, TileCategory::Empty)
                .accepting(Direction::Below, [BOUNDARY])
                .accepting(Direction::Above, [BOUNDARY]),
        ]);
        let dimensions = Dimensions::new(1, 2, 1).expect("valid dimensions");
        let mut space = PossibilityGrid::full(&rules, dimensions);
        let assignment = AssignmentGrid::new(dimensions);
        let mut cache = SupportCache::new();

        let emptied = propagate(
            &mut space,
            &assignment,
            &rules,
            &mut cache,
            all_coords(dimensions),
        )
        .expect_err("column cannot be filled");

        assert_eq!(emptied.coord, Coord::new(0, 0, 0));
        assert_eq!(emptied.last_candidates.to_vec(), vec![0]);
    }

    // Tests an empty seed list changes nothing
    // Verified by seeding every cell when no seeds are given
    #[test]
    fn test_no_seeds() {
        let rules = layered_rules();
        let dimensions = Dimensions::new(1, 2, 1).expect("valid dimensions");
        let mut space = PossibilityGrid::full(&rules, dimensions);
        let assignment = AssignmentGrid::new(dimensions);
        let mut cache = SupportCache::new();

        let outcome = propagate(&mut space, &assignment, &rules, &mut cache, Vec::new())
            .expect("nothing to do");
        assert_eq!(outcome.visited, 0);
        assert_eq!(space.total_candidates(), 4);
    }
}
