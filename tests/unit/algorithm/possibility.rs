//! Tests for per-cell candidate sets and admissibility queries

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::algorithm::cache::SupportCache;
    use tilecollapse::algorithm::constraints::StructuralRules;
    use tilecollapse::algorithm::possibility::{PossibilityGrid, entropy_of, ids_of};
    use tilecollapse::algorithm::rules::RuleSet;
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::grid::{Coord, Dimensions};
    use tilecollapse::spatial::tiles::{BOUNDARY, TileCatalog, TileCategory, TileDefinition};

    // Ground (id 10) must sit on the boundary; sky (id 20) only above ground or sky
    fn layered_rules() -> RuleSet {
        let catalog = TileCatalog::new(vec![
            TileDefinition::new(10, 1.0, TileCategory::Floor)
                .accepting(Direction::Below, [BOUNDARY]),
            TileDefinition::new(20, 3.0, TileCategory::Empty)
                .accepting(Direction::Below, [10, 20]),
        ])
        .expect("valid catalog");
        RuleSet::new(catalog, StructuralRules::none())
    }

    fn column() -> Dimensions {
        Dimensions::new(1, 3, 1).expect("valid dimensions")
    }

    // Tests a fresh grid holds the full catalog with matching entropy everywhere
    // Verified by starting cells with an empty set
    #[test]
    fn test_full_grid() {
        let rules = layered_rules();
        let space = PossibilityGrid::full(&rules, column());

        assert_eq!(space.total_candidates(), 6);
        let entropy = space.entropy(Coord::new(0, 1, 0)).expect("cell present");
        let expected = entropy_of(&TileBitset::all(2), rules.catalog());
        assert!((entropy - expected).abs() < 1e-12);
        assert!(space.cell(Coord::new(0, 3, 0)).is_none());
    }

    // Tests set refreshes the cached entropy
    // Verified by leaving the entropy untouched in set
    #[test]
    fn test_set_updates_entropy() {
        let rules = layered_rules();
        let mut space = PossibilityGrid::full(&rules, column());
        let coord = Coord::new(0, 0, 0);

        space.set(coord, TileBitset::singleton(2, 1), rules.catalog());
        assert!(space.entropy(coord).expect("cell present").abs() < 1e-12);
        assert_eq!(
            ids_of(space.candidates(coord).expect("cell present"), rules.catalog()),
            vec![20]
        );
    }

    // Tests the local pass applies grid edges but ignores neighbours
    // Verified by consulting neighbour candidates in locally_admissible
    #[test]
    fn test_locally_admissible() {
        let rules = layered_rules();
        let mut space = PossibilityGrid::full(&rules, column());

        assert_eq!(
            space
                .locally_admissible(&rules, Coord::new(0, 0, 0))
                .to_vec(),
            vec![0]
        );

        space.set(Coord::new(0, 0, 0), TileBitset::new(2), rules.catalog());
        assert_eq!(
            space
                .locally_admissible(&rules, Coord::new(0, 1, 0))
                .to_vec(),
            vec![0, 1]
        );
    }

    // Tests admissibility follows neighbour candidates, not only fixed neighbours
    // Verified by skipping open neighbours in admissible
    #[test]
    fn test_admissible_uses_neighbor_sets() {
        let rules = layered_rules();
        let mut space = PossibilityGrid::full(&rules, column());
        let mut cache = SupportCache::new();

        // Ground cannot float, so y=1 can only be sky
        assert_eq!(
            space
                .admissible(&rules, &mut cache, Coord::new(0, 1, 0))
                .to_vec(),
            vec![1]
        );

        // A neighbour below with no candidates supports nothing
        space.set(Coord::new(0, 0, 0), TileBitset::new(2), rules.catalog());
        assert!(
            space
                .admissible(&rules, &mut cache, Coord::new(0, 1, 0))
                .is_empty()
        );
    }

    // Tests the result does not depend on the cell's own candidates
    // Verified by starting admissible from the cell's current set
    #[test]
    fn test_admissible_ignores_own_set() {
        let rules = layered_rules();
        let mut space = PossibilityGrid::full(&rules, column());
        let mut cache = SupportCache::new();
        let coord = Coord::new(0, 2, 0);

        let before = space.admissible(&rules, &mut cache, coord);
        space.set(coord, TileBitset::new(2), rules.catalog());
        assert_eq!(space.admissible(&rules, &mut cache, coord), before);
    }
}
