//! Tests for the shared rule bundle

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::constraints::StructuralRules;
    use tilecollapse::algorithm::rules::RuleSet;
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::grid::{Coord, Dimensions};
    use tilecollapse::spatial::tiles::{TileCatalog, TileCategory, TileDefinition};

    fn catalog() -> TileCatalog {
        TileCatalog::new(vec![
            TileDefinition::new(0, 1.0, TileCategory::Floor),
            TileDefinition::new(1, 2.0, TileCategory::Empty).accepting(Direction::Below, [0]),
        ])
        .expect("valid catalog")
    }

    // Tests the standard rule set keeps floors off upper layers
    // Verified by building standard() without structural rules
    #[test]
    fn test_structural_admissibility() {
        let rules = RuleSet::standard(catalog());
        let dimensions = Dimensions::new(1, 2, 1).expect("valid dimensions");

        assert_eq!(rules.tile_count(), 2);
        assert_eq!(
            rules
                .structurally_admissible(Coord::new(0, 0, 0), dimensions)
                .to_vec(),
            vec![0, 1]
        );
        assert_eq!(
            rules
                .structurally_admissible(Coord::new(0, 1, 0), dimensions)
                .to_vec(),
            vec![1]
        );
    }

    // Tests the compatibility table is built from the same catalog
    // Verified by building the table from an empty catalog
    #[test]
    fn test_compatibility_built() {
        let rules = RuleSet::new(catalog(), StructuralRules::none());
        assert_eq!(rules.compatibility().tile_count(), rules.catalog().len());
        assert!(rules.structural().is_empty());
        assert!(rules.compatibility().compatible(0, 1, Direction::Above));
        assert!(!rules.compatibility().compatible(1, 1, Direction::Above));
    }
}
