#[cfg(test)]
mod tests {
    use mealplan_import::catalog::{CanonicalIngredient, InMemoryCatalog};
    use mealplan_import::line_parser::ParsedIngredientLine;
    use mealplan_import::matcher::{IngredientMatcher, MatcherConfig};
    use mealplan_import::vocabulary::VocabularyConfig;

    fn catalog_of(names: &[&str]) -> InMemoryCatalog {
        let entries = names
            .iter()
            .enumerate()
            .map(|(i, name)| CanonicalIngredient {
                id: (i + 1) as i64,
                name: name.to_string(),
                default_unit: None,
            })
            .collect();
        InMemoryCatalog::new(entries)
    }

    fn line_named(name: &str) -> ParsedIngredientLine {
        ParsedIngredientLine {
            raw_text: name.to_string(),
            quantity: None,
            unit: None,
            name: name.to_string(),
            preparation: None,
        }
    }

    #[test]
    fn test_exact_match_is_full_confidence() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Garlic", "Onion"]);

        let matches = matcher.match_ingredients(&[line_named("garlic")], &catalog);
        let result = &matches[0];

        assert_eq!(result.match_confidence, 1.0);
        assert_eq!(result.matched_ingredient.as_ref().unwrap().name, "Garlic");
        assert!(!result.needs_creation);
        assert_eq!(result.suggested_ingredients.len(), 1);
    }

    #[test]
    fn test_every_catalog_name_matches_itself_exactly() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Sea Salt", "Olive Oil", "Chicken Breast", "Basil"]);

        for entry in catalog.entries() {
            let matches = matcher.match_ingredients(&[line_named(&entry.name)], &catalog);
            let result = &matches[0];
            assert_eq!(result.match_confidence, 1.0, "{}", entry.name);
            assert_eq!(
                result.matched_ingredient.as_ref().map(|m| m.id),
                Some(entry.id)
            );
        }
    }

    #[test]
    fn test_exact_match_ignores_case() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Olive Oil"]);

        let matches = matcher.match_ingredients(&[line_named("OLIVE OIL")], &catalog);
        assert_eq!(matches[0].match_confidence, 1.0);
        assert!(!matches[0].needs_creation);
    }

    #[test]
    fn test_modifier_prefixes_stripped_before_matching() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Garlic", "Tomatoes"]);

        let matches = matcher.match_ingredients(&[line_named("fresh garlic")], &catalog);
        assert_eq!(matches[0].match_confidence, 1.0);
        assert_eq!(matches[0].matched_ingredient.as_ref().unwrap().name, "Garlic");
        // The parsed name is reported unmodified
        assert_eq!(matches[0].parsed_name, "fresh garlic");

        // Several stacked modifiers strip in order
        let matches = matcher.match_ingredients(&[line_named("fresh large tomatoes")], &catalog);
        assert_eq!(matches[0].match_confidence, 1.0);
        assert_eq!(
            matches[0].matched_ingredient.as_ref().unwrap().name,
            "Tomatoes"
        );
    }

    #[test]
    fn test_empty_catalog_needs_creation() {
        let matcher = IngredientMatcher::new();
        let catalog = InMemoryCatalog::empty();

        let matches = matcher.match_ingredients(&[line_named("flour")], &catalog);
        let result = &matches[0];

        assert!(result.needs_creation);
        assert!(result.matched_ingredient.is_none());
        assert_eq!(result.match_confidence, 0.0);
        assert!(result.suggested_ingredients.is_empty());
    }

    #[test]
    fn test_near_match_above_threshold() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Chicken Breast"]);

        let matches = matcher.match_ingredients(&[line_named("chicken breasts")], &catalog);
        let result = &matches[0];

        assert!(result.matched_ingredient.is_some());
        assert!(result.match_confidence > 0.9 && result.match_confidence < 1.0);
        assert!(!result.needs_creation);
    }

    #[test]
    fn test_word_overlap_scoring_and_tie_order() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Chicken Breast", "Chicken Thigh", "Beef"]);

        let matches = matcher.match_ingredients(&[line_named("chicken")], &catalog);
        let result = &matches[0];

        // Both chicken entries score 0.9 via full word overlap; the stable
        // sort keeps catalog order, so the first entry wins
        assert_eq!(
            result.matched_ingredient.as_ref().unwrap().name,
            "Chicken Breast"
        );
        assert!((result.match_confidence - 0.9).abs() < 1e-9);
        assert_eq!(result.suggested_ingredients.len(), 2);
        assert_eq!(result.suggested_ingredients[1].name, "Chicken Thigh");
    }

    #[test]
    fn test_below_threshold_still_suggests() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Butternut Squash"]);

        let matches = matcher.match_ingredients(&[line_named("butter")], &catalog);
        let result = &matches[0];

        // Similar enough to suggest, not similar enough to match
        assert!(result.needs_creation);
        assert!(result.matched_ingredient.is_none());
        assert!(result.match_confidence > 0.3 && result.match_confidence < 0.7);
        assert_eq!(result.suggested_ingredients.len(), 1);
        assert_eq!(result.suggested_ingredients[0].name, "Butternut Squash");
    }

    #[test]
    fn test_word_equality_candidates() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Basil", "Oregano"]);

        let matches = matcher.match_ingredients(&[line_named("basil leaves chopped")], &catalog);
        let result = &matches[0];

        assert!(result.needs_creation);
        assert_eq!(result.suggested_ingredients.len(), 1);
        assert_eq!(result.suggested_ingredients[0].name, "Basil");
    }

    #[test]
    fn test_no_overlap_yields_zero_confidence() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Beef"]);

        let matches = matcher.match_ingredients(&[line_named("xyz")], &catalog);
        let result = &matches[0];

        assert!(result.needs_creation);
        assert_eq!(result.match_confidence, 0.0);
        assert!(result.suggested_ingredients.is_empty());
    }

    #[test]
    fn test_suggestions_capped_at_five() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&[
            "Sea Salt",
            "Garlic Salt",
            "Onion Salt",
            "Celery Salt",
            "Kosher Salt",
            "Table Salt",
        ]);

        let matches = matcher.match_ingredients(&[line_named("salt")], &catalog);
        let result = &matches[0];

        assert_eq!(result.suggested_ingredients.len(), 5);
        assert_eq!(result.matched_ingredient.as_ref().unwrap().name, "Sea Salt");
    }

    #[test]
    fn test_one_result_per_line_in_order() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Flour", "Sugar"]);

        let lines = vec![
            line_named("flour"),
            line_named("dragonfruit"),
            line_named("sugar"),
        ];
        let matches = matcher.match_ingredients(&lines, &catalog);

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].parsed_name, "flour");
        assert_eq!(matches[1].parsed_name, "dragonfruit");
        assert_eq!(matches[2].parsed_name, "sugar");
        for m in &matches {
            assert_eq!(m.needs_creation, m.matched_ingredient.is_none());
        }
    }

    #[test]
    fn test_parsed_fields_carried_through() {
        let matcher = IngredientMatcher::new();
        let catalog = catalog_of(&["Garlic"]);

        let line = ParsedIngredientLine {
            raw_text: "2 cloves garlic (minced)".to_string(),
            quantity: Some("2".to_string()),
            unit: Some("cloves".to_string()),
            name: "garlic".to_string(),
            preparation: Some("minced".to_string()),
        };
        let matches = matcher.match_ingredients(&[line], &catalog);
        let result = &matches[0];

        assert_eq!(result.raw_text, "2 cloves garlic (minced)");
        assert_eq!(result.parsed_quantity, Some("2".to_string()));
        assert_eq!(result.parsed_unit, Some("cloves".to_string()));
        assert_eq!(result.parsed_preparation, Some("minced".to_string()));
    }

    #[test]
    fn test_config_validation() {
        assert!(MatcherConfig::default().validate().is_ok());

        let config = MatcherConfig {
            confidence_threshold: 1.5,
            ..MatcherConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MatcherConfig {
            suggestion_floor: 0.8,
            ..MatcherConfig::default()
        };
        assert!(config.validate().is_err());

        let config = MatcherConfig {
            max_suggestions: 0,
            ..MatcherConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = MatcherConfig {
            word_overlap_weight: 2.0,
            ..MatcherConfig::default()
        };
        assert!(IngredientMatcher::with_config(config, &VocabularyConfig::default()).is_err());
    }

    #[test]
    fn test_custom_threshold_changes_match_outcome() {
        let config = MatcherConfig {
            confidence_threshold: 0.5,
            ..MatcherConfig::default()
        };
        let matcher = IngredientMatcher::with_config(config, &VocabularyConfig::default()).unwrap();
        let catalog = catalog_of(&["Butternut Squash"]);

        // Scores around 0.55 match once the threshold is lowered
        let matches = matcher.match_ingredients(&[line_named("butter")], &catalog);
        assert!(matches[0].matched_ingredient.is_some());
        assert!(!matches[0].needs_creation);
    }
}
