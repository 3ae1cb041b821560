#[cfg(test)]
mod tests {
    use mealplan_import::errors::AppError;
    use mealplan_import::segmenter::RecipeTextSegmenter;

    fn create_segmenter() -> RecipeTextSegmenter {
        RecipeTextSegmenter::new()
    }

    #[test]
    fn test_empty_input_fails() {
        let segmenter = create_segmenter();

        let err = segmenter.parse_recipe_text("").unwrap_err();
        assert_eq!(err, AppError::Parsing("No text provided".to_string()));

        let err = segmenter.parse_recipe_text("   \n\n  \t  ").unwrap_err();
        assert_eq!(err, AppError::Parsing("No text provided".to_string()));
    }

    #[test]
    fn test_full_recipe() {
        let segmenter = create_segmenter();
        let text = "Chicken Tacos\n\
                    Prep time: 15 minutes\n\
                    Cook time: 30 minutes\n\
                    Serves 4\n\
                    \n\
                    Ingredients:\n\
                    2 cups shredded chicken\n\
                    1/2 cup salsa\n\
                    8 small tortillas\n\
                    \n\
                    Instructions:\n\
                    Warm the tortillas.\n\
                    Fill with chicken and salsa.";

        let recipe = segmenter.parse_recipe_text(text).unwrap();

        assert_eq!(recipe.name, "Chicken Tacos");
        assert_eq!(recipe.prep_time_minutes, Some(15));
        assert_eq!(recipe.cook_time_minutes, Some(30));
        assert_eq!(recipe.servings, Some(4));

        // Ingredient lines come back in source order
        assert_eq!(recipe.ingredient_lines.len(), 3);
        assert_eq!(recipe.ingredient_lines[0].raw_text, "2 cups shredded chicken");
        assert_eq!(recipe.ingredient_lines[1].raw_text, "1/2 cup salsa");
        assert_eq!(recipe.ingredient_lines[2].raw_text, "8 small tortillas");

        assert_eq!(
            recipe.instructions,
            "Warm the tortillas.\nFill with chicken and salsa."
        );
        assert_eq!(recipe.description, "");
    }

    #[test]
    fn test_header_variants() {
        let segmenter = create_segmenter();
        let text = "Roast Veg\n\
                    INGREDIENTS\n\
                    2 cups carrots\n\
                    Directions\n\
                    Roast at 200C.";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.ingredient_lines.len(), 1);
        assert_eq!(recipe.ingredient_lines[0].name, "carrots");
        assert_eq!(recipe.instructions, "Roast at 200C.");
    }

    #[test]
    fn test_ingredients_without_instructions_header() {
        let segmenter = create_segmenter();
        let text = "Fruit Bowl\n\
                    Ingredients:\n\
                    1 banana\n\
                    2 apples";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.ingredient_lines.len(), 2);
        assert_eq!(recipe.instructions, "");
    }

    #[test]
    fn test_stray_header_skipped_in_ingredients_body() {
        let segmenter = create_segmenter();
        let text = "Cake\n\
                    Ingredients\n\
                    2 cups flour\n\
                    Notes\n\
                    Instructions\n\
                    Bake it well.";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        // "Notes" is a known section header, not an ingredient
        assert_eq!(recipe.ingredient_lines.len(), 1);
        assert_eq!(recipe.ingredient_lines[0].name, "flour");
    }

    #[test]
    fn test_short_noise_lines_skipped() {
        let segmenter = create_segmenter();
        let text = "Soup\n\
                    Ingredients:\n\
                    2 cups stock\n\
                    ok\n\
                    1 onion";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.ingredient_lines.len(), 2);
        assert_eq!(recipe.ingredient_lines[0].name, "stock");
        assert_eq!(recipe.ingredient_lines[1].name, "onion");
    }

    #[test]
    fn test_metadata_lines_excluded_from_instructions() {
        let segmenter = create_segmenter();
        let text = "Stew\n\
                    Ingredients:\n\
                    1 lb beef\n\
                    Instructions:\n\
                    Brown the beef.\n\
                    Prep time: 10 minutes\n\
                    Simmer for an hour.";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.instructions, "Brown the beef.\nSimmer for an hour.");
    }

    #[test]
    fn test_hours_converted_to_minutes() {
        let segmenter = create_segmenter();
        let text = "Beef Stew\n\
                    Cook time: 1 hour\n\
                    Serves: 6\n\
                    Ingredients:\n\
                    1 lb beef\n\
                    Instructions:\n\
                    Simmer until tender.";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.cook_time_minutes, Some(60));
        assert_eq!(recipe.prep_time_minutes, None);
        assert_eq!(recipe.servings, Some(6));
    }

    #[test]
    fn test_absurd_time_values_degrade_to_none() {
        let segmenter = create_segmenter();
        let text = "Slow Roast\n\
                    Prep time: 2000000000 hours\n\
                    Cook time: 30 minutes\n\
                    Ingredients:\n\
                    2 cups flour";

        // Values whose minutes conversion overflows are treated as absent;
        // the rest of the recipe still parses
        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.prep_time_minutes, None);
        assert_eq!(recipe.cook_time_minutes, Some(30));
        assert_eq!(recipe.ingredient_lines.len(), 1);
    }

    #[test]
    fn test_reversed_time_phrasing() {
        let segmenter = create_segmenter();
        let text = "Pasta\n\
                    30 minutes prep, 10 minutes cook\n\
                    Ingredients:\n\
                    1 lb pasta\n\
                    Instructions:\n\
                    Boil the pasta.";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.prep_time_minutes, Some(30));
        assert_eq!(recipe.cook_time_minutes, Some(10));
    }

    #[test]
    fn test_servings_suffix_phrasing() {
        let segmenter = create_segmenter();
        let text = "Curry\n\
                    4 servings\n\
                    Ingredients:\n\
                    1 can coconut milk\n\
                    Instructions:\n\
                    Simmer everything.";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.servings, Some(4));
    }

    #[test]
    fn test_fallback_scan_without_headers() {
        let segmenter = create_segmenter();
        let text = "Simple Salad\n\
                    2 cups lettuce\n\
                    1 tomato\n\
                    - handful of croutons\n\
                    Mix everything together.";

        let recipe = segmenter.parse_recipe_text(text).unwrap();

        assert_eq!(recipe.name, "Simple Salad");
        // Digit-start and bullet-start lines are taken as ingredients
        assert_eq!(recipe.ingredient_lines.len(), 3);
        assert_eq!(recipe.ingredient_lines[0].raw_text, "2 cups lettuce");
        assert_eq!(recipe.ingredient_lines[1].raw_text, "1 tomato");
        assert_eq!(recipe.ingredient_lines[2].raw_text, "- handful of croutons");
        assert_eq!(recipe.instructions, "");
    }

    #[test]
    fn test_title_is_first_nonempty_line() {
        let segmenter = create_segmenter();
        let text = "\n\n   Banana Bread   \nIngredients:\n3 bananas";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        assert_eq!(recipe.name, "Banana Bread");
    }

    #[test]
    fn test_metadata_below_ingredients_ignored_for_times() {
        let segmenter = create_segmenter();
        let text = "Toast\n\
                    Ingredients:\n\
                    2 slices bread\n\
                    Instructions:\n\
                    Toast the bread.\n\
                    Cook time: 5 minutes";

        let recipe = segmenter.parse_recipe_text(text).unwrap();
        // Times are only read from the header area above the ingredients
        assert_eq!(recipe.cook_time_minutes, None);
        assert_eq!(recipe.instructions, "Toast the bread.");
    }
}
