/// Integration tests for the recipe box document: persistence, sanitized loading and CRUD.
use recipebox::achievements::{self, AchievementId, CounterKey};
use recipebox::storage::types::{AppSettings, Category, Recipe, RecipeDifficulty, RecipeSort};
use recipebox::storage::{RecipeBox, RecipeBoxError};
use tempfile::tempdir;
use uuid::Uuid;

#[test]
fn progress_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("recipe_box.json");

    {
        let mut book = RecipeBox::open(&path).unwrap();
        let id = book
            .add_recipe(Recipe::new("Pho").with_minutes(25).with_image("pho.jpg"))
            .unwrap();
        book.toggle_favorite(id).unwrap();
        achievements::after_shopping_used(&mut book, 3);
    }

    let book = RecipeBox::open(&path).unwrap();
    let progress = book.progress();
    assert!(progress.is_unlocked(AchievementId::FirstRecipe));
    assert!(progress.is_unlocked(AchievementId::QuickChef));
    assert_eq!(progress.counter(CounterKey::RecipesAdded), 1);
    assert_eq!(progress.counter(CounterKey::PhotosAdded), 1);
    assert_eq!(progress.counter(CounterKey::FavoritesMarked), 1);
    assert_eq!(progress.counter(CounterKey::ShoppingUsed), 3);
    assert!(book.recipes()[0].favorite);
}

#[test]
fn failed_save_keeps_in_memory_progress() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let path = data_dir.join("recipe_box.json");
    let mut book = RecipeBox::open(&path).unwrap();

    std::fs::remove_dir_all(&data_dir).unwrap();
    achievements::after_notes_added(&mut book, 10);
    assert_eq!(book.progress().counter(CounterKey::NotesAdded), 10);
    assert!(book.progress().is_unlocked(AchievementId::TenNotes));
    assert!(!path.exists());

    // The next successful save catches the document up
    std::fs::create_dir_all(&data_dir).unwrap();
    book.save().unwrap();
    let reopened = RecipeBox::open(&path).unwrap();
    assert!(reopened.progress().is_unlocked(AchievementId::TenNotes));
}

#[test]
fn failed_add_leaves_box_unchanged() {
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let path = data_dir.join("recipe_box.json");
    let mut book = RecipeBox::open(&path).unwrap();
    let starter_categories = book.categories().len();

    std::fs::remove_dir_all(&data_dir).unwrap();
    let hard = Recipe::new("Croissants")
        .with_minutes(10)
        .with_difficulty(RecipeDifficulty::Hard);
    assert!(book.add_recipe(hard.clone()).is_err());
    assert!(book.add_category(Category::new("Brunch", None)).is_err());
    assert!(book.recipes().is_empty());
    assert_eq!(book.categories().len(), starter_categories);
    assert_eq!(book.progress().counter(CounterKey::RecipesAdded), 0);
    assert_eq!(book.progress().unlocked_count(), 0);

    // Retrying the same recipe once storage is back tracks it exactly once
    std::fs::create_dir_all(&data_dir).unwrap();
    book.add_recipe(hard).unwrap();
    assert_eq!(book.recipes().len(), 1);
    let progress = book.progress();
    assert_eq!(progress.counter(CounterKey::RecipesAdded), 1);
    assert!(progress.is_unlocked(AchievementId::HardChef));
    assert!(progress.is_unlocked(AchievementId::QuickChef));
    assert!(progress.is_unlocked(AchievementId::FirstRecipe));
}

#[test]
fn malformed_progress_shapes_open_as_empty() {
    let dir = tempdir().unwrap();
    let shapes = [
        serde_json::Value::Null,
        serde_json::json!({ "unlocked": "first-recipe" }),
        serde_json::json!({ "counters": [1, 2] }),
        serde_json::json!("all of them"),
    ];

    for (n, achievements) in shapes.into_iter().enumerate() {
        let path = dir.path().join(format!("box-{}.json", n));
        let doc = serde_json::json!({
            "recipes": [],
            "categories": [],
            "achievements": achievements
        });
        std::fs::write(&path, doc.to_string()).unwrap();

        let book = RecipeBox::open(&path).unwrap();
        assert_eq!(book.progress().unlocked_count(), 0);
        assert!(book.progress().counters().is_empty());
    }
}

#[test]
fn legacy_document_is_sanitized_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("recipe_box.json");
    let legacy = serde_json::json!({
        "recipes": [],
        "categories": [],
        "shopping": [],
        "achievements": {
            "unlocked": ["firstCard", "under30Chef", "cookedTenMeals"],
            "counters": {
                "recipesAdded": 3,
                "notesAdded": -2,
                "mealsCooked": 7
            }
        }
    });
    std::fs::write(&path, legacy.to_string()).unwrap();

    let book = RecipeBox::open(&path).unwrap();
    let progress = book.progress();
    assert_eq!(progress.unlocked_count(), 2);
    assert!(progress.is_unlocked(AchievementId::FirstRecipe));
    assert!(progress.is_unlocked(AchievementId::QuickChef));
    assert_eq!(progress.counter(CounterKey::RecipesAdded), 3);
    assert_eq!(progress.counter(CounterKey::NotesAdded), 0);
    assert_eq!(progress.counters().len(), 2);
    assert_eq!(book.database().profile.nickname, "Chef");

    // Re-saving writes the current wire names
    book.save().unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"quick-chef\""));
    assert!(raw.contains("\"recipes-added\""));
    assert!(!raw.contains("under30Chef"));
}

#[test]
fn missing_ids_are_reported() {
    let dir = tempdir().unwrap();
    let mut book = RecipeBox::open(dir.path().join("recipe_box.json")).unwrap();
    let ghost = Uuid::new_v4();

    assert!(matches!(
        book.toggle_favorite(ghost),
        Err(RecipeBoxError::NotFound { entity: "recipe", .. })
    ));
    assert!(matches!(
        book.add_recipe_to_shopping(ghost),
        Err(RecipeBoxError::NotFound { .. })
    ));
    assert!(matches!(
        book.delete_category(ghost),
        Err(RecipeBoxError::NotFound { entity: "category", .. })
    ));
    assert_eq!(book.progress().counters().len(), 0);
}

#[test]
fn update_recipe_keeps_creation_time_and_counters() {
    let dir = tempdir().unwrap();
    let mut book = RecipeBox::open(dir.path().join("recipe_box.json")).unwrap();
    let id = book.add_recipe(Recipe::new("Chili").with_minutes(90)).unwrap();
    let created_at = book.recipe(id).unwrap().created_at;

    let mut edited = book.recipe(id).unwrap().clone();
    edited.title = "  Five Alarm Chili ".to_string();
    edited.image_filename = Some("chili.jpg".to_string());
    edited.total_minutes = Some(20);
    book.update_recipe(edited).unwrap();

    let stored = book.recipe(id).unwrap();
    assert_eq!(stored.title, "Five Alarm Chili");
    assert_eq!(stored.created_at, created_at);
    assert!(stored.updated_at >= created_at);
    // Photos and quick times only count when a recipe is first added
    assert_eq!(book.progress().counter(CounterKey::PhotosAdded), 0);
    assert!(!book.progress().is_unlocked(AchievementId::QuickChef));
}

#[test]
fn shopping_list_crud() {
    let dir = tempdir().unwrap();
    let mut book = RecipeBox::open(dir.path().join("recipe_box.json")).unwrap();
    let id = book
        .add_recipe(
            Recipe::new("Pancakes")
                .with_ingredient("flour", Some("200 g"))
                .with_ingredient("milk", Some("300 ml"))
                .with_ingredient("eggs", Some("2")),
        )
        .unwrap();

    assert_eq!(book.add_recipe_to_shopping(id).unwrap(), 3);
    assert!(book.shopping().iter().all(|i| i.recipe_id == Some(id) && !i.checked));
    assert_eq!(book.shopping()[0].quantity.as_deref(), Some("200 g"));

    let milk = book.shopping()[1].id;
    assert!(book.toggle_shopping_item(milk).unwrap());
    assert!(!book.toggle_shopping_item(milk).unwrap());

    assert_eq!(book.clear_shopping().unwrap(), 3);
    assert!(book.shopping().is_empty());
    // Clearing the list never takes back shopping credit
    assert_eq!(book.progress().counter(CounterKey::ShoppingUsed), 3);
}

#[test]
fn sorting_by_title_and_category() {
    let dir = tempdir().unwrap();
    let mut book = RecipeBox::open(dir.path().join("recipe_box.json")).unwrap();
    let dinner = book
        .categories()
        .iter()
        .find(|c| c.name == "Dinner")
        .unwrap()
        .id;
    let breakfast = book
        .categories()
        .iter()
        .find(|c| c.name == "Breakfast")
        .unwrap()
        .id;

    book.add_recipe(Recipe::new("waffles").in_category(breakfast)).unwrap();
    book.add_recipe(Recipe::new("Lasagna").in_category(dinner)).unwrap();
    book.add_recipe(Recipe::new("Apple pie")).unwrap();
    book.add_recipe(Recipe::new("Congee").in_category(breakfast)).unwrap();

    let titles = |sort| -> Vec<String> {
        book.sorted_recipes(sort)
            .into_iter()
            .map(|r| r.title.clone())
            .collect()
    };
    assert_eq!(titles(RecipeSort::ByTitleAsc), ["Apple pie", "Congee", "Lasagna", "waffles"]);
    assert_eq!(titles(RecipeSort::ByCategory), ["Congee", "waffles", "Lasagna", "Apple pie"]);
    assert_eq!(titles(RecipeSort::ByDateDesc).len(), 4);
}

#[test]
fn deleted_category_leaves_recipes_uncategorized() {
    let dir = tempdir().unwrap();
    let mut book = RecipeBox::open(dir.path().join("recipe_box.json")).unwrap();
    let cat = book.add_category(Category::new("Preserves", None)).unwrap();
    let id = book.add_recipe(Recipe::new("Jam").in_category(cat)).unwrap();

    book.delete_category(cat).unwrap();
    assert_eq!(book.category_name(book.recipe(id).unwrap().category_id), None);
    assert_eq!(book.progress().counter(CounterKey::CategoriesCreated), 1);
}

#[test]
fn profile_and_settings_persist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("recipe_box.json");
    {
        let mut book = RecipeBox::open(&path).unwrap();
        book.set_profile("Mama Rosa", 3).unwrap();
        let settings = AppSettings {
            default_sort: RecipeSort::ByTitleAsc,
            ..AppSettings::default()
        };
        book.set_settings(settings).unwrap();
        assert!(matches!(
            book.set_profile("", 0),
            Err(RecipeBoxError::Invalid(_))
        ));
    }
    let book = RecipeBox::open(&path).unwrap();
    assert_eq!(book.database().profile.nickname, "Mama Rosa");
    assert_eq!(book.database().profile.avatar_index, 3);
    assert_eq!(book.database().settings.default_sort, RecipeSort::ByTitleAsc);
}
