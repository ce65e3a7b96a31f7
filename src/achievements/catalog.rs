//! Static achievement catalog: identifiers, counter keys and display metadata.
//!
//! Nothing here holds state. The catalog is closed and fixed at compile time;
//! [`AchievementId::ALL`] is the canonical (display and serialization) order.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Recipes with a total time strictly below this many minutes earn `quick-chef`.
pub const QUICK_RECIPE_MINUTES: u32 = 30;

pub const FIRST_RECIPE_THRESHOLD: usize = 1;
pub const TEN_RECIPES_THRESHOLD: usize = 10;
pub const TWENTY_FIVE_RECIPES_THRESHOLD: usize = 25;
pub const FIFTY_RECIPES_THRESHOLD: usize = 50;
pub const FIVE_CATEGORIES_THRESHOLD: usize = 5;

pub const FIVE_FAVORITES_THRESHOLD: u32 = 5;
pub const TEN_NOTES_THRESHOLD: u32 = 10;
pub const SHOPPING_FIVE_THRESHOLD: u32 = 5;
pub const TEN_PHOTOS_THRESHOLD: u32 = 10;

/// Identifier of a single unlockable badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementId {
    FirstRecipe,
    TenRecipes,
    TwentyFiveRecipes,
    FiftyRecipes,
    FiveCategories,
    FiveFavorites,
    TenNotes,
    QuickChef,
    HardChef,
    ShoppingFive,
    TenPhotos,
    /// Meta-achievement: unlocked once every other achievement is.
    TrueChef,
}

impl AchievementId {
    pub const ALL: [AchievementId; 12] = [
        AchievementId::FirstRecipe,
        AchievementId::TenRecipes,
        AchievementId::TwentyFiveRecipes,
        AchievementId::FiftyRecipes,
        AchievementId::FiveCategories,
        AchievementId::FiveFavorites,
        AchievementId::TenNotes,
        AchievementId::QuickChef,
        AchievementId::HardChef,
        AchievementId::ShoppingFive,
        AchievementId::TenPhotos,
        AchievementId::TrueChef,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AchievementId::FirstRecipe => "first-recipe",
            AchievementId::TenRecipes => "ten-recipes",
            AchievementId::TwentyFiveRecipes => "twenty-five-recipes",
            AchievementId::FiftyRecipes => "fifty-recipes",
            AchievementId::FiveCategories => "five-categories",
            AchievementId::FiveFavorites => "five-favorites",
            AchievementId::TenNotes => "ten-notes",
            AchievementId::QuickChef => "quick-chef",
            AchievementId::HardChef => "hard-chef",
            AchievementId::ShoppingFive => "shopping-five",
            AchievementId::TenPhotos => "ten-photos",
            AchievementId::TrueChef => "true-chef",
        }
    }

    /// Whether this id is derived from the rest of the catalog rather than earned directly.
    pub fn is_meta(self) -> bool {
        self == AchievementId::TrueChef
    }

    pub fn info(self) -> AchievementInfo {
        let (title, description) = match self {
            AchievementId::FirstRecipe => ("First Card", "Add your first recipe to the app."),
            AchievementId::TenRecipes => ("Collector", "Add 10 recipes to the app."),
            AchievementId::TwentyFiveRecipes => ("Gastronomic Expert", "Add 25 recipes."),
            AchievementId::FiftyRecipes => ("Complete Collection", "Add 50 recipes to the app."),
            AchievementId::FiveCategories => {
                ("Category Master", "Create 5 different recipe categories.")
            }
            AchievementId::FiveFavorites => ("Favorite Dish", "Mark 5 recipes as favorites."),
            AchievementId::TenNotes => ("Advisor", "Add 10 mini-notes to different recipes."),
            AchievementId::QuickChef => (
                "Quick Chef",
                "Add a recipe with cooking time less than 30 minutes.",
            ),
            AchievementId::HardChef => ("Hard Chef", "Add a recipe with high difficulty level."),
            AchievementId::ShoppingFive => {
                ("Shopping List Ready", "Use shopping list for 5 recipes.")
            }
            AchievementId::TenPhotos => ("Photo Master", "Add photos to 10 recipes."),
            AchievementId::TrueChef => (
                "True Chef",
                "Use all app features: categories, notes, shopping list, ratings and photos.",
            ),
        };
        AchievementInfo {
            id: self,
            title,
            description,
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no achievement or counter in this catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown catalog key: {0}")]
pub struct UnknownKey(pub String);

impl FromStr for AchievementId {
    type Err = UnknownKey;

    /// Accepts the kebab-case wire names and the camelCase names older documents used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = match s {
            "first-recipe" | "firstCard" => AchievementId::FirstRecipe,
            "ten-recipes" | "tenRecipes" => AchievementId::TenRecipes,
            "twenty-five-recipes" | "twentyFiveRecipes" => AchievementId::TwentyFiveRecipes,
            "fifty-recipes" | "fiftyRecipes" => AchievementId::FiftyRecipes,
            "five-categories" | "fiveCategories" => AchievementId::FiveCategories,
            "five-favorites" | "fiveFavorites" => AchievementId::FiveFavorites,
            "ten-notes" | "tenNotes" => AchievementId::TenNotes,
            "quick-chef" | "under30Chef" => AchievementId::QuickChef,
            "hard-chef" | "hardChef" => AchievementId::HardChef,
            "shopping-five" | "shoppingFive" => AchievementId::ShoppingFive,
            "ten-photos" | "tenPhotos" => AchievementId::TenPhotos,
            "true-chef" | "trueChef" => AchievementId::TrueChef,
            other => return Err(UnknownKey(other.to_string())),
        };
        Ok(id)
    }
}

/// Every achievement that must be unlocked before the meta-achievement is.
pub fn required_for_meta() -> impl Iterator<Item = AchievementId> {
    AchievementId::ALL.into_iter().filter(|id| !id.is_meta())
}

/// Display metadata for the achievement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementInfo {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
}

/// Lifetime activity counters. Values only grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterKey {
    RecipesAdded,
    CategoriesCreated,
    FavoritesMarked,
    NotesAdded,
    ShoppingUsed,
    PhotosAdded,
}

impl CounterKey {
    pub const ALL: [CounterKey; 6] = [
        CounterKey::RecipesAdded,
        CounterKey::CategoriesCreated,
        CounterKey::FavoritesMarked,
        CounterKey::NotesAdded,
        CounterKey::ShoppingUsed,
        CounterKey::PhotosAdded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CounterKey::RecipesAdded => "recipes-added",
            CounterKey::CategoriesCreated => "categories-created",
            CounterKey::FavoritesMarked => "favorites-marked",
            CounterKey::NotesAdded => "notes-added",
            CounterKey::ShoppingUsed => "shopping-used",
            CounterKey::PhotosAdded => "photos-added",
        }
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CounterKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "recipes-added" | "recipesAdded" => CounterKey::RecipesAdded,
            "categories-created" | "categoriesCreated" => CounterKey::CategoriesCreated,
            "favorites-marked" | "favoritesMarked" => CounterKey::FavoritesMarked,
            "notes-added" | "notesAdded" => CounterKey::NotesAdded,
            "shopping-used" | "shoppingUsed" => CounterKey::ShoppingUsed,
            "photos-added" | "photosAdded" => CounterKey::PhotosAdded,
            other => return Err(UnknownKey(other.to_string())),
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_requirements_exclude_only_true_chef() {
        let required: Vec<_> = required_for_meta().collect();
        assert_eq!(required.len(), 11);
        assert!(!required.contains(&AchievementId::TrueChef));
    }

    #[test]
    fn wire_names_parse_back() {
        for id in AchievementId::ALL {
            assert_eq!(id.as_str().parse::<AchievementId>().unwrap(), id);
            assert_eq!(serde_json::to_value(id).unwrap(), id.as_str());
        }
        for key in CounterKey::ALL {
            assert_eq!(key.as_str().parse::<CounterKey>().unwrap(), key);
        }
    }

    #[test]
    fn legacy_camel_case_names_are_accepted() {
        assert_eq!(
            "under30Chef".parse::<AchievementId>().unwrap(),
            AchievementId::QuickChef
        );
        assert_eq!(
            "firstCard".parse::<AchievementId>().unwrap(),
            AchievementId::FirstRecipe
        );
        assert_eq!(
            "shoppingUsed".parse::<CounterKey>().unwrap(),
            CounterKey::ShoppingUsed
        );
        assert!("cooked-ten".parse::<AchievementId>().is_err());
    }

    #[test]
    fn catalog_order_ends_with_meta() {
        assert_eq!(AchievementId::ALL.last(), Some(&AchievementId::TrueChef));
        assert_eq!(AchievementId::TrueChef.info().title, "True Chef");
    }
}
