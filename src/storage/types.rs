//! Recipe box document model.
//!
//! The whole application state is one [`AppDatabase`] serialized as JSON.
//! Field names are camelCase on the wire.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::achievements::ProgressState;

pub const DATABASE_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl RecipeDifficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            RecipeDifficulty::Easy => "easy",
            RecipeDifficulty::Medium => "medium",
            RecipeDifficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for RecipeDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for RecipeDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(RecipeDifficulty::Easy),
            "medium" => Ok(RecipeDifficulty::Medium),
            "hard" => Ok(RecipeDifficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (easy, medium, hard)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl Ingredient {
    pub fn new(name: &str, quantity: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: quantity.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeStep {
    pub id: Uuid,
    pub order: u32,
    pub text: String,
}

impl RecipeStep {
    pub fn new(order: u32, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            order,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Category {
    pub fn new(name: &str, emoji: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            emoji: emoji.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    /// Opaque name of a locally stored photo; the file itself is managed elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_filename: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub difficulty: RecipeDifficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<u32>,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(title: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            category_id: None,
            image_filename: None,
            ingredients: Vec::new(),
            steps: Vec::new(),
            notes: None,
            difficulty: RecipeDifficulty::default(),
            total_minutes: None,
            favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.total_minutes = Some(minutes);
        self
    }

    pub fn with_difficulty(mut self, difficulty: RecipeDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_image(mut self, filename: &str) -> Self {
        self.image_filename = Some(filename.to_string());
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn with_ingredient(mut self, name: &str, quantity: Option<&str>) -> Self {
        self.ingredients.push(Ingredient::new(name, quantity));
        self
    }

    /// Appends a step numbered after the existing ones.
    pub fn with_step(mut self, text: &str) -> Self {
        let order = self.steps.iter().map(|s| s.order).max().map_or(1, |o| o + 1);
        self.steps.push(RecipeStep::new(order, text));
        self
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl ShoppingItem {
    pub fn new(name: &str, quantity: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity: quantity.map(str::to_string),
            price: None,
            checked: false,
            recipe_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn from_ingredient(ingredient: &Ingredient, recipe_id: Uuid) -> Self {
        let mut item = Self::new(&ingredient.name, ingredient.quantity.as_deref());
        item.recipe_id = Some(recipe_id);
        item
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub nickname: String,
    #[serde(default)]
    pub avatar_index: u32,
    pub join_date: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            nickname: "Chef".to_string(),
            avatar_index: 0,
            join_date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppTheme {
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppLanguage {
    #[default]
    En,
    Ru,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecipeSort {
    #[default]
    ByDateDesc,
    ByTitleAsc,
    ByCategory,
}

impl FromStr for RecipeSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" | "bydatedesc" => Ok(RecipeSort::ByDateDesc),
            "title" | "bytitleasc" => Ok(RecipeSort::ByTitleAsc),
            "category" | "bycategory" => Ok(RecipeSort::ByCategory),
            other => Err(format!("unknown sort '{}' (date, title, category)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub theme: AppTheme,
    #[serde(default)]
    pub language: AppLanguage,
    #[serde(default)]
    pub default_sort: RecipeSort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDatabase {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub shopping: Vec<ShoppingItem>,
    #[serde(default)]
    pub settings: AppSettings,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub achievements: ProgressState,
}

fn default_schema_version() -> u8 {
    DATABASE_SCHEMA_VERSION
}

impl AppDatabase {
    /// First-launch document: the five starter categories and no recipes.
    pub fn empty() -> Self {
        Self {
            schema_version: DATABASE_SCHEMA_VERSION,
            recipes: Vec::new(),
            categories: default_categories(),
            shopping: Vec::new(),
            settings: AppSettings::default(),
            profile: UserProfile::default(),
            achievements: ProgressState::default(),
        }
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Breakfast", Some("🥞")),
        Category::new("Lunch", Some("🍲")),
        Category::new("Dinner", Some("🍝")),
        Category::new("Desserts", Some("🍰")),
        Category::new("Family", Some("👨‍👩‍👧")),
    ]
}
