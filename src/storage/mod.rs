//! # Storage Module - Recipe Box Persistence Layer
//!
//! The whole recipe box (recipes, categories, shopping list, settings, profile
//! and achievement progress) lives in one JSON document. [`RecipeBox`] owns the
//! in-memory copy, writes it back after every mutation, and calls the
//! achievement hooks once each mutation has been applied.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use recipebox::storage::{RecipeBox, types::{Recipe, RecipeDifficulty}};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut book = RecipeBox::open("./data/recipe_box.json")?;
//!
//!     let id = book.add_recipe(
//!         Recipe::new("Shakshuka")
//!             .with_minutes(25)
//!             .with_difficulty(RecipeDifficulty::Easy)
//!             .with_ingredient("eggs", Some("4")),
//!     )?;
//!     book.toggle_favorite(id)?;
//!
//!     println!("{} achievements unlocked", book.progress().unlocked_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Durability
//!
//! Writes take an exclusive `fs2` lock on the document, write a temp file in
//! the same directory, fsync it and rename it over the original. A failed save
//! triggered by achievement tracking is logged and the in-memory state is kept;
//! the next successful save catches the file up.

pub mod errors;
pub mod types;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use log::{debug, info, warn};
use uuid::Uuid;

use crate::achievements::{self, DomainSnapshot, ProgressState, ProgressStore};
use crate::logutil::escape_log;
use crate::validation::{
    validate_category_name, validate_ingredient_name, validate_recipe_title, validate_text,
    validate_total_minutes, TextRules,
};

pub use errors::RecipeBoxError;
use types::{AppDatabase, AppSettings, Category, Recipe, RecipeSort, ShoppingItem, UserProfile};

/// The recipe box document and the path it is persisted to.
pub struct RecipeBox {
    path: PathBuf,
    db: AppDatabase,
}

impl RecipeBox {
    /// Load the document at `path`, creating a fresh one (and its directory) if absent.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RecipeBoxError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let loaded = match std::fs::read_to_string(&path) {
            Ok(data) => {
                // Guard against any accidental leading NULs
                let cleaned = data.trim_start_matches('\0').trim();
                if cleaned.is_empty() {
                    None
                } else {
                    let db: AppDatabase = serde_json::from_str(cleaned).map_err(|source| {
                        RecipeBoxError::Parse {
                            path: path.clone(),
                            source,
                        }
                    })?;
                    Some(db)
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let book = match loaded {
            Some(db) => {
                info!(
                    "Opened recipe box {} ({} recipes, {} achievements unlocked)",
                    path.display(),
                    db.recipes.len(),
                    db.achievements.unlocked_count()
                );
                RecipeBox { path, db }
            }
            None => {
                let book = RecipeBox {
                    path,
                    db: AppDatabase::empty(),
                };
                book.save()?;
                info!("Created new recipe box at {}", book.path.display());
                book
            }
        };
        Ok(book)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database(&self) -> &AppDatabase {
        &self.db
    }

    pub fn progress(&self) -> &ProgressState {
        &self.db.achievements
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.db.recipes
    }

    pub fn categories(&self) -> &[Category] {
        &self.db.categories
    }

    pub fn shopping(&self) -> &[ShoppingItem] {
        &self.db.shopping
    }

    pub fn recipe(&self, id: Uuid) -> Option<&Recipe> {
        self.db.recipes.iter().find(|r| r.id == id)
    }

    pub fn favorites(&self) -> Vec<&Recipe> {
        self.db.recipes.iter().filter(|r| r.favorite).collect()
    }

    /// Serialize the whole document and atomically replace the file on disk.
    pub fn save(&self) -> Result<(), RecipeBoxError> {
        let content = serde_json::to_string_pretty(&self.db)?;
        write_file_locked(&self.path, &content)?;
        debug!("Saved recipe box to {}", self.path.display());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Recipes
    // ------------------------------------------------------------------

    /// Store a new recipe, then record it for achievements. Non-empty notes count as one note.
    ///
    /// A failed save leaves the recipe box unchanged and nothing is tracked.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<Uuid, RecipeBoxError> {
        let recipe = validated_recipe(recipe)?;
        let id = recipe.id;
        let has_notes = recipe.has_notes();
        info!("Adding recipe '{}' ({})", escape_log(&recipe.title), id);

        self.db.recipes.push(recipe.clone());
        if let Err(e) = self.save() {
            self.db.recipes.pop();
            return Err(e);
        }

        achievements::after_recipe_added(self, &recipe);
        if has_notes {
            achievements::after_notes_added(self, 1);
        }
        Ok(id)
    }

    /// Replace a stored recipe by id. Edits never feed achievement counters.
    pub fn update_recipe(&mut self, recipe: Recipe) -> Result<(), RecipeBoxError> {
        let mut recipe = validated_recipe(recipe)?;
        let slot = self
            .db
            .recipes
            .iter_mut()
            .find(|r| r.id == recipe.id)
            .ok_or(RecipeBoxError::NotFound {
                entity: "recipe",
                id: recipe.id,
            })?;
        recipe.created_at = slot.created_at;
        recipe.updated_at = Utc::now();
        *slot = recipe;
        self.save()
    }

    /// Remove a recipe. Lifetime counters keep counting it.
    pub fn delete_recipe(&mut self, id: Uuid) -> Result<Recipe, RecipeBoxError> {
        let idx = self.recipe_index(id)?;
        let removed = self.db.recipes.remove(idx);
        self.save()?;
        info!("Deleted recipe '{}' ({})", escape_log(&removed.title), id);
        Ok(removed)
    }

    /// Flip the favorite flag and return its new value.
    pub fn toggle_favorite(&mut self, id: Uuid) -> Result<bool, RecipeBoxError> {
        let idx = self.recipe_index(id)?;
        let recipe = &mut self.db.recipes[idx];
        recipe.favorite = !recipe.favorite;
        let favorite = recipe.favorite;

        achievements::after_favorite_toggled(self, favorite);
        self.save()?;
        Ok(favorite)
    }

    /// Recipes ordered for display.
    pub fn sorted_recipes(&self, sort: RecipeSort) -> Vec<&Recipe> {
        let mut recipes: Vec<&Recipe> = self.db.recipes.iter().collect();
        match sort {
            RecipeSort::ByDateDesc => recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            RecipeSort::ByTitleAsc => recipes.sort_by(|a, b| compare_titles(*a, *b)),
            RecipeSort::ByCategory => {
                let names: HashMap<Uuid, String> = self
                    .db
                    .categories
                    .iter()
                    .map(|c| (c.id, c.name.to_lowercase()))
                    .collect();
                let category_of =
                    |r: &Recipe| r.category_id.and_then(|id| names.get(&id)).cloned();
                recipes.sort_by(|a, b| match (category_of(*a), category_of(*b)) {
                    (Some(x), Some(y)) => x.cmp(&y).then_with(|| compare_titles(*a, *b)),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => compare_titles(*a, *b),
                });
            }
        }
        recipes
    }

    fn recipe_index(&self, id: Uuid) -> Result<usize, RecipeBoxError> {
        self.db
            .recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(RecipeBoxError::NotFound {
                entity: "recipe",
                id,
            })
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub fn add_category(&mut self, mut category: Category) -> Result<Uuid, RecipeBoxError> {
        category.name = validate_category_name(&category.name)?;
        let id = category.id;
        info!("Adding category '{}' ({})", escape_log(&category.name), id);

        self.db.categories.push(category);
        if let Err(e) = self.save() {
            self.db.categories.pop();
            return Err(e);
        }

        achievements::after_category_added(self);
        Ok(id)
    }

    /// Remove a category. Recipes that pointed at it read as uncategorized.
    pub fn delete_category(&mut self, id: Uuid) -> Result<Category, RecipeBoxError> {
        let idx = self
            .db
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(RecipeBoxError::NotFound {
                entity: "category",
                id,
            })?;
        let removed = self.db.categories.remove(idx);
        self.save()?;
        Ok(removed)
    }

    pub fn category_name(&self, id: Option<Uuid>) -> Option<&str> {
        let id = id?;
        self.db
            .categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    // ------------------------------------------------------------------
    // Shopping list
    // ------------------------------------------------------------------

    /// Push every ingredient of a recipe onto the shopping list; returns how many were added.
    pub fn add_recipe_to_shopping(&mut self, recipe_id: Uuid) -> Result<usize, RecipeBoxError> {
        let idx = self.recipe_index(recipe_id)?;
        let items: Vec<ShoppingItem> = self.db.recipes[idx]
            .ingredients
            .iter()
            .map(|ingredient| ShoppingItem::from_ingredient(ingredient, recipe_id))
            .collect();
        let count = items.len();

        self.add_shopping_items(items)?;
        achievements::after_shopping_used(self, count);
        Ok(count)
    }

    pub fn add_shopping_items(&mut self, items: Vec<ShoppingItem>) -> Result<(), RecipeBoxError> {
        self.db.shopping.extend(items);
        self.save()
    }

    /// Flip the checked flag and return its new value.
    pub fn toggle_shopping_item(&mut self, id: Uuid) -> Result<bool, RecipeBoxError> {
        let item = self
            .db
            .shopping
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(RecipeBoxError::NotFound {
                entity: "shopping item",
                id,
            })?;
        item.checked = !item.checked;
        let checked = item.checked;
        self.save()?;
        Ok(checked)
    }

    pub fn clear_shopping(&mut self) -> Result<usize, RecipeBoxError> {
        let cleared = self.db.shopping.len();
        self.db.shopping.clear();
        self.save()?;
        Ok(cleared)
    }

    // ------------------------------------------------------------------
    // Profile and settings
    // ------------------------------------------------------------------

    pub fn set_profile(&mut self, nickname: &str, avatar_index: u32) -> Result<(), RecipeBoxError> {
        let nickname = validate_text(nickname, &TextRules::NICKNAME)?;
        self.db.profile = UserProfile {
            nickname,
            avatar_index,
            join_date: self.db.profile.join_date,
        };
        self.save()
    }

    pub fn set_settings(&mut self, settings: AppSettings) -> Result<(), RecipeBoxError> {
        self.db.settings = settings;
        self.save()
    }
}

impl ProgressStore for RecipeBox {
    fn progress(&self) -> &ProgressState {
        &self.db.achievements
    }

    fn progress_mut(&mut self) -> &mut ProgressState {
        &mut self.db.achievements
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(
                "Failed to persist achievement progress to {}: {} (kept in memory)",
                self.path.display(),
                e
            );
        }
    }
}

impl DomainSnapshot for RecipeBox {
    fn total_recipe_count(&self) -> usize {
        self.db.recipes.len()
    }

    fn total_category_count(&self) -> usize {
        self.db.categories.len()
    }
}

fn validated_recipe(mut recipe: Recipe) -> Result<Recipe, RecipeBoxError> {
    recipe.title = validate_recipe_title(&recipe.title)?;
    for ingredient in &mut recipe.ingredients {
        ingredient.name = validate_ingredient_name(&ingredient.name)?;
    }
    if let Some(minutes) = recipe.total_minutes {
        validate_total_minutes(minutes)?;
    }
    Ok(recipe)
}

fn compare_titles(a: &Recipe, b: &Recipe) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

/// Write content to a file under an exclusive lock via temp file + rename
fn write_file_locked(path: &Path, content: &str) -> Result<(), RecipeBoxError> {
    use std::fs::{self, File, OpenOptions};

    // Step 1: Open (or create) the destination file to acquire an exclusive lock
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)?;

    lock_file.lock_exclusive()?;

    // Step 2: Create a unique temp file in the same directory
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("recipe_box.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(tmp) => {
                let tmp = fill_or_discard(tmp, &candidate, content.as_bytes())?;
                let _ = tmp.sync_all();
                break candidate;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    };

    // Step 3: Atomically replace the destination with the temp file
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    // Step 4: Fsync the directory to persist the rename (best-effort)
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }

    drop(lock_file);
    Ok(())
}

/// Write and flush `out`; on failure close it and remove the file at `path`.
fn fill_or_discard<W: std::io::Write>(
    mut out: W,
    path: &Path,
    content: &[u8],
) -> Result<W, RecipeBoxError> {
    match out.write_all(content).and_then(|_| out.flush()) {
        Ok(()) => Ok(out),
        Err(e) => {
            drop(out);
            let _ = std::fs::remove_file(path);
            Err(e.into())
        }
    }
}
