/// Achievement tracking: counter accumulation, unlocks and milestone evaluation.
///
/// Every function here runs synchronously against the host's in-memory
/// [`ProgressState`]. The host is asked to persist after each mutation; a failed
/// save never rolls the in-memory state back.
use log::{debug, info};

use crate::achievements::catalog::{
    required_for_meta, AchievementId, CounterKey, FIFTY_RECIPES_THRESHOLD,
    FIRST_RECIPE_THRESHOLD, FIVE_CATEGORIES_THRESHOLD, FIVE_FAVORITES_THRESHOLD,
    QUICK_RECIPE_MINUTES, SHOPPING_FIVE_THRESHOLD, TEN_NOTES_THRESHOLD, TEN_PHOTOS_THRESHOLD,
    TEN_RECIPES_THRESHOLD, TWENTY_FIVE_RECIPES_THRESHOLD,
};
use crate::achievements::progress::ProgressState;
use crate::storage::types::{Recipe, RecipeDifficulty};

/// Owner of the progress state and of its durable copy.
pub trait ProgressStore {
    fn progress(&self) -> &ProgressState;
    fn progress_mut(&mut self) -> &mut ProgressState;
    /// Write the current state to durable storage. Failures are the implementor's to report.
    fn persist(&mut self);
}

/// Live totals of the domain collections, read fresh at evaluation time.
pub trait DomainSnapshot {
    fn total_recipe_count(&self) -> usize;
    fn total_category_count(&self) -> usize;
}

/// Everything the event hooks need from the surrounding application.
pub trait AchievementHost: ProgressStore + DomainSnapshot {}

impl<T: ProgressStore + DomainSnapshot + ?Sized> AchievementHost for T {}

/// Add `amount` to a counter, persist, then re-run the counter milestones.
pub fn increment<H: ProgressStore + ?Sized>(host: &mut H, key: CounterKey, amount: u32) {
    let value = host.progress_mut().add_to_counter(key, amount);
    debug!("counter {} += {} (now {})", key, amount, value);
    host.persist();
    evaluate_counter_milestones(host);
}

/// Unlock `id` if it is not already unlocked. Returns true only for a new unlock.
pub fn unlock<H: ProgressStore + ?Sized>(host: &mut H, id: AchievementId) -> bool {
    if !host.progress_mut().insert_unlocked(id) {
        return false;
    }
    info!(target: "achievements", "unlocked {} ({})", id, id.info().title);
    host.persist();
    true
}

pub fn evaluate_recipe_milestones<H: ProgressStore + ?Sized>(host: &mut H, total_recipes: usize) {
    let milestones = [
        (FIRST_RECIPE_THRESHOLD, AchievementId::FirstRecipe),
        (TEN_RECIPES_THRESHOLD, AchievementId::TenRecipes),
        (TWENTY_FIVE_RECIPES_THRESHOLD, AchievementId::TwentyFiveRecipes),
        (FIFTY_RECIPES_THRESHOLD, AchievementId::FiftyRecipes),
    ];
    for (threshold, id) in milestones {
        if total_recipes >= threshold {
            unlock(host, id);
        }
    }
    evaluate_true_chef(host);
}

pub fn evaluate_category_milestones<H: ProgressStore + ?Sized>(
    host: &mut H,
    total_categories: usize,
) {
    if total_categories >= FIVE_CATEGORIES_THRESHOLD {
        unlock(host, AchievementId::FiveCategories);
    }
    evaluate_true_chef(host);
}

pub fn evaluate_counter_milestones<H: ProgressStore + ?Sized>(host: &mut H) {
    let milestones = [
        (CounterKey::FavoritesMarked, FIVE_FAVORITES_THRESHOLD, AchievementId::FiveFavorites),
        (CounterKey::NotesAdded, TEN_NOTES_THRESHOLD, AchievementId::TenNotes),
        (CounterKey::ShoppingUsed, SHOPPING_FIVE_THRESHOLD, AchievementId::ShoppingFive),
        (CounterKey::PhotosAdded, TEN_PHOTOS_THRESHOLD, AchievementId::TenPhotos),
    ];
    for (key, threshold, id) in milestones {
        if host.progress().counter(key) >= threshold {
            unlock(host, id);
        }
    }
    evaluate_true_chef(host);
}

/// Recomputed from the full catalog on every call.
pub fn evaluate_true_chef<H: ProgressStore + ?Sized>(host: &mut H) {
    let progress = host.progress();
    if required_for_meta().all(|id| progress.is_unlocked(id)) {
        unlock(host, AchievementId::TrueChef);
    }
}

// ============================================================================
// Event hooks
// ============================================================================

/// Call once after a new recipe has been stored.
pub fn after_recipe_added<H: AchievementHost + ?Sized>(host: &mut H, recipe: &Recipe) {
    increment(host, CounterKey::RecipesAdded, 1);
    if matches!(recipe.total_minutes, Some(m) if m < QUICK_RECIPE_MINUTES) {
        unlock(host, AchievementId::QuickChef);
    }
    if recipe.difficulty == RecipeDifficulty::Hard {
        unlock(host, AchievementId::HardChef);
    }
    if recipe.image_filename.is_some() {
        increment(host, CounterKey::PhotosAdded, 1);
    }
    let total = host.total_recipe_count();
    evaluate_recipe_milestones(host, total);
}

/// Only a transition to `true` counts; unfavoriting leaves the lifetime counter alone.
pub fn after_favorite_toggled<H: AchievementHost + ?Sized>(host: &mut H, favorite: bool) {
    if favorite {
        increment(host, CounterKey::FavoritesMarked, 1);
    }
}

pub fn after_category_added<H: AchievementHost + ?Sized>(host: &mut H) {
    increment(host, CounterKey::CategoriesCreated, 1);
    let total = host.total_category_count();
    evaluate_category_milestones(host, total);
}

pub fn after_notes_added<H: AchievementHost + ?Sized>(host: &mut H, count: usize) {
    if count > 0 {
        increment(host, CounterKey::NotesAdded, saturating_count(count));
    }
}

pub fn after_shopping_used<H: AchievementHost + ?Sized>(host: &mut H, count: usize) {
    if count > 0 {
        increment(host, CounterKey::ShoppingUsed, saturating_count(count));
    }
}

fn saturating_count(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
