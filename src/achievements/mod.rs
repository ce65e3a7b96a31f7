//! Achievement tracking for the recipe box.
//!
//! The catalog is static, the progress state is owned by the recipe document,
//! and the engine derives unlocks from counters and live collection totals.
//! The storage layer calls the event hooks after each mutation.

pub mod catalog;
pub mod engine;
pub mod progress;

pub use catalog::{required_for_meta, AchievementId, AchievementInfo, CounterKey, UnknownKey};
pub use engine::{
    after_category_added, after_favorite_toggled, after_notes_added, after_recipe_added,
    after_shopping_used, evaluate_category_milestones, evaluate_counter_milestones,
    evaluate_recipe_milestones, evaluate_true_chef, increment, unlock, AchievementHost,
    DomainSnapshot, ProgressStore,
};
pub use progress::{AchievementStatus, ProgressState};
