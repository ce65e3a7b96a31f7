//! # Recipe Box - Personal Recipe Manager with Achievements
//!
//! Recipe Box keeps a personal cookbook in a single local JSON document: recipes
//! with ingredients, steps, photos and notes, organized into categories, plus a
//! shopping list built from recipe ingredients. Usage milestones unlock
//! achievements that are tracked alongside the data.
//!
//! ## Features
//!
//! - **Recipes**: Titles, ingredients, ordered steps, notes, difficulty, total time and an optional photo reference.
//! - **Categories**: Five starter categories plus user-created ones.
//! - **Shopping List**: Push a recipe's ingredients onto a checkable list.
//! - **Achievements**: Twelve badges derived from lifetime counters and collection totals, including the "True Chef" meta-achievement.
//! - **Durable Storage**: Lock-protected atomic writes after every mutation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recipebox::achievements::AchievementId;
//! use recipebox::storage::{types::Recipe, RecipeBox};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut book = RecipeBox::open("./data/recipe_box.json")?;
//!     book.add_recipe(Recipe::new("Omelette").with_minutes(10))?;
//!
//!     assert!(book.progress().is_unlocked(AchievementId::QuickChef));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`achievements`] - Achievement catalog, progress state and the tracking engine
//! - [`storage`] - Recipe box document model and persistence
//! - [`config`] - Configuration management
//! - [`validation`] - Input validation for user-entered text
//! - [`logutil`] - Single-line escaping of user text in logs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   RecipeBox     │ ← CRUD on the document, calls event hooks
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  Achievements   │ ← Counters, unlocks, milestone evaluation
//! │  Engine         │
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │  JSON Document  │ ← Single persisted file
//! └─────────────────┘
//! ```

pub mod achievements;
pub mod config;
pub mod logutil;
pub mod storage;
pub mod validation;
