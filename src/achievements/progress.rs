//! Persisted achievement progress: the unlocked set and the lifetime counters.
//!
//! The wire shape is `{ "unlocked": [id, ...], "counters": { key: n, ... } }`.
//! Loading never fails on content. Entries this catalog does not know are
//! dropped and out-of-range counters are clamped, so a document written by a
//! newer (or older) build still opens.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::achievements::catalog::{AchievementId, AchievementInfo, CounterKey};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct ProgressState {
    unlocked: BTreeSet<AchievementId>,
    counters: BTreeMap<CounterKey, u32>,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state with the given achievements already unlocked and all counters at zero.
    pub fn with_unlocked<I: IntoIterator<Item = AchievementId>>(ids: I) -> Self {
        Self {
            unlocked: ids.into_iter().collect(),
            counters: BTreeMap::new(),
        }
    }

    pub fn unlocked(&self) -> &BTreeSet<AchievementId> {
        &self.unlocked
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Current value of a counter; absent keys read as zero.
    pub fn counter(&self, key: CounterKey) -> u32 {
        self.counters.get(&key).copied().unwrap_or(0)
    }

    pub fn counters(&self) -> &BTreeMap<CounterKey, u32> {
        &self.counters
    }

    /// One row per catalog entry, in catalog order.
    pub fn grid(&self) -> Vec<AchievementStatus> {
        AchievementId::ALL
            .into_iter()
            .map(|id| AchievementStatus {
                info: id.info(),
                unlocked: self.is_unlocked(id),
            })
            .collect()
    }

    /// Returns false when `id` was already present.
    pub(crate) fn insert_unlocked(&mut self, id: AchievementId) -> bool {
        self.unlocked.insert(id)
    }

    /// Saturating add; returns the new value.
    pub(crate) fn add_to_counter(&mut self, key: CounterKey, amount: u32) -> u32 {
        let slot = self.counters.entry(key).or_insert(0);
        *slot = slot.saturating_add(amount);
        *slot
    }
}

/// A catalog entry paired with whether it is unlocked, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementStatus {
    pub info: AchievementInfo,
    pub unlocked: bool,
}

/// Sanitize whatever JSON sits in the progress slot. A wrong shape at any level reads as empty.
impl From<Value> for ProgressState {
    fn from(raw: Value) -> Self {
        let mut state = ProgressState::default();

        let mut raw = match raw {
            Value::Object(map) => map,
            Value::Null => return state,
            other => {
                warn!("ignoring malformed saved progress: {}", other);
                return state;
            }
        };

        match raw.remove("unlocked") {
            Some(Value::Array(entries)) => {
                for entry in entries {
                    match entry.as_str().map(str::parse::<AchievementId>) {
                        Some(Ok(id)) => {
                            state.unlocked.insert(id);
                        }
                        _ => {
                            warn!("dropping unknown achievement id from saved progress: {}", entry)
                        }
                    }
                }
            }
            None | Some(Value::Null) => {}
            Some(other) => warn!("ignoring malformed unlocked list in saved progress: {}", other),
        }

        let counters = match raw.remove("counters") {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => return state,
            Some(other) => {
                warn!("ignoring malformed counters in saved progress: {}", other);
                return state;
            }
        };

        for (name, value) in counters {
            let key = match name.parse::<CounterKey>() {
                Ok(key) => key,
                Err(_) => {
                    warn!("dropping unknown counter from saved progress: {}", name);
                    continue;
                }
            };
            let count = if let Some(n) = value.as_u64() {
                u32::try_from(n).unwrap_or(u32::MAX)
            } else if let Some(n) = value.as_i64() {
                warn!("clamping negative counter {} ({}) to 0", key, n);
                0
            } else {
                warn!("dropping non-integer counter {}: {}", key, value);
                continue;
            };
            // Legacy and kebab names can both appear; keep the larger value.
            let slot = state.counters.entry(key).or_insert(0);
            *slot = (*slot).max(count);
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_documented_shape() {
        let mut state =
            ProgressState::with_unlocked([AchievementId::HardChef, AchievementId::FirstRecipe]);
        state.add_to_counter(CounterKey::RecipesAdded, 2);
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "unlocked": ["first-recipe", "hard-chef"],
                "counters": { "recipes-added": 2 }
            })
        );
    }

    #[test]
    fn load_sanitizes_unknown_and_negative_entries() {
        let raw = json!({
            "unlocked": ["first-recipe", "cooked-a-souffle", 42, "under30Chef"],
            "counters": {
                "notes-added": -4,
                "favoritesMarked": 3,
                "recipes-cooked": 9,
                "shopping-used": 99999999999u64,
                "photos-added": "many"
            }
        });
        let state: ProgressState = serde_json::from_value(raw).unwrap();

        assert_eq!(state.unlocked_count(), 2);
        assert!(state.is_unlocked(AchievementId::FirstRecipe));
        assert!(state.is_unlocked(AchievementId::QuickChef));
        assert_eq!(state.counter(CounterKey::NotesAdded), 0);
        assert_eq!(state.counter(CounterKey::FavoritesMarked), 3);
        assert_eq!(state.counter(CounterKey::ShoppingUsed), u32::MAX);
        assert_eq!(state.counter(CounterKey::PhotosAdded), 0);
        assert!(!state.counters().contains_key(&CounterKey::PhotosAdded));
    }

    #[test]
    fn missing_fields_load_as_empty() {
        let state: ProgressState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, ProgressState::default());
        let state: ProgressState =
            serde_json::from_str(r#"{"unlocked": null, "counters": null}"#).unwrap();
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn wrong_container_shapes_load_as_empty() {
        for raw in [
            json!(null),
            json!("first-recipe"),
            json!({ "unlocked": "first-recipe" }),
            json!({ "counters": [1, 2] }),
            json!({ "unlocked": { "first-recipe": true }, "counters": "lots" }),
        ] {
            let state: ProgressState = serde_json::from_value(raw).unwrap();
            assert_eq!(state, ProgressState::default());
        }
    }

    #[test]
    fn bad_counters_keep_good_unlocks() {
        let raw = json!({ "unlocked": ["ten-notes"], "counters": [3] });
        let state: ProgressState = serde_json::from_value(raw).unwrap();
        assert!(state.is_unlocked(AchievementId::TenNotes));
        assert!(state.counters().is_empty());
    }

    #[test]
    fn counter_add_saturates() {
        let mut state = ProgressState::new();
        state.add_to_counter(CounterKey::NotesAdded, u32::MAX - 1);
        assert_eq!(state.add_to_counter(CounterKey::NotesAdded, 5), u32::MAX);
    }

    #[test]
    fn grid_lists_whole_catalog_in_order() {
        let state = ProgressState::with_unlocked([AchievementId::TenNotes]);
        let grid = state.grid();
        assert_eq!(grid.len(), AchievementId::ALL.len());
        assert_eq!(grid[0].info.id, AchievementId::FirstRecipe);
        let notes = grid
            .iter()
            .find(|row| row.info.id == AchievementId::TenNotes)
            .unwrap();
        assert!(notes.unlocked);
        assert_eq!(grid.iter().filter(|row| row.unlocked).count(), 1);
    }
}
