//! The static world catalogue — places and the actions available at each.
//!
//! Built once at startup and passed by reference everywhere; never mutated
//! at runtime and never exposed as a global.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Effects;

/// One action offered at a place: a name, a resource delta, a duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
    /// Canonical action name (`eating`, `parttime`, ...).
    pub name: String,
    /// Resource deltas applied when the action executes.
    pub effects: Effects,
    /// Duration in hours.
    pub duration: u32,
}

impl ActionDef {
    /// Build an action definition.
    #[must_use]
    pub fn new(name: impl Into<String>, effects: Effects, duration: u32) -> Self {
        Self {
            name: name.into(),
            effects,
            duration,
        }
    }
}

/// A named place with an ordered list of available actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name ("Food Store").
    pub name: String,
    /// Actions available here, in catalogue order.
    pub actions: Vec<ActionDef>,
}

impl Place {
    /// Find an action by exact match on the normalized name.
    ///
    /// Deliberately not a substring match: `eat` must not resolve to
    /// `eating`. The prompt and the fallback only ever emit exact
    /// catalogue names.
    #[must_use]
    pub fn find_action(&self, name: &str) -> Option<&ActionDef> {
        let wanted = normalize_action(name);
        self.actions.iter().find(|a| normalize_action(&a.name) == wanted)
    }
}

/// One row of the flattened catalogue handed to the free-choice prompt.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogueEntry<'a> {
    /// Place display name.
    pub place: &'a str,
    /// Action name.
    pub action: &'a str,
    /// Resource deltas.
    pub effects: &'a Effects,
    /// Duration in hours.
    pub duration: u32,
}

/// Immutable mapping from normalized place key to [`Place`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    places: BTreeMap<String, Place>,
}

impl World {
    /// Build a world from a list of places, keyed by normalized name.
    #[must_use]
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            places: places
                .into_iter()
                .map(|p| (normalize_place_key(&p.name), p))
                .collect(),
        }
    }

    /// The canonical four-place town: Food Store, Wooden Factory, Home, Park.
    #[must_use]
    pub fn town() -> Self {
        Self::new(vec![
            Place {
                name: "Food Store".to_string(),
                actions: vec![
                    ActionDef::new(
                        "eating",
                        Effects {
                            food: 100,
                            money: -60,
                            rest: 0,
                        },
                        1,
                    ),
                    ActionDef::new(
                        "parttime",
                        Effects {
                            money: 20,
                            food: -5,
                            rest: -5,
                        },
                        1,
                    ),
                    // browse the shelves
                    ActionDef::new("shopping", Effects::money(-5), 1),
                ],
            },
            Place {
                name: "Wooden Factory".to_string(),
                actions: vec![
                    ActionDef::new(
                        "fulltime",
                        Effects {
                            money: 20,
                            food: -5,
                            rest: -5,
                        },
                        1,
                    ),
                    ActionDef::new(
                        "chat",
                        Effects {
                            rest: 5,
                            ..Effects::default()
                        },
                        1,
                    ),
                ],
            },
            Place {
                name: "Home".to_string(),
                actions: vec![
                    ActionDef::new(
                        "sleep",
                        Effects {
                            rest: 40,
                            ..Effects::default()
                        },
                        1,
                    ),
                    ActionDef::new(
                        "relax",
                        Effects {
                            rest: 15,
                            ..Effects::default()
                        },
                        1,
                    ),
                ],
            },
            Place {
                name: "Park".to_string(),
                actions: vec![ActionDef::new(
                    "walk",
                    Effects {
                        food: -5,
                        ..Effects::default()
                    },
                    1,
                )],
            },
        ])
    }

    /// Resolve a place by display name or key (lower-cased, spaces to
    /// underscores). Returns `None` for unknown places.
    #[must_use]
    pub fn place(&self, name: &str) -> Option<&Place> {
        self.places.get(&normalize_place_key(name))
    }

    /// All places in key order.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    /// Flatten the catalogue into (place, action, effects, duration) rows
    /// for prompt construction.
    #[must_use]
    pub fn catalogue(&self) -> Vec<CatalogueEntry<'_>> {
        self.places
            .values()
            .flat_map(|place| {
                place.actions.iter().map(|action| CatalogueEntry {
                    place: &place.name,
                    action: &action.name,
                    effects: &action.effects,
                    duration: action.duration,
                })
            })
            .collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::town()
    }
}

/// Normalize a place name into its lookup key: trim, lowercase, spaces to
/// underscores. `"Food Store"` and `"food_store"` resolve identically.
#[must_use]
pub fn normalize_place_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Normalize an action name for exact-match comparison.
#[must_use]
pub fn normalize_action(name: &str) -> String {
    name.trim().to_lowercase()
}
