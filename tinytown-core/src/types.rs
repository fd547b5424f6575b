//! Core type definitions for the tinytown engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound for every NPC resource counter.
pub const RESOURCE_MIN: i32 = 0;
/// Upper bound for every NPC resource counter.
pub const RESOURCE_MAX: i32 = 200;

// ---------------------------------------------------------------------------
// Personality
// ---------------------------------------------------------------------------

/// Personality tag for an NPC.
///
/// Descriptive only: no deterministic rule ever reads it. It exists to
/// shape the free-choice prompt handed to the external reasoning source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    /// Loves work, prioritizes earning money, rests little.
    Workaholic,
    /// Prefers relaxation, avoids work, rests a lot.
    Lazy,
    /// Loves food, eats frequently.
    Foodie,
    /// Balanced life, work and rest equally.
    Balanced,
}

impl Personality {
    /// One-line character description rendered into the free-choice prompt.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Workaholic => "Loves work, prioritizes earning money, less rest",
            Self::Lazy => "Prefers relaxation, avoids work, more rest",
            Self::Foodie => "Loves food, eats frequently",
            Self::Balanced => "Balanced life, work and rest equally",
        }
    }

    /// All personality tags, in declaration order.
    #[must_use]
    pub fn all() -> &'static [Personality] {
        &[Self::Workaholic, Self::Lazy, Self::Foodie, Self::Balanced]
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Workaholic => "workaholic",
            Self::Lazy => "lazy",
            Self::Foodie => "foodie",
            Self::Balanced => "balanced",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Resources & Effects
// ---------------------------------------------------------------------------

/// The three clamped resource counters owned by an NPC.
///
/// Every mutation goes through [`Resources::apply`] or
/// [`Resources::saturating_sub`], which clamp each field into
/// [`RESOURCE_MIN`]..=[`RESOURCE_MAX`]. The clamp is uniform — money
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// Currency on hand.
    pub money: i32,
    /// Satiety. Zero means starving.
    pub food: i32,
    /// Energy. Zero means exhausted.
    pub rest: i32,
}

impl Resources {
    /// Create a resource set, clamping each field into the valid range.
    #[must_use]
    pub fn new(money: i32, food: i32, rest: i32) -> Self {
        Self {
            money: clamp(money),
            food: clamp(food),
            rest: clamp(rest),
        }
    }

    /// Apply an effect delta to every field, clamping each result.
    pub fn apply(&mut self, effects: &Effects) {
        self.money = clamp(self.money + effects.money);
        self.food = clamp(self.food + effects.food);
        self.rest = clamp(self.rest + effects.rest);
    }

    /// Whether every field sits inside the valid range.
    #[must_use]
    pub fn in_range(&self) -> bool {
        let ok = |v: i32| (RESOURCE_MIN..=RESOURCE_MAX).contains(&v);
        ok(self.money) && ok(self.food) && ok(self.rest)
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new(50, 50, 50)
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "money={} food={} rest={}",
            self.money, self.food, self.rest
        )
    }
}

fn clamp(value: i32) -> i32 {
    value.clamp(RESOURCE_MIN, RESOURCE_MAX)
}

/// Resource deltas carried by a catalogue action.
///
/// Serializes sparsely (zero fields omitted) so the prompt catalogue reads
/// like `{"food": 100, "money": -60}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    /// Money delta.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub money: i32,
    /// Food delta.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub food: i32,
    /// Rest delta.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rest: i32,
}

impl Effects {
    /// Effect touching only money.
    #[must_use]
    pub fn money(delta: i32) -> Self {
        Self {
            money: delta,
            ..Self::default()
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(v: &i32) -> bool {
    *v == 0
}

// ---------------------------------------------------------------------------
// Action proposal
// ---------------------------------------------------------------------------

/// A proposed or executed decision for one NPC.
///
/// Deliberately unvalidated at construction — whether the action exists at
/// the named place is checked only at apply time, mirroring the trust
/// boundary with the free-choice collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionProposal {
    /// Which NPC this decision belongs to.
    pub npc_id: String,
    /// Action name, expected to match a catalogue entry exactly.
    pub action: String,
    /// Target place display name.
    pub place: String,
    /// Duration in hours.
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Free-text justification.
    pub reason: String,
    /// Confidence in [0, 1]. Forced survival actions use 1.0.
    pub confidence: f32,
}

impl ActionProposal {
    /// Build a proposal with duration 1.
    #[must_use]
    pub fn new(
        npc_id: impl Into<String>,
        action: impl Into<String>,
        place: impl Into<String>,
        reason: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            npc_id: npc_id.into(),
            action: action.into(),
            place: place.into(),
            duration: 1,
            reason: reason.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

fn default_duration() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_clamp_on_construction() {
        let r = Resources::new(-10, 500, 50);
        assert_eq!(r.money, 0);
        assert_eq!(r.food, 200);
        assert_eq!(r.rest, 50);
        assert!(r.in_range());
    }

    #[test]
    fn apply_clamps_every_field_including_money() {
        let mut r = Resources::new(50, 10, 190);
        r.apply(&Effects {
            money: -60,
            food: 100,
            rest: 40,
        });
        assert_eq!(r.money, 0, "money floor clamp must apply uniformly");
        assert_eq!(r.food, 110);
        assert_eq!(r.rest, 200);
    }

    #[test]
    fn effects_serialize_sparsely() {
        let json = serde_json::to_string(&Effects {
            food: 100,
            money: -60,
            rest: 0,
        })
        .expect("serialize");
        assert!(json.contains("food"));
        assert!(json.contains("money"));
        assert!(!json.contains("rest"));
    }

    #[test]
    fn proposal_confidence_is_clamped() {
        let p = ActionProposal::new("npc1", "walk", "Park", "stretching", 1.7);
        assert!((p.confidence - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn personality_round_trips_through_serde() {
        for p in Personality::all() {
            let json = serde_json::to_string(p).expect("serialize");
            let back: Personality = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(*p, back);
        }
    }
}
