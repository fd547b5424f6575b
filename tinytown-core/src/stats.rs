//! Summary statistics — vitals, wealth tiers, action diversity.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::npc::Npc;
use crate::types::Resources;

/// Money above this is Rich; below [`WEALTH_BROKE_BELOW`] is Broke.
pub const WEALTH_RICH_ABOVE: i32 = 150;
/// Money below this is Broke.
pub const WEALTH_BROKE_BELOW: i32 = 30;

/// Food or rest below this flags an NPC as distressed mid-day.
pub const DISTRESS_FLOOR: i32 = 10;

/// Wealth tier based on money thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WealthTier {
    /// money > 150.
    Rich,
    /// 30 <= money <= 150.
    Comfortable,
    /// money < 30.
    Broke,
}

impl WealthTier {
    /// Classify a money balance.
    #[must_use]
    pub fn classify(money: i32) -> Self {
        if money > WEALTH_RICH_ABOVE {
            Self::Rich
        } else if money < WEALTH_BROKE_BELOW {
            Self::Broke
        } else {
            Self::Comfortable
        }
    }
}

impl fmt::Display for WealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rich => "rich",
            Self::Comfortable => "comfortable",
            Self::Broke => "broke",
        };
        write!(f, "{name}")
    }
}

/// Mid-day distress heuristic: food or rest has fallen under the floor.
#[must_use]
pub fn is_distressed(resources: &Resources) -> bool {
    resources.food < DISTRESS_FLOOR || resources.rest < DISTRESS_FLOOR
}

/// Day-end survival heuristic: both food and rest strictly positive.
#[must_use]
pub fn survived(resources: &Resources) -> bool {
    resources.food > 0 && resources.rest > 0
}

/// Ratio of distinct action names to total actions taken.
///
/// The denominator is `max(1, len)`, so an empty history yields 0.0. A
/// 24-entry history using 4 distinct actions scores 4/24.
#[must_use]
pub fn action_diversity(history: &[String]) -> f32 {
    let distinct: BTreeSet<&str> = history
        .iter()
        .map(|token| token.split_once(':').map_or(token.as_str(), |(_, a)| a))
        .collect();
    #[allow(clippy::cast_precision_loss)]
    {
        distinct.len() as f32 / history.len().max(1) as f32
    }
}

/// End-of-day summary for one NPC.
#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    /// NPC display name.
    pub name: String,
    /// Personality tag.
    pub personality: String,
    /// Final resource counters.
    pub resources: Resources,
    /// Whether the NPC ended the day alive.
    pub survived: bool,
    /// Wealth tier at day end.
    pub wealth: WealthTier,
    /// Distinct-over-total action ratio.
    pub diversity: f32,
    /// Hours spent working today.
    pub hours_worked: u32,
    /// The last twelve history tokens.
    pub recent_path: String,
}

impl DayReport {
    /// Summarize an NPC at the end of a day.
    #[must_use]
    pub fn for_npc(npc: &Npc) -> Self {
        Self {
            name: npc.name.clone(),
            personality: npc.personality.to_string(),
            resources: npc.resources,
            survived: survived(&npc.resources),
            wealth: WealthTier::classify(npc.resources.money),
            diversity: action_diversity(&npc.action_history),
            hours_worked: npc.hours_worked_today,
            recent_path: npc.recent_path(12),
        }
    }
}
