//! Stat and BaseStats - the five-axis attribute block
//!
//! Stats are a closed set; everything that addresses a stat goes through the
//! [`Stat`] enum rather than free-form strings, so a debuff or reward can
//! never reference an attribute that does not exist.

use serde::{Deserialize, Serialize};

/// One of the five player attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Strength,
    Agility,
    Vitality,
    Intelligence,
    Luck,
}

impl Stat {
    pub fn display_name(&self) -> &'static str {
        match self {
            Stat::Strength => "Strength",
            Stat::Agility => "Agility",
            Stat::Vitality => "Vitality",
            Stat::Intelligence => "Intelligence",
            Stat::Luck => "Luck",
        }
    }

    /// Returns all stats in canonical order.
    pub fn all() -> [Stat; 5] {
        [
            Stat::Strength,
            Stat::Agility,
            Stat::Vitality,
            Stat::Intelligence,
            Stat::Luck,
        ]
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Base attribute values, before any debuffs are applied.
///
/// Every field stays >= 1; [`BaseStats::add`] saturates at the floor rather
/// than letting a negative adjustment push a stat to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
    pub intelligence: i32,
    pub luck: i32,
}

impl Default for BaseStats {
    /// A fresh player starts with 10 in every attribute.
    fn default() -> Self {
        Self {
            strength: 10,
            agility: 10,
            vitality: 10,
            intelligence: 10,
            luck: 10,
        }
    }
}

impl BaseStats {
    pub const MIN_STAT: i32 = 1;

    /// Get the base value of a stat.
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Agility => self.agility,
            Stat::Vitality => self.vitality,
            Stat::Intelligence => self.intelligence,
            Stat::Luck => self.luck,
        }
    }

    /// Adjust a stat by `amount`, never dropping below [`Self::MIN_STAT`].
    pub fn add(&mut self, stat: Stat, amount: i32) {
        let slot = match stat {
            Stat::Strength => &mut self.strength,
            Stat::Agility => &mut self.agility,
            Stat::Vitality => &mut self.vitality,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Luck => &mut self.luck,
        };
        *slot = (*slot + amount).max(Self::MIN_STAT);
    }

    /// Sum of all five base values.
    pub fn total(&self) -> i32 {
        Stat::all().iter().map(|&s| self.get(s)).sum()
    }

    /// The single highest base value.
    pub fn highest(&self) -> i32 {
        Stat::all()
            .iter()
            .map(|&s| self.get(s))
            .max()
            .unwrap_or(Self::MIN_STAT)
    }

    /// The spread between the highest and lowest base value.
    pub fn spread(&self) -> i32 {
        let values: Vec<i32> = Stat::all().iter().map(|&s| self.get(s)).collect();
        let max = values.iter().copied().max().unwrap_or(0);
        let min = values.iter().copied().min().unwrap_or(0);
        max - min
    }
}
