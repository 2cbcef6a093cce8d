//! TitleEvaluator - scanning the catalog for newly earned titles.
//!
//! Evaluation is a full scan: every title whose predicate newly holds is
//! unlocked in the same call, whatever the catalog order. Unlocks are
//! permanent; nothing here ever removes a title.

use chrono::{DateTime, Utc};

use repforge_domain::{title_definition, Player, TitleRarity, TITLE_CATALOG};

/// A title unlocked by one evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockedTitle {
    pub name: &'static str,
    pub rarity: TitleRarity,
}

pub struct TitleEvaluator;

impl TitleEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Re-evaluate every locked title against current player state and
    /// unlock all that now qualify. Returns only this call's unlocks.
    pub fn evaluate(&self, player: &mut Player, now: DateTime<Utc>) -> Vec<UnlockedTitle> {
        let mut unlocked = Vec::new();
        for title in TITLE_CATALOG {
            if player.has_title(title.name) {
                continue;
            }
            if title.requirement.satisfied_by(player, now) {
                player.unlock_title(title.name);
                tracing::info!(title = title.name, rarity = title.rarity.display_name(), "title unlocked");
                unlocked.push(UnlockedTitle {
                    name: title.name,
                    rarity: title.rarity,
                });
            }
        }
        unlocked
    }

    /// Progress toward a title in [0, 1]; 1.0 once unlocked. `None` for a
    /// name that is not in the catalog. No side effects.
    pub fn progress(&self, player: &Player, title: &str, now: DateTime<Utc>) -> Option<f64> {
        let definition = title_definition(title)?;
        if player.has_title(title) {
            return Some(1.0);
        }
        Some(definition.requirement.progress(player, now))
    }

    /// Switch the displayed title. False when it has not been unlocked.
    pub fn set_active_title(&self, player: &mut Player, title: &str) -> bool {
        if !player.has_title(title) {
            return false;
        }
        player.current_title = title.to_string();
        true
    }
}

impl Default for TitleEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
