//! StatEngine - experience, levels, and effective stats.
//!
//! Leveling drains surplus XP in a loop: each crossing consumes a flat
//! [`XP_PER_LEVEL`] and awards [`STAT_POINTS_PER_LEVEL`], so a single grant
//! can cross several levels and always leaves the true remainder. The
//! advertised requirement for the next level scales with level
//! ([`Player::experience_to_next_level`]); the drain step does not, which
//! is what keeps lifetime XP equal to `(level - 1) * 100 + experience`.

use chrono::{DateTime, Utc};

use repforge_domain::{Player, Stat, STAT_POINTS_PER_LEVEL, XP_PER_LEVEL};

/// What one call to [`StatEngine::grant_experience`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpOutcome {
    pub levels_gained: u32,
    pub stat_points_gained: u32,
    pub new_level: u32,
}

/// Experience -> level conversion, stat-point allocation, and effective
/// stat computation. Stateless; every operation takes the player record.
pub struct StatEngine;

impl StatEngine {
    pub fn new() -> Self {
        Self
    }

    /// Add `amount` XP and cross as many levels as the total supports.
    ///
    /// Terminates because each iteration strictly reduces `experience`,
    /// and leaves `experience < XP_PER_LEVEL` - the correctly reduced
    /// remainder, not zero.
    pub fn grant_experience(&self, player: &mut Player, amount: u32) -> LevelUpOutcome {
        player.experience += amount;

        let mut levels_gained = 0;
        while player.experience >= XP_PER_LEVEL {
            player.experience -= XP_PER_LEVEL;
            player.level += 1;
            levels_gained += 1;
        }

        let stat_points_gained = levels_gained * STAT_POINTS_PER_LEVEL;
        player.stat_points += stat_points_gained;

        if levels_gained > 0 {
            tracing::info!(
                new_level = player.level,
                levels_gained,
                stat_points_gained,
                "player leveled up"
            );
        }

        LevelUpOutcome {
            levels_gained,
            stat_points_gained,
            new_level: player.level,
        }
    }

    /// Spend points from the pool on one stat. Returns false with no
    /// mutation when the pool is too small.
    pub fn allocate_stat_point(&self, player: &mut Player, stat: Stat, points: u32) -> bool {
        if points > player.stat_points {
            return false;
        }
        player.stat_points -= points;
        player.stats.add(stat, points as i32);
        true
    }

    /// Base stat minus the count of active debuffs targeting it, floored
    /// at 1 no matter how deep the debuff stack.
    pub fn effective_stat(&self, player: &Player, stat: Stat, now: DateTime<Utc>) -> i32 {
        let base = player.stats.get(stat);
        let penalty = player.active_debuffs_on(stat, now) as i32;
        (base - penalty).max(1)
    }

    /// Advertised XP requirement for the next level.
    pub fn experience_to_next_level(&self, player: &Player) -> u32 {
        player.experience_to_next_level()
    }
}

impl Default for StatEngine {
    fn default() -> Self {
        Self::new()
    }
}
