//! DebuffLedger - applying, decaying, and sweeping stat penalties.
//!
//! The ledger is the only writer of `player.debuffs`. Target stats are
//! drawn from the category's weighted pool through the injected random
//! port; expiry checks compare against the explicit `now` passed in.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use repforge_domain::{
    ActiveDebuff, ClearedDebuff, Debuff, DebuffCategory, DebuffId, Player, Stat,
};

use crate::infrastructure::ports::{pick, RandomPort};

pub struct DebuffLedger {
    random: Arc<dyn RandomPort>,
}

impl DebuffLedger {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }

    /// Apply a new debuff of `category`, targeting a stat drawn from the
    /// category's pool. The resistance gate is advisory and deliberately
    /// not consulted here; callers decide whether a penalty lands.
    pub fn apply(
        &self,
        player: &mut Player,
        category: DebuffCategory,
        now: DateTime<Utc>,
        duration: Duration,
    ) -> Debuff {
        let target = *pick(self.random.as_ref(), category.target_pool());
        let debuff = Debuff::new(category, target, now, duration);
        tracing::debug!(
            category = %category,
            stat = %target,
            expires_at = %debuff.expires_at,
            "debuff applied"
        );
        player.debuffs.insert(debuff.id, debuff.clone());
        debuff
    }

    /// Remove every entry with `expires_at <= now`. Storage hygiene only;
    /// active-ness is always computed against `now` at read time.
    pub fn sweep_expired(&self, player: &mut Player, now: DateTime<Utc>) -> Vec<ClearedDebuff> {
        let expired: Vec<DebuffId> = player
            .debuffs
            .values()
            .filter(|d| !d.is_active(now))
            .map(|d| d.id)
            .collect();

        let mut cleared = Vec::with_capacity(expired.len());
        for id in expired {
            if let Some(debuff) = player.debuffs.remove(&id) {
                cleared.push(ClearedDebuff {
                    id: debuff.id,
                    category: debuff.category,
                    target_stat: debuff.target_stat,
                });
            }
        }
        if !cleared.is_empty() {
            tracing::debug!(count = cleared.len(), "expired debuffs swept");
        }
        cleared
    }

    /// Snapshot of still-active debuffs with remaining time and severity,
    /// soonest expiry first.
    pub fn list_active(&self, player: &Player, now: DateTime<Utc>) -> Vec<ActiveDebuff> {
        let mut active: Vec<ActiveDebuff> = player
            .debuffs
            .values()
            .filter(|d| d.is_active(now))
            .map(|d| ActiveDebuff {
                id: d.id,
                category: d.category,
                target_stat: d.target_stat,
                severity: d.severity(),
                remaining: d.remaining(now),
            })
            .collect();
        active.sort_by_key(|d| d.remaining);
        active
    }

    /// Sum of severities of active debuffs on `stat` (exact field match).
    pub fn total_debuff_on_stat(&self, player: &Player, stat: Stat, now: DateTime<Utc>) -> i32 {
        player
            .debuffs
            .values()
            .filter(|d| d.target_stat == stat && d.is_active(now))
            .map(|d| d.severity())
            .sum()
    }

    /// Remove one debuff by id. False when the id is unknown.
    pub fn remove(&self, player: &mut Player, id: DebuffId) -> bool {
        player.debuffs.remove(&id).is_some()
    }

    /// Shorten a debuff. If the reduced expiry is no longer in the future,
    /// the entry is removed entirely rather than left as a negative-
    /// duration record.
    pub fn reduce_duration(
        &self,
        player: &mut Player,
        id: DebuffId,
        reduction: Duration,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(debuff) = player.debuffs.get_mut(&id) else {
            return false;
        };
        debuff.expires_at -= reduction;
        if !debuff.is_active(now) {
            player.debuffs.remove(&id);
        }
        true
    }

    /// Debuff resistance in `[0, 0.5]`.
    pub fn resistance(&self, player: &Player) -> f64 {
        player.resistance()
    }

    /// Probabilistic gate: one uniform draw in `[0, 1)` must exceed the
    /// player's resistance for a new debuff to land. Higher resistance,
    /// lower chance.
    pub fn should_apply(&self, player: &Player) -> bool {
        self.random.uniform() > self.resistance(player)
    }
}
