//! # Combat
//!
//! Hit points, damage rolls and attack resolution shared by the player and
//! mobs. Narration of the outcome is left to the caller.

use crate::game::Entity;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hit points and attack strength of a combat-capable entity.
///
/// `hp` always stays within `[0, max_hp]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
}

impl CombatStats {
    /// Creates stats at full health.
    pub fn new(max_hp: u32, atk: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            atk,
        }
    }

    /// Whether current HP is at least `fraction` of max HP.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::CombatStats;
    ///
    /// let mut stats = CombatStats::new(100, 10);
    /// stats.hp = 40;
    /// assert!(stats.is_healthy(0.4));
    /// stats.hp = 39;
    /// assert!(!stats.is_healthy(0.4));
    /// ```
    pub fn is_healthy(&self, fraction: f64) -> bool {
        self.hp as f64 >= fraction * self.max_hp as f64
    }

    /// Restores up to `amount` HP, never past max. Returns the HP gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }
}

/// Capability of entities that fight: they have stats, take damage and die.
pub trait Combatant: Entity {
    fn stats(&self) -> &CombatStats;

    fn stats_mut(&mut self) -> &mut CombatStats;

    /// Per-variant death hook. Called exactly once, when HP reaches 0.
    fn die(&mut self);

    fn is_alive(&self) -> bool {
        self.stats().hp > 0
    }

    /// Applies damage, clamping HP at 0. Returns true only for the blow that
    /// killed the entity; damage to a dead entity is ignored.
    fn take_damage(&mut self, damage: u32) -> bool {
        if !self.is_alive() || damage == 0 {
            return false;
        }
        let stats = self.stats_mut();
        stats.hp = stats.hp.saturating_sub(damage);
        if stats.hp == 0 {
            self.die();
            true
        } else {
            false
        }
    }
}

/// What happened when one combatant attacked another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The target was already dead; nothing happened
    Inert,
    /// A damage roll of 0
    Missed,
    /// Damage dealt, target survived
    Hit { damage: u32 },
    /// Damage dealt and it was the killing blow
    Killed { damage: u32 },
}

impl AttackOutcome {
    /// Damage actually dealt.
    pub fn damage(&self) -> u32 {
        match self {
            AttackOutcome::Hit { damage } | AttackOutcome::Killed { damage } => *damage,
            AttackOutcome::Inert | AttackOutcome::Missed => 0,
        }
    }
}

/// Rolls a uniformly random damage value in `[0, atk]`.
pub fn roll_damage<R: Rng + ?Sized>(atk: u32, rng: &mut R) -> u32 {
    rng.gen_range(0..=atk)
}

/// Resolves one attack of `attacker` on `target`.
pub fn resolve_attack<T, R>(attacker: &CombatStats, target: &mut T, rng: &mut R) -> AttackOutcome
where
    T: Combatant + ?Sized,
    R: Rng + ?Sized,
{
    if !target.is_alive() {
        return AttackOutcome::Inert;
    }

    let damage = roll_damage(attacker.atk, rng);
    if damage == 0 {
        return AttackOutcome::Missed;
    }

    if target.take_damage(damage) {
        AttackOutcome::Killed { damage }
    } else {
        AttackOutcome::Hit { damage }
    }
}
