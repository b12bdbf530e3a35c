//! # Mob AI
//!
//! Per-mob behaviour state machine. Each turn a living mob first evaluates
//! its transition row, then acts according to the resolved state.
//!
//! Transition candidates are scanned in `Hold`, `Chase`, `Run` order and the
//! first predicate that holds wins. `Dead` is absorbing.

use crate::game::{Direction, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Behavioural state of a mob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobState {
    Hold,
    Chase,
    Run,
    Dead,
}

impl MobState {
    /// Candidate scan order for transitions.
    pub const SCAN_ORDER: [MobState; 3] = [MobState::Hold, MobState::Chase, MobState::Run];

    fn row(self) -> Option<usize> {
        match self {
            MobState::Hold => Some(0),
            MobState::Chase => Some(1),
            MobState::Run => Some(2),
            MobState::Dead => None,
        }
    }

    /// Narration for a mob entering this state, if any.
    pub fn entry_message(self, name: &str) -> Option<String> {
        match self {
            MobState::Chase => Some(format!("{} sees you!", name)),
            MobState::Run => Some(format!("{} runs away!", name)),
            MobState::Hold | MobState::Dead => None,
        }
    }
}

/// Guard on a single cell of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    NotInSight,
    InSightAndHealthy,
    /// Gated by a fresh morale roll each time it is evaluated
    InSightAndNotHealthy,
}

/// `TRANSITIONS[current][candidate]`, rows and columns in scan order.
pub const TRANSITIONS: [[Option<Transition>; 3]; 3] = [
    [
        None,
        Some(Transition::InSightAndHealthy),
        Some(Transition::InSightAndNotHealthy),
    ],
    [
        Some(Transition::NotInSight),
        None,
        Some(Transition::InSightAndNotHealthy),
    ],
    [
        Some(Transition::NotInSight),
        Some(Transition::InSightAndHealthy),
        None,
    ],
];

/// What a mob knows about its target when it decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perception {
    /// The mob stands inside the player's field of view
    pub in_sight: bool,
    pub healthy: bool,
    pub morale: u32,
}

impl Transition {
    /// Evaluates the guard. Only the flee guard consumes randomness.
    pub fn holds<R: Rng + ?Sized>(self, perception: &Perception, rng: &mut R) -> bool {
        match self {
            Transition::NotInSight => !perception.in_sight,
            Transition::InSightAndHealthy => perception.in_sight && perception.healthy,
            Transition::InSightAndNotHealthy => {
                let roll: u32 = rng.gen_range(0..=100);
                roll > perception.morale && perception.in_sight && !perception.healthy
            }
        }
    }
}

/// Resolves the state a mob moves to this turn.
///
/// Returns `current` when no transition fires.
pub fn next_state<R: Rng + ?Sized>(
    current: MobState,
    perception: &Perception,
    rng: &mut R,
) -> MobState {
    let Some(row) = current.row() else {
        return current;
    };

    for (candidate, guard) in MobState::SCAN_ORDER.iter().zip(TRANSITIONS[row].iter()) {
        if let Some(guard) = guard {
            if guard.holds(perception, rng) {
                return *candidate;
            }
        }
    }
    current
}

/// What a mob does on its turn once its state is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MobAction {
    Idle,
    Attack,
    Step(Direction),
}

fn distance_after(from: Position, direction: Direction, target: Position) -> f64 {
    from.step(direction).euclidean_distance(target)
}

/// Picks the open neighbour that most reduces distance to `target`.
///
/// A candidate must be strictly better than both staying put and any
/// earlier candidate, so ties keep the incumbent.
pub fn chase_step<F>(from: Position, target: Position, is_solid: F) -> Option<Direction>
where
    F: Fn(Position) -> bool,
{
    let mut best = from.euclidean_distance(target);
    let mut choice = None;
    for direction in Direction::ALL {
        if is_solid(from.step(direction)) {
            continue;
        }
        let distance = distance_after(from, direction, target);
        if distance < best {
            best = distance;
            choice = Some(direction);
        }
    }
    choice
}

/// Picks the open neighbour that most increases distance from `target`.
pub fn flee_step<F>(from: Position, target: Position, is_solid: F) -> Option<Direction>
where
    F: Fn(Position) -> bool,
{
    let mut best = from.euclidean_distance(target);
    let mut choice = None;
    for direction in Direction::ALL {
        if is_solid(from.step(direction)) {
            continue;
        }
        let distance = distance_after(from, direction, target);
        if distance > best {
            best = distance;
            choice = Some(direction);
        }
    }
    choice
}

/// Plans the action for a resolved state.
///
/// A chasing mob attacks when the target is cardinally adjacent and still
/// attackable; otherwise it steps.
pub fn plan_action<F>(
    state: MobState,
    from: Position,
    target: Position,
    target_attackable: bool,
    is_solid: F,
) -> MobAction
where
    F: Fn(Position) -> bool,
{
    match state {
        MobState::Hold | MobState::Dead => MobAction::Idle,
        MobState::Chase => {
            if target_attackable && from.manhattan_distance(target) == 1 {
                return MobAction::Attack;
            }
            chase_step(from, target, is_solid).map_or(MobAction::Idle, MobAction::Step)
        }
        MobState::Run => flee_step(from, target, is_solid).map_or(MobAction::Idle, MobAction::Step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sees(healthy: bool, morale: u32) -> Perception {
        Perception {
            in_sight: true,
            healthy,
            morale,
        }
    }

    #[test]
    fn test_hold_out_of_sight_stays() {
        let mut rng = StdRng::seed_from_u64(1);
        let blind = Perception {
            in_sight: false,
            healthy: true,
            morale: 50,
        };
        for _ in 0..100 {
            assert_eq!(next_state(MobState::Hold, &blind, &mut rng), MobState::Hold);
        }
    }

    #[test]
    fn test_healthy_mob_in_sight_chases() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(
            next_state(MobState::Hold, &sees(true, 50), &mut rng),
            MobState::Chase
        );
        assert_eq!(
            next_state(MobState::Run, &sees(true, 50), &mut rng),
            MobState::Chase
        );
        assert_eq!(
            next_state(MobState::Chase, &sees(true, 50), &mut rng),
            MobState::Chase
        );
    }

    #[test]
    fn test_losing_sight_returns_to_hold() {
        let mut rng = StdRng::seed_from_u64(3);
        let blind = Perception {
            in_sight: false,
            healthy: false,
            morale: 0,
        };
        assert_eq!(next_state(MobState::Chase, &blind, &mut rng), MobState::Hold);
        assert_eq!(next_state(MobState::Run, &blind, &mut rng), MobState::Hold);
    }

    #[test]
    fn test_morale_gates_fleeing() {
        let mut rng = StdRng::seed_from_u64(4);
        // A roll in 0..=100 can never exceed 100.
        for _ in 0..500 {
            assert_eq!(
                next_state(MobState::Chase, &sees(false, 100), &mut rng),
                MobState::Chase
            );
        }

        let fled = (0..500)
            .filter(|_| next_state(MobState::Hold, &sees(false, 0), &mut rng) == MobState::Run)
            .count();
        // Only a roll of exactly 0 keeps a morale-0 mob in place.
        assert!(fled > 450, "fled = {}", fled);
    }

    #[test]
    fn test_dead_is_absorbing() {
        let mut rng = StdRng::seed_from_u64(5);
        for perception in [sees(true, 0), sees(false, 0)] {
            assert_eq!(next_state(MobState::Dead, &perception, &mut rng), MobState::Dead);
        }
    }

    #[test]
    fn test_entry_messages() {
        assert_eq!(
            MobState::Chase.entry_message("Spider").as_deref(),
            Some("Spider sees you!")
        );
        assert_eq!(
            MobState::Run.entry_message("Spider").as_deref(),
            Some("Spider runs away!")
        );
        assert_eq!(MobState::Hold.entry_message("Spider"), None);
    }

    #[test]
    fn test_chase_step_reduces_distance() {
        let from = Position::new(5, 5);
        let target = Position::new(9, 5);
        assert_eq!(chase_step(from, target, |_| false), Some(Direction::East));

        let target = Position::new(5, 1);
        assert_eq!(chase_step(from, target, |_| false), Some(Direction::North));

        // Blocked straight ahead and nothing else gets closer.
        let blocked = |p: Position| p == Position::new(5, 4);
        assert_eq!(chase_step(from, target, blocked), None);
    }

    #[test]
    fn test_chase_ties_keep_first_candidate() {
        // East and South both close the gap equally; East is scanned first.
        let from = Position::new(0, 0);
        let target = Position::new(3, 3);
        assert_eq!(chase_step(from, target, |_| false), Some(Direction::East));
    }

    #[test]
    fn test_flee_step_increases_distance() {
        let from = Position::new(5, 5);
        let target = Position::new(6, 5);
        assert_eq!(flee_step(from, target, |_| false), Some(Direction::West));

        let cornered = |p: Position| p != Position::new(6, 5);
        assert_eq!(flee_step(from, target, cornered), None);
    }

    #[test]
    fn test_plan_action() {
        let from = Position::new(5, 5);
        let adjacent = Position::new(5, 6);
        assert_eq!(
            plan_action(MobState::Chase, from, adjacent, true, |_| false),
            MobAction::Attack
        );
        // A dead player is never attacked; the mob has nowhere better to go.
        assert_eq!(
            plan_action(MobState::Chase, from, adjacent, false, |p| p == adjacent),
            MobAction::Idle
        );
        assert_eq!(
            plan_action(MobState::Hold, from, adjacent, true, |_| false),
            MobAction::Idle
        );
        assert_eq!(
            plan_action(MobState::Run, from, adjacent, true, |_| false),
            MobAction::Step(Direction::North)
        );
    }
}
