//! Integration test to ensure a game can start up without errors.

use bogey::{
    BogeyResult, Entity, GameConfig, GameState, GameStatus, PlayerCharacter, Position, PLAYER_NAME,
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_basic_startup() -> BogeyResult<()> {
    let config = GameConfig::default();
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(12345);

    let state = GameState::new_game(&config, &mut rng)?;

    assert_eq!(state.status, GameStatus::Playing);
    assert_eq!(state.world.depth, 0);
    assert!(!state.world.rooms.is_empty());
    assert_eq!(state.objects.characters.len(), 1);
    assert_eq!(state.objects.stairs.len(), 1);

    // The player spawns strictly inside the first room on open floor
    let player = state.player();
    assert_eq!(player.name, PLAYER_NAME);
    assert!(state.world.rooms[0].interior_contains(player.position));
    assert!(!state.world.is_blocked(player.position));
    assert!(state.fov().is_visible(player.position));
    assert!(state.world.is_seen(player.position));

    // Nothing else spawned on the player
    assert!(state
        .objects
        .mobs
        .iter()
        .all(|mob| mob.position != player.position));
    assert!(!state.messages.is_empty());

    Ok(())
}

#[test]
fn test_same_seed_same_dungeon() -> BogeyResult<()> {
    let config = GameConfig::for_testing(9);
    let a = GameState::new_game(&config, &mut StdRng::seed_from_u64(9))?;
    let b = GameState::new_game(&config, &mut StdRng::seed_from_u64(9))?;

    assert_eq!(a.world, b.world);
    assert_eq!(a.player().position, b.player().position);
    assert_eq!(
        a.objects.mobs.iter().map(|m| m.position).collect::<Vec<_>>(),
        b.objects.mobs.iter().map(|m| m.position).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn test_player_can_be_created() {
    let player = PlayerCharacter::new("Hero".to_string(), Position::new(5, 5));
    assert_eq!(player.name, "Hero");
    assert_eq!(player.position(), Position::new(5, 5));
    assert_eq!(player.glyph(), '@');
    assert!(player.is_solid());
    assert_eq!(player.stats.hp, PlayerCharacter::BASE_HP);
}
