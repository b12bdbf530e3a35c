//! # World Module
//!
//! The dungeon tile grid, its rooms, and terrain queries.
//!
//! Entity-aware solidity lives on [`GameState::is_solid`](crate::GameState::is_solid);
//! this module only answers questions about terrain.

use crate::game::Position;
use crate::generation::Room;
use crate::{BogeyError, BogeyResult};
use serde::{Deserialize, Serialize};

/// A single cell of the dungeon grid.
///
/// `fog` selects the wall glyph over the floor glyph and makes the tile
/// opaque for field of view. `seen` only ever goes from false to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Whether entities may stand on this tile
    pub passable: bool,
    /// Whether the tile renders and blocks sight like a wall
    pub fog: bool,
    seen: bool,
}

impl Tile {
    /// Creates a tile whose fog follows its passability.
    pub fn new(passable: bool) -> Self {
        Self::with_fog(passable, false)
    }

    /// Creates a tile with explicit fog. Impassable tiles are always fogged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::Tile;
    ///
    /// assert!(Tile::with_fog(false, false).fog);
    /// assert!(Tile::with_fog(true, true).fog);
    /// assert!(!Tile::with_fog(true, false).fog);
    /// ```
    pub fn with_fog(passable: bool, fog: bool) -> Self {
        Self {
            passable,
            fog: fog || !passable,
            seen: false,
        }
    }

    /// Creates an impassable wall tile.
    pub fn wall() -> Self {
        Self::new(false)
    }

    /// Creates a passable floor tile.
    pub fn floor() -> Self {
        Self::new(true)
    }

    /// Makes the tile walkable open floor.
    pub fn carve(&mut self) {
        self.passable = true;
        self.fog = false;
    }

    /// Whether this tile has ever been inside the field of view.
    pub fn is_seen(&self) -> bool {
        self.seen
    }

    /// Records that the tile has been seen. Never reverts.
    pub fn mark_seen(&mut self) {
        self.seen = true;
    }
}

/// The dungeon map: a `width × height` grid of tiles plus the rooms carved
/// into it, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// Width of the grid in tiles
    pub width: u32,
    /// Height of the grid in tiles
    pub height: u32,
    /// Row-major tiles
    tiles: Vec<Tile>,
    /// Accepted rooms in the order they were carved
    pub rooms: Vec<Room>,
    /// How many times the player has descended (0 for the first level)
    pub depth: u32,
}

impl World {
    /// Creates a world filled entirely with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use bogey::{Position, World};
    ///
    /// let world = World::new(20, 10);
    /// assert!(world.is_blocked(Position::new(3, 3)));
    /// assert!(world.is_blocked(Position::new(-1, 3)));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); (width * height) as usize],
            rooms: Vec::new(),
            depth: 0,
        }
    }

    /// Checks whether a position lies on the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Checks that the tile vector matches `width × height`. Worlds read
    /// from disk must pass this before they are used.
    pub fn check_shape(&self) -> BogeyResult<()> {
        let expected = self.width as usize * self.height as usize;
        if self.tiles.len() != expected {
            return Err(BogeyError::InvalidState(format!(
                "World of {}x{} holds {} tiles, expected {}",
                self.width,
                self.height,
                self.tiles.len(),
                expected
            )));
        }
        Ok(())
    }

    /// Gets the tile at a position.
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).and_then(|idx| self.tiles.get(idx))
    }

    /// Gets the tile at a position mutably.
    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).and_then(move |idx| self.tiles.get_mut(idx))
    }

    /// Replaces the tile at a position.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> BogeyResult<()> {
        let tile_slot = self.tile_mut(pos).ok_or_else(|| {
            BogeyError::InvalidState(format!("Position {:?} is outside the map", pos))
        })?;
        *tile_slot = tile;
        Ok(())
    }

    /// Terrain-only solidity: off-grid and impassable tiles block movement.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.tile(pos).map(|tile| !tile.passable).unwrap_or(true)
    }

    /// Whether sight passes through the tile.
    pub fn is_transparent(&self, pos: Position) -> bool {
        self.tile(pos).map(|tile| !tile.fog).unwrap_or(false)
    }

    /// Whether the tile at `pos` has been seen.
    pub fn is_seen(&self, pos: Position) -> bool {
        self.tile(pos).map(Tile::is_seen).unwrap_or(false)
    }

    /// Marks a tile as seen; ignores off-grid positions.
    pub fn mark_seen(&mut self, pos: Position) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.mark_seen();
        }
    }

    /// Carves the interior of a room (its boundary ring stays solid).
    pub fn carve_room(&mut self, room: &Room) {
        for y in (room.y1 + 1)..room.y2 {
            for x in (room.x1 + 1)..room.x2 {
                if let Some(tile) = self.tile_mut(Position::new(x, y)) {
                    tile.carve();
                }
            }
        }
    }

    /// Carves a horizontal tunnel between `x1` and `x2` inclusive on row `y`.
    pub fn carve_h_tunnel(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            if let Some(tile) = self.tile_mut(Position::new(x, y)) {
                tile.carve();
            }
        }
    }

    /// Carves a vertical tunnel between `y1` and `y2` inclusive on column `x`.
    pub fn carve_v_tunnel(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            if let Some(tile) = self.tile_mut(Position::new(x, y)) {
                tile.carve();
            }
        }
    }

    /// Iterates over every position with its tile, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        let width = self.width as usize;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(idx, tile)| {
                let pos = Position::new((idx % width) as i32, (idx / width) as i32);
                (pos, tile)
            })
    }

    /// Counts the passable tiles in the grid.
    pub fn passable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.passable).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_shape_rejects_truncated_tiles() {
        let mut world = World::new(4, 3);
        assert!(world.check_shape().is_ok());

        world.tiles.truncate(5);
        assert!(matches!(
            world.check_shape(),
            Err(BogeyError::InvalidState(_))
        ));
        assert!(world.tile(Position::new(3, 2)).is_none());
        assert!(world.is_blocked(Position::new(3, 2)));
    }

    #[test]
    fn test_tile_fog_defaults_to_impassable() {
        assert!(Tile::wall().fog);
        assert!(!Tile::floor().fog);
        assert!(!Tile::floor().is_seen());
    }

    #[test]
    fn test_tile_seen_is_monotonic() {
        let mut tile = Tile::floor();
        tile.mark_seen();
        tile.carve();
        assert!(tile.is_seen());
    }

    #[test]
    fn test_carve_room_leaves_boundary() {
        let mut world = World::new(20, 20);
        let room = Room::new(2, 2, 5, 5);
        world.carve_room(&room);

        assert!(world.is_blocked(Position::new(2, 2)));
        assert!(world.is_blocked(Position::new(7, 4)));
        assert!(!world.is_blocked(Position::new(3, 3)));
        assert!(!world.is_blocked(Position::new(6, 6)));
        assert_eq!(world.passable_count(), 16);
    }

    #[test]
    fn test_tunnels_are_inclusive() {
        let mut world = World::new(20, 20);
        world.carve_h_tunnel(8, 3, 5);
        world.carve_v_tunnel(1, 4, 8);

        for x in 3..=8 {
            assert!(!world.is_blocked(Position::new(x, 5)));
        }
        for y in 1..=4 {
            assert!(!world.is_blocked(Position::new(8, y)));
        }
        assert_eq!(world.passable_count(), 10);
    }

    #[test]
    fn test_out_of_bounds_is_blocked_and_opaque() {
        let world = World::new(5, 5);
        assert!(world.is_blocked(Position::new(5, 0)));
        assert!(!world.is_transparent(Position::new(0, -1)));
        assert!(world.tile(Position::new(4, 4)).is_some());
    }

    #[test]
    fn test_set_tile_rejects_off_grid() {
        let mut world = World::new(5, 5);
        assert!(world.set_tile(Position::new(1, 1), Tile::floor()).is_ok());
        assert!(world.set_tile(Position::new(9, 1), Tile::floor()).is_err());
    }
}
