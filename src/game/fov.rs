//! # Field of View
//!
//! Radius-limited recursive shadowcasting over the tile grid. Fogged tiles
//! block sight. Every tile that becomes visible is permanently marked as
//! seen on the [`World`].

use crate::game::{Position, World};

/// The set of tiles currently visible from the last computed origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOfView {
    width: u32,
    height: u32,
    visible: Vec<bool>,
    origin: Option<Position>,
}

#[derive(Clone, Copy)]
struct Slope {
    rise: i32,
    run: i32,
}

impl Slope {
    fn new(rise: i32, run: i32) -> Self {
        Self { rise, run }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.rise * other.run >= other.rise * self.run
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.rise * other.run > other.rise * self.run
    }
}

/// Maps octant-local `(depth, offset)` onto the grid around `origin`.
fn octant_to_grid(origin: Position, depth: i32, offset: i32, octant: u8) -> Position {
    let (dx, dy) = match octant {
        0 => (depth, -offset),
        1 => (offset, -depth),
        2 => (-offset, -depth),
        3 => (-depth, -offset),
        4 => (-depth, offset),
        5 => (-offset, depth),
        6 => (offset, depth),
        _ => (depth, offset),
    };
    Position::new(origin.x + dx, origin.y + dy)
}

struct Scan<'a> {
    world: &'a World,
    origin: Position,
    radius: i32,
    light_walls: bool,
    octant: u8,
}

impl FieldOfView {
    /// Creates an empty field of view for a grid of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            visible: vec![false; (width * height) as usize],
            origin: None,
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
        {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    fn set_visible(&mut self, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.visible[idx] = true;
        }
    }

    /// Checks whether a position was visible at the last computation.
    pub fn is_visible(&self, pos: Position) -> bool {
        self.index(pos).map(|idx| self.visible[idx]).unwrap_or(false)
    }

    /// The position the field of view was last computed from.
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    /// Iterates over all currently visible positions.
    pub fn visible_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width as usize;
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, visible)| **visible)
            .map(move |(idx, _)| Position::new((idx % width) as i32, (idx / width) as i32))
    }

    /// Recomputes visibility from `origin` and marks every visible tile as
    /// seen on the world.
    ///
    /// With `light_walls` set, opaque tiles bordering the lit area are
    /// themselves visible; otherwise only transparent tiles are.
    pub fn compute(&mut self, world: &mut World, origin: Position, radius: i32, light_walls: bool) {
        if self.width != world.width || self.height != world.height {
            *self = Self::new(world.width, world.height);
        } else {
            self.visible.iter_mut().for_each(|visible| *visible = false);
        }
        self.origin = Some(origin);
        self.set_visible(origin);

        for octant in 0..8 {
            let scan = Scan {
                world,
                origin,
                radius,
                light_walls,
                octant,
            };
            self.scan_row(&scan, 1, Slope::new(1, 1), Slope::new(0, 1));
        }

        let visible: Vec<Position> = self.visible_positions().collect();
        for pos in visible {
            world.mark_seen(pos);
        }
    }

    fn scan_row(&mut self, scan: &Scan<'_>, depth: i32, start: Slope, end: Slope) {
        if depth > scan.radius {
            return;
        }

        let mut blocked = false;
        let mut current_start = start;
        for offset in (0..=depth).rev() {
            let top = Slope::new(2 * offset + 1, 2 * depth - 1);
            let bottom = Slope::new(2 * offset - 1, 2 * depth + 1);
            if !(current_start.greater_or_equal(&bottom) && top.greater_than(&end)) {
                continue;
            }

            let pos = octant_to_grid(scan.origin, depth, offset, scan.octant);
            let opaque = !scan.world.is_transparent(pos);
            let in_radius = depth * depth + offset * offset <= scan.radius * scan.radius;
            if in_radius && (scan.light_walls || !opaque) {
                self.set_visible(pos);
            }

            if opaque {
                if !blocked {
                    self.scan_row(scan, depth + 1, current_start, top);
                    blocked = true;
                }
                current_start = bottom;
            } else {
                blocked = false;
            }
        }

        if !blocked {
            self.scan_row(scan, depth + 1, current_start, end);
        }
    }
}
