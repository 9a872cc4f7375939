use crate::core::prelude::*;
use crate::mario::map::{ObjectContext, TileMap};
use std::ops::RangeInclusive;

/// Position, size and velocity of anything that takes up space in the world. Positions are
/// top-left corners in pixels; velocities are in pixels per second.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub dimensions: Vec2,
    pub velocity: Vec2,
}

impl Body {
    pub fn new(position: Vec2, dimensions: Vec2) -> Self {
        Self {
            position,
            dimensions,
            velocity: Vec2::zero(),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.dimensions)
    }
    pub fn bottom(&self) -> f32 {
        self.position.y + self.dimensions.y
    }
    pub fn overlaps(&self, other: &Body) -> bool {
        self.rect().overlaps(&other.rect())
    }

    fn columns(&self, tile_size: f32) -> RangeInclusive<i32> {
        let first = (self.position.x / tile_size).floor() as i32;
        let last = ((self.position.x + self.dimensions.x - 1.) / tile_size).floor() as i32;
        first..=last
    }
    fn rows(&self, tile_size: f32) -> RangeInclusive<i32> {
        let first = (self.position.y / tile_size).floor() as i32;
        let last = ((self.position.y + self.dimensions.y - 1.) / tile_size).floor() as i32;
        first..=last
    }

    /// True if any tile directly under the bottom edge is solid.
    pub fn on_ground(&self, tiles: &dyn TileMap) -> bool {
        let tile_size = tiles.tile_size();
        let row = (self.bottom() / tile_size).floor() as i32;
        self.columns(tile_size)
            .any(|column| tiles.is_solid_tile_at(column, row))
    }

    /// True if the column at the leading edge (right edge when `direction > 0`, otherwise the
    /// left edge) holds a solid tile in any row the body spans.
    pub fn touching_wall(&self, tiles: &dyn TileMap, direction: f32) -> bool {
        let tile_size = tiles.tile_size();
        let edge = if direction > 0. {
            self.position.x + self.dimensions.x
        } else {
            self.position.x
        };
        let column = (edge / tile_size).floor() as i32;
        self.rows(tile_size)
            .any(|row| tiles.is_solid_tile_at(column, row))
    }

    /// The solid tile the top edge is inside, preferring the one nearest the horizontal centre.
    pub fn ceiling_tile(&self, tiles: &dyn TileMap) -> Option<Vec2i> {
        let tile_size = tiles.tile_size();
        let row = (self.position.y / tile_size).floor() as i32;
        let centre = self.rect().centre().x;
        self.columns(tile_size)
            .filter(|&column| tiles.is_solid_tile_at(column, row))
            .min_by(|&a, &b| {
                let da = ((a as f32 + 0.5) * tile_size - centre).abs();
                let db = ((b as f32 + 0.5) * tile_size - centre).abs();
                da.total_cmp(&db)
            })
            .map(|column| Vec2i { x: column, y: row })
    }

    /// Applies gravity, walks at `speed` in `direction` and resolves terrain contact: landing
    /// snaps the top edge to the tile grid and stops vertical motion, a wall at the leading
    /// edge reverses `direction`.
    pub fn walk_with_gravity(
        &mut self,
        terrain: &dyn TileMap,
        direction: &mut f32,
        speed: f32,
        gravity: f32,
        dt: f32,
    ) {
        self.velocity.y += gravity * dt;
        self.position.y += self.velocity.y * dt;
        self.velocity.x = *direction * speed;
        self.position.x += self.velocity.x * dt;

        let tile_size = terrain.tile_size();
        if self.on_ground(terrain) {
            self.position.y = (self.position.y / tile_size).floor() * tile_size;
            self.velocity.y = 0.;
        }
        if self.touching_wall(terrain, *direction) {
            *direction = -*direction;
        }
    }
}

pub trait Collidable {
    fn body(&self) -> &Body;

    fn collides_with(&self, other: &dyn Collidable) -> bool {
        self.body().overlaps(other.body())
    }
}

pub trait Updatable {
    fn update(&mut self, ctx: &mut ObjectContext<'_>);
}

pub trait Renderable {
    fn render(&self, renderer: &mut dyn RenderContext);
}
