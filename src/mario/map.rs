use crate::core::prelude::*;
use crate::mario::block::Block;
use crate::mario::coin::Coin;
use crate::mario::enemy::Stompable;
use crate::mario::entity::{Renderable, Updatable};
use crate::mario::mushroom::Mushroom;
use crate::mario::TILE_SIZE;
use crate::warn_every_seconds;
use std::time::Duration;

/// Tile solidity, queried by tile coordinates. Coordinates outside the map are never solid.
pub trait TileMap {
    fn is_solid_tile_at(&self, tile_x: i32, tile_y: i32) -> bool;
    fn height_in_tiles(&self) -> i32;

    fn tile_size(&self) -> f32 {
        TILE_SIZE
    }
    fn pixel_height(&self) -> f32 {
        self.height_in_tiles() as f32 * self.tile_size()
    }
}

#[derive(Clone, Debug)]
pub struct TileGrid {
    width: i32,
    height: i32,
    solid: Vec<bool>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        check_gt!(width, 0);
        check_gt!(height, 0);
        Self {
            width,
            height,
            solid: vec![false; (width * height) as usize],
        }
    }

    /// Parses one line per row: `#` is solid, anything else is empty.
    pub fn from_ascii(text: &str) -> Result<Self> {
        let lines = text.lines().collect_vec();
        let Some(width) = lines.first().map(|line| line.chars().count()) else {
            bail!("empty tile map");
        };
        if width == 0 {
            bail!("empty tile map");
        }
        if let Some((y, line)) = lines
            .iter()
            .find_position(|line| line.chars().count() != width)
        {
            bail!(
                "row {y} has {} tiles, expected {width}",
                line.chars().count()
            );
        }
        let mut grid = Self::new(i32::try_from(width)?, i32::try_from(lines.len())?);
        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                grid.set_solid(x as i32, y as i32, c == '#');
            }
        }
        Ok(grid)
    }

    pub fn set_solid(&mut self, tile_x: i32, tile_y: i32, solid: bool) {
        if let Some(index) = self.index(tile_x, tile_y) {
            self.solid[index] = solid;
        } else {
            warn!("set_solid() out of range: ({tile_x}, {tile_y})");
        }
    }

    fn index(&self, tile_x: i32, tile_y: i32) -> Option<usize> {
        if (0..self.width).contains(&tile_x) && (0..self.height).contains(&tile_y) {
            Some((tile_y * self.width + tile_x) as usize)
        } else {
            None
        }
    }
}

impl TileMap for TileGrid {
    fn is_solid_tile_at(&self, tile_x: i32, tile_y: i32) -> bool {
        self.index(tile_x, tile_y)
            .is_some_and(|index| self.solid[index])
    }
    fn height_in_tiles(&self) -> i32 {
        self.height
    }
}

/// A change to the map's object lists, queued during the update pass and applied after it.
pub enum MapCommand {
    SpawnCoin(Coin),
    SpawnMushroom(Mushroom),
    RemoveCoin(ObjectId),
    RemoveMushroom(ObjectId),
    RemoveGoomba(ObjectId),
}

#[derive(Default)]
pub struct MapCommands {
    queue: Vec<MapCommand>,
}

impl MapCommands {
    pub fn spawn_coin(&mut self, coin: Coin) {
        self.queue.push(MapCommand::SpawnCoin(coin));
    }
    pub fn spawn_mushroom(&mut self, mushroom: Mushroom) {
        self.queue.push(MapCommand::SpawnMushroom(mushroom));
    }
    pub fn remove_coin(&mut self, id: ObjectId) {
        self.queue.push(MapCommand::RemoveCoin(id));
    }
    pub fn remove_mushroom(&mut self, id: ObjectId) {
        self.queue.push(MapCommand::RemoveMushroom(id));
    }
    pub fn remove_goomba(&mut self, id: ObjectId) {
        self.queue.push(MapCommand::RemoveGoomba(id));
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
    fn take(&mut self) -> Vec<MapCommand> {
        std::mem::take(&mut self.queue)
    }
}

/// What an object sees while updating.
pub struct ObjectContext<'a> {
    delta: Duration,
    terrain: &'a dyn TileMap,
    commands: &'a mut MapCommands,
}

impl<'a> ObjectContext<'a> {
    pub fn new(delta: Duration, terrain: &'a dyn TileMap, commands: &'a mut MapCommands) -> Self {
        Self {
            delta,
            terrain,
            commands,
        }
    }

    pub fn delta(&self) -> Duration {
        self.delta
    }
    pub fn terrain(&self) -> &'a dyn TileMap {
        self.terrain
    }
    pub fn commands(&mut self) -> &mut MapCommands {
        self.commands
    }
}

/// Tiles plus blocks, as seen by anything moving through the map.
struct Terrain<'a> {
    tiles: &'a dyn TileMap,
    blocks: &'a [Block],
}

impl TileMap for Terrain<'_> {
    fn is_solid_tile_at(&self, tile_x: i32, tile_y: i32) -> bool {
        let tile = Vec2i { x: tile_x, y: tile_y };
        self.tiles.is_solid_tile_at(tile_x, tile_y)
            || self
                .blocks
                .iter()
                .any(|block| block.tile(self.tiles.tile_size()) == tile)
    }
    fn height_in_tiles(&self) -> i32 {
        self.tiles.height_in_tiles()
    }
    fn tile_size(&self) -> f32 {
        self.tiles.tile_size()
    }
}

/// The level's tiles and the dynamic objects living in it.
pub struct Map {
    tiles: Box<dyn TileMap>,
    pub coins: Vec<Coin>,
    pub mushrooms: Vec<Mushroom>,
    pub goombas: Vec<Box<dyn Stompable>>,
    pub blocks: Vec<Block>,
    commands: MapCommands,
}

impl Map {
    pub fn new(tiles: impl TileMap + 'static) -> Self {
        Self {
            tiles: Box::new(tiles),
            coins: Vec::new(),
            mushrooms: Vec::new(),
            goombas: Vec::new(),
            blocks: Vec::new(),
            commands: MapCommands::default(),
        }
    }

    pub fn block_at_mut(&mut self, tile: Vec2i) -> Option<&mut Block> {
        let tile_size = self.tiles.tile_size();
        self.blocks
            .iter_mut()
            .find(|block| block.tile(tile_size) == tile)
    }

    /// Updates blocks, coins, mushrooms and goombas in that order, then applies every spawn and
    /// removal they queued.
    pub fn update(&mut self, delta: Duration) {
        let Self {
            tiles,
            coins,
            mushrooms,
            goombas,
            blocks,
            commands,
        } = self;
        {
            let mut ctx = ObjectContext::new(delta, &**tiles, commands);
            for block in blocks.iter_mut() {
                block.update(&mut ctx);
            }
            for coin in coins.iter_mut() {
                coin.update(&mut ctx);
            }
        }
        let terrain = Terrain {
            tiles: &**tiles,
            blocks,
        };
        let mut ctx = ObjectContext::new(delta, &terrain, commands);
        for mushroom in mushrooms.iter_mut() {
            mushroom.update(&mut ctx);
        }
        for goomba in goombas.iter_mut() {
            goomba.update(&mut ctx);
        }
        self.apply_commands();
    }

    fn apply_commands(&mut self) {
        for command in self.commands.take() {
            match command {
                MapCommand::SpawnCoin(coin) => self.coins.push(coin),
                MapCommand::SpawnMushroom(mushroom) => self.mushrooms.push(mushroom),
                MapCommand::RemoveCoin(id) => {
                    let len = self.coins.len();
                    self.coins.retain(|coin| coin.id() != id);
                    if self.coins.len() == len {
                        warn_every_seconds!(1, "remove: unknown coin {id}");
                    }
                }
                MapCommand::RemoveMushroom(id) => {
                    let len = self.mushrooms.len();
                    self.mushrooms.retain(|mushroom| mushroom.id() != id);
                    if self.mushrooms.len() == len {
                        warn_every_seconds!(1, "remove: unknown mushroom {id}");
                    }
                }
                MapCommand::RemoveGoomba(id) => {
                    let len = self.goombas.len();
                    self.goombas.retain(|goomba| goomba.id() != id);
                    if self.goombas.len() == len {
                        warn_every_seconds!(1, "remove: unknown goomba {id}");
                    }
                }
            }
        }
    }

    pub fn render(&self, renderer: &mut dyn RenderContext) {
        for block in &self.blocks {
            block.render(renderer);
        }
        for coin in &self.coins {
            coin.render(renderer);
        }
        for mushroom in &self.mushrooms {
            mushroom.render(renderer);
        }
        for goomba in &self.goombas {
            goomba.render(renderer);
        }
    }
}

impl TileMap for Map {
    fn is_solid_tile_at(&self, tile_x: i32, tile_y: i32) -> bool {
        Terrain {
            tiles: &*self.tiles,
            blocks: &self.blocks,
        }
        .is_solid_tile_at(tile_x, tile_y)
    }
    fn height_in_tiles(&self) -> i32 {
        self.tiles.height_in_tiles()
    }
    fn tile_size(&self) -> f32 {
        self.tiles.tile_size()
    }
}
