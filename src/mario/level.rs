use crate::core::prelude::*;
use crate::mario::block::{Block, BlockItem};
use crate::mario::coin::Coin;
use crate::mario::enemy::goomba::Goomba;
use crate::mario::map::{Map, TileGrid};
use crate::mario::{Sounds, ENEMIES_SHEET, TILE_SIZE, WORLD_SHEET};

/// A map with its objects placed, plus where the player starts.
pub struct Level {
    pub map: Map,
    pub spawn: Vec2,
}

impl Level {
    /// One character per tile:
    /// - `#` ground
    /// - `?` coin block, `M` mushroom block
    /// - `o` coin
    /// - `g` goomba
    /// - `P` player start (exactly one)
    ///
    /// Anything else is empty space.
    pub fn from_ascii(text: &str, textures: &dyn TextureSource, sounds: &Sounds) -> Result<Self> {
        let tiles = TileGrid::from_ascii(text).context("while parsing level tiles")?;
        let world = textures.texture(WORLD_SHEET);
        let enemies = textures.texture(ENEMIES_SHEET);
        let mut map = Map::new(tiles);
        let mut spawn = None;
        for (y, line) in text.lines().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let top_left = Vec2::from(Vec2i {
                    x: i32::try_from(x)?,
                    y: i32::try_from(y)?,
                }) * TILE_SIZE;
                match c {
                    '?' => map.blocks.push(Block::new(
                        top_left,
                        BlockItem::Coin,
                        world,
                        sounds.clone(),
                    )),
                    'M' => map.blocks.push(Block::new(
                        top_left,
                        BlockItem::Mushroom,
                        world,
                        sounds.clone(),
                    )),
                    'o' => map.coins.push(Coin::new(top_left, world, sounds.clone())),
                    'g' => map
                        .goombas
                        .push(Box::new(Goomba::new(top_left, enemies, sounds.clone()))),
                    'P' => {
                        if spawn.replace(top_left).is_some() {
                            bail!("more than one player start, second at ({x}, {y})");
                        }
                    }
                    _ => {}
                }
            }
        }
        let spawn = spawn.ok_or_else(|| anyhow!("no player start"))?;
        info!(
            "loaded level: {} blocks, {} coins, {} goombas, start {spawn}",
            map.blocks.len(),
            map.coins.len(),
            map.goombas.len()
        );
        Ok(Self { map, spawn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::TextureRegistry;
    use crate::mario::map::TileMap;

    const LEVEL: &str = "\
..........
...?..M...
..........
.P..o...g.
##########";

    #[test]
    fn places_every_object() {
        let level = match Level::from_ascii(LEVEL, &TextureRegistry::new(), &Sounds::silent()) {
            Ok(level) => level,
            Err(e) => panic!("{e:?}"),
        };
        assert_eq!(level.spawn, Vec2 { x: 16., y: 48. });
        assert_eq!(level.map.blocks.len(), 2);
        assert_eq!(level.map.coins.len(), 1);
        assert_eq!(level.map.goombas.len(), 1);
        assert!(level.map.is_solid_tile_at(0, 4));
        assert!(level.map.is_solid_tile_at(3, 1));
        assert!(!level.map.is_solid_tile_at(4, 3));
    }

    #[test]
    fn needs_exactly_one_start() {
        let registry = TextureRegistry::new();
        let sounds = Sounds::silent();
        assert!(Level::from_ascii("....\n####", &registry, &sounds).is_err());
        assert!(Level::from_ascii(".PP.\n####", &registry, &sounds).is_err());
        assert!(Level::from_ascii(".P.\n####", &registry, &sounds).is_err());
    }
}
