pub mod block;
pub mod coin;
pub mod enemy;
pub mod entity;
pub mod level;
pub mod map;
pub mod mushroom;
pub mod player;
pub mod sound;

pub use sound::{SoundLog, SoundName, SoundPlayer, Sounds, TracingSoundPlayer};

pub const TILE_SIZE: f32 = 16.;

pub const MARIO_SHEET: &str = "res/mario_sheet.png";
pub const WORLD_SHEET: &str = "res/world_sheet.png";
pub const ENEMIES_SHEET: &str = "res/enemies_sheet.png";

/// Converts an NES speed, given in pixels per frame plus sub-pixel digits (base 16), to pixels
/// per second. The NES runs at 60 frames per second.
pub const fn from_nes(pixels: u8, subpixels: u8, subsubpixels: u8, subsubsubpixels: u8) -> f32 {
    let per_frame = pixels as f32
        + subpixels as f32 / 16.
        + subsubpixels as f32 / 256.
        + subsubsubpixels as f32 / 4096.;
    per_frame * 60.
}
/// As [`from_nes`], for an acceleration: pixels per second squared.
pub const fn from_nes_accel(
    pixels: u8,
    subpixels: u8,
    subsubpixels: u8,
    subsubsubpixels: u8,
) -> f32 {
    from_nes(pixels, subpixels, subsubpixels, subsubsubpixels) * 60.
}

pub const BASE_GRAVITY: f32 = from_nes_accel(0, 7, 0, 0);

#[cfg(test)]
pub(crate) mod test_util {
    use crate::core::prelude::*;
    use crate::core::render::TextureRegistry;
    use crate::mario::map::{Map, TileGrid};
    use crate::mario::{SoundLog, Sounds};
    use std::time::Duration;

    pub(crate) const FRAME: Duration = Duration::from_millis(10);

    /// 20 tiles wide, 12 high; rows 10 and 11 are solid ground, so the ground's top edge sits
    /// at y = 160.
    pub(crate) const FLAT: &str = "\
....................
....................
....................
....................
....................
....................
....................
....................
....................
....................
####################
####################";

    pub(crate) fn grid(text: &str) -> TileGrid {
        match TileGrid::from_ascii(text) {
            Ok(grid) => grid,
            Err(e) => panic!("bad test level: {e:?}"),
        }
    }

    pub(crate) fn flat_map() -> Map {
        Map::new(grid(FLAT))
    }

    pub(crate) fn sounds() -> (Sounds, SoundLog) {
        let log = SoundLog::default();
        (Sounds::new(log.clone()), log)
    }

    pub(crate) fn texture() -> TextureId {
        TextureRegistry::new().texture(crate::mario::WORLD_SHEET)
    }

    pub(crate) fn run_map(map: &mut Map, frames: usize) {
        for _ in 0..frames {
            map.update(FRAME);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nes_units_convert_to_pixels_per_second() {
        assert_eq!(from_nes(1, 0, 0, 0), 60.);
        assert_eq!(from_nes(0, 8, 0, 0), 30.);
        assert_eq!(from_nes_accel(0, 1, 0, 0), 225.);
        assert_eq!(BASE_GRAVITY, 1575.);
    }
}
