use crate::core::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TextureId(usize);

/// A region of a texture, in texels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TextureSubArea {
    pub top_left: Vec2i,
    pub extent: Vec2i,
}

impl TextureSubArea {
    pub fn new(top_left: Vec2i, extent: Vec2i) -> Self {
        Self { top_left, extent }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderInfo {
    pub top_left: Vec2,
    pub alpha: f32,
    pub flip_x: bool,
}

impl Default for RenderInfo {
    fn default() -> Self {
        Self {
            top_left: Vec2::default(),
            alpha: 1.0,
            flip_x: false,
        }
    }
}

impl RenderInfo {
    pub fn at(top_left: Vec2) -> Self {
        Self {
            top_left,
            ..Default::default()
        }
    }
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
    #[must_use]
    pub fn with_flip_x(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }
}

/// The renderer port: whatever draws frames to the screen implements this.
pub trait RenderContext {
    fn draw(&mut self, texture_id: TextureId, area: TextureSubArea, info: RenderInfo);
}

/// The asset port: resolves an image file to a texture handle.
pub trait TextureSource {
    fn texture(&self, filename: &str) -> TextureId;
}

/// Hands out a stable [`TextureId`] per filename, in order of first request. Decoding is left
/// to the renderer.
#[derive(Default)]
pub struct TextureRegistry {
    ids: std::cell::RefCell<BTreeMap<String, TextureId>>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureSource for TextureRegistry {
    fn texture(&self, filename: &str) -> TextureId {
        let mut ids = self.ids.borrow_mut();
        let next = TextureId(ids.len());
        *ids.entry(filename.to_string()).or_insert(next)
    }
}

/// An animated sprite: a sequence of frames on one texture, each shown for a fixed time.
#[derive(Clone, Debug, Default)]
pub struct Sprite {
    texture_id: TextureId,
    areas: Vec<TextureSubArea>,
    frame_time_ms: Vec<u32>,
    elapsed: Duration,
    frame: usize,
}

impl Sprite {
    pub fn from_single_extent(texture_id: TextureId, extent: Vec2i, top_left: Vec2i) -> Self {
        Self::from_tileset(texture_id, Vec2i { x: 1, y: 1 }, extent, top_left, Vec2i::default())
    }

    pub fn from_tileset(
        texture_id: TextureId,
        tile_count: Vec2i,
        tile_size: Vec2i,
        offset: Vec2i,
        margin: Vec2i,
    ) -> Self {
        let areas = (0..tile_count.y)
            .cartesian_product(0..tile_count.x)
            .map(|(tile_y, tile_x)| {
                let top_left = offset
                    + Vec2i::right() * (tile_x * (tile_size.x + margin.x))
                    + Vec2i::down() * (tile_y * (tile_size.y + margin.y));
                TextureSubArea::new(top_left, tile_size)
            })
            .collect_vec();
        let frame_time_ms = vec![1000; areas.len()];
        Self {
            texture_id,
            areas,
            frame_time_ms,
            elapsed: Duration::ZERO,
            frame: 0,
        }
    }

    #[must_use]
    pub fn with_fixed_ms_per_frame(mut self, ms: u32) -> Self {
        self.frame_time_ms = vec![ms; self.areas.len()];
        self
    }
    #[must_use]
    pub fn with_frame_orders(mut self, frames: Vec<usize>) -> Self {
        self.areas = frames.into_iter().map(|i| self.areas[i]).collect_vec();
        let ms = self.frame_time_ms.first().copied().unwrap_or(1000);
        self.frame_time_ms = vec![ms; self.areas.len()];
        self
    }

    pub fn ready(&self) -> bool {
        !self.areas.is_empty()
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.frame = 0;
    }

    pub fn update(&mut self, delta: Duration) {
        if self.areas.len() <= 1 {
            return;
        }
        self.elapsed += delta;
        let total_ms = u128::from(self.frame_time_ms.iter().sum::<u32>());
        let cycle_elapsed_ms = self.elapsed.as_millis() % total_ms.max(1);
        let mut cum_sum_ms = 0;
        self.frame = self
            .frame_time_ms
            .iter()
            .take_while(|&&ms| {
                cum_sum_ms += u128::from(ms);
                cycle_elapsed_ms >= cum_sum_ms
            })
            .count();
        check_lt!(self.frame, self.areas.len());
    }

    pub fn current_frame(&self) -> TextureSubArea {
        self.areas[self.frame]
    }

    pub fn render(&self, renderer: &mut dyn RenderContext, info: RenderInfo) {
        if self.ready() {
            renderer.draw(self.texture_id, self.current_frame(), info);
        }
    }
}
