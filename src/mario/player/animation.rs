use crate::core::prelude::*;
use crate::mario::player::PlayerSize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum AnimationName {
    Idle,
    Walk,
    Jump,
    Fall,
    Skid,
    Grow,
    Shrink,
}

/// One sprite per [`AnimationName`], cut from `res/mario_sheet.png` for a given size. Growing
/// or shrinking swaps the whole set.
#[derive(Clone, Debug)]
pub struct PlayerAnimations {
    size: PlayerSize,
    idle: Sprite,
    walk: Sprite,
    jump: Sprite,
    fall: Sprite,
    skid: Sprite,
    grow: Sprite,
    shrink: Sprite,
}

impl PlayerAnimations {
    pub fn load(texture_id: TextureId, size: PlayerSize) -> Self {
        let (row, extent) = match size {
            PlayerSize::Small => (8, Vec2i { x: 16, y: 16 }),
            PlayerSize::Big => (32, Vec2i { x: 16, y: 32 }),
        };
        let single = |x| Sprite::from_single_extent(texture_id, extent, Vec2i { x, y: row });
        let transform = Sprite::from_tileset(
            texture_id,
            Vec2i { x: 3, y: 1 },
            Vec2i { x: 16, y: 32 },
            Vec2i { x: 136, y: 32 },
            Vec2i { x: 2, y: 0 },
        )
        .with_fixed_ms_per_frame(70);
        Self {
            size,
            idle: single(0),
            walk: Sprite::from_tileset(
                texture_id,
                Vec2i { x: 3, y: 1 },
                extent,
                Vec2i { x: 20, y: row },
                Vec2i { x: 2, y: 0 },
            )
            .with_fixed_ms_per_frame(110),
            jump: single(96),
            fall: single(96),
            skid: single(76),
            grow: transform.clone().with_frame_orders(vec![0, 1, 0, 1, 2]),
            shrink: transform.with_frame_orders(vec![2, 1, 2, 1, 0]),
        }
    }

    pub fn size(&self) -> PlayerSize {
        self.size
    }

    pub fn get(&self, name: AnimationName) -> &Sprite {
        match name {
            AnimationName::Idle => &self.idle,
            AnimationName::Walk => &self.walk,
            AnimationName::Jump => &self.jump,
            AnimationName::Fall => &self.fall,
            AnimationName::Skid => &self.skid,
            AnimationName::Grow => &self.grow,
            AnimationName::Shrink => &self.shrink,
        }
    }
    pub fn get_mut(&mut self, name: AnimationName) -> &mut Sprite {
        match name {
            AnimationName::Idle => &mut self.idle,
            AnimationName::Walk => &mut self.walk,
            AnimationName::Jump => &mut self.jump,
            AnimationName::Fall => &mut self.fall,
            AnimationName::Skid => &mut self.skid,
            AnimationName::Grow => &mut self.grow,
            AnimationName::Shrink => &mut self.shrink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn sizes_share_keys_but_not_frames() {
        let small = PlayerAnimations::load(TextureId::default(), PlayerSize::Small);
        let big = PlayerAnimations::load(TextureId::default(), PlayerSize::Big);
        assert_eq!(small.get(AnimationName::Idle).current_frame().extent.y, 16);
        assert_eq!(big.get(AnimationName::Idle).current_frame().extent.y, 32);
        assert_eq!(
            small.get(AnimationName::Grow).current_frame(),
            big.get(AnimationName::Grow).current_frame()
        );

        let mut walk = big.get(AnimationName::Walk).clone();
        walk.update(Duration::from_millis(110));
        assert_eq!(walk.current_frame().top_left, Vec2i { x: 38, y: 32 });
    }
}
