use crate::core::prelude::*;
use crate::mario::coin::Coin;
use crate::mario::entity::{Body, Collidable, Renderable, Updatable};
use crate::mario::map::{MapCommands, ObjectContext};
use crate::mario::mushroom::Mushroom;
use crate::mario::{SoundName, Sounds, TILE_SIZE};
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BlockItem {
    Coin,
    Mushroom,
}

/// A question block. Hitting it from below bumps it and releases its item; it stays solid
/// afterwards and shows the empty frame once the bump has settled.
pub struct Block {
    id: ObjectId,
    body: Body,
    rest_y: f32,
    item: BlockItem,
    is_hit: bool,
    show_empty: bool,
    sprite: Sprite,
    empty_sprite: Sprite,
    bump: Option<Tween>,
    coroutine: Option<Coroutine<Block, MapCommands>>,
    texture_id: TextureId,
    sounds: Sounds,
}

impl Block {
    const BUMP_HEIGHT: f32 = 5.;
    const BUMP_TIME: Duration = Duration::from_millis(100);
    const COIN_POP_HEIGHT: f32 = 50.;

    pub fn new(top_left: Vec2, item: BlockItem, texture_id: TextureId, sounds: Sounds) -> Self {
        let sprite = Sprite::from_tileset(
            texture_id,
            Vec2i { x: 3, y: 1 },
            Vec2i { x: 16, y: 16 },
            Vec2i { x: 298, y: 78 },
            Vec2i { x: 1, y: 0 },
        )
        .with_fixed_ms_per_frame(150)
        .with_frame_orders(vec![0, 1, 2, 1]);
        let empty_sprite = Sprite::from_single_extent(
            texture_id,
            Vec2i { x: 16, y: 16 },
            Vec2i { x: 349, y: 78 },
        );
        Self {
            id: ObjectId::next(),
            body: Body::new(top_left, Vec2::splat(TILE_SIZE)),
            rest_y: top_left.y,
            item,
            is_hit: false,
            show_empty: false,
            sprite,
            empty_sprite,
            bump: None,
            coroutine: None,
            texture_id,
            sounds,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }
    pub fn item(&self) -> BlockItem {
        self.item
    }
    pub fn is_hit(&self) -> bool {
        self.is_hit
    }

    /// The tile this block occupies. Unaffected by the bump animation.
    pub fn tile(&self, tile_size: f32) -> Vec2i {
        Vec2 {
            x: self.body.position.x,
            y: self.rest_y,
        }
        .as_tile(tile_size)
    }

    /// Returns false if the block was already hit.
    pub fn hit(&mut self) -> bool {
        if self.is_hit {
            return false;
        }
        self.is_hit = true;
        info!("block {} hit, releasing {:?}", self.id, self.item);
        self.sounds.play(SoundName::Bump);
        self.bump = Some(Tween::new(
            self.rest_y,
            self.rest_y - Self::BUMP_HEIGHT,
            Self::BUMP_TIME,
            Easing::EaseInOutQuad,
        ));
        self.coroutine = Some(Coroutine::after(
            Self::BUMP_TIME,
            |this: &mut Block, commands: &mut MapCommands, state| match state {
                CoroutineState::Starting => {
                    this.bump = Some(Tween::new(
                        this.rest_y - Self::BUMP_HEIGHT,
                        this.rest_y,
                        Self::BUMP_TIME,
                        Easing::EaseInOutQuad,
                    ));
                    CoroutineResponse::Wait(Self::BUMP_TIME)
                }
                _ => {
                    this.bump = None;
                    this.body.position.y = this.rest_y;
                    this.show_empty = true;
                    this.release_item(commands);
                    CoroutineResponse::Complete
                }
            },
        ));
        true
    }

    fn release_item(&self, commands: &mut MapCommands) {
        let above = Vec2 {
            x: self.body.position.x,
            y: self.rest_y - TILE_SIZE,
        };
        match self.item {
            BlockItem::Mushroom => {
                self.sounds.play(SoundName::SproutItem);
                commands.spawn_mushroom(Mushroom::new(above, self.texture_id));
            }
            BlockItem::Coin => {
                self.sounds.play(SoundName::Coin);
                commands.spawn_coin(Coin::popped(
                    above,
                    self.rest_y - Self::COIN_POP_HEIGHT,
                    self.texture_id,
                    self.sounds.clone(),
                ));
            }
        }
    }
}

impl Updatable for Block {
    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        let delta = ctx.delta();
        if !self.show_empty {
            self.sprite.update(delta);
        }
        if let Some(bump) = self.bump.as_mut() {
            self.body.position.y = bump.advance(delta);
        }
        if let Some(coroutine) = self.coroutine.take() {
            self.coroutine = coroutine.resume(self, ctx.commands(), delta);
        }
    }
}

impl Renderable for Block {
    fn render(&self, renderer: &mut dyn RenderContext) {
        let info = RenderInfo::at(self.body.position);
        if self.show_empty {
            self.empty_sprite.render(renderer, info);
        } else {
            self.sprite.render(renderer, info);
        }
    }
}

impl Collidable for Block {
    fn body(&self) -> &Body {
        &self.body
    }
}
