use crate::core::prelude::*;
use crate::mario::entity::{Body, Collidable, Renderable, Updatable};
use crate::mario::map::{MapCommands, ObjectContext};
use crate::mario::{SoundName, Sounds, TILE_SIZE};
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CoinKind {
    /// Placed in the level; the player collects it by touching it.
    Placed,
    /// Knocked out of a block; only shown while it pops.
    Popped,
}

pub struct Coin {
    id: ObjectId,
    body: Body,
    kind: CoinKind,
    is_collected: bool,
    sprite: Sprite,
    rise: Option<Tween>,
    coroutine: Option<Coroutine<Coin, MapCommands>>,
    sounds: Sounds,
}

impl Coin {
    const RISE_HEIGHT: f32 = 20.;
    const RISE_TIME: Duration = Duration::from_millis(200);
    const POP_TIME: Duration = Duration::from_millis(100);
    const DESPAWN_DELAY: Duration = Duration::from_millis(300);

    pub fn new(top_left: Vec2, texture_id: TextureId, sounds: Sounds) -> Self {
        let sprite = Sprite::from_tileset(
            texture_id,
            Vec2i { x: 3, y: 1 },
            Vec2i { x: 16, y: 16 },
            Vec2i { x: 298, y: 95 },
            Vec2i { x: 1, y: 0 },
        )
        .with_fixed_ms_per_frame(150)
        .with_frame_orders(vec![0, 1, 2, 1]);
        Self {
            id: ObjectId::next(),
            body: Body::new(top_left, Vec2::splat(TILE_SIZE)),
            kind: CoinKind::Placed,
            is_collected: false,
            sprite,
            rise: None,
            coroutine: None,
            sounds,
        }
    }

    /// A coin popping out of a block: rises to `to_y`, then disappears.
    pub fn popped(top_left: Vec2, to_y: f32, texture_id: TextureId, sounds: Sounds) -> Self {
        let mut coin = Self::new(top_left, texture_id, sounds);
        coin.kind = CoinKind::Popped;
        coin.is_collected = true;
        coin.rise = Some(Tween::new(top_left.y, to_y, Self::POP_TIME, Easing::EaseOutQuad));
        coin.coroutine = Some(Self::despawn_after(Self::POP_TIME));
        coin
    }

    fn despawn_after(delay: Duration) -> Coroutine<Coin, MapCommands> {
        Coroutine::after(delay, |this: &mut Coin, commands: &mut MapCommands, state| {
            match state {
                CoroutineState::Starting => CoroutineResponse::Wait(Self::DESPAWN_DELAY),
                _ => {
                    commands.remove_coin(this.id);
                    CoroutineResponse::Complete
                }
            }
        })
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }
    pub fn kind(&self) -> CoinKind {
        self.kind
    }
    pub fn is_collected(&self) -> bool {
        self.is_collected
    }

    /// Returns false if the coin was already collected.
    pub fn collect(&mut self) -> bool {
        if self.is_collected {
            return false;
        }
        self.is_collected = true;
        self.sounds.play(SoundName::Coin);
        let y = self.body.position.y;
        self.rise = Some(Tween::new(
            y,
            y - Self::RISE_HEIGHT,
            Self::RISE_TIME,
            Easing::EaseOutQuad,
        ));
        self.coroutine = Some(Self::despawn_after(Self::RISE_TIME));
        true
    }
}

impl Updatable for Coin {
    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        let delta = ctx.delta();
        self.sprite.update(delta);
        if let Some(rise) = self.rise.as_mut() {
            self.body.position.y = rise.advance(delta);
        }
        if let Some(coroutine) = self.coroutine.take() {
            self.coroutine = coroutine.resume(self, ctx.commands(), delta);
        }
    }
}

impl Renderable for Coin {
    fn render(&self, renderer: &mut dyn RenderContext) {
        if self.kind == CoinKind::Placed && self.is_collected {
            return;
        }
        self.sprite.render(renderer, RenderInfo::at(self.body.position));
    }
}

impl Collidable for Coin {
    fn body(&self) -> &Body {
        &self.body
    }
}
