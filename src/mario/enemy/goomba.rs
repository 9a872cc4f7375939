use crate::core::prelude::*;
use crate::mario::enemy::Stompable;
use crate::mario::entity::{Body, Collidable, Renderable, Updatable};
use crate::mario::map::{MapCommands, ObjectContext};
use crate::mario::{SoundName, Sounds, BASE_GRAVITY, TILE_SIZE};
use std::time::Duration;

pub struct Goomba {
    id: ObjectId,
    body: Body,
    direction: f32,
    dead: bool,
    sprite: Sprite,
    die_sprite: Sprite,
    coroutine: Option<Coroutine<Goomba, MapCommands>>,
    sounds: Sounds,
}

impl Goomba {
    const SPEED: f32 = 30.;
    const DESPAWN_DELAY: Duration = Duration::from_millis(300);

    pub fn new(top_left: Vec2, texture_id: TextureId, sounds: Sounds) -> Self {
        Self {
            id: ObjectId::next(),
            body: Body::new(top_left, Vec2::splat(TILE_SIZE)),
            direction: -1.,
            dead: false,
            sprite: Sprite::from_tileset(
                texture_id,
                Vec2i { x: 2, y: 1 },
                Vec2i { x: 16, y: 16 },
                Vec2i { x: 0, y: 16 },
                Vec2i { x: 2, y: 0 },
            )
            .with_fixed_ms_per_frame(200),
            die_sprite: Sprite::from_single_extent(
                texture_id,
                Vec2i { x: 16, y: 16 },
                Vec2i { x: 36, y: 16 },
            ),
            coroutine: None,
            sounds,
        }
    }
}

impl Stompable for Goomba {
    fn id(&self) -> ObjectId {
        self.id
    }
    fn stomp(&mut self) {
        if self.dead {
            return;
        }
        self.dead = true;
        self.body.velocity = Vec2::zero();
        self.sounds.play(SoundName::Stomp);
        self.coroutine = Some(Coroutine::after(
            Self::DESPAWN_DELAY,
            |this: &mut Goomba, commands: &mut MapCommands, _state| {
                commands.remove_goomba(this.id);
                CoroutineResponse::Complete
            },
        ));
    }
    fn dead(&self) -> bool {
        self.dead
    }
}

impl Updatable for Goomba {
    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        let delta = ctx.delta();
        if !self.dead {
            self.sprite.update(delta);
            self.body.walk_with_gravity(
                ctx.terrain(),
                &mut self.direction,
                Self::SPEED,
                BASE_GRAVITY,
                delta.as_secs_f32(),
            );
        }
        if let Some(coroutine) = self.coroutine.take() {
            self.coroutine = coroutine.resume(self, ctx.commands(), delta);
        }
    }
}

impl Renderable for Goomba {
    fn render(&self, renderer: &mut dyn RenderContext) {
        let info = RenderInfo::at(self.body.position);
        if self.dead {
            self.die_sprite.render(renderer, info);
        } else {
            self.sprite.render(renderer, info);
        }
    }
}

impl Collidable for Goomba {
    fn body(&self) -> &Body {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mario::enemy::PlayerContact;
    use crate::mario::test_util::{flat_map, run_map, sounds, texture};

    fn player_at(y: f32, vy: f32) -> Body {
        let mut body = Body::new(Vec2 { x: 100., y }, Vec2::splat(16.));
        body.velocity.y = vy;
        body
    }

    #[test]
    fn stomp_from_above() {
        let (sounds, log) = sounds();
        let mut goomba = Goomba::new(Vec2 { x: 100., y: 144. }, texture(), sounds);
        assert_eq!(
            goomba.on_collide_with_player(&player_at(130., 120.)),
            PlayerContact::Stomped
        );
        assert!(goomba.dead());
        assert_eq!(
            goomba.on_collide_with_player(&player_at(130., 120.)),
            PlayerContact::Ignored
        );
        assert_eq!(log.count(SoundName::Stomp), 1);
    }

    #[test]
    fn side_contact_hurts_player() {
        let (sounds, _) = sounds();
        let mut goomba = Goomba::new(Vec2 { x: 100., y: 144. }, texture(), sounds);
        assert_eq!(
            goomba.on_collide_with_player(&player_at(144., 0.)),
            PlayerContact::HurtPlayer
        );
        assert!(!goomba.dead());
    }

    #[test]
    fn stomped_goomba_is_removed_after_delay() {
        let (sounds, _) = sounds();
        let mut map = flat_map();
        map.goombas.push(Box::new(Goomba::new(
            Vec2 { x: 100., y: 144. },
            texture(),
            sounds,
        )));
        run_map(&mut map, 10);
        assert!(map.goombas[0].body().position.x < 100.);
        map.goombas[0].stomp();
        run_map(&mut map, 29);
        assert_eq!(map.goombas.len(), 1);
        run_map(&mut map, 1);
        assert!(map.goombas.is_empty());
    }
}
