use crate::core::prelude::*;
use crate::mario::entity::{Body, Collidable, Renderable, Updatable};
use crate::mario::map::{MapCommands, ObjectContext};
use crate::mario::TILE_SIZE;
use std::time::Duration;

/// A power-up that slides along the ground. After [`Mushroom::LIFETIME`] it flickers for
/// [`Mushroom::FLICKER_DURATION`] and then disappears.
pub struct Mushroom {
    id: ObjectId,
    body: Body,
    direction: f32,
    is_alive: bool,
    age: Duration,
    flicker_start: Option<Duration>,
    sprite: Sprite,
    coroutine: Option<Coroutine<Mushroom, MapCommands>>,
}

impl Mushroom {
    pub const LIFETIME: Duration = Duration::from_millis(6000);
    pub const FLICKER_DURATION: Duration = Duration::from_millis(2000);
    const FLICKER_PERIOD_MS: u128 = 100;
    const SPEED: f32 = 30.;
    const GRAVITY: f32 = 800.;

    pub fn new(top_left: Vec2, texture_id: TextureId) -> Self {
        Self {
            id: ObjectId::next(),
            body: Body::new(top_left, Vec2::splat(TILE_SIZE)),
            direction: 1.,
            is_alive: true,
            age: Duration::ZERO,
            flicker_start: None,
            sprite: Sprite::from_single_extent(
                texture_id,
                Vec2i { x: 16, y: 16 },
                Vec2i { x: 0, y: 8 },
            ),
            coroutine: Some(Coroutine::after(
                Self::LIFETIME,
                |this: &mut Mushroom, commands: &mut MapCommands, state| match state {
                    CoroutineState::Starting => {
                        this.flicker_start = Some(this.age);
                        CoroutineResponse::Wait(Self::FLICKER_DURATION)
                    }
                    _ => {
                        this.is_alive = false;
                        commands.remove_mushroom(this.id);
                        CoroutineResponse::Complete
                    }
                },
            )),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }
    pub fn is_alive(&self) -> bool {
        self.is_alive
    }
    pub fn direction(&self) -> f32 {
        self.direction
    }
    pub fn is_flickering(&self) -> bool {
        self.is_alive && self.flicker_start.is_some()
    }

    pub fn on_collide_with_player(&mut self) {
        self.is_alive = false;
    }

    fn alpha(&self) -> f32 {
        let Some(start) = self.flicker_start else {
            return 1.;
        };
        let flicker_ms = self.age.saturating_sub(start).as_millis();
        if (flicker_ms / Self::FLICKER_PERIOD_MS) % 2 == 0 {
            0.5
        } else {
            1.
        }
    }
}

impl Updatable for Mushroom {
    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        let delta = ctx.delta();
        self.age += delta;
        if self.is_alive {
            self.body.walk_with_gravity(
                ctx.terrain(),
                &mut self.direction,
                Self::SPEED,
                Self::GRAVITY,
                delta.as_secs_f32(),
            );
        }
        if let Some(coroutine) = self.coroutine.take() {
            self.coroutine = coroutine.resume(self, ctx.commands(), delta);
        }
    }
}

impl Renderable for Mushroom {
    fn render(&self, renderer: &mut dyn RenderContext) {
        if !self.is_alive {
            return;
        }
        self.sprite.render(
            renderer,
            RenderInfo::at(self.body.position).with_alpha(self.alpha()),
        );
    }
}

impl Collidable for Mushroom {
    fn body(&self) -> &Body {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::test_util::RecordingRenderer;
    use crate::mario::map::Map;
    use crate::mario::test_util::{flat_map, grid, run_map, texture, FRAME};

    fn single(map: &Map) -> &Mushroom {
        &map.mushrooms[0]
    }

    #[test]
    fn lands_on_tile_boundary() {
        let mut map = flat_map();
        map.mushrooms.push(Mushroom::new(Vec2 { x: 32., y: 130. }, texture()));
        run_map(&mut map, 50);
        assert_eq!(single(&map).body().position.y, 144.);
        assert_eq!(single(&map).body().velocity.y, 0.);
        assert!(single(&map).body().position.x > 32.);
    }

    #[test]
    fn reverses_at_wall_on_next_tick() {
        let mut map = Map::new(grid("\
....#
....#
#####"));
        // Right edge just short of the wall column.
        map.mushrooms.push(Mushroom::new(Vec2 { x: 47.9, y: 16. }, texture()));
        map.update(FRAME);
        assert_eq!(single(&map).direction(), -1.);
        let x = single(&map).body().position.x;
        map.update(FRAME);
        assert!(single(&map).body().position.x < x);
    }

    #[test]
    fn reverses_at_left_wall_too() {
        let mut map = Map::new(grid("\
#....
#....
#####"));
        map.mushrooms.push(Mushroom::new(Vec2 { x: 16.2, y: 16. }, texture()));
        map.mushrooms[0].direction = -1.;
        map.update(FRAME);
        assert_eq!(single(&map).direction(), 1.);
        let x = single(&map).body().position.x;
        map.update(FRAME);
        assert!(single(&map).body().position.x > x);
    }

    #[test]
    fn lands_on_tile_boundary_from_any_approach() {
        for start_y in [129.3, 131.77, 137.01, 140.5, 143.99] {
            for vy in [0., 37.5, 120., 250.] {
                let mut map = flat_map();
                map.mushrooms.push(Mushroom::new(Vec2 { x: 32., y: start_y }, texture()));
                map.mushrooms[0].body.velocity.y = vy;
                run_map(&mut map, 60);
                assert_eq!(single(&map).body().position.y, 144., "from y={start_y}, vy={vy}");
                assert_eq!(single(&map).body().velocity.y, 0.);
            }
        }
    }

    #[test]
    fn collision_with_player_is_idempotent() {
        let mut map = flat_map();
        map.mushrooms.push(Mushroom::new(Vec2 { x: 32., y: 144. }, texture()));
        map.mushrooms[0].on_collide_with_player();
        map.mushrooms[0].on_collide_with_player();
        assert!(!single(&map).is_alive());

        // Stays listed, frozen and hidden, until its despawn fires.
        let position = single(&map).body().position;
        run_map(&mut map, 10);
        assert_eq!(single(&map).body().position, position);
        let mut renderer = RecordingRenderer::default();
        map.render(&mut renderer);
        assert!(renderer.draws.is_empty());
    }

    #[test]
    fn flickers_then_despawns_on_schedule() {
        let mut map = flat_map();
        map.mushrooms.push(Mushroom::new(Vec2 { x: 16., y: 144. }, texture()));
        run_map(&mut map, 599);
        assert!(!single(&map).is_flickering());
        run_map(&mut map, 1);
        assert!(single(&map).is_flickering());
        assert_eq!(single(&map).alpha(), 0.5);
        run_map(&mut map, 10);
        assert_eq!(single(&map).alpha(), 1.);
        run_map(&mut map, 10);
        assert_eq!(single(&map).alpha(), 0.5);

        // 8000 ms in total, never earlier.
        run_map(&mut map, 179);
        assert_eq!(map.mushrooms.len(), 1);
        assert!(single(&map).is_alive());
        run_map(&mut map, 1);
        assert!(map.mushrooms.is_empty());
    }
}
