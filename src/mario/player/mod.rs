use crate::core::prelude::*;
use crate::core::state_machine::RenderFallback;
use crate::mario::enemy::PlayerContact;
use crate::mario::entity::{Body, Collidable};
use crate::mario::map::{Map, TileMap};
use crate::mario::player::animation::{AnimationName, PlayerAnimations};
use crate::mario::player::state::{register_states, PlayerStateMachine};
use crate::mario::{from_nes, from_nes_accel, Sounds, BASE_GRAVITY, MARIO_SHEET, TILE_SIZE};
use std::time::Duration;

pub mod animation;
pub mod state;

pub use state::PlayerStateName;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PlayerSize {
    Small = 1,
    Big = 2,
}

impl PlayerSize {
    pub fn height(self) -> f32 {
        match self {
            PlayerSize::Small => TILE_SIZE,
            PlayerSize::Big => TILE_SIZE * Player::GROWTH_FACTOR,
        }
    }
}

/// What the player asked for this frame.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlayerIntent {
    /// -1 for left, 1 for right, 0 for neither (or both).
    pub direction: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
}

impl PlayerIntent {
    pub fn from_input(input: &InputHandler) -> Self {
        let direction = match (input.down(KeyCode::Left), input.down(KeyCode::Right)) {
            (true, false) => -1.,
            (false, true) => 1.,
            _ => 0.,
        };
        Self {
            direction,
            jump_pressed: input.pressed(KeyCode::Z),
            jump_held: input.down(KeyCode::Z),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum VerticalContact {
    Airborne,
    Landed,
    HitCeiling(Vec2i),
}

/// Everything about the player except its state machine. States act on this.
pub struct PlayerBody {
    body: Body,
    initial_position: Vec2,
    size: PlayerSize,
    facing_right: bool,
    jump_time: Duration,
    is_invincible: bool,
    invincibility_timer: Duration,
    intent: PlayerIntent,
    animations: PlayerAnimations,
    animation: AnimationName,
    texture_id: TextureId,
    sounds: Sounds,
}

impl PlayerBody {
    pub fn position(&self) -> Vec2 {
        self.body.position
    }
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }
    pub fn dimensions(&self) -> Vec2 {
        self.body.dimensions
    }
    pub fn size(&self) -> PlayerSize {
        self.size
    }
    pub fn facing_right(&self) -> bool {
        self.facing_right
    }
    pub fn is_invincible(&self) -> bool {
        self.is_invincible
    }
    pub fn animation(&self) -> AnimationName {
        self.animation
    }

    fn set_animation(&mut self, name: AnimationName) {
        self.animation = name;
        self.animations.get_mut(name).reset();
    }

    fn apply_gravity(&mut self, gravity: f32, dt: f32) {
        self.body.velocity.y = (self.body.velocity.y + gravity * dt).min(Player::MAX_FALL_SPEED);
    }

    fn air_control(&mut self, dt: f32) {
        let direction = self.intent.direction;
        if direction == 0. {
            return;
        }
        let vx = self.body.velocity.x;
        let accel = if vx * direction >= 0. {
            Player::AIR_ACCEL
        } else {
            Player::AIR_DECEL
        };
        let target = direction * Player::MAX_WALK_SPEED;
        self.body.velocity.x = if vx < target {
            (vx + accel * dt).min(target)
        } else {
            (vx - accel * dt).max(target)
        };
    }

    /// Moves horizontally; running into a wall snaps to the tile boundary and stops.
    fn step_horizontal(&mut self, terrain: &dyn TileMap, dt: f32) {
        let vx = self.body.velocity.x;
        if vx == 0. {
            return;
        }
        self.body.position.x += vx * dt;
        if self.body.touching_wall(terrain, vx) {
            let tile_size = terrain.tile_size();
            self.body.position.x = if vx > 0. {
                let right = self.body.position.x + self.body.dimensions.x;
                (right / tile_size).floor() * tile_size - self.body.dimensions.x
            } else {
                ((self.body.position.x / tile_size).floor() + 1.) * tile_size
            };
            self.body.velocity.x = 0.;
        }
    }

    /// Moves vertically; landing snaps the bottom edge to the tile grid, a ceiling snaps the
    /// top edge below the tile that was hit.
    fn step_vertical(&mut self, terrain: &dyn TileMap, dt: f32) -> VerticalContact {
        let vy = self.body.velocity.y;
        self.body.position.y += vy * dt;
        let tile_size = terrain.tile_size();
        if vy >= 0. && self.body.on_ground(terrain) {
            let bottom = (self.body.bottom() / tile_size).floor() * tile_size;
            self.body.position.y = bottom - self.body.dimensions.y;
            self.body.velocity.y = 0.;
            return VerticalContact::Landed;
        }
        if vy < 0. {
            if let Some(tile) = self.body.ceiling_tile(terrain) {
                self.body.position.y = (tile.y + 1) as f32 * tile_size;
                self.body.velocity.y = 0.;
                return VerticalContact::HitCeiling(tile);
            }
        }
        VerticalContact::Airborne
    }

    /// Changes height keeping the bottom edge in place.
    fn set_height(&mut self, height: f32) {
        let bottom = self.body.bottom();
        self.body.dimensions.y = height;
        self.body.position.y = bottom - height;
    }

    fn alpha(&self) -> f32 {
        let blink = (self.invincibility_timer.as_millis() / Player::BLINK_PERIOD_MS) % 2 == 0;
        if self.is_invincible && blink {
            0.5
        } else {
            1.
        }
    }
}

impl Collidable for PlayerBody {
    fn body(&self) -> &Body {
        &self.body
    }
}

impl RenderFallback for PlayerBody {
    fn render_fallback(&self, renderer: &mut dyn RenderContext) {
        let sprite = self.animations.get(self.animation);
        let extent = Vec2::from(sprite.current_frame().extent);
        let top_left = Vec2 {
            x: self.body.position.x + (self.body.dimensions.x - extent.x) / 2.,
            y: self.body.bottom() - extent.y,
        };
        sprite.render(
            renderer,
            RenderInfo::at(top_left)
                .with_alpha(self.alpha())
                .with_flip_x(!self.facing_right),
        );
    }
}

pub struct Player {
    body: PlayerBody,
    state_machine: PlayerStateMachine,
}

// For a guide to Super Mario Bros. (NES) physics, see:
// https://web.archive.org/web/20130807122227/http://i276.photobucket.com/albums/kk21/jdaster64/smb_playerphysics.png
impl Player {
    const MIN_WALK_SPEED: f32 = from_nes(0, 1, 3, 0);
    const MAX_WALK_SPEED: f32 = from_nes(1, 9, 0, 0);
    const WALK_ACCEL: f32 = from_nes_accel(0, 0, 9, 8);
    const RELEASE_DECEL: f32 = from_nes_accel(0, 0, 14, 0);
    const SKID_DECEL: f32 = from_nes_accel(0, 1, 10, 0);
    const SKID_TURNAROUND: f32 = from_nes(0, 9, 0, 0);
    const AIR_ACCEL: f32 = from_nes_accel(0, 0, 9, 8);
    const AIR_DECEL: f32 = from_nes_accel(0, 0, 14, 4);
    const JUMP_SPEED: f32 = from_nes(4, 1, 0, 0);
    const GRAVITY: f32 = BASE_GRAVITY;
    const HOLD_GRAVITY: f32 = from_nes_accel(0, 2, 0, 0);
    const MAX_FALL_SPEED: f32 = from_nes(4, 8, 0, 0);
    const MAX_JUMP_HOLD: Duration = Duration::from_millis(300);

    const GROWTH_FACTOR: f32 = 1.3;
    const TRANSFORM_TIME: Duration = Duration::from_millis(700);
    const INVINCIBILITY_TIME: Duration = Duration::from_secs(2);
    const BLINK_PERIOD_MS: u128 = 100;

    pub fn new(spawn: Vec2, textures: &dyn TextureSource, sounds: Sounds, map: &mut Map) -> Self {
        let texture_id = textures.texture(MARIO_SHEET);
        let mut body = PlayerBody {
            body: Body::new(spawn, Vec2::splat(TILE_SIZE)),
            initial_position: spawn,
            size: PlayerSize::Small,
            facing_right: true,
            jump_time: Duration::ZERO,
            is_invincible: false,
            invincibility_timer: Duration::ZERO,
            intent: PlayerIntent::default(),
            animations: PlayerAnimations::load(texture_id, PlayerSize::Small),
            animation: AnimationName::Idle,
            texture_id,
            sounds,
        };
        let mut state_machine = PlayerStateMachine::new();
        register_states(&mut state_machine);
        state_machine.change(PlayerStateName::Idling, &mut body, map);
        Self {
            body,
            state_machine,
        }
    }

    pub fn body(&self) -> &PlayerBody {
        &self.body
    }
    pub fn state(&self) -> Option<PlayerStateName> {
        self.state_machine.current()
    }

    pub fn update(&mut self, delta: Duration, input: &InputHandler, map: &mut Map) {
        self.body.intent = PlayerIntent::from_input(input);
        self.update_invincibility(delta);
        self.collect_coins(map);
        self.eat_mushrooms(map);
        if !self.body.is_invincible {
            self.touch_enemies(map);
        }
        self.body.animations.get_mut(self.body.animation).update(delta);
        self.state_machine.update(&mut self.body, map, delta);
        if self.body.body.position.y > map.pixel_height() {
            info!("fell out of the map");
            self.die(map);
        }
    }

    pub fn render(&self, renderer: &mut dyn RenderContext) {
        self.state_machine.render(&self.body, renderer);
    }

    /// Big players shrink and become briefly invincible; small players go back to the start.
    pub fn die(&mut self, map: &mut Map) {
        match self.body.size {
            PlayerSize::Big => {
                self.shrink(map);
                self.body.is_invincible = true;
                self.body.invincibility_timer = Self::INVINCIBILITY_TIME;
            }
            PlayerSize::Small => {
                info!("respawning at {}", self.body.initial_position);
                self.body.body.position = self.body.initial_position;
                self.body.body.velocity = Vec2::zero();
            }
        }
    }

    fn grow(&mut self, map: &mut Map) {
        info!("growing");
        self.set_size(PlayerSize::Big);
        self.state_machine
            .change(PlayerStateName::Growing, &mut self.body, map);
    }
    fn shrink(&mut self, map: &mut Map) {
        info!("shrinking");
        self.set_size(PlayerSize::Small);
        self.state_machine
            .change(PlayerStateName::Shrinking, &mut self.body, map);
    }
    fn set_size(&mut self, size: PlayerSize) {
        self.body.size = size;
        self.body.animations = PlayerAnimations::load(self.body.texture_id, size);
    }

    fn update_invincibility(&mut self, delta: Duration) {
        if !self.body.is_invincible {
            return;
        }
        self.body.invincibility_timer = self.body.invincibility_timer.saturating_sub(delta);
        if self.body.invincibility_timer.is_zero() {
            self.body.is_invincible = false;
        }
    }

    fn collect_coins(&mut self, map: &mut Map) {
        for coin in map.coins.iter_mut().filter(|coin| !coin.is_collected()) {
            if self.body.collides_with(coin) {
                coin.collect();
            }
        }
    }

    fn eat_mushrooms(&mut self, map: &mut Map) {
        let mut should_grow = false;
        for mushroom in map.mushrooms.iter_mut().filter(|m| m.is_alive()) {
            if self.body.collides_with(mushroom) {
                mushroom.on_collide_with_player();
                should_grow |= self.body.size == PlayerSize::Small;
            }
        }
        if should_grow {
            self.grow(map);
        }
    }

    fn touch_enemies(&mut self, map: &mut Map) {
        let mut stomped = false;
        let mut hurt = false;
        for enemy in map.goombas.iter_mut().filter(|enemy| !enemy.dead()) {
            if !self.body.body.overlaps(enemy.body()) {
                continue;
            }
            match enemy.on_collide_with_player(&self.body.body) {
                PlayerContact::Stomped => stomped = true,
                PlayerContact::HurtPlayer => hurt = true,
                PlayerContact::Ignored => {}
            }
        }
        if hurt {
            self.die(map);
        } else if stomped {
            self.body.body.velocity.y = -Self::JUMP_SPEED;
            self.state_machine
                .change(PlayerStateName::Falling, &mut self.body, map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::test_util::RecordingRenderer;
    use crate::core::render::TextureRegistry;
    use crate::mario::block::{Block, BlockItem};
    use crate::mario::coin::Coin;
    use crate::mario::enemy::goomba::Goomba;
    use crate::mario::mushroom::Mushroom;
    use crate::mario::test_util::{flat_map, grid, sounds, texture, FLAT, FRAME};
    use crate::mario::{SoundLog, SoundName};

    const SPAWN: Vec2 = Vec2 { x: 32., y: 144. };

    /// Ground stops after column 5.
    const LEDGE_LEVEL: &str = "\
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
######..............
######..............";

    /// Walls at columns 1 and 6, either side of the spawn point.
    const WALLED_LEVEL: &str = "\
....................
....................
....................
....................
....................
....................
....................
....................
.#....#.............
.#....#.............
####################
####################";

    fn setup() -> (Player, Map, InputHandler, SoundLog) {
        let (sounds, log) = sounds();
        let mut map = flat_map();
        let player = Player::new(SPAWN, &TextureRegistry::new(), sounds, &mut map);
        (player, map, InputHandler::new(), log)
    }

    fn setup_on(level: &str, spawn: Vec2) -> (Player, Map, InputHandler) {
        let mut map = Map::new(grid(level));
        let player = Player::new(spawn, &TextureRegistry::new(), Sounds::silent(), &mut map);
        (player, map, InputHandler::new())
    }

    fn step(player: &mut Player, map: &mut Map, input: &mut InputHandler, frames: usize) {
        for _ in 0..frames {
            player.update(FRAME, input, map);
            input.update_step();
        }
    }

    fn grow_to_idle(player: &mut Player, map: &mut Map, input: &mut InputHandler) {
        map.mushrooms.push(Mushroom::new(SPAWN, texture()));
        step(player, map, input, 70);
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
    }

    #[test]
    fn starts_idle_on_the_ground() {
        let (mut player, mut map, mut input, _) = setup();
        step(&mut player, &mut map, &mut input, 5);
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
        assert_eq!(player.body().position(), SPAWN);
        assert_eq!(player.body().velocity(), Vec2::zero());
    }

    #[test]
    fn idling_to_walking_on_input() {
        let (mut player, mut map, mut input, _) = setup();
        input.set_down(KeyCode::Right, true);
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.state(), Some(PlayerStateName::Walking));
        step(&mut player, &mut map, &mut input, 1);
        assert!(player.body().velocity().x >= Player::MIN_WALK_SPEED);
        assert!(player.body().facing_right());
    }

    #[test]
    fn walking_to_idling_once_slow_enough() {
        let (mut player, mut map, mut input, _) = setup();
        input.set_down(KeyCode::Left, true);
        step(&mut player, &mut map, &mut input, 20);
        assert!(!player.body().facing_right());
        input.set_down(KeyCode::Left, false);
        let mut frames = 0;
        while player.state() == Some(PlayerStateName::Walking) {
            assert!(player.body().velocity().x.abs() > Player::MIN_WALK_SPEED);
            step(&mut player, &mut map, &mut input, 1);
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
        assert_eq!(player.body().velocity().x, 0.);
    }

    #[test]
    fn reversal_at_speed_skids_then_walks_back() {
        let (mut player, mut map, mut input, _) = setup();
        input.set_down(KeyCode::Right, true);
        step(&mut player, &mut map, &mut input, 80);
        input.set_down(KeyCode::Right, false);
        input.set_down(KeyCode::Left, true);
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.state(), Some(PlayerStateName::Skidding));
        step(&mut player, &mut map, &mut input, 30);
        assert_eq!(player.state(), Some(PlayerStateName::Walking));
        assert!(player.body().velocity().x < 0.);
    }

    #[test]
    fn idling_in_mid_air_starts_falling() {
        let (mut player, mut map, mut input) = setup_on(FLAT, Vec2 { x: 32., y: 100. });
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.state(), Some(PlayerStateName::Falling));
        step(&mut player, &mut map, &mut input, 60);
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
        assert_eq!(player.body().position(), SPAWN);
    }

    #[test]
    fn walking_off_a_ledge_falls_then_respawns() {
        let (mut player, mut map, mut input) = setup_on(LEDGE_LEVEL, SPAWN);
        input.set_down(KeyCode::Right, true);
        step(&mut player, &mut map, &mut input, 1);
        let mut frames = 0;
        while player.state() == Some(PlayerStateName::Walking) {
            step(&mut player, &mut map, &mut input, 1);
            frames += 1;
            assert!(frames < 300);
        }
        assert_eq!(player.state(), Some(PlayerStateName::Falling));
        // Every column under the player is past the ledge.
        assert!(player.body().position().x >= 96.);
        assert!(player.body().position().y < SPAWN.y + 1.);

        // Drops out of the bottom of the map and goes back to the start.
        while player.body().position() != SPAWN {
            step(&mut player, &mut map, &mut input, 1);
            frames += 1;
            assert!(frames < 500);
        }
        assert_eq!(player.body().velocity(), Vec2::zero());
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.state(), Some(PlayerStateName::Walking));
    }

    #[test]
    fn skid_without_input_ends_idle() {
        let (mut player, mut map, mut input, _) = setup();
        input.set_down(KeyCode::Right, true);
        step(&mut player, &mut map, &mut input, 80);
        input.set_down(KeyCode::Right, false);
        input.set_down(KeyCode::Left, true);
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.state(), Some(PlayerStateName::Skidding));

        input.set_down(KeyCode::Left, false);
        let mut frames = 0;
        while player.state() == Some(PlayerStateName::Skidding) {
            assert!(player.body().velocity().x > 0.);
            step(&mut player, &mut map, &mut input, 1);
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
        assert_eq!(player.body().velocity().x, 0.);
    }

    #[test]
    fn walls_stop_the_player_on_the_tile_boundary() {
        let (mut player, mut map, mut input) = setup_on(WALLED_LEVEL, SPAWN);
        input.set_down(KeyCode::Left, true);
        step(&mut player, &mut map, &mut input, 10);
        assert_eq!(player.state(), Some(PlayerStateName::Walking));
        assert_eq!(player.body().position().x, 32.);
        assert_eq!(player.body().velocity().x, 0.);

        input.set_down(KeyCode::Left, false);
        input.set_down(KeyCode::Right, true);
        step(&mut player, &mut map, &mut input, 150);
        assert_eq!(player.body().position(), Vec2 { x: 80., y: 144. });
        assert_eq!(player.body().velocity().x, 0.);
    }

    #[test]
    fn jump_lands_back_on_ground() {
        let (mut player, mut map, mut input, log) = setup();
        input.set_down(KeyCode::Z, true);
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.state(), Some(PlayerStateName::Jumping));
        assert_eq!(log.count(SoundName::Jump), 1);
        step(&mut player, &mut map, &mut input, 5);
        assert!(player.body().position().y < SPAWN.y);
        input.set_down(KeyCode::Z, false);
        step(&mut player, &mut map, &mut input, 100);
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
        assert_eq!(player.body().position(), SPAWN);
    }

    #[test]
    fn head_bump_hits_block() {
        let (mut player, mut map, mut input, log) = setup();
        let (block_sounds, _) = sounds();
        map.blocks.push(Block::new(
            Vec2 { x: 32., y: 96. },
            BlockItem::Mushroom,
            texture(),
            block_sounds,
        ));
        input.set_down(KeyCode::Z, true);
        let mut frames = 0;
        while !map.blocks[0].is_hit() {
            step(&mut player, &mut map, &mut input, 1);
            frames += 1;
            assert!(frames < 60);
        }
        assert_eq!(player.state(), Some(PlayerStateName::Falling));
        assert_eq!(player.body().position().y, 112.);
        assert_eq!(log.count(SoundName::Jump), 1);
    }

    #[test]
    fn touching_coin_collects_it() {
        let (mut player, mut map, mut input, _) = setup();
        let (coin_sounds, coin_log) = sounds();
        map.coins.push(Coin::new(Vec2 { x: 40., y: 144. }, texture(), coin_sounds.clone()));
        map.coins
            .push(Coin::popped(Vec2 { x: 40., y: 144. }, 100., texture(), coin_sounds));
        step(&mut player, &mut map, &mut input, 1);
        assert!(map.coins[0].is_collected());
        assert_eq!(coin_log.count(SoundName::Coin), 1);
    }

    #[test]
    fn growth_happens_once() {
        let (mut player, mut map, mut input, log) = setup();
        map.mushrooms.push(Mushroom::new(Vec2 { x: 36., y: 144. }, texture()));
        map.mushrooms.push(Mushroom::new(Vec2 { x: 28., y: 144. }, texture()));
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.body().size(), PlayerSize::Big);
        assert_eq!(player.state(), Some(PlayerStateName::Growing));
        assert_eq!(log.count(SoundName::Powerup), 1);
        assert!(map.mushrooms.iter().all(|m| !m.is_alive()));
        assert!((player.body().dimensions().y - 16. * 1.3).abs() < 1e-4);
        assert!((player.body().position().y + player.body().dimensions().y - 160.).abs() < 1e-4);

        // Already big: another mushroom is eaten without growing again.
        map.mushrooms.push(Mushroom::new(SPAWN, texture()));
        step(&mut player, &mut map, &mut input, 68);
        assert_eq!(player.state(), Some(PlayerStateName::Growing));
        assert_eq!(log.count(SoundName::Powerup), 1);
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
    }

    #[test]
    fn big_player_shrinks_and_is_briefly_invincible() {
        let (mut player, mut map, mut input, log) = setup();
        grow_to_idle(&mut player, &mut map, &mut input);
        player.body.body.position.x = 100.;
        map.goombas.push(Box::new(Goomba::new(
            Vec2 { x: 100., y: 144. },
            texture(),
            Sounds::silent(),
        )));

        player.die(&mut map);
        assert_eq!(player.body().size(), PlayerSize::Small);
        assert_eq!(player.state(), Some(PlayerStateName::Shrinking));
        assert_eq!(log.count(SoundName::Pipe), 1);
        assert!(player.body().is_invincible());

        step(&mut player, &mut map, &mut input, 70);
        assert_eq!(player.state(), Some(PlayerStateName::Idling));
        assert!((player.body().dimensions().y - 16.).abs() < 1e-4);

        // Goomba checks are skipped for the whole window.
        step(&mut player, &mut map, &mut input, 129);
        assert!(player.body().is_invincible());
        assert_eq!(player.body().position().x, 100.);
        step(&mut player, &mut map, &mut input, 1);
        assert!(!player.body().is_invincible());
        assert_eq!(player.body().position(), SPAWN);
        assert!(!map.goombas[0].dead());
    }

    #[test]
    fn invincible_player_blinks() {
        let (mut player, mut map, mut input, _) = setup();
        grow_to_idle(&mut player, &mut map, &mut input);
        player.die(&mut map);
        let mut renderer = RecordingRenderer::default();
        player.render(&mut renderer);
        step(&mut player, &mut map, &mut input, 10);
        player.render(&mut renderer);
        assert_eq!(renderer.draws.len(), 2);
        assert_eq!(renderer.draws[0].info.alpha, 0.5);
        assert_eq!(renderer.draws[1].info.alpha, 1.);
    }

    #[test]
    fn leaving_shrink_early_still_restores_height() {
        let (mut player, mut map, mut input, _) = setup();
        grow_to_idle(&mut player, &mut map, &mut input);
        player.die(&mut map);
        step(&mut player, &mut map, &mut input, 10);
        map.mushrooms.push(Mushroom::new(SPAWN, texture()));
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.state(), Some(PlayerStateName::Growing));
        assert!((player.body().dimensions().y - 16. * 1.3).abs() < 1e-4);
    }

    #[test]
    fn small_player_respawns() {
        let (mut player, mut map, mut input, _) = setup();
        player.body.body.position = Vec2 { x: 150., y: 300. };
        player.body.body.velocity = Vec2 { x: 20., y: 200. };
        step(&mut player, &mut map, &mut input, 1);
        assert_eq!(player.body().position(), SPAWN);
        assert_eq!(player.body().velocity(), Vec2::zero());
    }

    #[test]
    fn stomping_bounces_player() {
        let (mut player, mut map, mut input, log) = setup();
        map.goombas.push(Box::new(Goomba::new(
            Vec2 { x: 32., y: 144. },
            texture(),
            Sounds::new(log.clone()),
        )));
        player.body.body.position.y = 130.;
        player.body.body.velocity.y = 100.;
        step(&mut player, &mut map, &mut input, 1);
        assert!(map.goombas[0].dead());
        assert_eq!(player.state(), Some(PlayerStateName::Falling));
        assert!(player.body().velocity().y < 0.);
        assert_eq!(log.count(SoundName::Stomp), 1);
        assert_eq!(player.body().position().x, SPAWN.x);
    }
}
