use crate::core::prelude::*;
use crate::mario::map::Map;
use crate::mario::player::animation::AnimationName;
use crate::mario::player::{Player, PlayerBody, PlayerSize, VerticalContact};
use crate::mario::SoundName;
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum PlayerStateName {
    Idling,
    Walking,
    Jumping,
    Falling,
    Skidding,
    Growing,
    Shrinking,
}

pub(super) type PlayerStateMachine = StateMachine<PlayerStateName, PlayerBody, Map>;

pub(super) fn register_states(fsm: &mut PlayerStateMachine) {
    fsm.add(PlayerStateName::Idling, Idling);
    fsm.add(PlayerStateName::Walking, Walking);
    fsm.add(PlayerStateName::Jumping, Jumping);
    fsm.add(PlayerStateName::Falling, Falling);
    fsm.add(PlayerStateName::Skidding, Skidding);
    fsm.add(PlayerStateName::Growing, Growing::default());
    fsm.add(PlayerStateName::Shrinking, Shrinking::default());
}

/// Moves `current` towards `target` by at most `step`.
fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

fn landing_state(player: &PlayerBody) -> PlayerStateName {
    if player.intent.direction != 0. || player.body.velocity.x.abs() > Player::MIN_WALK_SPEED {
        PlayerStateName::Walking
    } else {
        PlayerStateName::Idling
    }
}

fn bump_block(map: &mut Map, tile: Vec2i) {
    if let Some(block) = map.block_at_mut(tile) {
        block.hit();
    }
}

struct Idling;

impl State<PlayerStateName, PlayerBody, Map> for Idling {
    fn enter(&mut self, player: &mut PlayerBody, _map: &mut Map) {
        player.set_animation(AnimationName::Idle);
        player.body.velocity.x = 0.;
    }

    fn update(
        &mut self,
        player: &mut PlayerBody,
        map: &mut Map,
        delta: Duration,
    ) -> Option<PlayerStateName> {
        let dt = delta.as_secs_f32();
        player.apply_gravity(Player::GRAVITY, dt);
        if player.step_vertical(map, dt) != VerticalContact::Landed {
            return Some(PlayerStateName::Falling);
        }
        if player.intent.jump_pressed {
            Some(PlayerStateName::Jumping)
        } else if player.intent.direction != 0. {
            Some(PlayerStateName::Walking)
        } else {
            None
        }
    }
}

struct Walking;

impl State<PlayerStateName, PlayerBody, Map> for Walking {
    fn enter(&mut self, player: &mut PlayerBody, _map: &mut Map) {
        player.set_animation(AnimationName::Walk);
    }

    fn update(
        &mut self,
        player: &mut PlayerBody,
        map: &mut Map,
        delta: Duration,
    ) -> Option<PlayerStateName> {
        if player.intent.jump_pressed {
            return Some(PlayerStateName::Jumping);
        }
        let dt = delta.as_secs_f32();
        let direction = player.intent.direction;
        let vx = player.body.velocity.x;
        if direction != 0. {
            let reversing = vx * direction < 0.;
            if reversing && vx.abs() >= Player::SKID_TURNAROUND {
                return Some(PlayerStateName::Skidding);
            }
            let speed = if reversing {
                Player::MIN_WALK_SPEED
            } else {
                (vx.abs() + Player::WALK_ACCEL * dt)
                    .clamp(Player::MIN_WALK_SPEED, Player::MAX_WALK_SPEED)
            };
            player.body.velocity.x = direction * speed;
            player.facing_right = direction > 0.;
        } else {
            player.body.velocity.x = approach(vx, 0., Player::RELEASE_DECEL * dt);
        }

        player.step_horizontal(map, dt);
        player.apply_gravity(Player::GRAVITY, dt);
        if player.step_vertical(map, dt) != VerticalContact::Landed {
            return Some(PlayerStateName::Falling);
        }
        if direction == 0. && player.body.velocity.x.abs() <= Player::MIN_WALK_SPEED {
            player.body.velocity.x = 0.;
            return Some(PlayerStateName::Idling);
        }
        None
    }
}

struct Skidding;

impl State<PlayerStateName, PlayerBody, Map> for Skidding {
    fn enter(&mut self, player: &mut PlayerBody, _map: &mut Map) {
        player.set_animation(AnimationName::Skid);
    }

    fn update(
        &mut self,
        player: &mut PlayerBody,
        map: &mut Map,
        delta: Duration,
    ) -> Option<PlayerStateName> {
        if player.intent.jump_pressed {
            return Some(PlayerStateName::Jumping);
        }
        let dt = delta.as_secs_f32();
        let direction = player.intent.direction;
        let vx = player.body.velocity.x;
        if direction * vx > 0. {
            return Some(PlayerStateName::Walking);
        }
        player.body.velocity.x = approach(vx, 0., Player::SKID_DECEL * dt);
        if direction != 0. && player.body.velocity.x.abs() < Player::SKID_TURNAROUND {
            player.body.velocity.x = direction * Player::MIN_WALK_SPEED;
            player.facing_right = direction > 0.;
            return Some(PlayerStateName::Walking);
        }

        player.step_horizontal(map, dt);
        player.apply_gravity(Player::GRAVITY, dt);
        if player.step_vertical(map, dt) != VerticalContact::Landed {
            return Some(PlayerStateName::Falling);
        }
        if player.body.velocity.x == 0. {
            return Some(if direction == 0. {
                PlayerStateName::Idling
            } else {
                PlayerStateName::Walking
            });
        }
        None
    }
}

struct Jumping;

impl State<PlayerStateName, PlayerBody, Map> for Jumping {
    fn enter(&mut self, player: &mut PlayerBody, _map: &mut Map) {
        player.set_animation(AnimationName::Jump);
        player.body.velocity.y = -Player::JUMP_SPEED;
        player.jump_time = Duration::ZERO;
        player.sounds.play(SoundName::Jump);
    }

    fn update(
        &mut self,
        player: &mut PlayerBody,
        map: &mut Map,
        delta: Duration,
    ) -> Option<PlayerStateName> {
        let dt = delta.as_secs_f32();
        player.jump_time += delta;
        player.air_control(dt);
        player.step_horizontal(map, dt);
        let gravity = if player.intent.jump_held && player.jump_time < Player::MAX_JUMP_HOLD {
            Player::HOLD_GRAVITY
        } else {
            Player::GRAVITY
        };
        player.apply_gravity(gravity, dt);
        match player.step_vertical(map, dt) {
            VerticalContact::Landed => Some(landing_state(player)),
            VerticalContact::HitCeiling(tile) => {
                bump_block(map, tile);
                Some(PlayerStateName::Falling)
            }
            VerticalContact::Airborne if player.body.velocity.y >= 0. => {
                Some(PlayerStateName::Falling)
            }
            VerticalContact::Airborne => None,
        }
    }
}

struct Falling;

impl State<PlayerStateName, PlayerBody, Map> for Falling {
    fn enter(&mut self, player: &mut PlayerBody, _map: &mut Map) {
        player.set_animation(AnimationName::Fall);
    }

    fn update(
        &mut self,
        player: &mut PlayerBody,
        map: &mut Map,
        delta: Duration,
    ) -> Option<PlayerStateName> {
        let dt = delta.as_secs_f32();
        player.air_control(dt);
        player.step_horizontal(map, dt);
        player.apply_gravity(Player::GRAVITY, dt);
        match player.step_vertical(map, dt) {
            VerticalContact::Landed => Some(landing_state(player)),
            VerticalContact::HitCeiling(tile) => {
                bump_block(map, tile);
                None
            }
            VerticalContact::Airborne => None,
        }
    }
}

/// Input is ignored until the transformation finishes.
#[derive(Default)]
struct Growing {
    remaining: Duration,
}

impl State<PlayerStateName, PlayerBody, Map> for Growing {
    fn enter(&mut self, player: &mut PlayerBody, _map: &mut Map) {
        player.set_animation(AnimationName::Grow);
        player.sounds.play(SoundName::Powerup);
        player.set_height(PlayerSize::Big.height());
        player.body.velocity = Vec2::zero();
        self.remaining = Player::TRANSFORM_TIME;
    }

    fn update(
        &mut self,
        _player: &mut PlayerBody,
        _map: &mut Map,
        delta: Duration,
    ) -> Option<PlayerStateName> {
        self.remaining = self.remaining.saturating_sub(delta);
        self.remaining.is_zero().then_some(PlayerStateName::Idling)
    }
}

/// The height change is applied when the transformation finishes, or on leaving early.
#[derive(Default)]
struct Shrinking {
    remaining: Duration,
    resize_pending: bool,
}

impl Shrinking {
    fn finish_resize(&mut self, player: &mut PlayerBody) {
        if std::mem::take(&mut self.resize_pending) {
            player.set_height(PlayerSize::Small.height());
        }
    }
}

impl State<PlayerStateName, PlayerBody, Map> for Shrinking {
    fn enter(&mut self, player: &mut PlayerBody, _map: &mut Map) {
        player.set_animation(AnimationName::Shrink);
        player.sounds.play(SoundName::Pipe);
        player.body.velocity = Vec2::zero();
        self.remaining = Player::TRANSFORM_TIME;
        self.resize_pending = true;
    }
    fn exit(&mut self, player: &mut PlayerBody, _map: &mut Map) {
        self.finish_resize(player);
    }

    fn update(
        &mut self,
        player: &mut PlayerBody,
        _map: &mut Map,
        delta: Duration,
    ) -> Option<PlayerStateName> {
        self.remaining = self.remaining.saturating_sub(delta);
        if self.remaining.is_zero() {
            self.finish_resize(player);
            Some(PlayerStateName::Idling)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_stops_at_target() {
        assert_eq!(approach(10., 0., 4.), 6.);
        assert_eq!(approach(3., 0., 4.), 0.);
        assert_eq!(approach(-3., 0., 4.), 0.);
        assert_eq!(approach(0., 5., 2.), 2.);
    }

    #[test]
    #[should_panic(expected = "duplicate state")]
    fn states_register_once() {
        let mut fsm = PlayerStateMachine::new();
        register_states(&mut fsm);
        register_states(&mut fsm);
    }
}
