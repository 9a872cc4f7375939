use crate::core::prelude::*;
use crate::mario::entity::{Body, Collidable, Renderable, Updatable};

pub mod goomba;

/// How an enemy responded to touching the player.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlayerContact {
    /// The player landed on top; it should bounce.
    Stomped,
    HurtPlayer,
    Ignored,
}

pub trait Stompable: Updatable + Renderable + Collidable {
    fn id(&self) -> ObjectId;
    fn stomp(&mut self);
    fn dead(&self) -> bool;

    /// Called for each frame the player overlaps this enemy while not invincible.
    fn on_collide_with_player(&mut self, player: &Body) -> PlayerContact {
        if self.dead() {
            return PlayerContact::Ignored;
        }
        let from_above = player.velocity.y > 0. && player.bottom() < self.body().rect().centre().y;
        if from_above {
            self.stomp();
            PlayerContact::Stomped
        } else {
            PlayerContact::HurtPlayer
        }
    }
}
