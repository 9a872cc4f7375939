use crate::core::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum SoundName {
    Jump,
    Coin,
    Bump,
    SproutItem,
    Powerup,
    Pipe,
    Stomp,
}

impl SoundName {
    pub fn filename(self) -> &'static str {
        match self {
            SoundName::Jump => "res/jump-small.wav",
            SoundName::Coin => "res/coin.wav",
            SoundName::Bump => "res/bump.wav",
            SoundName::SproutItem => "res/sprout-item.wav",
            SoundName::Powerup => "res/powerup.wav",
            SoundName::Pipe => "res/pipe.wav",
            SoundName::Stomp => "res/stomp.wav",
        }
    }
}

/// The audio port. Playback is fire-and-forget.
pub trait SoundPlayer {
    fn play(&mut self, sound: SoundName);
}

/// A cheap, cloneable handle to the shared sound player. Every entity that makes noise keeps
/// its own clone.
#[derive(Clone, Default)]
pub struct Sounds {
    inner: Option<Rc<RefCell<dyn SoundPlayer>>>,
}

impl Sounds {
    pub fn new(player: impl SoundPlayer + 'static) -> Self {
        Self {
            inner: Some(Rc::new(RefCell::new(player))),
        }
    }
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn play(&self, sound: SoundName) {
        if DISABLE_SOUND {
            return;
        }
        let Some(inner) = self.inner.as_ref() else {
            return;
        };
        match inner.try_borrow_mut() {
            Ok(mut player) => player.play(sound),
            Err(_) => error!("sound player busy, dropped {sound:?}"),
        }
    }
}

/// Logs every request; used by the headless demo.
pub struct TracingSoundPlayer;

impl SoundPlayer for TracingSoundPlayer {
    fn play(&mut self, sound: SoundName) {
        info!("play {}", sound.filename());
    }
}

/// Records every request in order. Clones share the same record.
#[derive(Clone, Default)]
pub struct SoundLog {
    played: Rc<RefCell<Vec<SoundName>>>,
}

impl SoundLog {
    pub fn played(&self) -> Vec<SoundName> {
        self.played.borrow().clone()
    }
    pub fn count(&self, sound: SoundName) -> usize {
        self.played.borrow().iter().filter(|&&s| s == sound).count()
    }
}

impl SoundPlayer for SoundLog {
    fn play(&mut self, sound: SoundName) {
        self.played.borrow_mut().push(sound);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_player() {
        let log = SoundLog::default();
        let sounds = Sounds::new(log.clone());
        let other = sounds.clone();
        sounds.play(SoundName::Coin);
        other.play(SoundName::Bump);
        assert_eq!(log.played(), vec![SoundName::Coin, SoundName::Bump]);
        assert_eq!(log.count(SoundName::Coin), 1);
    }

    #[test]
    fn silent_handle_drops_requests() {
        Sounds::silent().play(SoundName::Jump);
    }
}
