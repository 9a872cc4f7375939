/// The demo driver steps the simulation at 100 frames per second.
pub const FIXED_UPDATE_INTERVAL_US: u64 = 10_000;
/// When set, `Sounds` handles drop every request instead of forwarding it to the player.
pub const DISABLE_SOUND: bool = false;
