use std::time::Duration;

use gg_mario::{
    core::{
        prelude::*,
        render::{TextureRegistry, TextureSubArea},
    },
    info_every_seconds,
    mario::{level::Level, player::Player, Sounds, TracingSoundPlayer},
    util::setup_log,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const LEVEL: &str = "\
........................................
........................................
........................................
........................................
........................................
.......?...M...?........................
........................................
........................................
.....................o.o.o..............
..P.........g..............g.......#....
#################....###################
#################....###################";

const FRAMES: usize = 3000;
const SEED: u64 = 0x6d61_7269_6f;

/// Counts draw calls instead of drawing.
#[derive(Default)]
struct HeadlessRenderer {
    draws: usize,
}

impl RenderContext for HeadlessRenderer {
    fn draw(&mut self, _texture_id: TextureId, _area: TextureSubArea, _info: RenderInfo) {
        self.draws += 1;
    }
}

/// Holds or releases each key at random, favouring moving right.
fn randomise_input(rng: &mut StdRng, input: &mut InputHandler) {
    if rng.gen_bool(0.05) {
        input.set_down(KeyCode::Right, rng.gen_bool(0.8));
    }
    if rng.gen_bool(0.03) {
        input.set_down(KeyCode::Left, rng.gen_bool(0.3));
    }
    if rng.gen_bool(0.04) {
        input.set_down(KeyCode::Z, rng.gen_range(0..3) == 0);
    }
}

fn main() -> Result<()> {
    setup_log()?;

    let textures = TextureRegistry::new();
    let sounds = Sounds::new(TracingSoundPlayer);
    let Level { mut map, spawn } = Level::from_ascii(LEVEL, &textures, &sounds)?;
    let mut player = Player::new(spawn, &textures, sounds, &mut map);
    let mut input = InputHandler::new();
    let mut renderer = HeadlessRenderer::default();
    let mut rng = StdRng::seed_from_u64(SEED);

    let delta = Duration::from_micros(FIXED_UPDATE_INTERVAL_US);
    let mut last_state = player.state();
    for frame in 0..FRAMES {
        randomise_input(&mut rng, &mut input);
        map.update(delta);
        player.update(delta, &input, &mut map);
        map.render(&mut renderer);
        player.render(&mut renderer);
        input.update_step();

        if player.state() != last_state {
            info!("frame {frame}: {last_state:?} -> {:?}", player.state());
            last_state = player.state();
        }
        info_every_seconds!(1, "frame {frame}: player at {}", player.body().position());
    }

    info!(
        "done after {FRAMES} frames: {} draw calls, {} coins left, {} goombas left, size {:?}",
        renderer.draws,
        map.coins.len(),
        map.goombas.len(),
        player.body().size()
    );
    Ok(())
}
