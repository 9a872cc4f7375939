#[allow(unused_imports)]
pub use itertools::Itertools;
#[allow(unused_imports)]
pub use num_traits;
#[allow(unused_imports)]
pub use num_traits::Zero;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::{
        config::*,
        coroutine::{Coroutine, CoroutineResponse, CoroutineState},
        input::{InputHandler, KeyCode},
        render::{RenderContext, RenderInfo, Sprite, TextureId, TextureSource},
        state_machine::{State, StateMachine},
        tween::{Easing, Tween},
        ObjectId,
    },
    util::{
        assert::*,
        linalg,
        linalg::{Rect, Vec2, Vec2i},
    },
};
