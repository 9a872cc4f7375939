use crate::core::render::RenderContext;
use crate::util::assert::*;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::time::Duration;

/// One behaviour mode of an owner `T`. Hooks receive the owner's data and a context `C`; the
/// state itself only holds whatever bookkeeping it needs across frames.
pub trait State<K, T, C> {
    fn enter(&mut self, _owner: &mut T, _ctx: &mut C) {}
    fn exit(&mut self, _owner: &mut T, _ctx: &mut C) {}
    /// Returns the state to change to, if any.
    fn update(&mut self, owner: &mut T, ctx: &mut C, delta: Duration) -> Option<K>;
    /// Returns false to let the owner render itself.
    fn render(&self, _owner: &T, _renderer: &mut dyn RenderContext) -> bool {
        false
    }
}

/// Something that can draw itself, used as the fallback when the active state does not render.
pub trait RenderFallback {
    fn render_fallback(&self, renderer: &mut dyn RenderContext);
}

pub struct StateMachine<K, T, C> {
    states: BTreeMap<K, Box<dyn State<K, T, C>>>,
    current: Option<K>,
}

impl<K: Copy + Ord + Debug, T, C> Default for StateMachine<K, T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Ord + Debug, T, C> StateMachine<K, T, C> {
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
            current: None,
        }
    }

    /// Registers `state` under `name`. Registering a name twice is a programming error.
    pub fn add(&mut self, name: K, state: impl State<K, T, C> + 'static) {
        check_false!(
            self.states.contains_key(&name),
            format!("duplicate state: {name:?}")
        );
        self.states.insert(name, Box::new(state));
    }

    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Exits the current state (if any) and enters `name`. Changing to the current state
    /// exits and re-enters it.
    pub fn change(&mut self, name: K, owner: &mut T, ctx: &mut C) {
        check!(
            self.states.contains_key(&name),
            format!("unknown state: {name:?}")
        );
        if let Some(state) = self.current.and_then(|current| self.states.get_mut(&current)) {
            state.exit(owner, ctx);
        }
        self.current = Some(name);
        if let Some(state) = self.states.get_mut(&name) {
            state.enter(owner, ctx);
        }
    }

    pub fn update(&mut self, owner: &mut T, ctx: &mut C, delta: Duration) {
        let Some(state) = self.current.and_then(|current| self.states.get_mut(&current)) else {
            return;
        };
        if let Some(next) = state.update(owner, ctx, delta) {
            self.change(next, owner, ctx);
        }
    }

    pub fn render(&self, owner: &T, renderer: &mut dyn RenderContext)
    where
        T: RenderFallback,
    {
        let rendered = self
            .current
            .and_then(|current| self.states.get(&current))
            .is_some_and(|state| state.render(owner, renderer));
        if !rendered {
            owner.render_fallback(renderer);
        }
    }
}
