use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CoroutineState {
    Starting,
    Yielding,
    Waiting,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CoroutineResponse {
    /// Resume again next frame.
    Yield,
    /// Resume once this much simulation time has passed.
    Wait(Duration),
    Complete,
}

pub type CoroutineFunc<T, C> = dyn FnMut(&mut T, &mut C, CoroutineState) -> CoroutineResponse;

/// A resumable task driven by the simulation clock.
///
/// The owner stores the coroutine and feeds it each frame's delta via [`Coroutine::resume`].
/// Time left over after a wait expires is carried into the next wait, so chained waits add
/// up exactly regardless of frame length.
pub struct Coroutine<T, C> {
    func: Box<CoroutineFunc<T, C>>,
    wait_remaining: Duration,
    last_state: CoroutineState,
}

impl<T, C> Coroutine<T, C> {
    /// Runs for the first time on the next call to `resume()`.
    pub fn new<F>(func: F) -> Self
    where
        F: FnMut(&mut T, &mut C, CoroutineState) -> CoroutineResponse + 'static,
    {
        Self::after(Duration::ZERO, func)
    }

    /// Runs for the first time once `delay` of simulation time has been fed to `resume()`.
    pub fn after<F>(delay: Duration, func: F) -> Self
    where
        F: FnMut(&mut T, &mut C, CoroutineState) -> CoroutineResponse + 'static,
    {
        Self {
            func: Box::new(func),
            wait_remaining: delay,
            last_state: CoroutineState::Starting,
        }
    }

    /// Advances the coroutine by `delta`. Returns `None` once it has completed.
    #[must_use]
    pub fn resume(mut self, this: &mut T, ctx: &mut C, delta: Duration) -> Option<Self> {
        let mut budget = delta;
        loop {
            if budget < self.wait_remaining {
                self.wait_remaining -= budget;
                return Some(self);
            }
            budget -= self.wait_remaining;
            self.wait_remaining = Duration::ZERO;
            match (self.func)(this, ctx, self.last_state) {
                CoroutineResponse::Yield => {
                    self.last_state = CoroutineState::Yielding;
                    return Some(self);
                }
                CoroutineResponse::Wait(time) => {
                    self.last_state = CoroutineState::Waiting;
                    self.wait_remaining = time;
                    if time.is_zero() {
                        return Some(self);
                    }
                }
                CoroutineResponse::Complete => return None,
            }
        }
    }
}
