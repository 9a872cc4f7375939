use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};

pub mod config;
pub mod coroutine;
pub mod input;
pub mod prelude;
pub mod render;
pub mod state_machine;
pub mod tween;

static NEXT_OBJECT_ID: AtomicUsize = AtomicUsize::new(1);

/// A unique identifier for dynamic world objects.
///
/// Timed removals refer to objects by id rather than by reference, so that a removal queued
/// by one object can be applied after the update pass without holding a borrow of the list.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
