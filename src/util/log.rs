use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};
use std::time::{Duration, Instant};

static LAST_LOG: LazyLock<Mutex<HashMap<String, Instant>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Returns true at most once per `period` for each call site `loc`.
pub fn should_log(loc: String, period: Duration) -> bool {
    let Ok(mut last_log) = LAST_LOG.lock() else {
        return true;
    };
    let due = last_log
        .get(&loc)
        .map_or(true, |then| then.elapsed() >= period);
    if due {
        last_log.insert(loc, Instant::now());
    }
    due
}

#[macro_export]
macro_rules! info_every_seconds {
    ($seconds:expr, $($args:expr),+) => {
        if $crate::util::log::should_log(
            $crate::util::assert::current_location!(),
            std::time::Duration::from_secs($seconds),
        ) {
            $crate::core::prelude::info!($($args),+);
        }
    };
}
#[macro_export]
macro_rules! warn_every_seconds {
    ($seconds:expr, $($args:expr),+) => {
        if $crate::util::log::should_log(
            $crate::util::assert::current_location!(),
            std::time::Duration::from_secs($seconds),
        ) {
            $crate::core::prelude::warn!($($args),+);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limits_per_location() {
        let period = Duration::from_secs(60);
        assert!(should_log("log.rs:test-a".to_string(), period));
        assert!(!should_log("log.rs:test-a".to_string(), period));
        assert!(should_log("log.rs:test-b".to_string(), period));
        assert!(should_log("log.rs:test-c".to_string(), Duration::ZERO));
        assert!(should_log("log.rs:test-c".to_string(), Duration::ZERO));
    }
}
