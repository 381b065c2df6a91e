use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Temporary environment variable overrides for one test body.
///
/// Environment variables are process-global, so the guard also holds a lock
/// that keeps parallel tests from interleaving their changes. Prior values
/// are restored when the guard drops, including on panic.
///
/// Each `(key, value)` pair sets the variable when `value` is `Some` and
/// removes it when `None`.
pub struct EnvOverride {
    _lock: MutexGuard<'static, ()>,
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvOverride {
    pub fn set(vars: &[(&'static str, Option<&str>)]) -> Self {
        let lock = ENV_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let saved = vars
            .iter()
            .map(|(key, _)| (*key, std::env::var(key).ok()))
            .collect();
        for (key, value) in vars {
            match value {
                Some(val) => std::env::set_var(key, val),
                None => std::env::remove_var(key),
            }
        }

        Self { _lock: lock, saved }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(val) => std::env::set_var(key, &val),
                None => std::env::remove_var(key),
            }
        }
    }
}
