use std::cell::RefCell;
use std::ffi::OsStr;

use crate::runtime::DEFAULT_CYCLE_LIMIT;

/// Environment variable overriding the default cycle budget.
pub const MAX_CYCLES_VAR: &str = "NSB8_MAX_CYCLES";

#[derive(Clone, Copy, Debug)]
struct Env {
    max_cycles: Option<u64>,
}

thread_local! {
    /// Must only be mutated within `set_env`
    static ENV: RefCell<Option<Env>> = const { RefCell::new(None) };
}

pub fn init() {
    let value = Env {
        max_cycles: var_parse(MAX_CYCLES_VAR),
    };
    set_env(value);
}

/// Cycle budget from the environment, falling back to the built-in default.
pub fn max_cycles() -> u64 {
    with_env(|env| env.max_cycles).unwrap_or(DEFAULT_CYCLE_LIMIT)
}

fn set_env(value: Env) {
    ENV.with(|env| {
        let mut env = env.borrow_mut();
        assert!(
            env.is_none(),
            "tried to initialize environment state multiple times"
        );
        *env = Some(value);
    });
}

fn with_env<F, R>(callback: F) -> R
where
    F: Fn(&Env) -> R,
{
    ENV.with(|env| {
        let env = env.borrow();
        let env = env.unwrap_or_else(|| {
            panic!("tried to access environment state before initialization");
        });
        callback(&env)
    })
}

/// Unset or unparsable values are ignored.
fn var_parse(name: impl AsRef<OsStr>) -> Option<u64> {
    std::env::var(name.as_ref())
        .ok()
        .and_then(|v| v.trim().parse().ok())
}
