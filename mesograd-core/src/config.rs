//! Engine configuration.
//!
//! The engine is single-threaded by contract, so the active configuration is kept per thread.
//! `scoped` installs a configuration for the lifetime of the returned guard and restores the
//! previous one when the guard is dropped.

use std::cell::Cell;

/// Runtime switches of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// When `true`, operations whose forward result is NaN or infinite (or whose input lies
    /// outside the domain, e.g. `ln(0)`) produce that non-finite value instead of failing with
    /// `NumericDomain`.
    pub allow_non_finite: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_non_finite(mut self, allow: bool) -> Self {
        self.allow_non_finite = allow;
        self
    }
}

thread_local! {
    static CURRENT: Cell<EngineConfig> = Cell::new(EngineConfig::default());
}

/// Returns the configuration active on the calling thread.
pub fn current() -> EngineConfig {
    CURRENT.with(|c| c.get())
}

/// Replaces the configuration of the calling thread, returning the previous one.
pub fn set(config: EngineConfig) -> EngineConfig {
    CURRENT.with(|c| c.replace(config))
}

/// Restores the configuration that was active before `scoped` was called.
#[must_use = "the configuration is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ConfigGuard {
    previous: EngineConfig,
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        set(self.previous);
    }
}

/// Activates `config` on the calling thread until the returned guard is dropped.
pub fn scoped(config: EngineConfig) -> ConfigGuard {
    ConfigGuard {
        previous: set(config),
    }
}
