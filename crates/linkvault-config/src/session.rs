use std::time::Duration;

use crate::{env_var, parse_or};

/// Allow-list maintenance settings.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Seconds between background sweeps of expired refresh tokens (0 disables the sweeper)
    pub prune_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prune_interval_secs: 3600,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            prune_interval_secs: parse_or(env_var("REFRESH_PRUNE_INTERVAL"), 3600),
        }
    }

    pub fn prune_interval(&self) -> Option<Duration> {
        (self.prune_interval_secs > 0).then(|| Duration::from_secs(self.prune_interval_secs))
    }
}
