use std::time::Duration;

use super::constants::DEFAULT_TIMEOUT_SECS;

pub fn default_user_agent() -> String {
    format!("matrix-provider/{}", env!("CARGO_PKG_VERSION"))
}

pub fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}
