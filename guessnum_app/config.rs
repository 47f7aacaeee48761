use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::mutation::RetryPolicy;

pub struct Config {
    pub update_max_attempts: u32,
    pub update_backoff_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            update_max_attempts: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            update_backoff_ms: RetryPolicy::DEFAULT_BACKOFF.as_millis() as u64,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        let update_max_attempts = match env::var("GUESSNUM_UPDATE_MAX_ATTEMPTS") {
            Ok(val) => val
                .parse::<u32>()
                .unwrap_or(defaults.update_max_attempts)
                .max(1),
            Err(_) => defaults.update_max_attempts,
        };

        let update_backoff_ms = match env::var("GUESSNUM_UPDATE_BACKOFF_MS") {
            Ok(val) => val.parse::<u64>().unwrap_or(defaults.update_backoff_ms),
            Err(_) => defaults.update_backoff_ms,
        };

        Self {
            update_max_attempts,
            update_backoff_ms,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.update_max_attempts,
            Duration::from_millis(self.update_backoff_ms),
        )
    }
}
