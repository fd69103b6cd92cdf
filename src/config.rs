use std::env;

use dotenv::dotenv;

/// Process-wide configuration, read once at startup. The secrets are handed
/// to the services at construction and never read from the environment
/// again.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub signing_key: String,
    pub polka_key: String,
    pub platform: String,
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env file
        dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            signing_key: env::var("SIGNING_KEY").expect("SIGNING_KEY must be set"),
            polka_key: env::var("POLKA_KEY").expect("POLKA_KEY must be set"),
            platform: env::var("PLATFORM").unwrap_or_else(|_| "production".to_string()),
        }
    }
}
