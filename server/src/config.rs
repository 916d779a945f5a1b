use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub admin_enabled: bool,
    pub session_ttl_hours: i64,
    pub cors_origin: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("FILMFEST_PORT", "8080"),
            data_dir: PathBuf::from(try_load::<String>("FILMFEST_DATA_DIR", "data")),
            admin_enabled: try_load("FILMFEST_ADMIN", "false"),
            session_ttl_hours: try_load("FILMFEST_SESSION_TTL_HOURS", "720"),
            cors_origin: try_load("FILMFEST_CORS_ORIGIN", "http://localhost:3000"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
