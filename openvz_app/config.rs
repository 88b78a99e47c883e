use dotenvy::dotenv;
use std::{env, time::Duration};

/// Which command layer executes container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommanderKind {
    /// Logs every operation and reports success, no host changes.
    Stub,
    /// Shells out to `vzctl`.
    Vzctl,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub job_interval: Duration,
    pub commander: CommanderKind,
    pub vzctl_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let port = match env::var("OPENVZ_API_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(5000),
            Err(_) => 5000,
        };

        let job_interval_secs = match env::var("OPENVZ_JOB_INTERVAL_SECS") {
            Ok(val) => val.parse::<u64>().ok().filter(|s| *s > 0).unwrap_or(3),
            Err(_) => 3,
        };

        let commander = match env::var("OPENVZ_COMMANDER") {
            Ok(val) if val.eq_ignore_ascii_case("vzctl") => CommanderKind::Vzctl,
            _ => CommanderKind::Stub,
        };

        let vzctl_path = match env::var("OPENVZ_VZCTL_PATH") {
            Ok(val) if !val.is_empty() => val,
            _ => "vzctl".to_string(),
        };

        Self {
            port,
            job_interval: Duration::from_secs(job_interval_secs),
            commander,
            vzctl_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5000,
            job_interval: Duration::from_secs(3),
            commander: CommanderKind::Stub,
            vzctl_path: "vzctl".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.job_interval, Duration::from_secs(3));
        assert_eq!(config.commander, CommanderKind::Stub);
        assert_eq!(config.vzctl_path, "vzctl");
    }
}
