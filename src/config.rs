use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Generation interval in milliseconds.
pub const GENERATE_INTERVAL_KEY: &str = "N";
/// Number of workers, also the capacity of the result channel.
pub const WORKER_COUNT_KEY: &str = "M";
/// Report interval in seconds.
pub const REPORT_INTERVAL_KEY: &str = "K";

/// Upper bound on the worker count, well below what a result channel can be sized to.
pub const MAX_WORKER_COUNT: usize = 1024;

/// Env file read when none is given explicitly.
pub const DEFAULT_ENV_FILE: &str = ".env";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration from {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
    #[error("missing value for {key}")]
    Missing { key: &'static str },
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// A key-value store the configuration is read from.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads from the process environment.
#[derive(Debug, Default)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl ConfigSource for HashMap<&str, &str> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).map(|v| v.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    generate_interval: Duration,
    report_interval: Duration,
    worker_count: usize,
}

impl Config {
    pub fn new(generate_interval: Duration,
               report_interval: Duration,
               worker_count: usize) -> Result<Self, ConfigError> {
        check_interval(GENERATE_INTERVAL_KEY, generate_interval)?;
        check_interval(REPORT_INTERVAL_KEY, report_interval)?;
        if worker_count == 0 || worker_count > MAX_WORKER_COUNT {
            return Err(ConfigError::Invalid {
                key: WORKER_COUNT_KEY,
                value: worker_count.to_string(),
            });
        }
        Ok(Config {
            generate_interval,
            report_interval,
            worker_count,
        })
    }

    /// Populate the environment from `env_file` and read the configuration from it.
    ///
    /// An explicit file must load. Without one, a `.env` in the working directory is
    /// used when present; a `.env` that exists but cannot be read or parsed is still an
    /// error. Variables already set in the environment win over the file.
    pub fn load(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        match env_file {
            Some(path) => load_env_file(path, true)?,
            None => load_env_file(Path::new(DEFAULT_ENV_FILE), false)?,
        }
        Self::from_source(&EnvSource)
    }

    pub fn from_source(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let generate_ms = positive(source, GENERATE_INTERVAL_KEY)?;
        let worker_count = positive(source, WORKER_COUNT_KEY)?;
        let report_secs = positive(source, REPORT_INTERVAL_KEY)?;
        let worker_count = usize::try_from(worker_count).map_err(|_| ConfigError::Invalid {
            key: WORKER_COUNT_KEY,
            value: worker_count.to_string(),
        })?;
        Self::new(
            Duration::from_millis(generate_ms),
            Duration::from_secs(report_secs),
            worker_count,
        )
    }

    pub fn generate_interval(&self) -> Duration {
        self.generate_interval
    }

    pub fn report_interval(&self) -> Duration {
        self.report_interval
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }
}

fn load_env_file(path: &Path, required: bool) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(e)) if !required && e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ConfigError::Source {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Timers schedule the first tick one period ahead and the next one a period later, so
/// both deadlines must be representable.
fn check_interval(key: &'static str, interval: Duration) -> Result<(), ConfigError> {
    let representable = interval
        .checked_mul(2)
        .and_then(|ahead| Instant::now().checked_add(ahead))
        .is_some();
    if interval.is_zero() || !representable {
        return Err(ConfigError::Invalid {
            key,
            value: format!("{:?}", interval),
        });
    }
    Ok(())
}

fn positive(source: &impl ConfigSource, key: &'static str) -> Result<u64, ConfigError> {
    let value = source.get(key).ok_or(ConfigError::Missing { key })?;
    match value.parse::<i64>() {
        Ok(v) if v > 0 => Ok(v as u64),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use test_case::test_case;
    use uuid::Uuid;
    use crate::config::{load_env_file, Config, ConfigError, MAX_WORKER_COUNT};

    fn source(n: &'static str, m: &'static str, k: &'static str) -> HashMap<&'static str, &'static str> {
        HashMap::from([("N", n), ("M", m), ("K", k)])
    }

    #[test]
    fn test_valid() {
        let config = Config::from_source(&source("50", "2", "1")).unwrap();
        assert_eq!(config.generate_interval(), Duration::from_millis(50));
        assert_eq!(config.worker_count(), 2);
        assert_eq!(config.report_interval(), Duration::from_secs(1));
    }

    #[test_case("0", "2", "1", "N" ; "zero generate interval")]
    #[test_case("50", "0", "1", "M" ; "zero workers")]
    #[test_case("50", "2", "0", "K" ; "zero report interval")]
    #[test_case("-5", "2", "1", "N" ; "negative generate interval")]
    #[test_case("50", "two", "1", "M" ; "non numeric workers")]
    #[test_case("50", "2", "1.5", "K" ; "fractional report interval")]
    #[test_case("", "2", "1", "N" ; "empty generate interval")]
    #[test_case("50", "2", "9223372036854775807", "K" ; "report interval past any instant")]
    #[test_case("50", "4000000000000000000", "1", "M" ; "huge worker count")]
    #[test_case("50", "1025", "1", "M" ; "worker count above limit")]
    fn test_invalid(n: &'static str, m: &'static str, k: &'static str, bad_key: &str) {
        match Config::from_source(&source(n, m, k)) {
            Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, bad_key),
            other => panic!("expected invalid {}, got {:?}", bad_key, other),
        }
    }

    #[test_case("N")]
    #[test_case("M")]
    #[test_case("K")]
    fn test_missing(missing: &str) {
        let mut values = source("50", "2", "1");
        values.remove(missing);
        match Config::from_source(&values) {
            Err(ConfigError::Missing { key }) => assert_eq!(key, missing),
            other => panic!("expected missing {}, got {:?}", missing, other),
        }
    }

    #[test]
    fn test_error_names_key() {
        let err = Config::from_source(&source("50", "2", "abc")).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for K: \"abc\"");
    }

    #[test]
    fn test_new_rejects_zero() {
        assert!(Config::new(Duration::ZERO, Duration::from_secs(1), 1).is_err());
        assert!(Config::new(Duration::from_millis(1), Duration::ZERO, 1).is_err());
        assert!(Config::new(Duration::from_millis(1), Duration::from_secs(1), 0).is_err());
    }

    #[test]
    fn test_new_bounds() {
        assert!(Config::new(Duration::MAX, Duration::from_secs(1), 1).is_err());
        assert!(Config::new(Duration::from_millis(1), Duration::MAX, 1).is_err());
        assert!(Config::new(Duration::from_millis(1), Duration::from_secs(1), MAX_WORKER_COUNT).is_ok());
        assert!(Config::new(Duration::from_millis(1), Duration::from_secs(1), MAX_WORKER_COUNT + 1).is_err());
    }

    #[test]
    fn test_optional_env_file_absent() {
        let path = std::env::temp_dir().join(Uuid::new_v4().to_string()).join(".env");
        assert!(load_env_file(&path, false).is_ok());
        assert!(matches!(load_env_file(&path, true), Err(ConfigError::Source { .. })));
    }

    #[test]
    fn test_optional_env_file_malformed() {
        let dir = std::env::temp_dir().join(Uuid::new_v4().to_string());
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env");
        fs::write(&path, "this line is ' broken\n").unwrap();

        let result = load_env_file(&path, false);
        fs::remove_dir_all(&dir).unwrap();
        match result {
            Err(ConfigError::Source { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected source error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_env_file() {
        let err = Config::load(Some(Path::new("/nonexistent/topsum/.env"))).unwrap_err();
        assert!(matches!(err, ConfigError::Source { .. }));
    }
}
