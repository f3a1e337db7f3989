use std::env;
use std::path::PathBuf;

/// Database configuration.
///
/// Reads from the `FITPATH_DATABASE_URL` environment variable, falling back to
/// a SQLite file under the platform data directory when unset.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full SQLite connection URL (`sqlite://<path>` or `sqlite::memory:`).
    pub database_url: String,
}

impl DbConfig {
    /// File name of the default database.
    pub const DEFAULT_FILE_NAME: &str = "fitpath.db";

    /// URL of a private in-memory database (tests, dry runs).
    pub const MEMORY_URL: &str = "sqlite::memory:";

    /// The default connection URL used when no environment variable is set.
    ///
    /// `$XDG_DATA_HOME/fitpath/fitpath.db`, or the platform data dir.
    pub fn default_url() -> String {
        let dir = env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(dirs::data_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        format!(
            "sqlite://{}",
            dir.join("fitpath").join(Self::DEFAULT_FILE_NAME).display()
        )
    }

    /// Build a config from the environment.
    ///
    /// Priority: `FITPATH_DATABASE_URL` env var, then [`Self::default_url`].
    pub fn from_env() -> Self {
        let database_url =
            env::var("FITPATH_DATABASE_URL").unwrap_or_else(|_| Self::default_url());
        Self { database_url }
    }

    /// Build a config from an explicit URL (useful for tests and CLI flags).
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Whether this config points at an in-memory database.
    pub fn is_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    /// Filesystem path of the database file.
    ///
    /// Returns `None` for in-memory databases or URLs without the `sqlite:`
    /// scheme.
    pub fn database_path(&self) -> Option<PathBuf> {
        if self.is_memory() {
            return None;
        }
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().filter(|s| !s.is_empty())?;
        Some(PathBuf::from(path))
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_points_at_fitpath_db() {
        let url = DbConfig::default_url();
        assert!(url.starts_with("sqlite://"), "unexpected url: {url}");
        assert!(url.ends_with("fitpath/fitpath.db"), "unexpected url: {url}");
    }

    #[test]
    fn database_path_extraction() {
        let cfg = DbConfig::new("sqlite:///tmp/fit/fitpath.db?mode=rwc");
        assert_eq!(cfg.database_path(), Some(PathBuf::from("/tmp/fit/fitpath.db")));

        let relative = DbConfig::new("sqlite:data.db");
        assert_eq!(relative.database_path(), Some(PathBuf::from("data.db")));
    }

    #[test]
    fn memory_has_no_path() {
        let cfg = DbConfig::new(DbConfig::MEMORY_URL);
        assert!(cfg.is_memory());
        assert_eq!(cfg.database_path(), None);
    }

    #[test]
    fn non_sqlite_url_has_no_path() {
        let cfg = DbConfig::new("postgresql://localhost:5432/fitpath");
        assert_eq!(cfg.database_path(), None);
    }
}
