//! Data directory layout.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FITCOACH_DATA_DIR";

/// Resolve the client data directory.
///
/// `FITCOACH_DATA_DIR` wins, then `~/.fitcoach`, then `./.fitcoach`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".fitcoach");
    }

    PathBuf::from(".fitcoach")
}

/// Create the data directory if it does not exist yet.
pub async fn ensure_data_dir(data_dir: &Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(data_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_data_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_data_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        // Idempotent.
        ensure_data_dir(&nested).await.unwrap();
    }

    #[test]
    fn test_resolve_data_dir_default_name() {
        if std::env::var(DATA_DIR_ENV).is_err() {
            assert!(resolve_data_dir().ends_with(".fitcoach"));
        }
    }
}
