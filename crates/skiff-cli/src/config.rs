//! Configuration provider for the skiff CLI
//!
//! Resolves connection settings once at startup from flags, environment,
//! and an optional TOML file. The resolved value is injected into the
//! client and never re-read mid-request. Failure to resolve host or
//! credentials is fatal to the invocation.

use std::path::PathBuf;

use eyre::{WrapErr, eyre};
use serde::Deserialize;
use skiff_client::ConnectionConfig;

/// Settings as they appear in `skiff.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FileConfig {
    /// Base URL of the API
    pub(crate) host: Option<String>,
    /// Basic-auth user
    pub(crate) user: Option<String>,
    /// Basic-auth password
    pub(crate) password: Option<String>,
}

impl FileConfig {
    /// Load from an explicit file.
    fn load(path: &PathBuf) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&content)
            .wrap_err_with(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Load from `$SKIFF_CONFIG` or the default paths; no file at all is
    /// fine, flags and environment may carry everything.
    fn load_default() -> eyre::Result<Self> {
        if let Ok(path) = std::env::var("SKIFF_CONFIG") {
            return Self::load(&PathBuf::from(path));
        }

        let paths = [
            PathBuf::from("skiff.toml"),
            dirs::config_dir()
                .map(|p| p.join("skiff/skiff.toml"))
                .unwrap_or_default(),
        ];

        for path in paths {
            if path.exists() {
                return Self::load(&path);
            }
        }

        Ok(Self::default())
    }
}

/// Resolve the connection settings, flags and environment winning over
/// the config file.
///
/// # Errors
/// Returns an error when the config file is unreadable or when host,
/// user, or password is missing after all sources are consulted.
pub(crate) fn resolve(
    host: Option<String>,
    user: Option<String>,
    password: Option<String>,
    verbose: bool,
    pretty: bool,
) -> eyre::Result<ConnectionConfig> {
    let file = FileConfig::load_default()?;
    merge(file, host, user, password, verbose, pretty)
}

fn merge(
    file: FileConfig,
    host: Option<String>,
    user: Option<String>,
    password: Option<String>,
    verbose: bool,
    pretty: bool,
) -> eyre::Result<ConnectionConfig> {
    let host = host
        .or(file.host)
        .ok_or_else(|| eyre!("no API host configured (set --host, SKIFF_HOST, or skiff.toml)"))?;
    let user = user
        .or(file.user)
        .ok_or_else(|| eyre!("no API user configured (set --user, SKIFF_USER, or skiff.toml)"))?;
    let password = password.or(file.password).ok_or_else(|| {
        eyre!("no API password configured (set --password, SKIFF_PASSWORD, or skiff.toml)")
    })?;

    Ok(ConnectionConfig {
        host,
        user,
        password,
        verbose,
        pretty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(host: Option<&str>, user: Option<&str>, password: Option<&str>) -> FileConfig {
        FileConfig {
            host: host.map(str::to_string),
            user: user.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn flags_win_over_file() {
        let resolved = merge(
            file(Some("http://file"), Some("file-user"), Some("file-pass")),
            Some("http://flag".to_string()),
            None,
            None,
            true,
            false,
        )
        .unwrap();
        assert_eq!(resolved.host, "http://flag");
        assert_eq!(resolved.user, "file-user");
        assert_eq!(resolved.password, "file-pass");
        assert!(resolved.verbose);
    }

    #[test]
    fn missing_credentials_are_fatal() {
        let err = merge(
            file(Some("http://file"), None, None),
            None,
            None,
            None,
            false,
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("user"));
    }

    #[test]
    fn missing_host_is_fatal() {
        assert!(merge(file(None, Some("u"), Some("p")), None, None, None, false, false).is_err());
    }

    #[test]
    fn file_parses_partial_settings() {
        let parsed: FileConfig = toml::from_str("host = \"https://api.example.net\"").unwrap();
        assert_eq!(parsed.host.as_deref(), Some("https://api.example.net"));
        assert!(parsed.user.is_none());
    }
}
