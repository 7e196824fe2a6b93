//! Server Configuration
//!
//! Reads the process environment (after `.env` is loaded) into typed config.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::{AuthConfig, CredentialConfig};
use platform::password::DEFAULT_ITERATIONS;

const DEFAULT_PORT: u16 = 10000;
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

const CREDENTIAL_VARS: [&str; 3] = ["EMPLOYEE_USERNAME", "EMPLOYEE_SALT_B64", "EMPLOYEE_HASH_B64"];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// `APP_ENV=production`; decides the `Secure` cookie attribute
    pub production: bool,
    pub static_dir: PathBuf,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub credential: CredentialConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), !cfg!(debug_assertions))
    }

    /// Build from an arbitrary variable source
    ///
    /// `release` makes production the default mode and makes the employee
    /// credential mandatory.
    pub fn from_lookup<F>(lookup: F, release: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = parse_or(&get, "PORT", DEFAULT_PORT)?;

        let production = match get("APP_ENV") {
            Some(env) => env.trim().eq_ignore_ascii_case("production"),
            None => release,
        };

        let ttl_secs: u64 = parse_or(&get, "SESSION_TTL_SECS", 8 * 3600)?;
        if ttl_secs == 0 {
            bail!("SESSION_TTL_SECS must be greater than zero");
        }
        let sweep_secs: u64 = parse_or(&get, "SESSION_SWEEP_SECS", 600)?;

        let base = if production {
            AuthConfig::default()
        } else {
            AuthConfig::development()
        };
        let auth = AuthConfig {
            session_cookie_name: get("SESSION_COOKIE_NAME")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| base.session_cookie_name.clone()),
            session_ttl: Duration::from_secs(ttl_secs),
            session_sweep_interval: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
            ..base
        };

        let credential = credential_from(&get, release)?;

        let static_dir = get("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            port,
            production,
            static_dir,
            frontend_origins,
            auth,
            credential,
        })
    }
}

fn credential_from<F>(get: &F, release: bool) -> anyhow::Result<CredentialConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let iterations = parse_or(get, "EMPLOYEE_PBKDF2_ITERATIONS", DEFAULT_ITERATIONS)?;

    let values: Vec<Option<String>> = CREDENTIAL_VARS.iter().map(|key| get(*key)).collect();
    let missing: Vec<&str> = CREDENTIAL_VARS
        .iter()
        .zip(&values)
        .filter(|(_, v)| v.is_none())
        .map(|(key, _)| *key)
        .collect();

    if missing.len() == CREDENTIAL_VARS.len() && !release {
        tracing::warn!("EMPLOYEE_* not set; using the demo employee credential");
        return Ok(CredentialConfig {
            iterations,
            ..CredentialConfig::demo()
        });
    }
    if !missing.is_empty() {
        bail!("missing employee credential variables: {}", missing.join(", "));
    }

    let mut values = values.into_iter().flatten().map(|v| v.trim().to_string());
    match (values.next(), values.next(), values.next()) {
        (Some(username), Some(salt_b64), Some(hash_b64)) => Ok(CredentialConfig {
            username,
            salt_b64,
            hash_b64,
            iterations,
        }),
        _ => bail!("missing employee credential variables"),
    }
}

fn parse_or<F, T>(get: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const CREDENTIAL: [(&str, &str); 3] = [
        ("EMPLOYEE_USERNAME", "dispatch"),
        ("EMPLOYEE_SALT_B64", "OUC/IzfwuVIiBobZ+tdSFw=="),
        ("EMPLOYEE_HASH_B64", "sh3/PmSpCThJUlcjiG2GWdT5q5Ip1xkC1lPGDsgSdX4="),
    ];

    #[test]
    fn test_debug_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]), false).unwrap();

        assert_eq!(config.port, 10000);
        assert!(!config.production);
        assert!(!config.auth.cookie_secure);
        assert_eq!(config.auth.session_cookie_name, "mt_session");
        assert_eq!(config.auth.session_ttl, Duration::from_secs(28_800));
        assert_eq!(
            config.auth.session_sweep_interval,
            Some(Duration::from_secs(600))
        );
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(config.credential, CredentialConfig::demo());
    }

    #[test]
    fn test_release_requires_credential() {
        let err = ServerConfig::from_lookup(lookup(&[]), true).unwrap_err();
        assert!(err.to_string().contains("EMPLOYEE_USERNAME"));

        let config = ServerConfig::from_lookup(lookup(&CREDENTIAL), true).unwrap();
        assert!(config.production);
        assert!(config.auth.cookie_secure);
        assert_eq!(config.credential.username, "dispatch");
        assert_eq!(config.credential.iterations, DEFAULT_ITERATIONS);
    }

    #[test]
    fn test_partial_credential_rejected_in_debug() {
        let err = ServerConfig::from_lookup(lookup(&CREDENTIAL[..1]), false).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("EMPLOYEE_SALT_B64"));
        assert!(message.contains("EMPLOYEE_HASH_B64"));
    }

    #[test]
    fn test_app_env_overrides_build_mode() {
        let config =
            ServerConfig::from_lookup(lookup(&[("APP_ENV", "production")]), false).unwrap();
        assert!(config.auth.cookie_secure);

        let mut vars = CREDENTIAL.to_vec();
        vars.push(("APP_ENV", "staging"));
        let config = ServerConfig::from_lookup(lookup(&vars), true).unwrap();
        assert!(!config.production);
        assert!(!config.auth.cookie_secure);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(
            lookup(&[
                ("PORT", "8080"),
                ("SESSION_COOKIE_NAME", "staff"),
                ("SESSION_TTL_SECS", "60"),
                ("SESSION_SWEEP_SECS", "0"),
                ("EMPLOYEE_PBKDF2_ITERATIONS", "1000"),
                ("STATIC_DIR", "/srv/site"),
                ("FRONTEND_ORIGINS", "https://a.example, ,https://b.example"),
            ]),
            false,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.auth.session_cookie_name, "staff");
        assert_eq!(config.auth.session_ttl, Duration::from_secs(60));
        assert_eq!(config.auth.session_sweep_interval, None);
        assert_eq!(config.credential.iterations, 1000);
        assert_eq!(config.static_dir, PathBuf::from("/srv/site"));
        assert_eq!(
            config.frontend_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn test_malformed_numbers() {
        for (key, value) in [
            ("PORT", "http"),
            ("PORT", "70000"),
            ("SESSION_TTL_SECS", "-1"),
            ("SESSION_TTL_SECS", "0"),
            ("EMPLOYEE_PBKDF2_ITERATIONS", "many"),
        ] {
            assert!(
                ServerConfig::from_lookup(lookup(&[(key, value)]), false).is_err(),
                "{key}={value}"
            );
        }
    }
}
