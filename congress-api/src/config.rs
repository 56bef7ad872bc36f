//! Server configuration: JSON file, environment, defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use congress_core::constants::{DEFAULT_API_BASE, DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT_SECONDS};
use congress_core::error::{CongressError, Result};
use congress_propublica::ProPublicaConfig;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PUBLIC_DIR: &str = "./public";

/// Proxy server configuration.
///
/// The file format uses the keys `Port`, `Public`, `ApiBase`, `ApiKey` and
/// `CacheTimeOut`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of static client files
    #[serde(rename = "Public", default = "default_public_dir")]
    pub public_dir: PathBuf,
    /// ProPublica API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// ProPublica API key
    #[serde(default)]
    pub api_key: String,
    /// TTL applied to every cached upstream response
    #[serde(
        rename = "CacheTimeOut",
        default = "default_cache_ttl",
        serialize_with = "serialize_ttl",
        deserialize_with = "deserialize_ttl"
    )]
    pub cache_ttl: Duration,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_public_dir() -> PathBuf {
    DEFAULT_PUBLIC_DIR.into()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}

fn default_cache_ttl() -> Duration {
    DEFAULT_CACHE_TTL
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: default_public_dir(),
            api_base: default_api_base(),
            api_key: String::new(),
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl ServerConfig {
    /// Loads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CongressError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            CongressError::ConfigError(format!("Invalid config {}: {}", path.display(), e))
        })
    }

    /// Loads configuration from the environment (and `.env`), with defaults.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let port = match std::env::var("PORT") {
            Ok(v) => v
                .parse()
                .map_err(|_| CongressError::ConfigError(format!("Invalid PORT: {}", v)))?,
            Err(_) => defaults.port,
        };

        let cache_ttl = match std::env::var("CACHE_TTL") {
            Ok(v) => parse_ttl(&v)?,
            Err(_) => defaults.cache_ttl,
        };

        Ok(Self {
            port,
            public_dir: std::env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            api_base: std::env::var("PROPUBLICA_API_BASE").unwrap_or(defaults.api_base),
            api_key: std::env::var("PROPUBLICA_API_KEY").unwrap_or(defaults.api_key),
            cache_ttl,
        })
    }

    /// Returns the upstream client configuration.
    pub fn propublica(&self) -> ProPublicaConfig {
        ProPublicaConfig {
            base_url: self.api_base.clone(),
            api_key: self.api_key.clone(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Parses a cache timeout such as `24h`, `1.5h`, `1h30m`, `45s`, `500ms` or
/// `300us`.
///
/// Accepts the units `h`, `m`, `s`, `ms`, `us` (or `µs`) and `ns`, each
/// number optionally carrying a decimal fraction. A bare integer is a number
/// of seconds. A negative value means "expire immediately" and maps to zero.
pub fn parse_ttl(input: &str) -> Result<Duration> {
    let invalid = || CongressError::ConfigError(format!("Invalid cache timeout: {:?}", input));

    let s = input.trim();
    if s.is_empty() {
        return Err(invalid());
    }
    if let Ok(seconds) = s.parse::<u64>() {
        return Ok(Duration::from_secs(seconds));
    }

    let (negative, mut rest) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let (whole, tail) = split_digits(rest);
        let (fraction, tail) = match tail.strip_prefix('.') {
            Some(after) => split_digits(after),
            None => ("", tail),
        };
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let nanos_per_unit: u128 = match unit {
            "h" => 3_600_000_000_000,
            "m" => 60_000_000_000,
            "s" => 1_000_000_000,
            "ms" => 1_000_000,
            "us" | "µs" | "μs" => 1_000,
            "ns" => 1,
            _ => return Err(invalid()),
        };
        rest = tail;

        let whole: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut nanos = whole.checked_mul(nanos_per_unit).ok_or_else(invalid)?;

        if !fraction.is_empty() {
            // Truncated so the product stays within u128.
            let fraction = &fraction[..fraction.len().min(18)];
            let scale = 10u128.pow(fraction.len() as u32);
            let value: u128 = fraction.parse().map_err(|_| invalid())?;
            nanos += value * nanos_per_unit / scale;
        }

        total_nanos = total_nanos.checked_add(nanos).ok_or_else(invalid)?;
    }

    let total_nanos = u64::try_from(total_nanos).map_err(|_| invalid())?;
    Ok(if negative {
        Duration::ZERO
    } else {
        Duration::from_nanos(total_nanos)
    })
}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(len)
}

fn serialize_ttl<S: Serializer>(ttl: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let nanos = ttl.subsec_nanos();
    if nanos == 0 {
        serializer.serialize_str(&format!("{}s", ttl.as_secs()))
    } else if nanos % 1_000_000 == 0 {
        serializer.serialize_str(&format!("{}ms", ttl.as_millis()))
    } else {
        serializer.serialize_str(&format!("{}ns", ttl.as_nanos()))
    }
}

fn deserialize_ttl<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTtl {
        Seconds(u64),
        Text(String),
    }

    match RawTtl::deserialize(deserializer)? {
        RawTtl::Seconds(seconds) => Ok(Duration::from_secs(seconds)),
        RawTtl::Text(text) => parse_ttl(&text).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_case::test_case;

    #[test_case("24h", 86_400_000 ; "hours")]
    #[test_case("90m", 5_400_000 ; "minutes")]
    #[test_case("1h30m", 5_400_000 ; "compound")]
    #[test_case("45s", 45_000 ; "seconds")]
    #[test_case("1500ms", 1_500 ; "milliseconds")]
    #[test_case("600", 600_000 ; "bare seconds")]
    #[test_case("-1s", 0 ; "negative expires immediately")]
    #[test_case(" 2h ", 7_200_000 ; "whitespace")]
    #[test_case("1.5h", 5_400_000 ; "fractional hours")]
    #[test_case("0.5m", 30_000 ; "fractional minutes")]
    #[test_case(".5s", 500 ; "fraction without whole part")]
    #[test_case("1h0.5m", 3_630_000 ; "compound fraction")]
    fn test_parse_ttl(input: &str, millis: u64) {
        assert_eq!(parse_ttl(input).unwrap(), Duration::from_millis(millis));
    }

    #[test_case("300us", 300_000 ; "microseconds")]
    #[test_case("2µs", 2_000 ; "micro sign")]
    #[test_case("100ns", 100 ; "nanoseconds")]
    #[test_case("1.5us", 1_500 ; "fractional microseconds")]
    #[test_case("1s1ns", 1_000_000_001 ; "seconds and nanoseconds")]
    fn test_parse_ttl_sub_millisecond(input: &str, nanos: u64) {
        assert_eq!(parse_ttl(input).unwrap(), Duration::from_nanos(nanos));
    }

    #[test_case("" ; "empty")]
    #[test_case("h" ; "missing number")]
    #[test_case("10d" ; "unknown unit")]
    #[test_case("-" ; "sign only")]
    #[test_case("1h-5m" ; "embedded sign")]
    #[test_case(".h" ; "lone decimal point")]
    #[test_case("1.5" ; "fraction without unit")]
    #[test_case("99999999999h" ; "overflow")]
    fn test_parse_ttl_invalid(input: &str) {
        assert!(parse_ttl(input).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "Port": 9000,
                "Public": "./dist",
                "ApiBase": "https://api.propublica.org/congress/v1",
                "ApiKey": "secret",
                "CacheTimeOut": "12h"
            }}"#
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.public_dir, PathBuf::from("./dist"));
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.cache_ttl, Duration::from_secs(12 * 3600));
    }

    #[test]
    fn test_from_file_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ApiKey": "secret", "CacheTimeOut": 60}}"#).unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn test_from_file_rejects_bad_ttl() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"CacheTimeOut": "forever"}}"#).unwrap();

        let err = ServerConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CongressError::ConfigError(_)));
        assert!(!err.is_upstream_error());
    }

    #[test]
    fn test_from_file_malformed_json_names_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = ServerConfig::from_file(file.path()).unwrap_err();
        match err {
            CongressError::ConfigError(msg) => {
                assert!(msg.contains(&file.path().display().to_string()))
            }
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file_fractional_ttl() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"CacheTimeOut": "1.5h"}}"#).unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cache_ttl, Duration::from_secs(90 * 60));
    }

    #[test]
    fn test_missing_file() {
        let err = ServerConfig::from_file("/nonexistent/congress.json").unwrap_err();
        assert!(matches!(err, CongressError::ConfigError(_)));
    }

    #[test]
    fn test_ttl_serializes_as_duration_string() {
        let config = ServerConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["CacheTimeOut"], "86400s");

        let back: ServerConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.cache_ttl, DEFAULT_CACHE_TTL);

        let precise = ServerConfig {
            cache_ttl: Duration::from_nanos(1_500),
            ..Default::default()
        };
        let json = serde_json::to_value(&precise).unwrap();
        assert_eq!(json["CacheTimeOut"], "1500ns");
        let back: ServerConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.cache_ttl, Duration::from_nanos(1_500));
    }

    #[test]
    fn test_propublica_config() {
        let config = ServerConfig {
            api_key: "secret".into(),
            ..Default::default()
        };
        let upstream = config.propublica();
        assert_eq!(upstream.api_key, "secret");
        assert_eq!(upstream.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }
}
