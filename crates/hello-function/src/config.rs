//! Host configuration

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How the binary exposes the function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Listen for HTTP requests directly.
    #[default]
    Http,
    /// Act as a worker: length-prefixed JSON frames over stdin/stdout.
    Ipc,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "ipc" => Ok(Self::Ipc),
            other => Err(format!("unknown run mode: {}", other)),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Ipc => f.write_str("ipc"),
        }
    }
}

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionConfig {
    /// Address to bind the HTTP listener to
    pub host: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// HTTP listener or stdin/stdout worker
    pub mode: RunMode,

    /// Requests running longer than this get a 408
    pub request_timeout_secs: u64,

    /// Largest request body the host will buffer
    pub max_body_bytes: usize,
}

impl FunctionConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            host: lookup("HELLO_FUNCTION_HOST").unwrap_or(defaults.host),

            // Hosting platforms inject PORT; an explicit override wins.
            port: parse_var(&lookup, "HELLO_FUNCTION_PORT")
                .or_else(|| parse_var(&lookup, "PORT"))
                .unwrap_or(defaults.port),

            mode: match lookup("HELLO_FUNCTION_MODE") {
                Some(raw) => raw.parse().unwrap_or_else(|e| {
                    tracing::warn!("{}, falling back to {}", e, defaults.mode);
                    defaults.mode
                }),
                None => defaults.mode,
            },

            request_timeout_secs: parse_var(&lookup, "HELLO_FUNCTION_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),

            max_body_bytes: parse_var(&lookup, "HELLO_FUNCTION_MAX_BODY_BYTES")
                .unwrap_or(defaults.max_body_bytes),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

impl Default for FunctionConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            mode: RunMode::Http,
            request_timeout_secs: 60,
            max_body_bytes: 1024 * 1024,
        }
    }
}
