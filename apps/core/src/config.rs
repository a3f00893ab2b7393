//! Process configuration.
//!
//! Read once from the environment at start-up and handed to the router and
//! each capability constructor. Nothing reads the environment after that.

use crate::error::AppError;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

// --- Defaults ---
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8000);
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";
const DEFAULT_TWIML_URL: &str = "http://demo.twilio.com/docs/voice.xml";
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "alibayram/medgemma:4b";
const DEFAULT_CAPABILITY_TIMEOUT_SECS: u64 = 60;

/// Settings the router reports back alongside every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterConfig {
    /// Forces emergency escalation into simulation. Does not affect routing.
    pub demo_mode: bool,
}

/// Telephony provider settings for emergency escalation.
#[derive(Debug, Clone, Validate)]
pub struct TelephonyConfig {
    pub enable_call: bool,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub emergency_contact: String,
    #[validate(url)]
    pub api_base: String,
    #[validate(url)]
    pub twiml_url: String,
    pub timeout: Duration,
}

impl TelephonyConfig {
    /// True when every credential and number needed to place a call is set.
    pub fn is_complete(&self) -> bool {
        [
            &self.account_sid,
            &self.auth_token,
            &self.from_number,
            &self.emergency_contact,
        ]
        .iter()
        .all(|v| !v.is_empty())
    }
}

/// Language model settings for conversational support.
#[derive(Debug, Clone, Validate)]
pub struct SupportConfig {
    /// When false, a static reply is used and no model is contacted.
    pub enabled: bool,
    #[validate(url)]
    pub base_url: String,
    #[validate(length(min = 1))]
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown LOG_FORMAT '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    pub router: RouterConfig,
    #[validate(nested)]
    pub telephony: TelephonyConfig,
    #[validate(nested)]
    pub support: SupportConfig,
    pub bind_addr: SocketAddr,
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Builds the configuration from environment variables.
    ///
    /// Call `dotenv::dotenv()` beforehand to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, AppError> {
        let timeout = Duration::from_secs(parse_var(
            "CAPABILITY_TIMEOUT_SECS",
            DEFAULT_CAPABILITY_TIMEOUT_SECS,
        )?);

        let config = Self {
            router: RouterConfig {
                demo_mode: get_bool("DEMO_MODE", true),
            },
            telephony: TelephonyConfig {
                enable_call: get_bool("TWILIO_ENABLE_CALL", false),
                account_sid: get_string("TWILIO_ACCOUNT_SID", ""),
                auth_token: get_string("TWILIO_AUTH_TOKEN", ""),
                from_number: get_string("TWILIO_FROM_NUMBER", ""),
                emergency_contact: get_string("EMERGENCY_CONTACT", ""),
                api_base: get_string("TWILIO_API_BASE", DEFAULT_TWILIO_API_BASE),
                twiml_url: get_string("TWILIO_TWIML_URL", DEFAULT_TWIML_URL),
                timeout,
            },
            support: SupportConfig {
                enabled: get_bool("OLLAMA_ENABLED", true),
                base_url: get_string("OLLAMA_BASE_URL", DEFAULT_OLLAMA_BASE_URL),
                model: get_string("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
                timeout,
            },
            bind_addr: parse_var("BIND_ADDR", DEFAULT_BIND_ADDR)?,
            cors_origins: split_list(&get_string("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGINS)),
            log_format: get_string("LOG_FORMAT", "pretty").parse()?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Interprets `1`, `true`, `yes`, `y` and `on` as true; anything else set is false.
fn get_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(val) => matches!(
            val.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "on"
        ),
        Err(_) => default,
    }
}

fn get_string(name: &str, default: &str) -> String {
    env::var(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} has an invalid value '{}': {}", name, raw, e))),
        Err(_) => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
