//! Configuration management
//!
//! Settings come from environment variables (with a `.env` file honored in
//! dev), falling back to defaults suitable for local runs.

use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub telephony: TelephonyConfig,
    pub voice_token: VoiceTokenConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelephonyConfig {
    /// `twilio` or `mock`
    pub provider: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub answer_url: String,
}

/// Credentials for the browser voice SDK path; the issuer is only wired
/// up when every field is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceTokenConfig {
    pub api_key_sid: String,
    pub api_key_secret: String,
    pub app_sid: String,
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> Self {
        let config = Self {
            server: ServerConfig {
                host: get_env("SERVER_HOST", "0.0.0.0"),
                port: get_env("SERVER_PORT", "8080").parse().unwrap_or(8080),
            },
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", "postgres://localhost/callbridge"),
            },
            jwt: JwtConfig {
                secret: get_env("JWT_SECRET", DEFAULT_JWT_SECRET),
            },
            telephony: TelephonyConfig {
                provider: get_env("VOIP_PROVIDER", "twilio"),
                account_sid: get_env("VOIP_ACCOUNT_SID", ""),
                auth_token: get_env("VOIP_AUTH_TOKEN", ""),
                from_number: get_env("VOIP_FROM_NUMBER", ""),
                answer_url: get_env("VOIP_ANSWER_URL", ""),
            },
            voice_token: VoiceTokenConfig {
                api_key_sid: get_env("VOICE_API_KEY_SID", ""),
                api_key_secret: get_env("VOICE_API_KEY_SECRET", ""),
                app_sid: get_env("VOICE_APP_SID", ""),
            },
        };

        if config.jwt.secret == DEFAULT_JWT_SECRET {
            warn!("using default JWT secret; set JWT_SECRET in production");
        }
        if config.telephony.provider == "twilio"
            && (config.telephony.account_sid.is_empty()
                || config.telephony.auth_token.is_empty())
        {
            warn!("telephony credentials not set; calls will fail until VOIP_ACCOUNT_SID and VOIP_AUTH_TOKEN are configured");
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/callbridge".to_string(),
            },
            jwt: JwtConfig {
                secret: DEFAULT_JWT_SECRET.to_string(),
            },
            telephony: TelephonyConfig {
                provider: "mock".to_string(),
                account_sid: String::new(),
                auth_token: String::new(),
                from_number: String::new(),
                answer_url: String::new(),
            },
            voice_token: VoiceTokenConfig {
                api_key_sid: String::new(),
                api_key_secret: String::new(),
                app_sid: String::new(),
            },
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
