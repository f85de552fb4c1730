use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    /// Admin session configuration
    pub session: SessionConfig,
    /// External media host configuration
    #[serde(default)]
    pub media: MediaConfig,
    /// Livestream control service configuration
    #[serde(default)]
    pub livestream: LivestreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Admin session configuration.
///
/// The admin identity is explicit configuration: a username plus an
/// Argon2id password hash. Plaintext credentials never appear in the
/// repository or the config files.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// HS256 signing secret for session tokens
    pub secret: String,

    /// Admin login name
    pub admin_username: String,

    /// PHC-formatted Argon2id hash of the admin password
    pub admin_password_hash: String,

    /// Session lifetime in seconds (default: 3600 = 1 hour)
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: i64,

    /// Leeway in seconds for clock skew tolerance (default: 30)
    #[serde(default = "default_token_leeway")]
    pub leeway_secs: u64,
}

/// Media host configuration for photo and recording uploads.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// Whether uploads to the external host are enabled
    #[serde(default)]
    pub enabled: bool,

    /// Multipart upload endpoint of the media host
    #[serde(default)]
    pub upload_url: String,

    /// Upload preset/authorization identifier supplied with every upload
    #[serde(default)]
    pub upload_preset: String,

    /// API key (required only for signed uploads)
    #[serde(default)]
    pub api_key: String,

    /// API secret; when set, uploads carry a SHA-256 request signature
    #[serde(default)]
    pub api_secret: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_media_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            upload_url: String::new(),
            upload_preset: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_ms: default_media_timeout_ms(),
        }
    }
}

/// Livestream control service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LivestreamConfig {
    /// Whether the livestream admin screen is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the stream control service
    #[serde(default)]
    pub base_url: String,

    /// Playback URL handed to the embedded player
    #[serde(default)]
    pub playback_url: String,

    /// Status poll interval in seconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Request timeout in milliseconds
    #[serde(default = "default_livestream_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LivestreamConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            playback_url: String::new(),
            poll_interval_secs: default_poll_interval(),
            timeout_ms: default_livestream_timeout_ms(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_token_expiry() -> i64 {
    3600
}
fn default_token_leeway() -> u64 {
    30
}
fn default_media_timeout_ms() -> u64 {
    30000
}
fn default_poll_interval() -> u64 {
    5
}
fn default_livestream_timeout_ms() -> u64 {
    10000
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration with defaults
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with CM__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("CM").separator("__"))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    /// Load configuration for testing with custom overrides.
    ///
    /// Builds the config entirely from embedded defaults and overrides so
    /// tests never depend on files or the process environment.
    pub fn load_for_test(overrides: &[(&str, &str)]) -> Result<Self, config::ConfigError> {
        let defaults = r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            request_timeout_secs = 30

            [logging]
            level = "info"
            format = "json"

            [security]
            cors_origins = []

            [session]
            secret = ""
            admin_username = ""
            admin_password_hash = ""
            token_expiry_secs = 3600
            leeway_secs = 30

            [media]
            enabled = false
            upload_url = ""
            upload_preset = ""
            api_key = ""
            api_secret = ""
            timeout_ms = 30000

            [livestream]
            enabled = false
            base_url = ""
            playback_url = ""
            poll_interval_secs = 5
            timeout_ms = 10000
        "#;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(defaults, config::FileFormat::Toml));

        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }

        // Validation is skipped to allow partial configs in tests.
        builder.build()?.try_deserialize()
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.session.secret.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CM__SESSION__SECRET environment variable must be set".to_string(),
            ));
        }

        if self.session.admin_username.is_empty() || self.session.admin_password_hash.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "CM__SESSION__ADMIN_USERNAME and CM__SESSION__ADMIN_PASSWORD_HASH must be set"
                    .to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigValidationError::InvalidValue(
                "Server port cannot be 0".to_string(),
            ));
        }

        // Enabled external services must name their endpoints up front;
        // a half-configured service would otherwise fail only when an admin
        // first touches the dependent screen.
        if self.media.enabled && (self.media.upload_url.is_empty() || self.media.upload_preset.is_empty())
        {
            return Err(ConfigValidationError::MissingRequired(
                "media.upload_url and media.upload_preset are required when media.enabled"
                    .to_string(),
            ));
        }

        if self.livestream.enabled && self.livestream.base_url.is_empty() {
            return Err(ConfigValidationError::MissingRequired(
                "livestream.base_url is required when livestream.enabled".to_string(),
            ));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .expect("Invalid socket address")
    }
}
