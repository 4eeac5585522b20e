use std::env;
use std::time::Duration;

use auth::Algorithm;
use auth::Authenticator;
use auth::HashScheme;
use auth::PasswordHasher;
use auth::TokenService;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub gw2: Gw2Config,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
    #[serde(default = "default_remember_me_days")]
    pub remember_me_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Gw2Config {
    #[serde(default = "default_gw2_base_url")]
    pub base_url: String,
    #[serde(default = "default_gw2_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    auth::token::DEFAULT_TOKEN_TTL_MINUTES
}

fn default_remember_me_days() -> i64 {
    auth::token::EXTENDED_TOKEN_TTL_DAYS
}

fn default_scheme() -> String {
    "bcrypt".to_string()
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_gw2_base_url() -> String {
    "https://api.guildwars2.com/v2".to_string()
}

fn default_gw2_timeout_seconds() -> u64 {
    30
}

fn default_allowed_origins() -> String {
    "http://localhost:3000,http://localhost:5173".to_string()
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl Default for Gw2Config {
    fn default() -> Self {
        Self {
            base_url: default_gw2_base_url(),
            timeout_seconds: default_gw2_timeout_seconds(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Password hasher and token service wired together.
    ///
    /// # Errors
    /// * `Message` - Invalid `jwt` or `password` section
    pub fn authenticator(&self) -> Result<Authenticator, ConfigError> {
        Ok(Authenticator::new(
            self.password.password_hasher()?,
            self.jwt.token_service()?,
        ))
    }
}

impl JwtConfig {
    /// Build the token service described by this section.
    ///
    /// # Errors
    /// * `Message` - Unknown algorithm, non-HMAC algorithm, empty secret or
    ///   non-positive lifetimes
    pub fn token_service(&self) -> Result<TokenService, ConfigError> {
        if self.expiration_minutes <= 0 || self.remember_me_days <= 0 {
            return Err(ConfigError::Message(
                "jwt token lifetimes must be positive".to_string(),
            ));
        }

        let algorithm: Algorithm = self
            .algorithm
            .parse()
            .map_err(|_| ConfigError::Message(format!("unknown jwt algorithm {}", self.algorithm)))?;

        let service = TokenService::new(self.secret.as_bytes(), algorithm)
            .map_err(|e| ConfigError::Message(e.to_string()))?
            .with_default_ttl(chrono::Duration::minutes(self.expiration_minutes))
            .with_extended_ttl(chrono::Duration::days(self.remember_me_days));

        Ok(service)
    }
}

impl PasswordConfig {
    /// # Errors
    /// * `Message` - Unknown scheme or bcrypt cost out of range
    pub fn password_hasher(&self) -> Result<PasswordHasher, ConfigError> {
        let scheme: HashScheme = self
            .scheme
            .parse()
            .map_err(|e: auth::PasswordError| ConfigError::Message(e.to_string()))?;

        PasswordHasher::new()
            .with_scheme(scheme)
            .with_bcrypt_cost(self.bcrypt_cost)
            .map_err(|e| ConfigError::Message(e.to_string()))
    }
}

impl Gw2Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl CorsConfig {
    /// Trimmed, non-empty origins.
    ///
    /// # Errors
    /// * `Message` - Wildcard origin, which credentialed CORS cannot use
    pub fn origins(&self) -> Result<Vec<String>, ConfigError> {
        let origins: Vec<String> = self
            .allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.iter().any(|origin| origin == "*") {
            return Err(ConfigError::Message(
                "cors.allowed_origins must list explicit origins, not *".to_string(),
            ));
        }

        Ok(origins)
    }
}
