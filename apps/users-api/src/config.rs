use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Comma-separated list of allowed CORS origins; empty allows any origin
pub const CORS_ORIGINS_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=3000
        let cors_origins = parse_origins(&env_or_default(CORS_ORIGINS_VAR, ""));

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            cors_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
