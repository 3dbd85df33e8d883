use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
    pub accounts_path: String,
    pub feedbacks_path: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub storage: Storage,
}

impl Settings {
    /// Built-in defaults, overlaid by an optional config.toml, overlaid by
    /// SCREENPAY-prefixed environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("storage.accounts_path", "users.json")?
            .set_default("storage.feedbacks_path", "feedbacks.json")?
            .add_source(File::with_name("config.toml").required(false))
            .add_source(Environment::with_prefix("screenpay").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
