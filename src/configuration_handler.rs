use crate::configuration::Configuration;
use std::env;

/// Environment-variable backed configuration. `.env` is loaded by main
/// before this is constructed.
#[derive(Debug, Clone)]
pub struct ConfigurationHandler {
    port: String,
    cors_origin: String,
    run_mode: String,
}

impl ConfigurationHandler {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT").unwrap_or_else(|_| "5000".into()),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
            run_mode: env::var("RUN_MODE").unwrap_or_else(|_| "development".into()),
        }
    }
}

impl Configuration for ConfigurationHandler {
    fn port(&self) -> String {
        self.port.clone()
    }

    fn cors_origin(&self) -> String {
        self.cors_origin.clone()
    }

    fn run_mode(&self) -> String {
        self.run_mode.clone()
    }
}
