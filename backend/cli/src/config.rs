/// PlantGuard runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Inference endpoint API key
    pub api_key: Option<String>,
    /// Model name for the inference endpoint
    pub model: String,
    /// Override for the endpoint base URL
    pub api_base_url: Option<String>,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            api_base_url: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("PLANTGUARD_BIND")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PLANTGUARD_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            api_key: std::env::var("PLANTGUARD_API_KEY").ok(),
            model: std::env::var("PLANTGUARD_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            api_base_url: std::env::var("PLANTGUARD_API_URL").ok(),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
