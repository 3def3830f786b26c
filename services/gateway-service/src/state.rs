use authrelay_common::env_or;
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub backend_base_url: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_or("PORT", 3001u16),
            backend_base_url: env_or("BACKEND_BASE_URL", "http://localhost:8080".to_string()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub backend_base_url: String,
    pub client: Client,
}

impl AppState {
    pub fn new(backend_base_url: String) -> Self {
        Self {
            backend_base_url,
            client: Client::new(),
        }
    }
}
