use authrelay_common::env_or;

#[derive(Clone)]
pub struct AppState {
    pub demo_username: String,
    pub demo_password: String,
}

impl AppState {
    pub fn from_env() -> Self {
        // Demo credential pair; real credential storage is out of scope.
        Self {
            demo_username: env_or("DEMO_USERNAME", "admin".to_string()),
            demo_password: env_or("DEMO_PASSWORD", "1234".to_string()),
        }
    }
}
