use std::path::PathBuf;

const DEFAULT_AUTH_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Directory holding the durable key-value mirror.
    pub data_dir: PathBuf,
    pub auth_api_key: Option<String>,
    pub auth_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let data_dir = std::env::var("MINDTUTOR_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());

        let auth_api_key = std::env::var("FIREBASE_API_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let auth_endpoint = std::env::var("FIREBASE_AUTH_ENDPOINT")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_AUTH_ENDPOINT.to_string());

        Self {
            log_level,
            data_dir,
            auth_api_key,
            auth_endpoint,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mindtutor")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_defaults_to_identity_toolkit() {
        let config = Config {
            log_level: "info".to_string(),
            data_dir: PathBuf::from("/tmp"),
            auth_api_key: None,
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
        };
        assert!(config.auth_endpoint.starts_with("https://identitytoolkit"));
    }
}
