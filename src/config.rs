const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Location of the scoring backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_url: option_env!("COGNITIVA_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("COGNITIVA_API_URL").unwrap_or_else(|_| {
                option_env!("COGNITIVA_API_URL")
                    .unwrap_or(DEFAULT_API_URL)
                    .to_string()
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
