use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ibm_api_key: Option<String>,
    pub generation_endpoint: String,
    pub generation_model: String,
    pub word_cache_refill_threshold: usize,
    pub session_ttl_minutes: u64,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("Invalid PORT"),
            ibm_api_key: env::var("IBM_API_KEY").ok(),
            generation_endpoint: env::var("GENERATION_ENDPOINT").unwrap_or_else(|_| {
                "https://us-south.ml.cloud.ibm.com/ml/v1/text/generation?version=2024-11-20"
                    .to_string()
            }),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| "ibm/granite-3.3-8b-instruct".to_string()),
            word_cache_refill_threshold: env::var("WORD_CACHE_REFILL_THRESHOLD")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .expect("Invalid WORD_CACHE_REFILL_THRESHOLD"),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .expect("Invalid SESSION_TTL_MINUTES"),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
