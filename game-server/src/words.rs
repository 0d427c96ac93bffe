use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use game_core::words::{fallback_batch, fallback_word, is_usable_word, prompt_examples, WordCache};

pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);
const PREGENERATE_COUNT: usize = 5;

/// Source of secret words. Implementations must always produce a word of
/// the requested length: upstream failures are absorbed, never surfaced.
#[async_trait]
pub trait WordProvider: Send + Sync {
    async fn fetch_word(&self, topic: &str, length: usize) -> String;
}

/// Word provider backed by the IBM granite text-generation endpoint, with a
/// per-(topic, length) cache to cut generation calls and the static word
/// tables as the last resort.
pub struct GraniteWordProvider {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    refill_threshold: usize,
    cache: Mutex<WordCache>,
}

#[derive(Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

#[derive(Deserialize)]
struct GenerationResult {
    #[serde(default)]
    generated_text: String,
}

impl GraniteWordProvider {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(GENERATION_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint: config.generation_endpoint.clone(),
            model: config.generation_model.clone(),
            api_key: config.ibm_api_key.clone(),
            refill_threshold: config.word_cache_refill_threshold,
            cache: Mutex::new(WordCache::new()),
        }
    }

    async fn generation_request(&self, prompt: &str, max_new_tokens: u32) -> Option<String> {
        let api_key = self.api_key.as_ref()?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&serde_json::json!({
                "model_id": self.model,
                "input": prompt,
                "parameters": {
                    "max_new_tokens": max_new_tokens,
                    "temperature": 0.7,
                    "top_p": 0.9,
                },
            }))
            .send()
            .await
            .and_then(|response| response.error_for_status());

        let response = match response {
            Ok(response) => response,
            Err(err) => {
                warn!("Word generation request failed: {}", err);
                return None;
            }
        };

        match response.json::<GenerationResponse>().await {
            Ok(body) => body
                .results
                .into_iter()
                .next()
                .map(|result| result.generated_text),
            Err(err) => {
                warn!("Malformed generation response: {}", err);
                None
            }
        }
    }

    async fn generate_one(&self, topic: &str, length: usize) -> Option<String> {
        let prompt = format!(
            "Generate a {}-letter word about {}. Examples: {}. Return only the word.",
            length,
            topic,
            prompt_examples(topic, length)
        );

        let text = self.generation_request(&prompt, 5).await?;
        let candidate = text.trim();
        if is_usable_word(candidate, length) {
            debug!(topic, length, "generated word");
            Some(candidate.to_uppercase())
        } else {
            warn!(topic, length, "generated text unusable: {:?}", candidate);
            None
        }
    }

    async fn generate_batch(&self, topic: &str, length: usize) -> Option<Vec<String>> {
        let prompt = format!(
            "Generate {} different {}-letter words about {}. Examples: {}. Return only the words, one per line.",
            PREGENERATE_COUNT,
            length,
            topic,
            prompt_examples(topic, length)
        );

        let text = self.generation_request(&prompt, 20).await?;
        let words: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| is_usable_word(line, length))
            .map(str::to_uppercase)
            .collect();

        (!words.is_empty()).then_some(words)
    }

    /// Top the cache back up, preferring batch generation and falling back
    /// to the static tables so the cache never stays dry.
    async fn refill(&self, topic: &str, length: usize) {
        let words = match self.generate_batch(topic, length).await {
            Some(words) => {
                info!(topic, length, count = words.len(), "pre-generated words");
                words
            }
            None => {
                info!(topic, length, "pre-generation unavailable, caching fallback words");
                fallback_batch(topic, length, PREGENERATE_COUNT)
            }
        };

        self.cache.lock().await.extend(topic, length, words);
    }
}

#[async_trait]
impl WordProvider for GraniteWordProvider {
    async fn fetch_word(&self, topic: &str, length: usize) -> String {
        let cached = self.cache.lock().await.available(topic, length);
        if cached < self.refill_threshold {
            self.refill(topic, length).await;
        }

        if let Some(word) = self.cache.lock().await.pop(topic, length) {
            debug!(topic, length, "using cached word");
            return word;
        }

        if let Some(word) = self.generate_one(topic, length).await {
            return word;
        }

        info!(topic, length, "using fallback word");
        fallback_word(topic, length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::words::fallback_words;

    fn offline_provider() -> GraniteWordProvider {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            ibm_api_key: None,
            generation_endpoint: "http://localhost:9".to_string(),
            generation_model: "test".to_string(),
            word_cache_refill_threshold: 2,
            session_ttl_minutes: 120,
            cors_origins: vec!["*".to_string()],
        };
        GraniteWordProvider::new(&config)
    }

    #[tokio::test]
    async fn test_offline_provider_serves_table_words() {
        let provider = offline_provider();
        let word = provider.fetch_word("animals", 3).await;
        assert!(fallback_words("animals", 3).contains(&word.as_str()));
    }

    #[tokio::test]
    async fn test_offline_provider_avoids_immediate_reuse() {
        let provider = offline_provider();
        // The refill caches a shuffled fallback batch, popped in order.
        let first = provider.fetch_word("space", 4).await;
        let second = provider.fetch_word("space", 4).await;
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_topic_still_produces_word() {
        let provider = offline_provider();
        let word = provider.fetch_word("unheard-of", 3).await;
        assert!(is_usable_word(&word, 3));
    }
}
