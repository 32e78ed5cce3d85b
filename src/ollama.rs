use std::io;
use std::time::Duration;

use log::{debug, trace, warn};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::spinner::{Spinner, DEFAULT_INTERVAL};

pub const OLLAMA_GENERATE_URL: &str = "http://localhost:11434/api/generate";
pub const OLLAMA_MODEL: &str = "llama3";

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

/// Non-streaming reply to `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub done: bool,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        GenerateRequest {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// Where and how the client talks to the inference server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub model: String,
    /// Redraw period of the progress spinner
    pub spinner_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            endpoint: OLLAMA_GENERATE_URL.to_string(),
            model: OLLAMA_MODEL.to_string(),
            spinner_interval: DEFAULT_INTERVAL,
        }
    }
}

pub struct OllamaClient {
    config: ClientConfig,
    http_client: reqwest::blocking::Client,
}

impl OllamaClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        // generation can take minutes, never give up on the server
        let http_client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(Error::Request)?;

        Ok(OllamaClient {
            config,
            http_client,
        })
    }

    /// Sends one prompt and waits for the whole reply, spinning on stdout meanwhile.
    pub fn generate(&self, prompt: String) -> Result<GenerateResponse> {
        let request = GenerateRequest::new(self.config.model.as_str(), prompt);
        let payload = serde_json::to_vec(&request).map_err(Error::Encode)?;
        debug!(
            "POST {} model={} payload={} bytes",
            self.config.endpoint,
            self.config.model,
            payload.len()
        );

        println!("🤖 Sending code to Ollama... Please wait.");
        let spinner = Spinner::new(self.config.spinner_interval).start(io::stdout());
        let sent = self
            .http_client
            .post(&self.config.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send();
        spinner.stop();

        let response = sent.map_err(Error::Request)?;
        let status = response.status();
        debug!("Ollama response status: {}", status);
        if !status.is_success() {
            warn!("Ollama answered with status {}", status);
        }

        let body = response.bytes().map_err(Error::ReadResponse)?;
        trace!("Ollama response body: {}", String::from_utf8_lossy(&body));

        let generated: GenerateResponse =
            serde_json::from_slice(&body).map_err(Error::ParseResponse)?;
        debug!("Ollama response done={}", generated.done);

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateRequest::new(OLLAMA_MODEL, "review me");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"model": "llama3", "prompt": "review me", "stream": false})
        );
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let body = r#"{"model":"llama3","created_at":"2024-01-01T00:00:00Z","response":"looks good","done":true,"total_duration":12}"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.response, "looks good");
        assert!(response.done);
    }

    #[test]
    fn test_response_requires_text() {
        assert!(serde_json::from_str::<GenerateResponse>(r#"{"done":true}"#).is_err());
    }

    #[test]
    fn test_default_config_targets_local_server() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:11434/api/generate");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.spinner_interval, Duration::from_millis(100));
    }
}
