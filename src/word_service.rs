use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ServiceError;

pub const WORDS_PATH: &str = "/api/words";
pub const VALIDATE_PATH: &str = "/api/validate";

/// Remote source of playable words and the authority on guess validity
pub trait WordService: Send + Sync {
    fn list_words(&self) -> Result<Vec<String>, ServiceError>;
    fn validate(&self, word: &str) -> Result<bool, ServiceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
}

/// Blocking HTTP client for the word service
#[derive(Debug, Clone)]
pub struct HttpWordService {
    base_url: String,
    client: Client,
}

impl HttpWordService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Transport {
                url: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(url: &str, response: Response) -> Result<Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ServiceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            })
        }
    }
}

impl WordService for HttpWordService {
    fn list_words(&self) -> Result<Vec<String>, ServiceError> {
        let url = self.url(WORDS_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| transport(&url, e))?;
        let words = Self::check(&url, response)?
            .json::<Vec<String>>()
            .map_err(|e| malformed(&url, e))?;
        debug!(count = words.len(), "fetched word list");
        Ok(words)
    }

    fn validate(&self, word: &str) -> Result<bool, ServiceError> {
        let url = self.url(VALIDATE_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[("word", word)])
            .send()
            .map_err(|e| transport(&url, e))?;
        let body = Self::check(&url, response)?
            .json::<ValidateResponse>()
            .map_err(|e| malformed(&url, e))?;
        debug!(word, valid = body.valid, "validated guess");
        Ok(body.valid)
    }
}

fn transport(url: &str, e: reqwest::Error) -> ServiceError {
    warn!(url, error = %e, "word service request failed");
    ServiceError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    }
}

fn malformed(url: &str, e: reqwest::Error) -> ServiceError {
    warn!(url, error = %e, "word service sent an unexpected body");
    ServiceError::Malformed {
        url: url.to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let service = HttpWordService::new("http://127.0.0.1:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(service.base_url(), "http://127.0.0.1:5000");
        assert_eq!(service.url(WORDS_PATH), "http://127.0.0.1:5000/api/words");
    }

    #[test]
    fn test_validate_response_shape() {
        let body: ValidateResponse = serde_json::from_str(r#"{"valid": true}"#).unwrap();
        assert!(body.valid);
        assert!(serde_json::from_str::<ValidateResponse>(r#"{"ok": true}"#).is_err());
    }

    #[test]
    fn test_unreachable_service_is_a_transport_error() {
        // Port 9 (discard) is closed on test machines; the connect fails fast
        let service = HttpWordService::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        match service.validate("CRANE") {
            Err(ServiceError::Transport { url, .. }) => {
                assert_eq!(url, "http://127.0.0.1:9/api/validate")
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
