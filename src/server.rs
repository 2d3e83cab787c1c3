//! The word service: serves the playable word list and answers validity checks.

use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::error::WordBankError;
use crate::word_list::{is_playable, normalize};
use crate::word_service::{ValidateResponse, VALIDATE_PATH, WORDS_PATH};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

pub const BUNDLED_WORDS: &str = "valid-words.json";

/// Uppercase five letter words the service knows about
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    words: BTreeSet<String>,
}

impl WordBank {
    pub fn bundled() -> Result<Self, WordBankError> {
        let file = WORDS_DIR
            .get_file(BUNDLED_WORDS)
            .ok_or_else(|| WordBankError::MissingBundle(BUNDLED_WORDS.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| WordBankError::MissingBundle(BUNDLED_WORDS.to_string()))?;
        Self::from_json(contents)
    }

    pub fn from_path(path: &Path) -> Result<Self, WordBankError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, WordBankError> {
        let raw: Vec<String> = serde_json::from_str(json)?;
        let words: BTreeSet<String> = raw
            .iter()
            .map(|w| normalize(w))
            .filter(|w| is_playable(w))
            .collect();
        if words.is_empty() {
            return Err(WordBankError::Empty);
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    pub fn words(&self) -> Vec<String> {
        self.words.iter().cloned().collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    #[serde(default)]
    pub word: String,
}

async fn list_words(State(bank): State<Arc<WordBank>>) -> Json<Vec<String>> {
    Json(bank.words())
}

async fn validate_word(
    State(bank): State<Arc<WordBank>>,
    Query(query): Query<ValidateQuery>,
) -> Json<ValidateResponse> {
    let valid = bank.contains(&query.word);
    debug!(word = %query.word, valid, "validate");
    Json(ValidateResponse { valid })
}

pub fn build_router(bank: Arc<WordBank>) -> Router {
    Router::new()
        .route(WORDS_PATH, get(list_words))
        .route(VALIDATE_PATH, get(validate_word))
        .with_state(bank)
}

pub async fn serve_listener(listener: TcpListener, bank: WordBank) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, words = bank.len(), "word service listening");
    axum::serve(listener, build_router(Arc::new(bank))).await
}

pub async fn serve(addr: SocketAddr, bank: WordBank) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_listener(listener, bank).await
}
