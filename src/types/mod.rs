use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::components::TemplateComponent;
use crate::config::Config;
use crate::errors::WikiError;
use crate::services::{PageStore, QuoteStore};

static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9]+$").expect("title pattern is valid"));

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pages: Arc<PageStore>,
    pub templates: Arc<TemplateComponent>,
    /// Opened at startup; not consulted by any page handler.
    pub quotes: Arc<QuoteStore>,
}

impl AppState {
    /// Open every store named by `config`; the caller decides what a failure means
    pub fn from_config(config: &Config) -> Result<Self, WikiError> {
        let pages = PageStore::open(config.pages_dir.clone())?;
        let templates = TemplateComponent::new(config.templates_dir.clone());
        let quotes = QuoteStore::open(&config.quotes_db)?;
        log::info!("Quote store ready with {} quotes", quotes.list()?.len());

        Ok(Self {
            pages: Arc::new(pages),
            templates: Arc::new(templates),
            quotes: Arc::new(quotes),
        })
    }
}

/// Alphanumeric page identifier, used as URL segment and filename stem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, WikiError> {
        if TITLE_PATTERN.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(WikiError::InvalidTitle(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A titled text document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into() }
    }

    /// A page that has never been saved
    pub fn empty(title: Title) -> Self {
        Self { title, body: Vec::new() }
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Short text snippet with tags, kept in the quote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub id: i64,
    pub body: String,
    pub tags: Vec<String>,
}
