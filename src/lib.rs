//! Tinywiki - a small file-backed wiki
//!
//! Pages are plain-text files named after their titles, rendered through
//! HTML templates and edited from the browser.

pub mod components;
pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod logger;
pub mod router;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use router::build_router;
pub use types::{AppState, Page, Quote, Title};
pub use services::{PageStore, QuoteStore};
pub use components::TemplateComponent;
