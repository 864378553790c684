pub mod page_store;
pub mod quote_store;

pub use page_store::PageStore;
pub use quote_store::QuoteStore;
