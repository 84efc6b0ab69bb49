pub mod analysis;
pub mod config;
pub mod error;
pub mod history;
pub mod llm;
pub mod server;

pub use error::{Error, PARSING_FALLBACK_MESSAGE, Result};
