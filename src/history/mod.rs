mod storage;
mod types;

pub use storage::SessionStore;
pub use types::{HistoryEntry, Urgency};
