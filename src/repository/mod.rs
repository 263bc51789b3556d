//! Repository layer owning the in-memory book collection

pub mod books;

use std::sync::Arc;
use tokio::sync::RwLock;

use books::BookTable;

/// Main repository struct. Clones share the same collection.
#[derive(Clone, Default)]
pub struct Repository {
    books: Arc<RwLock<BookTable>>,
}

impl Repository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }
}
