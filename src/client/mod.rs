//! Client side of the inventory: HTTP access to the API and the book view
//! that mirrors the server collection locally.

pub mod alert;
pub mod http;
pub mod view;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::book::{Book, CreateBook, UpdateBook};

pub use alert::{Alert, AlertKind, Banner};
pub use http::HttpBooksApi;
pub use view::{BookDraft, BookView, PAGE_SIZE};

/// Client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Operations the view needs from the server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Book>>;

    async fn create(&self, data: &CreateBook) -> ClientResult<Book>;

    async fn update(&self, id: &str, data: &UpdateBook) -> ClientResult<Book>;

    /// Returns the server's confirmation message
    async fn delete(&self, id: &str) -> ClientResult<String>;
}
