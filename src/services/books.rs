//! Books service: request validation in front of the repository

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook, MISSING_TITLE_OR_AUTHOR, MISSING_UPDATE_FIELD},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = self.repository.books_list().await?;
        tracing::debug!("Listing {} books", books.len());
        Ok(books)
    }

    /// Create a book. Both title and author must be non-empty.
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        data.validate()
            .map_err(|_| AppError::InvalidInput(MISSING_TITLE_OR_AUTHOR.to_string()))?;

        let (Some(title), Some(author)) = (data.title.as_deref(), data.author.as_deref()) else {
            return Err(AppError::InvalidInput(MISSING_TITLE_OR_AUTHOR.to_string()));
        };

        let book = self.repository.books_create(title, author).await?;
        tracing::info!("Created book id={} title={:?}", book.id, book.title);
        Ok(book)
    }

    /// Update a book. At least one of title/author must be non-empty.
    pub async fn update(&self, id: &str, data: &UpdateBook) -> AppResult<Book> {
        data.validate()
            .map_err(|_| AppError::InvalidInput(MISSING_UPDATE_FIELD.to_string()))?;

        let book = self.repository.books_update(id, data).await?;
        tracing::info!("Updated book id={}", book.id);
        Ok(book)
    }

    /// Delete a book and return the confirmation message
    pub async fn delete(&self, id: &str) -> AppResult<String> {
        self.repository.books_delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(format!("Book with ID {} deleted successfully", id))
    }
}
