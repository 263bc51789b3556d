//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, UpdateBook},
};

/// Records in insertion order plus the id counter.
#[derive(Debug)]
pub struct BookTable {
    rows: Vec<Book>,
    /// Next id to hand out. Only ever incremented.
    next_id: u64,
}

impl Default for BookTable {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl BookTable {
    fn position(&self, id: &str) -> Option<usize> {
        self.rows.iter().position(|book| book.id == id)
    }
}

impl Repository {
    /// List all books in insertion order
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let table = self.books.read().await;
        Ok(table.rows.clone())
    }

    /// Create a book with a freshly minted id
    pub async fn books_create(&self, title: &str, author: &str) -> AppResult<Book> {
        let mut table = self.books.write().await;

        let book = Book {
            id: table.next_id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
        };
        table.next_id += 1;
        table.rows.push(book.clone());

        Ok(book)
    }

    /// Update title and/or author in place
    pub async fn books_update(&self, id: &str, data: &UpdateBook) -> AppResult<Book> {
        let mut table = self.books.write().await;

        let book = table
            .rows
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with ID {} not found", id)))?;

        if let Some(title) = data.title() {
            book.title = title.to_string();
        }
        if let Some(author) = data.author() {
            book.author = author.to_string();
        }

        Ok(book.clone())
    }

    /// Delete a book
    pub async fn books_delete(&self, id: &str) -> AppResult<()> {
        let mut table = self.books.write().await;

        let index = table
            .position(id)
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        table.rows.remove(index);

        Ok(())
    }
}
