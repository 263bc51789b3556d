//! Book view: local mirror of the server collection with search,
//! pagination and the add/edit form.

use std::fmt::Write as _;
use std::time::Duration;

use super::{
    alert::{Alert, AlertKind, Banner},
    BooksApi,
};
use crate::models::book::{Book, CreateBook, UpdateBook};

/// Rows shown per page
pub const PAGE_SIZE: usize = 9;

const FETCH_FAILED: &str = "Failed to fetch books. Check if the backend's Running";
const SAVE_FAILED: &str = "Failed to add/update book. Please try again.";
const DELETE_FAILED: &str = "Failed to delete book. Please try again.";
const FIELDS_REQUIRED: &str = "Title and Author are required";
const SAVED: &str = "Book Successfully Added/Updated in the Library!";

/// Book currently being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub id: Option<String>,
    pub title: String,
    pub author: String,
}

pub struct BookView<A> {
    api: A,
    books: Vec<Book>,
    editing: Option<BookDraft>,
    search: String,
    /// 1-based
    current_page: usize,
    alert: Alert,
}

impl<A: BooksApi> BookView<A> {
    pub fn new(api: A, alert_ttl: Duration) -> Self {
        Self {
            api,
            books: Vec::new(),
            editing: None,
            search: String::new(),
            current_page: 1,
            alert: Alert::new(alert_ttl),
        }
    }

    /// Initial fetch. On failure the list stays empty and the error stays visible.
    pub async fn mount(&mut self) {
        match self.api.list().await {
            Ok(books) => {
                tracing::debug!("Fetched {} books", books.len());
                self.books = books;
            }
            Err(e) => {
                tracing::error!("Error fetching books: {}", e);
                self.alert.pin(AlertKind::Error, FETCH_FAILED);
            }
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn draft(&self) -> Option<&BookDraft> {
        self.editing.as_ref()
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Book"
        } else {
            "Add New Book"
        }
    }

    pub fn banner(&self) -> Option<Banner> {
        self.alert.current()
    }

    /// Start editing the book with the given id. Returns false if it is not in the list.
    pub fn start_edit(&mut self, id: &str) -> bool {
        match self.books.iter().find(|book| book.id == id) {
            Some(book) => {
                self.editing = Some(BookDraft {
                    id: Some(book.id.clone()),
                    title: book.title.clone(),
                    author: book.author.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Submit the form: update the draft's book if editing, otherwise add a new one.
    /// Returns true when the server accepted the change.
    pub async fn submit(&mut self, title: &str, author: &str) -> bool {
        if title.is_empty() || author.is_empty() {
            self.alert.show(AlertKind::Error, FIELDS_REQUIRED);
            return false;
        }

        let editing_id = self.editing.as_ref().and_then(|draft| draft.id.clone());
        let result = match editing_id {
            Some(id) => {
                let data = UpdateBook {
                    title: Some(title.to_string()),
                    author: Some(author.to_string()),
                };
                self.api.update(&id, &data).await.map(|updated| {
                    for book in self.books.iter_mut().filter(|book| book.id == id) {
                        *book = updated.clone();
                    }
                    self.editing = None;
                })
            }
            None => self
                .api
                .create(&CreateBook::new(title, author))
                .await
                .map(|created| self.books.push(created)),
        };

        match result {
            Ok(()) => {
                self.alert.show(AlertKind::Success, SAVED);
                true
            }
            Err(e) => {
                tracing::error!("Error adding/updating book: {}", e);
                self.alert.show(AlertKind::Error, SAVE_FAILED);
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        match self.api.delete(id).await {
            Ok(_) => {
                self.books.retain(|book| book.id != id);
                true
            }
            Err(e) => {
                tracing::error!("Error deleting book: {}", e);
                self.alert.show(AlertKind::Error, DELETE_FAILED);
                false
            }
        }
    }

    /// Change the search term. The current page is kept.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Books whose title or author contains the search term, ignoring case
    pub fn filtered(&self) -> Vec<&Book> {
        let term = self.search.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                book.title.to_lowercase().contains(&term)
                    || book.author.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Jump to a page. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
            true
        } else {
            false
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    /// Rows of the current page, numbered by position in the filtered list
    pub fn page(&self) -> Vec<(usize, &Book)> {
        let first = (self.current_page - 1) * PAGE_SIZE;
        self.filtered()
            .into_iter()
            .enumerate()
            .skip(first)
            .take(PAGE_SIZE)
            .map(|(index, book)| (index + 1, book))
            .collect()
    }

    /// Book shown under the given row number
    pub fn book_at(&self, number: usize) -> Option<&Book> {
        number
            .checked_sub(1)
            .and_then(|index| self.filtered().get(index).copied())
    }

    /// Plain-text table and pagination bar
    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(banner) = self.banner() {
            let label = match banner.kind {
                AlertKind::Error => "Error - ",
                AlertKind::Success => "",
            };
            let _ = writeln!(out, "[{}{}]", label, banner.message);
        }

        let rows = self.page();
        let title_width = rows
            .iter()
            .map(|(_, book)| book.title.chars().count())
            .max()
            .unwrap_or(0)
            .max("Title".len());

        let _ = writeln!(out, "{:>3}  {:<title_width$}  Author", "#", "Title");
        for (number, book) in &rows {
            let _ = writeln!(
                out,
                "{:>3}  {:<title_width$}  {}",
                number, book.title, book.author
            );
        }

        let mut bar = vec!["<".to_string()];
        for page in 1..=self.total_pages() {
            if page == self.current_page {
                bar.push(format!("[{}]", page));
            } else {
                bar.push(page.to_string());
            }
        }
        bar.push(">".to_string());
        let _ = write!(out, "{}", bar.join(" "));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, MockBooksApi};

    const TTL: Duration = Duration::from_secs(4);

    fn book(id: &str, title: &str, author: &str) -> Book {
        Book {
            id: id.into(),
            title: title.into(),
            author: author.into(),
        }
    }

    fn server_error() -> ClientError {
        ClientError::Api {
            status: 500,
            message: "boom".into(),
        }
    }

    fn many_books(count: usize) -> Vec<Book> {
        (1..=count)
            .map(|i| book(&i.to_string(), &format!("Title {}", i), "Author"))
            .collect()
    }

    async fn mounted(api: MockBooksApi) -> BookView<MockBooksApi> {
        let mut view = BookView::new(api, TTL);
        view.mount().await;
        view
    }

    fn api_with(books: Vec<Book>) -> MockBooksApi {
        let mut api = MockBooksApi::new();
        api.expect_list().returning(move || Ok(books.clone()));
        api
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_failure_keeps_error_visible() {
        let mut api = MockBooksApi::new();
        api.expect_list().returning(|| Err(server_error()));

        let view = mounted(api).await;
        assert!(view.books().is_empty());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(
            view.banner(),
            Some(Banner {
                kind: AlertKind::Error,
                message: FETCH_FAILED.into(),
            })
        );
    }

    #[tokio::test]
    async fn test_submit_without_draft_appends() {
        let mut api = api_with(vec![book("1", "Dune", "Herbert")]);
        api.expect_create()
            .withf(|data| data.title.as_deref() == Some("Emma") && data.author.as_deref() == Some("Austen"))
            .times(1)
            .returning(|_| Ok(book("2", "Emma", "Austen")));

        let mut view = mounted(api).await;
        assert!(view.submit("Emma", "Austen").await);

        assert_eq!(
            view.books(),
            &[book("1", "Dune", "Herbert"), book("2", "Emma", "Austen")]
        );
        assert_eq!(view.banner().unwrap().kind, AlertKind::Success);
    }

    #[tokio::test]
    async fn test_submit_with_draft_replaces_and_clears() {
        let mut api = api_with(vec![book("1", "Dune", "Herbert"), book("2", "Emma", "Austen")]);
        api.expect_update()
            .withf(|id, data| id == "2" && data.title.as_deref() == Some("Persuasion"))
            .times(1)
            .returning(|_, _| Ok(book("2", "Persuasion", "Austen")));

        let mut view = mounted(api).await;
        assert!(view.start_edit("2"));
        assert_eq!(view.heading(), "Edit Book");
        assert_eq!(
            view.draft(),
            Some(&BookDraft {
                id: Some("2".into()),
                title: "Emma".into(),
                author: "Austen".into(),
            })
        );

        assert!(view.submit("Persuasion", "Austen").await);
        assert_eq!(
            view.books(),
            &[book("1", "Dune", "Herbert"), book("2", "Persuasion", "Austen")]
        );
        assert_eq!(view.draft(), None);
        assert_eq!(view.heading(), "Add New Book");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_state() {
        let mut api = api_with(vec![book("1", "Dune", "Herbert")]);
        api.expect_update().returning(|_, _| Err(server_error()));

        let mut view = mounted(api).await;
        view.start_edit("1");
        assert!(!view.submit("Dune Messiah", "Herbert").await);

        assert_eq!(view.books(), &[book("1", "Dune", "Herbert")]);
        assert!(view.draft().is_some());
        assert_eq!(
            view.banner(),
            Some(Banner {
                kind: AlertKind::Error,
                message: SAVE_FAILED.into(),
            })
        );
    }

    #[tokio::test]
    async fn test_empty_fields_are_not_sent() {
        let mut api = api_with(vec![]);
        api.expect_create().never();

        let mut view = mounted(api).await;
        assert!(!view.submit("Dune", "").await);
        assert_eq!(view.banner().unwrap().message, FIELDS_REQUIRED);
    }

    #[tokio::test]
    async fn test_delete_removes_locally() {
        let mut api = api_with(vec![book("1", "Dune", "Herbert"), book("2", "Emma", "Austen")]);
        api.expect_delete()
            .withf(|id| id == "1")
            .returning(|id| Ok(format!("Book with ID {} deleted successfully", id)));

        let mut view = mounted(api).await;
        assert!(view.delete("1").await);
        assert_eq!(view.books(), &[book("2", "Emma", "Austen")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_delete_shows_transient_error() {
        let mut api = api_with(vec![book("1", "Dune", "Herbert")]);
        api.expect_delete().returning(|_| Err(server_error()));

        let mut view = mounted(api).await;
        assert!(!view.delete("1").await);
        assert_eq!(view.books().len(), 1);
        assert_eq!(view.banner().unwrap().message, DELETE_FAILED);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(view.banner(), None);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_title_or_author() {
        let view_books = vec![
            book("1", "Dune", "Frank Herbert"),
            book("2", "Emma", "Jane Austen"),
            book("3", "Herbarium", "Someone"),
        ];
        let mut view = mounted(api_with(view_books)).await;

        view.set_search("HERB");
        let ids: Vec<&str> = view.filtered().iter().map(|book| book.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        view.set_search("austen");
        assert_eq!(view.filtered().len(), 1);
    }

    #[tokio::test]
    async fn test_search_without_match_renders_nothing() {
        let mut view = mounted(api_with(many_books(12))).await;
        view.set_search("zzz");

        assert!(view.page().is_empty());
        assert_eq!(view.total_pages(), 0);
        assert!(!view.next_page());
        assert!(!view.go_to_page(1));
        assert!(view.render().ends_with("< >"));
    }

    #[tokio::test]
    async fn test_pages_of_nine() {
        let mut view = mounted(api_with(many_books(20))).await;
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.page().len(), PAGE_SIZE);

        assert!(view.go_to_page(3));
        let rows = view.page();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 19);
        assert_eq!(rows[0].1.title, "Title 19");

        assert!(!view.go_to_page(4));
        assert!(!view.go_to_page(0));
        assert!(view.prev_page());
        assert_eq!(view.current_page(), 2);
    }

    #[tokio::test]
    async fn test_search_does_not_reset_page() {
        let mut view = mounted(api_with(many_books(20))).await;
        view.go_to_page(3);

        view.set_search("Title 1");
        // 11 matches: Title 1 and Title 10..=19
        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.current_page(), 3);
        assert!(view.page().is_empty());
    }

    #[tokio::test]
    async fn test_book_at_uses_filtered_numbering() {
        let mut view = mounted(api_with(vec![
            book("1", "Dune", "Herbert"),
            book("2", "Emma", "Austen"),
        ]))
        .await;
        view.set_search("emma");

        assert_eq!(view.book_at(1).map(|book| book.id.as_str()), Some("2"));
        assert_eq!(view.book_at(0), None);
        assert_eq!(view.book_at(2), None);
    }

    #[tokio::test]
    async fn test_render_marks_current_page() {
        let mut view = mounted(api_with(many_books(10))).await;
        view.go_to_page(2);

        let rendered = view.render();
        assert!(rendered.contains(" 10  Title 10"));
        assert!(rendered.ends_with("< 1 [2] >"));
    }
}
