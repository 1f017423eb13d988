//! In-memory catalog state.
//!
//! `CatalogSnapshot` mirrors the last fetch of the book collection as an
//! insertion-ordered list. It is not a cache with a TTL: it is refreshed only
//! on explicit reload or reconciled entry-by-entry after a confirmed mutation.

use lectern_types::Book;

/// Loading lifecycle for a view backed by an async fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    /// Returns the loaded value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Ordered mirror of the last-fetched book collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    books: Vec<Book>,
}

impl CatalogSnapshot {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Appends a newly created record (confirm-then-apply: called only after
    /// the server acknowledged the create).
    pub fn append(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Replaces the entry with the same id, preserving the order of all other
    /// entries. Returns false if no entry matched (snapshot unchanged).
    pub fn replace(&mut self, book: Book) -> bool {
        match self.books.iter_mut().find(|b| b.id == book.id) {
            Some(slot) => {
                *slot = book;
                true
            }
            None => false,
        }
    }

    /// Removes the entry with the given id. Returns false if no entry matched.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id != id);
        self.books.len() < before
    }
}
