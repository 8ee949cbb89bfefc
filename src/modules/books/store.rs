//! Book persistence.

use bookshelf_db::{DbResult, Table};

use super::models::{Book, BookChanges, BookId, NewBook};

/// Book store abstraction.
pub trait BookStore: Send + Sync {
    /// Persist a new book under a freshly assigned id.
    fn create(&self, book: NewBook) -> DbResult<Book>;

    /// Get a book by id.
    fn get(&self, id: BookId) -> DbResult<Option<Book>>;

    /// All books in ascending id order.
    fn list(&self) -> DbResult<Vec<Book>>;

    /// Apply `changes` to the book stored under `id`.
    fn update(&self, id: BookId, changes: BookChanges) -> DbResult<Book>;

    /// Delete the book stored under `id`.
    fn delete(&self, id: BookId) -> DbResult<()>;

    /// Number of live books.
    fn count(&self) -> DbResult<usize>;
}

/// In-memory book store.
pub struct InMemoryBookStore {
    table: Table<Book>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self {
            table: Table::new("books"),
        }
    }
}

impl Default for InMemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStore for InMemoryBookStore {
    fn create(&self, book: NewBook) -> DbResult<Book> {
        self.table.insert_with(|id| book.into_book(id))
    }

    fn get(&self, id: BookId) -> DbResult<Option<Book>> {
        self.table.get(id)
    }

    fn list(&self) -> DbResult<Vec<Book>> {
        self.table.all()
    }

    fn update(&self, id: BookId, changes: BookChanges) -> DbResult<Book> {
        self.table.update_with(id, |book| changes.apply_to(book))
    }

    fn delete(&self, id: BookId) -> DbResult<()> {
        self.table.remove(id).map(|_| ())
    }

    fn count(&self) -> DbResult<usize> {
        self.table.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookshelf_db::DbError;
    use chrono::NaiveDate;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: format!("{title} Author"),
            published_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        }
    }

    #[test]
    fn create_then_get_returns_same_content() {
        let store = InMemoryBookStore::new();
        let created = store.create(new_book("Book 1")).unwrap();

        let fetched = store.get(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched, new_book("Book 1").into_book(created.id));
    }

    #[test]
    fn count_tracks_live_books() {
        let store = InMemoryBookStore::new();
        let first = store.create(new_book("Book 1")).unwrap();
        store.create(new_book("Book 2")).unwrap();
        assert_eq!(store.count().unwrap(), 2);

        store.delete(first.id).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.list().unwrap().len(), 1);
        assert_eq!(store.get(first.id).unwrap(), None);
    }

    #[test]
    fn update_keeps_id() {
        let store = InMemoryBookStore::new();
        let created = store.create(new_book("Book 1")).unwrap();

        let changes = BookChanges {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = store.update(created.id, changes).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.author, created.author);
    }

    #[test]
    fn missing_books_are_not_found() {
        let store = InMemoryBookStore::new();
        assert!(matches!(store.delete(9999), Err(DbError::NotFound { .. })));
        assert!(matches!(
            store.update(9999, BookChanges::default()),
            Err(DbError::NotFound { .. })
        ));
    }
}
