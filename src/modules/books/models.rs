use std::fmt;

use bookshelf_db::RecordId;
use chrono::NaiveDate;

/// Store-assigned identifier of a book.
pub type BookId = RecordId;

/// A book as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// Unique identifier, assigned on creation and never changed
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Date the book was published
    pub published_date: NaiveDate,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Validated content for a book that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_date: NaiveDate,
}

impl NewBook {
    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            published_date: self.published_date,
        }
    }
}

/// Validated changes to an existing book; `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_date: Option<NaiveDate>,
}

impl BookChanges {
    /// Apply the changes to `book`. The id is never touched.
    pub fn apply_to(self, mut book: Book) -> Book {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(published_date) = self.published_date {
            book.published_date = published_date;
        }
        book
    }
}

impl From<NewBook> for BookChanges {
    fn from(book: NewBook) -> Self {
        Self {
            title: Some(book.title),
            author: Some(book.author),
            published_date: Some(book.published_date),
        }
    }
}
