//! Bookshelf application library
//!
//! Application modules built on the bookshelf kernel. The only module today
//! is [`books`], a catalogue of books served as a JSON API and as HTML pages.

pub mod modules;

pub use modules::{books, register_all};
