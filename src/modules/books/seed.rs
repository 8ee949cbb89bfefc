//! Preloading books from a JSON file.

use std::path::Path;

use anyhow::{bail, Context};
use serde_json::Value;

use super::{serializers, store::BookStore};

/// Create every book listed in `json`, a JSON array of book objects.
///
/// All entries are validated before any is stored; `id` keys are ignored and
/// fresh ids assigned. Returns the number of books created.
pub fn load_books(store: &dyn BookStore, json: &str) -> anyhow::Result<usize> {
    let value: Value = serde_json::from_str(json).context("seed data is not valid JSON")?;
    let Value::Array(entries) = value else {
        bail!("seed data must be a JSON array of books");
    };

    let mut books = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(data) = entry.as_object() else {
            bail!("seed entry {index} is not an object");
        };
        let book = serializers::deserialize_new(data)
            .with_context(|| format!("seed entry {index} is invalid"))?;
        books.push(book);
    }

    let count = books.len();
    for book in books {
        store.create(book)?;
    }
    Ok(count)
}

/// Read `path` and load its books into `store`.
pub fn load_books_from_file(store: &dyn BookStore, path: &Path) -> anyhow::Result<usize> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let count = load_books(store, &json)
        .with_context(|| format!("failed to load seed file {}", path.display()))?;
    tracing::info!(path = %path.display(), count, "seeded books");
    Ok(count)
}
