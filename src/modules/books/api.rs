//! Books JSON API endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use bookshelf_http::error::{AppError, AppResult};
use serde_json::{Map, Value};

use super::{
    models::{Book, BookId},
    serializers::{self, BookRepresentation, Mode},
    store::BookStore,
};

type Payload = Result<Json<Map<String, Value>>, JsonRejection>;

/// Shared state of the books handlers
#[derive(Clone)]
pub struct BooksState {
    pub store: Arc<dyn BookStore>,
}

/// Parse an `{id}` path segment. Anything but a plain decimal id resolves to
/// no record at all.
pub(crate) fn parse_book_id(raw: &str) -> AppResult<BookId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::not_found("Not found."));
    }
    raw.parse::<BookId>()
        .map_err(|_| AppError::not_found("Not found."))
}

/// Look up a book, turning absence into a 404
pub(crate) fn find_book(store: &dyn BookStore, raw_id: &str) -> AppResult<Book> {
    let id = parse_book_id(raw_id)?;
    store
        .get(id)?
        .ok_or_else(|| AppError::not_found("Not found."))
}

fn payload_object(payload: Payload) -> AppResult<Map<String, Value>> {
    payload
        .map(|Json(data)| data)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

/// List all books
pub async fn list_books(State(state): State<BooksState>) -> AppResult<Json<Vec<BookRepresentation>>> {
    let books = state.store.list()?;
    Ok(Json(books.iter().map(serializers::serialize).collect()))
}

/// Create a book
pub async fn create_book(
    State(state): State<BooksState>,
    payload: Payload,
) -> AppResult<(StatusCode, Json<BookRepresentation>)> {
    let data = payload_object(payload)?;
    let new_book = serializers::deserialize_new(&data)?;

    let book = state.store.create(new_book)?;
    tracing::info!(book_id = book.id, title = %book, "book created");

    Ok((StatusCode::CREATED, Json(serializers::serialize(&book))))
}

/// Get a book by id
pub async fn retrieve_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookRepresentation>> {
    let book = find_book(state.store.as_ref(), &id)?;
    Ok(Json(serializers::serialize(&book)))
}

/// Replace a book; every field is required
pub async fn replace_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    payload: Payload,
) -> AppResult<Json<BookRepresentation>> {
    update_book(&state, &id, payload, Mode::Full)
}

/// Update the supplied fields of a book
pub async fn patch_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
    payload: Payload,
) -> AppResult<Json<BookRepresentation>> {
    update_book(&state, &id, payload, Mode::Partial)
}

fn update_book(
    state: &BooksState,
    raw_id: &str,
    payload: Payload,
    mode: Mode,
) -> AppResult<Json<BookRepresentation>> {
    let existing = find_book(state.store.as_ref(), raw_id)?;
    let data = payload_object(payload)?;
    let changes = serializers::deserialize_changes(&data, mode)?;

    let book = state.store.update(existing.id, changes)?;
    tracing::info!(book_id = book.id, ?mode, "book updated");

    Ok(Json(serializers::serialize(&book)))
}

/// Delete a book
pub async fn delete_book(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let book = find_book(state.store.as_ref(), &id)?;
    state.store.delete(book.id)?;
    tracing::info!(book_id = book.id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}
