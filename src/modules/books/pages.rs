//! Server-rendered book pages

use axum::{
    extract::{Path, State},
    response::Html,
};
use bookshelf_http::error::AppResult;

use super::{api::find_book, api::BooksState, templates};

/// HTML listing of every book
pub async fn book_list_page(State(state): State<BooksState>) -> AppResult<Html<String>> {
    let books = state.store.list()?;
    tracing::debug!(template = templates::BOOK_LIST, count = books.len(), "rendering page");
    Ok(Html(templates::book_list(&books).into_string()))
}

/// HTML page for a single book
pub async fn book_detail_page(
    State(state): State<BooksState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let book = find_book(state.store.as_ref(), &id)?;
    tracing::debug!(template = templates::BOOK_DETAIL, book_id = book.id, "rendering page");
    Ok(Html(templates::book_detail(&book).into_string()))
}
