pub mod api;
pub mod models;
pub mod pages;
pub mod seed;
pub mod serializers;
pub mod store;
pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookshelf_kernel::{InitCtx, Module};
use serde_json::json;

use api::BooksState;
use store::BookStore;

/// Books module: JSON API under `/api/books/` and HTML pages under `/books/`
pub struct BooksModule {
    state: BooksState,
}

impl BooksModule {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            state: BooksState { store },
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn api_routes(&self) -> Router {
        Router::new()
            .route("/books/", get(api::list_books).post(api::create_book))
            .route("/books/health", get(health_check))
            .route(
                "/books/{id}/",
                get(api::retrieve_book)
                    .put(api::replace_book)
                    .patch(api::patch_book)
                    .delete(api::delete_book),
            )
            .with_state(self.state.clone())
    }

    fn page_routes(&self) -> Router {
        Router::new()
            .route("/books/", get(pages::book_list_page))
            .route("/books/{id}/", get(pages::book_detail_page))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi_fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let count = self.state.store.count()?;
        tracing::info!(module = self.name(), books = count, "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

fn error_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

fn book_response(description: &str) -> serde_json::Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn book_body(schema: &str) -> serde_json::Value {
    json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{schema}") }
            }
        }
    })
}

fn openapi_fragment() -> serde_json::Value {
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "description": "Book id",
        "schema": { "type": "integer", "format": "int64" }
    });
    let content_properties = json!({
        "title": { "type": "string", "minLength": 1, "description": "Title of the book" },
        "author": { "type": "string", "minLength": 1, "description": "Author of the book" },
        "published_date": { "type": "string", "format": "date", "description": "Publication date (YYYY-MM-DD)" }
    });
    let mut book_properties = content_properties.clone();
    book_properties["id"] = json!({ "type": "integer", "format": "int64", "description": "Unique identifier for the book" });

    json!({
        "paths": {
            "/books/": {
                "get": {
                    "summary": "List books",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "List of books",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Book" }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "summary": "Create a book",
                    "tags": ["Books"],
                    "requestBody": book_body("BookInput"),
                    "responses": {
                        "201": book_response("Book created"),
                        "400": error_response("Invalid book data")
                    }
                }
            },
            "/books/{id}/": {
                "parameters": [id_param],
                "get": {
                    "summary": "Get a book",
                    "tags": ["Books"],
                    "responses": {
                        "200": book_response("Book"),
                        "404": error_response("Book not found")
                    }
                },
                "put": {
                    "summary": "Replace a book",
                    "tags": ["Books"],
                    "requestBody": book_body("BookInput"),
                    "responses": {
                        "200": book_response("Book updated"),
                        "400": error_response("Invalid book data"),
                        "404": error_response("Book not found")
                    }
                },
                "patch": {
                    "summary": "Update some fields of a book",
                    "tags": ["Books"],
                    "requestBody": book_body("BookPatch"),
                    "responses": {
                        "200": book_response("Book updated"),
                        "400": error_response("Invalid book data"),
                        "404": error_response("Book not found")
                    }
                },
                "delete": {
                    "summary": "Delete a book",
                    "tags": ["Books"],
                    "responses": {
                        "204": { "description": "Book deleted" },
                        "404": error_response("Book not found")
                    }
                }
            },
            "/books/health": {
                "get": {
                    "summary": "Books health check",
                    "tags": ["Books"],
                    "responses": {
                        "200": {
                            "description": "OK",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Book": {
                    "type": "object",
                    "properties": book_properties,
                    "required": ["id", "title", "author", "published_date"]
                },
                "BookInput": {
                    "type": "object",
                    "properties": content_properties.clone(),
                    "required": ["title", "author", "published_date"]
                },
                "BookPatch": {
                    "type": "object",
                    "properties": content_properties
                }
            }
        }
    })
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<dyn BookStore>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
