//! HTML markup for the book pages.

use maud::{html, Markup, DOCTYPE};

use super::models::Book;

/// Template names, reported in logs when a page is rendered.
pub const BOOK_LIST: &str = "books/book_list.html";
pub const BOOK_DETAIL: &str = "books/book_detail.html";

fn layout(page_title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (page_title) }
            }
            body {
                main { (content) }
            }
        }
    }
}

pub fn detail_path(book: &Book) -> String {
    format!("/books/{}/", book.id)
}

pub fn book_list(books: &[Book]) -> Markup {
    layout(
        "Books",
        html! {
            h1 { "Books" }
            @if books.is_empty() {
                p.empty { "No books yet." }
            } @else {
                ul.books {
                    @for book in books {
                        li {
                            a href=(detail_path(book)) { (book.title) }
                            " by " (book.author)
                        }
                    }
                }
            }
        },
    )
}

pub fn book_detail(book: &Book) -> Markup {
    layout(
        &book.title,
        html! {
            article.book {
                h1 { (book.title) }
                dl {
                    dt { "Author" }
                    dd { (book.author) }
                    dt { "Published" }
                    dd {
                        time datetime=(book.published_date.to_string()) {
                            (book.published_date.format("%B %-d, %Y").to_string())
                        }
                    }
                }
            }
            p { a href="/books/" { "All books" } }
        },
    )
}
