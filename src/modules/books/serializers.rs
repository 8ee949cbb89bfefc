//! Conversion between stored books and their JSON representation.
//!
//! Input is validated field by field so that a rejected payload reports every
//! offending field at once, in the order `title`, `author`, `published_date`.

use bookshelf_http::error::AppError;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value};

use super::models::{Book, BookChanges, BookId, NewBook};

const DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED: &str = "This field is required.";
const NULL: &str = "This field may not be null.";
const BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const BAD_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// Wire representation of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRepresentation {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Serialized as `YYYY-MM-DD`
    pub published_date: NaiveDate,
}

impl From<&Book> for BookRepresentation {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            published_date: book.published_date,
        }
    }
}

pub fn serialize(book: &Book) -> BookRepresentation {
    BookRepresentation::from(book)
}

/// How missing fields are treated when reading a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every field is required.
    Full,
    /// Missing fields mean "no change".
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: &'static str,
}

/// Every field-level problem found in a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid book data: {}", .0.iter().map(|e| e.field).collect::<Vec<_>>().join(", "))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = errors
            .0
            .iter()
            .map(|e| serde_json::json!({ "field": e.field, "error": e.error }))
            .collect();
        AppError::validation(details, "Invalid book data.")
    }
}

/// Read the content of a new book; every field is required.
pub fn deserialize_new(data: &Map<String, Value>) -> Result<NewBook, ValidationErrors> {
    let title = required(data, "title", text);
    let author = required(data, "author", text);
    let published_date = required(data, "published_date", date);

    match (title, author, published_date) {
        (Ok(title), Ok(author), Ok(published_date)) => Ok(NewBook {
            title,
            author,
            published_date,
        }),
        (title, author, published_date) => Err(ValidationErrors(
            [title.err(), author.err(), published_date.err()]
                .into_iter()
                .flatten()
                .collect(),
        )),
    }
}

/// Read changes to an existing book.
pub fn deserialize_changes(
    data: &Map<String, Value>,
    mode: Mode,
) -> Result<BookChanges, ValidationErrors> {
    if mode == Mode::Full {
        return deserialize_new(data).map(BookChanges::from);
    }

    let title = optional(data, "title", text);
    let author = optional(data, "author", text);
    let published_date = optional(data, "published_date", date);

    match (title, author, published_date) {
        (Ok(title), Ok(author), Ok(published_date)) => Ok(BookChanges {
            title,
            author,
            published_date,
        }),
        (title, author, published_date) => Err(ValidationErrors(
            [title.err(), author.err(), published_date.err()]
                .into_iter()
                .flatten()
                .collect(),
        )),
    }
}

type Parse<T> = fn(&Value) -> Result<T, &'static str>;

/// A present field, parsed; `Ok(None)` when the key is absent.
fn optional<T>(
    data: &Map<String, Value>,
    name: &'static str,
    parse: Parse<T>,
) -> Result<Option<T>, FieldError> {
    let error = match data.get(name) {
        None => return Ok(None),
        Some(Value::Null) => NULL,
        Some(value) => match parse(value) {
            Ok(parsed) => return Ok(Some(parsed)),
            Err(error) => error,
        },
    };
    Err(FieldError { field: name, error })
}

fn required<T>(
    data: &Map<String, Value>,
    name: &'static str,
    parse: Parse<T>,
) -> Result<T, FieldError> {
    optional(data, name, parse)?.ok_or(FieldError {
        field: name,
        error: REQUIRED,
    })
}

fn text(value: &Value) -> Result<String, &'static str> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Value::String(_) => Err(BLANK),
        _ => Err(NOT_A_STRING),
    }
}

/// Exactly `YYYY-MM-DD` with a year between 0001 and 9999.
fn date(value: &Value) -> Result<NaiveDate, &'static str> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| has_iso_date_shape(s))
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
        .filter(|d| d.year() >= 1)
        .ok_or(BAD_DATE)
}

fn has_iso_date_shape(s: &str) -> bool {
    s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn book() -> Book {
        Book {
            id: 42,
            title: "Book 1".to_string(),
            author: "Author 1".to_string(),
            published_date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        }
    }

    #[test]
    fn serialize_uses_iso_dates() {
        let value = serde_json::to_value(serialize(&book())).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 42,
                "title": "Book 1",
                "author": "Author 1",
                "published_date": "2021-01-01"
            })
        );
    }

    #[test]
    fn representation_round_trips_to_same_content() {
        let value = serde_json::to_value(serialize(&book())).unwrap();
        let parsed = deserialize_new(&object(value)).unwrap();
        assert_eq!(parsed.into_book(42), book());
    }

    #[test]
    fn unknown_keys_and_client_ids_are_ignored() {
        let data = object(json!({
            "id": 7,
            "isbn": "123",
            "title": "  Dune ",
            "author": "Frank Herbert",
            "published_date": "1965-08-01"
        }));
        let parsed = deserialize_new(&data).unwrap();
        assert_eq!(parsed.title, "Dune");
        assert_eq!(
            parsed.published_date,
            NaiveDate::from_ymd_opt(1965, 8, 1).unwrap()
        );
    }

    #[test]
    fn create_reports_every_missing_field() {
        let errors = deserialize_new(&Map::new()).unwrap_err();
        assert_eq!(errors.fields(), vec!["title", "author", "published_date"]);
        assert!(errors.0.iter().all(|e| e.error == REQUIRED));
    }

    #[test]
    fn invalid_values_are_reported_per_field() {
        let data = object(json!({
            "title": "   ",
            "author": 12,
            "published_date": "2021-02-30"
        }));
        let errors = deserialize_new(&data).unwrap_err();
        assert_eq!(
            errors.0,
            vec![
                FieldError {
                    field: "title",
                    error: BLANK
                },
                FieldError {
                    field: "author",
                    error: NOT_A_STRING
                },
                FieldError {
                    field: "published_date",
                    error: BAD_DATE
                },
            ]
        );
    }

    #[test]
    fn dates_must_be_four_digit_years_with_padded_month_and_day() {
        for raw in [
            "+2021-01-01",
            "-0044-03-15",
            "0000-01-01",
            "2021-1-1",
            "2021-01-01T00:00:00",
            "21-01-01",
        ] {
            let data = object(json!({
                "title": "Book 1",
                "author": "Author 1",
                "published_date": raw
            }));
            let errors = deserialize_new(&data).unwrap_err();
            assert_eq!(
                errors.0,
                vec![FieldError {
                    field: "published_date",
                    error: BAD_DATE
                }],
                "{raw} should be rejected"
            );
        }

        let edges = object(json!({"published_date": " 0001-01-01 "}));
        let changes = deserialize_changes(&edges, Mode::Partial).unwrap();
        assert_eq!(changes.published_date, NaiveDate::from_ymd_opt(1, 1, 1));

        let edges = object(json!({"published_date": "9999-12-31"}));
        let changes = deserialize_changes(&edges, Mode::Partial).unwrap();
        assert_eq!(changes.published_date, NaiveDate::from_ymd_opt(9999, 12, 31));
    }

    #[test]
    fn full_mode_changes_match_new_book_rules() {
        let data = object(json!({
            "title": "Book 1",
            "author": "Author 1",
            "published_date": "2021-01-01"
        }));
        let changes = deserialize_changes(&data, Mode::Full).unwrap();
        assert_eq!(changes, BookChanges::from(deserialize_new(&data).unwrap()));

        let errors = deserialize_changes(&object(json!({"title": null})), Mode::Full).unwrap_err();
        assert_eq!(
            errors.0,
            vec![
                FieldError {
                    field: "title",
                    error: NULL
                },
                FieldError {
                    field: "author",
                    error: REQUIRED
                },
                FieldError {
                    field: "published_date",
                    error: REQUIRED
                },
            ]
        );
    }

    #[test]
    fn partial_mode_tolerates_missing_fields_but_not_nulls() {
        let changes =
            deserialize_changes(&object(json!({"title": "New"})), Mode::Partial).unwrap();
        assert_eq!(changes.title.as_deref(), Some("New"));
        assert!(changes.author.is_none());
        assert!(changes.published_date.is_none());

        let errors =
            deserialize_changes(&object(json!({"author": null})), Mode::Partial).unwrap_err();
        assert_eq!(
            errors.0,
            vec![FieldError {
                field: "author",
                error: NULL
            }]
        );
    }

    #[test]
    fn validation_errors_become_field_details() {
        let errors = deserialize_new(&object(json!({"title": "Only"}))).unwrap_err();
        match AppError::from(errors) {
            AppError::Validation { details, .. } => {
                assert_eq!(
                    details,
                    vec![
                        json!({"field": "author", "error": REQUIRED}),
                        json!({"field": "published_date", "error": REQUIRED}),
                    ]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
