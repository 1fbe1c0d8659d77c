//! Library books as served by the `/api/books` endpoint.
//!
//! A successful response is an envelope around one page of books:
//!
//! ```json
//! {
//!   "books": [{ "id": 7, "title": "Dune", "authors": ["Frank Herbert"], ... }],
//!   "total_books": 120,
//!   "fetched_offset": 18,
//!   "next_offset": 36,
//!   "remaining_books": 84
//! }
//! ```
//!
//! When nothing matches, the backend answers `{"message": "..."}` with a
//! success status instead; [`parse_books_page`] maps that to an empty page so
//! the feed marks the direction exhausted.

use crate::feed::{FeedItem, FetchError};
use serde::Deserialize;
use std::cmp::Ordering;
use std::fmt;

/// A single book in the library.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Book {
    /// Database id, unique across the library.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Authors in credit order.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Series name, if the book belongs to one.
    #[serde(default)]
    pub series: Option<String>,
    /// Position within the series.
    #[serde(default)]
    pub seriesindex: Option<f64>,
    /// Path of the cover image on the backend.
    #[serde(rename = "coverUrl", default)]
    pub cover_url: String,
    /// Path of the epub file relative to the library root.
    #[serde(default)]
    pub relative_path: String,
    /// Stable content identifier (used for progress and covers).
    #[serde(default)]
    pub identifier: String,
    /// Whether the signed-in reader finished this book.
    #[serde(default)]
    pub is_finished: bool,
    /// Whether the signed-in reader marked this book as a favorite.
    #[serde(default)]
    pub marked_favorite: bool,
}

impl Book {
    /// The first credited author, or an empty string.
    pub fn first_author(&self) -> &str {
        self.authors.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if !self.authors.is_empty() {
            write!(f, " by {}", self.authors.join(", "))?;
        }
        if let Some(series) = &self.series {
            match self.seriesindex {
                Some(index) => write!(f, " ({} #{})", series, index)?,
                None => write!(f, " ({})", series)?,
            }
        }
        Ok(())
    }
}

impl FeedItem for Book {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

/// One page of the `/api/books` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BooksPage {
    /// The books on this page.
    pub books: Vec<Book>,
    /// Number of books matching the query.
    #[serde(default)]
    pub total_books: usize,
    /// Offset the page was fetched from.
    #[serde(default)]
    pub fetched_offset: usize,
    /// Offset of the following page.
    #[serde(default)]
    pub next_offset: usize,
    /// Matching books after this page.
    #[serde(default)]
    pub remaining_books: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BooksResponse {
    Page(BooksPage),
    Empty { message: String },
    Failed { error: String },
}

/// Decodes a `/api/books` response body into the books it carries.
///
/// # Errors
///
/// Returns [`FetchError::Server`] for an `{"error": ...}` body and
/// [`FetchError::Decode`] when the body matches none of the known shapes.
///
/// # Examples
///
/// ```
/// use bookshelf_feed::book::parse_books_page;
///
/// let body = r#"{"message": "No books matching the specified query were found."}"#;
/// assert!(parse_books_page(body).unwrap().is_empty());
/// ```
pub fn parse_books_page(body: &str) -> Result<Vec<Book>, FetchError> {
    match serde_json::from_str::<BooksResponse>(body) {
        Ok(BooksResponse::Page(page)) => Ok(page.books),
        Ok(BooksResponse::Empty { message }) => {
            tracing::debug!(%message, "backend reported no matching books");
            Ok(Vec::new())
        }
        Ok(BooksResponse::Failed { error }) => Err(FetchError::Server(error)),
        // Decode again as a page so the error names the offending field.
        Err(_) => Err(serde_json::from_str::<BooksPage>(body)
            .err()
            .map(FetchError::Decode)
            .unwrap_or_else(|| FetchError::Server("unrecognized response".to_string()))),
    }
}

fn compare_for_display(a: &Book, b: &Book) -> Ordering {
    a.first_author()
        .to_lowercase()
        .cmp(&b.first_author().to_lowercase())
        .then_with(|| {
            let series_a = a.series.as_deref().unwrap_or("").to_lowercase();
            let series_b = b.series.as_deref().unwrap_or("").to_lowercase();
            series_a.cmp(&series_b)
        })
        .then_with(|| {
            a.seriesindex
                .unwrap_or(0.0)
                .total_cmp(&b.seriesindex.unwrap_or(0.0))
        })
}

/// Sorts books alphabetically by first author, then series, then position in
/// the series. The sort is stable.
///
/// This is a display helper for grouped listings; the feed itself keeps
/// books in the order the backend returned them.
pub fn sort_for_display(books: &mut [Book]) {
    books.sort_by(compare_for_display);
}
