//! Previous/next chapter links, crossing book boundaries.

use serde_derive::{Deserialize, Serialize};

use crate::models::Book;
use crate::DbError;

/// A chapter to navigate to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChapterLink {
    pub book_id: i32,
    pub book_name: String,
    pub chapter: i32,
}

impl ChapterLink {
    fn new(book: &Book, chapter: i32) -> Self {
        Self {
            book_id: book.id,
            book_name: book.name.to_owned(),
            chapter,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Navigation {
    pub previous: Option<ChapterLink>,
    pub next: Option<ChapterLink>,
}

/// Works out the chapters before and after `chapter` of the book `book_id`.
///
/// `books` must be the full list of books; neighbours are taken in
/// canonical order, so gaps in `order` are allowed.
///
/// - First chapter of the first book: no previous.
/// - First chapter of any other book: last chapter of the previous book.
/// - Last chapter of a book: first chapter of the next book.
/// - Last chapter of the last book: no next.
pub fn navigation(books: &[Book], book_id: i32, chapter: i32) -> Result<Navigation, DbError> {
    let mut ordered: Vec<&Book> = books.iter().collect();
    ordered.sort_by_key(|b| b.order);

    let index = ordered
        .iter()
        .position(|b| b.id == book_id)
        .ok_or_else(|| DbError::BookNotFound {
            book: book_id.to_string(),
        })?;
    let book = ordered[index];

    if chapter < 1 || chapter > book.chapter_count {
        return Err(DbError::ChapterNotFound {
            book: book.name.to_owned(),
            chapter,
        });
    }

    let previous = if chapter > 1 {
        Some(ChapterLink::new(book, chapter - 1))
    } else if index > 0 {
        let prev = ordered[index - 1];
        Some(ChapterLink::new(prev, prev.chapter_count))
    } else {
        None
    };

    let next = if chapter < book.chapter_count {
        Some(ChapterLink::new(book, chapter + 1))
    } else {
        ordered.get(index + 1).map(|next| ChapterLink::new(next, 1))
    };

    Ok(Navigation { previous, next })
}
