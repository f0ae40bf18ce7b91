//! Resolution of free-text book locators to canonical books.

use crate::models::Book;

/// Finds the one book a locator refers to.
///
/// The locator is compared case-insensitively against, in order:
///
/// 1. the canonical book name,
/// 2. the book's abbreviation,
/// 3. any canonical name containing the locator (first in canonical order).
///
/// Abbreviations are checked before substrings because they are short and
/// would otherwise hit the wrong book, e.g. `Jó` inside `João`.
pub fn resolve<'a>(locator: &str, books: &'a [Book]) -> Option<&'a Book> {
    let locator = locator.trim().to_lowercase();
    if locator.is_empty() {
        return None;
    }

    books
        .iter()
        .find(|b| b.name.to_lowercase() == locator)
        .or_else(|| {
            books
                .iter()
                .find(|b| b.abbreviation.to_lowercase() == locator)
        })
        .or_else(|| {
            books
                .iter()
                .filter(|b| b.name.to_lowercase().contains(&locator))
                .min_by_key(|b| b.order)
        })
}
