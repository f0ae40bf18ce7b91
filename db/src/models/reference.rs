use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Match, Regex};
use serde_derive::{Deserialize, Serialize};

use crate::DbError;

/// Model representing a Bible reference used to look up a
/// passage in the database.
///
/// The book is kept as the raw locator typed by the user; it is resolved
/// to a canonical [Book](crate::models::Book) separately.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reference {
    pub book: String,
    pub chapter: i32,
    pub verse_start: Option<i32>,
    pub verse_end: Option<i32>,
}

impl Reference {
    /// Parses a free-text locator such as `João 3:16`, returning `None`
    /// when it does not have the shape `<book> <chapter>[:<verse>[-<verse>]]`.
    pub fn parse(raw: &str) -> Option<Reference> {
        raw.parse().ok()
    }

    /// The requested verse range, or `None` for a whole chapter.
    pub fn verses(&self) -> Option<RangeInclusive<i32>> {
        match (self.verse_start, self.verse_end) {
            (Some(start), Some(end)) => Some(start..=end),
            (Some(start), None) => Some(start..=start),
            _ => None,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.verses() {
            None => write!(f, "{} {}", self.book, self.chapter),
            Some(verses) => {
                if verses.start() == verses.end() {
                    write!(f, "{} {}:{}", self.book, self.chapter, verses.start())
                } else {
                    write!(
                        f,
                        "{} {}:{}-{}",
                        self.book,
                        self.chapter,
                        verses.start(),
                        verses.end()
                    )
                }
            }
        }
    }
}

impl FromStr for Reference {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Reference, Self::Err> {
        lazy_static! {
            // Everything up to the last run of whitespace is the book locator.
            static ref REF_RE: Regex = Regex::new(r"^(.*\S)\s+(\S+)$").unwrap();
            static ref CV_RE: Regex = Regex::new(r"^(\d+)(?::(\d+)(?:-(\d+))?)?$").unwrap();
        }

        let trimmed = s.trim();
        let ref_caps = REF_RE
            .captures(trimmed)
            .ok_or_else(|| invalid_reference(s))?;

        match (ref_caps.get(1), ref_caps.get(2)) {
            (Some(book), Some(cv)) => {
                let cv_caps = CV_RE
                    .captures(cv.as_str())
                    .ok_or_else(|| invalid_reference(s))?;
                let book = book.as_str().trim().to_string();
                if book.is_empty() {
                    return Err(invalid_reference(s));
                }

                match (cv_caps.get(1), cv_caps.get(2), cv_caps.get(3)) {
                    // Chapter only
                    (Some(chapter), None, None) => Ok(Reference {
                        book,
                        chapter: parse_num_match(chapter, s)?,
                        verse_start: None,
                        verse_end: None,
                    }),
                    // Chapter and one verse
                    (Some(chapter), Some(verse), None) => {
                        let verse = parse_num_match(verse, s)?;
                        Ok(Reference {
                            book,
                            chapter: parse_num_match(chapter, s)?,
                            verse_start: Some(verse),
                            verse_end: Some(verse),
                        })
                    }
                    // Chapter with more than one verse
                    (Some(chapter), Some(verse_start), Some(verse_end)) => Ok(Reference {
                        book,
                        chapter: parse_num_match(chapter, s)?,
                        verse_start: Some(parse_num_match(verse_start, s)?),
                        verse_end: Some(parse_num_match(verse_end, s)?),
                    }),
                    _ => Err(invalid_reference(s)),
                }
            }
            _ => Err(invalid_reference(s)),
        }
    }
}

/// Parse a [Match](regex::Match) into a positive i32.
fn parse_num_match(m: Match, raw: &str) -> Result<i32, DbError> {
    match m.as_str().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid_reference(raw)),
    }
}

/// Create an invalid reference error from the input.
fn invalid_reference(s: &str) -> DbError {
    DbError::InvalidReference {
        reference: s.trim().to_string(),
    }
}
