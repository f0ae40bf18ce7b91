//! Highlights, notes and bookmarks attached to verses.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime, Utc};
use diesel::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserializer;
use serde_derive::{Deserialize, Serialize};

use crate::models::*;
use crate::pagination::{Page, Pagination};
use crate::sword_drill::SwordDrillable;
use crate::DbError;

/// Number of books reported in [AnnotationStats::most_annotated_books].
const TOP_BOOKS: usize = 5;

/// Fields of a new annotation as sent by a client.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnnotationInput {
    pub verse_id: i32,
    #[serde(rename = "type")]
    pub annotation_type: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub note_text: Option<String>,
}

/// Partial changes to an annotation.
///
/// `color` and `note_text` are `None` when absent and `Some(None)` when
/// explicitly set to `null`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnnotationUpdate {
    #[serde(rename = "type", default)]
    pub annotation_type: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub note_text: Option<Option<String>>,
}

impl AnnotationUpdate {
    pub fn is_empty(&self) -> bool {
        self.annotation_type.is_none() && self.color.is_none() && self.note_text.is_none()
    }
}

/// Marks a field as present, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeCounts {
    pub highlights: usize,
    pub notes: usize,
    pub bookmarks: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BookCount {
    pub book_name: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnnotationStats {
    pub total_annotations: usize,
    pub by_type: TypeCounts,
    pub most_annotated_books: Vec<BookCount>,
}

fn validate_color(color: &str) -> Result<(), DbError> {
    lazy_static! {
        static ref COLOR_RE: Regex =
            Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
    }

    if COLOR_RE.is_match(color) {
        Ok(())
    } else {
        Err(DbError::InvalidColor {
            value: color.to_string(),
        })
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// A modification time strictly after `previous`, even if the clock has not
/// moved since.
fn touch(previous: NaiveDateTime) -> NaiveDateTime {
    now().max(previous + Duration::microseconds(1))
}

pub fn create<SD>(
    input: &AnnotationInput,
    conn: &mut SqliteConnection,
) -> Result<AnnotationDetail, DbError>
where
    SD: SwordDrillable,
{
    SD::verse(input.verse_id, conn)?;
    let annotation_type: AnnotationType = input.annotation_type.parse()?;
    if let Some(ref color) = input.color {
        validate_color(color)?;
    }

    let created_at = now();
    let detail = SD::insert_annotation(
        &NewAnnotation {
            verse_id: input.verse_id,
            annotation_type,
            color: input.color.as_deref(),
            note_text: input.note_text.as_deref(),
            created_at,
            updated_at: created_at,
        },
        conn,
    )?;

    log::info!(
        "Created {} annotation {} on {}",
        annotation_type,
        detail.annotation.id,
        detail.verse.reference()
    );
    Ok(detail)
}

pub fn get<SD>(id: i32, conn: &mut SqliteConnection) -> Result<AnnotationDetail, DbError>
where
    SD: SwordDrillable,
{
    SD::annotation(id, conn)
}

/// Applies the fields present in `update`; `updated_at` always advances.
pub fn update<SD>(
    id: i32,
    update: &AnnotationUpdate,
    conn: &mut SqliteConnection,
) -> Result<AnnotationDetail, DbError>
where
    SD: SwordDrillable,
{
    let current = SD::annotation(id, conn)?;
    if update.is_empty() {
        return Err(DbError::EmptyUpdate);
    }

    let annotation_type = update
        .annotation_type
        .as_deref()
        .map(str::parse::<AnnotationType>)
        .transpose()?;
    if let Some(Some(ref color)) = update.color {
        validate_color(color)?;
    }

    SD::update_annotation(
        id,
        &AnnotationChangeset {
            annotation_type,
            color: update.color.to_owned(),
            note_text: update.note_text.to_owned(),
            updated_at: touch(current.annotation.updated_at),
        },
        conn,
    )
}

pub fn delete<SD>(id: i32, conn: &mut SqliteConnection) -> Result<(), DbError>
where
    SD: SwordDrillable,
{
    SD::delete_annotation(id, conn)?;
    log::info!("Deleted annotation {}", id);
    Ok(())
}

/// Annotations matching `filter`, newest first.
pub fn list<SD>(
    filter: &AnnotationFilter,
    pagination: Pagination,
    conn: &mut SqliteConnection,
) -> Result<Page<AnnotationDetail>, DbError>
where
    SD: SwordDrillable,
{
    Ok(Page::paginate(SD::annotations(filter, conn)?, pagination))
}

/// All annotations of one verse, newest first.
pub fn by_verse<SD>(
    verse_id: i32,
    conn: &mut SqliteConnection,
) -> Result<Vec<AnnotationDetail>, DbError>
where
    SD: SwordDrillable,
{
    SD::verse(verse_id, conn)?;
    SD::annotations(
        &AnnotationFilter {
            verse_id: Some(verse_id),
            ..Default::default()
        },
        conn,
    )
}

pub fn stats<SD>(conn: &mut SqliteConnection) -> Result<AnnotationStats, DbError>
where
    SD: SwordDrillable,
{
    let all = SD::annotations(&AnnotationFilter::default(), conn)?;

    let mut by_type = TypeCounts::default();
    // book id -> (book order, book name, count)
    let mut by_book: HashMap<i32, (i32, String, usize)> = HashMap::new();
    for detail in &all {
        match detail.annotation.annotation_type {
            AnnotationType::Highlight => by_type.highlights += 1,
            AnnotationType::Note => by_type.notes += 1,
            AnnotationType::Bookmark => by_type.bookmarks += 1,
        }
        by_book
            .entry(detail.verse.book_id)
            .or_insert_with(|| (detail.verse.book_order, detail.verse.book_name.to_owned(), 0))
            .2 += 1;
    }

    let mut books: Vec<(i32, String, usize)> = by_book.into_values().collect();
    books.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

    Ok(AnnotationStats {
        total_annotations: all.len(),
        by_type,
        most_annotated_books: books
            .into_iter()
            .take(TOP_BOOKS)
            .map(|(_, book_name, count)| BookCount { book_name, count })
            .collect(),
    })
}
