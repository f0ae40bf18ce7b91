use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::backend::Backend;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde_derive::{Deserialize, Serialize};

use crate::schema::annotations;
use crate::DbError;

/// Enum for the testaments in the Bible (Old or New). This is mapped
/// to a column in the database table `books`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Deserialize, Serialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn as_str(&self) -> &'static str {
        match self {
            Testament::Old => "old",
            Testament::New => "new",
        }
    }
}

impl FromStr for Testament {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "old" => Ok(Testament::Old),
            "new" => Ok(Testament::New),
            other => Err(format!("Unexpected testament '{}'", other)),
        }
    }
}

impl FromSql<Text, Sqlite> for Testament {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let testament = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        testament.parse().map_err(Into::into)
    }
}

impl ToSql<Text, Sqlite> for Testament {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

/// Kind of a user annotation on a verse.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Deserialize, Serialize,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    Highlight,
    Note,
    Bookmark,
}

impl AnnotationType {
    pub const ALL: [AnnotationType; 3] = [
        AnnotationType::Highlight,
        AnnotationType::Note,
        AnnotationType::Bookmark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationType::Highlight => "highlight",
            AnnotationType::Note => "note",
            AnnotationType::Bookmark => "bookmark",
        }
    }
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnotationType {
    type Err = DbError;

    /// Annotation types are matched exactly; `"Note"` is not a valid type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnnotationType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| DbError::InvalidAnnotationType {
                value: s.to_string(),
            })
    }
}

impl FromSql<Text, Sqlite> for AnnotationType {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let value = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        value
            .parse()
            .map_err(|e: DbError| e.to_string().into())
    }
}

impl ToSql<Text, Sqlite> for AnnotationType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

/// Model representing a book in the Bible.
#[derive(Clone, Debug, PartialEq, Queryable, Deserialize, Serialize)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub abbreviation: String,
    pub testament: Testament,
    pub order: i32,
    pub chapter_count: i32,
}

/// Model representing a chapter of a book.
#[derive(Clone, Debug, PartialEq, Queryable, Deserialize, Serialize)]
pub struct Chapter {
    pub id: i32,
    pub book_id: i32,
    pub number: i32,
    pub verse_count: i32,
}

/// Model representing a Bible verse.
#[derive(Clone, Debug, PartialEq, Queryable, Deserialize, Serialize)]
pub struct Verse {
    pub id: i32,
    pub chapter_id: i32,
    pub number: i32,
    pub text: String,
    pub version: String,
}

/// A verse together with the chapter and book it belongs to.
///
/// This is the row shape returned by every verse query that needs to be
/// ordered canonically or rendered with its reference.
#[derive(Clone, Debug, PartialEq, Queryable, Deserialize, Serialize)]
pub struct VerseRow {
    pub id: i32,
    pub chapter_id: i32,
    pub number: i32,
    pub text: String,
    pub version: String,
    pub chapter_number: i32,
    pub book_id: i32,
    pub book_name: String,
    pub book_order: i32,
    pub testament: Testament,
}

impl VerseRow {
    /// Human readable reference, e.g. `João 3:16`.
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book_name, self.chapter_number, self.number)
    }

    /// Key used to order verses canonically.
    #[cfg(test)]
    pub fn canonical_key(&self) -> (i32, i32, i32) {
        (self.book_order, self.chapter_number, self.number)
    }
}

/// Model representing a user annotation.
#[derive(Clone, Debug, PartialEq, Queryable, Deserialize, Serialize)]
pub struct Annotation {
    pub id: i32,
    pub verse_id: i32,
    #[serde(rename = "type")]
    pub annotation_type: AnnotationType,
    pub color: Option<String>,
    pub note_text: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// An annotation joined with the verse it is attached to.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationDetail {
    pub annotation: Annotation,
    pub verse: VerseRow,
}

impl From<(Annotation, VerseRow)> for AnnotationDetail {
    fn from((annotation, verse): (Annotation, VerseRow)) -> Self {
        Self { annotation, verse }
    }
}

/// Row inserted when a user creates an annotation.
#[derive(Debug, Insertable)]
#[diesel(table_name = annotations)]
pub struct NewAnnotation<'a> {
    pub verse_id: i32,
    pub annotation_type: AnnotationType,
    pub color: Option<&'a str>,
    pub note_text: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changes applied to an existing annotation.
///
/// `None` leaves a column untouched, `Some(None)` clears a nullable column.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = annotations)]
pub struct AnnotationChangeset {
    pub annotation_type: Option<AnnotationType>,
    pub color: Option<Option<String>>,
    pub note_text: Option<Option<String>>,
    pub updated_at: NaiveDateTime,
}

/// Structural filter for verse queries. Empty fields do not filter.
#[derive(Clone, Debug, Default)]
pub struct VerseFilter {
    pub book_ids: Vec<i32>,
    pub testament: Option<Testament>,
    pub verse_ids: Option<Vec<i32>>,
}

/// Filter for annotation queries. Empty fields do not filter.
#[derive(Clone, Debug, Default)]
pub struct AnnotationFilter {
    pub annotation_type: Option<AnnotationType>,
    pub book_id: Option<i32>,
    pub verse_id: Option<i32>,
}

mod reference;
pub use self::reference::Reference;
