use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde_derive::{Deserialize, Serialize};

use db::models::*;
use db::navigation::{ChapterLink, Navigation};
use db::search::{AdvancedQuery, AdvancedResults, AnnotatedVerse, BookGroup, Passage};

/// A verse along with where it is in the Bible.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VerseData {
    pub id: i32,
    pub chapter_id: i32,
    pub number: i32,
    pub text: String,
    pub version: String,
    pub chapter: i32,
    pub book_id: i32,
    pub book_name: String,
    pub testament: Testament,
    pub reference: String,
}

impl From<VerseRow> for VerseData {
    fn from(v: VerseRow) -> Self {
        let reference = v.reference();
        Self {
            id: v.id,
            chapter_id: v.chapter_id,
            number: v.number,
            text: v.text,
            version: v.version,
            chapter: v.chapter_number,
            book_id: v.book_id,
            book_name: v.book_name,
            testament: v.testament,
            reference,
        }
    }
}

fn verse_data(verses: Vec<VerseRow>) -> Vec<VerseData> {
    verses.into_iter().map(VerseData::from).collect()
}

/// A book with its chapters.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BookData {
    #[serde(flatten)]
    pub book: Book,
    pub chapters: Vec<Chapter>,
}

impl From<(Book, Vec<Chapter>)> for BookData {
    fn from((book, chapters): (Book, Vec<Chapter>)) -> Self {
        Self { book, chapters }
    }
}

/// A chapter with its verses and the chapters around it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChapterData {
    pub book: Book,
    pub chapter: Chapter,
    pub verses: Vec<Verse>,
    pub navigation: Navigation,
}

/// Where a chapter is, and what comes before and after it.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NavigationData {
    pub current: ChapterLink,
    pub previous: Option<ChapterLink>,
    pub next: Option<ChapterLink>,
}

/// Verses found for a reference such as `João 3:16`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PassageData {
    pub reference: String,
    pub book: Book,
    pub chapter: i32,
    pub verses: Vec<Verse>,
}

impl From<Passage> for PassageData {
    fn from(p: Passage) -> Self {
        Self {
            reference: p.reference.to_string(),
            chapter: p.reference.chapter,
            book: p.book,
            verses: p.verses,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VerseSearchData {
    pub query: String,
    pub verses: Vec<VerseData>,
}

impl VerseSearchData {
    pub fn new(query: String, verses: Vec<VerseRow>) -> Self {
        Self {
            query,
            verses: verse_data(verses),
        }
    }
}

/// Filters applied to an advanced search, echoed back to the client.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AdvancedFilters {
    pub book_ids: Vec<i32>,
    pub testament: Option<Testament>,
    pub exact_match: bool,
    pub case_sensitive: bool,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BookGroupData {
    pub book_id: i32,
    pub book_name: String,
    pub testament: Testament,
    pub verses: Vec<VerseData>,
}

impl From<BookGroup> for BookGroupData {
    fn from(g: BookGroup) -> Self {
        Self {
            book_id: g.book_id,
            book_name: g.book_name,
            testament: g.testament,
            verses: verse_data(g.verses),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AdvancedSearchData {
    pub query: String,
    pub filters: AdvancedFilters,
    pub verses: Vec<VerseData>,
    pub by_book: BTreeMap<String, BookGroupData>,
}

impl AdvancedSearchData {
    pub fn new(query: AdvancedQuery, results: AdvancedResults) -> Self {
        Self {
            query: query.text.trim().to_string(),
            filters: AdvancedFilters {
                book_ids: query.book_ids,
                testament: query.testament,
                exact_match: query.exact_match,
                case_sensitive: query.case_sensitive,
            },
            verses: verse_data(results.page.items),
            by_book: results
                .by_book
                .into_iter()
                .map(|(name, group)| (name, group.into()))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SimilarData {
    pub reference_verse: VerseData,
    pub keywords_used: Vec<String>,
    pub similar_verses: Vec<VerseData>,
}

/// An annotation with the reference and text of its verse.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnnotationData {
    pub id: i32,
    pub verse_id: i32,
    #[serde(rename = "type")]
    pub annotation_type: AnnotationType,
    pub color: Option<String>,
    pub note_text: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub verse_reference: String,
    pub verse_text: String,
}

impl AnnotationData {
    pub fn new(a: Annotation, verse: &VerseRow) -> Self {
        Self {
            id: a.id,
            verse_id: a.verse_id,
            annotation_type: a.annotation_type,
            color: a.color,
            note_text: a.note_text,
            created_at: a.created_at,
            updated_at: a.updated_at,
            verse_reference: verse.reference(),
            verse_text: verse.text.to_owned(),
        }
    }
}

impl From<AnnotationDetail> for AnnotationData {
    fn from(d: AnnotationDetail) -> Self {
        Self::new(d.annotation, &d.verse)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnnotatedVerseData {
    #[serde(flatten)]
    pub verse: VerseData,
    pub annotations: Vec<AnnotationData>,
}

impl From<AnnotatedVerse> for AnnotatedVerseData {
    fn from(av: AnnotatedVerse) -> Self {
        let annotations = av
            .annotations
            .into_iter()
            .map(|a| AnnotationData::new(a, &av.verse))
            .collect();
        Self {
            verse: av.verse.into(),
            annotations,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AnnotatedSearchData {
    pub query: Option<String>,
    #[serde(rename = "type")]
    pub annotation_type: Option<AnnotationType>,
    pub verses: Vec<AnnotatedVerseData>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct HealthData {
    pub status: String,
    pub service: String,
}
