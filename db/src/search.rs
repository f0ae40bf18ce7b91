//! Verse search: plain text, advanced filters, suggestions, keyword
//! similarity, annotated verses and reference lookup.
//!
//! Structural filters (books, testament, annotated verses) are pushed down
//! to the store; text predicates are evaluated here as linear substring
//! matches over the canonically ordered rows, using Unicode case folding.

use std::collections::{BTreeMap, HashMap};

use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};

use crate::models::*;
use crate::pagination::{Page, Pagination};
use crate::resolver;
use crate::stop_words::StopWords;
use crate::sword_drill::SwordDrillable;
use crate::DbError;

/// Example queries offered when the user has typed too little to suggest from.
pub const POPULAR_SEARCHES: [&str; 6] = ["João 3:16", "Salmos 23", "amor", "fé", "esperança", "paz"];

/// Queries shorter than this many characters get [POPULAR_SEARCHES] instead.
const MIN_SUGGESTION_CHARS: usize = 2;

/// Length of the verse preview shown with a suggestion.
const PREVIEW_CHARS: usize = 100;

/// Returns the trimmed value of a required parameter.
fn required<'a>(value: &'a str, name: &str) -> Result<&'a str, DbError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DbError::MissingParameter {
            name: name.to_string(),
        });
    }
    Ok(value)
}

/// Matches verse text against a query.
#[derive(Clone, Debug)]
struct TextMatcher {
    needle: String,
    exact: bool,
    case_sensitive: bool,
}

impl TextMatcher {
    fn new(query: &str, exact: bool, case_sensitive: bool) -> Self {
        Self {
            needle: if case_sensitive {
                query.to_string()
            } else {
                query.to_lowercase()
            },
            exact,
            case_sensitive,
        }
    }

    fn substring(query: &str) -> Self {
        Self::new(query, false, false)
    }

    fn matches(&self, text: &str) -> bool {
        let lowered;
        let haystack = if self.case_sensitive {
            text
        } else {
            lowered = text.to_lowercase();
            lowered.as_str()
        };

        if self.exact {
            haystack == self.needle
        } else {
            haystack.contains(&self.needle)
        }
    }
}

/// Plain text search, case-insensitive, optionally within one book.
pub fn verses<SD>(
    query: &str,
    book_id: Option<i32>,
    pagination: Pagination,
    conn: &mut SqliteConnection,
) -> Result<Page<VerseRow>, DbError>
where
    SD: SwordDrillable,
{
    let query = required(query, "q")?;
    let matcher = TextMatcher::substring(query);
    let filter = VerseFilter {
        book_ids: book_id.into_iter().collect(),
        ..Default::default()
    };

    let matches = SD::verses(&filter, conn)?
        .into_iter()
        .filter(|v| matcher.matches(&v.text))
        .collect();

    Ok(Page::paginate(matches, pagination))
}

/// Options for [advanced] search.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AdvancedQuery {
    pub text: String,
    pub book_ids: Vec<i32>,
    pub testament: Option<Testament>,
    pub exact_match: bool,
    pub case_sensitive: bool,
}

/// Verses of one book within a page of advanced search results.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BookGroup {
    pub book_id: i32,
    pub book_name: String,
    pub testament: Testament,
    pub verses: Vec<VerseRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AdvancedResults {
    pub page: Page<VerseRow>,
    /// The verses of `page`, grouped by book name.
    pub by_book: BTreeMap<String, BookGroup>,
}

/// Search with book/testament filters and exact or case-sensitive matching.
///
/// With `exact_match` the whole verse text must equal the query; otherwise
/// the query must be contained in it. Book ids and testament are ANDed.
pub fn advanced<SD>(
    query: &AdvancedQuery,
    pagination: Pagination,
    conn: &mut SqliteConnection,
) -> Result<AdvancedResults, DbError>
where
    SD: SwordDrillable,
{
    let text = required(&query.text, "q")?;
    let matcher = TextMatcher::new(text, query.exact_match, query.case_sensitive);
    let filter = VerseFilter {
        book_ids: query.book_ids.to_owned(),
        testament: query.testament,
        verse_ids: None,
    };

    let matches = SD::verses(&filter, conn)?
        .into_iter()
        .filter(|v| matcher.matches(&v.text))
        .collect();
    let page = Page::paginate(matches, pagination);

    let mut by_book: BTreeMap<String, BookGroup> = BTreeMap::new();
    for verse in &page.items {
        by_book
            .entry(verse.book_name.to_owned())
            .or_insert_with(|| BookGroup {
                book_id: verse.book_id,
                book_name: verse.book_name.to_owned(),
                testament: verse.testament,
                verses: vec![],
            })
            .verses
            .push(verse.to_owned());
    }

    Ok(AdvancedResults { page, by_book })
}

/// A verse offered as a completion.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VerseSuggestion {
    pub id: i32,
    pub reference: String,
    pub text_preview: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Suggestions {
    pub books: Vec<Book>,
    pub verses: Vec<VerseSuggestion>,
    pub popular_searches: Option<Vec<String>>,
}

/// Truncates text to a preview of [PREVIEW_CHARS] characters.
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// Completions for a partially typed query: books whose name contains it
/// and verses whose text starts with it.
pub fn suggestions<SD>(
    partial: &str,
    limit: usize,
    books: &[Book],
    conn: &mut SqliteConnection,
) -> Result<Suggestions, DbError>
where
    SD: SwordDrillable,
{
    let partial = partial.trim();
    if partial.chars().count() < MIN_SUGGESTION_CHARS {
        return Ok(Suggestions {
            books: vec![],
            verses: vec![],
            popular_searches: Some(POPULAR_SEARCHES.iter().map(|s| s.to_string()).collect()),
        });
    }

    let lowered = partial.to_lowercase();

    let mut book_matches: Vec<&Book> = books
        .iter()
        .filter(|b| b.name.to_lowercase().contains(&lowered))
        .collect();
    book_matches.sort_by_key(|b| b.order);

    let verses = SD::verses(&VerseFilter::default(), conn)?
        .into_iter()
        .filter(|v| v.text.to_lowercase().starts_with(&lowered))
        .take(limit)
        .map(|v| VerseSuggestion {
            id: v.id,
            reference: v.reference(),
            text_preview: preview(&v.text),
        })
        .collect();

    Ok(Suggestions {
        books: book_matches.into_iter().take(limit).cloned().collect(),
        verses,
        popular_searches: None,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimilarVerses {
    pub reference_verse: VerseRow,
    pub keywords: Vec<String>,
    pub page: Page<VerseRow>,
    /// Set when the reference verse has no usable keywords.
    pub message: Option<String>,
}

/// Verses sharing any keyword with the reference verse, which is itself
/// never part of the result.
pub fn similar<SD>(
    verse_id: i32,
    limit: usize,
    stop_words: &StopWords,
    conn: &mut SqliteConnection,
) -> Result<SimilarVerses, DbError>
where
    SD: SwordDrillable,
{
    let reference_verse = SD::verse(verse_id, conn)?;
    let keywords = stop_words.keywords(&reference_verse.text);

    if keywords.is_empty() {
        return Ok(SimilarVerses {
            reference_verse,
            keywords,
            page: Page::empty(Pagination::first(limit)),
            message: Some("No keywords found for similarity search".to_string()),
        });
    }

    let matches = SD::verses(&VerseFilter::default(), conn)?
        .into_iter()
        .filter(|v| v.id != verse_id)
        .filter(|v| {
            let text = v.text.to_lowercase();
            keywords.iter().any(|k| text.contains(k.as_str()))
        })
        .collect();

    Ok(SimilarVerses {
        reference_verse,
        keywords,
        page: Page::paginate(matches, Pagination::first(limit)),
        message: None,
    })
}

/// A verse with the annotations attached to it.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedVerse {
    pub verse: VerseRow,
    pub annotations: Vec<Annotation>,
}

/// Search restricted to verses that have at least one annotation (of the
/// given type, if any).
///
/// A query matches the verse text or the note of any of its annotations.
/// Each verse appears once, carrying all of its annotations of that type.
pub fn annotated<SD>(
    query: Option<&str>,
    annotation_type: Option<AnnotationType>,
    pagination: Pagination,
    conn: &mut SqliteConnection,
) -> Result<Page<AnnotatedVerse>, DbError>
where
    SD: SwordDrillable,
{
    let filter = AnnotationFilter {
        annotation_type,
        ..Default::default()
    };

    let mut by_verse: HashMap<i32, Vec<Annotation>> = HashMap::new();
    for detail in SD::annotations(&filter, conn)? {
        by_verse
            .entry(detail.annotation.verse_id)
            .or_default()
            .push(detail.annotation);
    }
    if by_verse.is_empty() {
        return Ok(Page::empty(pagination));
    }

    let verse_filter = VerseFilter {
        verse_ids: Some(by_verse.keys().copied().collect()),
        ..Default::default()
    };
    let matcher = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(TextMatcher::substring);

    let matches = SD::verses(&verse_filter, conn)?
        .into_iter()
        .filter_map(|verse| {
            let annotations = by_verse.remove(&verse.id)?;
            let keep = match matcher {
                None => true,
                Some(ref m) => {
                    m.matches(&verse.text)
                        || annotations
                            .iter()
                            .filter_map(|a| a.note_text.as_deref())
                            .any(|note| m.matches(note))
                }
            };
            if keep {
                Some(AnnotatedVerse { verse, annotations })
            } else {
                None
            }
        })
        .collect();

    Ok(Page::paginate(matches, pagination))
}

/// Verses found for a textual reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Passage {
    pub book: Book,
    /// The reference as resolved, using the canonical book name.
    pub reference: Reference,
    pub verses: Vec<Verse>,
}

/// Looks up a reference such as `João 3:16`, `Gênesis 1:1-3` or `Salmos 23`.
pub fn reference<SD>(
    raw: &str,
    books: &[Book],
    conn: &mut SqliteConnection,
) -> Result<Passage, DbError>
where
    SD: SwordDrillable,
{
    let raw = required(raw, "ref")?;
    let mut reference: Reference = raw.parse()?;
    let book = resolver::resolve(&reference.book, books)
        .ok_or_else(|| DbError::BookNotFound {
            book: reference.book.to_owned(),
        })?
        .to_owned();

    let (_, _, chapter_verses) = SD::chapter(book.id, reference.chapter, conn)?;
    let verses: Vec<Verse> = match reference.verses() {
        Some(range) => chapter_verses
            .into_iter()
            .filter(|v| range.contains(&v.number))
            .collect(),
        None => chapter_verses,
    };

    if verses.is_empty() {
        return Err(DbError::ReferenceNotFound {
            reference: raw.to_string(),
        });
    }

    reference.book = book.name.to_owned();
    if reference.verse_start.is_some() {
        reference.verse_end = verses.last().map(|v| v.number);
    }

    Ok(Passage {
        book,
        reference,
        verses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{self, AnnotationInput};
    use crate::test::*;
    use crate::SwordDrill;

    fn books(c: &mut SqliteConnection) -> Vec<Book> {
        SwordDrill::all_books(c).unwrap()
    }

    fn annotate(c: &mut SqliteConnection, verse_id: i32, kind: &str, note: Option<&str>) {
        annotations::create::<SwordDrill>(
            &AnnotationInput {
                verse_id,
                annotation_type: kind.to_string(),
                color: None,
                note_text: note.map(str::to_string),
            },
            c,
        )
        .unwrap();
    }

    #[test]
    fn plain_search() {
        with_corpus(|c| {
            let page = verses::<SwordDrill>("deus", None, Pagination::new(50, 0), c)?;
            assert_eq!(ids(&page.items), vec![1, 2, 3, 5, 8, 9, 10, 11]);
            assert_eq!(page.total, 8);
            assert!(!page.has_more());

            let upper = verses::<SwordDrill>("  DEUS ", None, Pagination::new(50, 0), c)?;
            assert_eq!(upper, page);

            let in_john = verses::<SwordDrill>("Deus", Some(4), Pagination::new(50, 0), c)?;
            assert_eq!(ids(&in_john.items), vec![8, 9, 10]);

            let accented = verses::<SwordDrill>("ÁGUAS", None, Pagination::new(50, 0), c)?;
            assert_eq!(ids(&accented.items), vec![2, 7]);
            Ok(())
        });
    }

    #[test]
    fn plain_search_pagination() {
        with_corpus(|c| {
            let page = verses::<SwordDrill>("deus", None, Pagination::new(3, 2), c)?;
            assert_eq!(ids(&page.items), vec![3, 5, 8]);
            assert_eq!(page.total, 8);
            assert!(page.has_more());

            let past = verses::<SwordDrill>("deus", None, Pagination::new(3, 20), c)?;
            assert!(past.items.is_empty());
            assert_eq!(past.total, 8);
            Ok(())
        });
    }

    #[test]
    fn plain_search_requires_query() {
        with_corpus(|c| {
            assert_eq!(
                verses::<SwordDrill>("   ", None, Pagination::new(50, 0), c).unwrap_err(),
                DbError::MissingParameter {
                    name: "q".to_string()
                }
            );
            let nothing = verses::<SwordDrill>("Melquisedeque", None, Pagination::new(50, 0), c)?;
            assert_eq!(nothing.total, 0);
            Ok(())
        });
    }

    #[test]
    fn advanced_search() {
        with_corpus(|c| {
            let all = advanced::<SwordDrill>(
                &AdvancedQuery {
                    text: "deus".to_string(),
                    ..Default::default()
                },
                Pagination::new(50, 0),
                c,
            )?;
            assert_eq!(all.page.total, 8);
            assert_eq!(
                all.by_book.keys().collect::<Vec<_>>(),
                vec!["Gênesis", "João", "Jó", "Romanos"]
            );
            assert_eq!(ids(&all.by_book["João"].verses), vec![8, 9, 10]);

            let new = advanced::<SwordDrill>(
                &AdvancedQuery {
                    text: "deus".to_string(),
                    testament: Some(Testament::New),
                    ..Default::default()
                },
                Pagination::new(50, 0),
                c,
            )?;
            assert_eq!(ids(&new.page.items), vec![8, 9, 10, 11]);

            let anded = advanced::<SwordDrill>(
                &AdvancedQuery {
                    text: "deus".to_string(),
                    book_ids: vec![1, 4],
                    testament: Some(Testament::Old),
                    ..Default::default()
                },
                Pagination::new(50, 0),
                c,
            )?;
            assert_eq!(ids(&anded.page.items), vec![1, 2, 3]);
            Ok(())
        });
    }

    #[test]
    fn advanced_search_exact_and_case() {
        with_corpus(|c| {
            let search = |c: &mut SqliteConnection, text: &str, exact, case_sensitive| {
                advanced::<SwordDrill>(
                    &AdvancedQuery {
                        text: text.to_string(),
                        exact_match: exact,
                        case_sensitive,
                        ..Default::default()
                    },
                    Pagination::new(50, 0),
                    c,
                )
                .map(|r| ids(&r.page.items))
            };

            let verse = "No princípio, Deus criou os céus e a terra.";
            assert_eq!(search(c, verse, true, true)?, vec![1]);
            assert_eq!(search(c, &verse.to_uppercase(), true, false)?, vec![1]);
            assert_eq!(search(c, &verse.to_uppercase(), true, true)?, Vec::<i32>::new());
            assert_eq!(search(c, "No princípio", true, false)?, Vec::<i32>::new());
            assert_eq!(search(c, "No princípio", false, true)?, vec![1, 8]);
            assert_eq!(search(c, "no princípio", false, true)?, Vec::<i32>::new());
            assert_eq!(search(c, "no princípio", false, false)?, vec![1, 8]);
            Ok(())
        });
    }

    #[test]
    fn advanced_groups_only_the_page() {
        with_corpus(|c| {
            let results = advanced::<SwordDrill>(
                &AdvancedQuery {
                    text: "deus".to_string(),
                    ..Default::default()
                },
                Pagination::new(2, 0),
                c,
            )?;
            assert_eq!(results.page.items.len(), 2);
            assert_eq!(results.by_book.len(), 1);
            assert_eq!(results.by_book["Gênesis"].verses.len(), 2);
            Ok(())
        });
    }

    #[test]
    fn suggestions_for_short_query() {
        with_corpus(|c| {
            let books = books(c);
            let result = suggestions::<SwordDrill>("s", 10, &books, c)?;
            assert!(result.books.is_empty());
            assert!(result.verses.is_empty());
            assert_eq!(result.popular_searches.unwrap().len(), POPULAR_SEARCHES.len());
            Ok(())
        });
    }

    #[test]
    fn suggestions_for_books_and_verses() {
        with_corpus(|c| {
            let books = books(c);
            let result = suggestions::<SwordDrill>("No", 10, &books, c)?;
            assert_eq!(
                result.books.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
                vec!["Romanos"]
            );
            assert_eq!(
                result.verses.iter().map(|v| v.id).collect::<Vec<_>>(),
                vec![1, 8]
            );
            assert_eq!(result.verses[1].reference, "João 1:1");
            assert_eq!(result.popular_searches, None);

            // Prefix only, not substring.
            let prefix = suggestions::<SwordDrill>("princípio", 10, &books, c)?;
            assert!(prefix.verses.is_empty());

            let limited = suggestions::<SwordDrill>("no", 1, &books, c)?;
            assert_eq!(limited.verses.len(), 1);
            Ok(())
        });
    }

    #[test]
    fn suggestion_preview() {
        with_corpus(|c| {
            let books = books(c);
            let result = suggestions::<SwordDrill>("a terra", 10, &books, c)?;
            assert_eq!(result.verses.len(), 1);
            let preview = &result.verses[0].text_preview;
            assert!(preview.ends_with('…'));
            assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
            Ok(())
        });
    }

    #[test]
    fn preview_truncation() {
        assert_eq!(preview("curto"), "curto");
        let exact: String = "é".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);
        let long: String = "é".repeat(PREVIEW_CHARS + 1);
        assert_eq!(preview(&long), format!("{}…", exact));
    }

    #[test]
    fn similar_verses() {
        with_corpus(|c| {
            let stop_words = StopWords::default();
            let result = similar::<SwordDrill>(9, 10, &stop_words, c)?;
            assert_eq!(result.reference_verse.id, 9);
            assert_eq!(result.keywords, vec!["deus", "tanto", "amou", "mundo", "filho"]);
            assert_eq!(ids(&result.page.items), vec![1, 2, 3, 5, 8, 10, 11]);
            assert_eq!(result.message, None);

            let limited = similar::<SwordDrill>(9, 3, &stop_words, c)?;
            assert_eq!(ids(&limited.page.items), vec![1, 2, 3]);
            assert_eq!(limited.page.total, 7);
            assert!(limited.page.has_more());
            Ok(())
        });
    }

    #[test]
    fn similar_never_contains_reference_verse() {
        with_corpus(|c| {
            let stop_words = StopWords::default();
            for id in 1..=12 {
                let result = similar::<SwordDrill>(id, 100, &stop_words, c)?;
                assert!(result.page.items.iter().all(|v| v.id != id));
            }
            Ok(())
        });
    }

    #[test]
    fn similar_without_keywords() {
        with_corpus(|c| {
            let result = similar::<SwordDrill>(12, 10, &StopWords::default(), c)?;
            assert!(result.keywords.is_empty());
            assert!(result.page.items.is_empty());
            assert_eq!(result.page.total, 0);
            assert!(result.message.is_some());
            Ok(())
        });
    }

    #[test]
    fn similar_unknown_verse() {
        with_corpus(|c| {
            assert_eq!(
                similar::<SwordDrill>(404, 10, &StopWords::default(), c).unwrap_err(),
                DbError::VerseNotFound { id: 404 }
            );
            Ok(())
        });
    }

    #[test]
    fn annotated_search() {
        with_corpus(|c| {
            annotate(c, 9, "highlight", None);
            annotate(c, 9, "note", Some("Amor de Deus"));
            annotate(c, 9, "bookmark", None);
            annotate(c, 6, "note", Some("pastor fiel"));

            let all = annotated::<SwordDrill>(None, None, Pagination::new(50, 0), c)?;
            assert_eq!(
                all.items.iter().map(|a| a.verse.id).collect::<Vec<_>>(),
                vec![6, 9]
            );
            assert_eq!(all.total, 2);
            assert_eq!(all.items[1].annotations.len(), 3);

            let notes =
                annotated::<SwordDrill>(None, Some(AnnotationType::Note), Pagination::new(50, 0), c)?;
            assert_eq!(notes.items.len(), 2);
            assert!(notes.items.iter().all(|a| a.annotations.len() == 1));

            let by_text = annotated::<SwordDrill>(Some("mundo"), None, Pagination::new(50, 0), c)?;
            assert_eq!(by_text.items.len(), 1);
            assert_eq!(by_text.items[0].verse.id, 9);

            let by_note = annotated::<SwordDrill>(Some("amor de"), None, Pagination::new(50, 0), c)?;
            assert_eq!(by_note.items.len(), 1);
            assert_eq!(by_note.items[0].verse.id, 9);

            let none = annotated::<SwordDrill>(
                Some("pastor"),
                Some(AnnotationType::Bookmark),
                Pagination::new(50, 0),
                c,
            )?;
            assert_eq!(none.total, 0);

            let blank = annotated::<SwordDrill>(Some("  "), None, Pagination::new(1, 1), c)?;
            assert_eq!(blank.total, 2);
            assert_eq!(blank.items[0].verse.id, 9);
            Ok(())
        });
    }

    #[test]
    fn annotated_search_without_annotations() {
        with_corpus(|c| {
            let page = annotated::<SwordDrill>(Some("deus"), None, Pagination::new(50, 0), c)?;
            assert_eq!(page.total, 0);
            assert!(page.items.is_empty());
            Ok(())
        });
    }

    #[test]
    fn reference_lookup() {
        with_corpus(|c| {
            let books = books(c);

            let john = reference::<SwordDrill>("João 3:16", &books, c)?;
            assert_eq!(john.book.name, "João");
            assert_eq!(john.verses.len(), 1);
            assert_eq!(john.verses[0].id, 9);
            assert_eq!(john.reference.to_string(), "João 3:16");

            let genesis = reference::<SwordDrill>("Gênesis 1:1-3", &books, c)?;
            assert_eq!(
                genesis.verses.iter().map(|v| v.id).collect::<Vec<_>>(),
                vec![1, 2, 3]
            );

            let psalm = reference::<SwordDrill>("Salmos 23", &books, c)?;
            assert_eq!(psalm.verses.len(), 2);
            assert_eq!(psalm.reference.to_string(), "Salmos 23");

            let job = reference::<SwordDrill>("Jó 1:1", &books, c)?;
            assert_eq!(job.book.name, "Jó");

            let abbreviated = reference::<SwordDrill>("jo 3:16-99", &books, c)?;
            assert_eq!(abbreviated.book.name, "João");
            assert_eq!(abbreviated.verses.len(), 2);
            assert_eq!(abbreviated.reference.to_string(), "João 3:16-17");
            Ok(())
        });
    }

    #[test]
    fn reference_errors() {
        with_corpus(|c| {
            let books = books(c);
            let lookup = |c: &mut SqliteConnection, raw: &str| {
                reference::<SwordDrill>(raw, &books, c).unwrap_err()
            };

            assert_eq!(
                lookup(c, ""),
                DbError::MissingParameter {
                    name: "ref".to_string()
                }
            );
            assert_eq!(
                lookup(c, "bogus"),
                DbError::InvalidReference {
                    reference: "bogus".to_string()
                }
            );
            assert_eq!(
                lookup(c, "Êxodo 20"),
                DbError::BookNotFound {
                    book: "Êxodo".to_string()
                }
            );
            assert_eq!(
                lookup(c, "João 5:1"),
                DbError::ChapterNotFound {
                    book: "João".to_string(),
                    chapter: 5
                }
            );
            assert_eq!(
                lookup(c, "João 3:40"),
                DbError::ReferenceNotFound {
                    reference: "João 3:40".to_string()
                }
            );
            Ok(())
        });
    }
}
