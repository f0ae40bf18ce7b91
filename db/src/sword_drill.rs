use diesel::prelude::*;
use diesel::result::Error;

use crate::models::*;
use crate::schema::{annotations, books, chapters, verses};
use crate::DbError;

/// Columns selected for a [VerseRow], in field order.
type VerseRowColumns = (
    verses::id,
    verses::chapter_id,
    verses::number,
    verses::text,
    verses::version,
    chapters::number,
    books::id,
    books::name,
    books::book_order,
    books::testament,
);

const VERSE_ROW_COLUMNS: VerseRowColumns = (
    verses::id,
    verses::chapter_id,
    verses::number,
    verses::text,
    verses::version,
    chapters::number,
    books::id,
    books::name,
    books::book_order,
    books::testament,
);

/// Trait implemented by types that can query for and return types of Bible structures.
///
/// This is the only way the rest of the crate touches storage, so a
/// different engine (or a test double) can stand in for [SwordDrill].
pub trait SwordDrillable {
    /// Gets all books in the Bible, in canonical order.
    fn all_books(conn: &mut SqliteConnection) -> Result<Vec<Book>, DbError>;

    /// Looks up a book by id, along with its chapters in order.
    fn book(id: i32, conn: &mut SqliteConnection) -> Result<(Book, Vec<Chapter>), DbError>;

    /// Looks up one chapter of a book by its number, along with its verses in order.
    fn chapter(
        book_id: i32,
        number: i32,
        conn: &mut SqliteConnection,
    ) -> Result<(Book, Chapter, Vec<Verse>), DbError>;

    /// Looks up a verse by id, with its chapter and book context.
    fn verse(id: i32, conn: &mut SqliteConnection) -> Result<VerseRow, DbError>;

    /// Gets every verse matching the structural filter, in canonical order
    /// (book order, chapter number, verse number).
    fn verses(filter: &VerseFilter, conn: &mut SqliteConnection)
        -> Result<Vec<VerseRow>, DbError>;

    /// Gets every annotation matching the filter, newest first.
    fn annotations(
        filter: &AnnotationFilter,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<AnnotationDetail>, DbError>;

    /// Looks up one annotation by id.
    fn annotation(id: i32, conn: &mut SqliteConnection) -> Result<AnnotationDetail, DbError>;

    /// Stores a new annotation and returns it as persisted.
    fn insert_annotation(
        new: &NewAnnotation,
        conn: &mut SqliteConnection,
    ) -> Result<AnnotationDetail, DbError>;

    /// Applies changes to an annotation and returns it as persisted.
    fn update_annotation(
        id: i32,
        changes: &AnnotationChangeset,
        conn: &mut SqliteConnection,
    ) -> Result<AnnotationDetail, DbError>;

    /// Removes an annotation.
    fn delete_annotation(id: i32, conn: &mut SqliteConnection) -> Result<(), DbError>;
}

/// Main implementation for the [SwordDrillable](crate::sword_drill::SwordDrillable) trait.
pub struct SwordDrill;

impl SwordDrillable for SwordDrill {
    fn all_books(conn: &mut SqliteConnection) -> Result<Vec<Book>, DbError> {
        books::table
            .order_by(books::book_order.asc())
            .load(conn)
            .map_err(DbError::from)
    }

    fn book(id: i32, conn: &mut SqliteConnection) -> Result<(Book, Vec<Chapter>), DbError> {
        let book: Book = books::table
            .find(id)
            .first(conn)
            .map_err(|e| match e {
                Error::NotFound => DbError::BookNotFound {
                    book: id.to_string(),
                },
                e => DbError::from(e),
            })?;

        let chapters = chapters::table
            .filter(chapters::book_id.eq(book.id))
            .order_by(chapters::number.asc())
            .load(conn)?;

        Ok((book, chapters))
    }

    fn chapter(
        book_id: i32,
        number: i32,
        conn: &mut SqliteConnection,
    ) -> Result<(Book, Chapter, Vec<Verse>), DbError> {
        let book: Book = books::table
            .find(book_id)
            .first(conn)
            .map_err(|e| match e {
                Error::NotFound => DbError::BookNotFound {
                    book: book_id.to_string(),
                },
                e => DbError::from(e),
            })?;

        let chapter: Chapter = chapters::table
            .filter(chapters::book_id.eq(book.id))
            .filter(chapters::number.eq(number))
            .first(conn)
            .map_err(|e| match e {
                Error::NotFound => DbError::ChapterNotFound {
                    book: book.name.to_owned(),
                    chapter: number,
                },
                e => DbError::from(e),
            })?;

        let verses = verses::table
            .filter(verses::chapter_id.eq(chapter.id))
            .order_by(verses::number.asc())
            .load(conn)?;

        Ok((book, chapter, verses))
    }

    fn verse(id: i32, conn: &mut SqliteConnection) -> Result<VerseRow, DbError> {
        verses::table
            .inner_join(chapters::table.inner_join(books::table))
            .filter(verses::id.eq(id))
            .select(VERSE_ROW_COLUMNS)
            .first(conn)
            .map_err(|e| match e {
                Error::NotFound => DbError::VerseNotFound { id },
                e => DbError::from(e),
            })
    }

    fn verses(
        filter: &VerseFilter,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<VerseRow>, DbError> {
        let mut query = verses::table
            .inner_join(chapters::table.inner_join(books::table))
            .select(VERSE_ROW_COLUMNS)
            .order_by((
                books::book_order.asc(),
                chapters::number.asc(),
                verses::number.asc(),
            ))
            .into_boxed();

        if !filter.book_ids.is_empty() {
            query = query.filter(books::id.eq_any(filter.book_ids.to_owned()));
        }
        if let Some(testament) = filter.testament {
            query = query.filter(books::testament.eq(testament));
        }
        if let Some(ref ids) = filter.verse_ids {
            if ids.is_empty() {
                return Ok(vec![]);
            }
            query = query.filter(verses::id.eq_any(ids.to_owned()));
        }

        query.load(conn).map_err(DbError::from)
    }

    fn annotations(
        filter: &AnnotationFilter,
        conn: &mut SqliteConnection,
    ) -> Result<Vec<AnnotationDetail>, DbError> {
        let mut query = annotations::table
            .inner_join(verses::table.inner_join(chapters::table.inner_join(books::table)))
            .select((annotations::all_columns, VERSE_ROW_COLUMNS))
            .order_by((annotations::created_at.desc(), annotations::id.desc()))
            .into_boxed();

        if let Some(annotation_type) = filter.annotation_type {
            query = query.filter(annotations::annotation_type.eq(annotation_type));
        }
        if let Some(book_id) = filter.book_id {
            query = query.filter(books::id.eq(book_id));
        }
        if let Some(verse_id) = filter.verse_id {
            query = query.filter(annotations::verse_id.eq(verse_id));
        }

        query
            .load::<(Annotation, VerseRow)>(conn)
            .map(|rows| rows.into_iter().map(AnnotationDetail::from).collect())
            .map_err(DbError::from)
    }

    fn annotation(id: i32, conn: &mut SqliteConnection) -> Result<AnnotationDetail, DbError> {
        annotations::table
            .inner_join(verses::table.inner_join(chapters::table.inner_join(books::table)))
            .filter(annotations::id.eq(id))
            .select((annotations::all_columns, VERSE_ROW_COLUMNS))
            .first::<(Annotation, VerseRow)>(conn)
            .map(AnnotationDetail::from)
            .map_err(|e| match e {
                Error::NotFound => DbError::AnnotationNotFound { id },
                e => DbError::from(e),
            })
    }

    fn insert_annotation(
        new: &NewAnnotation,
        conn: &mut SqliteConnection,
    ) -> Result<AnnotationDetail, DbError> {
        conn.transaction::<_, DbError, _>(|conn| {
            diesel::insert_into(annotations::table)
                .values(new)
                .execute(conn)?;
            let id = annotations::table
                .select(annotations::id)
                .order_by(annotations::id.desc())
                .first::<i32>(conn)?;
            Self::annotation(id, conn)
        })
    }

    fn update_annotation(
        id: i32,
        changes: &AnnotationChangeset,
        conn: &mut SqliteConnection,
    ) -> Result<AnnotationDetail, DbError> {
        conn.transaction::<_, DbError, _>(|conn| {
            let updated = diesel::update(annotations::table.find(id))
                .set(changes)
                .execute(conn)?;
            if updated == 0 {
                return Err(DbError::AnnotationNotFound { id });
            }
            Self::annotation(id, conn)
        })
    }

    fn delete_annotation(id: i32, conn: &mut SqliteConnection) -> Result<(), DbError> {
        let deleted = diesel::delete(annotations::table.find(id)).execute(conn)?;
        if deleted == 0 {
            return Err(DbError::AnnotationNotFound { id });
        }
        Ok(())
    }
}
