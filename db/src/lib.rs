#[macro_use]
extern crate diesel;

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use thiserror::Error;

use crate::models::Book;

/// Type of a pooled SQLite connection manager.
pub type SqliteConnectionManager = r2d2::ConnectionManager<SqliteConnection>;

/// Type for a SQLite connection pool.
pub type SqliteConnectionPool = r2d2::Pool<SqliteConnectionManager>;

pub type DbConnection = SqliteConnection;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Broad category of a [DbError], used by callers to pick a response status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input.
    Validation,
    /// The requested entity does not exist.
    NotFound,
    /// Unexpected storage failure.
    Internal,
}

#[derive(Clone, Error, Debug, PartialEq)]
pub enum DbError {
    #[error("Query parameter \"{}\" is required.", name)]
    MissingParameter { name: String },

    #[error("'{}' is not a valid value for \"{}\".", value, name)]
    InvalidParameter { name: String, value: String },

    #[error("'{}' is not a valid Bible reference.", reference)]
    InvalidReference { reference: String },

    #[error(
        "'{}' is not a valid annotation type. Must be one of: highlight, note, bookmark.",
        value
    )]
    InvalidAnnotationType { value: String },

    #[error("'{}' is not a valid hex color.", value)]
    InvalidColor { value: String },

    #[error("No annotation fields were provided.")]
    EmptyUpdate,

    #[error("'{}' was not found.", book)]
    BookNotFound { book: String },

    #[error("Chapter {} was not found in {}.", chapter, book)]
    ChapterNotFound { book: String, chapter: i32 },

    #[error("Verse {} was not found.", id)]
    VerseNotFound { id: i32 },

    #[error("Annotation {} was not found.", id)]
    AnnotationNotFound { id: i32 },

    #[error("Reference '{}' was not found.", reference)]
    ReferenceNotFound { reference: String },

    #[error("There was a connection pool error.")]
    ConnectionPool { cause: String },

    #[error("There was a database error. Root cause: {:?}.", cause)]
    Other { cause: String },

    #[error("There was a database migration error. Root cause: {:?}.", cause)]
    Migration { cause: String },
}

impl DbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::MissingParameter { .. }
            | DbError::InvalidParameter { .. }
            | DbError::InvalidReference { .. }
            | DbError::InvalidAnnotationType { .. }
            | DbError::InvalidColor { .. }
            | DbError::EmptyUpdate => ErrorKind::Validation,
            DbError::BookNotFound { .. }
            | DbError::ChapterNotFound { .. }
            | DbError::VerseNotFound { .. }
            | DbError::AnnotationNotFound { .. }
            | DbError::ReferenceNotFound { .. } => ErrorKind::NotFound,
            DbError::ConnectionPool { .. } | DbError::Other { .. } | DbError::Migration { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

impl From<diesel::result::Error> for DbError {
    fn from(e: diesel::result::Error) -> Self {
        DbError::Other {
            cause: e.to_string(),
        }
    }
}

/// Per-connection settings applied whenever the pool hands out a connection.
#[derive(Debug)]
struct ConnectionOptions;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        configure_connection(conn).map_err(r2d2::Error::QueryError)
    }
}

fn configure_connection(conn: &mut SqliteConnection) -> QueryResult<()> {
    conn.batch_execute(&format!(
        "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
        BUSY_TIMEOUT.as_millis()
    ))
}

/// Builds a SQLite connection pool with the given URL.
pub fn build_pool(db_url: &str, max_size: u32) -> Result<SqliteConnectionPool, DbError> {
    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(SqliteConnectionManager::new(db_url))
        .map_err(|e| DbError::ConnectionPool {
            cause: e.to_string(),
        })
}

/// Establishes a non-pooled SQLite connection.
pub fn establish_connection(db_url: &str) -> Result<SqliteConnection, DbError> {
    let mut conn = SqliteConnection::establish(db_url).map_err(|e| DbError::ConnectionPool {
        cause: format!("Error connecting to {}: {}", db_url, e),
    })?;
    configure_connection(&mut conn)?;
    Ok(conn)
}

/// Run any pending Diesel migrations.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), DbError> {
    conn.run_pending_migrations(MIGRATIONS)
        .map(|versions| {
            for version in versions {
                log::info!("Applied migration {}", version);
            }
        })
        .map_err(|e| DbError::Migration {
            cause: e.to_string(),
        })
}

pub fn prefetch_books(conn: &mut SqliteConnection) -> Result<Vec<Book>, DbError> {
    use crate::schema::books;

    books::table
        .order_by(books::book_order.asc())
        .load(conn)
        .map_err(|e| DbError::Other {
            cause: format!("Could not preload book data from database. Cause: {e}"),
        })
}

pub mod annotations;
pub mod models;
pub mod navigation;
pub mod pagination;
pub mod resolver;
mod schema;
pub mod search;
pub mod stop_words;
mod sword_drill;

pub use pagination::{Page, Pagination};
pub use stop_words::StopWords;
pub use sword_drill::{SwordDrill, SwordDrillable};
