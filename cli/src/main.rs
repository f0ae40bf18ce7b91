use std::fmt::Display;
use std::io::{self, Write};

use clap::{Parser, Subcommand};
use dotenv::dotenv;

use db::models::VerseRow;
use db::{establish_connection, prefetch_books, search, Pagination, StopWords, SwordDrill};

/// CLI for looking up and searching Bible verses
#[derive(Parser, Debug)]
#[command(version, author, about)]
struct Args {
    /// SQLite database holding the corpus
    #[arg(long, env = "DATABASE_URL", default_value = "/tmp/palavra.db")]
    database: String,

    /// File of stop words, one per line, ignored when finding similar verses
    #[arg(long, env = "STOP_WORDS_PATH")]
    stop_words: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a reference such as "João 3:16"
    Reference { reference: String },
    /// Search verse text
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        book_id: Option<i32>,
    },
    /// Find verses sharing keywords with a verse
    Similar {
        verse_id: i32,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn cli_error<E: Display>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

fn write_rows(out: &mut impl Write, rows: &[VerseRow]) -> io::Result<()> {
    for v in rows {
        writeln!(out, "{} {}", v.reference(), v.text)?;
    }
    Ok(())
}

fn main() -> io::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut conn = establish_connection(&args.database).map_err(cli_error)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Reference { reference } => {
            let books = prefetch_books(&mut conn).map_err(cli_error)?;
            let passage =
                search::reference::<SwordDrill>(&reference, &books, &mut conn).map_err(cli_error)?;
            writeln!(out, "{}", passage.reference)?;
            for v in passage.verses {
                writeln!(out, "{} {}", v.number, v.text)?;
            }
        }
        Command::Search {
            query,
            limit,
            book_id,
        } => {
            let page = search::verses::<SwordDrill>(
                &query,
                book_id,
                Pagination::first(limit),
                &mut conn,
            )
            .map_err(cli_error)?;
            write_rows(&mut out, &page.items)?;
            writeln!(out, "({} of {} matches)", page.items.len(), page.total)?;
        }
        Command::Similar { verse_id, limit } => {
            let stop_words = match args.stop_words {
                Some(ref path) => StopWords::from_file(path).map_err(cli_error)?,
                None => StopWords::default(),
            };
            let similar = search::similar::<SwordDrill>(verse_id, limit, &stop_words, &mut conn)
                .map_err(cli_error)?;
            writeln!(
                out,
                "{} [{}]",
                similar.reference_verse.reference(),
                similar.keywords.join(", ")
            )?;
            match similar.message {
                Some(message) => writeln!(out, "{}", message)?,
                None => write_rows(&mut out, &similar.page.items)?,
            }
        }
    }

    Ok(())
}
