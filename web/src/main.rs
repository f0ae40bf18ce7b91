#![warn(clippy::all)]

use std::fmt::Display;
use std::io;

use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use db::models::Book;
use db::{
    build_pool, establish_connection, prefetch_books, run_migrations, SqliteConnectionPool,
    StopWords, SwordDrill,
};

use crate::config::Config;

/// Represents the [server data](actix_web.web.Data.html) for the application.
pub struct ServerData {
    pub db: SqliteConnectionPool,
    /// Every book, in canonical order, loaded once at startup.
    pub books: Vec<Book>,
    pub stop_words: StopWords,
}

fn startup_error<E: Display>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    // Set up logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(startup_error)?;

    // Set up sentry
    let capture_errors = config.sentry_dsn.is_some();
    let _guard = sentry::init((
        config.sentry_dsn.to_owned(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    // Run DB migrations for a new SQLite database, then load the books
    let mut conn = establish_connection(&config.database_url).map_err(startup_error)?;
    run_migrations(&mut conn).map_err(startup_error)?;
    let books = prefetch_books(&mut conn).map_err(startup_error)?;
    drop(conn);

    let stop_words = match config.stop_words_path {
        Some(ref path) => StopWords::from_file(path).map_err(startup_error)?,
        None => StopWords::default(),
    };
    info!(
        "Loaded {} books and {} stop words from {}",
        books.len(),
        stop_words.len(),
        config.database_url
    );

    let data = web::Data::new(ServerData {
        db: build_pool(&config.database_url, config.pool_size).map_err(startup_error)?,
        books,
        stop_words,
    });

    HttpServer::new(move || {
        App::new()
            .wrap(
                sentry_actix::Sentry::builder()
                    .emit_header(true)
                    .capture_server_errors(capture_errors)
                    .finish(),
            )
            .wrap(middleware::Logger::default())
            .app_data(data.clone())
            .configure(controllers::configure::<SwordDrill>)
            .default_service(web::route().to(controllers::not_found))
    })
    .workers(config.workers)
    .bind(&config.bind_address)?
    .run()
    .await
}

mod config;
mod controllers;
mod error;
mod responder;
