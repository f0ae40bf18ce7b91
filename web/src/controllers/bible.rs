use actix_web::web;
use serde_derive::Deserialize;

use db::navigation::{navigation as neighbours, ChapterLink};
use db::{DbError, SwordDrillable};

use crate::controllers::{block, ok, testament, JsonResult};
use crate::responder::*;
use crate::ServerData;

/// Name reported by the health check.
const SERVICE: &str = "palavra";

#[derive(Clone, Debug, Deserialize)]
pub struct BooksParams {
    pub testament: Option<String>,
}

/// Handles HTTP requests for the health check.
pub async fn health() -> JsonResult {
    Ok(actix_web::HttpResponse::Ok().json(HealthData {
        status: "healthy".to_string(),
        service: SERVICE.to_string(),
    }))
}

/// Handles HTTP requests for a list of all books, optionally of one testament.
pub async fn all_books<SD>(
    data: web::Data<ServerData>,
    params: web::Query<BooksParams>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let testament = testament(params.testament.as_deref())?;
    let books = block(&data, move |conn, _| SD::all_books(conn)).await?;

    ok(ApiResponse::ok(
        books
            .into_iter()
            .filter(|b| testament.map_or(true, |t| b.testament == t))
            .collect::<Vec<_>>(),
    ))
}

/// Handles HTTP requests for a book and its chapters.
pub async fn book<SD>(data: web::Data<ServerData>, params: web::Path<(i32,)>) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let (id,) = params.into_inner();
    let result = block(&data, move |conn, _| SD::book(id, conn)).await?;

    ok(ApiResponse::ok(BookData::from(result)))
}

/// Handles HTTP requests for a chapter, with its verses and neighbouring chapters.
pub async fn chapter<SD>(
    data: web::Data<ServerData>,
    params: web::Path<(i32, i32)>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let (book_id, number) = params.into_inner();
    let chapter_data = block(&data, move |conn, server| {
        let (book, chapter, verses) = SD::chapter(book_id, number, conn)?;
        let navigation = neighbours(&server.books, book.id, chapter.number)?;
        Ok(ChapterData {
            book,
            chapter,
            verses,
            navigation,
        })
    })
    .await?;

    ok(ApiResponse::ok(chapter_data))
}

/// Handles HTTP requests for one verse.
pub async fn verse<SD>(data: web::Data<ServerData>, params: web::Path<(i32,)>) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let (id,) = params.into_inner();
    let verse = block(&data, move |conn, _| SD::verse(id, conn)).await?;

    ok(ApiResponse::ok(VerseData::from(verse)))
}

/// Handles HTTP requests for the chapters before and after a chapter.
///
/// Only the preloaded book list is needed, so no connection is taken.
pub async fn navigation(data: web::Data<ServerData>, params: web::Path<(i32, i32)>) -> JsonResult {
    let (book_id, chapter) = params.into_inner();
    let nav = neighbours(&data.books, book_id, chapter)?;
    let book = data
        .books
        .iter()
        .find(|b| b.id == book_id)
        .ok_or_else(|| DbError::BookNotFound {
            book: book_id.to_string(),
        })?;

    ok(ApiResponse::ok(NavigationData {
        current: ChapterLink {
            book_id,
            book_name: book.name.to_owned(),
            chapter,
        },
        previous: nav.previous,
        next: nav.next,
    }))
}
