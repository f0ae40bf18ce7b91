use actix_web::{error, web, HttpRequest, HttpResponse};
use serde_derive::Deserialize;

use db::models::{AnnotationType, Testament};
use db::{DbConnection, DbError, Pagination, SwordDrillable};

use crate::error::{Error, JsonError};
use crate::responder::ApiResponse;
use crate::ServerData;

/// Result for JSON response handlers
pub type JsonResult = Result<HttpResponse, JsonError>;

/// Default page size of verse, advanced and annotated search.
pub const SEARCH_LIMIT: usize = 50;

/// Default number of suggestions and similar verses.
pub const SHORT_LIMIT: usize = 10;

/// Default page size of annotation listings.
pub const ANNOTATION_LIMIT: usize = 100;

/// Limit and offset query parameters shared by paginated routes.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PageParams {
    pub fn pagination(&self, default_limit: usize) -> Pagination {
        Pagination::new(
            self.limit.unwrap_or(default_limit),
            self.offset.unwrap_or_default(),
        )
    }
}

/// Parses an optional `testament` parameter.
pub fn testament(value: Option<&str>) -> Result<Option<Testament>, DbError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse().map_err(|_| DbError::InvalidParameter {
                name: "testament".to_string(),
                value: v.to_string(),
            })
        })
        .transpose()
}

/// Parses an optional `type` parameter.
pub fn annotation_type(value: Option<&str>) -> Result<Option<AnnotationType>, DbError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
}

/// Runs a blocking database operation with a pooled connection.
pub async fn block<F, T>(data: &web::Data<ServerData>, f: F) -> Result<T, JsonError>
where
    F: FnOnce(&mut DbConnection, &ServerData) -> Result<T, DbError> + Send + 'static,
    T: Send + 'static,
{
    let data = data.clone();
    let result = web::block(move || {
        let mut conn = data.db.get().map_err(|e| DbError::ConnectionPool {
            cause: e.to_string(),
        })?;
        f(&mut conn, &data)
    })
    .await??;

    Ok(result)
}

fn malformed<E: std::fmt::Display>(e: E, _: &HttpRequest) -> error::Error {
    JsonError(Error::Malformed(e.to_string())).into()
}

/// Handles requests that match no route.
pub async fn not_found() -> JsonResult {
    Err(Error::NoRoute.into())
}

/// Registers every API route, backed by the storage `SD`.
pub fn configure<SD>(cfg: &mut web::ServiceConfig)
where
    SD: SwordDrillable + 'static,
{
    cfg.app_data(web::QueryConfig::default().error_handler(malformed))
        .app_data(web::PathConfig::default().error_handler(malformed))
        .app_data(web::JsonConfig::default().error_handler(malformed))
        .service(web::resource("/health").route(web::get().to(bible::health)))
        .service(web::resource("/books").route(web::get().to(bible::all_books::<SD>)))
        .service(web::resource("/books/{id}").route(web::get().to(bible::book::<SD>)))
        .service(
            web::resource("/books/{id}/chapters/{number}")
                .route(web::get().to(bible::chapter::<SD>)),
        )
        .service(web::resource("/verses/{id}").route(web::get().to(bible::verse::<SD>)))
        .service(
            web::resource("/verses/{id}/annotations")
                .route(web::get().to(annotations::by_verse::<SD>)),
        )
        .service(
            web::resource("/navigation/{book_id}/{chapter}")
                .route(web::get().to(bible::navigation)),
        )
        .service(web::resource("/search/verses").route(web::get().to(search::verses::<SD>)))
        .service(
            web::resource("/search/reference").route(web::get().to(search::reference::<SD>)),
        )
        .service(web::resource("/search/advanced").route(web::get().to(search::advanced::<SD>)))
        .service(
            web::resource("/search/suggestions")
                .route(web::get().to(search::suggestions::<SD>)),
        )
        .service(web::resource("/search/similar").route(web::get().to(search::similar::<SD>)))
        .service(
            web::resource("/search/annotated").route(web::get().to(search::annotated::<SD>)),
        )
        .service(
            web::resource("/annotations")
                .route(web::get().to(annotations::list::<SD>))
                .route(web::post().to(annotations::create::<SD>)),
        )
        .service(
            web::resource("/annotations/stats").route(web::get().to(annotations::stats::<SD>)),
        )
        .service(
            web::resource("/annotations/{id}")
                .route(web::get().to(annotations::get::<SD>))
                .route(web::put().to(annotations::update::<SD>))
                .route(web::delete().to(annotations::delete::<SD>)),
        );
}

/// Shorthand for a 200 response with the standard envelope.
pub fn ok<T: serde::Serialize>(body: ApiResponse<T>) -> JsonResult {
    Ok(HttpResponse::Ok().json(body))
}

pub mod annotations;
pub mod bible;
pub mod search;
