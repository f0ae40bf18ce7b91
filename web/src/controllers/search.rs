use actix_web::{web, HttpRequest};
use serde_derive::Deserialize;
use url::form_urlencoded;

use db::search::{self as engine, AdvancedQuery};
use db::{DbError, Pagination, SwordDrillable};

use crate::controllers::{
    annotation_type, block, ok, testament, JsonResult, PageParams, SEARCH_LIMIT, SHORT_LIMIT,
};
use crate::responder::*;
use crate::ServerData;

/// Query string parameters for the search endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub book_id: Option<i32>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub verse_id: Option<i32>,
    #[serde(rename = "type")]
    pub annotation_type: Option<String>,
}

/// Handles HTTP requests for a plain text search.
pub async fn verses<SD>(
    data: web::Data<ServerData>,
    params: web::Query<SearchParams>,
    page: web::Query<PageParams>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let q = params.q.to_owned().unwrap_or_default();
    let book_id = params.book_id;
    let pagination = page.pagination(SEARCH_LIMIT);

    let (query, result) = block(&data, move |conn, _| {
        engine::verses::<SD>(&q, book_id, pagination, conn).map(|page| (q, page))
    })
    .await?;

    ok(ApiResponse::paginated(
        VerseSearchData::new(query.trim().to_string(), result.items.to_owned()),
        &result,
    ))
}

/// Handles HTTP requests for a reference lookup (e.g. `?ref=João 3:16`).
pub async fn reference<SD>(
    data: web::Data<ServerData>,
    params: web::Query<SearchParams>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let raw = params.reference.to_owned().unwrap_or_default();
    let passage = block(&data, move |conn, server| {
        engine::reference::<SD>(&raw, &server.books, conn)
    })
    .await?;

    ok(ApiResponse::ok(PassageData::from(passage)))
}

/// Parses a boolean flag such as `exact=true`.
fn flag(name: &str, value: Option<&str>) -> Result<bool, DbError> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some(other) => Err(DbError::InvalidParameter {
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Reads the advanced search options from a query string.
///
/// `book_ids` may be repeated, comma separated, or both.
fn advanced_query(query_string: &str) -> Result<AdvancedQuery, DbError> {
    let mut text = None;
    let mut book_ids = vec![];
    let mut testament_value = None;
    let mut exact = None;
    let mut case_sensitive = None;

    for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
        match key.as_ref() {
            "q" => text = Some(value.into_owned()),
            "book_ids" => {
                for id in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    book_ids.push(id.parse().map_err(|_| DbError::InvalidParameter {
                        name: "book_ids".to_string(),
                        value: id.to_string(),
                    })?);
                }
            }
            "testament" => testament_value = Some(value.into_owned()),
            "exact" => exact = Some(value.into_owned()),
            "case_sensitive" => case_sensitive = Some(value.into_owned()),
            _ => {}
        }
    }

    Ok(AdvancedQuery {
        text: text.unwrap_or_default(),
        book_ids,
        testament: testament(testament_value.as_deref())?,
        exact_match: flag("exact", exact.as_deref())?,
        case_sensitive: flag("case_sensitive", case_sensitive.as_deref())?,
    })
}

/// Handles HTTP requests for an advanced search.
pub async fn advanced<SD>(
    data: web::Data<ServerData>,
    page: web::Query<PageParams>,
    req: HttpRequest,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let query = advanced_query(req.query_string())?;
    let pagination = page.pagination(SEARCH_LIMIT);

    let (query, results) = block(&data, move |conn, _| {
        engine::advanced::<SD>(&query, pagination, conn).map(|results| (query, results))
    })
    .await?;

    let page = results.page.to_owned();
    ok(ApiResponse::paginated(
        AdvancedSearchData::new(query, results),
        &page,
    ))
}

/// Handles HTTP requests for search suggestions while typing.
pub async fn suggestions<SD>(
    data: web::Data<ServerData>,
    params: web::Query<SearchParams>,
    page: web::Query<PageParams>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let partial = params.q.to_owned().unwrap_or_default();
    let limit = page.limit.unwrap_or(SHORT_LIMIT);
    let suggestions = block(&data, move |conn, server| {
        engine::suggestions::<SD>(&partial, limit, &server.books, conn)
    })
    .await?;

    ok(ApiResponse::ok(suggestions))
}

/// Handles HTTP requests for verses similar to a verse.
pub async fn similar<SD>(
    data: web::Data<ServerData>,
    params: web::Query<SearchParams>,
    page: web::Query<PageParams>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let verse_id = params.verse_id.ok_or_else(|| DbError::MissingParameter {
        name: "verse_id".to_string(),
    })?;
    let limit = page.limit.unwrap_or(SHORT_LIMIT);
    let similar = block(&data, move |conn, server| {
        engine::similar::<SD>(verse_id, limit, &server.stop_words, conn)
    })
    .await?;

    let page = similar.page;
    let body = SimilarData {
        reference_verse: similar.reference_verse.into(),
        keywords_used: similar.keywords,
        similar_verses: page.items.iter().cloned().map(VerseData::from).collect(),
    };
    ok(ApiResponse::paginated(body, &page).with_message(similar.message))
}

/// Handles HTTP requests for a search among annotated verses.
pub async fn annotated<SD>(
    data: web::Data<ServerData>,
    params: web::Query<SearchParams>,
    page: web::Query<PageParams>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string);
    let annotation_type = annotation_type(params.annotation_type.as_deref())?;
    let pagination: Pagination = page.pagination(SEARCH_LIMIT);

    let q = query.to_owned();
    let result = block(&data, move |conn, _| {
        engine::annotated::<SD>(q.as_deref(), annotation_type, pagination, conn)
    })
    .await?;

    let body = AnnotatedSearchData {
        query,
        annotation_type,
        verses: result.items.iter().cloned().map(AnnotatedVerseData::from).collect(),
    };
    ok(ApiResponse::paginated(body, &result))
}
