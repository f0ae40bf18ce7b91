use actix_web::{web, HttpResponse};
use serde_derive::Deserialize;

use db::annotations::{self as store, AnnotationInput, AnnotationUpdate};
use db::models::AnnotationFilter;
use db::SwordDrillable;

use crate::controllers::{annotation_type, block, ok, JsonResult, PageParams, ANNOTATION_LIMIT};
use crate::responder::*;
use crate::ServerData;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "type")]
    pub annotation_type: Option<String>,
    pub book_id: Option<i32>,
}

/// Handles HTTP requests for annotations, newest first.
pub async fn list<SD>(
    data: web::Data<ServerData>,
    params: web::Query<ListParams>,
    page: web::Query<PageParams>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let filter = AnnotationFilter {
        annotation_type: annotation_type(params.annotation_type.as_deref())?,
        book_id: params.book_id,
        verse_id: None,
    };
    let pagination = page.pagination(ANNOTATION_LIMIT);
    let result = block(&data, move |conn, _| {
        store::list::<SD>(&filter, pagination, conn)
    })
    .await?;

    let body: Vec<AnnotationData> = result
        .items
        .iter()
        .cloned()
        .map(AnnotationData::from)
        .collect();
    ok(ApiResponse::paginated(body, &result))
}

/// Handles HTTP requests to create an annotation.
pub async fn create<SD>(
    data: web::Data<ServerData>,
    input: web::Json<AnnotationInput>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let input = input.into_inner();
    let detail = block(&data, move |conn, _| store::create::<SD>(&input, conn)).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(AnnotationData::from(detail))))
}

/// Handles HTTP requests for one annotation.
pub async fn get<SD>(data: web::Data<ServerData>, params: web::Path<(i32,)>) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let (id,) = params.into_inner();
    let detail = block(&data, move |conn, _| store::get::<SD>(id, conn)).await?;

    ok(ApiResponse::ok(AnnotationData::from(detail)))
}

/// Handles HTTP requests to change some fields of an annotation.
pub async fn update<SD>(
    data: web::Data<ServerData>,
    params: web::Path<(i32,)>,
    changes: web::Json<AnnotationUpdate>,
) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let (id,) = params.into_inner();
    let changes = changes.into_inner();
    let detail = block(&data, move |conn, _| store::update::<SD>(id, &changes, conn)).await?;

    ok(ApiResponse::ok(AnnotationData::from(detail)))
}

/// Handles HTTP requests to remove an annotation.
pub async fn delete<SD>(data: web::Data<ServerData>, params: web::Path<(i32,)>) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let (id,) = params.into_inner();
    block(&data, move |conn, _| store::delete::<SD>(id, conn)).await?;

    ok(ApiResponse::ok(()).with_message(Some(format!("Annotation {} deleted.", id))))
}

/// Handles HTTP requests for the annotations of one verse.
pub async fn by_verse<SD>(data: web::Data<ServerData>, params: web::Path<(i32,)>) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let (verse_id,) = params.into_inner();
    let details = block(&data, move |conn, _| store::by_verse::<SD>(verse_id, conn)).await?;

    ok(ApiResponse::ok(
        details
            .into_iter()
            .map(AnnotationData::from)
            .collect::<Vec<_>>(),
    ))
}

/// Handles HTTP requests for annotation counts.
pub async fn stats<SD>(data: web::Data<ServerData>) -> JsonResult
where
    SD: SwordDrillable + 'static,
{
    let stats = block(&data, move |conn, _| store::stats::<SD>(conn)).await?;

    ok(ApiResponse::ok(stats))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::NaiveDateTime;
    use serde_json::{json, Value};

    use crate::test::*;

    #[actix_web::test]
    async fn stats_route_is_not_an_id() {
        let (status, body) = get("/annotations/stats").await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["total_annotations"], 1);
        assert_eq!(body["data"]["by_type"]["notes"], 1);
        assert_eq!(body["data"]["most_annotated_books"][0]["book_name"], "Salmos");
    }

    #[actix_web::test]
    async fn list_with_mock() {
        let (status, body) = get("/annotations?type=note&limit=10").await;
        assert_eq!(status, 200);
        assert_eq!(body["data"][0]["verse_reference"], "Salmos 23:1");
        assert_eq!(body["pagination"]["limit"], 10);

        let (status, _) = get("/annotations?type=sticker").await;
        assert_eq!(status, 400);
        let (status, _) = get("/annotations/abc").await;
        assert_eq!(status, 400);
    }

    #[actix_web::test]
    async fn annotation_flow() {
        let db = SeededDatabase::new();
        let srv = test::init_service(db.app()).await;

        let created = test::TestRequest::post()
            .uri("/annotations")
            .set_json(json!({"verse_id": 9, "type": "highlight", "color": "#ffcc00"}))
            .send_request(&srv)
            .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(created).await;
        let annotation = &created["data"];
        assert_eq!(annotation["type"], "highlight");
        assert_eq!(annotation["verse_id"], 9);
        assert_eq!(annotation["color"], "#ffcc00");
        assert_eq!(annotation["verse_reference"], "João 3:16");
        assert_eq!(annotation["created_at"], annotation["updated_at"]);
        let id = annotation["id"].as_i64().unwrap();

        let updated = test::TestRequest::put()
            .uri(&format!("/annotations/{}", id))
            .set_json(json!({"note_text": "Amor de Deus"}))
            .send_request(&srv)
            .await;
        assert_eq!(updated.status(), StatusCode::OK);
        let updated: Value = test::read_body_json(updated).await;
        assert_eq!(updated["data"]["type"], "highlight");
        assert_eq!(updated["data"]["color"], "#ffcc00");
        assert_eq!(updated["data"]["note_text"], "Amor de Deus");
        assert_eq!(updated["data"]["created_at"], annotation["created_at"]);
        let timestamp =
            |v: &Value| serde_json::from_value::<NaiveDateTime>(v.to_owned()).unwrap();
        assert!(timestamp(&updated["data"]["updated_at"]) > timestamp(&annotation["updated_at"]));

        let listed: Value = test::call_and_read_body_json(
            &srv,
            test::TestRequest::get().uri("/verses/9/annotations").to_request(),
        )
        .await;
        assert_eq!(listed["data"].as_array().unwrap().len(), 1);

        let annotated: Value = test::call_and_read_body_json(
            &srv,
            test::TestRequest::get()
                .uri("/search/annotated?q=amor%20de")
                .to_request(),
        )
        .await;
        assert_eq!(annotated["pagination"]["total"], 1);
        assert_eq!(annotated["data"]["verses"][0]["id"], 9);

        let deleted = test::TestRequest::delete()
            .uri(&format!("/annotations/{}", id))
            .send_request(&srv)
            .await;
        assert_eq!(deleted.status(), StatusCode::OK);

        let missing = test::TestRequest::get()
            .uri(&format!("/annotations/{}", id))
            .send_request(&srv)
            .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_and_update_validation() {
        let db = SeededDatabase::new();
        let srv = test::init_service(db.app()).await;

        let status = |req: test::TestRequest| {
            let srv = &srv;
            async move { req.send_request(srv).await.status() }
        };

        assert_eq!(
            status(
                test::TestRequest::post()
                    .uri("/annotations")
                    .set_json(json!({"verse_id": 404, "type": "note"}))
            )
            .await,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(
                test::TestRequest::post()
                    .uri("/annotations")
                    .set_json(json!({"verse_id": 9, "type": "scribble"}))
            )
            .await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                test::TestRequest::post()
                    .uri("/annotations")
                    .set_json(json!({"type": "note"}))
            )
            .await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                test::TestRequest::put()
                    .uri("/annotations/1")
                    .set_json(json!({"type": "note"}))
            )
            .await,
            StatusCode::NOT_FOUND
        );

        let created: Value = test::call_and_read_body_json(
            &srv,
            test::TestRequest::post()
                .uri("/annotations")
                .set_json(json!({"verse_id": 6, "type": "bookmark"}))
                .to_request(),
        )
        .await;
        let uri = format!("/annotations/{}", created["data"]["id"]);
        assert_eq!(
            status(test::TestRequest::put().uri(&uri).set_json(json!({}))).await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(
                test::TestRequest::put()
                    .uri(&uri)
                    .set_json(json!({"color": "blue"}))
            )
            .await,
            StatusCode::BAD_REQUEST
        );
    }
}
