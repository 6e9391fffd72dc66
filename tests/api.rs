//! End-to-end tests for the HTTP surface, run against an in-memory database.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, StatusCode},
};
use movieshelf::{
    AppState, db,
    entities::{NamedTable, movie},
    models::MovieRecord,
    store::Store,
};
use sea_orm::{NotSet, Set};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    app: Router,
    store: Store,
}

async fn test_app() -> TestApp {
    let db = db::connect_and_migrate("sqlite::memory:").await.unwrap();
    let store = Store::new(db);
    let app = movieshelf::router(Arc::new(AppState { store: store.clone() }));
    TestApp { app, store }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                req = req.header("content-type", "application/json");
                Body::from(json.to_string())
            },
            None => Body::empty(),
        };
        self.app.clone().oneshot(req.body(body).unwrap()).await.unwrap()
    }

    async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, None).await
    }

    async fn seed_movie(&self, title: &str, genre_id: Option<i32>, director_id: Option<i32>) -> i32 {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(Some(title.to_string())),
            description: Set(Some(format!("{title} description"))),
            trailer: Set(Some(format!("https://trailers.example/{title}"))),
            year: Set(Some(1999)),
            rating: Set(Some(6.4)),
            genre_id: Set(genre_id),
            director_id: Set(director_id),
        };
        self.store.insert(model).await.unwrap()
    }

    /// Genres 1, 2 and directors 10, 20, plus one movie per combination and
    /// one movie with no references.
    async fn seed_catalog(&self) {
        for id in [1, 2] {
            self.store.insert_named(NamedTable::Genre, id, Some(format!("genre {id}"))).await.unwrap();
        }
        for id in [10, 20] {
            self.store.insert_named(NamedTable::Director, id, Some(format!("director {id}"))).await.unwrap();
        }
        self.seed_movie("g1d10", Some(1), Some(10)).await;
        self.seed_movie("g1d20", Some(1), Some(20)).await;
        self.seed_movie("g2d10", Some(2), Some(10)).await;
        self.seed_movie("g2d20", Some(2), Some(20)).await;
        self.seed_movie("bare", None, None).await;
    }
}

async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn titles(resp: Response<Body>) -> Vec<String> {
    assert_eq!(resp.status(), StatusCode::OK);
    let movies: Vec<MovieRecord> = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    let mut titles: Vec<String> = movies.into_iter().filter_map(|m| m.title).collect();
    titles.sort();
    titles
}

#[tokio::test]
async fn list_without_filters_returns_every_movie() {
    let t = test_app().await;
    t.seed_catalog().await;

    assert_eq!(
        titles(t.get("/movies/").await).await,
        ["bare", "g1d10", "g1d20", "g2d10", "g2d20"]
    );
    assert_eq!(titles(t.get("/movies").await).await.len(), 5);
}

#[tokio::test]
async fn list_filters_on_both_columns() {
    let t = test_app().await;
    t.seed_catalog().await;

    assert_eq!(titles(t.get("/movies/?director_id=10&genre_id=2").await).await, ["g2d10"]);
}

#[tokio::test]
async fn list_filters_on_a_single_column() {
    let t = test_app().await;
    t.seed_catalog().await;

    assert_eq!(titles(t.get("/movies/?genre_id=1").await).await, ["g1d10", "g1d20"]);
    assert_eq!(titles(t.get("/movies/?director_id=20").await).await, ["g1d20", "g2d20"]);
}

#[tokio::test]
async fn empty_filter_value_is_ignored() {
    let t = test_app().await;
    t.seed_catalog().await;

    assert_eq!(titles(t.get("/movies/?director_id=&genre_id=2").await).await, ["g2d10", "g2d20"]);
}

#[tokio::test]
async fn non_numeric_filter_matches_nothing() {
    let t = test_app().await;
    t.seed_catalog().await;

    assert!(titles(t.get("/movies/?genre_id=drama").await).await.is_empty());
}

#[tokio::test]
async fn get_movie_returns_full_record() {
    let t = test_app().await;
    t.seed_catalog().await;
    let id = t.seed_movie("Heat", Some(2), None).await;

    let resp = t.get(&format!("/movies/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(
        json,
        json!({
            "id": id,
            "title": "Heat",
            "description": "Heat description",
            "trailer": "https://trailers.example/Heat",
            "year": 1999,
            "rating": 6.4,
            "genre_id": 2,
            "director_id": null,
        })
    );
}

#[tokio::test]
async fn get_missing_movie_is_404_with_empty_body() {
    let t = test_app().await;

    let resp = t.get("/movies/4242").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn genre_lifecycle_uses_body_id() {
    let t = test_app().await;

    let resp = t.send(Method::POST, "/genres/5", Some(json!([{"id": 7, "name": "Noir"}]))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
    assert!(t.store.find_named(NamedTable::Genre, 5).await.unwrap().is_none());
    let row = t.store.find_named(NamedTable::Genre, 7).await.unwrap().unwrap();
    assert_eq!(row.name.as_deref(), Some("Noir"));

    let resp = t.send(Method::PUT, "/genres/7", Some(json!([{"name": "Neo-Noir"}]))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let row = t.store.find_named(NamedTable::Genre, 7).await.unwrap().unwrap();
    assert_eq!(row.name.as_deref(), Some("Neo-Noir"));

    let resp = t.send(Method::DELETE, "/genres/7", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(t.store.find_named(NamedTable::Genre, 7).await.unwrap().is_none());

    let resp = t.send(Method::DELETE, "/genres/7", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn created_genre_round_trips_through_movie_filter() {
    let t = test_app().await;

    let resp = t.send(Method::POST, "/genres/9", Some(json!([{"id": 9, "name": "X"}]))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let id = t.seed_movie("Tagged", Some(9), None).await;
    assert_eq!(titles(t.get("/movies/?genre_id=9").await).await, ["Tagged"]);

    // still referenced by a movie
    let resp = t.send(Method::DELETE, "/genres/9", None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    t.store.delete_by_id::<movie::Entity>(id).await.unwrap();
    let resp = t.send(Method::DELETE, "/genres/9", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(t.store.find_named(NamedTable::Genre, 9).await.unwrap().is_none());
    assert!(titles(t.get("/movies/?genre_id=9").await).await.is_empty());
}

#[tokio::test]
async fn duplicate_genre_id_is_a_server_error() {
    let t = test_app().await;
    let body = json!([{"id": 3, "name": "Drama"}]);

    assert_eq!(t.send(Method::POST, "/genres/3", Some(body.clone())).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        t.send(Method::POST, "/genres/3", Some(body)).await.status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn update_missing_genre_is_404() {
    let t = test_app().await;

    let resp = t.send(Method::PUT, "/genres/404", Some(json!([{"name": "Ghost"}]))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_bodies_are_server_faults() {
    let t = test_app().await;

    let resp = t.send(Method::POST, "/genres/1", Some(json!([]))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = t.send(Method::POST, "/genres/1", Some(json!([{"name": "No id"}]))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = t.send(Method::POST, "/genres/1", Some(json!({"id": 1, "name": "Not a list"}))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let resp = t.send(Method::PUT, "/genres/1", Some(json!([{"id": 1}]))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert!(t.store.find_named(NamedTable::Genre, 1).await.unwrap().is_none());
}

#[tokio::test]
async fn null_name_is_stored_as_null() {
    let t = test_app().await;

    let resp = t.send(Method::POST, "/genres/7", Some(json!([{"id": 7, "name": null}]))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let row = t.store.find_named(NamedTable::Genre, 7).await.unwrap().unwrap();
    assert_eq!(row.name, None);

    let resp = t.send(Method::PUT, "/genres/7", Some(json!([{"name": "Noir"}]))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = t.send(Method::PUT, "/genres/7", Some(json!([{"name": null}]))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let row = t.store.find_named(NamedTable::Genre, 7).await.unwrap().unwrap();
    assert_eq!(row.name, None);
}

#[tokio::test]
async fn non_integer_ids_match_no_route() {
    let t = test_app().await;

    let resp = t.get("/movies/abc").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());

    let resp = t.send(Method::PUT, "/genres/abc", Some(json!([{"name": "x"}]))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = t.send(Method::DELETE, "/directors/abc", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_docs_are_served() {
    let t = test_app().await;

    let resp = t.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page = String::from_utf8(body_bytes(resp).await).unwrap();
    assert!(page.contains("swagger-ui"));
    assert!(page.contains("/swagger.json"));

    let resp = t.get("/swagger.json").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body_bytes(resp).await).unwrap();
    assert_eq!(doc["openapi"], "3.0.3");
    assert!(doc["paths"]["/movies/{id}"]["get"].is_object());
    assert!(doc["paths"]["/directors/{id}"]["put"].is_object());
}

#[tokio::test]
async fn director_routes_mutate_the_director_table() {
    let t = test_app().await;

    let resp = t.send(Method::POST, "/directors/3", Some(json!([{"id": 11, "name": "Jane"}]))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let row = t.store.find_named(NamedTable::Director, 11).await.unwrap().unwrap();
    assert_eq!(row.name.as_deref(), Some("Jane"));
    assert!(t.store.find_named(NamedTable::Genre, 11).await.unwrap().is_none());

    let resp = t.send(Method::PUT, "/directors/11", Some(json!([{"name": "Jane D."}]))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let row = t.store.find_named(NamedTable::Director, 11).await.unwrap().unwrap();
    assert_eq!(row.name.as_deref(), Some("Jane D."));

    assert_eq!(t.send(Method::DELETE, "/directors/11", None).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(t.send(Method::DELETE, "/directors/11", None).await.status(), StatusCode::NOT_FOUND);
}
