use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use registry::AppRegistry;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    api::route::v1::routes().with_state(AppRegistry::in_memory())
}

fn request(method: Method, path: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register_and_login(app: &Router, name: &str, is_admin: bool) -> String {
    let email = format!("{name}@example.com");
    let (status, _) = send(
        app,
        request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": name,
                "email": email,
                "password": "passw0rd",
                "isAdmin": is_admin,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": email, "password": "passw0rd" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["accessToken"].as_str().unwrap().to_string()
}

async fn create_category(app: &Router, admin_token: &str, name: &str) -> String {
    let (status, _) = send(
        app,
        request(
            Method::POST,
            "/api/v1/categories",
            Some(admin_token),
            Some(json!({ "name": name })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        request(Method::GET, "/api/v1/categories", Some(admin_token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .unwrap()["categoryId"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn create_timeslot(app: &Router, admin_token: &str, category_id: &str, start: &str) -> String {
    let end = start.replace("T10:00", "T11:00");
    let (status, body) = send(
        app,
        request(
            Method::POST,
            "/api/v1/timeslots",
            Some(admin_token),
            Some(json!({
                "categoryId": category_id,
                "title": "slot",
                "startTime": format!("{start}:00Z"),
                "endTime": format!("{end}:00Z"),
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["timeslotId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = app();
    let (status, _) = send(&app, request(Method::GET, "/api/v1/timeslots", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/v1/timeslots", Some("bogus"), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_me_roundtrip() {
    let app = app();
    let token = register_and_login(&app, "alice", false).await;

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/v1/users/me", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["isAdmin"], false);

    // A second registration with the same email is rejected.
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": "alice2",
                "email": "alice@example.com",
                "password": "other",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn slot_creation_is_admin_only_and_validated() {
    let app = app();
    let admin = register_and_login(&app, "admin", true).await;
    let user = register_and_login(&app, "user", false).await;
    let category_id = create_category(&app, &admin, "cat-1").await;

    let slot = json!({
        "categoryId": category_id,
        "title": "slot",
        "startTime": "2024-01-01T10:00:00Z",
        "endTime": "2024-01-01T11:00:00Z",
    });
    let (status, _) = send(
        &app,
        request(Method::POST, "/api/v1/timeslots", Some(&user), Some(slot)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // End before start is rejected.
    let backwards = json!({
        "categoryId": category_id,
        "title": "slot",
        "startTime": "2024-01-01T10:00:00Z",
        "endTime": "2024-01-01T09:00:00Z",
    });
    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/timeslots",
            Some(&admin),
            Some(backwards),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn double_booking_is_a_conflict() {
    let app = app();
    let admin = register_and_login(&app, "admin", true).await;
    let alice = register_and_login(&app, "alice", false).await;
    let bob = register_and_login(&app, "bob", false).await;
    let category_id = create_category(&app, &admin, "cat-1").await;
    let timeslot_id = create_timeslot(&app, &admin, &category_id, "2024-01-01T10:00").await;

    let book = json!({ "timeslotId": timeslot_id });
    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/bookings",
            Some(&alice),
            Some(book.clone()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let booking_id = body["bookingId"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/v1/bookings", Some(&bob), Some(book.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Only the owner may cancel.
    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/v1/bookings/{booking_id}"),
            Some(&bob),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/v1/bookings/{booking_id}"),
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Freed by the cancellation, the slot books again.
    let (status, _) = send(
        &app,
        request(Method::POST, "/api/v1/bookings", Some(&bob), Some(book)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn timeslot_listing_reports_availability() {
    let app = app();
    let admin = register_and_login(&app, "admin", true).await;
    let alice = register_and_login(&app, "alice", false).await;
    let category_id = create_category(&app, &admin, "cat-1").await;
    let booked = create_timeslot(&app, &admin, &category_id, "2024-01-01T10:00").await;
    let free = create_timeslot(&app, &admin, &category_id, "2024-01-02T10:00").await;

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/bookings",
            Some(&alice),
            Some(json!({ "timeslotId": booked })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/v1/timeslots", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["timeslotId"], booked.as_str());
    assert_eq!(items[0]["isAvailable"], false);
    assert_eq!(items[0]["booking"]["userName"], "alice");
    assert_eq!(items[1]["timeslotId"], free.as_str());
    assert_eq!(items[1]["isAvailable"], true);
    assert_eq!(items[1]["booking"], Value::Null);
}

#[tokio::test]
async fn timeslot_listing_honors_filters() {
    let app = app();
    let admin = register_and_login(&app, "admin", true).await;
    let cat1 = create_category(&app, &admin, "cat-1").await;
    let cat2 = create_category(&app, &admin, "cat-2").await;
    let first = create_timeslot(&app, &admin, &cat1, "2024-01-01T10:00").await;
    let second = create_timeslot(&app, &admin, &cat1, "2024-01-02T10:00").await;
    let _third = create_timeslot(&app, &admin, &cat2, "2024-01-03T10:00").await;

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            &format!("/api/v1/timeslots?startAfter=2024-01-01T00:00:00Z&categoryIds={cat1}"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["timeslotId"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![first, second]);

    let (status, _) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/timeslots?categoryIds=not-a-uuid",
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deleting_a_timeslot_cascades_to_bookings() {
    let app = app();
    let admin = register_and_login(&app, "admin", true).await;
    let alice = register_and_login(&app, "alice", false).await;
    let category_id = create_category(&app, &admin, "cat-1").await;
    let timeslot_id = create_timeslot(&app, &admin, &category_id, "2024-01-01T10:00").await;

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/bookings",
            Some(&alice),
            Some(json!({ "timeslotId": timeslot_id })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        request(
            Method::DELETE,
            &format!("/api/v1/timeslots/{timeslot_id}"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        request(Method::GET, "/api/v1/bookings", Some(&alice), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());

    let (status, _) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/bookings",
            Some(&alice),
            Some(json!({ "timeslotId": timeslot_id })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preferences_replace_wholesale_and_drop_unknown_ids() {
    let app = app();
    let admin = register_and_login(&app, "admin", true).await;
    let alice = register_and_login(&app, "alice", false).await;
    let cat1 = create_category(&app, &admin, "cat-1").await;
    let cat2 = create_category(&app, &admin, "cat-2").await;

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/v1/users/me/preferences",
            Some(&alice),
            Some(json!({
                "categoryIds": [cat1, cat2, uuid::Uuid::new_v4().to_string()],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        request(
            Method::PUT,
            "/api/v1/users/me/preferences",
            Some(&alice),
            Some(json!({ "categoryIds": [cat2] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["cat-2"]);

    let (status, body) = send(
        &app,
        request(
            Method::GET,
            "/api/v1/users/me/preferences",
            Some(&alice),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let app = app();
    let token = register_and_login(&app, "alice", false).await;

    let (status, _) = send(
        &app,
        request(Method::POST, "/api/v1/auth/logout", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        request(Method::GET, "/api/v1/users/me", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
