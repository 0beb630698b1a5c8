//! End-to-end tests for the HTTP surface: authentication, the
//! authorization gate, and the admin CRUD flow, driven through the
//! router with an in-memory database and session store.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use railtrace_core::models::user::{CreateUser, Role};
use railtrace_core::repository::UserRepository;
use railtrace_db::repository::SurrealUserRepository;
use railtrace_server::routes;
use railtrace_server::state::AppState;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tower::ServiceExt;

async fn setup_app() -> Router {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    railtrace_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    users
        .create(CreateUser {
            username: "admin".into(),
            password: "admin-secret".into(),
            role: Role::Admin,
        })
        .await
        .unwrap();
    users
        .create(CreateUser {
            username: "bob".into(),
            password: "bob-secret".into(),
            role: Role::User,
        })
        .await
        .unwrap();

    routes::app(AppState::new(db, None))
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Log in and return the session cookie pair.
async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_form(
            "/login",
            &format!("username={username}&password={password}&next="),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should establish a session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn unauthenticated_admin_request_redirects_to_login() {
    let app = setup_app().await;

    let response = app.oneshot(get("/admin/trains", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(location, "/login?next=/admin/trains");
}

#[tokio::test]
async fn failed_login_establishes_no_session() {
    let app = setup_app().await;

    let response = app
        .oneshot(post_form(
            "/login",
            "username=admin&password=wrong&next=",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response.headers().get(header::SET_COOKIE).is_none(),
        "no session cookie may be issued on failed login"
    );
}

#[tokio::test]
async fn non_admin_session_is_forbidden() {
    let app = setup_app().await;
    let cookie = login(&app, "bob", "bob-secret").await;

    let response = app
        .oneshot(get("/admin/trains", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_can_create_and_list_trains() {
    let app = setup_app().await;
    let cookie = login(&app, "admin", "admin-secret").await;

    let response = app
        .clone()
        .oneshot(get("/admin/trains", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_form(
            "/admin/trains/add",
            "name=KZ-100&departure_station=Almaty&arrival_station=Astana\
             &departure_time=&arrival_time=&last_operation_station=\
             &last_operation_time=&distance_to_arrival=350&operation_desc=",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(get("/admin/trains", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("KZ-100"), "new train should be listed");
}

#[tokio::test]
async fn invalid_train_form_is_rejected_inline() {
    let app = setup_app().await;
    let cookie = login(&app, "admin", "admin-secret").await;

    let response = app
        .oneshot(post_form(
            "/admin/trains/add",
            "name=&distance_to_arrival=not-a-number",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("Enter a train name"));
    assert!(body.contains("whole number"));
}

#[tokio::test]
async fn cargo_with_dangling_train_is_rejected_inline() {
    let app = setup_app().await;
    let cookie = login(&app, "admin", "admin-secret").await;

    let response = app
        .oneshot(post_form(
            "/admin/cargos/add",
            "cargo_type=Coal&train_id=777",
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("No train with id 777"));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = setup_app().await;
    let cookie = login(&app, "admin", "admin-secret").await;

    let response = app
        .clone()
        .oneshot(get("/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap(),
        "/"
    );

    // The old cookie no longer authenticates.
    let response = app
        .oneshot(get("/admin/trains", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.starts_with("/login"));
}

#[tokio::test]
async fn tracking_is_public_and_validates_identifier() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_form(
            "/track",
            "search_type=train&identifier=abc",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_form("/track", "search_type=train&identifier=999", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Nothing found"));
}

#[tokio::test]
async fn contact_form_round_trip() {
    let app = setup_app().await;

    // Invalid submission re-renders with messages.
    let response = app
        .clone()
        .oneshot(post_form("/contact", "name=&email=bad&message=", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Valid submission lands on the confirmation page.
    let response = app
        .oneshot(post_form(
            "/contact",
            "name=Aigerim&email=aigerim%40example.com&message=Where+is+my+shipment%3F",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Thank you, Aigerim"));
}
