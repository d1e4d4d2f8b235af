#![allow(dead_code)]

use axum::body::Body;
use http_body_util::BodyExt;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::OnceLock;

pub const PASSWORD: &str = "password123";

/// Hashing is slow in debug builds; every test user shares one hash.
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| einesteine::password::hash_password(PASSWORD).unwrap())
}

pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create in-memory SQLite pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Insert a user directly and return its id.
pub async fn insert_user(db: &SqlitePool, username: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, idea_counter, registered_at) VALUES (?, ?, ?, ?, 0, ?)",
    )
    .bind(&id)
    .bind(username)
    .bind(format!("{username}@example.com"))
    .bind(password_hash())
    .bind(&now)
    .execute(db)
    .await
    .expect("Failed to create test user");

    id
}

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = test_pool().await;
        let router = einesteine::build_app(pool.clone(), false)
            .await
            .expect("Failed to build app");

        Self { router, db: pool }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    /// Create a user whose password is [`PASSWORD`] and return its id.
    pub async fn create_user(&self, username: &str) -> String {
        insert_user(&self.db, username).await
    }

    /// Log in as the given user and return the session cookie string.
    pub async fn login(&self, username: &str) -> String {
        let resp = self
            .post_form(
                "/login",
                &format!("username={}&password={}", username, PASSWORD),
                None,
            )
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        resp.headers()
            .get("set-cookie")
            .expect("Login should set a session cookie")
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    /// Create a user and log in as them; returns (user_id, cookie).
    pub async fn user_session(&self, username: &str) -> (String, String) {
        let id = self.create_user(username).await;
        let cookie = self.login(username).await;
        (id, cookie)
    }

    /// Send a GET request with an optional session cookie.
    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let req = builder.body(Body::empty()).unwrap();
        self.request(req).await
    }

    /// Send a POST form request with an optional session cookie.
    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let req = builder.body(Body::from(body.to_string())).unwrap();
        self.request(req).await
    }

    /// Send a DELETE request with an optional session cookie.
    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().uri(uri).method("DELETE");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let req = builder.body(Body::empty()).unwrap();
        self.request(req).await
    }
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(resp: Response) -> serde_json::Value {
    let body = body_string(resp).await;
    serde_json::from_str(&body).unwrap()
}

/// Assert that a response is a redirect to the given location.
pub fn assert_redirect(resp: &Response, expected_location: &str) {
    assert!(
        resp.status().is_redirection(),
        "Expected redirect, got {}",
        resp.status()
    );
    let location = resp
        .headers()
        .get("location")
        .expect("Redirect should have location header")
        .to_str()
        .unwrap();
    assert_eq!(location, expected_location);
}

/// Assert that an HX-Redirect header points to the expected location.
pub fn assert_hx_redirect(resp: &Response, expected_location: &str) {
    let hx = resp
        .headers()
        .get("hx-redirect")
        .expect("Expected HX-Redirect header")
        .to_str()
        .unwrap();
    assert_eq!(hx, expected_location);
}
