use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::collections::HashMap;
use tower_sessions::Session;

use crate::auth::{login_user, logout_user};
use crate::error::AppError;
use crate::models::SessionUser;
use crate::password::MIN_PASSWORD_LEN;
use crate::store::{self, NewUser};
use crate::AppState;

const MAX_USERNAME_LEN: usize = 64;
const MAX_EMAIL_LEN: usize = 120;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: Option<String>,
    username: String,
    next: String,
    static_hash: &'static str,
    user: Option<SessionUser>,
}

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    errors: HashMap<String, String>,
    username: String,
    email: String,
    static_hash: &'static str,
    user: Option<SessionUser>,
}

#[derive(Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
    #[serde(default)]
    next: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    username: String,
    email: String,
    password: String,
    password2: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page))
        .route("/login", post(login_submit))
        .route("/register", get(register_page))
        .route("/register", post(register_submit))
        .route("/logout", post(logout))
}

/// Only same-site paths are followed after login.
fn safe_next(next: &str) -> &str {
    let relative = next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && url::Url::parse(next).is_err();
    if relative { next } else { "/board" }
}

fn validate_register_form(form: &RegisterForm) -> HashMap<String, String> {
    let mut errors = HashMap::new();

    let username = form.username.trim();
    if username.is_empty() {
        errors.insert("username".to_string(), "Username is required".to_string());
    } else if username.chars().count() > MAX_USERNAME_LEN {
        errors.insert("username".to_string(), "Username must be under 64 characters".to_string());
    }

    let email = form.email.trim();
    if !email.contains('@') {
        errors.insert("email".to_string(), "Enter a valid email address".to_string());
    } else if email.chars().count() > MAX_EMAIL_LEN {
        errors.insert("email".to_string(), "Email must be under 120 characters".to_string());
    }

    if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            "password".to_string(),
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    } else if form.password != form.password2 {
        errors.insert("password2".to_string(), "Passwords do not match".to_string());
    }

    errors
}

async fn login_page(Query(query): Query<NextQuery>) -> Result<impl IntoResponse, AppError> {
    let template = LoginTemplate {
        error: None,
        username: String::new(),
        next: query.next.unwrap_or_default(),
        static_hash: crate::STATIC_HASH,
        user: None,
    };
    Ok(Html(template.render()?))
}

async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let user = store::authenticate(&state.db, form.username.trim(), &form.password).await?;

    match user {
        Some(user) => {
            tracing::info!(user_id = %user.id, "user logged in");
            login_user(&session, SessionUser::from(&user)).await?;
            Ok(Redirect::to(safe_next(&form.next)).into_response())
        }
        None => {
            let template = LoginTemplate {
                error: Some("Invalid username or password".to_string()),
                username: form.username,
                next: form.next,
                static_hash: crate::STATIC_HASH,
                user: None,
            };
            Ok(Html(template.render()?).into_response())
        }
    }
}

async fn register_page() -> Result<impl IntoResponse, AppError> {
    let template = RegisterTemplate {
        errors: HashMap::new(),
        username: String::new(),
        email: String::new(),
        static_hash: crate::STATIC_HASH,
        user: None,
    };
    Ok(Html(template.render()?))
}

async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<impl IntoResponse, AppError> {
    let mut errors = validate_register_form(&form);
    let username = form.username.trim();
    let email = form.email.trim();

    if errors.is_empty() {
        let (username_taken, email_taken) = store::taken(&state.db, username, email).await?;
        if username_taken {
            errors.insert("username".to_string(), "Please use a different username".to_string());
        }
        if email_taken {
            errors.insert("email".to_string(), "Please use a different email address".to_string());
        }
    }

    if !errors.is_empty() {
        let template = RegisterTemplate {
            errors,
            username: username.to_string(),
            email: email.to_string(),
            static_hash: crate::STATIC_HASH,
            user: None,
        };
        return Ok(Html(template.render()?).into_response());
    }

    let user = store::create_user(
        &state.db,
        NewUser {
            username,
            email,
            password: &form.password,
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok(Redirect::to("/login").into_response())
}

async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    logout_user(&session).await?;
    Ok(Redirect::to("/login"))
}
