use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::{SessionUser, TagWithCount};
use crate::store::{self, LinkChange};
use crate::AppState;

struct TagCloudItem {
    id: String,
    name: String,
    count: i64,
    href: String,
    font_size: String,
    color: String,
}

#[derive(Template)]
#[template(path = "tags/list.html")]
struct TagListTemplate {
    tags: Vec<TagCloudItem>,
    static_hash: &'static str,
    user: Option<SessionUser>,
}

#[derive(Deserialize)]
pub struct TagForm {
    name: String,
}

#[derive(Serialize)]
struct TagCreated {
    status: &'static str,
    tag_name: String,
    tag_id: Option<String>,
}

#[derive(Serialize)]
struct TagLinked {
    status: &'static str,
    tag_name: String,
    connected: bool,
}

#[derive(Serialize)]
struct TagUnlinked {
    status: &'static str,
    tag_name: String,
    disconnected: bool,
}

fn build_tag_cloud(tags: Vec<TagWithCount>) -> Vec<TagCloudItem> {
    if tags.is_empty() {
        return vec![];
    }

    // Unused tags have count 0, so scale on count + 1.
    let weight = |count: i64| ((count + 1) as f64).ln();
    let max_weight = tags.iter().map(|t| weight(t.count)).fold(f64::MIN, f64::max);
    let min_weight = tags.iter().map(|t| weight(t.count)).fold(f64::MAX, f64::min);

    // Size range: 0.75rem to 2.5rem
    let min_size: f64 = 0.75;
    let max_size: f64 = 2.5;

    // Light teal (rarely used) to deep indigo (often used)
    let min_hue: f64 = 180.0;
    let max_hue: f64 = 260.0;
    let min_sat: f64 = 40.0;
    let max_sat: f64 = 60.0;
    let max_light: f64 = 70.0;
    let min_light: f64 = 35.0;

    tags.into_iter()
        .map(|tag| {
            let ratio = if max_weight == min_weight {
                0.5
            } else {
                (weight(tag.count) - min_weight) / (max_weight - min_weight)
            };

            let font_size = min_size + ratio * (max_size - min_size);
            let hue = min_hue + ratio * (max_hue - min_hue);
            let sat = min_sat + ratio * (max_sat - min_sat);
            let light = max_light - ratio * (max_light - min_light);

            let mut query = url::form_urlencoded::Serializer::new(String::new());
            query.append_pair("tag", &tag.name);

            TagCloudItem {
                href: format!("/board?{}", query.finish()),
                id: tag.id,
                name: tag.name,
                count: tag.count,
                font_size: format!("{:.2}rem", font_size),
                color: format!("hsl({:.0}, {:.0}%, {:.0}%)", hue, sat, light),
            }
        })
        .collect()
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/{id}", delete(delete_tag))
        .route("/ideas/{id}/tags/{tag_id}", post(link_tag).delete(unlink_tag))
}

async fn list_tags(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let tags = store::tags_for_user(&state.db, &user.id).await?;

    let template = TagListTemplate {
        tags: build_tag_cloud(tags),
        static_hash: crate::STATIC_HASH,
        user: Some(user),
    };
    Ok(Html(template.render()?))
}

async fn create_tag(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Form(form): Form<TagForm>,
) -> Result<impl IntoResponse, AppError> {
    let created = match store::add_tag(&state.db, &user.id, &form.name).await? {
        Some(tag) => TagCreated {
            status: "ok",
            tag_name: tag.name,
            tag_id: Some(tag.id),
        },
        None => TagCreated {
            status: "ignored",
            tag_name: String::new(),
            tag_id: None,
        },
    };
    Ok(Json(created))
}

async fn delete_tag(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store::delete_tag(&state.db, &id, &user.id).await?;
    Ok((StatusCode::OK, ""))
}

async fn link_tag(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((idea_id, tag_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let linked = match store::link_tag(&state.db, &idea_id, &tag_id, &user.id).await? {
        Some(LinkChange { tag, changed }) => TagLinked {
            status: "ok",
            tag_name: tag.name,
            connected: changed,
        },
        None => TagLinked {
            status: "ignored",
            tag_name: String::new(),
            connected: false,
        },
    };
    Ok(Json(linked))
}

async fn unlink_tag(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path((idea_id, tag_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let unlinked = match store::unlink_tag(&state.db, &idea_id, &tag_id, &user.id).await? {
        Some(LinkChange { tag, changed }) => TagUnlinked {
            status: "ok",
            tag_name: tag.name,
            disconnected: changed,
        },
        None => TagUnlinked {
            status: "ignored",
            tag_name: String::new(),
            disconnected: false,
        },
    };
    Ok(Json(unlinked))
}
