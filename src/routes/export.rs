use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::store;
use crate::AppState;

#[derive(Serialize)]
struct ExportPost {
    body: String,
    created_at: String,
}

#[derive(Serialize)]
struct ExportIdea {
    id: String,
    name: String,
    number: i64,
    complete: bool,
    created_at: String,
    tags: Vec<String>,
    posts: Vec<ExportPost>,
}

#[derive(Serialize)]
struct ExportData {
    exported_at: String,
    username: String,
    ideas: Vec<ExportIdea>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export_data))
}

async fn export_data(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ideas = store::ideas_for_user(&state.db, &user.id).await?;

    let mut export_ideas = Vec::with_capacity(ideas.len());
    for idea in ideas {
        let tags = store::tags_for_idea(&state.db, &idea.id).await?;
        let posts = store::posts_for_idea(&state.db, &idea.id).await?;

        export_ideas.push(ExportIdea {
            id: idea.id,
            name: idea.name,
            number: idea.number,
            complete: idea.complete,
            created_at: idea.created_at,
            tags: tags.into_iter().map(|t| t.name).collect(),
            posts: posts
                .into_iter()
                .map(|p| ExportPost {
                    body: p.body,
                    created_at: p.created_at,
                })
                .collect(),
        });
    }

    let export = ExportData {
        exported_at: chrono::Utc::now().to_rfc3339(),
        username: user.username,
        ideas: export_ideas,
    };

    let filename = format!("einesteine-export-{}.json", chrono::Local::now().format("%Y-%m-%d"));
    let content_disposition = format!("attachment; filename=\"{}\"", filename);

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(value) = HeaderValue::from_str(&content_disposition) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((headers, Json(export)))
}
