use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::{delete, get},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::filter::{self, FilterParams, IdeaFilter};
use crate::models::{Idea, IdeaSummary, SessionUser, Stage, TagWithCount};
use crate::store::{self, IdeaUpdate, UpdateOutcome};
use crate::AppState;

#[derive(Template)]
#[template(path = "ideas/board.html")]
struct BoardTemplate {
    ideas: Vec<IdeaSummary>,
    tags: Vec<FilterLink>,
    stages: Vec<FilterLink>,
    all_tags_href: String,
    all_stages_href: String,
    tag_filtered: bool,
    stage_filtered: bool,
    page: u32,
    prev_href: Option<String>,
    next_href: Option<String>,
    static_hash: &'static str,
    user: Option<SessionUser>,
}

#[derive(Template)]
#[template(path = "ideas/editor.html")]
struct EditorTemplate {
    idea: Idea,
    stage: String,
    posts: Vec<PostView>,
    tags: Vec<TagOption>,
    static_hash: &'static str,
    user: Option<SessionUser>,
}

struct FilterLink {
    label: String,
    href: String,
    active: bool,
}

struct PostView {
    id: String,
    body: String,
    created_time: String,
}

struct TagOption {
    id: String,
    name: String,
    linked: bool,
}

#[derive(Deserialize)]
pub struct IdeaForm {
    #[serde(default)]
    name: String,
    post: Option<String>,
    post_time: Option<String>,
    complete: Option<String>,
}

/// Reply to an editor save.
#[derive(Serialize)]
struct PostAck {
    status: &'static str,
    post_id: Option<String>,
    created_time: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/board", get(board))
        .route("/api/ideas", get(list_ideas_json))
        .route("/ideas/new", get(new_idea))
        .route("/ideas/{id}", get(edit_idea).post(update_idea).delete(delete_idea))
        .route("/posts/{id}", delete(delete_post))
}

/// Checkbox and select values for the completion flag. Anything else
/// leaves the flag as it is.
fn parse_complete(value: Option<&str>) -> Option<bool> {
    match value?.trim() {
        "true" | "1" | "on" => Some(true),
        "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn board_href(tag: Option<&str>, stage: Option<Stage>, page: u32) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("tag", tag.unwrap_or("none"));
    query.append_pair("stage", stage.map(|s| s.as_param()).unwrap_or("none"));
    query.append_pair("page", &page.to_string());
    format!("/board?{}", query.finish())
}

fn tag_links(tags: &[TagWithCount], filter: &IdeaFilter) -> Vec<FilterLink> {
    let mut links: Vec<FilterLink> = Vec::new();
    for tag in tags {
        // Duplicate names filter identically; show each name once.
        if links.last().is_some_and(|l| l.label == tag.name) {
            continue;
        }
        links.push(FilterLink {
            label: tag.name.clone(),
            href: board_href(Some(&tag.name), filter.stage, 1),
            active: filter.tag.as_deref() == Some(tag.name.as_str()),
        });
    }
    links
}

fn stage_links(filter: &IdeaFilter) -> Vec<FilterLink> {
    Stage::ALL
        .into_iter()
        .map(|stage| FilterLink {
            label: stage.label().to_string(),
            href: board_href(filter.tag.as_deref(), Some(stage), 1),
            active: filter.stage == Some(stage),
        })
        .collect()
}

async fn board(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let params: FilterParams = pairs.into_iter().collect();
    let filter = params.filter();
    let page = filter::list_ideas(&state.db, &user.id, &filter, params.page()).await?;
    let tags = store::tags_for_user(&state.db, &user.id).await?;

    let tag = filter.tag.as_deref();
    let prev_href = (page.page > 1).then(|| board_href(tag, filter.stage, page.page - 1));
    let next_href = page.has_next.then(|| board_href(tag, filter.stage, page.page + 1));

    let template = BoardTemplate {
        tags: tag_links(&tags, &filter),
        stages: stage_links(&filter),
        all_tags_href: board_href(None, filter.stage, 1),
        all_stages_href: board_href(tag, None, 1),
        tag_filtered: filter.tag.is_some(),
        stage_filtered: filter.stage.is_some(),
        ideas: page.ideas,
        page: page.page,
        prev_href,
        next_href,
        static_hash: crate::STATIC_HASH,
        user: Some(user),
    };
    Ok(Html(template.render()?))
}

async fn list_ideas_json(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let params: FilterParams = pairs.into_iter().collect();
    let page = filter::list_ideas(&state.db, &user.id, &params.filter(), params.page()).await?;
    Ok(Json(page.ideas))
}

async fn new_idea(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let idea = store::create_idea(&state.db, &user.id).await?;
    tracing::debug!(idea_id = %idea.id, number = idea.number, "idea created");
    Ok(Redirect::to(&format!("/ideas/{}", idea.id)))
}

async fn edit_idea(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let Some(idea) = store::get_idea(&state.db, &id, &user.id).await? else {
        return Ok(Redirect::to("/board").into_response());
    };

    let posts = store::posts_for_idea(&state.db, &idea.id).await?;
    let linked = store::tags_for_idea(&state.db, &idea.id).await?;
    let all_tags = store::tags_for_user(&state.db, &user.id).await?;

    let tags = all_tags
        .into_iter()
        .map(|tag| TagOption {
            linked: linked.iter().any(|l| l.id == tag.id),
            id: tag.id,
            name: tag.name,
        })
        .collect();

    let template = EditorTemplate {
        stage: Stage::of(idea.complete, posts.len() as i64).label().to_string(),
        posts: posts
            .into_iter()
            .map(|post| PostView {
                created_time: post.created_time(),
                id: post.id,
                body: post.body,
            })
            .collect(),
        idea,
        tags,
        static_hash: crate::STATIC_HASH,
        user: Some(user),
    };
    Ok(Html(template.render()?).into_response())
}

async fn update_idea(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Form(form): Form<IdeaForm>,
) -> Result<impl IntoResponse, AppError> {
    let update = IdeaUpdate {
        name: &form.name,
        post_text: form.post.as_deref(),
        post_time: form.post_time.as_deref(),
        complete: parse_complete(form.complete.as_deref()),
    };

    let ack = match store::update_idea(&state.db, &id, &user.id, update).await? {
        UpdateOutcome::Ignored => PostAck {
            status: "ignored",
            post_id: None,
            created_time: None,
        },
        UpdateOutcome::Updated { post } => PostAck {
            status: "ok",
            created_time: post.as_ref().map(|p| p.created_time()),
            post_id: post.map(|p| p.id),
        },
    };
    Ok(Json(ack))
}

async fn delete_idea(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store::delete_idea(&state.db, &id, &user.id).await?;
    Ok(([("HX-Redirect", "/board")], ""))
}

async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store::delete_post(&state.db, &id, &user.id).await?;
    // htmx expects empty response to remove element
    Ok((StatusCode::OK, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_values() {
        assert_eq!(parse_complete(Some("true")), Some(true));
        assert_eq!(parse_complete(Some("on")), Some(true));
        assert_eq!(parse_complete(Some("false")), Some(false));
        assert_eq!(parse_complete(Some("")), None);
        assert_eq!(parse_complete(Some("maybe")), None);
        assert_eq!(parse_complete(None), None);
    }

    #[test]
    fn board_links_encode_tag_names() {
        assert_eq!(
            board_href(Some("side projects"), Some(Stage::Done), 2),
            "/board?tag=side+projects&stage=3&page=2"
        );
        assert_eq!(board_href(None, None, 1), "/board?tag=none&stage=none&page=1");
    }
}
