use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    routing::post,
    Router,
};
use tower_sessions::Session;

use crate::auth::{logout_user, AuthUser};
use crate::error::AppError;
use crate::store;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/account/delete", post(delete_account))
}

/// Delete the logged-in user and everything they own, then end the session.
async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    if store::delete_user(&state.db, &user.id).await? {
        tracing::info!(user_id = %user.id, "account deleted");
    }
    logout_user(&session).await?;
    Ok(Redirect::to("/register"))
}
