use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::SessionUser;
use crate::store;
use crate::AppState;

const USER_KEY: &str = "user";

pub struct AuthUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthRedirect.into_response())?;

        let user: Option<SessionUser> = session.get(USER_KEY).await.ok().flatten();
        let Some(user) = user else {
            return Err(AuthRedirect.into_response());
        };

        // The account may have been deleted from another session.
        let state = AppState::from_ref(state);
        let exists = store::user_exists(&state.db, &user.id)
            .await
            .map_err(|e| AppError::from(e).into_response())?;
        if !exists {
            tracing::debug!(user_id = %user.id, "session user no longer exists");
            logout_user(&session)
                .await
                .map_err(|e| AppError::from(e).into_response())?;
            return Err(AuthRedirect.into_response());
        }

        Ok(AuthUser(user))
    }
}

pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

pub async fn login_user(session: &Session, user: SessionUser) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(USER_KEY, user).await
}

pub async fn logout_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
