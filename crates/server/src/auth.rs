//! Registration and login endpoints.

use api_types::auth::{AuthResponse, LoginUser, RegisterUser};
use axum::{Json, extract::State, http::StatusCode};

use engine::{AuthOutcome, LoginUserCmd, RegisterUserCmd};

use crate::{ServerError, server::ServerState};

fn response(outcome: AuthOutcome) -> AuthResponse {
    AuthResponse {
        user_id: outcome.user_id,
        token: outcome.token,
        email: outcome.email,
        first_name: outcome.first_name,
        last_name: outcome.last_name,
    }
}

pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterUser>,
) -> Result<(StatusCode, Json<AuthResponse>), ServerError> {
    let mut cmd = RegisterUserCmd::new(payload.email, payload.password);
    cmd.first_name = payload.first_name;
    cmd.last_name = payload.last_name;

    let outcome = state.engine.register_user(cmd).await?;
    Ok((StatusCode::CREATED, Json(response(outcome))))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginUser>,
) -> Result<Json<AuthResponse>, ServerError> {
    let outcome = state
        .engine
        .login_user(LoginUserCmd::new(payload.email, payload.password))
        .await?;
    Ok(Json(response(outcome)))
}
