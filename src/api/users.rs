//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::user::CreateUser,
};

use super::{auth::UserInfo, AppJson, AuthenticatedUser};

/// Create a new user (staff only)
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserInfo),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Staff privileges required"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    AppJson(user): AppJson<CreateUser>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    claims.require_staff()?;

    let created = state.services.users.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(UserInfo::from(&created))))
}

/// Get user details by ID (staff, or the user themselves)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserInfo),
        (status = 403, description = "Not staff and not the requested user"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<UserInfo>> {
    if !claims.is_staff && claims.user_id != id {
        return Err(AppError::Authorization(
            "Staff privileges required to view other users".to_string(),
        ));
    }

    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(UserInfo::from(&user)))
}
