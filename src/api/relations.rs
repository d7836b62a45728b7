//! User-book relation endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::relation::{UpdateRelation, UserBookRelation},
};

use super::{AppJson, AuthenticatedUser};

/// Get the authenticated user's relation to a book
#[utoipa::path(
    get,
    path = "/relations/{book_id}",
    tag = "relations",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Relation state", body = UserBookRelation),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_relation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<Json<UserBookRelation>> {
    let relation = state
        .services
        .relations
        .get_relation(claims.user_id, book_id)
        .await?;

    Ok(Json(relation))
}

/// Partially update the authenticated user's relation to a book.
/// Fields absent from the body keep their current value.
#[utoipa::path(
    patch,
    path = "/relations/{book_id}",
    tag = "relations",
    security(("bearer_auth" = [])),
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    request_body = UpdateRelation,
    responses(
        (status = 200, description = "Resulting relation state", body = UserBookRelation),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_relation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
    AppJson(update): AppJson<UpdateRelation>,
) -> AppResult<Json<UserBookRelation>> {
    let relation = state
        .services
        .relations
        .update_relation(claims.user_id, book_id, update)
        .await?;

    Ok(Json(relation))
}
