//! Per-(user, book) relation model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Relation record holding rate/like/bookmark state for one user and one book.
/// At most one relation exists per (user, book) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserBookRelation {
    pub user_id: i32,
    pub book_id: i32,
    pub rate: Option<i16>,
    pub like: bool,
    pub in_bookmarks: bool,
}

impl UserBookRelation {
    /// Default relation state for a pair that has never been touched
    pub fn untouched(user_id: i32, book_id: i32) -> Self {
        Self {
            user_id,
            book_id,
            rate: None,
            like: false,
            in_bookmarks: false,
        }
    }

    /// Merge a partial update into this relation. Fields absent from the
    /// update keep their current value.
    pub fn apply(&mut self, update: &UpdateRelation) {
        if let Some(rate) = update.rate {
            self.rate = Some(rate);
        }
        if let Some(like) = update.like {
            self.like = like;
        }
        if let Some(in_bookmarks) = update.in_bookmarks {
            self.in_bookmarks = in_bookmarks;
        }
    }
}

/// Partial relation update request. Any subset of the fields may be supplied.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRelation {
    #[validate(range(min = 1, max = 5, message = "Rate must be between 1 and 5"))]
    pub rate: Option<i16>,
    pub like: Option<bool>,
    pub in_bookmarks: Option<bool>,
}
