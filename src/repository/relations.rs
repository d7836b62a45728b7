//! User-book relations repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::relation::UserBookRelation,
};

// "like" needs quoting, it collides with the SQL keyword
const RELATION_COLUMNS: &str = r#"user_id, book_id, rate, "like", in_bookmarks"#;

#[derive(Clone)]
pub struct RelationsRepository {
    pool: Pool<Postgres>,
}

impl RelationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the relation for a (user, book) pair
    pub async fn get(&self, user_id: i32, book_id: i32) -> AppResult<Option<UserBookRelation>> {
        let relation = sqlx::query_as::<_, UserBookRelation>(&format!(
            "SELECT {} FROM user_book_relations WHERE user_id = $1 AND book_id = $2",
            RELATION_COLUMNS
        ))
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(relation)
    }

    /// Get the relation for a (user, book) pair, inserting a default row on
    /// first touch
    pub async fn get_or_create(&self, user_id: i32, book_id: i32) -> AppResult<UserBookRelation> {
        if let Some(relation) = self.get(user_id, book_id).await? {
            return Ok(relation);
        }

        let created = sqlx::query_as::<_, UserBookRelation>(&format!(
            "INSERT INTO user_book_relations (user_id, book_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, book_id) DO NOTHING \
             RETURNING {}",
            RELATION_COLUMNS
        ))
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        match created {
            Some(relation) => Ok(relation),
            // Lost the insert race; the row exists now
            None => self
                .get(user_id, book_id)
                .await?
                .ok_or_else(|| AppError::Internal("Relation missing after insert".to_string())),
        }
    }

    /// Persist the full field state of a relation
    pub async fn save(&self, relation: &UserBookRelation) -> AppResult<UserBookRelation> {
        let saved = sqlx::query_as::<_, UserBookRelation>(&format!(
            "UPDATE user_book_relations SET rate = $3, \"like\" = $4, in_bookmarks = $5 \
             WHERE user_id = $1 AND book_id = $2 \
             RETURNING {}",
            RELATION_COLUMNS
        ))
        .bind(relation.user_id)
        .bind(relation.book_id)
        .bind(relation.rate)
        .bind(relation.like)
        .bind(relation.in_bookmarks)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}
