//! User-book relation service: fetch-or-create and partial merge

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::relation::{UpdateRelation, UserBookRelation},
    repository::Repository,
};

#[derive(Clone)]
pub struct RelationsService {
    repository: Repository,
}

impl RelationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Apply a partial update to the (user, book) relation, creating the
    /// record on first touch. Fields absent from the update keep their
    /// current value.
    pub async fn update_relation(
        &self,
        user_id: i32,
        book_id: i32,
        update: UpdateRelation,
    ) -> AppResult<UserBookRelation> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // 404 for unknown books, before any relation row is created
        self.repository.books.get_by_id(book_id).await?;

        let mut relation = self
            .repository
            .relations
            .get_or_create(user_id, book_id)
            .await?;
        relation.apply(&update);

        self.repository.relations.save(&relation).await
    }

    /// Current relation state for a (user, book) pair; default state if the
    /// pair has never been touched
    pub async fn get_relation(&self, user_id: i32, book_id: i32) -> AppResult<UserBookRelation> {
        self.repository.books.get_by_id(book_id).await?;

        Ok(self
            .repository
            .relations
            .get(user_id, book_id)
            .await?
            .unwrap_or_else(|| UserBookRelation::untouched(user_id, book_id)))
    }
}
