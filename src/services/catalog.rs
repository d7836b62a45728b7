//! Catalog service: book search and owner-gated mutations

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookInput, BookQuery},
        user::UserClaims,
    },
    repository::Repository,
};

/// Owner-or-staff permission predicate for book mutations.
///
/// The acting identity must already be authenticated; this only decides
/// whether that identity may modify the given book.
pub fn can_edit_book(user_id: i32, is_staff: bool, book: &Book) -> bool {
    is_staff || book.owner == Some(user_id)
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books matching the query
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }

    /// Get a single book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book owned by the acting user
    pub async fn create_book(&self, claims: &UserClaims, input: BookInput) -> AppResult<Book> {
        validate_input(&input)?;
        self.repository.books.create(&input, claims.user_id).await
    }

    /// Replace a book's caller-writable fields; only its owner or a staff
    /// user may do so
    pub async fn update_book(&self, claims: &UserClaims, id: i32, input: BookInput) -> AppResult<Book> {
        let book = self.repository.books.get_by_id(id).await?;
        if !can_edit_book(claims.user_id, claims.is_staff, &book) {
            return Err(AppError::Authorization(
                "Only the owner or staff may edit this book".to_string(),
            ));
        }

        validate_input(&input)?;
        self.repository.books.update(id, &input).await
    }

    /// Delete a book; only its owner or a staff user may do so
    pub async fn delete_book(&self, claims: &UserClaims, id: i32) -> AppResult<()> {
        let book = self.repository.books.get_by_id(id).await?;
        if !can_edit_book(claims.user_id, claims.is_staff, &book) {
            return Err(AppError::Authorization(
                "Only the owner or staff may delete this book".to_string(),
            ));
        }

        self.repository.books.delete(id).await
    }
}

fn validate_input(input: &BookInput) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if input.price.is_sign_negative() {
        return Err(AppError::Validation("Price must not be negative".to_string()));
    }

    Ok(())
}
