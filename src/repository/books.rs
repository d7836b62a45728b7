//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput, BookQuery},
};

const BOOK_COLUMNS: &str = "id, name, price, author, owner_id AS owner";

/// Map an `ordering` query value onto a whitelisted ORDER BY clause.
/// Unknown values fall back to insertion order.
fn order_clause(ordering: Option<&str>) -> &'static str {
    match ordering {
        Some("name") => "name",
        Some("-name") => "name DESC",
        Some("price") => "price",
        Some("-price") => "price DESC",
        Some("author") => "author",
        Some("-author") => "author DESC",
        Some("-id") => "id DESC",
        _ => "id",
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List books, optionally narrowed to case-insensitive substring matches
    /// of name or author
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let order = order_clause(query.ordering.as_deref());

        let books = match query.search.as_deref().filter(|s| !s.is_empty()) {
            Some(term) => {
                let pattern = format!("%{}%", term.to_lowercase());
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {} FROM books \
                     WHERE LOWER(name) LIKE $1 OR LOWER(author) LIKE $1 \
                     ORDER BY {}",
                    BOOK_COLUMNS, order
                ))
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Book>(&format!(
                    "SELECT {} FROM books ORDER BY {}",
                    BOOK_COLUMNS, order
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(books)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Insert a new book owned by the given user
    pub async fn create(&self, book: &BookInput, owner_id: i32) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (name, price, author, owner_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&book.name)
        .bind(book.price)
        .bind(&book.author)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Replace the caller-writable fields of a book. The owner column is
    /// never touched here.
    pub async fn update(&self, id: i32, book: &BookInput) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!(
            "UPDATE books SET name = $2, price = $3, author = $4 \
             WHERE id = $1 \
             RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(id)
        .bind(&book.name)
        .bind(book.price)
        .bind(&book.author)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        Ok(())
    }
}
