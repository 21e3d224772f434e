use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_post(row: &PgRow) -> Post {
        Post {
            id: PostId(row.get("id")),
            title: row.get("title"),
            content: row.get("content"),
            published: row.get("published"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        let row = sqlx::query(
            r#"
            INSERT INTO posts (title, content, published)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, published, created_at
            "#,
        )
        .bind(&command.title)
        .bind(&command.content)
        .bind(command.published)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(Self::row_to_post(&row))
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, published, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.as_ref().map(Self::row_to_post))
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, published, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(rows.iter().map(Self::row_to_post).collect())
    }

    async fn update(&self, id: &PostId, command: UpdatePostCommand) -> Result<Post, PostError> {
        let row = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, published = $4
            WHERE id = $1
            RETURNING id, title, content, published, created_at
            "#,
        )
        .bind(id.0)
        .bind(&command.title)
        .bind(&command.content)
        .bind(command.published)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => Ok(Self::row_to_post(&row)),
            None => Err(PostError::NotFound(id.0)),
        }
    }

    async fn delete(&self, id: &PostId) -> Result<(), PostError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PostError::NotFound(id.0));
        }

        Ok(())
    }
}
