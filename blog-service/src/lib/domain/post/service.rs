use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::models::UpdatePostCommand;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;

/// Domain service implementation for post operations.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    /// Create a new post service with an injected repository.
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn create_post(&self, command: CreatePostCommand) -> Result<Post, PostError> {
        self.repository.create(command).await
    }

    async fn get_post(&self, id: &PostId) -> Result<Post, PostError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id.0))
    }

    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.repository.list_all().await
    }

    async fn update_post(
        &self,
        id: &PostId,
        command: UpdatePostCommand,
    ) -> Result<Post, PostError> {
        self.repository.update(id, command).await
    }

    async fn delete_post(&self, id: &PostId) -> Result<(), PostError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestPostRepository {}

        #[async_trait]
        impl PostRepository for TestPostRepository {
            async fn create(&self, command: CreatePostCommand) -> Result<Post, PostError>;
            async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;
            async fn list_all(&self) -> Result<Vec<Post>, PostError>;
            async fn update(&self, id: &PostId, command: UpdatePostCommand) -> Result<Post, PostError>;
            async fn delete(&self, id: &PostId) -> Result<(), PostError>;
        }
    }

    fn sample_post(id: i64) -> Post {
        Post {
            id: PostId(id),
            title: "First post".to_string(),
            content: "Hello".to_string(),
            published: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_post() {
        let mut repository = MockTestPostRepository::new();

        repository
            .expect_create()
            .withf(|command| command.title == "First post" && command.published)
            .times(1)
            .returning(|command| {
                Ok(Post {
                    id: PostId(1),
                    title: command.title,
                    content: command.content,
                    published: command.published,
                    created_at: Utc::now(),
                })
            });

        let service = PostService::new(Arc::new(repository));

        let post = service
            .create_post(CreatePostCommand {
                title: "First post".to_string(),
                content: "Hello".to_string(),
                published: true,
            })
            .await
            .unwrap();

        assert_eq!(post.id, PostId(1));
        assert_eq!(post.title, "First post");
    }

    #[tokio::test]
    async fn test_get_post_not_found() {
        let mut repository = MockTestPostRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = PostService::new(Arc::new(repository));

        let result = service.get_post(&PostId(404)).await;
        assert!(matches!(result.unwrap_err(), PostError::NotFound(404)));
    }

    #[tokio::test]
    async fn test_list_posts() {
        let mut repository = MockTestPostRepository::new();

        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![sample_post(2), sample_post(1)]));

        let service = PostService::new(Arc::new(repository));

        let posts = service.list_posts().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, PostId(2));
    }

    #[tokio::test]
    async fn test_delete_post_not_found() {
        let mut repository = MockTestPostRepository::new();

        repository
            .expect_delete()
            .times(1)
            .returning(|id| Err(PostError::NotFound(id.0)));

        let service = PostService::new(Arc::new(repository));

        let result = service.delete_post(&PostId(404)).await;
        assert!(matches!(result.unwrap_err(), PostError::NotFound(404)));
    }
}
