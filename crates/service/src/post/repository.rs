use async_trait::async_trait;

use super::domain::{NewPost, Post};
use super::errors::PostError;

/// Repository abstraction for post persistence.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist the post and its images atomically.
    async fn insert(&self, post: NewPost) -> Result<Post, PostError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use crate::post::domain::PostImage;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockPostRepository {
        posts: Mutex<Vec<Post>>,
    }

    impl MockPostRepository {
        pub fn stored(&self) -> Vec<Post> {
            self.posts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PostRepository for MockPostRepository {
        async fn insert(&self, post: NewPost) -> Result<Post, PostError> {
            let stored = Post {
                id: Uuid::new_v4(),
                pet_id: post.pet_id,
                title: post.title,
                contents: post.contents,
                images: post
                    .image_urls
                    .into_iter()
                    .map(|url| PostImage { id: Uuid::new_v4(), url })
                    .collect(),
            };
            self.posts.lock().unwrap().push(stored.clone());
            Ok(stored)
        }
    }
}
