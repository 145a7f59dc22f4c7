use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use chrono::Utc;
use uuid::Uuid;

use crate::post::domain::{NewPost, Post, PostImage};
use crate::post::errors::PostError;
use crate::post::repository::PostRepository;

pub struct SeaOrmPostRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn insert(&self, post: NewPost) -> Result<Post, PostError> {
        // Post and images commit or roll back together
        let txn = self.db.begin().await.map_err(|e| PostError::Repository(e.to_string()))?;

        let now = Utc::now().into();
        let post_id = Uuid::new_v4();
        let am = models::post::ActiveModel {
            id: Set(post_id),
            pet_id: Set(post.pet_id),
            title: Set(post.title),
            contents: Set(post.contents),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let created = am.insert(&txn).await.map_err(|e| PostError::Repository(e.to_string()))?;

        let mut images = Vec::with_capacity(post.image_urls.len());
        for url in post.image_urls {
            let img = models::post_image::ActiveModel {
                id: Set(Uuid::new_v4()),
                post_id: Set(post_id),
                url: Set(url),
                created_at: Set(now),
            };
            let saved = img.insert(&txn).await.map_err(|e| PostError::Repository(e.to_string()))?;
            images.push(PostImage { id: saved.id, url: saved.url });
        }

        txn.commit().await.map_err(|e| PostError::Repository(e.to_string()))?;
        Ok(Post {
            id: created.id,
            pet_id: created.pet_id,
            title: created.title,
            contents: created.contents,
            images,
        })
    }
}
