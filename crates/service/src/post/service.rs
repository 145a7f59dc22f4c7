use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::pet::repository::PetRepository;
use crate::storage::{FileStorage, UploadFile};

use super::domain::{CreatePostInput, NewPost, Post};
use super::errors::PostError;
use super::repository::PostRepository;

/// Post business service independent of web framework
pub struct PostService<P: PostRepository, R: PetRepository> {
    posts: Arc<P>,
    pets: Arc<R>,
    storage: Arc<dyn FileStorage>,
}

impl<P: PostRepository, R: PetRepository> PostService<P, R> {
    pub fn new(posts: Arc<P>, pets: Arc<R>, storage: Arc<dyn FileStorage>) -> Self {
        Self { posts, pets, storage }
    }

    /// Create a post owned by the authenticated pet.
    ///
    /// The declared pet id must equal the caller id; the check runs before
    /// any lookup or upload. Empty files in `images` are skipped.
    #[instrument(skip(self, input, images), fields(pet_id = %input.pet_id, caller_id = %caller_id))]
    pub async fn create_post(
        &self,
        input: CreatePostInput,
        images: Vec<UploadFile>,
        caller_id: Uuid,
    ) -> Result<Post, PostError> {
        if input.pet_id != caller_id {
            return Err(PostError::TokenMismatch);
        }

        models::post::validate_title(&input.title).map_err(|e| PostError::Validation(e.to_string()))?;

        self.pets
            .find_by_id(input.pet_id)
            .await
            .map_err(|e| PostError::Repository(e.to_string()))?
            .ok_or(PostError::PetNotFound)?;

        let mut image_urls = Vec::new();
        for file in &images {
            if file.is_empty() {
                continue;
            }
            let url = self
                .storage
                .upload_image(file)
                .await
                .map_err(|e| PostError::Storage(e.to_string()))?;
            image_urls.push(url);
        }

        let created = self
            .posts
            .insert(NewPost {
                pet_id: input.pet_id,
                title: input.title,
                contents: input.contents,
                image_urls,
            })
            .await?;
        info!(post_id = %created.id, pet_id = %created.pet_id, images = created.images.len(), "post_created");
        Ok(created)
    }
}
