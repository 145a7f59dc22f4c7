use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostImage {
    pub id: Uuid,
    pub url: String,
}

/// Domain post (business view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub title: String,
    pub contents: String,
    pub images: Vec<PostImage>,
}

/// Creation input; `pet_id` is the declared owner and must match the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostInput {
    pub pet_id: Uuid,
    pub title: String,
    pub contents: String,
}

/// Insert payload handed to the repository; post and image ids are assigned
/// on insert, inside one transaction.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub pet_id: Uuid,
    pub title: String,
    pub contents: String,
    pub image_urls: Vec<String>,
}
