use axum::{Json, Extension, extract::{Multipart, State}, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use service::post::domain::{CreatePostInput, Post};

use crate::errors::ApiError;
use crate::routes::auth::{AuthPet, ServerState};
use crate::routes::forms::MultipartForm;

#[derive(Serialize)]
pub struct PostImageOutput {
    pub id: Uuid,
    pub url: String,
}

#[derive(Serialize)]
pub struct PostOutput {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub title: String,
    pub contents: String,
    pub images: Vec<PostImageOutput>,
}

impl From<Post> for PostOutput {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            pet_id: post.pet_id,
            title: post.title,
            contents: post.contents,
            images: post
                .images
                .into_iter()
                .map(|i| PostImageOutput { id: i.id, url: i.url })
                .collect(),
        }
    }
}

#[utoipa::path(post, path = "/posts", tag = "posts", request_body = crate::openapi::CreatePostRequest, responses((status = 201, description = "Created"), (status = 400, description = "Bad Request"), (status = 403, description = "Not Owner"), (status = 404, description = "Pet Not Found")))]
pub async fn create_post(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthPet>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PostOutput>), ApiError> {
    let form = MultipartForm::read(multipart).await?;
    let pet_id = form
        .require("id")?
        .parse::<Uuid>()
        .map_err(|_| ApiError::BadRequest("invalid pet id".into()))?;
    let input = CreatePostInput {
        pet_id,
        title: form.require("title")?,
        contents: form.require("contents")?,
    };
    let created = state
        .post_service()
        .create_post(input, form.file_list("images"), auth.id)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
