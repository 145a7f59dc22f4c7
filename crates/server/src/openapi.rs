use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub login_id: String, pub password: String }

/// Multipart form; `profileImage` is an optional file part.
#[derive(utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct RegisterPetRequest {
    pub login_id: String,
    pub password: String,
    pub pet_name: String,
    pub age: i32,
    pub gender: String,
    pub species: String,
    pub code: i32,
    #[schema(value_type = Option<String>, format = Binary)]
    pub profile_image: Option<String>,
}

/// Multipart form; every part is optional and omitted parts leave the stored
/// value untouched.
#[derive(utoipa::ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    pub pet_name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub species: Option<String>,
    pub code: Option<i32>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub profile_image: Option<String>,
}

/// Multipart form; `images` is a repeatable file part.
#[derive(utoipa::ToSchema)]
pub struct CreatePostRequest {
    /// Declared owning pet id; must match the bearer token identity.
    pub id: String,
    pub title: String,
    pub contents: String,
    #[schema(value_type = Option<Vec<String>>, format = Binary)]
    pub images: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::pets::create_pet,
        crate::routes::pets::get_pet,
        crate::routes::pets::update_pet,
        crate::routes::pets::delete_pet,
        crate::routes::pets::check_login_id,
        crate::routes::posts::create_post,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            RegisterPetRequest,
            UpdatePetRequest,
            CreatePostRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "pets"),
        (name = "posts")
    )
)]
pub struct ApiDoc;
