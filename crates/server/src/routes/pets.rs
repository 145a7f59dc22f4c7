use axum::{Json, Extension, extract::{Multipart, Path, Query, State}, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::pet::domain::{CreatePetInput, Pet, UpdatePetInput};

use crate::errors::ApiError;
use crate::routes::auth::{AuthPet, ServerState};
use crate::routes::forms::MultipartForm;

#[derive(Serialize)]
pub struct AddressOutput {
    pub code: i32,
    pub name: String,
}

/// Pet profile as returned to clients; the password hash never leaves the
/// service layer.
#[derive(Serialize)]
pub struct PetOutput {
    pub id: Uuid,
    pub login_id: String,
    pub pet_name: String,
    pub age: i32,
    pub gender: String,
    pub species: String,
    pub profile_image: Option<String>,
    pub roles: Vec<String>,
    pub address: AddressOutput,
}

impl From<Pet> for PetOutput {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            login_id: pet.login_id,
            pet_name: pet.pet_name,
            age: pet.age,
            gender: pet.gender,
            species: pet.species,
            profile_image: pet.profile_image,
            roles: pet.roles,
            address: AddressOutput { code: pet.address.code, name: pet.address.name },
        }
    }
}

#[utoipa::path(post, path = "/pets", tag = "pets", request_body = crate::openapi::RegisterPetRequest, responses((status = 201, description = "Registered"), (status = 400, description = "Bad Request"), (status = 404, description = "Address Not Found"), (status = 409, description = "Login Id Taken")))]
pub async fn create_pet(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<PetOutput>), ApiError> {
    let form = MultipartForm::read(multipart).await?;
    let input = CreatePetInput {
        login_id: form.require("loginId")?,
        password: form.require("password")?,
        pet_name: form.require("petName")?,
        age: form.require_i32("age")?,
        gender: form.require("gender")?,
        species: form.require("species")?,
        code: form.require_i32("code")?,
    };
    let created = state.pet_service().create_pet(input, form.file("profileImage")).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(get, path = "/pets/{id}", tag = "pets", params(("id" = Uuid, Path, description = "pet id")), responses((status = 200, description = "Profile"), (status = 403, description = "Not Owner"), (status = 404, description = "Not Found")))]
pub async fn get_pet(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthPet>,
    Path(id): Path<Uuid>,
) -> Result<Json<PetOutput>, ApiError> {
    let pet = state.pet_service().pet_verified_token(id, auth.id).await?;
    Ok(Json(pet.into()))
}

#[utoipa::path(patch, path = "/pets/{id}", tag = "pets", params(("id" = Uuid, Path, description = "pet id")), request_body = crate::openapi::UpdatePetRequest, responses((status = 200, description = "Updated"), (status = 403, description = "Not Owner"), (status = 404, description = "Not Found")))]
pub async fn update_pet(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthPet>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<PetOutput>, ApiError> {
    let form = MultipartForm::read(multipart).await?;
    let patch = UpdatePetInput {
        pet_name: form.text("petName"),
        age: form.opt_i32("age")?,
        gender: form.text("gender"),
        species: form.text("species"),
        code: form.opt_i32("code")?,
    };
    let updated = state
        .pet_service()
        .update_pet(id, auth.id, patch, form.file("profileImage"))
        .await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/pets/{id}", tag = "pets", params(("id" = Uuid, Path, description = "pet id")), responses((status = 204, description = "Deleted"), (status = 403, description = "Not Owner"), (status = 404, description = "Not Found")))]
pub async fn delete_pet(
    State(state): State<ServerState>,
    Extension(auth): Extension<AuthPet>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.pet_service().delete_pet(id, auth.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct CheckLoginIdQuery {
    #[serde(rename = "loginId")]
    pub login_id: String,
}

#[derive(Serialize)]
pub struct CheckLoginIdOutput {
    pub exists: bool,
}

#[utoipa::path(get, path = "/pets/check-login-id", tag = "pets", params(("loginId" = String, Query, description = "login id to probe")), responses((status = 200, description = "Existence flag")))]
pub async fn check_login_id(
    State(state): State<ServerState>,
    Query(query): Query<CheckLoginIdQuery>,
) -> Result<Json<CheckLoginIdOutput>, ApiError> {
    let exists = state.pet_service().check_login_id(&query.login_id).await?;
    Ok(Json(CheckLoginIdOutput { exists }))
}
