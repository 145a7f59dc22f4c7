use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, SaltString}};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::address::Address;
use crate::address::repository::AddressRepository;
use crate::session::{refresh_token_key, SessionStore};
use crate::storage::{FileStorage, UploadFile};

use super::domain::{CreatePetInput, NewPet, Pet, UpdatePetInput};
use super::errors::PetError;
use super::repository::PetRepository;

/// Pet account business service independent of web framework
pub struct PetService<R: PetRepository, A: AddressRepository> {
    repo: Arc<R>,
    addresses: Arc<A>,
    storage: Arc<dyn FileStorage>,
    sessions: Arc<dyn SessionStore>,
}

/// Hash a clear-text password with a fresh salt.
pub(crate) fn hash_password(password: &str) -> Result<String, PetError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PetError::HashError(e.to_string()))?
        .to_string();
    Ok(hash)
}

fn verified_token(pet: &Pet, caller_id: Uuid) -> Result<(), PetError> {
    if pet.id != caller_id {
        return Err(PetError::TokenMismatch);
    }
    Ok(())
}

impl<R: PetRepository, A: AddressRepository> PetService<R, A> {
    pub fn new(
        repo: Arc<R>,
        addresses: Arc<A>,
        storage: Arc<dyn FileStorage>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self { repo, addresses, storage, sessions }
    }

    /// Register a new pet account.
    ///
    /// Rejects taken login ids, hashes the password, resolves the address by
    /// postal code, uploads the profile image when one is supplied, and
    /// persists with the default role.
    #[instrument(skip(self, input, profile_image), fields(login_id = %input.login_id))]
    pub async fn create_pet(&self, input: CreatePetInput, profile_image: Option<UploadFile>) -> Result<Pet, PetError> {
        models::pet::validate_login_id(&input.login_id).map_err(|e| PetError::Validation(e.to_string()))?;
        models::pet::validate_pet_name(&input.pet_name).map_err(|e| PetError::Validation(e.to_string()))?;
        if input.password.len() < 8 {
            return Err(PetError::Validation("password too short (>=8)".into()));
        }
        if input.age < 0 {
            return Err(PetError::Validation("age must be >= 0".into()));
        }

        if self.repo.exists_by_login_id(&input.login_id).await? {
            debug!("login id taken: {}", input.login_id);
            return Err(PetError::PetExists);
        }

        let address = self.verified_address(input.code).await?;
        let password_hash = hash_password(&input.password)?;

        let profile_url = match profile_image {
            Some(file) if !file.is_empty() => Some(
                self.storage
                    .upload_image(&file)
                    .await
                    .map_err(|e| PetError::Storage(e.to_string()))?,
            ),
            _ => None,
        };

        let created = self
            .repo
            .insert(NewPet {
                login_id: input.login_id,
                password_hash,
                pet_name: input.pet_name,
                age: input.age,
                gender: input.gender,
                species: input.species,
                profile_image: profile_url,
                roles: vec![models::pet::DEFAULT_ROLE.to_string()],
                address,
            })
            .await?;
        info!(pet_id = %created.id, login_id = %created.login_id, "pet_registered");
        Ok(created)
    }

    /// Apply a partial update to an existing pet.
    ///
    /// Only fields present in `patch` overwrite stored values. A supplied
    /// profile image replaces the previous object (the old one is deleted
    /// first); a supplied postal code re-resolves the address.
    #[instrument(skip(self, patch, profile_image), fields(pet_id = %id, caller_id = %caller_id))]
    pub async fn update_pet(
        &self,
        id: Uuid,
        caller_id: Uuid,
        patch: UpdatePetInput,
        profile_image: Option<UploadFile>,
    ) -> Result<Pet, PetError> {
        let mut found = self.find_verified_pet(id).await?;
        verified_token(&found, caller_id)?;

        if let Some(pet_name) = patch.pet_name {
            models::pet::validate_pet_name(&pet_name).map_err(|e| PetError::Validation(e.to_string()))?;
            found.pet_name = pet_name;
        }
        if let Some(age) = patch.age {
            if age < 0 {
                return Err(PetError::Validation("age must be >= 0".into()));
            }
            found.age = age;
        }
        if let Some(gender) = patch.gender {
            found.gender = gender;
        }
        if let Some(species) = patch.species {
            found.species = species;
        }
        if let Some(code) = patch.code {
            found.address = self.verified_address(code).await?;
        }

        if let Some(file) = profile_image {
            if !file.is_empty() {
                if let Some(before) = found.profile_image.take() {
                    self.storage
                        .delete_file(&before)
                        .await
                        .map_err(|e| PetError::Storage(e.to_string()))?;
                }
                let url = self
                    .storage
                    .upload_image(&file)
                    .await
                    .map_err(|e| PetError::Storage(e.to_string()))?;
                found.profile_image = Some(url);
            }
        }

        let saved = self.repo.update(found).await?;
        info!(pet_id = %saved.id, "pet_updated");
        Ok(saved)
    }

    /// Delete a pet account after the ownership check.
    ///
    /// The cached refresh token for the login id is dropped best-effort
    /// before the row is removed.
    #[instrument(skip(self), fields(pet_id = %id, caller_id = %caller_id))]
    pub async fn delete_pet(&self, id: Uuid, caller_id: Uuid) -> Result<(), PetError> {
        let found = self.find_verified_pet(id).await?;
        verified_token(&found, caller_id)?;

        if let Err(e) = self.sessions.delete(&refresh_token_key(&found.login_id)).await {
            warn!(login_id = %found.login_id, error = %e, "failed to drop cached refresh token");
        }

        self.repo.delete_by_id(id).await?;
        info!(pet_id = %id, login_id = %found.login_id, "pet_deleted");
        Ok(())
    }

    /// Registration-time uniqueness probe.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::pet::{service::PetService, repository::mock::MockPetRepository};
    /// use service::address::repository::mock::MockAddressRepository;
    /// use service::storage::{FileStorage, mock::MockFileStorage};
    /// use service::session::{SessionStore, memory::InMemorySessionStore};
    /// let svc = PetService::new(
    ///     Arc::new(MockPetRepository::default()),
    ///     Arc::new(MockAddressRepository::default()),
    ///     Arc::new(MockFileStorage::default()) as Arc<dyn FileStorage>,
    ///     Arc::new(InMemorySessionStore::default()) as Arc<dyn SessionStore>,
    /// );
    /// let taken = tokio_test::block_on(svc.check_login_id("monty")).unwrap();
    /// assert!(!taken);
    /// ```
    pub async fn check_login_id(&self, login_id: &str) -> Result<bool, PetError> {
        self.repo.exists_by_login_id(login_id).await
    }

    /// Load a pet by id.
    pub async fn find_pet(&self, id: Uuid) -> Result<Pet, PetError> {
        self.find_verified_pet(id).await
    }

    /// Load a pet by id and verify the caller owns it.
    pub async fn pet_verified_token(&self, id: Uuid, caller_id: Uuid) -> Result<Pet, PetError> {
        let found = self.find_verified_pet(id).await?;
        verified_token(&found, caller_id)?;
        Ok(found)
    }

    async fn find_verified_pet(&self, id: Uuid) -> Result<Pet, PetError> {
        self.repo.find_by_id(id).await?.ok_or(PetError::PetNotFound)
    }

    async fn verified_address(&self, code: i32) -> Result<Address, PetError> {
        self.addresses
            .find_by_code(code)
            .await
            .map_err(|e| PetError::Repository(e.to_string()))?
            .ok_or(PetError::AddressNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::repository::mock::MockAddressRepository;
    use crate::pet::repository::mock::MockPetRepository;
    use crate::session::memory::InMemorySessionStore;
    use crate::storage::mock::MockFileStorage;

    struct Harness {
        svc: PetService<MockPetRepository, MockAddressRepository>,
        storage: Arc<MockFileStorage>,
        sessions: Arc<InMemorySessionStore>,
    }

    fn harness() -> Harness {
        let storage = Arc::new(MockFileStorage::default());
        let sessions = Arc::new(InMemorySessionStore::default());
        let svc = PetService::new(
            Arc::new(MockPetRepository::default()),
            Arc::new(MockAddressRepository::with_codes(&[(4030, "Mapo-gu"), (6035, "Gangnam-gu")])),
            storage.clone() as Arc<dyn FileStorage>,
            sessions.clone() as Arc<dyn SessionStore>,
        );
        Harness { svc, storage, sessions }
    }

    fn input(login: &str) -> CreatePetInput {
        CreatePetInput {
            login_id: login.into(),
            password: "S3curePass!".into(),
            pet_name: "Monty".into(),
            age: 3,
            gender: "male".into(),
            species: "cat".into(),
            code: 4030,
        }
    }

    fn png() -> UploadFile {
        UploadFile { file_name: "profile.png".into(), content_type: "image/png".into(), bytes: vec![1, 2, 3] }
    }

    #[tokio::test]
    async fn duplicate_login_id_is_rejected() {
        let h = harness();
        h.svc.create_pet(input("monty"), None).await.unwrap();

        let err = h.svc.create_pet(input("monty"), None).await.unwrap_err();
        assert!(matches!(err, PetError::PetExists));
    }

    #[tokio::test]
    async fn unknown_address_code_is_rejected() {
        let h = harness();
        let mut req = input("monty");
        req.code = 9999;
        let err = h.svc.create_pet(req, None).await.unwrap_err();
        assert!(matches!(err, PetError::AddressNotFound));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let h = harness();
        let mut req = input("monty");
        req.password = "short".into();
        let err = h.svc.create_pet(req, None).await.unwrap_err();
        assert!(matches!(err, PetError::Validation(_)));
    }

    #[tokio::test]
    async fn create_assigns_default_role_and_uploads_image() {
        let h = harness();
        let created = h.svc.create_pet(input("monty"), Some(png())).await.unwrap();

        assert_eq!(created.roles, vec![models::pet::DEFAULT_ROLE.to_string()]);
        assert_eq!(created.address.code, 4030);
        assert_ne!(created.password_hash, "S3curePass!");
        let uploads = h.storage.uploaded();
        assert_eq!(uploads.len(), 1);
        assert_eq!(created.profile_image.as_deref(), Some(uploads[0].as_str()));
    }

    #[tokio::test]
    async fn empty_upload_is_ignored() {
        let h = harness();
        let empty = UploadFile { file_name: "e.png".into(), content_type: "image/png".into(), bytes: vec![] };
        let created = h.svc.create_pet(input("monty"), Some(empty)).await.unwrap();
        assert!(created.profile_image.is_none());
        assert!(h.storage.uploaded().is_empty());
    }

    #[tokio::test]
    async fn update_rejects_foreign_caller() {
        let h = harness();
        let created = h.svc.create_pet(input("monty"), None).await.unwrap();

        let err = h
            .svc
            .update_pet(created.id, Uuid::new_v4(), UpdatePetInput::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PetError::TokenMismatch));
    }

    #[tokio::test]
    async fn update_missing_pet_fails() {
        let h = harness();
        let id = Uuid::new_v4();
        let err = h.svc.update_pet(id, id, UpdatePetInput::default(), None).await.unwrap_err();
        assert!(matches!(err, PetError::PetNotFound));
    }

    #[tokio::test]
    async fn partial_update_keeps_omitted_fields() {
        let h = harness();
        let created = h.svc.create_pet(input("monty"), Some(png())).await.unwrap();

        let patch = UpdatePetInput { age: Some(4), ..UpdatePetInput::default() };
        let updated = h.svc.update_pet(created.id, created.id, patch, None).await.unwrap();

        assert_eq!(updated.age, 4);
        assert_eq!(updated.pet_name, created.pet_name);
        assert_eq!(updated.gender, created.gender);
        assert_eq!(updated.species, created.species);
        assert_eq!(updated.address, created.address);
        assert_eq!(updated.profile_image, created.profile_image);
        assert_eq!(updated.password_hash, created.password_hash);
    }

    #[tokio::test]
    async fn update_re_resolves_address_by_code() {
        let h = harness();
        let created = h.svc.create_pet(input("monty"), None).await.unwrap();

        let patch = UpdatePetInput { code: Some(6035), ..UpdatePetInput::default() };
        let updated = h.svc.update_pet(created.id, created.id, patch, None).await.unwrap();
        assert_eq!(updated.address.code, 6035);
        assert_eq!(updated.address.name, "Gangnam-gu");

        let bad = UpdatePetInput { code: Some(9999), ..UpdatePetInput::default() };
        let err = h.svc.update_pet(created.id, created.id, bad, None).await.unwrap_err();
        assert!(matches!(err, PetError::AddressNotFound));
    }

    #[tokio::test]
    async fn update_replaces_profile_image() {
        let h = harness();
        let created = h.svc.create_pet(input("monty"), Some(png())).await.unwrap();
        let before = created.profile_image.clone().unwrap();

        let updated = h
            .svc
            .update_pet(created.id, created.id, UpdatePetInput::default(), Some(png()))
            .await
            .unwrap();

        assert_eq!(h.storage.deleted(), vec![before.clone()]);
        assert_eq!(h.storage.uploaded().len(), 2);
        assert_ne!(updated.profile_image.as_deref(), Some(before.as_str()));

        // No file supplied: the stored URL is untouched
        let again = h
            .svc
            .update_pet(created.id, created.id, UpdatePetInput::default(), None)
            .await
            .unwrap();
        assert_eq!(again.profile_image, updated.profile_image);
        assert_eq!(h.storage.uploaded().len(), 2);
    }

    #[tokio::test]
    async fn delete_rejects_foreign_caller() {
        let h = harness();
        let created = h.svc.create_pet(input("monty"), None).await.unwrap();

        let err = h.svc.delete_pet(created.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, PetError::TokenMismatch));
        assert!(h.svc.find_pet(created.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_missing_pet_fails_before_side_effects() {
        let h = harness();
        h.sessions.set(refresh_token_key("monty"), "refresh-1".into()).await.unwrap();

        let id = Uuid::new_v4();
        let err = h.svc.delete_pet(id, id).await.unwrap_err();
        assert!(matches!(err, PetError::PetNotFound));
        // The session entry is untouched
        assert!(h.sessions.get(&refresh_token_key("monty")).await.is_some());
    }

    #[tokio::test]
    async fn delete_drops_cached_refresh_token() {
        let h = harness();
        let created = h.svc.create_pet(input("monty"), None).await.unwrap();
        h.sessions.set(refresh_token_key("monty"), "refresh-1".into()).await.unwrap();

        h.svc.delete_pet(created.id, created.id).await.unwrap();

        assert!(h.sessions.get(&refresh_token_key("monty")).await.is_none());
        let err = h.svc.find_pet(created.id).await.unwrap_err();
        assert!(matches!(err, PetError::PetNotFound));
    }

    #[tokio::test]
    async fn check_login_id_reports_existence() {
        let h = harness();
        assert!(!h.svc.check_login_id("monty").await.unwrap());
        h.svc.create_pet(input("monty"), None).await.unwrap();
        assert!(h.svc.check_login_id("monty").await.unwrap());
    }

    #[tokio::test]
    async fn pet_verified_token_checks_ownership() {
        let h = harness();
        let created = h.svc.create_pet(input("monty"), None).await.unwrap();

        let ok = h.svc.pet_verified_token(created.id, created.id).await.unwrap();
        assert_eq!(ok.id, created.id);

        let err = h.svc.pet_verified_token(created.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, PetError::TokenMismatch));
    }
}
