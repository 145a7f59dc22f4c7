use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewPet, Pet};
use super::errors::PetError;

/// Repository abstraction for pet persistence.
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, PetError>;
    async fn find_by_login_id(&self, login_id: &str) -> Result<Option<Pet>, PetError>;
    async fn exists_by_login_id(&self, login_id: &str) -> Result<bool, PetError>;

    async fn insert(&self, pet: NewPet) -> Result<Pet, PetError>;
    /// Overwrite the stored pet with the given merged state.
    async fn update(&self, pet: Pet) -> Result<Pet, PetError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), PetError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPetRepository {
        pets: Mutex<HashMap<Uuid, Pet>>, // key: pet id
    }

    #[async_trait]
    impl PetRepository for MockPetRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, PetError> {
            let pets = self.pets.lock().unwrap();
            Ok(pets.get(&id).cloned())
        }

        async fn find_by_login_id(&self, login_id: &str) -> Result<Option<Pet>, PetError> {
            let pets = self.pets.lock().unwrap();
            Ok(pets.values().find(|p| p.login_id == login_id).cloned())
        }

        async fn exists_by_login_id(&self, login_id: &str) -> Result<bool, PetError> {
            let pets = self.pets.lock().unwrap();
            Ok(pets.values().any(|p| p.login_id == login_id))
        }

        async fn insert(&self, pet: NewPet) -> Result<Pet, PetError> {
            let mut pets = self.pets.lock().unwrap();
            if pets.values().any(|p| p.login_id == pet.login_id) {
                return Err(PetError::PetExists);
            }
            let stored = Pet {
                id: Uuid::new_v4(),
                login_id: pet.login_id,
                password_hash: pet.password_hash,
                pet_name: pet.pet_name,
                age: pet.age,
                gender: pet.gender,
                species: pet.species,
                profile_image: pet.profile_image,
                roles: pet.roles,
                address: pet.address,
            };
            pets.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn update(&self, pet: Pet) -> Result<Pet, PetError> {
            let mut pets = self.pets.lock().unwrap();
            if !pets.contains_key(&pet.id) {
                return Err(PetError::PetNotFound);
            }
            pets.insert(pet.id, pet.clone());
            Ok(pet)
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<(), PetError> {
            let mut pets = self.pets.lock().unwrap();
            pets.remove(&id);
            Ok(())
        }
    }
}
