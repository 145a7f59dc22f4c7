use sea_orm::{DatabaseConnection, EntityTrait, ActiveModelTrait, Set};
use chrono::Utc;
use uuid::Uuid;

use crate::address::Address;
use crate::pet::domain::{NewPet, Pet};
use crate::pet::errors::PetError;
use crate::pet::repository::PetRepository;

pub struct SeaOrmPetRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPetRepository {
    async fn load_address(&self, address_id: Uuid) -> Result<Address, PetError> {
        let addr = models::address::Entity::find_by_id(address_id)
            .one(&self.db)
            .await
            .map_err(|e| PetError::Repository(e.to_string()))?
            .ok_or_else(|| PetError::Repository(format!("address row missing: {address_id}")))?;
        Ok(Address { id: addr.id, code: addr.code, name: addr.name })
    }

    async fn to_domain(&self, m: models::pet::Model) -> Result<Pet, PetError> {
        let address = self.load_address(m.address_id).await?;
        Ok(Pet {
            id: m.id,
            login_id: m.login_id,
            password_hash: m.password,
            pet_name: m.pet_name,
            age: m.age,
            gender: m.gender,
            species: m.species,
            profile_image: m.profile_image,
            roles: m.roles.split(',').filter(|r| !r.is_empty()).map(str::to_string).collect(),
            address,
        })
    }
}

#[async_trait::async_trait]
impl PetRepository for SeaOrmPetRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, PetError> {
        let res = models::pet::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PetError::Repository(e.to_string()))?;
        match res {
            Some(m) => Ok(Some(self.to_domain(m).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_login_id(&self, login_id: &str) -> Result<Option<Pet>, PetError> {
        let res = models::pet::find_by_login_id(&self.db, login_id)
            .await
            .map_err(|e| PetError::Repository(e.to_string()))?;
        match res {
            Some(m) => Ok(Some(self.to_domain(m).await?)),
            None => Ok(None),
        }
    }

    async fn exists_by_login_id(&self, login_id: &str) -> Result<bool, PetError> {
        models::pet::exists_by_login_id(&self.db, login_id)
            .await
            .map_err(|e| PetError::Repository(e.to_string()))
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet, PetError> {
        let created = models::pet::create(
            &self.db,
            &pet.login_id,
            &pet.password_hash,
            &pet.pet_name,
            pet.age,
            &pet.gender,
            &pet.species,
            pet.profile_image,
            &pet.roles.join(","),
            pet.address.id,
        )
        .await
        .map_err(|e| match e {
            models::errors::ModelError::Validation(msg) => PetError::Validation(msg),
            models::errors::ModelError::Db(msg) => PetError::Repository(msg),
        })?;
        self.to_domain(created).await
    }

    async fn update(&self, pet: Pet) -> Result<Pet, PetError> {
        let mut am: models::pet::ActiveModel = models::pet::Entity::find_by_id(pet.id)
            .one(&self.db)
            .await
            .map_err(|e| PetError::Repository(e.to_string()))?
            .ok_or(PetError::PetNotFound)?
            .into();
        am.pet_name = Set(pet.pet_name);
        am.age = Set(pet.age);
        am.gender = Set(pet.gender);
        am.species = Set(pet.species);
        am.profile_image = Set(pet.profile_image);
        am.roles = Set(pet.roles.join(","));
        am.address_id = Set(pet.address.id);
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await.map_err(|e| PetError::Repository(e.to_string()))?;
        self.to_domain(updated).await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), PetError> {
        models::pet::hard_delete(&self.db, id)
            .await
            .map_err(|e| PetError::Repository(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn pet_repo_round_trip() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = get_db().await?;
        let repo = SeaOrmPetRepository { db: db.clone() };

        let code = (Uuid::new_v4().as_u128() % 1_000_000_000) as i32;
        let addr_row = models::address::create(&db, code, "Mapo-gu").await?;
        let address = Address { id: addr_row.id, code: addr_row.code, name: addr_row.name };

        let login_id = format!("repo_{}", Uuid::new_v4());
        let created = repo
            .insert(NewPet {
                login_id: login_id.clone(),
                password_hash: "argon2-hash".into(),
                pet_name: "Monty".into(),
                age: 3,
                gender: "male".into(),
                species: "cat".into(),
                profile_image: None,
                roles: vec!["ROLE_USER".into()],
                address: address.clone(),
            })
            .await?;
        assert_eq!(created.address.code, code);
        assert_eq!(created.roles, vec!["ROLE_USER".to_string()]);

        assert!(repo.exists_by_login_id(&login_id).await?);
        let found = repo.find_by_id(created.id).await?.unwrap();
        assert_eq!(found.login_id, login_id);

        let mut merged = found;
        merged.age = 4;
        merged.profile_image = Some("/uploads/p.png".into());
        let updated = repo.update(merged).await?;
        assert_eq!(updated.age, 4);
        assert_eq!(updated.profile_image.as_deref(), Some("/uploads/p.png"));

        repo.delete_by_id(created.id).await?;
        assert!(repo.find_by_id(created.id).await?.is_none());

        models::address::Entity::delete_by_id(addr_row.id).exec(&db).await?;
        Ok(())
    }
}
