use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter, ColumnTrait, PaginatorTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{address, post};

pub const DEFAULT_ROLE: &str = "ROLE_USER";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub login_id: String,
    pub password: String,
    pub pet_name: String,
    pub age: i32,
    pub gender: String,
    pub species: String,
    pub profile_image: Option<String>,
    pub roles: String,
    pub address_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Address,
    Posts,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Address => Entity::belongs_to(address::Entity)
                .from(Column::AddressId)
                .to(address::Column::Id)
                .into(),
            Relation::Posts => Entity::has_many(post::Entity).into(),
        }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Roles are stored comma-joined; split into the list view.
    pub fn role_list(&self) -> Vec<&str> {
        self.roles.split(',').filter(|r| !r.is_empty()).collect()
    }
}

pub fn validate_login_id(login_id: &str) -> Result<(), errors::ModelError> {
    let trimmed = login_id.trim();
    if trimmed.is_empty() { return Err(errors::ModelError::Validation("login id required".into())); }
    if trimmed.len() > 64 { return Err(errors::ModelError::Validation("login id too long (<=64)".into())); }
    Ok(())
}

pub fn validate_pet_name(pet_name: &str) -> Result<(), errors::ModelError> {
    if pet_name.trim().is_empty() { return Err(errors::ModelError::Validation("pet name required".into())); }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    login_id: &str,
    password_hash: &str,
    pet_name: &str,
    age: i32,
    gender: &str,
    species: &str,
    profile_image: Option<String>,
    roles: &str,
    address_id: Uuid,
) -> Result<Model, errors::ModelError> {
    validate_login_id(login_id)?;
    validate_pet_name(pet_name)?;
    if password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let roles = if roles.trim().is_empty() { DEFAULT_ROLE } else { roles };
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        login_id: Set(login_id.to_string()),
        password: Set(password_hash.to_string()),
        pet_name: Set(pet_name.to_string()),
        age: Set(age),
        gender: Set(gender.to_string()),
        species: Set(species.to_string()),
        profile_image: Set(profile_image),
        roles: Set(roles.to_string()),
        address_id: Set(address_id),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_login_id(db: &DatabaseConnection, login_id: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::LoginId.eq(login_id))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn exists_by_login_id(db: &DatabaseConnection, login_id: &str) -> Result<bool, errors::ModelError> {
    let count = Entity::find()
        .filter(Column::LoginId.eq(login_id))
        .count(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(count > 0)
}

pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
