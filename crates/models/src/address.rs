use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter, ColumnTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{info_map, pet};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: i32,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pets,
    InfoMaps,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pets => Entity::has_many(pet::Entity).into(),
            Relation::InfoMaps => Entity::has_many(info_map::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, code: i32, name: &str) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("address name required".into())); }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        code: Set(code),
        name: Set(name.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Postal code is the unique lookup key.
pub async fn find_by_code(db: &DatabaseConnection, code: i32) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Code.eq(code))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
