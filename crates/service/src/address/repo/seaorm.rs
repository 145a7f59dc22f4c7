use sea_orm::DatabaseConnection;

use crate::address::Address;
use crate::address::repository::AddressRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAddressRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AddressRepository for SeaOrmAddressRepository {
    async fn find_by_code(&self, code: i32) -> Result<Option<Address>, ServiceError> {
        let res = models::address::find_by_code(&self.db, code).await?;
        Ok(res.map(|a| Address { id: a.id, code: a.code, name: a.name }))
    }
}
