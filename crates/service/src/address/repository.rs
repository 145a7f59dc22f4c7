use async_trait::async_trait;

use super::Address;
use crate::errors::ServiceError;

/// Repository abstraction for address lookup.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Postal `code` is the unique lookup key.
    async fn find_by_code(&self, code: i32) -> Result<Option<Address>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAddressRepository {
        addresses: Mutex<HashMap<i32, Address>>, // key: code
    }

    impl MockAddressRepository {
        /// Seed the mock with `(code, name)` pairs.
        pub fn with_codes(codes: &[(i32, &str)]) -> Self {
            let map = codes
                .iter()
                .map(|(code, name)| (*code, Address { id: Uuid::new_v4(), code: *code, name: (*name).to_string() }))
                .collect();
            Self { addresses: Mutex::new(map) }
        }
    }

    #[async_trait]
    impl AddressRepository for MockAddressRepository {
        async fn find_by_code(&self, code: i32) -> Result<Option<Address>, ServiceError> {
            let addresses = self.addresses.lock().unwrap();
            Ok(addresses.get(&code).cloned())
        }
    }
}
