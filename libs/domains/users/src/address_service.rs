//! Address book operations on a user's embedded `addresses` array

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Address, AddressInput};
use crate::repository::UserRepository;

pub struct AddressService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> AddressService<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    pub fn from_shared(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Add an address with a newly generated id
    #[instrument(skip(self, input))]
    pub async fn add_address(&self, user_id: Uuid, input: AddressInput) -> UserResult<Address> {
        let address = Address::new(input);

        if !self
            .repository
            .append_address(user_id, address.clone())
            .await?
        {
            return Err(UserError::NotFound(user_id));
        }

        tracing::info!(address_id = %address.address_id, "Address added");
        Ok(address)
    }

    /// Overwrite one of the caller's addresses in place.
    ///
    /// An address id owned by another user is reported as not found. Store
    /// failures are reported the same way.
    #[instrument(skip(self, input))]
    pub async fn edit_address(
        &self,
        user_id: Uuid,
        address_id: Uuid,
        input: AddressInput,
    ) -> UserResult<()> {
        match self
            .repository
            .update_address(user_id, address_id, input)
            .await
        {
            Ok(true) => Ok(()),
            Ok(false) => Err(UserError::AddressNotFound(address_id)),
            Err(e) => {
                tracing::error!(error = %e, "Address update failed");
                Err(UserError::AddressNotFound(address_id))
            }
        }
    }

    /// Remove one of the caller's addresses
    #[instrument(skip(self))]
    pub async fn delete_address(&self, user_id: Uuid, address_id: Uuid) -> UserResult<()> {
        match self.repository.remove_address(user_id, address_id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(UserError::AddressNotFound(address_id)),
            Err(e) => {
                tracing::error!(error = %e, "Address delete failed");
                Err(UserError::UpdateFailed("could not delete address".to_string()))
            }
        }
    }
}

impl<R: UserRepository> Clone for AddressService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
