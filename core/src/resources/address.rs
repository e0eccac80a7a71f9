use super::object_path;
use crate::client::{ShippoClient, NO_BODY};
use crate::error::{BoxError, Result};
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{Address, AddressInput};

impl<T: Transport> ShippoClient<T> {
    /// Create a new address object.
    pub fn create_address(&self, input: &AddressInput) -> Result<Address> {
        self.call_one(HttpMethod::Post, "/addresses/", Some(input))
    }

    /// Retrieve an existing address by object id.
    pub fn retrieve_address(&self, object_id: &str) -> Result<Address> {
        self.call_one(HttpMethod::Get, &object_path("addresses", object_id)?, NO_BODY)
    }

    /// List every address on the account, following pagination.
    pub fn list_all_addresses(&self) -> Result<Vec<Address>> {
        self.list_all("/addresses/")
    }

    /// Stream addresses to `f` page by page; stops at the first error.
    pub fn for_each_address<F, E>(&self, f: F) -> Result<()>
    where
        F: FnMut(Address) -> std::result::Result<(), E>,
        E: Into<BoxError>,
    {
        self.for_each("/addresses/", f)
    }
}
