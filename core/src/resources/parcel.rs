use super::object_path;
use crate::client::{ShippoClient, NO_BODY};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::transport::Transport;
use crate::types::{Parcel, ParcelInput};

impl<T: Transport> ShippoClient<T> {
    pub fn create_parcel(&self, input: &ParcelInput) -> Result<Parcel> {
        self.call_one(HttpMethod::Post, "/parcels/", Some(input))
    }

    pub fn retrieve_parcel(&self, object_id: &str) -> Result<Parcel> {
        self.call_one(HttpMethod::Get, &object_path("parcels", object_id)?, NO_BODY)
    }

    pub fn list_all_parcels(&self) -> Result<Vec<Parcel>> {
        self.list_all("/parcels/")
    }
}
