//! Synchronous client for the Shippo shipping API.
//!
//! # Overview
//! Marshals request objects to JSON, signs them with a `ShippoToken`,
//! performs blocking HTTP calls and unmarshals the responses. List endpoints
//! are paginated transparently by following the server's `next` links.
//!
//! # Design
//! - `ShippoClient` holds only its `ClientConfig` and a `Transport`; it has
//!   no per-call state and is safe to share between threads.
//! - Every resource method goes through `call_one` or `call_list`, so status
//!   handling, decoding and pagination live in one place.
//! - The network sits behind the `Transport` trait. `UreqTransport` is the
//!   default; tests substitute scripted transports.
//!
//! ```no_run
//! use shippo_core::{AddressInput, ShippoClient};
//!
//! # fn main() -> shippo_core::Result<()> {
//! let client = ShippoClient::new("shippo_test_token");
//! let address = client.create_address(&AddressInput {
//!     name: Some("Shawn Ippotle".to_string()),
//!     country: Some("US".to_string()),
//!     ..Default::default()
//! })?;
//! for stored in client.list_all_addresses()? {
//!     println!("{} {:?}", stored.object_id, stored.name);
//! }
//! # let _ = address;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod list;
mod resources;
pub mod transport;
pub mod types;

pub use client::{ShippoClient, AUTH_SCHEME, NO_BODY};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
pub use error::{ApiError, BoxError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::ListEnvelope;
pub use transport::{Transport, UreqTransport};
pub use types::{Address, AddressInput, DistanceUnit, MassUnit, Parcel, ParcelInput};
