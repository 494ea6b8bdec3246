//! Thin HTTP wrapper around the Wfn REST backend.
//!
//! Every request made through [`Authorized`] carries the bearer token it was
//! created with; token issuance goes through [`ApiClient::obtain_token`].

pub mod client;
pub mod payload;

pub use client::{collection_path, item_path, ApiClient, ApiSettings, Authorized};
pub use payload::{Attachment, Payload};
