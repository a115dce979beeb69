//! Apillon platform access.
//!
//! The tool handlers only see the [`ApillonApi`] trait. [`ApillonClient`]
//! implements it over HTTPS; local files are loaded through [`files`] before
//! being handed to an upload call.

mod api;
mod client;
mod error;
pub mod files;
pub mod types;

pub use api::ApillonApi;
pub use client::ApillonClient;
pub use error::{ApillonError, ApillonResult};
pub use types::{DeployEnvironment, EvmChain, FileUpload, PageQuery};
