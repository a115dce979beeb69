//! Domains module containing business logic organized by bounded contexts.
//!
//! The server only exposes tools; each capability area of the Apillon
//! platform is a domain inside `tools`.

pub mod tools;
