//! Volant admin API client
//!
//! HTTP client for the Volant storefront admin backend. Requests carry the
//! stored bearer token; a 401 triggers one refresh of the credential pair and
//! one replay of the failed request, and an unrecoverable session falls back
//! to a forced navigation to the admin login page.

pub mod client;
pub mod types;

pub use client::error::ClientError;
pub use client::{ApiRequest, VolantClient, VolantClientBuilder};
