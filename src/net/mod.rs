//! Networking: token storage, the JSON request wrapper, transports, and wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` normalizes every backend exchange into an `ApiResponse`, `tokens`
//! owns the persisted bearer credentials, and `types` defines the backend
//! schema and its mapping to client-side shapes. Transports plug in under
//! the `HttpTransport` seam: `reqwest` natively, `gloo-net` in the browser.

#[cfg(feature = "hydrate")]
pub mod fetch;
pub mod http;
#[cfg(feature = "native")]
pub mod reqwest_transport;
#[cfg(test)]
pub(crate) mod test_support;
pub mod tokens;
pub mod types;
