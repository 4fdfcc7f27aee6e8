//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` defines request values and the transport seam, `interceptor` stamps
//! requests with the stored credential, `api` exposes typed endpoint calls,
//! and `types` defines the shared wire schema.

pub mod api;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod types;
