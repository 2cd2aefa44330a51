//! Trait definitions for batch chat generation services.
//!
//! The batch driver only ever talks to a [`ChatService`]. Concrete services
//! (a local inference server, a remote API, a deterministic test stub) all
//! satisfy the same two-operation contract.

mod service;

pub use service::ChatService;
