//! Shared types for the popup request protocol.
//!
//! The popup server accepts a JSON popup definition, renders it for the user,
//! and answers with a JSON result tagged by a `status` field. This crate holds
//! the wire-level pieces both sides agree on:
//!
//! - [`PopupDefinition`] and [`Element`]: convenience builders for the
//!   definition JSON. The client treats definitions as opaque values, so these
//!   are optional; anything that serializes to the same shape works.
//! - [`PopupRequest`]: the request body posted to the server.
//! - [`PopupResult`] and [`PopupStatus`]: the verbatim response wrapper and
//!   the well-known status values.

pub mod definition;
pub mod protocol;
pub mod result;

pub use definition::{Element, PopupDefinition};
pub use protocol::{PopupRequest, DEFAULT_TIMEOUT_MS, POPUP_PATH};
pub use result::{PopupResult, PopupStatus};
