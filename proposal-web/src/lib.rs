//! Staff web front-end for the proposal generator.
//!
//! Signed-in staff fill an intake form (or post metadata JSON) and receive
//! the rendered proposal inline or as a download. Rendering is entirely the
//! core crate's; this crate owns sign-in, sessions and the form mapping.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod form;
pub mod pages;
pub mod routes;
pub mod session;

pub use config::WebConfig;
pub use routes::{router, AppState};
