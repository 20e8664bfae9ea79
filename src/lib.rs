//! Proposal Generator: turns a client-intake record into a branded,
//! single-file HTML marketing proposal.
//!
//! Pipeline: [`metadata`] loads the record, [`render`] turns each of the eight
//! sections into a fragment, [`layout`] composes the fragments into the master
//! skeleton and [`assembler`] writes the finished document. [`drafting`] is the
//! optional path that asks a text-generation provider for section prose.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;

pub mod metadata;
pub mod render;
pub mod layout;
pub mod assembler;
pub mod scaffold;

pub mod drafting;
pub mod providers;

pub use assembler::{generate_proposal, ProposalDocument};
pub use error::ProposalError;
pub use metadata::ClientMetadata;
