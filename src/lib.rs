//! minutes-digest - weekly digest of Go proposal review status changes
//!
//! This library parses the proposal review meeting minutes posted on the
//! tracking issue, reconciles each proposal's stated status against the
//! previous meeting, and produces the list of real status transitions.
//!
//! Layers, leaf first:
//! - [`vocabulary`]: status keywords and patterns
//! - [`parser`]: line classification and the minutes state machine
//! - [`reconciler`]: previous-status computation and no-op suppression
//! - [`feed`]: ordering, weekly grouping, digest output
//! - [`pipeline`]: one batch run over a [`source::CommentSource`]

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod feed;
pub mod models;
pub mod output;
pub mod parser;
pub mod paths;
pub mod pipeline;
pub mod reconciler;
pub mod source;
pub mod storage;
pub mod vocabulary;
