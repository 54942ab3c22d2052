//! Content backend for the RDCL brochure site: published content per
//! language, an admin editor working on staged drafts, image ingestion for
//! uploads, and the contact and newsletter relay.

pub mod auth;
pub mod core;
pub mod error;
pub mod server;
pub mod types;

pub use crate::core::language::Language;
pub use error::{CmsError, Result};
