//! Domain layer for blogcast
//!
//! Contains the value objects and entities that flow through the
//! blog-to-podcast pipeline. Nothing here performs I/O.

pub mod entities;
pub mod errors;
pub mod text;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use text::{char_count, truncate_chars};
pub use value_objects::*;
