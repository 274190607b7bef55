//! Content schema, collection loading and site configuration for a
//! statically generated blog.

pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod paginator;
pub mod text_utils;
pub mod util;
mod test_data;

pub use config::{read_config, Config};
pub use content::{validate, BlogEntry, BlogPost, Collection, RawMetadata};
pub use error::{ConfigError, ContentError, SchemaError, SchemaErrorKind};
