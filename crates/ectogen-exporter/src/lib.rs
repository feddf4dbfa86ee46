//! Turns classified tables into Ecto schema source files.

pub mod ecto;

pub use ecto::{EXTENSION, render_schema, schema_path};
