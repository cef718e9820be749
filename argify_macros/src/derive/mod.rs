//! Expansion logic shared by the derive entry points.

pub(crate) mod crate_path;
pub(crate) mod describe;
pub(crate) mod parse;
pub(crate) mod schema;
