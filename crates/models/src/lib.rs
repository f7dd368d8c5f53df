//! Option record model shared by the migration, service and server crates.
//!
//! - [`option`]: the record, its lifecycle and the row mapping used by SeaORM.
//! - [`catalog`]: the static list of option kinds (one table each).
//! - [`id`]: injectable identifier generators.

pub mod errors;
pub mod db;
pub mod catalog;
pub mod id;
pub mod option;
