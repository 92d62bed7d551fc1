//! Domain model structs and DTOs.
//!
//! - `Serialize` entity structs as held by the store
//! - `Deserialize` + `Validate` request bodies for creates and updates

pub mod ticket;
