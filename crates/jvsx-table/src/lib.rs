//! # jvsx-table
//!
//! Declarative parameter table for the Roland JV-1080 SysEx address space.
//!
//! A [`ParameterTable`] is built once from [`ParameterGroup`]s (in code, from
//! a TOML/JSON document, or via [`builtin::jv1080`]) and then answers forward
//! lookups by `(group, parameter)` name and reverse lookups by [`Address`].
//!
//! ```
//! use jvsx_table::builtin;
//!
//! let table = builtin::jv1080().unwrap();
//! let efx = table.lookup("temp_performance_common", "EFX:Type").unwrap();
//! assert_eq!(efx.address.to_string(), "01 00 00 0C");
//! ```

pub mod address;
pub mod builtin;
pub mod definition;
pub mod error;
pub mod schema;
pub mod table;

pub use address::{Address, BaseAddress};
pub use definition::{DeviceInfo, ParameterDefinition, ParameterGroup, ValueKind};
pub use error::{Error, Result};
pub use schema::TableDocument;
pub use table::{ParameterTable, ResolvedParameter};
