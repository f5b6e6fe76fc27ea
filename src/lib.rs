//! Scoped symbol table for language front-ends.
//!
//! Tracks identifier declarations across nested lexical scopes and finds
//! the line of the innermost visible declaration of a name.
//!
//! ```
//! use scopetab::SymbolTable;
//!
//! let mut table = SymbolTable::new();
//! table.enter_scope();
//! table.declare("x", 5);
//! table.enter_scope();
//! table.declare("x", 9);
//! assert_eq!(table.find("x"), Some(9));
//!
//! table.exit_scope();
//! assert_eq!(table.find("x"), Some(5));
//! ```
pub mod config;
pub mod error;
pub mod id;
pub mod index;
pub mod replay;
pub mod scope;
mod table;

pub use config::TableConfig;
pub use error::ScopeError;
pub use id::{LineNumber, NOT_FOUND};
pub use table::SymbolTable;
