//! Chart of accounts as seen by the report engine.

pub mod tree;
pub mod types;

pub use tree::AccountTree;
pub use types::{Account, RootType};
