//! Dashboard user directory.
//!
//! Users come from a sheet (positional columns Name, Role, Password, Cards) or
//! from configuration when the sheet is missing or unreachable.

pub mod directory;

pub use directory::{DirectoryUser, UserDirectory, default_cards_for_role, parse_cards};
