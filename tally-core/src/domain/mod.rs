//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
mod category;
mod state;
mod transaction;
mod user;
pub mod result;

pub use account::{Account, AccountKind, AccountPatch};
pub use category::Category;
pub use state::AppState;
pub use transaction::{FlowKind, Transaction};
pub use user::UserProfile;
