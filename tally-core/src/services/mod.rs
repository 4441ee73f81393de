//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. The state
//! store owns the canonical state; the mirror worker owns the remote
//! write queue; the advice service owns prompt construction.

mod advice;
pub mod mirror;
mod store;

pub use advice::{
    build_prompt, AdviceService, ADVICE_EMPTY, ADVICE_NOT_CONFIGURED, ADVICE_UNAVAILABLE,
};
pub use mirror::{MirrorHandle, MirrorJob};
pub use store::{NewAccount, NewTransaction, StateStore};
