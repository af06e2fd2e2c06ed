//! Registration command handlers.

mod register_member;

pub use register_member::{RegisterMemberCommand, RegisterMemberHandler, RegisterMemberResult};
