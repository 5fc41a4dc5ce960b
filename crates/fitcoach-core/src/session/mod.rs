//! Chat session identity.

pub mod identity;

pub use identity::SessionIdentity;
