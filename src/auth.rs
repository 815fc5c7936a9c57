//! Access-token collaborator contract, token metadata, and redacted secrets.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
