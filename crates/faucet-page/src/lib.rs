//! Faucet Page - email-verified token claim page
//!
//! This crate serves the page a user claims an API token from:
//! 1. The user enters an email address and requests a verification code
//! 2. The remote verification server emails the code
//! 3. The user submits the code back through the page
//! 4. On success the verification server delivers the token by email
//!
//! Sessions, claim history and token issuance belong to external services and
//! are reached through [`providers`] and [`client`].

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod messages;
pub mod networks;
pub mod providers;
pub mod validate;
pub mod view;

pub use config::FaucetConfig;
pub use error::{FaucetError, FaucetResult};
pub use validate::is_valid_input;
