//! Storage Module
//!
//! Access to target databases goes through a [`Session`], an explicit handle
//! that owns exactly one engine connection. Callers pass the session into every
//! core operation; dropping it releases the connection.

pub mod error;
pub mod session;

pub use self::error::ConnectionError;
pub use self::session::Session;
