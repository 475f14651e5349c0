//! MySQL Adapter Modules
//!
//! sqlxを使ったMySQL統合

pub mod connection;
pub mod rows;

pub use connection::connect;
