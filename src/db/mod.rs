pub mod connection;
pub mod properties;
pub mod reports;
pub mod seed;
pub mod users;

pub use connection::Database;
