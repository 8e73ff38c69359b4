/// Database connection and schema management
pub mod database;

/// Server settings loading from config.toml and environment variables
pub mod server;
