// PressureWatch Data
// This crate handles health store access: sample models, the store contract
// and its in-memory and SQLite backends

// Database connection management
#[cfg(feature = "sqlite")]
pub mod database;

// Health store contract and implementations
pub mod store;

// Sample models
pub mod models;
