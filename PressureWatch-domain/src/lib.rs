// PressureWatch Domain
// This crate keeps the latest blood pressure reading in sync with the health store

// Domain entities
pub mod entities;

// Observable reading state
pub mod state;

// Synchronizer and writer services
pub mod services;

// Startup wiring around a health store
pub mod session;

// Health checks and system status
pub mod health;

// Re-export the store layer for convenience
pub use pressure_watch_data::models;
pub use pressure_watch_data::store;
