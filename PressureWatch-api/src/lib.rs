// PressureWatch-api lib.rs
//
// HTTP surface over a health session: configuration, routes and public entities.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
