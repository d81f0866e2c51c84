pub mod health;
pub mod blood_pressure;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use blood_pressure::{
    get_latest_reading, get_reading_form, log_reading, refresh_reading, update_reading_form,
};
pub use health::health_check;
