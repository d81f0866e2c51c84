// Public entities exposed by the HTTP surface
pub mod blood_pressure;
pub mod common;

// Re-export common types
pub use blood_pressure::{
    LatestReadingResponse, LogReadingRequest, ReadingFormResponse, UpdateReadingFormRequest,
};
pub use common::PublicErrorResponse;
