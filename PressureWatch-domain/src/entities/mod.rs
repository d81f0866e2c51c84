pub mod reading;

pub use reading::{Reading, SampleQueryResult, INPUT_RANGE};
