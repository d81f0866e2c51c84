pub mod sample;

pub use sample::{CorrelatedSample, CorrelationKind, QuantityCategory, QuantitySample};
