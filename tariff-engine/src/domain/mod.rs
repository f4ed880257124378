mod reading;

pub use reading::{validate_reading, Reading, ValidationError};
