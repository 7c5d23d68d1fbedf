//! File size validators
//!
//! Validates a byte count, so the caller decides where the size comes from
//! (an in-memory buffer, file metadata, a browser file handle).

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a file is no larger than `max` bytes.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxBytes { max: u64 } for u64;
    rule(self, input) { *input <= self.max }
    error(self, input) {
        ValidationError::new(
            "max_bytes",
            format!("File must be at most {} bytes", self.max),
        )
        .with_param("max", self.max.to_string())
        .with_param("actual", input.to_string())
    }
    fn max_bytes(max: u64);
}
