//! Resource limits applied before and during parsing.
//!
//! The defaults bound both the memory spent on a single input and the
//! recursion depth of the parser, so untrusted input cannot exhaust the
//! stack.

use crate::error::LexError;

/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The default maximum size of an input (10MB).
pub const MAX_JSON_SIZE_BYTES: usize = 10 * 1024 * 1024;
/// The deepest nesting the parser will ever descend into, whatever the
/// configured `max_depth`. The parser recurses once per level.
pub const MAX_SUPPORTED_DEPTH: usize = 512;

/// Parser limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes.
    pub max_input_size: usize,
    /// Maximum number of nested objects/arrays.
    pub max_depth: usize,
}

impl Limits {
    /// Limits that accept any input size and nest up to
    /// [`MAX_SUPPORTED_DEPTH`] levels.
    pub const fn unlimited() -> Self {
        Limits {
            max_input_size: usize::MAX,
            max_depth: MAX_SUPPORTED_DEPTH,
        }
    }

    /// The depth the parser actually enforces: `max_depth` capped at
    /// [`MAX_SUPPORTED_DEPTH`].
    pub fn effective_depth(&self) -> usize {
        self.max_depth.min(MAX_SUPPORTED_DEPTH)
    }

    /// Rejects `source` if it is larger than `max_input_size`.
    pub fn check_input(&self, source: &str) -> Result<(), LexError> {
        if source.len() > self.max_input_size {
            log::trace!(
                "rejecting {} byte input (limit {})",
                source.len(),
                self.max_input_size
            );
            return Err(LexError {
                message: "input exceeds maximum size limit".to_string(),
                position: 0,
                line: 1,
                column: 1,
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_input_size: MAX_JSON_SIZE_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
