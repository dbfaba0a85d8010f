//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// a read went past the end of the model buffer
    #[error("read of {len} bytes at offset {offset:#x} is out of bounds")]
    OutOfBounds {
        /// Absolute offset the read started at
        offset: usize,
        /// Number of bytes requested
        len: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
