//! Contains core routines and types. The types defined in this module are
//! subject to change and the API should not be relied on.
//!
//! [`LineReader`](crate::core::LineReader) hands out physical lines
//! borrowed from a growing buffer; the GFF reader builds on it.
mod bufreader;

pub use self::bufreader::*;
