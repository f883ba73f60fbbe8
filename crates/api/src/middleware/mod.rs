//! Request middleware: authentication extractors and error-envelope
//! fallbacks.

pub mod auth;
pub mod envelope;
