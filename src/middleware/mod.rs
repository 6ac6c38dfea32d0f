//! Request extractors

pub mod validation;
