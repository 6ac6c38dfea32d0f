//! HTTP handlers

pub mod health;
pub mod predict;
pub mod root;

#[cfg(test)]
mod tests;
