//! Request handlers

pub mod components;
pub mod health;
pub mod refunds;
