//! Request and response bodies

pub mod components;
pub mod refunds;
