//! Command handlers

pub mod session;
pub mod traces;
