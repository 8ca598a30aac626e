//! HTTP handlers for all web routes.

pub mod feedback;
pub mod pages;
pub mod system;
