//! feedpulse-web — HTTP front end for Feedpulse.
//! Provides:
//!   - JSON API for submitting, listing and summarising feedback
//!   - A server-rendered page with a submission form and live stats
//!   - SSE notifications for new feedback

pub mod config;
pub mod router;
pub mod handlers;
pub mod state;
pub mod sse;
pub mod templates;
