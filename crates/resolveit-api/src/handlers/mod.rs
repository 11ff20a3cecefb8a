//! Route handlers
//!
//! All HTTP request handlers organized by audience.

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod health;
