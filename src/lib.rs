//! Delta: onboarding wizard and growth-roadmap client.

pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod onboarding;
pub mod pages;
pub mod session;
pub mod views;
pub mod wizard;
