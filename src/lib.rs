//! Layer Client - Platform API client for Layer conversational messaging
//!
//! Application servers use this crate to manage conversations, messages,
//! announcements, badges and block lists on behalf of their users.

pub mod adapters;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use client::{Fetched, LayerClient};
pub use domain::{CredentialContext, LayerError};
