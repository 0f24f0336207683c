// src/core/mod.rs
//! Career API access

pub mod career_client;

pub use career_client::{CareerClient, HttpTransport, Transport};
