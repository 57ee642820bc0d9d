// src/ct_log/mod.rs
pub mod client;
pub mod types;

pub use client::{LogClient, LogClientError};
pub use types::{AddChainRequest, LogDescription, RawSct};
