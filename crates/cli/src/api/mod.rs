// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated access to the Wisssh REST backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  ApiClient  │────►│  Transport  │────►│   Backend   │
//! │ (403 retry) │◄────│   (trait)   │◄────│    (REST)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ SingleFlight│────►│   reauth    │  (one refresh at a time)
//! │    (gate)   │     │             │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Features
//!
//! - Bearer token attached to every request
//! - Single-flight token refresh on 403, then one replay
//! - Injectable transport trait for testing

mod client;
mod gate;
mod reauth;
mod transport;

pub use client::ApiClient;
pub use gate::{SingleFlight, SingleFlightGuard};
pub use reauth::reauth;
pub use transport::{
    ApiRequest, ApiResponse, Body, FilePart, Method, ReqwestTransport, Transport, TransportError,
    TransportResult,
};


#[cfg(test)]
mod gate_tests;
