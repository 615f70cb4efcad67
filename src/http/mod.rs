//! HTTP transport layer for the callable conformance harness
//!
//! Provides the external API routing, one callable route per scenario plus health and discovery endpoints.

pub mod handlers;
