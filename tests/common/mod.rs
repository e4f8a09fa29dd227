//! Integration test common infrastructure.
//!
//! Provides an in-memory connector, a scripted fake server per connection,
//! and a client harness that drives the dispatcher one event at a time.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::{TestClient, config};
#[allow(unused_imports)]
pub use server::TestServer;
