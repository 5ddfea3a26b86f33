//! Common test utilities shared by the integration suites.
//!
//! - Fixtures (sample `.maki/` projects, populated managers)
//! - Stub endpoints with scripted responses
//! - Assertion helpers for reports and events

pub mod assertions;
pub mod fixtures;
pub mod stub_endpoints;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use stub_endpoints::*;
