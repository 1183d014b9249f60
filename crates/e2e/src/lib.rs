//! Test fixtures shared by the integration tests of the workspace: an in
//! process HTTP server standing in for the order service.

pub mod setup;
