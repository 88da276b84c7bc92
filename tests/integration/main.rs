//! Integration tests
//!
//! `router_tests` run offline. `workflow_tests` need `DATABASE_URL` and
//! `api_tests` need a running server; both are `#[ignore]`d.

mod api_tests;
mod router_tests;
mod workflow_tests;
