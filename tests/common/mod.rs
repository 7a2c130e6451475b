//! Common test utilities for api-join integration tests

#[allow(dead_code)]
pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;

use api_join::{Config, ScenarioRunner, Telemetry};
use std::sync::Arc;
use wiremock::MockServer;

/// Runner pointed at a mock server, with its own telemetry sink
#[allow(dead_code)]
pub fn runner_for(server: &MockServer) -> (ScenarioRunner, Arc<Telemetry>) {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    let runner = ScenarioRunner::new(&config)
        .unwrap_or_else(|e| panic!("runner for {} should build: {e}", server.uri()));
    let telemetry = runner.telemetry().clone();
    (runner, telemetry)
}
