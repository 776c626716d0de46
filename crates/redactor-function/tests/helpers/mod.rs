//! Test helpers: build the router against a mockito stand-in for the DLP API.
//!
//! Run with: `cargo test -p redactor-function`

#![allow(dead_code)]

use axum_test::TestServer;
use mockito::ServerGuard;
use redactor_core::{Config, FunctionConfig};
use redactor_function::setup::{routes, services};
use serde_json::json;
use std::collections::HashMap;

pub const PROJECT_ID: &str = "proj1";
pub const TEMPLATE_PATH: &str = "/v2/projects/proj1/deidentifyTemplates";
pub const JOB_PATH: &str = "/v2/projects/proj1/dlpJobs";

/// Function under test plus the fake Google API it talks to
pub struct TestApp {
    pub server: TestServer,
    pub google: ServerGuard,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn test_config(google_url: &str, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = [
        ("DLP_PROJECT_ID", PROJECT_ID),
        ("RAW_BUCKET", "raw"),
        ("REDACTED_BUCKET", "clean"),
        ("BQ_DATASET_ID", "results"),
        ("DLP_API_URL", google_url),
        ("LOGGING_API_URL", google_url),
        ("CLOUD_LOGGING_ENABLED", "false"),
        ("GCP_AUTH_MODE", "none"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = FunctionConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
    Config(Box::new(config))
}

pub async fn setup_test_app(overrides: &[(&str, &str)]) -> TestApp {
    let google = mockito::Server::new_async().await;
    let config = test_config(&google.url(), overrides);

    let state = services::initialize_services(&config).unwrap();
    let router = routes::setup_routes(state);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, google }
}

pub fn template_body(name: &str) -> String {
    json!({
        "name": name,
        "displayName": "Demo DeIdentification Template",
        "deidentifyConfig": { "infoTypeTransformations": { "transformations": [] } }
    })
    .to_string()
}

pub fn job_body(name: &str, state: &str) -> String {
    json!({ "name": name, "type": "INSPECT_JOB", "state": state }).to_string()
}
