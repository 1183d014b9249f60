//! Declarative smoke scenarios: a raw request and what the service is
//! expected to answer.

use {
    anyhow::{Context, Result, ensure},
    api_client::ApiResponse,
    order_validation::{
        ConsistencyError,
        OrdersExpectation,
        SchemaError,
        ValidationError,
        expect_error_code,
        validate_error_response,
        validate_orders_response,
    },
    serde::Deserialize,
    serde_json::Value,
    std::{collections::HashSet, path::Path},
};

const SMOKE: &str = include_str!("../scenarios/smoke.json");

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    /// Sent as is, which allows for deliberately malformed requests.
    pub request: Value,
    pub expect: Expectation,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "dto::Expectation")]
pub enum Expectation {
    /// A valid orders array.
    Success,
    /// A valid error response carrying this error code.
    Error { code: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioFailure {
    #[error("expected orders but received error response {code:?}")]
    UnexpectedError { code: String },
    #[error(transparent)]
    Orders(#[from] ValidationError),
    #[error("invalid error response: {0}")]
    ErrorShape(#[from] SchemaError),
    #[error(transparent)]
    ErrorCode(#[from] ConsistencyError),
}

impl Scenario {
    /// Judges a response to this scenario's request.
    pub fn evaluate(&self, response: &ApiResponse) -> Result<(), ScenarioFailure> {
        match &self.expect {
            Expectation::Success => {
                if response.is_error() {
                    return Err(ScenarioFailure::UnexpectedError {
                        code: error_code(&response.body),
                    });
                }
                validate_orders_response(&response.body, &OrdersExpectation::default())?;
            }
            Expectation::Error { code } => {
                let error = validate_error_response(&response.body)?;
                expect_error_code(&error, code)?;
            }
        }
        Ok(())
    }
}

/// The built-in smoke table.
pub fn smoke() -> Result<Vec<Scenario>> {
    parse(SMOKE).context("built-in smoke table")
}

pub fn load(path: &Path) -> Result<Vec<Scenario>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenarios from {}", path.display()))?;
    parse(&json).with_context(|| format!("invalid scenario file {}", path.display()))
}

pub fn parse(json: &str) -> Result<Vec<Scenario>> {
    let scenarios: Vec<Scenario> = serde_json::from_str(json)?;
    let mut ids = HashSet::new();
    for scenario in &scenarios {
        ensure!(
            ids.insert(scenario.id.as_str()),
            "duplicate scenario id {}",
            scenario.id
        );
    }
    Ok(scenarios)
}

fn error_code(body: &Value) -> String {
    match &body[model::ErrorResponse::ERROR_CODE_KEY] {
        Value::String(code) => code.clone(),
        other => other.to_string(),
    }
}

mod dto {
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct Expectation {
        is_error: bool,
        #[serde(default)]
        error_code: Option<String>,
    }

    impl TryFrom<Expectation> for super::Expectation {
        type Error = &'static str;

        fn try_from(expectation: Expectation) -> Result<Self, &'static str> {
            match (expectation.is_error, expectation.error_code) {
                (false, None) => Ok(Self::Success),
                (true, Some(code)) => Ok(Self::Error { code }),
                (true, None) => Err("an error expectation needs an errorCode"),
                (false, Some(_)) => Err("errorCode is only allowed when isError is true"),
            }
        }
    }
}
