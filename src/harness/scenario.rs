use std::collections::BTreeMap;

use axum::http::StatusCode;

use crate::codec::{ErrorPayload, RequestEnvelope, ResponseEnvelope};

/// What a scenario answers once the request has been accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(ResponseEnvelope),
    /// HTTP 200 with `{}`: neither `data` nor `error`.
    EmptyBody,
    HttpStatusError(StatusCode, Option<ErrorPayload>),
    /// Abort the handler without writing a response.
    Crash,
}

impl Outcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::EmptyBody => "empty_body",
            Self::HttpStatusError(..) => "http_status_error",
            Self::Crash => "crash",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub headers: Vec<(&'static str, &'static str)>,
    /// `None` accepts any request body without looking at it.
    pub request: Option<RequestEnvelope>,
    pub outcome: Outcome,
}

impl Scenario {
    pub fn new(name: &'static str, outcome: Outcome) -> Self {
        Self {
            name,
            headers: Vec::new(),
            request: None,
            outcome,
        }
    }

    pub fn expect_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn expect_request(mut self, envelope: RequestEnvelope) -> Self {
        self.request = Some(envelope);
        self
    }
}

/// Read-only registry of scenarios keyed by route name.
#[derive(Debug, Default)]
pub struct ScenarioTable {
    scenarios: BTreeMap<&'static str, Scenario>,
}

impl ScenarioTable {
    pub fn new(scenarios: impl IntoIterator<Item = Scenario>) -> Self {
        Self {
            scenarios: scenarios
                .into_iter()
                .map(|scenario| (scenario.name, scenario))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scenarios.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
