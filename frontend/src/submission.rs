use gloo_net::http::Request;
use serde::Serialize;
use thiserror::Error;

use crate::guard::FormInput;

/// Body posted to the form backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub email: String,
    pub interest: String,
    pub role: String,
    pub message: String,
}

impl From<&FormInput> for SubmissionPayload {
    fn from(input: &FormInput) -> Self {
        Self {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            interest: input.interest.label().to_string(),
            role: input.role.trim().to_string(),
            message: input.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("form backend answered with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
}

pub async fn send_submission(endpoint: &str, payload: &SubmissionPayload) -> Result<(), SubmitError> {
    let response = Request::post(endpoint)
        .header("Accept", "application/json")
        .json(payload)
        .map_err(|e| SubmitError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubmitError::Transport(e.to_string()))?;

    if response.ok() {
        Ok(())
    } else {
        Err(SubmitError::Status(response.status()))
    }
}
