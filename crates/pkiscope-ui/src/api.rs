//! Client for the prediction (`/predict`) and rendering (`/render`) endpoints.
//!
//! Both endpoints take `{"smiles": <string>}` and answer either with a success
//! payload or `{"error": <message>}`. The HTTP status is not inspected: the
//! service pairs 4xx/5xx codes with an error body, and the body decides.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use pkiscope_common::{ApiConfig, PkiscopeError, Result};

#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest<'a> {
    pub smiles: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResponse {
    Error(String),
    /// `p_ki` is log-scale; `ki` is the derived linear value.
    Success { p_ki: f64, ki: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResponse {
    Error(String),
    /// Base64-encoded PNG.
    Success { image: String },
}

#[derive(Deserialize)]
struct PredictBody {
    error: Option<Value>,
    #[serde(rename = "pKi")]
    p_ki: Option<f64>,
    #[serde(rename = "Ki")]
    ki: Option<f64>,
}

#[derive(Deserialize)]
struct RenderBody {
    error: Option<Value>,
    image: Option<String>,
}

/// Any truthy `error` value is an error payload; `null`, `false`, `0` and
/// `""` are not. Non-string values are shown in their display form.
fn error_message(error: Option<Value>) -> Option<String> {
    let error = error?;
    let truthy = match &error {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    truthy.then(|| display_value(&error))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}

impl PredictionResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let body: PredictBody = serde_json::from_slice(body)?;
        if let Some(msg) = error_message(body.error) {
            return Ok(Self::Error(msg));
        }
        match (body.p_ki, body.ki) {
            (Some(p_ki), Some(ki)) => Ok(Self::Success { p_ki, ki }),
            _ => Err(PkiscopeError::MalformedResponse(
                "prediction body has neither error nor pKi/Ki".to_string(),
            )),
        }
    }
}

impl RenderResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let body: RenderBody = serde_json::from_slice(body)?;
        if let Some(msg) = error_message(body.error) {
            return Ok(Self::Error(msg));
        }
        body.image
            .map(|image| Self::Success { image })
            .ok_or_else(|| {
                PkiscopeError::MalformedResponse("render body has neither error nor image".to_string())
            })
    }
}

/// The two remote operations the form depends on.
///
/// An `Err` is a transport-level failure; application errors reported by the
/// service come back as the `Error` variant of the response.
#[async_trait]
pub trait PredictionApi: Send + Sync {
    async fn predict(&self, smiles: &str) -> Result<PredictionResponse>;
    async fn render(&self, smiles: &str) -> Result<RenderResponse>;
}

pub struct HttpPredictionApi {
    client: reqwest::Client,
    predict_url: String,
    render_url: String,
}

impl HttpPredictionApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            predict_url: config.predict_url(),
            render_url: config.render_url(),
        })
    }

    async fn post(&self, url: &str, smiles: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .post(url)
            .json(&PredictionRequest { smiles })
            .send()
            .await?;
        debug!("POST {} -> {}", url, resp.status());
        Ok(resp.bytes().await?.to_vec())
    }
}

#[async_trait]
impl PredictionApi for HttpPredictionApi {
    async fn predict(&self, smiles: &str) -> Result<PredictionResponse> {
        let body = self.post(&self.predict_url, smiles).await?;
        PredictionResponse::from_slice(&body)
    }

    async fn render(&self, smiles: &str) -> Result<RenderResponse> {
        let body = self.post(&self.render_url, smiles).await?;
        RenderResponse::from_slice(&body)
    }
}
