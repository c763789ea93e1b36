//! Prediction form submission.
//!
//! A submission resets the structure view, then spawns two independent tasks:
//! one calls `/predict` and writes the result region, the other calls
//! `/render` and writes the structure view. Neither waits for, cancels, or
//! reads the state of the other. Overlapping submissions are not serialized;
//! whichever task finishes last owns its region.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn, Instrument};

use pkiscope_common::Result;

use crate::api::{PredictionApi, PredictionResponse, RenderResponse};
use crate::notation::{format_p_ki, format_to_power_notation, DEFAULT_KI_PRECISION};
use crate::page::PredictionForm;
use crate::regions::{ResultRegion, SharedResult, SharedStructure, StructureView, RETRY_MESSAGE};

/// Handles to the two tasks spawned by one submission.
pub struct Submission {
    pub smiles: String,
    predict: JoinHandle<()>,
    render: JoinHandle<()>,
}

impl Submission {
    /// Wait for both tasks. Only callers that need completion (CLI, tests)
    /// use this; the form never does.
    pub async fn join(self) {
        if let Err(e) = self.predict.await {
            warn!("prediction task did not complete: {}", e);
        }
        if let Err(e) = self.render.await {
            warn!("render task did not complete: {}", e);
        }
    }
}

pub struct PredictionFormController {
    api: Arc<dyn PredictionApi>,
    form: PredictionForm,
}

impl PredictionFormController {
    pub fn bind(form: PredictionForm, api: Arc<dyn PredictionApi>) -> Self {
        Self { api, form }
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.form.input = value.into();
    }

    pub fn result_region(&self) -> SharedResult {
        self.form.result.clone()
    }

    pub fn structure_view(&self) -> SharedStructure {
        self.form.structure.clone()
    }

    /// Submit the form. The structure view is hidden and cleared before
    /// either request is issued.
    pub async fn submit(&self) -> Submission {
        let smiles = self.form.input.trim().to_string();
        self.form.structure.lock().await.reset();
        info!(smiles = %smiles, "Submitting prediction form");

        let predict = {
            let api = self.api.clone();
            let region = self.form.result.clone();
            let smiles = smiles.clone();
            tokio::spawn(
                async move {
                    let outcome = api.predict(&smiles).await;
                    apply_prediction(&mut *region.lock().await, outcome);
                }
                .in_current_span(),
            )
        };

        let render = {
            let api = self.api.clone();
            let view = self.form.structure.clone();
            let smiles = smiles.clone();
            tokio::spawn(
                async move {
                    let outcome = api.render(&smiles).await;
                    apply_render(&mut *view.lock().await, outcome);
                }
                .in_current_span(),
            )
        };

        Submission { smiles, predict, render }
    }
}

/// Write a prediction outcome into the result region, replacing its content.
pub fn apply_prediction(region: &mut ResultRegion, outcome: Result<PredictionResponse>) {
    match outcome {
        Ok(PredictionResponse::Error(msg)) => region.set_error(&msg),
        Ok(PredictionResponse::Success { p_ki, ki }) => {
            region.set_prediction(
                format_p_ki(p_ki),
                format_to_power_notation(ki, DEFAULT_KI_PRECISION),
            );
        }
        Err(e) => {
            error!(transport = e.is_transport(), "Predict Error: {}", e);
            region.set_text(RETRY_MESSAGE);
        }
    }
}

/// Write a render outcome into the structure view. Failures are only logged.
pub fn apply_render(view: &mut StructureView, outcome: Result<RenderResponse>) {
    match outcome {
        Ok(RenderResponse::Success { image }) => view.show_png(&image),
        Ok(RenderResponse::Error(msg)) => {
            error!("Render Error: {}", msg);
            view.clear_image();
        }
        Err(e) => error!(transport = e.is_transport(), "Render Error: {}", e),
    }
}
