//! pkiscope-ui — Headless model of the pkiscope single-page front end.
//!
//! Two controllers share the page's element registry:
//!   - `NavigationController` keeps one navigation link and one content
//!     section active as in-page anchors are clicked
//!   - `PredictionFormController` submits a SMILES string to the prediction
//!     and rendering endpoints and merges both results into the page
//!
//! The endpoints themselves are reached through the `PredictionApi` trait;
//! `HttpPredictionApi` is the reqwest-backed implementation.

pub mod api;
pub mod form;
pub mod navigation;
pub mod notation;
pub mod page;
pub mod regions;

pub use api::{HttpPredictionApi, PredictionApi, PredictionResponse, RenderResponse};
pub use form::{PredictionFormController, Submission};
pub use navigation::{ClickOutcome, NavigationController};
pub use notation::format_to_power_notation;
pub use page::{ElementRegistry, LinkId, LinkRole, Page, PredictionForm};
pub use regions::{ResultContent, ResultRegion, StructureView};
