//! The two UI regions written by submission handlers.
//!
//! `ResultRegion` holds the prediction text, `StructureView` holds the
//! rendered structure image and its container visibility. Each lives behind
//! its own lock; no handler ever touches both.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::Mutex;

use pkiscope_common::{PkiscopeError, Result};

/// Text shown when the prediction request fails before a payload arrives.
pub const RETRY_MESSAGE: &str = "Request error, please retry.";

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

pub type SharedResult = Arc<Mutex<ResultRegion>>;
pub type SharedStructure = Arc<Mutex<StructureView>>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultContent {
    #[default]
    Empty,
    Text(String),
    /// Pre-formatted pKi and Ki strings.
    Prediction { p_ki: String, ki: String },
}

#[derive(Debug, Default)]
pub struct ResultRegion {
    content: ResultContent,
}

impl ResultRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedResult {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn content(&self) -> &ResultContent {
        &self.content
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = ResultContent::Text(text.into());
    }

    pub fn set_error(&mut self, message: &str) {
        self.set_text(format!("Error: {}", message));
    }

    pub fn set_prediction(&mut self, p_ki: String, ki: String) {
        self.content = ResultContent::Prediction { p_ki, ki };
    }

    /// Plain-text rendering, one labeled line per value.
    pub fn text(&self) -> String {
        match &self.content {
            ResultContent::Empty => String::new(),
            ResultContent::Text(t) => t.clone(),
            ResultContent::Prediction { p_ki, ki } => {
                format!("Predicted pKi: {}\nPredicted Ki: {}", p_ki, ki)
            }
        }
    }

    pub fn to_html(&self) -> String {
        match &self.content {
            ResultContent::Empty => String::new(),
            ResultContent::Text(t) => escape_html(t),
            ResultContent::Prediction { p_ki, ki } => format!(
                "<div><strong>Predicted pKi:</strong> {}</div>\n<div><strong>Predicted Ki:</strong> {}</div>",
                escape_html(p_ki),
                escape_html(ki)
            ),
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Structure-display container plus the image element inside it.
#[derive(Debug)]
pub struct StructureView {
    hidden: bool,
    src: String,
}

impl Default for StructureView {
    fn default() -> Self {
        Self { hidden: true, src: String::new() }
    }
}

impl StructureView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStructure {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Hide the container and drop the current image.
    pub fn reset(&mut self) {
        self.hidden = true;
        self.src.clear();
    }

    pub fn clear_image(&mut self) {
        self.src.clear();
    }

    /// Point the image at a base64 PNG payload and reveal the container.
    pub fn show_png(&mut self, base64_png: &str) {
        self.src = format!("{}{}", PNG_DATA_URI_PREFIX, base64_png);
        self.hidden = false;
    }

    /// Decode the displayed image, if any.
    pub fn png_bytes(&self) -> Result<Option<Vec<u8>>> {
        let Some(payload) = self.src.strip_prefix(PNG_DATA_URI_PREFIX) else {
            return Ok(None);
        };
        STANDARD
            .decode(payload)
            .map(Some)
            .map_err(|e| PkiscopeError::MalformedResponse(format!("image payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prediction_text_and_html() {
        let mut region = ResultRegion::new();
        region.set_prediction("7.25".into(), "5.623 × 10^1".into());
        assert_eq!(region.text(), "Predicted pKi: 7.25\nPredicted Ki: 5.623 × 10^1");
        assert_eq!(
            region.to_html(),
            "<div><strong>Predicted pKi:</strong> 7.25</div>\n<div><strong>Predicted Ki:</strong> 5.623 × 10^1</div>"
        );
    }

    #[test]
    fn test_error_text_is_escaped_in_html() {
        let mut region = ResultRegion::new();
        region.set_error("<b>Invalid SMILES Strings</b>");
        assert_eq!(region.text(), "Error: <b>Invalid SMILES Strings</b>");
        assert_eq!(region.to_html(), "Error: &lt;b&gt;Invalid SMILES Strings&lt;/b&gt;");
    }

    #[test]
    fn test_structure_starts_hidden() {
        let view = StructureView::new();
        assert!(view.is_hidden());
        assert_eq!(view.src(), "");
        assert!(view.png_bytes().unwrap().is_none());
    }

    #[test]
    fn test_show_then_reset() {
        let mut view = StructureView::new();
        view.show_png("iVBORw0KGgo=");
        assert!(!view.is_hidden());
        assert_eq!(view.src(), "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(view.png_bytes().unwrap().unwrap(), b"\x89PNG\r\n\x1a\n".to_vec());

        view.reset();
        assert!(view.is_hidden());
        assert_eq!(view.src(), "");
    }

    #[test]
    fn test_undecodable_payload() {
        let mut view = StructureView::new();
        view.show_png("not base64!");
        assert!(view.png_bytes().is_err());
    }
}
