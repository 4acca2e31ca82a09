use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Display colors handed out to dancers in cast order.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD",
    "#98D8C8", "#F7DC6F",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Stage", inline)]
#[serde(default)]
/// Stage geometry and dancer marker colors.
pub struct StageOptions {
    /// Dragged dancers are clamped to `[margin, 100 - margin]` percent.
    #[schemars(title = "Drag Margin", range(min = 0.0, max = 50.0))]
    pub drag_margin: f32,
    /// Marker colors, assigned round-robin as dancers join the cast.
    #[schemars(skip)]
    pub palette: Vec<String>,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            drag_margin: 5.0,
            palette: DEFAULT_PALETTE.iter().map(|&c| c.to_owned()).collect(),
        }
    }
}
