use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Layout template generation settings.
pub struct LayoutOptions {
    /// Seed for the cluster template. `None` draws fresh randomness on
    /// every application; a fixed seed makes cluster layouts repeatable.
    #[schemars(title = "Cluster Seed")]
    pub cluster_seed: Option<u64>,
}
