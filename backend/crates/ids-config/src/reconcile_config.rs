use ids_core::MatchKey;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Which attribute identifies the local record on upsert
    pub match_key: MatchKey,
}
