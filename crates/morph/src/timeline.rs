//! Timeline entries and the alternating cloud/mesh state sequence derived from them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a preloaded mesh (the model file name in the timeline data).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshId(String);

impl MeshId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MeshId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// One chronological record of the timeline. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// Mesh shown while this entry is active.
    pub mesh: MeshId,
    /// Display year; the data files use both numbers and strings.
    #[serde(deserialize_with = "year_from_number_or_string")]
    pub year: String,
    #[serde(default)]
    pub event: String,
    #[serde(default, alias = "Species")]
    pub species: String,
    /// Fraction of points to highlight, in `[0, 1]`.
    #[serde(default)]
    pub contamination_rate: f64,
    #[serde(default)]
    pub description: String,
    /// Link to the study backing the statistic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

fn year_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Int(y) => y.to_string(),
        Year::Float(y) => y.to_string(),
        Year::Text(y) => y,
    })
}

/// A navigable position in the timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineState {
    /// Diffuse cloud between (and around) the mesh states.
    Cloud,
    /// Points gathered into the shape of one entry's mesh.
    Mesh { mesh_id: MeshId, entry: TimelineEntry },
}

impl TimelineState {
    pub fn is_mesh(&self) -> bool {
        matches!(self, TimelineState::Mesh { .. })
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, TimelineState::Cloud)
    }

    pub fn mesh_id(&self) -> Option<&MeshId> {
        match self {
            TimelineState::Mesh { mesh_id, .. } => Some(mesh_id),
            TimelineState::Cloud => None,
        }
    }

    pub fn entry(&self) -> Option<&TimelineEntry> {
        match self {
            TimelineState::Mesh { entry, .. } => Some(entry),
            TimelineState::Cloud => None,
        }
    }
}

/// Derive `Cloud, Mesh(0), Cloud, Mesh(1), …, Mesh(n-1), Cloud` (length `2n + 1`).
pub fn build(entries: &[TimelineEntry]) -> Vec<TimelineState> {
    let mut states = Vec::with_capacity(entries.len() * 2 + 1);
    states.push(TimelineState::Cloud);
    for entry in entries {
        states.push(TimelineState::Mesh {
            mesh_id: entry.mesh.clone(),
            entry: entry.clone(),
        });
        states.push(TimelineState::Cloud);
    }
    states
}

/// Index of the first mesh state, if any.
pub fn first_mesh_index(states: &[TimelineState]) -> Option<usize> {
    states.iter().position(TimelineState::is_mesh)
}

/// True for the final state of a non-trivial sequence (the cloud after the last mesh).
pub fn is_terminal(states: &[TimelineState], index: usize) -> bool {
    states.len() > 1 && index == states.len() - 1
}

/// 1-based position of the mesh at `index` among all mesh states, and the mesh total.
pub fn mesh_step(states: &[TimelineState], index: usize) -> Option<(usize, usize)> {
    if !states.get(index)?.is_mesh() {
        return None;
    }
    let step = states[..index].iter().filter(|s| s.is_mesh()).count() + 1;
    let total = states.iter().filter(|s| s.is_mesh()).count();
    Some((step, total))
}

#[cfg(test)]
pub(crate) fn entry(mesh: &str, rate: f64) -> TimelineEntry {
    TimelineEntry {
        mesh: MeshId::new(mesh),
        year: "1950".to_string(),
        event: format!("{} event", mesh),
        species: "Laysan albatross".to_string(),
        contamination_rate: rate,
        description: "of seabirds, studied".to_string(),
        references: None,
    }
}
