//! Project domain model.
//!
//! # Responsibility
//! - Define the record rendered by board columns and cards.
//! - Keep identity generation inside core so UI code never mints IDs.
//!
//! # Invariants
//! - `id` is generated once and never reassigned.
//! - `status` is either `Active` or `Finished`; there is no third state.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one project.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProjectId = Uuid;

/// Board column a project currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Finished,
}

impl ProjectStatus {
    /// Stable lowercase name, also used for column element ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    /// Parses a user-supplied status name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "finished" => Some(Self::Finished),
            _ => None,
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One project card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned.
    pub people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a freshly generated ID.
    ///
    /// Crate-private: projects are only minted by the store's add path.
    pub(crate) fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }
}

/// Pretty JSON rendering of a snapshot, as printed by drivers.
pub fn projects_json(projects: &[Project]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(projects)
}

#[cfg(test)]
mod tests {
    use super::{projects_json, Project, ProjectStatus};

    #[test]
    fn new_project_starts_active_with_unique_id() {
        let first = Project::new("a", "first one", 1);
        let second = Project::new("a", "first one", 1);

        assert_eq!(first.status, ProjectStatus::Active);
        assert!(first.is_active());
        assert!(!first.id().is_nil());
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn status_parse_accepts_known_names() {
        assert_eq!(ProjectStatus::parse(" Active "), Some(ProjectStatus::Active));
        assert_eq!(
            ProjectStatus::parse("FINISHED"),
            Some(ProjectStatus::Finished)
        );
        assert_eq!(ProjectStatus::parse("archived"), None);
    }

    #[test]
    fn projects_json_round_trips_snapshot() {
        let mut project = Project::new("Docs", "write docs", 2);
        project.status = ProjectStatus::Finished;

        let json = projects_json(std::slice::from_ref(&project)).expect("serializes");
        assert!(json.contains("\"status\": \"finished\""));

        let decoded: Vec<Project> = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(decoded, vec![project]);
    }
}
