//! Core logic for the project board.
//! This crate owns the project store, input validation and the headless
//! board components that render from store snapshots.

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod ui;
pub mod validation;

pub use config::{BoardConfig, ConfigError, InputRules};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{projects_json, Project, ProjectId, ProjectStatus};
pub use state::project_state::ProjectState;
pub use state::{State, StateError};
pub use ui::board::{BoardView, ProjectBoard};
pub use ui::drag_drop::{DragPayload, DragTarget, Draggable, DropEffect, PROJECT_ID_MIME};
pub use ui::project_input::{InputError, InputFormView, ProjectInput, UserInput};
pub use ui::project_item::{CardView, ProjectItem};
pub use ui::project_list::{ListView, ProjectList};
pub use ui::{Component, Host};
pub use validation::{coerce_number, validate, FieldRules, FieldValue, Validatable};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
