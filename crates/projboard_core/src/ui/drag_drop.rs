//! Drag-and-drop contracts between cards and columns.

use crate::model::project::ProjectId;
use crate::state::StateError;

/// MIME type cards use for their drag payload.
pub const PROJECT_ID_MIME: &str = "text/plain";

/// Allowed effect of a drag operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    /// Cards always offer `Move`.
    Move,
    /// Offered by foreign drag sources (text, links, files) hovering a column.
    Copy,
}

/// Data carried from a drag source to a drop target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub mime: String,
    pub data: String,
    pub effect_allowed: DropEffect,
}

impl DragPayload {
    /// Payload a project card hands out when dragged.
    pub fn project(id: ProjectId) -> Self {
        Self {
            mime: PROJECT_ID_MIME.to_string(),
            data: id.to_string(),
            effect_allowed: DropEffect::Move,
        }
    }

    pub fn carries_project_id(&self) -> bool {
        self.mime == PROJECT_ID_MIME
    }
}

/// Something the user can pick up.
pub trait Draggable {
    fn drag_start_handler(&self) -> DragPayload;
    fn drag_end_handler(&self);
}

/// Something a dragged item can be dropped on.
pub trait DragTarget {
    /// Returns whether the payload would be accepted on drop.
    fn drag_over_handler(&mut self, payload: &DragPayload) -> bool;

    /// Applies the drop. `Ok(false)` means nothing changed.
    fn drop_handler(&mut self, payload: &DragPayload) -> Result<bool, StateError>;

    fn drag_leave_handler(&mut self);
}
