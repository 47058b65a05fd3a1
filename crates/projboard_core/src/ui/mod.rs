//! Headless board components.
//!
//! # Responsibility
//! - Translate user actions (form submit, drag and drop) into store calls.
//! - Re-render plain view structs from the snapshots the store pushes.
//!
//! # Invariants
//! - Components reach the store only through an explicit `Rc<ProjectState>`.
//! - Components never hold the store's live sequence, only snapshots.
//! - Render callbacks never call back into the store.

pub mod board;
pub mod drag_drop;
pub mod project_input;
pub mod project_item;
pub mod project_list;

use crate::state::StateError;

/// Shared attach-and-render lifecycle of every board widget.
pub trait Component {
    /// ID of the root element this component renders into.
    fn element_id(&self) -> &str;

    /// Wires event sources and store subscriptions.
    fn configure(&mut self) -> Result<(), StateError> {
        Ok(())
    }

    /// Fills static content (headings, element ids).
    fn render_content(&mut self);
}

/// Ordered container that components attach their root element to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    id: String,
    children: Vec<String>,
}

impl Host {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Inserts `element_id` as first or last child.
    pub fn attach(&mut self, element_id: impl Into<String>, insert_at_start: bool) {
        let element_id = element_id.into();
        log::trace!(
            "event=component_attach module=ui status=ok host={} element={} at_start={}",
            self.id,
            element_id,
            insert_at_start
        );
        if insert_at_start {
            self.children.insert(0, element_id);
        } else {
            self.children.push(element_id);
        }
    }

    /// Attached element ids in render order.
    pub fn children(&self) -> &[String] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::Host;

    #[test]
    fn attach_respects_insert_position() {
        let mut host = Host::new("app");
        host.attach("active-projects", false);
        host.attach("finished-projects", false);
        host.attach("user-input", true);

        assert_eq!(host.id(), "app");
        assert_eq!(
            host.children(),
            ["user-input", "active-projects", "finished-projects"]
        );
    }
}
