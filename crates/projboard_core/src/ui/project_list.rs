//! Status column: a filtered, re-rendering view of the store.
//!
//! # Responsibility
//! - Subscribe to the store once, at construction.
//! - Keep only the projects whose status matches the column.
//! - Accept dropped cards and move them into the column's status.
//!
//! # Invariants
//! - Cards are rebuilt from scratch on every snapshot, in store order.
//! - Only `text/plain` payloads are accepted as drops.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::state::project_state::ProjectState;
use crate::state::StateError;
use crate::ui::drag_drop::{DragPayload, DragTarget};
use crate::ui::project_item::{CardView, ProjectItem};
use crate::ui::{Component, Host};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Rendered column content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub element_id: String,
    pub list_id: String,
    pub heading: String,
    /// Set while an acceptable payload hovers over the list.
    pub droppable: bool,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Default)]
struct ListContent {
    assigned_projects: Vec<Project>,
    items: Vec<ProjectItem>,
    list_id: String,
    heading: String,
    droppable: bool,
}

impl ListContent {
    fn render_projects(&mut self) {
        self.items = self
            .assigned_projects
            .iter()
            .cloned()
            .map(ProjectItem::new)
            .collect();
    }
}

/// One board column (`active` or `finished`).
pub struct ProjectList {
    status: ProjectStatus,
    element_id: String,
    store: Rc<ProjectState>,
    content: Rc<RefCell<ListContent>>,
}

impl ProjectList {
    /// Builds the column, attaches it at the end of `host` and subscribes it.
    pub fn new(
        status: ProjectStatus,
        store: Rc<ProjectState>,
        host: &mut Host,
    ) -> Result<Self, StateError> {
        let mut list = Self {
            status,
            element_id: format!("{}-projects", status.as_str()),
            store,
            content: Rc::new(RefCell::new(ListContent::default())),
        };
        host.attach(list.element_id.clone(), false);

        list.configure()?;
        list.render_content();
        Ok(list)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Projects currently shown in this column.
    pub fn assigned_projects(&self) -> Vec<Project> {
        self.content.borrow().assigned_projects.clone()
    }

    /// Finds the card for `id` in this column.
    pub fn item(&self, id: ProjectId) -> Option<ProjectItem> {
        self.content
            .borrow()
            .items
            .iter()
            .find(|item| item.project().id() == id)
            .cloned()
    }

    pub fn view(&self) -> ListView {
        let content = self.content.borrow();
        ListView {
            element_id: self.element_id.clone(),
            list_id: content.list_id.clone(),
            heading: content.heading.clone(),
            droppable: content.droppable,
            cards: content
                .items
                .iter()
                .filter_map(|item| item.view().cloned())
                .collect(),
        }
    }
}

impl Component for ProjectList {
    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn configure(&mut self) -> Result<(), StateError> {
        let status = self.status;
        self.store
            .subscribe_weak(&self.content, move |content, projects| {
                let mut content = content.borrow_mut();
                content.assigned_projects = projects
                    .into_iter()
                    .filter(|project| project.status == status)
                    .collect();
                content.render_projects();
            })
    }

    fn render_content(&mut self) {
        let mut content = self.content.borrow_mut();
        content.list_id = format!("{}-list", self.element_id);
        content.heading = format!("{} PROJECTS", self.status.as_str().to_ascii_uppercase());
    }
}

impl DragTarget for ProjectList {
    fn drag_over_handler(&mut self, payload: &DragPayload) -> bool {
        if !payload.carries_project_id() {
            return false;
        }
        self.content.borrow_mut().droppable = true;
        true
    }

    fn drop_handler(&mut self, payload: &DragPayload) -> Result<bool, StateError> {
        self.content.borrow_mut().droppable = false;
        if !payload.carries_project_id() {
            return Ok(false);
        }

        // An unparsable id cannot match any project: same as a lookup miss.
        let Ok(id) = payload.data.trim().parse::<ProjectId>() else {
            debug!(
                "event=project_drop module=ui status=noop reason=invalid_id column={}",
                self.status
            );
            return Ok(false);
        };
        self.store.move_project(id, self.status)
    }

    fn drag_leave_handler(&mut self) {
        self.content.borrow_mut().droppable = false;
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectList;
    use crate::model::project::ProjectStatus;
    use crate::state::project_state::ProjectState;
    use crate::ui::drag_drop::{DragPayload, DragTarget, DropEffect};
    use crate::ui::{Component, Host};
    use std::rc::Rc;

    fn column(status: ProjectStatus, store: &Rc<ProjectState>) -> ProjectList {
        let mut host = Host::new("app");
        ProjectList::new(status, Rc::clone(store), &mut host).expect("column subscribes")
    }

    #[test]
    fn renders_heading_and_ids() {
        let store = Rc::new(ProjectState::new());
        let list = column(ProjectStatus::Finished, &store);
        let view = list.view();

        assert_eq!(list.element_id(), "finished-projects");
        assert_eq!(view.list_id, "finished-projects-list");
        assert_eq!(view.heading, "FINISHED PROJECTS");
        assert!(view.cards.is_empty());
    }

    #[test]
    fn drag_over_only_accepts_text_payloads() {
        let store = Rc::new(ProjectState::new());
        let mut list = column(ProjectStatus::Active, &store);

        let foreign = DragPayload {
            mime: "text/html".to_string(),
            data: "<b>x</b>".to_string(),
            effect_allowed: DropEffect::Copy,
        };
        assert!(!list.drag_over_handler(&foreign));
        assert!(!list.view().droppable);

        let id = store.add_project("A", "desc!", 1).expect("add");
        assert!(list.drag_over_handler(&DragPayload::project(id)));
        assert!(list.view().droppable);

        list.drag_leave_handler();
        assert!(!list.view().droppable);
    }

    #[test]
    fn drop_with_garbage_id_is_noop() {
        let store = Rc::new(ProjectState::new());
        let mut list = column(ProjectStatus::Finished, &store);
        store.add_project("A", "desc!", 1).expect("add");

        let payload = DragPayload {
            data: "not-a-uuid".to_string(),
            ..DragPayload::project(uuid::Uuid::new_v4())
        };
        assert_eq!(list.drop_handler(&payload), Ok(false));
        assert!(list.assigned_projects().is_empty());
    }

    #[test]
    fn dropped_list_is_unsubscribed_on_next_change() {
        let store = Rc::new(ProjectState::new());
        let kept = column(ProjectStatus::Active, &store);
        let dropped = column(ProjectStatus::Finished, &store);
        assert_eq!(store.listener_count(), 2);

        drop(dropped);
        store.add_project("A", "desc!", 1).expect("add after drop");

        assert_eq!(store.listener_count(), 1);
        assert_eq!(kept.assigned_projects().len(), 1);
    }
}
