//! Project card.

use crate::model::project::{Project, ProjectId};
use crate::ui::drag_drop::{DragPayload, Draggable};
use crate::ui::Component;
use log::debug;

/// Rendered card content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ProjectId,
    pub title: String,
    /// e.g. `1 person assigned`, `3 persons assigned`.
    pub persons: String,
    pub description: String,
    pub draggable: bool,
}

/// One card inside a column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    project: Project,
    element_id: String,
    view: Option<CardView>,
}

impl ProjectItem {
    /// Builds and renders the card for `project`.
    pub fn new(project: Project) -> Self {
        let mut item = Self {
            element_id: project.id().to_string(),
            project,
            view: None,
        };
        item.render_content();
        item
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// Human-readable assignment count.
    pub fn persons(&self) -> String {
        match self.project.people {
            1 => "1 person".to_string(),
            n => format!("{n} persons"),
        }
    }

    /// Last rendered content.
    pub fn view(&self) -> Option<&CardView> {
        self.view.as_ref()
    }
}

impl Component for ProjectItem {
    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn render_content(&mut self) {
        self.view = Some(CardView {
            id: self.project.id(),
            title: self.project.title.clone(),
            persons: format!("{} assigned", self.persons()),
            description: self.project.description.clone(),
            draggable: true,
        });
    }
}

impl Draggable for ProjectItem {
    fn drag_start_handler(&self) -> DragPayload {
        debug!(
            "event=drag_start module=ui status=ok project_id={}",
            self.project.id()
        );
        DragPayload::project(self.project.id())
    }

    fn drag_end_handler(&self) {
        debug!(
            "event=drag_end module=ui status=ok project_id={}",
            self.project.id()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectItem;
    use crate::model::project::Project;
    use crate::ui::drag_drop::{DragPayload, DropEffect, Draggable, PROJECT_ID_MIME};
    use crate::ui::Component;

    #[test]
    fn renders_singular_and_plural_person_labels() {
        let one = ProjectItem::new(Project::new("Solo", "alone work", 1));
        let many = ProjectItem::new(Project::new("Team", "group work", 4));

        assert_eq!(
            one.view().expect("rendered").persons,
            "1 person assigned"
        );
        assert_eq!(
            many.view().expect("rendered").persons,
            "4 persons assigned"
        );
    }

    #[test]
    fn card_element_id_is_project_id() {
        let project = Project::new("Card", "card body", 2);
        let id = project.id();
        let item = ProjectItem::new(project);

        assert_eq!(item.element_id(), id.to_string());
        assert!(item.view().expect("rendered").draggable);
    }

    #[test]
    fn drag_start_carries_project_id_as_text() {
        let project = Project::new("Drag", "drag me", 2);
        let id = project.id();
        let item = ProjectItem::new(project);

        let payload = item.drag_start_handler();
        assert_eq!(payload, DragPayload::project(id));
        assert_eq!(payload.mime, PROJECT_ID_MIME);
        assert_eq!(payload.effect_allowed, DropEffect::Move);
        item.drag_end_handler();
    }
}
