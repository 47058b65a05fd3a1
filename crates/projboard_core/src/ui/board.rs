//! Board application wiring.
//!
//! # Responsibility
//! - Build the form and both columns against one explicit store.
//! - Offer whole-gesture helpers (drag a card to a column) for drivers.
//! - Render the board as view structs or plain text.

use crate::config::BoardConfig;
use crate::model::project::{ProjectId, ProjectStatus};
use crate::state::project_state::ProjectState;
use crate::state::StateError;
use crate::ui::drag_drop::{DragTarget, Draggable};
use crate::ui::project_input::{InputFormView, ProjectInput};
use crate::ui::project_list::{ListView, ProjectList};
use crate::ui::Host;
use log::debug;
use std::fmt::Write as _;
use std::rc::Rc;

const HOST_ELEMENT_ID: &str = "app";

/// Full rendered board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Root element ids in attach order.
    pub layout: Vec<String>,
    pub input: InputFormView,
    pub active: ListView,
    pub finished: ListView,
}

/// The assembled board: one form, an active column and a finished column.
pub struct ProjectBoard {
    store: Rc<ProjectState>,
    host: Host,
    input: ProjectInput,
    active: ProjectList,
    finished: ProjectList,
}

impl ProjectBoard {
    pub fn new(store: Rc<ProjectState>, config: &BoardConfig) -> Result<Self, StateError> {
        let mut host = Host::new(HOST_ELEMENT_ID);
        let input = ProjectInput::new(Rc::clone(&store), config.input.clone(), &mut host);
        let active = ProjectList::new(ProjectStatus::Active, Rc::clone(&store), &mut host)?;
        let finished = ProjectList::new(ProjectStatus::Finished, Rc::clone(&store), &mut host)?;
        debug!("event=board_ready module=ui status=ok");

        Ok(Self {
            store,
            host,
            input,
            active,
            finished,
        })
    }

    pub fn store(&self) -> &Rc<ProjectState> {
        &self.store
    }

    pub fn input_mut(&mut self) -> &mut ProjectInput {
        &mut self.input
    }

    pub fn column(&self, status: ProjectStatus) -> &ProjectList {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    fn column_mut(&mut self, status: ProjectStatus) -> &mut ProjectList {
        match status {
            ProjectStatus::Active => &mut self.active,
            ProjectStatus::Finished => &mut self.finished,
        }
    }

    /// Drags the card `id` from whichever column shows it onto `target`.
    ///
    /// Returns `Ok(false)` when no card matches or the drop changed nothing.
    pub fn drag_card(&mut self, id: ProjectId, target: ProjectStatus) -> Result<bool, StateError> {
        let Some(item) = self.active.item(id).or_else(|| self.finished.item(id)) else {
            debug!("event=drag_card module=ui status=noop reason=unknown_card project_id={id}");
            return Ok(false);
        };

        let payload = item.drag_start_handler();
        let column = self.column_mut(target);
        let moved = if column.drag_over_handler(&payload) {
            column.drop_handler(&payload)
        } else {
            column.drag_leave_handler();
            Ok(false)
        };
        item.drag_end_handler();
        moved
    }

    /// Resolves a full ID or an unambiguous prefix of one.
    pub fn resolve_id(&self, needle: &str) -> Option<ProjectId> {
        let needle = needle.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .store
            .projects()
            .into_iter()
            .map(|project| project.id())
            .filter(|id| id.to_string().starts_with(&needle));
        let first = matches.next()?;
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    pub fn render(&self) -> BoardView {
        BoardView {
            layout: self.host.children().to_vec(),
            input: self.input.view(),
            active: self.active.view(),
            finished: self.finished.view(),
        }
    }

    /// Plain-text rendering used by terminal drivers.
    pub fn render_text(&self) -> String {
        let view = self.render();
        let mut out = String::new();
        for column in [&view.active, &view.finished] {
            let _ = writeln!(out, "== {} ({}) ==", column.heading, column.cards.len());
            if column.cards.is_empty() {
                let _ = writeln!(out, "  (empty)");
            }
            for card in &column.cards {
                let short_id = card.id.to_string();
                let _ = writeln!(
                    out,
                    "  [{}] {} - {}\n      {}",
                    &short_id[..8],
                    card.title,
                    card.persons,
                    card.description
                );
            }
        }
        out
    }
}
