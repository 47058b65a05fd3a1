//! Project store: the single authoritative project list of a board.
//!
//! # Responsibility
//! - Create projects (the only place IDs are minted).
//! - Move projects between statuses.
//! - Push a full snapshot to every listener after each real change.
//!
//! # Invariants
//! - The live sequence never leaves this type; callers see copies only.
//! - Sequence order is insertion order; projects are never removed.
//! - No-op moves (unknown ID or unchanged status) emit no notification.
//! - The store does not validate input; callers run the validator first.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::state::{State, StateError};
use log::debug;
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
    static INSTANCE: OnceCell<Rc<ProjectState>> = const { OnceCell::new() };
}

/// Observable store of all projects on the board.
#[derive(Default)]
pub struct ProjectState {
    state: State<Project>,
    projects: RefCell<Vec<Project>>,
}

impl ProjectState {
    /// Creates an isolated, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared store of the current UI thread, creating it lazily.
    pub fn instance() -> Rc<Self> {
        INSTANCE.with(|cell| Rc::clone(cell.get_or_init(|| Rc::new(Self::new()))))
    }

    /// Registers a snapshot listener.
    ///
    /// Listeners are called in registration order after every change.
    pub fn subscribe(
        &self,
        listener: impl FnMut(Vec<Project>) + 'static,
    ) -> Result<(), StateError> {
        self.state.add_listener(listener)?;
        debug!(
            "event=listener_added module=state status=ok listeners={}",
            self.state.listener_count()
        );
        Ok(())
    }

    /// Appends a new active project and notifies every listener.
    ///
    /// # Errors
    /// - `StateError::NotificationInProgress` when called from a listener.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> Result<ProjectId, StateError> {
        self.state.ensure_idle()?;

        let project = Project::new(title, description, people);
        let id = project.id();
        self.projects.borrow_mut().push(project);
        debug!(
            "event=project_added module=state status=ok project_id={} count={}",
            id,
            self.len()
        );

        self.update_listeners()?;
        Ok(id)
    }

    /// Sets `new_status` on the project with `id`.
    ///
    /// Returns `Ok(true)` when the status changed and listeners were notified,
    /// `Ok(false)` for an unknown ID or an unchanged status.
    ///
    /// # Errors
    /// - `StateError::NotificationInProgress` when called from a listener.
    pub fn move_project(
        &self,
        id: ProjectId,
        new_status: ProjectStatus,
    ) -> Result<bool, StateError> {
        self.state.ensure_idle()?;

        let moved = {
            let mut projects = self.projects.borrow_mut();
            match projects.iter_mut().find(|project| project.id() == id) {
                Some(project) if project.status != new_status => {
                    project.status = new_status;
                    true
                }
                _ => false,
            }
        };

        if !moved {
            debug!(
                "event=project_move module=state status=noop project_id={} target={}",
                id, new_status
            );
            return Ok(false);
        }

        debug!(
            "event=project_move module=state status=ok project_id={} target={}",
            id, new_status
        );
        self.update_listeners()?;
        Ok(true)
    }

    /// Returns a copy of the current sequence.
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    /// Returns a copy of one project.
    pub fn get(&self, id: ProjectId) -> Option<Project> {
        self.projects
            .borrow()
            .iter()
            .find(|project| project.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    /// Registers a snapshot listener tied to the lifetime of `target`.
    ///
    /// The listener is dropped on the first notification after `target` is.
    pub fn subscribe_weak<O: 'static>(
        &self,
        target: &Rc<O>,
        listener: impl FnMut(&O, Vec<Project>) + 'static,
    ) -> Result<(), StateError> {
        self.state.add_weak_listener(target, listener)?;
        debug!(
            "event=listener_added module=state status=ok kind=weak listeners={}",
            self.state.listener_count()
        );
        Ok(())
    }

    pub fn listener_count(&self) -> usize {
        self.state.listener_count()
    }

    fn update_listeners(&self) -> Result<(), StateError> {
        // Clone before notifying so listeners may read the store.
        let snapshot = self.projects();
        self.state.notify(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectState;
    use crate::model::project::ProjectStatus;
    use crate::state::StateError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn instance_is_shared_per_thread() {
        let first = ProjectState::instance();
        let second = ProjectState::instance();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn listeners_can_read_store_during_notification() {
        let store = Rc::new(ProjectState::new());
        let seen_len = Rc::new(RefCell::new(0));

        let inner = Rc::clone(&store);
        let sink = Rc::clone(&seen_len);
        store
            .subscribe(move |_| *sink.borrow_mut() = inner.len())
            .expect("subscribe");

        store.add_project("A", "desc!", 1).expect("add");
        assert_eq!(*seen_len.borrow(), 1);
    }

    #[test]
    fn reentrant_mutation_is_rejected_without_side_effects() {
        let store = Rc::new(ProjectState::new());
        let results = Rc::new(RefCell::new(Vec::new()));

        let inner = Rc::clone(&store);
        let sink = Rc::clone(&results);
        store
            .subscribe(move |snapshot| {
                let add = inner.add_project("nested", "nested", 1).map(|_| ());
                let first = snapshot[0].id();
                let moved = inner
                    .move_project(first, ProjectStatus::Finished)
                    .map(|_| ());
                let subscribed = inner.subscribe(|_| {});
                sink.borrow_mut().extend([add, moved, subscribed]);
            })
            .expect("subscribe");

        store.add_project("A", "desc!", 1).expect("outer add");

        assert_eq!(
            *results.borrow(),
            vec![Err(StateError::NotificationInProgress); 3]
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.listener_count(), 1);
        assert_eq!(store.projects()[0].status, ProjectStatus::Active);
    }
}
