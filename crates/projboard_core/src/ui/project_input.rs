//! Project input form.
//!
//! # Responsibility
//! - Hold the three raw form fields.
//! - Validate them and create a project on submit.
//!
//! # Invariants
//! - The store is only called when every field passes validation.
//! - Fields are cleared after a successful submit and kept after a failure.

use crate::config::InputRules;
use crate::model::project::ProjectId;
use crate::state::project_state::ProjectState;
use crate::state::StateError;
use crate::ui::{Component, Host};
use crate::validation::{coerce_number, validate, FieldValue};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Message shown to the user when the form is rejected.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input, please try again!";

/// Form field names, also used in error reports.
pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PEOPLE: &str = "people";

/// Submit errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// One or more fields failed validation; the store was not called.
    Invalid { fields: Vec<&'static str> },
    State(StateError),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid { .. } => f.write_str(INVALID_INPUT_MESSAGE),
            Self::State(err) => write!(f, "{err}"),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::State(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<StateError> for InputError {
    fn from(value: StateError) -> Self {
        Self::State(value)
    }
}

/// Rendered form content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormView {
    pub element_id: String,
    pub title: String,
    pub description: String,
    pub people: String,
}

/// Validated form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub title: String,
    pub description: String,
    pub people: u32,
}

/// The "add project" form.
pub struct ProjectInput {
    element_id: String,
    store: Rc<ProjectState>,
    rules: InputRules,
    title: String,
    description: String,
    people: String,
}

impl ProjectInput {
    /// Builds the form and attaches it at the start of `host`.
    pub fn new(store: Rc<ProjectState>, rules: InputRules, host: &mut Host) -> Self {
        let mut input = Self {
            element_id: "user-input".to_string(),
            store,
            rules,
            title: String::new(),
            description: String::new(),
            people: String::new(),
        };
        host.attach(input.element_id.clone(), true);
        input.render_content();
        input
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_people(&mut self, value: impl Into<String>) {
        self.people = value.into();
    }

    pub fn view(&self) -> InputFormView {
        InputFormView {
            element_id: self.element_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            people: self.people.clone(),
        }
    }

    /// Validates the form and, when valid, adds the project to the store.
    ///
    /// # Errors
    /// - `InputError::Invalid` when any field fails; the store is untouched.
    /// - `InputError::State` when called from inside a store listener.
    pub fn submit(&mut self) -> Result<ProjectId, InputError> {
        let input = match self.gather_user_input() {
            Ok(input) => input,
            Err(err) => {
                if let InputError::Invalid { fields } = &err {
                    info!(
                        "event=project_submit module=ui status=rejected fields={}",
                        fields.join(",")
                    );
                }
                return Err(err);
            }
        };

        let id = self
            .store
            .add_project(input.title, input.description, input.people)?;
        info!("event=project_submit module=ui status=ok project_id={id}");
        self.clear_inputs();
        Ok(id)
    }

    /// Trims and validates all three fields.
    pub fn gather_user_input(&self) -> Result<UserInput, InputError> {
        let title = self.title.trim();
        let description = self.description.trim();
        let people = coerce_number(self.people.trim());

        let checks = [
            (FIELD_TITLE, self.rules.title.check(title)),
            (FIELD_DESCRIPTION, self.rules.description.check(description)),
            (FIELD_PEOPLE, self.rules.people.check(FieldValue::Number(people))),
        ];
        let mut fields = checks
            .iter()
            .filter(|(_, check)| !validate(check))
            .map(|(name, _)| *name)
            .collect::<Vec<_>>();

        let people_count = people_count(people);
        if people_count.is_none() && !fields.contains(&FIELD_PEOPLE) {
            fields.push(FIELD_PEOPLE);
        }

        match people_count {
            Some(people) if fields.is_empty() => Ok(UserInput {
                title: title.to_string(),
                description: description.to_string(),
                people,
            }),
            _ => Err(InputError::Invalid { fields }),
        }
    }

    fn clear_inputs(&mut self) {
        self.title.clear();
        self.description.clear();
        self.people.clear();
        debug!("event=form_reset module=ui status=ok");
    }
}

impl Component for ProjectInput {
    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn render_content(&mut self) {}
}

/// A whole, positive people count that fits the model.
fn people_count(value: f64) -> Option<u32> {
    let in_range = value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX);
    if in_range && value.fract() == 0.0 {
        Some(value as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{people_count, InputError, ProjectInput, FIELD_DESCRIPTION, FIELD_PEOPLE};
    use crate::config::InputRules;
    use crate::state::project_state::ProjectState;
    use crate::ui::Host;
    use std::rc::Rc;

    fn form(store: &Rc<ProjectState>) -> ProjectInput {
        ProjectInput::new(Rc::clone(store), InputRules::default(), &mut Host::new("app"))
    }

    #[test]
    fn valid_submit_adds_trimmed_project_and_clears_fields() {
        let store = Rc::new(ProjectState::new());
        let mut input = form(&store);
        input.set_title("  Launch  ");
        input.set_description(" Ship the thing ");
        input.set_people(" 3 ");

        let id = input.submit().expect("valid form");
        let project = store.get(id).expect("stored");
        assert_eq!(project.title, "Launch");
        assert_eq!(project.description, "Ship the thing");
        assert_eq!(project.people, 3);

        let view = input.view();
        assert!(view.title.is_empty() && view.description.is_empty() && view.people.is_empty());
    }

    #[test]
    fn invalid_submit_reports_fields_and_keeps_store_untouched() {
        let store = Rc::new(ProjectState::new());
        let mut input = form(&store);
        input.set_title("T");
        input.set_description("shrt");
        input.set_people("9");

        let err = input.submit().expect_err("invalid form");
        assert_eq!(
            err,
            InputError::Invalid {
                fields: vec![FIELD_DESCRIPTION, FIELD_PEOPLE]
            }
        );
        assert_eq!(err.to_string(), "Invalid input, please try again!");
        assert!(store.is_empty());
        assert_eq!(input.view().title, "T");
    }

    #[test]
    fn fractional_people_count_is_rejected() {
        let store = Rc::new(ProjectState::new());
        let mut input = form(&store);
        input.set_title("T");
        input.set_description("long enough");
        input.set_people("2.5");

        let err = input.submit().expect_err("fractional people");
        assert_eq!(
            err,
            InputError::Invalid {
                fields: vec![FIELD_PEOPLE]
            }
        );
        assert!(store.is_empty());
    }

    #[test]
    fn people_count_requires_positive_whole_number() {
        assert_eq!(people_count(1.0), Some(1));
        assert_eq!(people_count(0.0), None);
        assert_eq!(people_count(-2.0), None);
        assert_eq!(people_count(f64::NAN), None);
        assert_eq!(people_count(f64::INFINITY), None);
    }
}
