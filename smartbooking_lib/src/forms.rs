//! Create/edit dialog state shared by every resource screen.

use smartbooking_api::types::RecordId;

use crate::error::AdminError;
use crate::mutation::MutationCoordinator;
use crate::resource::ResourceAccess;
use crate::validation::{FieldErrors, FormModel};

/// State of the create/edit dialog for one resource.
///
/// `open_new` always starts from `F::default()`, so values from a previous
/// edit never leak into a new record.
#[derive(Debug, Clone, Default)]
pub struct FormDialog<F> {
    pub visible: bool,
    pub form: F,
    /// Record being edited; `None` while creating.
    pub editing: Option<RecordId>,
    /// Set once the user has pressed save; drives inline error display.
    pub submitted: bool,
    pub errors: FieldErrors,
}

impl<F: FormModel> FormDialog<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_new(&mut self) {
        self.form = F::default();
        self.editing = None;
        self.submitted = false;
        self.errors = FieldErrors::new();
        self.visible = true;
    }

    pub fn open_edit(&mut self, id: RecordId, form: F) {
        self.form = form;
        self.editing = Some(id);
        self.submitted = false;
        self.errors = FieldErrors::new();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.submitted = false;
        self.visible = false;
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// Saves through the coordinator. Closes on success; stays open with
    /// field errors or after a server failure.
    pub async fn submit<R>(&mut self, coordinator: &MutationCoordinator<R>) -> Result<(), AdminError>
    where
        R: ResourceAccess<Form = F>,
    {
        self.submitted = true;
        let result = match self.editing {
            Some(id) => coordinator.update(id, &mut self.form).await,
            None => coordinator.create(&mut self.form).await,
        };
        match &result {
            Ok(()) => {
                self.errors = FieldErrors::new();
                self.editing = None;
                self.submitted = false;
                self.visible = false;
            }
            Err(AdminError::Validation(errors)) => self.errors = errors.clone(),
            Err(_) => {}
        }
        result
    }
}
