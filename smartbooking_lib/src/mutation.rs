//! Mutation coordinator: runs create/update/delete/enable/disable against a
//! resource, then refreshes the owning list from the server.
//!
//! The list is never patched locally. A successful mutation triggers one
//! `reload()` of the current query; a failed one changes nothing.

use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use smartbooking_api::types::RecordId;

use crate::config::default_utc_offset;
use crate::controller::ListController;
use crate::error::AdminError;
use crate::notify::{Notification, Notifier};
use crate::resource::ResourceAccess;
use crate::validation::FormModel;

/// A single write against a resource.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest<F> {
    Create(F),
    Update(RecordId, F),
    Delete(Vec<RecordId>),
    SetActive(Vec<RecordId>, bool),
}

pub struct MutationCoordinator<R: ResourceAccess> {
    controller: Arc<ListController<R>>,
    utc_offset: FixedOffset,
}

impl<R: ResourceAccess> MutationCoordinator<R> {
    /// Creation timestamps are stamped at UTC+7 until
    /// [`with_utc_offset`](Self::with_utc_offset) says otherwise.
    pub fn new(controller: Arc<ListController<R>>) -> Self {
        Self {
            controller,
            utc_offset: default_utc_offset(),
        }
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn controller(&self) -> &Arc<ListController<R>> {
        &self.controller
    }

    fn resource(&self) -> &R {
        self.controller.resource()
    }

    fn notifier(&self) -> &Arc<dyn Notifier> {
        self.controller.notifier()
    }

    fn check(&self, form: &R::Form) -> Result<(), AdminError> {
        form.validate().map_err(|errors| {
            tracing::debug!("{} form rejected: {}", self.resource().label(), errors);
            self.notifier().notify(Notification::warn(
                "Validation",
                format!("Please fill in: {}", errors.fields().collect::<Vec<_>>().join(", ")),
            ));
            AdminError::Validation(errors)
        })
    }

    fn fail(&self, action: &str, err: smartbooking_api::Error) -> AdminError {
        tracing::error!("Failed to {} {}: {}", action, self.resource().label(), err);
        self.notifier().notify(Notification::error(format!(
            "Failed to {} {}",
            action,
            self.resource().label().to_lowercase()
        )));
        AdminError::Api(err)
    }

    async fn succeed(&self, detail: String) {
        self.notifier().notify(Notification::success(detail));
        self.controller.reload().await;
    }

    /// Validates and creates a record. On success the form is reset to its
    /// default shape and the list reloads.
    pub async fn create(&self, form: &mut R::Form) -> Result<(), AdminError> {
        self.check(form)?;
        let now = Utc::now().with_timezone(&self.utc_offset);
        let payload = form.prepare_for_create(now);
        self.resource()
            .create(&payload)
            .await
            .map_err(|e| self.fail("create", e))?;
        *form = R::Form::default();
        self.succeed(format!("{} created successfully", self.resource().label()))
            .await;
        Ok(())
    }

    /// Validates and updates a record. On success the form is reset and the list reloads.
    pub async fn update(&self, id: RecordId, form: &mut R::Form) -> Result<(), AdminError> {
        self.check(form)?;
        self.resource()
            .update(id, form)
            .await
            .map_err(|e| self.fail("update", e))?;
        *form = R::Form::default();
        self.succeed(format!("{} updated successfully", self.resource().label()))
            .await;
        Ok(())
    }

    /// Deletes the given records in one call. An empty set does nothing.
    pub async fn delete(&self, ids: &[RecordId]) -> Result<(), AdminError> {
        if ids.is_empty() {
            tracing::debug!("Delete of zero {} records skipped", self.resource().label());
            return Ok(());
        }
        self.resource()
            .delete(ids)
            .await
            .map_err(|e| self.fail("delete", e))?;
        self.controller.clear_selection();
        self.succeed(format!(
            "{} {} deleted successfully",
            ids.len(),
            plural(self.resource().label(), ids.len())
        ))
        .await;
        Ok(())
    }

    /// Enables or disables the given records in one call. An empty set does nothing.
    pub async fn set_active(&self, ids: &[RecordId], active: bool) -> Result<(), AdminError> {
        let action = if active { "enable" } else { "disable" };
        if ids.is_empty() {
            tracing::debug!("{} of zero {} records skipped", action, self.resource().label());
            return Ok(());
        }
        self.resource()
            .set_active(ids, active)
            .await
            .map_err(|e| self.fail(action, e))?;
        self.controller.clear_selection();
        self.succeed(format!(
            "{} {} {}d",
            ids.len(),
            plural(self.resource().label(), ids.len()),
            action
        ))
        .await;
        Ok(())
    }

    /// Runs any [`MutationRequest`]. Create/update payloads are consumed.
    pub async fn execute(&self, request: MutationRequest<R::Form>) -> Result<(), AdminError> {
        match request {
            MutationRequest::Create(mut form) => self.create(&mut form).await,
            MutationRequest::Update(id, mut form) => self.update(id, &mut form).await,
            MutationRequest::Delete(ids) => self.delete(&ids).await,
            MutationRequest::SetActive(ids, active) => self.set_active(&ids, active).await,
        }
    }

    /// Deletes whatever is currently selected in the list.
    pub async fn delete_selected(&self) -> Result<(), AdminError> {
        let ids = self.controller.selected_ids();
        self.delete(&ids).await
    }

    /// Enables or disables whatever is currently selected in the list.
    pub async fn set_active_selected(&self, active: bool) -> Result<(), AdminError> {
        let ids = self.controller.selected_ids();
        self.set_active(&ids, active).await
    }
}

fn plural(label: &str, count: usize) -> String {
    let lower = label.to_lowercase();
    if count == 1 {
        lower
    } else {
        format!("{}s", lower)
    }
}
