//! Resource-access capability: the one seam between list screens and a backend.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use smartbooking_api::types::{Department, DepartmentForm, ListResult, RecordId, User, UserForm};
use smartbooking_api::{Client, Error, ListQuery, DEPARTMENT_RESOURCE, USER_RESOURCE};

use crate::validation::FormModel;

/// A record that can be selected in a list by its identifier.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> RecordId;
}

impl Record for User {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Record for Department {
    fn id(&self) -> RecordId {
        self.id
    }
}

/// Everything a list screen needs from a backend for one entity type.
#[async_trait]
pub trait ResourceAccess: Send + Sync + 'static {
    type Item: Record;
    type Form: FormModel;

    /// Singular display name, e.g. `"Department"`.
    fn label(&self) -> &str;

    async fn fetch_list(&self, query: &ListQuery) -> Result<ListResult<Self::Item>, Error>;
    async fn create(&self, form: &Self::Form) -> Result<(), Error>;
    async fn update(&self, id: RecordId, form: &Self::Form) -> Result<(), Error>;
    async fn delete(&self, ids: &[RecordId]) -> Result<(), Error>;
    async fn set_active(&self, ids: &[RecordId], active: bool) -> Result<(), Error>;
}

/// A resource served by the SmartBooking REST API under a fixed path.
pub struct RemoteResource<T, F> {
    client: Client,
    path: &'static str,
    label: &'static str,
    _marker: PhantomData<fn() -> (T, F)>,
}

pub type DepartmentResource = RemoteResource<Department, DepartmentForm>;
pub type UserResource = RemoteResource<User, UserForm>;

impl<T, F> RemoteResource<T, F> {
    pub fn new(client: Client, path: &'static str, label: &'static str) -> Self {
        Self {
            client,
            path,
            label,
            _marker: PhantomData,
        }
    }
}

impl DepartmentResource {
    pub fn departments(client: Client) -> Self {
        Self::new(client, DEPARTMENT_RESOURCE, "Department")
    }
}

impl UserResource {
    pub fn users(client: Client) -> Self {
        Self::new(client, USER_RESOURCE, "User")
    }
}

#[async_trait]
impl<T, F> ResourceAccess for RemoteResource<T, F>
where
    T: Record + DeserializeOwned,
    F: FormModel,
{
    type Item = T;
    type Form = F;

    fn label(&self) -> &str {
        self.label
    }

    async fn fetch_list(&self, query: &ListQuery) -> Result<ListResult<T>, Error> {
        self.client.fetch_list(self.path, query).await
    }

    async fn create(&self, form: &F) -> Result<(), Error> {
        self.client.create(self.path, form).await.map(|_| ())
    }

    async fn update(&self, id: RecordId, form: &F) -> Result<(), Error> {
        self.client.update(self.path, id, form).await.map(|_| ())
    }

    async fn delete(&self, ids: &[RecordId]) -> Result<(), Error> {
        self.client.delete_many(self.path, ids).await.map(|_| ())
    }

    async fn set_active(&self, ids: &[RecordId], active: bool) -> Result<(), Error> {
        self.client.set_active(self.path, ids, active).await.map(|_| ())
    }
}
