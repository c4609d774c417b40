use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BoxError;
use crate::priority::Prioritized;

/// Result of a single data hook.
pub type HookResult<T> = Result<T, BoxError>;

/// Asynchronous transform applied to data after it is fetched.
pub type OnLoadFn = Arc<dyn Fn(Value) -> BoxFuture<'static, HookResult<Value>> + Send + Sync>;

/// Asynchronous transform applied to data before it is submitted.
pub type OnSaveFn = Arc<dyn Fn(Value) -> BoxFuture<'static, HookResult<Value>> + Send + Sync>;

/// Synchronous transform applied before [`OnSaveFn`].
pub type TransformFn = Arc<dyn Fn(Value) -> HookResult<Value> + Send + Sync>;

/// Side effect run after the primary entity was saved.
pub type AfterSaveFn =
    Arc<dyn Fn(Arc<SaveContext>) -> BoxFuture<'static, HookResult<()>> + Send + Sync>;

/// What an `after_save` hook learns about the completed save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveContext {
    /// Page that performed the save.
    pub page: String,
    /// Identifier of the saved entity, when the backend returned one.
    #[serde(default)]
    pub entity_id: Option<String>,
    /// The payload as submitted (after the save transforms).
    pub data: Value,
    /// The backend response body.
    #[serde(default)]
    pub response: Value,
}

impl SaveContext {
    /// Creates a context for `page` with the submitted `data`.
    pub fn new(page: impl Into<String>, data: Value) -> Self {
        Self {
            page: page.into(),
            entity_id: None,
            data,
            response: Value::Null,
        }
    }

    /// Sets the saved entity's identifier.
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Sets the backend response.
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }
}

/// Load/save callbacks an extension registers for one page.
#[derive(Clone)]
pub struct DataHookExtension {
    /// Page identifier the hooks belong to.
    pub page: String,
    pub on_load: Option<OnLoadFn>,
    pub transform_data: Option<TransformFn>,
    pub on_save: Option<OnSaveFn>,
    pub after_save: Option<AfterSaveFn>,
    /// Priority override; falls back to the owning extension's priority.
    pub priority: Option<i32>,
    /// Identifier of the owning extension, set when the snapshot is flattened.
    pub extension_id: Option<String>,
}

impl DataHookExtension {
    /// Creates an empty hook set for `page`.
    pub fn new(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            on_load: None,
            transform_data: None,
            on_save: None,
            after_save: None,
            priority: None,
            extension_id: None,
        }
    }

    /// Sets the load transform.
    pub fn on_load<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<Value>> + Send + 'static,
    {
        self.on_load = Some(Arc::new(move |data| f(data).boxed()));
        self
    }

    /// Sets the synchronous pre-save transform.
    pub fn transform_data<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> HookResult<Value> + Send + Sync + 'static,
    {
        self.transform_data = Some(Arc::new(f));
        self
    }

    /// Sets the asynchronous save transform.
    pub fn on_save<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<Value>> + Send + 'static,
    {
        self.on_save = Some(Arc::new(move |data| f(data).boxed()));
        self
    }

    /// Sets the post-save side effect.
    pub fn after_save<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Arc<SaveContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult<()>> + Send + 'static,
    {
        self.after_save = Some(Arc::new(move |ctx| f(ctx).boxed()));
        self
    }

    /// Sets the priority override.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// `true` when no callback is set.
    pub fn is_empty(&self) -> bool {
        self.on_load.is_none()
            && self.transform_data.is_none()
            && self.on_save.is_none()
            && self.after_save.is_none()
    }
}

impl Prioritized for DataHookExtension {
    fn priority_override(&self) -> Option<i32> {
        self.priority
    }
}

impl fmt::Debug for DataHookExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataHookExtension")
            .field("page", &self.page)
            .field("on_load", &self.on_load.is_some())
            .field("transform_data", &self.transform_data.is_some())
            .field("on_save", &self.on_save.is_some())
            .field("after_save", &self.after_save.is_some())
            .field("priority", &self.priority)
            .field("extension_id", &self.extension_id)
            .finish()
    }
}
