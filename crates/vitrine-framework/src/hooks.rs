//! Data hook chain.
//!
//! [`DataHooks`] folds page data through every hook registered for a page,
//! highest priority first.  Steps run strictly one after another: each
//! `on_load`/`on_save` receives the previous step's output.
//!
//! A failing hook aborts the chain.  Its error is returned to the caller
//! unchanged and the remaining hooks do not run.

use std::sync::Arc;

use serde_json::Value;
use tracing::{Instrument, debug_span, error, trace};
use vitrine_core::{
    DEFAULT_PRIORITY, DataHookExtension, HookResult, SaveContext, sort_by_priority,
};

/// The lifecycle stage a hook runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    Load,
    Save,
    AfterSave,
}

impl HookStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Save => "save",
            Self::AfterSave => "after_save",
        }
    }
}

/// The composed hook pipelines of one page.
#[derive(Debug, Clone, Default)]
pub struct DataHooks {
    page: String,
    hooks: Vec<DataHookExtension>,
}

impl DataHooks {
    /// Collects the hooks registered for `page` with [`DEFAULT_PRIORITY`].
    pub fn for_page(page: &str, extensions: &[DataHookExtension]) -> Self {
        Self::with_default_priority(page, extensions, DEFAULT_PRIORITY)
    }

    /// Collects the hooks registered for `page`.
    pub fn with_default_priority(
        page: &str,
        extensions: &[DataHookExtension],
        default_priority: i32,
    ) -> Self {
        let mut hooks: Vec<DataHookExtension> = extensions
            .iter()
            .filter(|hook| hook.page == page)
            .cloned()
            .collect();
        sort_by_priority(&mut hooks, default_priority);
        Self {
            page: page.to_string(),
            hooks,
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    /// Number of hook sets registered for the page.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Applies every `on_load` transform to freshly fetched data.
    pub async fn run_on_load(&self, data: Value) -> HookResult<Value> {
        let span = debug_span!("data_hooks", page = %self.page, stage = HookStage::Load.as_str());
        async {
            let mut data = data;
            for hook in &self.hooks {
                if let Some(on_load) = &hook.on_load {
                    trace!(extension = owner(hook), "Running on_load hook");
                    data = on_load(data)
                        .await
                        .inspect_err(|e| self.report(hook, HookStage::Load, e))?;
                }
            }
            Ok(data)
        }
        .instrument(span)
        .await
    }

    /// Applies `transform_data` then `on_save` of every hook before submit.
    pub async fn run_on_save(&self, data: Value) -> HookResult<Value> {
        let span = debug_span!("data_hooks", page = %self.page, stage = HookStage::Save.as_str());
        async {
            let mut data = data;
            for hook in &self.hooks {
                if let Some(transform) = &hook.transform_data {
                    trace!(extension = owner(hook), "Running transform_data hook");
                    data = transform(data).inspect_err(|e| self.report(hook, HookStage::Save, e))?;
                }
                if let Some(on_save) = &hook.on_save {
                    trace!(extension = owner(hook), "Running on_save hook");
                    data = on_save(data)
                        .await
                        .inspect_err(|e| self.report(hook, HookStage::Save, e))?;
                }
            }
            Ok(data)
        }
        .instrument(span)
        .await
    }

    /// Runs every `after_save` side effect with the same context.
    pub async fn run_after_save(&self, context: impl Into<Arc<SaveContext>>) -> HookResult<()> {
        let context = context.into();
        let span =
            debug_span!("data_hooks", page = %self.page, stage = HookStage::AfterSave.as_str());
        async {
            for hook in &self.hooks {
                if let Some(after_save) = &hook.after_save {
                    trace!(extension = owner(hook), "Running after_save hook");
                    after_save(Arc::clone(&context))
                        .await
                        .inspect_err(|e| self.report(hook, HookStage::AfterSave, e))?;
                }
            }
            Ok(())
        }
        .instrument(span)
        .await
    }

    fn report(&self, hook: &DataHookExtension, stage: HookStage, err: &vitrine_core::BoxError) {
        error!(
            page = %self.page,
            extension = owner(hook),
            stage = stage.as_str(),
            error = %err,
            "Data hook failed, aborting chain"
        );
    }
}

fn owner(hook: &DataHookExtension) -> &str {
    hook.extension_id.as_deref().unwrap_or("<anonymous>")
}
