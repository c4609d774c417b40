//! The [`Vitrine`] facade the admin shell talks to.
//!
//! ```rust,ignore
//! use vitrine_runtime::Vitrine;
//!
//! let vitrine = Vitrine::builder().profile("production").init_logging().build()?;
//! let set = vitrine.load_server().await;
//! let nav = vitrine.navigation(&base_menu, &set);
//! let layout = vitrine.page_sections("products/new", Some(&set));
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};
use vitrine_core::{Component, MenuNode};
use vitrine_framework::{
    DataHooks, DefaultSections, NavComposer, PageSections, RenderedSection, SectionComposer,
};

use crate::cache::{CachePolicy, SectionCache};
use crate::config::{ConfigLoader, ConfigResult, Profile, VitrineConfig, validate_config};
use crate::loader::{ExtensionLoader, ExtensionSource, LoaderTable};
use crate::logging;
use crate::snapshot::ExtensionSet;

/// Loads extensions and composes navigation, page layouts and data hooks.
pub struct Vitrine {
    config: VitrineConfig,
    profile: Profile,
    loader: ExtensionLoader,
    defaults: DefaultSections,
    sections: SectionCache,
}

impl std::fmt::Debug for Vitrine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vitrine")
            .field("profile", &self.profile)
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

impl Vitrine {
    pub fn builder() -> VitrineBuilder {
        VitrineBuilder::new()
    }

    /// Creates a facade over every registered extension.
    pub fn from_config(config: VitrineConfig, profile: Profile) -> Self {
        Self::with_source(config, profile, Arc::new(LoaderTable::collect_all()))
    }

    /// Creates a facade resolving identifiers through `source`.
    pub fn with_source(
        config: VitrineConfig,
        profile: Profile,
        source: Arc<dyn ExtensionSource>,
    ) -> Self {
        let loader = ExtensionLoader::from_arc(source)
            .with_plugins(config.plugins.iter())
            .with_cache(CachePolicy::from_config(&config.cache, &profile));
        let defaults = DefaultSections::builtin().merge(&DefaultSections::from(config.pages.clone()));

        info!(
            profile = %profile,
            plugins = %config.plugins,
            public_plugins = %config.public_plugins,
            cache = loader.cache_policy().enabled,
            "Vitrine initialized"
        );

        Self {
            config,
            profile,
            loader,
            defaults,
            sections: SectionCache::new(),
        }
    }

    pub fn config(&self) -> &VitrineConfig {
        &self.config
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn defaults(&self) -> &DefaultSections {
        &self.defaults
    }

    pub fn loader(&self) -> &ExtensionLoader {
        &self.loader
    }

    /// Loads `ids`, or the server plugin list when `None`.
    pub async fn load(&self, ids: Option<&[String]>) -> Arc<ExtensionSet> {
        self.loader.load(ids).await
    }

    /// Loads the plugins configured for the admin surface.
    pub async fn load_server(&self) -> Arc<ExtensionSet> {
        self.loader.load(Some(self.config.plugins.as_slice())).await
    }

    /// Loads the plugins configured for the public surface.
    pub async fn load_public(&self) -> Arc<ExtensionSet> {
        self.loader
            .load(Some(self.config.public_plugins.as_slice()))
            .await
    }

    /// Drops cached sets and memoized layouts.
    pub fn invalidate(&self) {
        self.loader.invalidate();
        self.sections.clear();
    }

    fn nav_composer(&self) -> NavComposer {
        NavComposer::new()
            .default_priority(self.config.navigation.default_priority)
            .warn_missing_targets(self.profile.is_development())
    }

    /// Applies the set's navigation contributions to `base`.
    pub fn navigation(&self, base: &[MenuNode], set: &ExtensionSet) -> Vec<MenuNode> {
        self.nav_composer().apply(base, &set.nav_extensions())
    }

    /// Resolves the layout of `page`, memoized per set.
    ///
    /// Without a set the page falls back to its default sections. Section
    /// conditions are evaluated once, when the layout is first resolved for
    /// a set; call [`invalidate`](Self::invalidate) to re-evaluate them.
    pub fn page_sections(&self, page: &str, set: Option<&ExtensionSet>) -> Arc<PageSections> {
        let Some(set) = set else {
            debug!(page = %page, "No extension context, using default sections");
            return Arc::new(PageSections::fallback(page, &self.defaults));
        };
        self.sections
            .get_or_insert_with(set.generation(), page, || {
                SectionComposer::new()
                    .default_priority(self.config.navigation.default_priority)
                    .resolve(page, &set.section_extensions(), &self.defaults)
            })
    }

    /// Decides what renders for section `id` of `page`.
    pub fn render_section(
        &self,
        page: &str,
        set: Option<&ExtensionSet>,
        id: &str,
        default: &Component,
        props: Option<&Value>,
    ) -> Option<RenderedSection> {
        self.page_sections(page, set).render(id, default, props)
    }

    /// The data hook chains registered for `page`.
    pub fn data_hooks(&self, page: &str, set: &ExtensionSet) -> DataHooks {
        DataHooks::with_default_priority(
            page,
            &set.data_hooks(),
            self.config.navigation.default_priority,
        )
    }
}

/// Builder loading configuration before creating a [`Vitrine`].
#[derive(Default)]
pub struct VitrineBuilder {
    config_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
    profile: Option<String>,
    config: Option<VitrineConfig>,
    source: Option<Arc<dyn ExtensionSource>>,
    load_env: bool,
    init_logging: bool,
}

impl VitrineBuilder {
    pub fn new() -> Self {
        Self {
            load_env: true,
            ..Default::default()
        }
    }

    /// Loads this file instead of searching for one.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Searches `path` for configuration files.
    pub fn search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// Overrides `VITRINE_PROFILE`.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Uses `config` as the programmatic base.
    pub fn config(mut self, config: VitrineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolves identifiers through `source` instead of the registry.
    pub fn source(mut self, source: impl ExtensionSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Installs the global subscriber from the loaded logging config.
    pub fn init_logging(mut self) -> Self {
        self.init_logging = true;
        self
    }

    /// Loads and validates configuration, then creates the facade.
    pub fn build(self) -> ConfigResult<Vitrine> {
        let mut loader = ConfigLoader::new();
        if let Some(profile) = &self.profile {
            loader = loader.profile(profile);
        }
        if let Some(path) = &self.config_file {
            loader = loader.file(path);
        }
        for path in &self.search_paths {
            loader = loader.search_path(path);
        }
        if let Some(config) = self.config {
            loader = loader.merge(config);
        }
        if !self.load_env {
            loader = loader.without_env();
        }
        let profile = loader.active_profile().clone();

        let config = loader.load()?;
        validate_config(&config)?;

        if self.init_logging {
            logging::init_from_config(&config.logging);
        }

        let source = match self.source {
            Some(source) => source,
            None => Arc::new(LoaderTable::collect_all()),
        };
        Ok(Vitrine::with_source(config, profile, source))
    }
}
