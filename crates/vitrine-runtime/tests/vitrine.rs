use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use futures::FutureExt;
use serde_json::{Value, json};
use vitrine_core::{
    Component, DataHookExtension, Extension, MenuNode, NavExtension, PageSectionExtension,
    SaveContext,
};
use vitrine_framework::{SectionSlot, SectionSource};
use vitrine_macros::register_extension;
use vitrine_runtime::{LoaderTable, PluginList, Profile, Vitrine, VitrineConfig};

const PRODUCT_NEW: &str = "admin/store/products/new";
const CATEGORY_NEW: &str = "admin/store/categories/new";

static AUDITED: AtomicUsize = AtomicUsize::new(0);

#[register_extension("media")]
fn media() -> Extension {
    Extension::new("media")
        .priority(200)
        .section(PageSectionExtension::hide(PRODUCT_NEW, "ProductImage"))
        .nav(NavExtension::after(
            "catalog",
            [MenuNode::new("media", "Media").with_path("/admin/media")],
        ))
}

#[register_extension("seo")]
async fn seo() -> Extension {
    Extension::new("seo")
        .section(PageSectionExtension::after(
            CATEGORY_NEW,
            Component::new("SeoFields"),
        ))
        .section(PageSectionExtension::replace(
            PRODUCT_NEW,
            "ProductDescription",
            Component::new("RichDescription").with_props(json!({ "toolbar": "full" })),
        ))
        .data_hook(
            DataHookExtension::new(PRODUCT_NEW)
                .on_load(|mut data: Value| async move {
                    data["a"] = json!(1);
                    Ok(data)
                })
                .after_save(|_ctx: Arc<SaveContext>| async move {
                    AUDITED.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }),
        )
}

#[register_extension("tags")]
fn tags() -> Extension {
    Extension::new("tags")
        .priority(50)
        .nav(NavExtension::after(
            "catalog",
            [MenuNode::new("tags", "Tags")],
        ))
        .data_hook(DataHookExtension::new(PRODUCT_NEW).on_load(|mut data: Value| async move {
            data["b"] = json!(2);
            Ok(data)
        }))
}

fn vitrine(plugins: &str, public: &str) -> Vitrine {
    let config = VitrineConfig {
        plugins: PluginList::parse(plugins),
        public_plugins: PluginList::parse(public),
        ..Default::default()
    };
    Vitrine::with_source(config, Profile::Production, Arc::new(LoaderTable::collect_all()))
}

fn base_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::new("dashboard", "Dashboard"),
        MenuNode::new("catalog", "Catalog"),
        MenuNode::new("settings", "Settings"),
    ]
}

fn ids(nodes: &[MenuNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.id.as_str()).collect()
}

#[tokio::test]
async fn navigation_is_composed_from_loaded_plugins() {
    let vitrine = vitrine("tags,unknown,media", "");
    let set = vitrine.load_server().await;

    let nav = vitrine.navigation(&base_menu(), &set);
    assert_eq!(
        ids(&nav),
        ["dashboard", "catalog", "media", "tags", "settings"]
    );
}

#[tokio::test]
async fn category_page_gets_appended_section() {
    let vitrine = vitrine("seo", "");
    let set = vitrine.load_server().await;

    let layout = vitrine.page_sections(CATEGORY_NEW, Some(&set));
    assert_eq!(layout.visible, ["CategoryInfo"]);
    assert_eq!(layout.after.len(), 1);
    assert_eq!(
        layout.after[0].component.as_ref().map(|c| c.name.as_str()),
        Some("SeoFields")
    );
}

#[tokio::test]
async fn hidden_and_replaced_product_sections() {
    let vitrine = vitrine("media,seo", "");
    let set = vitrine.load_server().await;
    let layout = vitrine.page_sections(PRODUCT_NEW, Some(&set));

    assert!(!layout.is_visible("ProductImage"));
    assert_eq!(layout.visible.len(), 6);
    assert!(
        vitrine
            .render_section(
                PRODUCT_NEW,
                Some(&set),
                "ProductImage",
                &Component::new("ProductImage"),
                None,
            )
            .is_none()
    );

    let rendered = layout
        .render(
            "ProductDescription",
            &Component::new("ProductDescription"),
            Some(&json!({ "productId": "p_1" })),
        )
        .unwrap();
    assert_eq!(rendered.component.name, "RichDescription");
    assert_eq!(
        rendered.component.props,
        json!({ "toolbar": "full", "productId": "p_1" })
    );
    assert_eq!(rendered.source, SectionSource::Extension(Some("seo".into())));

    let plan = layout.plan();
    assert!(matches!(plan[0], SectionSlot::Default("ProductInformation")));
    assert!(matches!(
        plan[1],
        SectionSlot::Replaced { id: "ProductDescription", .. }
    ));
}

#[tokio::test]
async fn page_sections_are_memoized_per_set() {
    let vitrine = vitrine("media", "");
    let set = vitrine.load_server().await;

    let first = vitrine.page_sections(PRODUCT_NEW, Some(&set));
    let second = vitrine.page_sections(PRODUCT_NEW, Some(&set));
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn reloaded_descriptor_gets_a_fresh_layout() {
    let hide_pricing = Arc::new(AtomicBool::new(false));
    let flag = hide_pricing.clone();
    let table = LoaderTable::new().with_loader("media", move || {
        let target = if flag.load(Ordering::SeqCst) {
            "ProductPricing"
        } else {
            "ProductImage"
        };
        async move {
            Ok(Extension::new("media").section(PageSectionExtension::hide(PRODUCT_NEW, target)))
        }
        .boxed()
    });

    let mut config = VitrineConfig {
        plugins: PluginList::parse("media"),
        ..Default::default()
    };
    config.cache.ttl_secs = 1;
    let vitrine = Vitrine::with_source(config, Profile::Production, Arc::new(table));

    let first = vitrine.load_server().await;
    assert!(!vitrine.page_sections(PRODUCT_NEW, Some(&first)).is_visible("ProductImage"));

    hide_pricing.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let second = vitrine.load_server().await;
    assert!(!Arc::ptr_eq(&first, &second));
    let layout = vitrine.page_sections(PRODUCT_NEW, Some(&second));
    assert!(layout.is_visible("ProductImage"));
    assert!(!layout.is_visible("ProductPricing"));
}

#[tokio::test]
async fn missing_context_falls_back_to_defaults() {
    let vitrine = vitrine("media", "");
    let layout = vitrine.page_sections(PRODUCT_NEW, None);
    assert_eq!(layout.visible.len(), 7);
    assert!(layout.before.is_empty() && layout.after.is_empty());

    assert!(vitrine.page_sections("admin/unknown", None).visible.is_empty());
}

#[tokio::test]
async fn data_hooks_fold_in_priority_order() {
    let vitrine = vitrine("tags,seo", "");
    let set = vitrine.load_server().await;
    let hooks = vitrine.data_hooks(PRODUCT_NEW, &set);
    assert_eq!(hooks.len(), 2);

    let data = hooks.run_on_load(json!({})).await.unwrap();
    assert_eq!(data, json!({ "a": 1, "b": 2 }));

    let before = AUDITED.load(Ordering::SeqCst);
    hooks
        .run_after_save(SaveContext::new(PRODUCT_NEW, data))
        .await
        .unwrap();
    assert_eq!(AUDITED.load(Ordering::SeqCst), before + 1);
}

#[tokio::test]
async fn public_list_is_loaded_separately() {
    let vitrine = vitrine("media,seo", "tags");
    let server = vitrine.load_server().await;
    let public = vitrine.load_public().await;

    assert_eq!(server.ids(), ["media", "seo"]);
    assert_eq!(public.ids(), ["tags"]);
}

#[tokio::test]
async fn extra_pages_from_config_extend_defaults() {
    let mut config = VitrineConfig::default();
    config
        .pages
        .insert("admin/store/reviews".into(), vec!["ReviewList".into()]);
    let vitrine = Vitrine::with_source(config, Profile::Production, Arc::new(LoaderTable::new()));

    let layout = vitrine.page_sections("admin/store/reviews", None);
    assert_eq!(layout.visible, ["ReviewList"]);
    assert_eq!(vitrine.defaults().get(CATEGORY_NEW), ["CategoryInfo"]);
}

#[test]
fn builder_validates_configuration() {
    let mut config = VitrineConfig::default();
    config.cache.ttl_secs = 0;

    let result = Vitrine::builder()
        .search_path("/nonexistent/vitrine")
        .without_env()
        .profile("production")
        .config(config)
        .source(LoaderTable::new())
        .build();
    assert!(result.is_err());
}

#[test]
fn builder_uses_requested_profile() {
    let vitrine = Vitrine::builder()
        .search_path("/nonexistent/vitrine")
        .without_env()
        .profile("development")
        .build()
        .unwrap();

    assert!(vitrine.profile().is_development());
    assert!(!vitrine.loader().cache_policy().enabled);
}
