//! Admin Shell Example
//!
//! Loads the configured plugins and prints what the admin would render:
//! the composed navigation tree, the section plan of each page, and the
//! product payload after the load and save hook chains.
//!
//! # Usage
//!
//! ```bash
//! VITRINE_PLUGINS=freight,freight-labels cargo run --package admin-shell
//! cargo run --package admin-shell -- --profile production --page admin/store/orders/detail
//! ```

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};
use vitrine::prelude::*;
use vitrine_freight as _;

#[derive(Debug, Parser)]
#[command(name = "admin-shell", about = "Preview the Vitrine admin with plugins applied")]
struct Args {
    /// Configuration file (defaults to searching for vitrine.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile (development, production, ...).
    #[arg(short, long)]
    profile: Option<String>,

    /// Pages to print; every known page when omitted.
    #[arg(long = "page")]
    pages: Vec<String>,

    /// Use the public plugin list instead of the admin one.
    #[arg(long)]
    public: bool,
}

fn base_menu() -> Vec<MenuNode> {
    vec![
        MenuNode::new("dashboard", "Dashboard").with_path("/admin"),
        MenuNode::new("catalog", "Catalog")
            .with_path("/admin/store/products")
            .child(MenuNode::new("products", "Products").with_path("/admin/store/products"))
            .child(MenuNode::new("categories", "Categories").with_path("/admin/store/categories")),
        MenuNode::new("orders", "Orders").with_path("/admin/store/orders"),
        MenuNode::new("customers", "Customers").with_path("/admin/store/customers"),
        MenuNode::new("reports", "Reports").with_path("/admin/reports"),
        MenuNode::new("settings", "Settings").with_path("/admin/settings"),
    ]
}

fn print_menu(nodes: &[MenuNode], depth: usize) {
    for node in nodes {
        let path = node.path.as_deref().unwrap_or("");
        println!("{:indent$}- {} [{}] {}", "", node.label, node.id, path, indent = depth * 2);
        print_menu(&node.children, depth + 1);
    }
}

fn print_plan(layout: &PageSections) {
    println!("\n{}", layout.page);
    for slot in layout.plan() {
        match slot {
            SectionSlot::Inserted(ext) => println!(
                "  + {} ({})",
                ext.component.as_ref().map_or("?", |c| c.name.as_str()),
                ext.extension_id.as_deref().unwrap_or("-"),
            ),
            SectionSlot::Default(id) => println!("    {id}"),
            SectionSlot::Replaced { id, extension } => println!(
                "  ~ {id} -> {} ({})",
                extension.component.as_ref().map_or("?", |c| c.name.as_str()),
                extension.extension_id.as_deref().unwrap_or("-"),
            ),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut builder = Vitrine::builder().init_logging();
    if let Some(path) = &args.config {
        builder = builder.config_file(path);
    }
    if let Some(profile) = &args.profile {
        builder = builder.profile(profile);
    }
    let vitrine = builder.build()?;

    let set = if args.public {
        vitrine.load_public().await
    } else {
        vitrine.load_server().await
    };
    for skipped in set.report().skipped() {
        warn!(plugin_id = skipped.plugin_id(), "{skipped}");
    }
    info!(extensions = ?set.ids(), profile = %vitrine.profile(), "Extensions ready");

    println!("Navigation");
    print_menu(&vitrine.navigation(&base_menu(), &set), 1);

    let pages: Vec<String> = if args.pages.is_empty() {
        vitrine.defaults().iter().map(|(page, _)| page.to_string()).collect()
    } else {
        args.pages.clone()
    };
    for page in &pages {
        print_plan(&vitrine.page_sections(page, Some(&set)));
    }

    let page = "admin/store/products/edit";
    let hooks = vitrine.data_hooks(page, &set);
    if !hooks.is_empty() {
        let loaded = hooks
            .run_on_load(json!({ "id": "p_1", "title": "Shipping crate", "weight": 1250 }))
            .await
            .map_err(|e| anyhow!(e))?;
        println!("\n{page} on load: {loaded}");

        let submitted = hooks.run_on_save(loaded).await.map_err(|e| anyhow!(e))?;
        println!("{page} on save: {submitted}");

        let context = SaveContext::new(page, submitted).with_entity_id("p_1");
        hooks
            .run_after_save(context)
            .await
            .map_err(|e| anyhow!(e))?;
    }

    Ok(())
}
