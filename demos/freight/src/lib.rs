//! Freight rates plugin.
//!
//! Registers two extensions:
//!
//! - `freight`: a Freight menu under Orders, a quote panel on the order page,
//!   a shipping section on product pages, and data hooks that keep product
//!   weights in grams.
//! - `freight-labels`: label printing, only present when a carrier account is
//!   configured through `FREIGHT_CARRIER_ACCOUNT`.
//!
//! Link it into a shell with `use vitrine_freight as _;`.

use serde_json::{Value, json};
use tracing::info;
use vitrine_core::{
    BoxError, Component, DataHookExtension, Extension, HookResult, MenuNode, NavExtension,
    PageSectionExtension,
};
use vitrine_framework::define_extension;
use vitrine_macros::register_extension;

pub const PRODUCT_NEW: &str = "admin/store/products/new";
pub const PRODUCT_EDIT: &str = "admin/store/products/edit";
pub const ORDER_DETAIL: &str = "admin/store/orders/detail";

const CARRIER_ACCOUNT_ENV: &str = "FREIGHT_CARRIER_ACCOUNT";

#[register_extension("freight")]
pub fn freight() -> Extension {
    define_extension! {
        /// Freight rates, carrier settings and parcel weights.
        id: "freight",
        name: "Freight",
        priority: 150,
        navigation: [
            NavExtension::after(
                "orders",
                [MenuNode::new("freight", "Freight")
                    .with_path("/admin/freight")
                    .with_icon("truck")
                    .child(MenuNode::new("freight-rates", "Rates").with_path("/admin/freight/rates"))
                    .child(MenuNode::new("freight-carriers", "Carriers").with_path("/admin/freight/carriers"))],
            ),
        ],
        sections: [
            PageSectionExtension::after(ORDER_DETAIL, Component::new("FreightQuote"))
                .targeting("OrderShipping"),
            PageSectionExtension::replace(
                PRODUCT_EDIT,
                "ProductInventory",
                Component::new("InventoryWithWeight").with_props(json!({ "unit": "g" })),
            ),
            PageSectionExtension::after(PRODUCT_NEW, Component::new("ProductShipping")),
        ],
        data_hooks: [
            weight_hooks(PRODUCT_NEW),
            weight_hooks(PRODUCT_EDIT),
        ],
    }
}

#[register_extension("freight-labels")]
pub async fn freight_labels() -> Result<Extension, BoxError> {
    let account = std::env::var(CARRIER_ACCOUNT_ENV).ok();
    let enabled = account.is_some();
    Ok(Extension::new("freight-labels")
        .name("Freight labels")
        .enabled(enabled)
        .nav(NavExtension::after(
            "freight-rates",
            [MenuNode::new("freight-labels", "Labels").with_path("/admin/freight/labels")],
        ))
        .section(PageSectionExtension::before(
            ORDER_DETAIL,
            Component::new("PrintLabel").with_props(json!({ "account": account })),
        )))
}

/// Product weights are edited in kilograms and stored in grams.
fn weight_hooks(page: &str) -> DataHookExtension {
    DataHookExtension::new(page)
        .on_load(|data: Value| async move { Ok(grams_to_kilograms(data)) })
        .transform_data(kilograms_to_grams)
        .after_save(|ctx| async move {
            info!(
                page = %ctx.page,
                entity_id = ctx.entity_id.as_deref().unwrap_or("-"),
                "Product weight saved"
            );
            Ok(())
        })
}

fn grams_to_kilograms(mut data: Value) -> Value {
    if let Some(grams) = data.get("weight").and_then(Value::as_u64) {
        data["weight_kg"] = json!(grams as f64 / 1000.0);
    }
    data
}

fn kilograms_to_grams(mut data: Value) -> HookResult<Value> {
    let Some(raw) = data.get("weight_kg").cloned() else {
        return Ok(data);
    };
    let kilograms = match &raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null => return Ok(data),
        _ => None,
    }
    .filter(|kg| kg.is_finite() && *kg >= 0.0)
    .ok_or_else(|| format!("invalid weight: {raw}"))?;

    if let Value::Object(map) = &mut data {
        map.remove("weight_kg");
        map.insert("weight".into(), json!((kilograms * 1000.0).round() as u64));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_is_well_formed() {
        let ext = freight();
        assert!(ext.validate().is_ok());
        assert_eq!(ext.display_name(), "Freight");
        assert_eq!(
            ext.metadata().description.as_deref(),
            Some("Freight rates, carrier settings and parcel weights.")
        );
        assert_eq!(ext.data_hooks().len(), 2);
    }

    #[test]
    fn test_weight_round_trips_through_hooks() {
        let loaded = grams_to_kilograms(json!({ "title": "Crate", "weight": 1250 }));
        assert_eq!(loaded["weight_kg"], json!(1.25));

        let saved = kilograms_to_grams(json!({ "title": "Crate", "weight_kg": "2.5" })).unwrap();
        assert_eq!(saved, json!({ "title": "Crate", "weight": 2500 }));
    }

    #[test]
    fn test_invalid_weight_aborts_save() {
        let err = kilograms_to_grams(json!({ "weight_kg": "heavy" })).unwrap_err();
        assert!(err.to_string().contains("invalid weight"));
        assert!(kilograms_to_grams(json!({ "weight_kg": -1 })).is_err());
    }

    #[tokio::test]
    async fn test_labels_follow_carrier_account() {
        // SAFETY: only this test touches the variable
        unsafe {
            std::env::remove_var(CARRIER_ACCOUNT_ENV);
        }
        let ext = freight_labels().await.unwrap();
        assert!(!ext.is_enabled());
    }
}
