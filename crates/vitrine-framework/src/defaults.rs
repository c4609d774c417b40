//! Default section lists of the admin pages.
//!
//! The composers treat this map as configuration: it is the baseline a page
//! renders when no extension touches it.  Unknown pages have an empty list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from page identifier to its ordered default section ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultSections(BTreeMap<String, Vec<String>>);

const BUILTIN: &[(&str, &[&str])] = &[
    (
        "admin/store/products/new",
        &[
            "ProductInformation",
            "ProductImage",
            "ProductDescription",
            "ProductVariants",
            "ProductPricing",
            "ProductInventory",
            "ProductOrganize",
        ],
    ),
    (
        "admin/store/products/edit",
        &[
            "ProductInformation",
            "ProductImage",
            "ProductDescription",
            "ProductVariants",
            "ProductPricing",
            "ProductInventory",
            "ProductOrganize",
        ],
    ),
    ("admin/store/categories/new", &["CategoryInfo"]),
    ("admin/store/categories/edit", &["CategoryInfo", "CategoryProducts"]),
    (
        "admin/store/orders/detail",
        &[
            "OrderSummary",
            "OrderItems",
            "OrderPayment",
            "OrderShipping",
            "OrderCustomer",
            "OrderHistory",
        ],
    ),
    ("admin/store/customers/new", &["CustomerInfo", "CustomerAddress"]),
    (
        "admin/store/customers/edit",
        &["CustomerInfo", "CustomerAddress", "CustomerOrders"],
    ),
    (
        "admin/settings/general",
        &["StoreInfo", "StoreContact", "StoreCurrency", "StoreLocale"],
    ),
    (
        "admin/settings/checkout",
        &["CheckoutOptions", "PaymentMethods", "ShippingMethods"],
    ),
];

impl DefaultSections {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The section lists of the built-in admin pages.
    pub fn builtin() -> Self {
        Self(
            BUILTIN
                .iter()
                .map(|(page, sections)| {
                    (
                        page.to_string(),
                        sections.iter().map(|s| s.to_string()).collect(),
                    )
                })
                .collect(),
        )
    }

    /// Sets the section list of `page`.
    pub fn with_page<I, S>(mut self, page: impl Into<String>, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .insert(page.into(), sections.into_iter().map(Into::into).collect());
        self
    }

    /// Overlays `other`; its pages replace ours wholesale.
    pub fn merge(mut self, other: &DefaultSections) -> Self {
        for (page, sections) in &other.0 {
            self.0.insert(page.clone(), sections.clone());
        }
        self
    }

    /// The default sections of `page`, empty when the page is unknown.
    pub fn get(&self, page: &str) -> &[String] {
        self.0.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates `(page, sections)` pairs in page order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(page, s)| (page.as_str(), s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for DefaultSections {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}
