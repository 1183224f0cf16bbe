//! Order domain entities
//!
//! Mirrors the shape of the store's GraphQL order export: each order carries
//! a total price set and a connection of line-item edges. Fields the
//! aggregations do not read are ignored during deserialization.

use serde::Deserialize;

use crate::error::AnalyticsError;

/// One order from the export file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub total_price_set: TotalPriceSet,
    #[serde(default)]
    pub line_items: LineItemConnection,
}

impl Order {
    /// Parse the order total into a number usable for bucketing.
    ///
    /// Export amounts arrive as decimal strings like `"42.50"`.
    pub fn total_price(&self) -> Result<f64, AnalyticsError> {
        let amount = &self.total_price_set.shop_money.amount;
        amount
            .trim()
            .parse()
            .map_err(|_| AnalyticsError::InvalidPrice(amount.clone()))
    }

    /// Line items of this order, unwrapped from their connection edges.
    pub fn items(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.edges.iter().map(|edge| &edge.node)
    }
}

/// Price set wrapper around the shop-currency amount
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalPriceSet {
    pub shop_money: MoneyBag,
}

/// A money value, amount kept as the decimal string the export uses
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyBag {
    pub amount: String,
}

/// GraphQL-style connection holding the order's line items
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItemConnection {
    #[serde(default)]
    pub edges: Vec<LineItemEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemEdge {
    pub node: LineItem,
}

/// One product entry within an order
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    /// Units ordered; the export never emits negatives
    pub quantity: u32,
    #[serde(default)]
    pub title: String,
    /// Missing when the product was deleted from the catalog after the sale
    #[serde(default)]
    pub product: Option<Product>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_export_shape() {
        let json = r##"{
            "name": "#1001",
            "totalPriceSet": { "shopMoney": { "amount": "42.50", "currencyCode": "USD" } },
            "lineItems": { "edges": [
                { "node": { "quantity": 2, "title": "Dog Harness",
                            "product": { "productType": "Harness",
                                         "category": { "name": "Pet Supplies" } } } }
            ] }
        }"##;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.total_price().unwrap(), 42.5);

        let items: Vec<_> = order.items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].title, "Dog Harness");
        let product = items[0].product.as_ref().unwrap();
        assert_eq!(product.product_type.as_deref(), Some("Harness"));
        assert_eq!(
            product.category.as_ref().unwrap().name.as_deref(),
            Some("Pet Supplies")
        );
    }

    #[test]
    fn missing_line_items_defaults_to_empty() {
        let json = r#"{ "totalPriceSet": { "shopMoney": { "amount": "10" } } }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.items().count(), 0);
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let json = r#"{
            "totalPriceSet": { "shopMoney": { "amount": "10" } },
            "lineItems": { "edges": [ { "node": { "quantity": -1, "title": "x" } } ] }
        }"#;
        assert!(serde_json::from_str::<Order>(json).is_err());
    }

    #[test]
    fn unparseable_amount_is_an_error() {
        let json = r#"{ "totalPriceSet": { "shopMoney": { "amount": "forty" } } }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.total_price().is_err());
    }
}
