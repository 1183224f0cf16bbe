//! Order analytics
//!
//! The four descriptive aggregations computed over an uploaded order
//! export, plus the shared predicate that keeps shipping and purchase
//! protection line items out of the product tallies.
//!
//! Each aggregation is a single stateless pass over the parsed order list.
//! Results are `serde_json` maps so the tally ordering (ascending sizes,
//! bin order, descending counts) survives into the HTTP response.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::{LineItem, Order};
use crate::error::AnalyticsError;

/// An ordered label-to-count tally
pub type CountMap = serde_json::Map<String, Value>;

/// Number of price buckets in the total-price histogram
pub const PRICE_BUCKETS: usize = 7;

/// Substrings marking a line item as shipping/protection rather than product
const EXCLUDED_TERMS: [&str; 3] = ["shipping", "protection", "insurance"];

/// All four aggregations for one uploaded export
#[derive(Debug, Serialize)]
pub struct OrderAnalytics {
    pub order_sizes: CountMap,
    pub price_ranges: CountMap,
    pub product_categories: CountMap,
    pub product_types: CountMap,
}

/// Compute every aggregation over one parsed order list.
pub fn analyze(orders: &[Order]) -> Result<OrderAnalytics, AnalyticsError> {
    Ok(OrderAnalytics {
        order_sizes: order_size_counts(orders),
        price_ranges: price_range_counts(orders)?,
        product_categories: product_category_counts(orders),
        product_types: product_type_counts(orders),
    })
}

/// Whether a line item counts toward product analytics.
///
/// Shipping fees, purchase protection, and insurance are sold as line items
/// in the export but are not products; a substring match on the product type
/// and the line-item title filters them out, case-insensitively.
pub fn is_not_shipping_protection(item: &LineItem) -> bool {
    let title = item.title.to_lowercase();
    let product_type = item
        .product
        .as_ref()
        .and_then(|p| p.product_type.as_deref())
        .unwrap_or("")
        .to_lowercase();

    !EXCLUDED_TERMS
        .iter()
        .any(|term| product_type.contains(term) || title.contains(term))
}

/// Order-size distribution: for each order, the summed quantity of its
/// qualifying line items, tallied by size with keys ascending.
pub fn order_size_counts(orders: &[Order]) -> CountMap {
    let mut tally: BTreeMap<u64, u64> = BTreeMap::new();
    for order in orders {
        let size: u64 = order
            .items()
            .filter(|item| is_not_shipping_protection(item))
            .map(|item| u64::from(item.quantity))
            .sum();
        *tally.entry(size).or_insert(0) += 1;
    }

    tally
        .into_iter()
        .map(|(size, count)| (size.to_string(), Value::from(count)))
        .collect()
}

/// Total-price histogram: 7 evenly spaced buckets between the lowest total
/// (rounded down to a ten) and the 90th percentile (rounded up to a ten).
///
/// Orders above the top edge, the most expensive decile, fall outside every
/// bucket and stay uncounted. All 7 labels are always present, zero counts
/// included.
pub fn price_range_counts(orders: &[Order]) -> Result<CountMap, AnalyticsError> {
    let mut prices = orders
        .iter()
        .map(Order::total_price)
        .collect::<Result<Vec<f64>, _>>()?;
    if prices.is_empty() {
        return Err(AnalyticsError::NoOrders);
    }
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let min_price = (prices[0] / 10.0).floor() * 10.0;
    let mut max_price = (percentile_90(&prices) / 10.0).ceil() * 10.0;
    if max_price <= min_price {
        // All totals round onto one edge; widen so the buckets keep width.
        max_price = min_price + 10.0;
    }

    let edges: Vec<f64> = (0..=PRICE_BUCKETS)
        .map(|i| min_price + (max_price - min_price) * i as f64 / PRICE_BUCKETS as f64)
        .collect();

    let mut counts = [0u64; PRICE_BUCKETS];
    for &price in &prices {
        for i in 0..PRICE_BUCKETS {
            // Buckets are (lo, hi]; the lowest edge is inclusive.
            let above_lo = if i == 0 {
                price >= edges[0]
            } else {
                price > edges[i]
            };
            if above_lo && price <= edges[i + 1] {
                counts[i] += 1;
                break;
            }
        }
    }

    Ok((0..PRICE_BUCKETS)
        .map(|i| {
            let label = format!("${}-${}", edges[i] as i64, edges[i + 1] as i64);
            (label, Value::from(counts[i]))
        })
        .collect())
}

/// Product-category distribution over qualifying line items, descending by
/// count. A category object without a name tallies as `"Unknown"`; items
/// with no product or no category are skipped.
pub fn product_category_counts(orders: &[Order]) -> CountMap {
    tally_descending(qualifying_items(orders).filter_map(|item| {
        let category = item.product.as_ref()?.category.as_ref()?;
        Some(category.name.clone().unwrap_or_else(|| "Unknown".to_string()))
    }))
}

/// Product-type distribution over qualifying line items, descending by
/// count. A missing product or empty type tallies as `"Undefined"`.
pub fn product_type_counts(orders: &[Order]) -> CountMap {
    tally_descending(qualifying_items(orders).map(|item| {
        item.product
            .as_ref()
            .and_then(|p| p.product_type.as_deref())
            .filter(|t| !t.is_empty())
            .unwrap_or("Undefined")
            .to_string()
    }))
}

fn qualifying_items(orders: &[Order]) -> impl Iterator<Item = &LineItem> {
    orders
        .iter()
        .flat_map(Order::items)
        .filter(|item| is_not_shipping_protection(item))
}

/// 90th percentile with linear interpolation between the two nearest ranks.
fn percentile_90(sorted: &[f64]) -> f64 {
    let rank = 0.9 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

/// Count occurrences, ordered by descending count; ties keep first-seen
/// order.
fn tally_descending(values: impl Iterator<Item = String>) -> CountMap {
    let mut pairs: Vec<(String, u64)> = Vec::new();
    for value in values {
        match pairs.iter_mut().find(|(label, _)| *label == value) {
            Some((_, count)) => *count += 1,
            None => pairs.push((value, 1)),
        }
    }
    pairs.sort_by(|a, b| b.1.cmp(&a.1));

    pairs
        .into_iter()
        .map(|(label, count)| (label, Value::from(count)))
        .collect()
}
