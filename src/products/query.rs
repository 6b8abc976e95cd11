//! Filtering, pagination and aggregation over a product sequence.
//!
//! # Design Decisions
//! - Category matching is exact but case-insensitive
//! - Name search is a case-insensitive substring match
//! - `page` and `limit` use lenient leading-integer parsing; unparsable or
//!   zero values fall back to their defaults, negatives are kept
//! - Slicing follows array-slice semantics: negative bounds count from the
//!   end and every bound is clamped to the sequence

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::products::model::{Product, ProductPage, ProductQuery};

/// Apply the category/search filters and the requested page.
pub fn filter_products(products: &[Product], query: &ProductQuery) -> ProductPage {
    let category = non_empty(query.category.as_deref()).map(str::to_lowercase);
    let search = non_empty(query.search.as_deref()).map(str::to_lowercase);

    let filtered: Vec<&Product> = products
        .iter()
        .filter(|p| match &category {
            Some(wanted) => p
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase() == *wanted),
            None => true,
        })
        .filter(|p| match &search {
            Some(needle) => p
                .name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .collect();

    let total = filtered.len();
    let page = parse_leading_int(query.page.as_deref()).unwrap_or(1);
    let limit = parse_leading_int(query.limit.as_deref()).unwrap_or(total as i64);

    let start = page.saturating_sub(1).saturating_mul(limit);
    let end = start.saturating_add(limit);
    let (from, to) = slice_bounds(total, start, end);

    ProductPage {
        total,
        page,
        limit,
        data: filtered[from..to].iter().map(|p| (*p).clone()).collect(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Parse the leading integer of `raw`, ignoring leading whitespace and any
/// trailing garbage. Returns `None` for missing, unparsable, or zero input.
pub fn parse_leading_int(raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_count = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }

    let magnitude = digits[..digit_count]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));
    let value = if negative { -magnitude } else { magnitude };

    (value != 0).then_some(value)
}

/// Resolve `[start, end)` against a sequence of `len` items the way an
/// array slice with relative indices does.
pub fn slice_bounds(len: usize, start: i64, end: i64) -> (usize, usize) {
    let len_i = len as i64;
    let resolve = |idx: i64| -> usize {
        if idx < 0 {
            len_i.saturating_add(idx).max(0) as usize
        } else {
            idx.min(len_i) as usize
        }
    };

    let from = resolve(start);
    let to = resolve(end);
    if to <= from {
        (from, from)
    } else {
        (from, to)
    }
}

/// Product counts per category, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryStats(Vec<(String, usize)>);

impl CategoryStats {
    /// Count products per category.
    ///
    /// A product only loses its category through an update that omitted it;
    /// such products are left out of the counts rather than grouped under a
    /// placeholder key.
    pub fn collect(products: &[Product]) -> Self {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for category in products.iter().filter_map(|p| p.category.as_deref()) {
            match counts.iter_mut().find(|(name, _)| name == category) {
                Some((_, count)) => *count += 1,
                None => counts.push((category.to_string(), 1)),
            }
        }
        Self(counts)
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Number};

    fn product(id: &str, name: &str, category: &str) -> Product {
        Product {
            id: id.into(),
            name: Some(name.into()),
            description: Some("d".into()),
            price: Some(Some(Number::from(1))),
            category: Some(category.into()),
            in_stock: Some(Some(true)),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("a", "Laptop Pro", "Electronics"),
            product("b", "Phone", "electronics"),
            product("c", "Kettle", "kitchen"),
            product("d", "Laptop Stand", "office"),
            product("e", "Gaming Laptop", "ELECTRONICS"),
            product("f", "Tablet", "electronics"),
            product("g", "Laptop Bag", "electronics"),
        ]
    }

    fn query(pairs: &[(&str, &str)]) -> ProductQuery {
        let mut q = ProductQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "category" => q.category = value,
                "search" => q.search = value,
                "page" => q.page = value,
                "limit" => q.limit = value,
                _ => unreachable!(),
            }
        }
        q
    }

    fn ids(page: &ProductPage) -> Vec<&str> {
        page.data.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_no_params_returns_everything_unpaginated() {
        let page = filter_products(&catalog(), &ProductQuery::default());
        assert_eq!(page.total, 7);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 7);
        assert_eq!(page.data.len(), 7);
    }

    #[test]
    fn test_category_is_case_insensitive_exact_match() {
        let page = filter_products(&catalog(), &query(&[("category", "eLeCtRoNiCs")]));
        assert_eq!(ids(&page), vec!["a", "b", "e", "f", "g"]);

        let page = filter_products(&catalog(), &query(&[("category", "electro")]));
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let page = filter_products(&catalog(), &query(&[("search", "LAPTOP")]));
        assert_eq!(ids(&page), vec!["a", "d", "e", "g"]);
    }

    #[test]
    fn test_filters_compose() {
        let page = filter_products(
            &catalog(),
            &query(&[("category", "electronics"), ("search", "laptop")]),
        );
        assert_eq!(ids(&page), vec!["a", "e", "g"]);
    }

    #[test]
    fn test_second_page_of_two() {
        let page = filter_products(
            &catalog(),
            &query(&[("category", "electronics"), ("page", "2"), ("limit", "2")]),
        );
        assert_eq!(page.total, 5);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 2);
        assert_eq!(ids(&page), vec!["e", "f"]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = filter_products(&catalog(), &query(&[("page", "9"), ("limit", "3")]));
        assert_eq!(page.total, 7);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let page = filter_products(&catalog(), &query(&[("page", "abc"), ("limit", "0")]));
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 7);
        assert_eq!(page.data.len(), 7);
    }

    #[test]
    fn test_empty_filters_are_ignored() {
        let page = filter_products(&catalog(), &query(&[("category", ""), ("search", "")]));
        assert_eq!(page.total, 7);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int(Some("12")), Some(12));
        assert_eq!(parse_leading_int(Some("  3abc")), Some(3));
        assert_eq!(parse_leading_int(Some("-2")), Some(-2));
        assert_eq!(parse_leading_int(Some("+4")), Some(4));
        assert_eq!(parse_leading_int(Some("0")), None);
        assert_eq!(parse_leading_int(Some("x1")), None);
        assert_eq!(parse_leading_int(Some("")), None);
        assert_eq!(parse_leading_int(None), None);
    }

    #[test]
    fn test_slice_bounds_relative_indices() {
        assert_eq!(slice_bounds(5, 2, 4), (2, 4));
        assert_eq!(slice_bounds(5, 4, 10), (4, 5));
        assert_eq!(slice_bounds(5, -2, 5), (3, 5));
        assert_eq!(slice_bounds(5, -10, -1), (0, 4));
        assert_eq!(slice_bounds(5, 3, 1), (3, 3));
        assert_eq!(slice_bounds(0, 0, 0), (0, 0));
    }

    #[test]
    fn test_stats_counts_in_first_seen_order() {
        let products = vec![
            product("1", "Laptop", "electronics"),
            product("2", "Phone", "electronics"),
            product("3", "Coffee Maker", "kitchen"),
        ];
        let stats = CategoryStats::collect(&products);

        assert_eq!(stats.get("electronics"), Some(2));
        assert_eq!(stats.get("kitchen"), Some(1));
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"electronics":2,"kitchen":1}"#
        );
        assert_eq!(serde_json::to_value(&stats).unwrap(), json!({"electronics": 2, "kitchen": 1}));
    }

    #[test]
    fn test_stats_skips_products_without_category() {
        let mut uncategorized = product("x", "Thing", "misc");
        uncategorized.category = None;

        let stats = CategoryStats::collect(&[uncategorized]);
        assert!(stats.is_empty());
    }
}
