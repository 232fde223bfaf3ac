//! Product listing: name filter, price ordering and stock labels

use super::sample::Product;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filter and sort settings owned by one listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductQuery {
    filter: String,
    order: SortOrder,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn set_order(&mut self, order: SortOrder) {
        self.order = order;
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Pure: Products whose name contains the filter (case-insensitive), by price
    ///
    /// Equal prices keep their source order.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let needle = self.filter.to_lowercase();
        let mut matching: Vec<Product> = products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        match self.order {
            SortOrder::Asc => matching.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::Desc => matching.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
        matching
    }
}

pub fn stock_label(product: &Product) -> &'static str {
    if product.in_stock {
        "In Stock"
    } else {
        "Out of Stock"
    }
}

/// One-line product summary, e.g. `iPhone $999 In Stock`
pub fn describe(product: &Product) -> String {
    format!("{} ${} {}", product.name, product.price, stock_label(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_sorts_ascending() {
        let listed = ProductQuery::new().apply(&sample::products());
        assert_eq!(names(&listed), vec!["Book", "T-shirt", "Jeans", "iPhone", "MacBook"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_descending() {
        let mut query = ProductQuery::new();
        query.set_filter("BOOK");
        query.set_order(SortOrder::Desc);

        let listed = query.apply(&sample::products());
        assert_eq!(names(&listed), vec!["MacBook", "Book"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let mut query = ProductQuery::new();
        query.set_filter("laptop");
        assert!(query.apply(&sample::products()).is_empty());
    }

    #[test]
    fn test_source_order_untouched() {
        let products = sample::products();
        let _ = ProductQuery::new().apply(&products);
        assert_eq!(products, sample::products());
    }

    #[test]
    fn test_stock_labels() {
        let products = sample::products();
        assert_eq!(describe(&products[0]), "iPhone $999 In Stock");
        assert_eq!(stock_label(&products[1]), "Out of Stock");
    }
}
