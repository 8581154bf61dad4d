use quarryquote_core::Product;

/// Location criteria for narrowing a price sheet. Both criteria must match
/// when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationFilter<'a> {
    /// Compared case-insensitively against `Product::location_name`.
    pub location_name: Option<&'a str>,
    /// Compared exactly against `Product::location_number`.
    pub location_number: Option<&'a str>,
}

impl LocationFilter<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location_name.is_none() && self.location_number.is_none()
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let name_ok = self.location_name.is_none_or(|wanted| {
            product
                .location_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase() == wanted.to_lowercase())
        });
        let number_ok = self
            .location_number
            .is_none_or(|wanted| product.location_number.as_deref() == Some(wanted));
        name_ok && number_ok
    }
}

/// Returns the products passing `filter`, in input order.
#[must_use]
pub fn filter_products(products: &[Product], filter: LocationFilter<'_>) -> Vec<Product> {
    if filter.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, number: Option<&str>, product_name: &str) -> Product {
        Product {
            location_name: Some(name.to_string()),
            location_type: Some("Rock Quarry".to_string()),
            location_number: number.map(str::to_string),
            address: String::new(),
            product_name: product_name.to_string(),
            price_non_account: None,
            price_account: None,
            delivery_cost_per_ton: None,
        }
    }

    fn sheet() -> Vec<Product> {
        vec![
            product("Cherokee", Some("594"), "#89 Stone"),
            product("Lacey's Spring", Some("71501"), "Fill Dirt"),
            product("Cherokee", Some("594"), "8910s"),
            product("Monteagle", Some("71087"), "1 1/2\""),
            product("Incomplete", None, "Cheap Stone"),
        ]
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.product_name.as_str()).collect()
    }

    #[test]
    fn no_filter_is_identity() {
        let all = sheet();
        assert_eq!(filter_products(&all, LocationFilter::default()), all);
    }

    #[test]
    fn name_filter_is_case_insensitive() {
        let filtered = filter_products(
            &sheet(),
            LocationFilter {
                location_name: Some("cherokee"),
                location_number: None,
            },
        );
        assert_eq!(names(&filtered), vec!["#89 Stone", "8910s"]);
        assert_eq!(filtered[0].location_name.as_deref(), Some("Cherokee"));
    }

    #[test]
    fn number_filter_is_exact() {
        let filtered = filter_products(
            &sheet(),
            LocationFilter {
                location_name: None,
                location_number: Some("71501"),
            },
        );
        assert_eq!(names(&filtered), vec!["Fill Dirt"]);

        let partial = filter_products(
            &sheet(),
            LocationFilter {
                location_name: None,
                location_number: Some("715"),
            },
        );
        assert!(partial.is_empty());
    }

    #[test]
    fn combined_filters_must_both_match() {
        let both = filter_products(
            &sheet(),
            LocationFilter {
                location_name: Some("Cherokee"),
                location_number: Some("594"),
            },
        );
        assert_eq!(both.len(), 2);

        let mismatch = filter_products(
            &sheet(),
            LocationFilter {
                location_name: Some("Cherokee"),
                location_number: Some("71501"),
            },
        );
        assert!(mismatch.is_empty());
    }

    #[test]
    fn number_filter_excludes_products_without_number() {
        let filtered = filter_products(
            &sheet(),
            LocationFilter {
                location_name: Some("Incomplete"),
                location_number: Some("594"),
            },
        );
        assert!(filtered.is_empty());
    }
}
