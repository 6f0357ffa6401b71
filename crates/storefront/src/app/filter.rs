//! Client-side catalog filtering.

use crate::models::Product;

/// What narrows the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    /// Lowercased search term matched against name and description.
    Search(String),
    /// Products in one category, as returned by the backend or by the
    /// local fallback.
    Category {
        category: String,
        products: Vec<Product>,
    },
}

impl ProductFilter {
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        match self {
            Self::Search(term) => Some(term),
            _ => None,
        }
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Category { category, .. } => Some(category),
            _ => None,
        }
    }
}

/// Products whose name or description contains `term`, ignoring case.
#[must_use]
pub fn search_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    products.iter().filter(|p| p.matches_search(&needle)).collect()
}

/// Products in `category`, ignoring case like the backend's category
/// search does.
#[must_use]
pub fn filter_by_category(products: &[Product], category: &str) -> Vec<Product> {
    let wanted = category.to_lowercase();
    products
        .iter()
        .filter(|p| p.category.to_lowercase() == wanted)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::tests::product;

    fn catalog() -> Vec<Product> {
        vec![
            product("P1", "Whole Milk", "Dairy", 300, 10),
            product("P2", "Greek Yogurt", "Dairy", 450, 0),
            product("P3", "Rye Bread", "Bakery", 500, 4),
        ]
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let products = catalog();
        let names: Vec<_> = search_products(&products, "MILK")
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["Whole Milk"]);

        // "fresh" only appears in descriptions
        assert_eq!(search_products(&products, "fresh").len(), 3);
    }

    #[test]
    fn test_category_filter_ignores_case() {
        let products = catalog();
        assert_eq!(filter_by_category(&products, "Dairy").len(), 2);
        assert_eq!(filter_by_category(&products, "dairy").len(), 2);
        assert_eq!(filter_by_category(&products, "BAKERY").len(), 1);
        assert!(filter_by_category(&products, "Dair").is_empty());
    }

    #[test]
    fn test_filter_accessors() {
        assert_eq!(ProductFilter::Search("rye".into()).search_term(), Some("rye"));
        assert_eq!(ProductFilter::All.category(), None);
    }
}
