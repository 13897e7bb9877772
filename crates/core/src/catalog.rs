//! The static product catalog.
//!
//! Both the listing page and the cart page resolve products through this one
//! definition, so a cart entry always joins against the same product data the
//! shopper saw when adding it.

use std::sync::LazyLock;

use serde::Serialize;

use crate::types::{Price, ProductId};

/// A purchasable product. Immutable and statically defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: &'static str,
    pub price: Price,
    pub description: &'static str,
    /// Glyph shown in place of a product image.
    pub icon: &'static str,
}

/// A browsing category shown on the listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
}

/// Display categories, in listing order.
pub const CATEGORIES: [Category; 4] = [
    Category {
        name: "Electronics",
        icon: "💻",
    },
    Category {
        name: "Accessories",
        icon: "🎁",
    },
    Category {
        name: "Audio",
        icon: "🎵",
    },
    Category {
        name: "Wearables",
        icon: "⌚",
    },
];

static PRODUCTS: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        product(
            1,
            "Premium Headphones",
            299,
            "High-quality wireless headphones with noise cancellation",
            "🎧",
        ),
        product(
            2,
            "Smart Watch",
            399,
            "Track your fitness and stay connected on the go",
            "⌚",
        ),
        product(
            3,
            "Laptop Backpack",
            79,
            "Durable and stylish backpack for your tech",
            "🎒",
        ),
        product(
            4,
            "Wireless Mouse",
            49,
            "Ergonomic design with precision tracking",
            "🖱️",
        ),
        product(
            5,
            "Mechanical Keyboard",
            149,
            "Premium typing experience with RGB lighting",
            "⌨️",
        ),
        product(
            6,
            "USB-C Hub",
            59,
            "Expand your connectivity with multiple ports",
            "🔌",
        ),
        product(
            7,
            "Phone Stand",
            29,
            "Adjustable stand for hands-free viewing",
            "📱",
        ),
        product(
            8,
            "Desk Lamp",
            89,
            "LED lamp with adjustable brightness",
            "💡",
        ),
    ]
});

fn product(
    id: i32,
    name: &'static str,
    price: i64,
    description: &'static str,
    icon: &'static str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name,
        price: Price::from_whole(price),
        description,
        icon,
    }
}

/// All products, ordered by id.
#[must_use]
pub fn products() -> &'static [Product] {
    &PRODUCTS
}

/// Look up a product by id.
#[must_use]
pub fn find(id: ProductId) -> Option<&'static Product> {
    PRODUCTS.iter().find(|product| product.id == id)
}

/// Products whose name or description contains `query`, ignoring case.
///
/// A blank query matches everything.
#[must_use]
pub fn search(query: &str) -> Vec<&'static Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return PRODUCTS.iter().collect();
    }

    PRODUCTS
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_catalog_has_eight_unique_positive_ids() {
        let ids: HashSet<_> = products().iter().map(|p| p.id).collect();
        assert_eq!(products().len(), 8);
        assert_eq!(ids.len(), 8);
        assert!(products().iter().all(|p| p.id.as_i32() > 0));
    }

    #[test]
    fn test_catalog_is_ordered_by_id() {
        let ids: Vec<i32> = products().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn test_find() {
        let headphones = find(ProductId::new(1));
        assert_eq!(headphones.map(|p| p.name), Some("Premium Headphones"));
        assert_eq!(
            find(ProductId::new(4)).map(|p| p.price),
            Some(Price::from_whole(49))
        );
        assert!(find(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_search_blank_returns_all() {
        assert_eq!(search("").len(), 8);
        assert_eq!(search("   ").len(), 8);
    }

    #[test]
    fn test_search_matches_name_and_description() {
        let by_name: Vec<_> = search("LAMP").iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(by_name, vec![8]);

        let by_description: Vec<_> = search("wireless").iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(by_description, vec![1, 4]);
    }

    #[test]
    fn test_search_no_match() {
        assert!(search("espresso").is_empty());
    }
}
