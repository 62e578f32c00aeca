//! Brand directory.
//!
//! Groups the manufacturers present in a product list under their initial
//! letter, the way the Brands page lists them. Manufacturers whose name does
//! not start with a letter are grouped under `#`.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Manufacturers sharing an initial.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BrandGroup {
    /// Upper-case initial, or `#`.
    pub letter: char,
    /// (manufacturer, product count), sorted case-insensitively.
    pub brands: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BrandIndex {
    pub groups: Vec<BrandGroup>,
}

impl BrandIndex {
    /// Build the index. Blank manufacturers are skipped; spellings that differ
    /// only by case are counted together under the first spelling seen.
    pub fn build(products: &[Product]) -> Self {
        let mut counts: BTreeMap<String, (String, usize)> = BTreeMap::new();
        for product in products {
            let name = product.manufacturer.trim();
            if name.is_empty() {
                continue;
            }
            counts
                .entry(name.to_lowercase())
                .or_insert_with(|| (name.to_string(), 0))
                .1 += 1;
        }

        let mut groups: BTreeMap<char, Vec<(String, usize)>> = BTreeMap::new();
        for (_, (name, count)) in counts {
            groups.entry(initial(&name)).or_default().push((name, count));
        }

        // '#' sorts before letters in a BTreeMap; the page lists it last.
        let mut groups: Vec<BrandGroup> = groups
            .into_iter()
            .map(|(letter, brands)| BrandGroup { letter, brands })
            .collect();
        if let Some(pos) = groups.iter().position(|g| g.letter == '#') {
            let other = groups.remove(pos);
            groups.push(other);
        }

        Self { groups }
    }

    /// Letters that have at least one brand, for the A-Z jump bar.
    pub fn letters(&self) -> Vec<char> {
        self.groups.iter().map(|g| g.letter).collect()
    }

    /// Every manufacturer name, in index order.
    pub fn brand_names(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|g| g.brands.iter().map(|(name, _)| name.as_str()))
            .collect()
    }

    pub fn brand_count(&self) -> usize {
        self.groups.iter().map(|g| g.brands.len()).sum()
    }

    /// Products made by `brand`, case-insensitive.
    pub fn products_for<'a>(products: &'a [Product], brand: &str) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|p| p.manufacturer.trim().eq_ignore_ascii_case(brand.trim()))
            .collect()
    }
}

fn initial(name: &str) -> char {
    match name.chars().next() {
        Some(c) if c.is_alphabetic() => c.to_ascii_uppercase(),
        _ => '#',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: &str, manufacturer: &str) -> Product {
        Product::new(id, id, format!("Product {}", id), Money::new(100, Currency::USD))
            .with_manufacturer(manufacturer)
    }

    #[test]
    fn test_groups_by_initial() {
        let products = vec![
            product("1", "Hu-Friedy"),
            product("2", "A-dec"),
            product("3", "hu-friedy"),
            product("4", "3M"),
            product("5", "Henry Schein"),
            product("6", "  "),
        ];
        let index = BrandIndex::build(&products);

        assert_eq!(index.letters(), vec!['A', 'H', '#']);
        assert_eq!(index.brand_count(), 4);

        let h = &index.groups[1];
        assert_eq!(
            h.brands,
            vec![("Henry Schein".to_string(), 1), ("Hu-Friedy".to_string(), 2)]
        );
        assert_eq!(index.brand_names().last(), Some(&"3M"));
    }

    #[test]
    fn test_products_for_brand() {
        let products = vec![product("1", "Hu-Friedy"), product("2", "A-dec")];
        let matched = BrandIndex::products_for(&products, "HU-FRIEDY");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id.as_str(), "1");
    }
}
