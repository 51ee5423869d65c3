//! Product catalog.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{EngineError, EngineResult};
use crate::models::Product;

use super::{generate_id, read_lock, write_lock};

const STORE: &str = "catalog";

/// Products available to cart sessions.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    products: RwLock<HashMap<String, Product>>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product with a generated id.
    pub fn create(&self, name: &str, unit_price: Decimal, vat_rate: Decimal) -> EngineResult<Product> {
        let product = Product {
            id: generate_id("prd"),
            name: name.trim().to_string(),
            unit_price,
            vat_rate,
        };
        product.validate()?;
        write_lock(&self.products, STORE)?.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    /// Fetches a product by id.
    pub fn get(&self, product_id: &str) -> EngineResult<Product> {
        read_lock(&self.products, STORE)?
            .get(product_id)
            .cloned()
            .ok_or_else(|| EngineError::ProductNotFound {
                product_id: product_id.to_string(),
            })
    }

    /// Lists products sorted by name.
    pub fn list(&self) -> EngineResult<Vec<Product>> {
        let mut products: Vec<Product> = read_lock(&self.products, STORE)?.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_get_list() {
        let catalog = ProductCatalog::new();
        let sugar = catalog
            .create("Açúcar 1kg", Decimal::new(95, 0), Decimal::new(16, 2))
            .unwrap();
        catalog
            .create("Arroz 5kg", Decimal::new(450, 0), Decimal::new(16, 2))
            .unwrap();

        assert!(sugar.id.starts_with("prd_"));
        assert_eq!(catalog.get(&sugar.id).unwrap(), sugar);

        let names: Vec<String> = catalog.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Arroz 5kg", "Açúcar 1kg"]);
    }

    #[test]
    fn test_invalid_product_not_stored() {
        let catalog = ProductCatalog::new();
        assert!(catalog.create("Pão", Decimal::new(-1, 0), Decimal::ZERO).is_err());
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_product() {
        let catalog = ProductCatalog::new();
        assert!(matches!(
            catalog.get("prd_missing"),
            Err(EngineError::ProductNotFound { .. })
        ));
    }
}
