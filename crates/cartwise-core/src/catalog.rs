//! # Catalog
//!
//! Sole owner of every [`Product`]. Carts and customers refer to products by
//! [`ProductId`] and borrow the catalog whenever they need prices, stock or
//! capabilities.
//!
//! ```text
//! Catalog ──owns──► Product (stock lives here)
//!    ▲
//!    │ &Catalog / &mut Catalog (checkout only)
//!    │
//! Cart ──holds──► ProductId + quantity
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Product, ProductId};
use crate::validation::validate_product;

/// Product registry, iterated in insertion order.
#[derive(Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers a product, returning its id.
    ///
    /// ## Errors
    /// - `ValidationError` for a bad name, negative price or bad weight
    /// - `ValidationError::Duplicate` if the same product is inserted twice
    pub fn insert(&mut self, product: Product) -> CoreResult<ProductId> {
        validate_product(&product)?;

        let id = product.id();
        if self.index.contains_key(&id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: id.to_string(),
            }
            .into());
        }

        debug!(
            product_id = %id,
            name = product.name(),
            kind = ?product.kind(),
            stock = product.available_quantity(),
            "Product registered"
        );

        self.index.insert(id, self.products.len());
        self.products.push(product);
        Ok(id)
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> CoreResult<&Product> {
        self.index
            .get(&id)
            .and_then(|&i| self.products.get(i))
            .ok_or(CoreError::ProductNotFound(id))
    }

    pub(crate) fn get_mut(&mut self, id: ProductId) -> CoreResult<&mut Product> {
        match self.index.get(&id) {
            Some(&i) => self
                .products
                .get_mut(i)
                .ok_or(CoreError::ProductNotFound(id)),
            None => Err(CoreError::ProductNotFound(id)),
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}
