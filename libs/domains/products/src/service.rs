use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, Product, UpdateOutcome, UpdateProduct, ensure_positive_quantity,
};
use crate::repository::ProductRepository;

/// Service layer for product catalog and stock rules
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[tracing::instrument(skip(self))]
    pub async fn count_products(&self) -> ProductResult<u64> {
        self.repository.count().await
    }

    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.insert(input).await
    }

    /// Replace the stored product with `input`.
    ///
    /// A write that touches no row is resolved by checking whether the
    /// product still exists: gone means `NotFound`, still there means the
    /// store lost the write and `ConcurrencyConflict` is returned.
    #[tracing::instrument(skip(self, input))]
    pub async fn update_product(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        if input.product_id != id {
            return Err(ProductError::IdMismatch {
                path: id,
                body: input.product_id,
            });
        }

        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.write(Product::from(input)).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    /// Remove `quantity` units from stock; never lets stock go below zero
    #[tracing::instrument(skip(self))]
    pub async fn decrement_stock(&self, id: i32, quantity: i32) -> ProductResult<Product> {
        ensure_positive_quantity(quantity)?;

        let mut product = self.get_product(id).await?;
        product.decrement_stock(quantity)?;

        self.write(product).await
    }

    /// Add `quantity` units to stock
    #[tracing::instrument(skip(self))]
    pub async fn increment_stock(&self, id: i32, quantity: i32) -> ProductResult<Product> {
        ensure_positive_quantity(quantity)?;

        let mut product = self.get_product(id).await?;
        product.increment_stock(quantity)?;

        self.write(product).await
    }

    async fn write(&self, product: Product) -> ProductResult<Product> {
        let id = product.product_id;

        match self.repository.update(product).await? {
            UpdateOutcome::Updated(product) => Ok(product),
            UpdateOutcome::Missing => {
                if self.repository.exists_by_id(id).await? {
                    tracing::error!(product_id = id, "Update wrote no row but product still exists");
                    Err(ProductError::ConcurrencyConflict(id))
                } else {
                    Err(ProductError::NotFound(id))
                }
            }
        }
    }
}
