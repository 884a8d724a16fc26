use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, MAX_PRODUCT_ID, MIN_PRODUCT_ID, Product, UpdateOutcome};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by ascending id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Persist a new product under the next id from the sequence
    async fn insert(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Overwrite the stored record with the same id
    async fn update(&self, product: Product) -> ProductResult<UpdateOutcome>;

    /// Returns whether a row was removed
    async fn delete(&self, id: i32) -> ProductResult<bool>;

    async fn exists_by_id(&self, id: i32) -> ProductResult<bool>;

    async fn count(&self) -> ProductResult<u64>;
}

#[derive(Debug)]
struct Store {
    products: BTreeMap<i32, Product>,
    next_id: i32,
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids follow the same 100000..=999999 sequence as the Postgres store.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::with_next_id(MIN_PRODUCT_ID)
    }

    /// Start the id sequence at `next_id` instead of 100000
    pub fn with_next_id(next_id: i32) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                products: BTreeMap::new(),
                next_id,
            })),
        }
    }

    /// Seed the store with existing records. The sequence skips past any
    /// seeded id it would otherwise hand out.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products: BTreeMap<i32, Product> =
            products.into_iter().map(|p| (p.product_id, p)).collect();

        let next_id = products
            .keys()
            .copied()
            .filter(|id| (MIN_PRODUCT_ID..=MAX_PRODUCT_ID).contains(id))
            .max()
            .map_or(MIN_PRODUCT_ID, |id| id + 1);

        Self {
            store: Arc::new(RwLock::new(Store { products, next_id })),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        if id > MAX_PRODUCT_ID {
            return Err(ProductError::IdSequenceExhausted);
        }
        store.next_id += 1;

        let product = Product::new(id, input);
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: Product) -> ProductResult<UpdateOutcome> {
        let mut store = self.store.write().await;

        match store.products.get_mut(&product.product_id) {
            Some(existing) => {
                *existing = product.clone();
                tracing::info!(product_id = product.product_id, "Updated product");
                Ok(UpdateOutcome::Updated(product))
            }
            None => Ok(UpdateOutcome::Missing),
        }
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let mut store = self.store.write().await;

        if store.products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_id(&self, id: i32) -> ProductResult<bool> {
        let store = self.store.read().await;
        Ok(store.products.contains_key(&id))
    }

    async fn count(&self) -> ProductResult<u64> {
        let store = self.store.read().await;
        Ok(store.products.len() as u64)
    }
}
