use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, RuntimeErr};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateOutcome},
    repository::ProductRepository,
};

/// SQLSTATE raised by `nextval` once `product_id_seq` hits its MAXVALUE
const SEQUENCE_GENERATOR_LIMIT_EXCEEDED: &str = "2200H";

pub struct PgProductRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn is_sequence_exhausted(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db_err| db_err.code())
            .is_some_and(|code| code == SEQUENCE_GENERATOR_LIMIT_EXCEEDED),
        _ => false,
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::ProductId)
            .all(self.base.db())
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Product::from))
    }

    async fn insert(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();

        let model = self.base.insert(active_model).await.map_err(|e| {
            if is_sequence_exhausted(&e) {
                ProductError::IdSequenceExhausted
            } else {
                ProductError::from(e)
            }
        })?;

        tracing::info!(product_id = model.product_id, "Created product");
        Ok(model.into())
    }

    async fn update(&self, product: Product) -> ProductResult<UpdateOutcome> {
        let id = product.product_id;
        let active_model: entity::ActiveModel = product.into();

        match self.base.update(active_model).await {
            Ok(model) => {
                tracing::info!(product_id = id, "Updated product");
                Ok(UpdateOutcome::Updated(model.into()))
            }
            Err(DbErr::RecordNotUpdated) => Ok(UpdateOutcome::Missing),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_id(&self, id: i32) -> ProductResult<bool> {
        Ok(self.base.find_by_id(id).await?.is_some())
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(self.base.count().await?)
    }
}
