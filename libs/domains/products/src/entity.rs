use rust_decimal::Decimal;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product, normalize_price};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Defaults to `nextval('product_id_seq')`
    #[sea_orm(primary_key)]
    pub product_id: i32,
    #[sea_orm(column_type = "String(StringLen::N(120))")]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(500))", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    pub stock_available: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            product_id: model.product_id,
            name: model.name,
            description: model.description,
            price: model.price,
            stock_available: model.stock_available,
        }
    }
}

// Id left unset so the column default draws from the sequence
impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        ActiveModel {
            product_id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(normalize_price(input.price)),
            stock_available: Set(input.stock_available),
        }
    }
}

// Every column set: an update writes the full record
impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            product_id: Set(product.product_id),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(normalize_price(product.price)),
            stock_available: Set(product.stock_available),
        }
    }
}
