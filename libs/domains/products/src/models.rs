use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};

/// First id handed out by the product id sequence
pub const MIN_PRODUCT_ID: i32 = 100_000;
/// Last id the product id sequence can hand out; it never wraps around
pub const MAX_PRODUCT_ID: i32 = 999_999;

/// Upper bound for a product price
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned id in 100000..=999999
    #[schema(example = 100000)]
    pub product_id: i32,
    #[schema(example = "Espresso machine")]
    pub name: String,
    pub description: Option<String>,
    /// Unit price with two decimal places
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(example = 249.99)]
    pub price: Decimal,
    /// Units on hand, never negative
    #[schema(example = 12)]
    pub stock_available: i32,
}

/// DTO for creating a new product. The store assigns the id; a `productId`
/// in the body is ignored.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(
        length(
            min = 1,
            max = 120,
            message = "name must be between 1 and 120 characters"
        ),
        custom(function = "validate_name")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    #[schema(example = 249.99)]
    pub price: Decimal,

    #[serde(default)]
    #[validate(range(min = 0, message = "stockAvailable must not be negative"))]
    pub stock_available: i32,
}

/// DTO for replacing a product. `productId` must match the id in the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub product_id: i32,

    #[validate(
        length(
            min = 1,
            max = 120,
            message = "name must be between 1 and 120 characters"
        ),
        custom(function = "validate_name")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_price"))]
    #[schema(example = 249.99)]
    pub price: Decimal,

    #[serde(default)]
    #[validate(range(min = 0, message = "stockAvailable must not be negative"))]
    pub stock_available: i32,
}

/// Result of writing a full product record to the store
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated(Product),
    /// The write touched no row
    Missing,
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("name must not be blank".into());
        return Err(error);
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO || *price > MAX_PRICE {
        let mut error = ValidationError::new("range");
        error.message = Some("price must be between 0 and 1000000".into());
        error.add_param("value".into(), &price.to_string());
        return Err(error);
    }
    Ok(())
}

/// Round to the two decimal places stored by the `numeric(18,2)` column.
pub fn normalize_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Stock adjustments must move at least one unit.
pub fn ensure_positive_quantity(quantity: i32) -> ProductResult<()> {
    if quantity <= 0 {
        return Err(ProductError::Validation(
            "Quantity must be greater than zero.".to_string(),
        ));
    }
    Ok(())
}

impl Product {
    /// Build a product from validated input and a store-assigned id
    pub fn new(product_id: i32, input: CreateProduct) -> Self {
        Self {
            product_id,
            name: input.name,
            description: input.description,
            price: normalize_price(input.price),
            stock_available: input.stock_available,
        }
    }

    /// Remove `quantity` units. Fails without touching the stock when fewer
    /// than `quantity` units are available.
    pub fn decrement_stock(&mut self, quantity: i32) -> ProductResult<()> {
        ensure_positive_quantity(quantity)?;

        if self.stock_available < quantity {
            return Err(ProductError::InsufficientStock {
                available: self.stock_available,
                requested: quantity,
            });
        }

        self.stock_available -= quantity;
        Ok(())
    }

    /// Add `quantity` units. Fails without touching the stock when the
    /// result would not fit in the stock counter.
    pub fn increment_stock(&mut self, quantity: i32) -> ProductResult<()> {
        ensure_positive_quantity(quantity)?;

        self.stock_available = self.stock_available.checked_add(quantity).ok_or_else(|| {
            ProductError::Validation(format!(
                "Adding {} units would exceed the maximum stock of {}.",
                quantity,
                i32::MAX
            ))
        })?;
        Ok(())
    }
}

/// An update replaces every field of the stored record
impl From<UpdateProduct> for Product {
    fn from(input: UpdateProduct) -> Self {
        Self {
            product_id: input.product_id,
            name: input.name,
            description: input.description,
            price: normalize_price(input.price),
            stock_available: input.stock_available,
        }
    }
}
