//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Migrations create the table and the id sequence
//! - Identifiers are allocated from 100000 upwards
//! - Stock adjustments are persisted

use domain_products::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

async fn migrated_repo() -> (TestDatabase, PgProductRepository) {
    let db = TestDatabase::with_migrations::<migration::Migrator>().await;
    let repo = PgProductRepository::new(db.connection());
    (db, repo)
}

fn create_input(builder: &TestDataBuilder, suffix: &str, stock: i32) -> CreateProduct {
    CreateProduct {
        name: builder.name("product", suffix),
        description: Some("Integration test product".to_string()),
        price: Decimal::new(1999, 2),
        stock_available: stock,
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_ids_start_at_sequence_floor() {
    let (_db, repo) = migrated_repo().await;
    let builder = TestDataBuilder::from_test_name("ids_start");

    let first = repo.insert(create_input(&builder, "first", 1)).await.unwrap();
    let second = repo.insert(create_input(&builder, "second", 1)).await.unwrap();

    assert_eq!(first.product_id, 100_000);
    assert_eq!(second.product_id, 100_001);
}

#[tokio::test]
async fn test_create_and_get_product() {
    let (_db, repo) = migrated_repo().await;
    let builder = TestDataBuilder::from_test_name("create_and_get");
    let input = create_input(&builder, "main", builder.stock(50));

    let created = repo.insert(input.clone()).await.unwrap();
    assert_eq!(created.name, input.name);
    assert_eq!(created.description, input.description);
    assert_eq!(created.price, input.price);
    assert_eq!(created.stock_available, input.stock_available);

    let retrieved = repo.find_by_id(created.product_id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");
    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_find_missing_product() {
    let (_db, repo) = migrated_repo().await;

    let result = repo.find_by_id(123_456).await.unwrap();
    assert_none(result, "no product was inserted");
}

#[tokio::test]
async fn test_update_product() {
    let (_db, repo) = migrated_repo().await;
    let builder = TestDataBuilder::from_test_name("update");
    let created = repo.insert(create_input(&builder, "before", 3)).await.unwrap();

    let replacement = Product {
        name: builder.name("product", "after"),
        description: None,
        price: Decimal::new(500, 2),
        stock_available: 9,
        ..created
    };

    let outcome = repo.update(replacement.clone()).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated(replacement.clone()));

    let stored = assert_some(
        repo.find_by_id(replacement.product_id).await.unwrap(),
        "updated product should exist",
    );
    assert_eq!(stored, replacement);
}

#[tokio::test]
async fn test_update_missing_product_reports_missing() {
    let (_db, repo) = migrated_repo().await;

    let ghost = Product {
        product_id: 555_555,
        name: "Ghost".to_string(),
        description: None,
        price: Decimal::ZERO,
        stock_available: 0,
    };

    let outcome = repo.update(ghost).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::Missing);
}

#[tokio::test]
async fn test_delete_product() {
    let (_db, repo) = migrated_repo().await;
    let builder = TestDataBuilder::from_test_name("delete");
    let created = repo.insert(create_input(&builder, "doomed", 1)).await.unwrap();

    assert!(repo.delete(created.product_id).await.unwrap());
    assert!(!repo.delete(created.product_id).await.unwrap());
    assert!(!repo.exists_by_id(created.product_id).await.unwrap());
}

#[tokio::test]
async fn test_list_is_ordered_by_id_and_count_matches() {
    let (_db, repo) = migrated_repo().await;
    let builder = TestDataBuilder::from_test_name("list");

    for suffix in ["a", "b", "c"] {
        repo.insert(create_input(&builder, suffix, 1)).await.unwrap();
    }

    let products = repo.list().await.unwrap();
    let ids: Vec<i32> = products.iter().map(|p| p.product_id).collect();
    assert_eq!(ids, vec![100_000, 100_001, 100_002]);
    assert_eq!(repo.count().await.unwrap(), 3);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_rounds_price_to_cents() {
    let (_db, repo) = migrated_repo().await;
    let service = ProductService::new(repo);
    let builder = TestDataBuilder::from_test_name("rounding");

    let created = service
        .create_product(CreateProduct {
            price: Decimal::new(10_005, 3),
            ..create_input(&builder, "rounded", 1)
        })
        .await
        .unwrap();

    assert_eq!(created.price, Decimal::new(1001, 2));

    let fetched = service.get_product(created.product_id).await.unwrap();
    assert_eq!(fetched.price, Decimal::new(1001, 2));
}

#[tokio::test]
async fn test_service_stock_scenario() {
    let (_db, repo) = migrated_repo().await;
    let service = ProductService::new(repo);
    let builder = TestDataBuilder::from_test_name("stock_scenario");

    let created = service
        .create_product(create_input(&builder, "stocked", 5))
        .await
        .unwrap();
    let id = created.product_id;

    let product = service.decrement_stock(id, 3).await.unwrap();
    assert_eq!(product.stock_available, 2);

    let result = service.decrement_stock(id, 10).await;
    assert!(matches!(
        result,
        Err(ProductError::InsufficientStock {
            available: 2,
            requested: 10
        })
    ));
    assert_eq!(service.get_product(id).await.unwrap().stock_available, 2);

    let product = service.increment_stock(id, 5).await.unwrap();
    assert_eq!(product.stock_available, 7);
}

#[tokio::test]
async fn test_service_update_deleted_product_is_not_found() {
    let (_db, repo) = migrated_repo().await;
    let service = ProductService::new(repo);
    let builder = TestDataBuilder::from_test_name("update_deleted");

    let created = service
        .create_product(create_input(&builder, "gone", 1))
        .await
        .unwrap();
    service.delete_product(created.product_id).await.unwrap();

    let result = service
        .update_product(
            created.product_id,
            UpdateProduct {
                product_id: created.product_id,
                name: "Back".to_string(),
                description: None,
                price: Decimal::ONE,
                stock_available: 1,
            },
        )
        .await;

    assert!(matches!(result, Err(ProductError::NotFound(id)) if id == created.product_id));
}
