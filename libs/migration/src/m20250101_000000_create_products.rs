use sea_orm_migration::prelude::*;

/// Product ids come from this sequence: 100000..=999999, never reused.
const CREATE_PRODUCT_ID_SEQUENCE: &str = r#"
    CREATE SEQUENCE IF NOT EXISTS product_id_seq
        AS integer
        INCREMENT BY 1
        MINVALUE 100000
        MAXVALUE 999999
        START WITH 100000
        NO CYCLE
"#;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(CREATE_PRODUCT_ID_SEQUENCE)
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::ProductId)
                            .integer()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("nextval('product_id_seq')")),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(120).not_null())
                    .col(ColumnDef::new(Products::Description).string_len(500).null())
                    .col(
                        ColumnDef::new(Products::Price)
                            .decimal_len(18, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Products::StockAvailable)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        // Dropping the table drops the sequence with it
        manager
            .get_connection()
            .execute_unprepared("ALTER SEQUENCE product_id_seq OWNED BY products.product_id")
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_name")
                    .table(Products::Table)
                    .col(Products::Name)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP SEQUENCE IF EXISTS product_id_seq")
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    ProductId,
    Name,
    Description,
    Price,
    StockAvailable,
}
