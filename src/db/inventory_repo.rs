// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{Category, MovementType, Product, ProductData, StockMovement},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Categorias
    // ---

    pub async fn list_categories(&self, company_id: Uuid) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE company_id = $1 ORDER BY name ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn create_category(
        &self,
        company_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (company_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    // Toda escrita escopada por empresa filtra também por company_id:
    // um id de outra empresa resulta em "não encontrado".
    pub async fn update_category(
        &self,
        company_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET
                name        = COALESCE($3, name),
                description = COALESCE($4, description)
            WHERE id = $2 AND company_id = $1
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn delete_category(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $2 AND company_id = $1")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ---
    // Produtos
    // ---

    pub async fn list_products(&self, company_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE company_id = $1 ORDER BY created_at DESC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Estoque baixo: saldo no limiar de alerta ou abaixo dele
    pub async fn list_low_stock_products(&self, company_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE company_id = $1 AND quantity <= min_quantity ORDER BY name ASC",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // Trava a linha do produto dentro da transação da movimentação, para que
    // movimentações concorrentes sobre o mesmo produto se serializem.
    pub async fn find_product_for_update<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $2 AND company_id = $1 FOR UPDATE",
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn create_product(
        &self,
        company_id: Uuid,
        data: &ProductData,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (company_id, category_id, name, description, sku, barcode, image,
                 price, cost, quantity, min_quantity, unit)
            VALUES
                ($1, $2, $3, $4, $5, $6, $7,
                 COALESCE($8, 0), COALESCE($9, 0), COALESCE($10, 0), COALESCE($11, 10),
                 COALESCE($12, 'unité'))
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(data.category_id)
        .bind(data.name.as_deref())
        .bind(data.description.as_deref())
        .bind(data.sku.as_deref())
        .bind(data.barcode.as_deref())
        .bind(data.image.as_deref())
        .bind(data.price)
        .bind(data.cost)
        .bind(data.quantity)
        .bind(data.min_quantity)
        .bind(data.unit.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update_product(
        &self,
        company_id: Uuid,
        id: Uuid,
        data: &ProductData,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                category_id  = COALESCE($3, category_id),
                name         = COALESCE($4, name),
                description  = COALESCE($5, description),
                sku          = COALESCE($6, sku),
                barcode      = COALESCE($7, barcode),
                image        = COALESCE($8, image),
                price        = COALESCE($9, price),
                cost         = COALESCE($10, cost),
                quantity     = COALESCE($11, quantity),
                min_quantity = COALESCE($12, min_quantity),
                unit         = COALESCE($13, unit),
                updated_at   = now()
            WHERE id = $2 AND company_id = $1
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(data.category_id)
        .bind(data.name.as_deref())
        .bind(data.description.as_deref())
        .bind(data.sku.as_deref())
        .bind(data.barcode.as_deref())
        .bind(data.image.as_deref())
        .bind(data.price)
        .bind(data.cost)
        .bind(data.quantity)
        .bind(data.min_quantity)
        .bind(data.unit.as_deref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn delete_product(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $2 AND company_id = $1")
            .bind(company_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // Ajuste atômico do saldo, dentro da transação da movimentação
    pub async fn adjust_product_quantity<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        id: Uuid,
        delta: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity + $3, updated_at = now()
            WHERE id = $2 AND company_id = $1
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(delta)
        .execute(executor)
        .await?;
        Ok(())
    }

    // ---
    // Movimentações de estoque (livro-razão)
    // ---

    pub async fn list_movements(
        &self,
        company_id: Uuid,
        product_id: Option<Uuid>,
    ) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT * FROM stock_movements
            WHERE company_id = $1 AND ($2::uuid IS NULL OR product_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    pub async fn insert_movement<'e, E>(
        &self,
        executor: E,
        company_id: Uuid,
        product_id: Uuid,
        user_id: Uuid,
        kind: MovementType,
        quantity: i32,
        reason: Option<&str>,
        supplier: Option<&str>,
        notes: Option<&str>,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements
                (company_id, product_id, user_id, type, quantity, reason, supplier, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(product_id)
        .bind(user_id)
        .bind(kind)
        .bind(quantity)
        .bind(reason)
        .bind(supplier)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }
}
