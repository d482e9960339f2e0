// src/services/inventory.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, SupplierRepository},
    models::{
        inventory::{Category, MovementType, Product, ProductData, StockMovement},
        supplier::Supplier,
    },
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    supplier_repo: SupplierRepository,
    pool: PgPool,
}

// Calcula o novo saldo de um produto após uma movimentação.
// Uma saída maior que o saldo atual é rejeitada antes de qualquer escrita.
pub(crate) fn apply_movement(
    current: i32,
    kind: MovementType,
    quantity: i32,
) -> Result<i32, AppError> {
    match kind {
        MovementType::Entree => Ok(current + quantity),
        MovementType::Sortie if quantity > current => Err(AppError::InsufficientStock),
        MovementType::Sortie => Ok(current - quantity),
    }
}

impl InventoryService {
    pub fn new(
        inventory_repo: InventoryRepository,
        supplier_repo: SupplierRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            inventory_repo,
            supplier_repo,
            pool,
        }
    }

    // ---
    // Categorias
    // ---

    pub async fn list_categories(&self, company_id: Uuid) -> Result<Vec<Category>, AppError> {
        self.inventory_repo.list_categories(company_id).await
    }

    pub async fn create_category(
        &self,
        company_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        self.inventory_repo
            .create_category(company_id, name, description)
            .await
    }

    pub async fn update_category(
        &self,
        company_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        self.inventory_repo
            .update_category(company_id, id, name, description)
            .await?
            .ok_or(AppError::CategoryNotFound)
    }

    pub async fn delete_category(&self, company_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.delete_category(company_id, id).await? {
            return Err(AppError::CategoryNotFound);
        }
        Ok(())
    }

    // ---
    // Produtos
    // ---

    pub async fn list_products(&self, company_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.inventory_repo.list_products(company_id).await
    }

    pub async fn list_low_stock_products(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<Product>, AppError> {
        self.inventory_repo.list_low_stock_products(company_id).await
    }

    pub async fn create_product(
        &self,
        company_id: Uuid,
        data: &ProductData,
    ) -> Result<Product, AppError> {
        self.inventory_repo.create_product(company_id, data).await
    }

    pub async fn update_product(
        &self,
        company_id: Uuid,
        id: Uuid,
        data: &ProductData,
    ) -> Result<Product, AppError> {
        self.inventory_repo
            .update_product(company_id, id, data)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete_product(&self, company_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.inventory_repo.delete_product(company_id, id).await? {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    // ---
    // Movimentações
    // ---

    pub async fn list_movements(
        &self,
        company_id: Uuid,
        product_id: Option<Uuid>,
    ) -> Result<Vec<StockMovement>, AppError> {
        self.inventory_repo.list_movements(company_id, product_id).await
    }

    // O coração do domínio: registra a movimentação no livro-razão e
    // ajusta o saldo do produto na MESMA transação. Ou os dois efeitos
    // acontecem, ou nenhum.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_movement(
        &self,
        company_id: Uuid,
        user_id: Uuid,
        product_id: Uuid,
        kind: MovementType,
        quantity: i32,
        reason: Option<&str>,
        supplier: Option<&str>,
        notes: Option<&str>,
    ) -> Result<StockMovement, AppError> {
        let mut tx = self.pool.begin().await?;

        // FOR UPDATE serializa movimentações concorrentes do mesmo produto
        let product = self
            .inventory_repo
            .find_product_for_update(&mut *tx, company_id, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        let new_quantity = apply_movement(product.quantity, kind, quantity)?;
        let delta = new_quantity - product.quantity;

        let movement = self
            .inventory_repo
            .insert_movement(
                &mut *tx, company_id, product_id, user_id, kind, quantity, reason, supplier,
                notes,
            )
            .await?;

        self.inventory_repo
            .adjust_product_quantity(&mut *tx, company_id, product_id, delta)
            .await?;

        tx.commit().await?;
        Ok(movement)
    }

    // ---
    // Fornecedores
    // ---

    pub async fn list_suppliers(&self, company_id: Uuid) -> Result<Vec<Supplier>, AppError> {
        self.supplier_repo.list_by_company(company_id).await
    }

    pub async fn create_supplier(
        &self,
        company_id: Uuid,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError> {
        self.supplier_repo
            .create_supplier(company_id, name, email, phone, address)
            .await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_supplier(
        &self,
        company_id: Uuid,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError> {
        self.supplier_repo
            .update_supplier(company_id, id, name, email, phone, address)
            .await?
            .ok_or(AppError::SupplierNotFound)
    }

    pub async fn delete_supplier(&self, company_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !self.supplier_repo.delete_supplier(company_id, id).await? {
            return Err(AppError::SupplierNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entree_adds_to_current_quantity() {
        assert_eq!(apply_movement(10, MovementType::Entree, 5).unwrap(), 15);
        assert_eq!(apply_movement(0, MovementType::Entree, 1).unwrap(), 1);
    }

    #[test]
    fn sortie_subtracts_from_current_quantity() {
        assert_eq!(apply_movement(10, MovementType::Sortie, 4).unwrap(), 6);
        // Zerar o estoque é permitido
        assert_eq!(apply_movement(10, MovementType::Sortie, 10).unwrap(), 0);
    }

    #[test]
    fn sortie_beyond_stock_is_rejected() {
        assert!(matches!(
            apply_movement(3, MovementType::Sortie, 4),
            Err(AppError::InsufficientStock)
        ));
        assert!(matches!(
            apply_movement(0, MovementType::Sortie, 1),
            Err(AppError::InsufficientStock)
        ));
    }
}
