use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, SortOrder, UpdateProduct};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
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

    /// Construct and persist a new product.
    ///
    /// Construction runs entity validation, so an invalid input never
    /// reaches the repository.
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input.name, input.price)?;
        self.repository.create(&product).await?;
        Ok(product)
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Page of products ordered by creation time
    pub async fn list_products(
        &self,
        page: u64,
        limit: u64,
        sort: SortOrder,
    ) -> ProductResult<Vec<Product>> {
        self.repository.find_all(page, limit, sort).await
    }

    /// Replace an existing product with new field values.
    ///
    /// The identifier comes from the caller and the creation time is
    /// carried over from the stored record. The replacement input is not
    /// re-validated as an entity; whole-record replacement keeps whatever
    /// field values the caller supplied.
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let existing = self.get_product(id).await?;
        let updated = existing.replace(input);
        self.repository.update(&updated).await?;
        Ok(updated)
    }

    /// Delete a product, confirming existence first
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        let product = self.get_product(id).await?;
        self.repository.delete(&product).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_product_persists_constructed_entity() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(|product: &Product| {
                product.name == "Keyboard" && product.price == 59.9 && !product.id.is_nil()
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductService::new(repo);
        let product = service
            .create_product(CreateProduct {
                name: "Keyboard".to_string(),
                price: 59.9,
            })
            .await
            .unwrap();

        assert_eq!(product.name, "Keyboard");
    }

    #[tokio::test]
    async fn test_create_invalid_input_never_reaches_repository() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().times(0);

        let service = ProductService::new(repo);
        let result = service
            .create_product(CreateProduct {
                name: String::new(),
                price: 10.0,
            })
            .await;

        assert!(matches!(
            result,
            Err(ProductError::Validation(ValidationError::NameRequired))
        ));
    }

    #[tokio::test]
    async fn test_get_product_missing_is_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let result = service.get_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_list_products_passes_paging_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_all()
            .with(eq(0u64), eq(0u64), eq(SortOrder::Desc))
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let service = ProductService::new(repo);
        let products = service.list_products(0, 0, SortOrder::Desc).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_skips_repository_update() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_update().times(0);

        let service = ProductService::new(repo);
        let result = service
            .update_product(
                id,
                UpdateProduct {
                    name: "Anything".to_string(),
                    price: 1.0,
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_replaces_with_path_identity() {
        let existing = Product::new("Keyboard", 59.9).unwrap();
        let id = existing.id;
        let created_at = existing.created_at;

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .withf(move |product: &Product| {
                product.id == id
                    && product.name == "Mechanical keyboard"
                    && product.price == 89.9
                    && product.created_at == created_at
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductService::new(repo);
        let updated = service
            .update_product(
                id,
                UpdateProduct {
                    name: "Mechanical keyboard".to_string(),
                    price: 89.9,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
    }

    #[tokio::test]
    async fn test_delete_invokes_repository_once_with_fetched_record() {
        let product = Product::new("Keyboard", 59.9).unwrap();
        let id = product.id;
        let fetched = product.clone();

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(Some(fetched.clone())));
        repo.expect_delete()
            .with(eq(product.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductService::new(repo);
        service.delete_product(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_skips_repository_delete() {
        let id = Uuid::now_v7();
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_delete().times(0);

        let service = ProductService::new(repo);
        let result = service.delete_product(id).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
