use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, SortOrder};

/// Fallback page size when the caller supplies no limit
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for products.
/// Implementations can use different storage backends without touching
/// handler logic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product; the identifier must not already exist
    async fn create(&self, product: &Product) -> ProductResult<()>;

    /// Page of products ordered by creation time.
    ///
    /// `page` is 1-based; zero means the first page. A zero `limit` means
    /// [`DEFAULT_PAGE_SIZE`].
    async fn find_all(
        &self,
        page: u64,
        limit: u64,
        sort: SortOrder,
    ) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Replace an existing product record; `created_at` is never touched
    async fn update(&self, product: &Product) -> ProductResult<()>;

    /// Remove a product record by identifier
    async fn delete(&self, product: &Product) -> ProductResult<()>;
}

pub(crate) fn effective_page(page: u64, limit: u64) -> (u64, u64) {
    let limit = if limit == 0 { DEFAULT_PAGE_SIZE } else { limit };
    let offset = page.saturating_sub(1) * limit;
    (offset, limit)
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> ProductResult<()> {
        let mut products = self.products.write().await;

        if products.contains_key(&product.id) {
            return Err(ProductError::Internal(format!(
                "product {} already exists",
                product.id
            )));
        }

        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(())
    }

    async fn find_all(
        &self,
        page: u64,
        limit: u64,
        sort: SortOrder,
    ) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products.values().cloned().collect();
        match sort {
            SortOrder::Asc => {
                result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            }
            SortOrder::Desc => {
                result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
            }
        }

        let (offset, limit) = effective_page(page, limit);
        Ok(result
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn update(&self, product: &Product) -> ProductResult<()> {
        let mut products = self.products.write().await;

        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                tracing::info!(product_id = %product.id, "Updated product");
                Ok(())
            }
            None => Err(ProductError::NotFound(product.id)),
        }
    }

    async fn delete(&self, product: &Product) -> ProductResult<()> {
        let mut products = self.products.write().await;

        if products.remove(&product.id).is_some() {
            tracing::info!(product_id = %product.id, "Deleted product");
            Ok(())
        } else {
            Err(ProductError::NotFound(product.id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn product_created_at(name: &str, seconds_ago: i64) -> Product {
        Product {
            id: Uuid::now_v7(),
            name: name.to_string(),
            price: 10.0,
            created_at: Utc::now() - Duration::seconds(seconds_ago),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_id() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Keyboard", 59.9).unwrap();

        repo.create(&product).await.unwrap();

        let fetched = repo.find_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Keyboard", 59.9).unwrap();

        repo.create(&product).await.unwrap();

        let result = repo.create(&product).await;
        assert!(matches!(result, Err(ProductError::Internal(_))));
    }

    #[tokio::test]
    async fn test_find_all_sorts_by_creation_time() {
        let repo = InMemoryProductRepository::new();
        let oldest = product_created_at("oldest", 30);
        let middle = product_created_at("middle", 20);
        let newest = product_created_at("newest", 10);
        for product in [&middle, &oldest, &newest] {
            repo.create(product).await.unwrap();
        }

        let descending = repo.find_all(0, 0, SortOrder::Desc).await.unwrap();
        let names: Vec<_> = descending.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["newest", "middle", "oldest"]);

        let ascending = repo.find_all(0, 0, SortOrder::Asc).await.unwrap();
        let names: Vec<_> = ascending.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["oldest", "middle", "newest"]);
    }

    #[tokio::test]
    async fn test_find_all_paginates() {
        let repo = InMemoryProductRepository::new();
        for i in 0..5 {
            repo.create(&product_created_at(&format!("p{}", i), 50 - i))
                .await
                .unwrap();
        }

        let first = repo.find_all(1, 2, SortOrder::Asc).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].name, "p0");

        let second = repo.find_all(2, 2, SortOrder::Asc).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].name, "p2");

        let last = repo.find_all(3, 2, SortOrder::Asc).await.unwrap();
        assert_eq!(last.len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_zero_page_and_limit_defaults() {
        let repo = InMemoryProductRepository::new();
        for i in 0..3 {
            repo.create(&product_created_at(&format!("p{}", i), 30 - i))
                .await
                .unwrap();
        }

        // page 0 / limit 0 behaves as first page with the default size
        let all = repo.find_all(0, 0, SortOrder::Desc).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Keyboard", 59.9).unwrap();

        let result = repo.update(&product).await;
        assert!(matches!(result, Err(ProductError::NotFound(id)) if id == product.id));
    }

    #[tokio::test]
    async fn test_update_replaces_record() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Keyboard", 59.9).unwrap();
        repo.create(&product).await.unwrap();

        let mut replacement = product.clone();
        replacement.name = "Mechanical keyboard".to_string();
        replacement.price = 89.9;
        repo.update(&replacement).await.unwrap();

        let fetched = repo.find_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Mechanical keyboard");
        assert_eq!(fetched.price, 89.9);
        assert_eq!(fetched.created_at, product.created_at);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let repo = InMemoryProductRepository::new();
        let product = Product::new("Keyboard", 59.9).unwrap();
        repo.create(&product).await.unwrap();

        repo.delete(&product).await.unwrap();
        assert_eq!(repo.find_by_id(product.id).await.unwrap(), None);

        let result = repo.delete(&product).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
