//! PostgreSQL implementation of the product repository

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{Product, SortOrder},
    repository::{effective_page, ProductRepository},
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(err: DbErr) -> ProductError {
    ProductError::Internal(format!("Database error: {}", err))
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &Product) -> ProductResult<()> {
        let active_model: entity::ActiveModel = product.into();

        entity::Entity::insert(active_model)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        tracing::info!(product_id = %product.id, "Created product");
        Ok(())
    }

    async fn find_all(
        &self,
        page: u64,
        limit: u64,
        sort: SortOrder,
    ) -> ProductResult<Vec<Product>> {
        let (offset, limit) = effective_page(page, limit);

        let query = match sort {
            SortOrder::Asc => entity::Entity::find().order_by_asc(entity::Column::CreatedAt),
            SortOrder::Desc => entity::Entity::find().order_by_desc(entity::Column::CreatedAt),
        };

        let models = query
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(model.map(Into::into))
    }

    async fn update(&self, product: &Product) -> ProductResult<()> {
        // created_at stays NotSet: it is written once at creation
        let active_model = entity::ActiveModel {
            id: Set(product.id),
            name: Set(product.name.clone()),
            price: Set(product.price),
            created_at: NotSet,
        };

        match entity::Entity::update(active_model).exec(&self.db).await {
            Ok(_) => {
                tracing::info!(product_id = %product.id, "Updated product");
                Ok(())
            }
            Err(DbErr::RecordNotUpdated) => Err(ProductError::NotFound(product.id)),
            Err(err) => Err(db_error(err)),
        }
    }

    async fn delete(&self, product: &Product) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(product.id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(product.id));
        }

        tracing::info!(product_id = %product.id, "Deleted product");
        Ok(())
    }
}
