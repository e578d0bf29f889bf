use axum::Router;
use domain_products::{handlers, PgProductRepository, ProductService};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    handlers::router(service)
}
