use axum::Router;
use domain_users::{handlers, PgUserRepository, UserService};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);
    handlers::router(service, state.config.jwt.clone())
}
