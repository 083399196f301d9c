use axum::Router;
use domain_users::{InMemoryUserRepository, UserService, handlers};

/// Users routes backed by a fresh in-memory store
pub fn router() -> Router {
    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository);
    handlers::router(service)
}
