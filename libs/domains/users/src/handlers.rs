use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, AuditEvent, AuditOutcome, JsonBody,
    errors::responses::{BadRequestJsonResponse, InternalServerErrorResponse, NotFoundResponse},
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};
use crate::service::UserManagement;

pub const TAG: &str = "users";
pub const USER_NOT_FOUND: &str = "User not found";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(User, CreateUser, UpdateUser),
        responses(NotFoundResponse, BadRequestJsonResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<S: UserManagement + 'static>(service: S) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users::<S>).post(create_user::<S>))
        .route(
            "/{id}",
            get(get_user::<S>)
                .put(update_user::<S>)
                .delete(delete_user::<S>),
        )
        .with_state(shared_service)
}

fn user_not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}

fn audit(action: &str, id: &str, outcome: AuditOutcome, headers: &HeaderMap) -> AuditEvent {
    AuditEvent::new(action, Some(format!("user:{}", id)), outcome)
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<S: UserManagement>(
    State(service): State<Arc<S>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.get_all_users().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, response = BadRequestJsonResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<S: UserManagement>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;

    audit("user.create", &user.id, AuditOutcome::Success, &headers)
        .with_details(json!({ "email": user.email }))
        .log();

    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<S: UserManagement>(
    State(service): State<Arc<S>>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    service
        .get_user_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(user_not_found)
}

/// Update a user; only the provided fields change
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, response = BadRequestJsonResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<S: UserManagement>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateUser>,
) -> Result<Json<User>, AppError> {
    let provided = (input.name.is_some(), input.email.is_some());

    match service.update_user(&id, input).await? {
        Some(user) => {
            let fields: Vec<&str> = [(provided.0, "name"), (provided.1, "email")]
                .into_iter()
                .filter_map(|(present, field)| present.then_some(field))
                .collect();

            audit("user.update", &id, AuditOutcome::Success, &headers)
                .with_details(json!({ "fields": fields }))
                .log();
            Ok(Json(user))
        }
        None => {
            audit("user.update", &id, AuditOutcome::NotFound, &headers).log();
            Err(user_not_found())
        }
    }
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<S: UserManagement>(
    State(service): State<Arc<S>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if service.delete_user(&id).await? {
        audit("user.delete", &id, AuditOutcome::Success, &headers).log();
        Ok(StatusCode::NO_CONTENT)
    } else {
        audit("user.delete", &id, AuditOutcome::NotFound, &headers).log();
        Err(user_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::service::MockUserManagement;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn sample_user() -> User {
        User::new("John Doe".to_string(), "john@example.com".to_string())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_users_returns_200_with_array() {
        let mut mock = MockUserManagement::new();
        let user = sample_user();
        let expected = user.clone();
        mock.expect_get_all_users()
            .times(1)
            .returning(move || Ok(vec![user.clone()]));

        let (status, body) = send(router(mock), get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::to_value(vec![expected]).unwrap());
    }

    #[tokio::test]
    async fn test_list_users_service_error_returns_500() {
        let mut mock = MockUserManagement::new();
        mock.expect_get_all_users()
            .returning(|| Err(UserError::Internal("Service error".to_string())));

        let (status, body) = send(router(mock), get("/")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Service error");
    }

    #[tokio::test]
    async fn test_get_user_found_and_missing() {
        let mut mock = MockUserManagement::new();
        let user = sample_user();
        let known_id = user.id.clone();
        mock.expect_get_user_by_id().returning(move |id| {
            Ok((id == user.id).then(|| user.clone()))
        });
        let app = router(mock);

        let (status, body) = send(app.clone(), get(&format!("/{}", known_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], known_id);

        let (status, body) = send(app, get("/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "User not found"}));
    }

    #[tokio::test]
    async fn test_create_user_returns_201() {
        let mut mock = MockUserManagement::new();
        mock.expect_create_user()
            .times(1)
            .returning(|input| Ok(User::new(input.name, input.email)));

        let (status, body) = send(
            router(mock),
            with_json("POST", "/", json!({"name": "John Doe", "email": "john@example.com"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "John Doe");
        assert_eq!(body["email"], "john@example.com");
    }

    #[tokio::test]
    async fn test_create_user_invalid_argument_returns_500() {
        let mut mock = MockUserManagement::new();
        mock.expect_create_user().returning(|_| {
            Err(UserError::InvalidArgument(
                "Name is required and cannot be empty".to_string(),
            ))
        });

        let (status, body) = send(
            router(mock),
            with_json("POST", "/", json!({"name": "", "email": "invalid-email"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Name is required and cannot be empty"})
        );
    }

    #[tokio::test]
    async fn test_create_user_malformed_json_never_reaches_service() {
        // No expectations: a service call would panic
        let mock = MockUserManagement::new();

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();

        let (status, body) = send(router(mock), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_update_user_missing_returns_404() {
        let mut mock = MockUserManagement::new();
        mock.expect_update_user().returning(|_, _| Ok(None));

        let (status, body) = send(
            router(mock),
            with_json("PUT", "/999", json!({"name": "Jane Doe"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "User not found"}));
    }

    #[tokio::test]
    async fn test_update_user_service_error_returns_500() {
        let mut mock = MockUserManagement::new();
        mock.expect_update_user().returning(|_, _| {
            Err(UserError::InvalidArgument(
                "Valid email is required".to_string(),
            ))
        });

        let (status, body) = send(
            router(mock),
            with_json("PUT", "/abc", json!({"email": "nope"})),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Valid email is required"})
        );
    }

    #[tokio::test]
    async fn test_update_user_passes_partial_body() {
        let mut mock = MockUserManagement::new();
        mock.expect_update_user().times(1).returning(|id, input| {
            assert_eq!(id, "abc");
            assert_eq!(input.name.as_deref(), Some("Jane Doe"));
            assert!(input.email.is_none());

            let mut user = User::new("John Doe".to_string(), "john@example.com".to_string());
            user.apply_update(input);
            Ok(Some(user))
        });

        let (status, body) = send(
            router(mock),
            with_json("PUT", "/abc", json!({"name": "Jane Doe"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jane Doe");
        assert_eq!(body["email"], "john@example.com");
    }

    #[tokio::test]
    async fn test_delete_user_returns_204_or_404() {
        let mut mock = MockUserManagement::new();
        mock.expect_delete_user().returning(|id| Ok(id == "abc"));
        let app = router(mock);

        let delete = |uri: &str| Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap();

        let (status, body) = send(app.clone(), delete("/abc")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(app, delete("/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "User not found"}));
    }
}
