//! Category routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use moneta_db::entities::{categories, sea_orm_active_enums::CategoryKind};
use moneta_db::repositories::{CategoryRepository, CreateCategoryInput};

const DEFAULT_CATEGORY_COLOR: &str = "hsl(200, 75%, 50%)";
const DEFAULT_CATEGORY_ICON: &str = "Tag";

/// Creates the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories", post(create_category))
}

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name.
    pub name: String,
    /// Category kind: income or expense.
    pub kind: String,
    /// Icon identifier; defaults to Tag.
    pub icon: Option<String>,
    /// Display color; defaults to the standard blue.
    pub color: Option<String>,
}

/// Response for a single category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Owning user; null for the global defaults.
    pub user_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Category kind.
    pub kind: String,
    /// Icon identifier.
    pub icon: String,
    /// Display color.
    pub color: String,
}

impl From<categories::Model> for CategoryResponse {
    fn from(category: categories::Model) -> Self {
        Self {
            id: category.id,
            user_id: category.user_id,
            name: category.name,
            kind: category_kind_to_string(&category.kind),
            icon: category.icon,
            color: category.color,
        }
    }
}

/// GET /categories - List global categories plus the user's own.
async fn list_categories(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let repo = CategoryRepository::new((*state.db).clone());

    match repo.list(auth.user_id()).await {
        Ok(categories) => {
            let items: Vec<CategoryResponse> =
                categories.into_iter().map(CategoryResponse::from).collect();
            (StatusCode::OK, Json(json!({ "categories": items }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list categories");
            internal_error()
        }
    }
}

/// POST /categories - Create a category owned by the user.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Category name is required"
            })),
        )
            .into_response();
    }

    let Some(kind) = string_to_category_kind(&payload.kind) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_category_kind",
                "message": "Category kind must be one of: income, expense"
            })),
        )
            .into_response();
    };

    let repo = CategoryRepository::new((*state.db).clone());
    let input = CreateCategoryInput {
        name: payload.name,
        kind,
        icon: payload
            .icon
            .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string()),
        color: payload
            .color
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
    };

    match repo.create(auth.user_id(), input).await {
        Ok(category) => {
            info!(user_id = %auth.user_id(), category_id = %category.id, "Category created");
            (StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create category");
            internal_error()
        }
    }
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred"
        })),
    )
        .into_response()
}

fn category_kind_to_string(kind: &CategoryKind) -> String {
    match kind {
        CategoryKind::Income => "income".to_string(),
        CategoryKind::Expense => "expense".to_string(),
    }
}

fn string_to_category_kind(s: &str) -> Option<CategoryKind> {
    match s.to_lowercase().as_str() {
        "income" => Some(CategoryKind::Income),
        "expense" => Some(CategoryKind::Expense),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("income", Some(CategoryKind::Income))]
    #[case("Expense", Some(CategoryKind::Expense))]
    #[case("transfer", None)]
    fn test_string_to_category_kind(#[case] input: &str, #[case] expected: Option<CategoryKind>) {
        assert_eq!(string_to_category_kind(input), expected);
    }
}
