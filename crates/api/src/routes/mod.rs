//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod accounts;
pub mod auth;
pub mod categories;
pub mod health;
pub mod summary;
pub mod transactions;

/// Creates the `/api/v1` router: public auth routes plus the protected
/// resource routes behind the JWT middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(accounts::routes())
        .merge(categories::routes())
        .merge(summary::routes())
        .merge(transactions::routes())
        .merge(auth::protected_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new().merge(auth::routes()).merge(protected_routes)
}
