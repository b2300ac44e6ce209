//! Application route table.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::{handlers, middleware, state::AppState};

/// Prefix the user route group is mounted under.
pub const ACCOUNT_PREFIX: &str = "/account";

/// Build the application router.
///
/// - `GET /` → `"Welcome"`
/// - user routes nested under [`ACCOUNT_PREFIX`]
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root::welcome))
        .nest(ACCOUNT_PREFIX, user_routes(state.clone()))
        .with_state(state)
}

/// User route group. Login and registration are public; everything else
/// requires a bearer token.
fn user_routes(state: AppState) -> Router<AppState> {
    let authenticated = Router::new()
        .route("/", get(handlers::users::get_all_users))
        .route(
            "/{_id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .patch(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route("/{_id}/roles", get(handlers::users::get_user_roles))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/login", post(handlers::users::login_user))
        .route("/register", post(handlers::users::register_user))
        .merge(authenticated)
}
