use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use eventdesk_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let api_routes = Router::new()
        .route(
            "/api/session",
            get(handlers::session::current_session_handler),
        )
        .route(
            "/api/permissions/taxonomy",
            get(handlers::permissions::permission_taxonomy_handler),
        )
        .route(
            "/api/permissions/selection",
            post(handlers::permissions::apply_selection_handler),
        )
        .route(
            "/api/navigation/resolve",
            get(handlers::navigation::resolve_view_handler),
        )
        .route(
            "/api/sub-admins",
            get(handlers::sub_admins::list_sub_admins_handler)
                .post(handlers::sub_admins::create_sub_admin_handler),
        )
        .route(
            "/api/sub-admins/{sub_admin_id}",
            get(handlers::sub_admins::get_sub_admin_handler)
                .put(handlers::sub_admins::update_sub_admin_handler)
                .delete(handlers::sub_admins::delete_sub_admin_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_api_session,
        ));

    let dashboard_routes = Router::new()
        .route("/dashboard", get(handlers::session::dashboard_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_dashboard_session,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/session",
            post(handlers::session::adopt_session_handler),
        )
        .route(
            "/api/session/sign-out",
            post(handlers::session::sign_out_handler),
        )
        .merge(api_routes)
        .merge(dashboard_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
