use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_user::create_user;
use super::handlers::deactivate_user::deactivate_current_user;
use super::handlers::get_user::get_current_user;
use super::handlers::gw2;
use super::handlers::health;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::refresh::refresh;
use super::handlers::update_user::update_current_user;
use super::middleware::authenticate as auth_middleware;
use crate::domain::gw2::catalog;
use crate::domain::gw2::ports::Gw2ServicePort;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub gw2_service: Arc<dyn Gw2ServicePort>,
}

pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/users", post(create_user))
        .merge(gw2_routes());

    let protected_routes = Router::new()
        .route("/auth/me", get(get_current_user))
        .route(
            "/users/me",
            get(get_current_user)
                .put(update_current_user)
                .delete(deactivate_current_user),
        )
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            // Headers are left out: they carry bearer tokens.
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Mount every catalogued game-data resource under `/gw2`.
fn gw2_routes() -> Router<AppState> {
    let mut router = Router::new();

    for &collection in catalog::COLLECTIONS {
        router = router.route(
            &format!("/gw2/{}", collection.path),
            get(
                move |State(state): State<AppState>, Query(query): Query<gw2::IdsQuery>| {
                    gw2::collection(state, query, collection)
                },
            ),
        );
    }

    for &path in catalog::PLAIN {
        router = router.route(
            &format!("/gw2/{path}"),
            get(move |State(state): State<AppState>| gw2::plain(state, path)),
        );
    }

    for &path in catalog::BY_ID {
        router = router.route(
            &format!("/gw2/{path}/:id"),
            get(
                move |State(state): State<AppState>, Path(id): Path<u64>| {
                    gw2::by_id(state, id, path)
                },
            ),
        );
    }

    for &path in catalog::KEYED {
        router = router.route(
            &format!("/gw2/{path}"),
            get(
                move |State(state): State<AppState>, Query(query): Query<gw2::KeyQuery>| {
                    gw2::keyed(state, query, path)
                },
            ),
        );
    }

    router
        .route("/gw2/characters/:name", get(gw2::character))
        .route("/gw2/recipes/search", get(gw2::search_recipes))
        .route("/gw2/guild/search", get(gw2::search_guilds))
        .route("/gw2/guild/:guild_id", get(gw2::guild))
        .route("/gw2/guild/:guild_id/emblem", get(gw2::guild_emblem))
        .route("/gw2/wvw/matches", get(gw2::wvw_matches))
        .route("/gw2/wvw/matches/:match_id", get(gw2::wvw_match))
        .route("/gw2/commerce/exchange/coins", get(gw2::exchange_coins))
        .route("/gw2/commerce/exchange/gems", get(gw2::exchange_gems))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
