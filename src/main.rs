//! The GraphQL API server for the Servve school volunteering app.

use std::net::SocketAddr;
use std::sync::Arc;

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::{Request, Response};
use axum::headers::HeaderMap;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use servve::error::{ServeError, ServeResult};
use servve::graphql::build_schema;
use servve::models::member::session::SessionStore;
use servve::models::member::Member;
use servve::sheets::SheetClient;

const SERVVE_TOKEN: &str = "servve-token";
const API_URL: &str = "api.servve.app";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "servve=debug,info".into()),
        )
        .init();

    let sessions = Arc::new(SessionStore::default());
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(playground).post(query))
        .layer(Extension(sessions))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!(%addr, "listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

async fn query(
    headers: HeaderMap,
    Extension(sessions): Extension<Arc<SessionStore>>,
    Json(request): Json<Request>,
) -> ServeResult<Json<Response>> {
    let client = SheetClient::from_env()?;
    let user = if let Some(token) = get_token(&headers)? {
        Some(Member::with_token(token, &sessions, &client).await?)
    } else {
        None
    };

    let request = Request::new(request.query)
        .variables(request.variables)
        .data(client)
        .data(sessions);
    let request = if let Some(user) = user {
        request.data(user)
    } else {
        request
    };

    Ok(Json(build_schema().execute(request).await))
}

async fn playground(headers: HeaderMap) -> ServeResult<String> {
    let mut config = GraphQLPlaygroundConfig::new(API_URL);
    if let Some(header) = get_token(&headers)? {
        config = config.with_header(SERVVE_TOKEN, header);
    }

    Ok(playground_source(config))
}

fn get_token(headers: &HeaderMap) -> ServeResult<Option<&str>> {
    headers
        .iter()
        .find_map(|(name, value)| {
            if name == SERVVE_TOKEN {
                Some(value.to_str().map_err(ServeError::InvalidTokenHeader))
            } else {
                None
            }
        })
        .transpose()
}
