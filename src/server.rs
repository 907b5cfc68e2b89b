use super::SimpleResult;
use super::config::Config;
use super::database::close_connection;
use super::render::build_registry;
use super::{games, genres, publishers};
use axum::Router;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use handlebars::Handlebars;
use rust_embed::RustEmbed;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(RustEmbed)]
#[folder = "public/"]
struct Assets;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub handlebars: Arc<Handlebars<'static>>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> SimpleResult<Self> {
        Ok(Self {
            pool,
            handlebars: Arc::new(build_registry()?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(games::featured))
        .route("/games", get(games::list).post(games::create))
        .route("/games/new", get(games::new))
        .route("/games/{id}", get(games::show))
        .route("/games/{id}/edit", get(games::edit).post(games::update))
        .route("/games/{id}/delete", post(games::delete))
        .route("/genres", get(genres::list).post(genres::create))
        .route("/genres/new", get(genres::new))
        .route("/genres/{id}", get(genres::games))
        .route("/genres/{id}/delete", post(genres::delete))
        .route("/publishers", get(publishers::list).post(publishers::create))
        .route("/publishers/new", get(publishers::new))
        .route("/publishers/{id}", get(publishers::games))
        .route(
            "/publishers/{id}/edit",
            get(publishers::edit).post(publishers::update),
        )
        .route("/publishers/{id}/delete", post(publishers::delete))
        .fallback(serve_asset)
        .with_state(state)
}

async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    match Assets::get(path) {
        Some(file) => {
            let mimetype = file.metadata.mimetype().to_owned();
            ([(header::CONTENT_TYPE, mimetype)], file.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for ctrl-c: {}", error);
    }
    log::info!("Shutting down");
}

pub async fn main(pool: SqlitePool, config: &Config) -> SimpleResult<()> {
    let state = AppState::new(pool.clone())?;
    let listener = try_with!(
        TcpListener::bind(config.socket_address()).await,
        "Failed to bind {}",
        config.socket_address()
    );
    let local_address = try_with!(listener.local_addr(), "Failed to get the local address");
    log::info!("Listening on http://{}", local_address);
    try_with!(
        axum::serve(listener, router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await,
        "Failed to run server"
    );
    close_connection(&pool).await;
    Ok(())
}

#[cfg(test)]
pub async fn spawn_test_server(pool: SqlitePool) -> String {
    let state = AppState::new(pool).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });
    format!("http://{}", address)
}

#[cfg(test)]
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

#[cfg(test)]
mod test_assets;
#[cfg(test)]
mod test_publishers;
