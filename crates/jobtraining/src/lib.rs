pub mod config;
pub mod database;
pub mod education_service;
pub mod errors;
pub mod extract;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod openapi;
pub mod pagination;
pub mod password;
pub mod post_service;
pub mod request_id;
pub mod seed_source;
pub mod store;
pub mod types;

use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::get,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{Config, EducationSourceConfig, Storage},
    database::Database,
    education_service::{EducationSeeder, EducationService},
    handlers::{
        delete_post, get_education, get_post, get_posts, health_check, list_educations,
        save_post, update_post,
    },
    memory::MemoryStore,
    openapi::ApiDoc,
    post_service::PostService,
    request_id::request_id_middleware,
    seed_source::{EducationSource, FileSource, NoopSource, SeoulOpenApiSource},
    store::{EducationStore, PostStore},
};

/// Resource routes, mounted under `/api/v1` by [`create_router`].
fn api_routes() -> Router {
    Router::new()
        .route("/educations", get(list_educations))
        .route("/educations/{id}", get(get_education))
        .route("/posts", get(get_posts).post(save_post))
        .route(
            "/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
}

pub fn create_router(educations: EducationService, posts: PostService) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any)
        .expose_headers([header::LOCATION]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(Extension(educations))
        .layer(Extension(posts))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(CompressionLayer::new())
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
}

fn education_source(config: &EducationSourceConfig) -> Arc<dyn EducationSource> {
    match config {
        EducationSourceConfig::Seoul {
            base_url,
            api_key,
            service,
        } => Arc::new(SeoulOpenApiSource::new(
            base_url.as_str(),
            api_key.as_str(),
            service.as_str(),
        )),
        EducationSourceConfig::File(path) => Arc::new(FileSource::new(path.clone())),
        EducationSourceConfig::None => Arc::new(NoopSource),
    }
}

/// Opens the configured storage and wires the services onto it.
pub async fn build_services(config: &Config) -> anyhow::Result<(EducationService, PostService)> {
    let (educations, posts): (Arc<dyn EducationStore>, Arc<dyn PostStore>) = match &config.storage
    {
        Storage::Postgres { database_url } => {
            tracing::info!("Connecting to database");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            let db = Database::new(pool);
            (Arc::new(db.clone()), Arc::new(db))
        }
        Storage::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            let store = MemoryStore::new();
            (Arc::new(store.clone()), Arc::new(store))
        }
    };

    let seeder = Arc::new(EducationSeeder::new(education_source(
        &config.education_source,
    )));

    Ok((
        EducationService::new(educations, seeder),
        PostService::new(posts),
    ))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let (educations, posts) = build_services(&config).await?;
    let app = create_router(educations, posts);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    tracing::info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
