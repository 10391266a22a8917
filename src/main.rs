//src/main.rs

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppConfig, AppState};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG sobrescreve o nível padrão
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let app_state = AppState::new(&config)
        .await
        .context("Falha ao inicializar o estado da aplicação.")?;

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados.")?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let guard = || axum_middleware::from_fn_with_state(app_state.clone(), auth_guard);

    let school_routes = Router::new()
        .route(
            "/",
            post(handlers::schools::create_school).get(handlers::schools::list_schools),
        )
        .route(
            "/{id}",
            get(handlers::schools::get_school).delete(handlers::schools::delete_school),
        )
        .layer(guard());

    let student_routes = Router::new()
        .route(
            "/",
            post(handlers::students::create_student).get(handlers::students::list_students),
        )
        .route("/me", get(handlers::students::get_my_profile))
        .route(
            "/{id}",
            put(handlers::students::update_student).delete(handlers::students::delete_student),
        )
        .layer(guard());

    let teacher_routes = Router::new()
        .route(
            "/",
            post(handlers::teachers::create_teacher).get(handlers::teachers::list_teachers),
        )
        .route(
            "/{id}",
            put(handlers::teachers::update_teacher).delete(handlers::teachers::delete_teacher),
        )
        .layer(guard());

    let attendance_routes = Router::new()
        .route(
            "/",
            post(handlers::attendance::record_attendance)
                .get(handlers::attendance::list_attendance),
        )
        .route("/me", get(handlers::attendance::my_attendance))
        .route(
            "/{id}",
            put(handlers::attendance::replace_attendance)
                .delete(handlers::attendance::delete_attendance),
        )
        .layer(guard());

    let result_routes = Router::new()
        .route(
            "/",
            post(handlers::results::publish_results).get(handlers::results::list_results),
        )
        .route("/me", get(handlers::results::my_results))
        .route("/backfill", post(handlers::results::backfill_school_ids))
        .route(
            "/{id}",
            put(handlers::results::replace_results).delete(handlers::results::delete_results),
        )
        .layer(guard());

    let schedule_routes = Router::new()
        .route(
            "/",
            post(handlers::schedules::create_schedule).get(handlers::schedules::list_schedules),
        )
        .route("/calendar", get(handlers::schedules::class_calendar))
        .route("/{id}", delete(handlers::schedules::delete_schedule))
        .layer(guard());

    let event_routes = Router::new()
        .route(
            "/",
            post(handlers::events::create_event).get(handlers::events::list_events),
        )
        .route("/{id}", delete(handlers::events::delete_event))
        .layer(guard());

    // Só a leitura e a remoção passam pelo guardião; o envio é público
    let contact_routes = Router::new()
        .route("/", get(handlers::contact::list_messages))
        .route("/{id}", delete(handlers::contact::delete_message))
        .route_layer(guard())
        .route("/", post(handlers::contact::send_message));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/schools", school_routes)
        .nest("/api/students", student_routes)
        .nest("/api/teachers", teacher_routes)
        .nest("/api/attendance", attendance_routes)
        .nest("/api/results", result_routes)
        .nest("/api/schedules", schedule_routes)
        .nest("/api/events", event_routes)
        .nest("/api/contact", contact_routes)
        .with_state(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Falha ao abrir {}", config.bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}
