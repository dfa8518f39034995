//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

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
async fn main() {
    // RUST_LOG controla o nível; padrão "info"
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env().expect("Configuração inválida (verifique o .env).");

    let app_state = AppState::new(config)
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    if app_state.config.seed_demo_data {
        services::seed::seed_demo_data(app_state.store.as_ref(), &app_state.config)
            .await
            .expect("Falha ao inserir os dados de demonstração.");
    }

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login));

    // Tudo abaixo exige Bearer token
    let protected_routes = Router::new()
        .route("/users/me", get(handlers::auth::get_me))
        .route("/roles", get(handlers::roles::list_roles))
        .route("/staff"
               ,get(handlers::staff::list_staff)
               .post(handlers::staff::create_staff)
        )
        .route("/staff/{staff_id}", patch(handlers::staff::update_staff))
        .route("/secretaries"
               ,get(handlers::secretaries::list_secretaries)
               .post(handlers::secretaries::create_secretary)
        )
        .route("/residents"
               ,get(handlers::residents::list_residents)
               .post(handlers::residents::create_resident)
        )
        .route("/moves"
               ,get(handlers::moves::list_moves)
               .post(handlers::moves::schedule_move)
        )
        .route("/moves/{move_id}", patch(handlers::moves::update_move))
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route("/dashboard/moves", get(handlers::dashboard::search_moves))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let server_addr = app_state.config.server_addr.clone();

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let listener = TcpListener::bind(&server_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", server_addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
