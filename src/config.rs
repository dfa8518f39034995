// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{PgStore, SharedStore},
    services::{
        auth::AuthService, move_service::MoveService, resident_service::ResidentService,
        staff_service::StaffService,
    },
};

// Configuração lida do ambiente (.env)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub seed_demo_data: bool,
    // Senha dada a funcionários/secretárias cadastrados sem senha
    pub default_staff_password: String,
    // Domínio do login gerado para novas secretárias
    pub staff_email_domain: String,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(v) => v.parse().context("BCRYPT_COST deve ser um número")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            seed_demo_data,
            default_staff_password: env::var("DEFAULT_STAFF_PASSWORD")
                .unwrap_or_else(|_| "123".to_string()),
            staff_email_domain: env::var("STAFF_EMAIL_DOMAIN")
                .unwrap_or_else(|_| "telemim.com".to_string()),
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
impl AppConfig {
    // Custo mínimo do bcrypt para os testes não ficarem lentos
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/telemim_test".to_string(),
            jwt_secret: "segredo-de-teste".to_string(),
            server_addr: "127.0.0.1:0".to_string(),
            seed_demo_data: false,
            default_staff_password: "123".to_string(),
            staff_email_domain: "telemim.com".to_string(),
            bcrypt_cost: 4,
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<AppConfig>,
    pub store: SharedStore,
    pub auth_service: AuthService,
    pub staff_service: StaffService,
    pub resident_service: ResidentService,
    pub move_service: MoveService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let store: SharedStore = Arc::new(PgStore::new(db_pool.clone()));

        Ok(Self::with_store(db_pool, config, store))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(db_pool: PgPool, config: AppConfig, store: SharedStore) -> Self {
        let config = Arc::new(config);

        let auth_service = AuthService::new(store.clone(), config.jwt_secret.clone());
        let staff_service = StaffService::new(store.clone(), config.clone());
        let resident_service = ResidentService::new(store.clone());
        let move_service = MoveService::new(store.clone());

        Self {
            db_pool,
            config,
            store,
            auth_service,
            staff_service,
            resident_service,
            move_service,
        }
    }
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
