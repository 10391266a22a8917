// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AttendanceRepository, ContactRepository, EventRepository, PgRecordStore,
        ResultRepository, ScheduleRepository, SchoolRepository, StudentRepository,
        TeacherRepository,
    },
    services::{
        attendance_service::AttendanceService, auth::AuthService,
        backfill_service::BackfillService, result_service::ResultService,
        schedule_service::ScheduleService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;

// Configuração lida do ambiente (.env em desenvolvimento)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let acquire_secs = match get("DB_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_ACQUIRE_TIMEOUT_SECS inválido: {raw}"))?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            db_max_connections,
            db_acquire_timeout: Duration::from_secs(acquire_secs),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub school_repo: SchoolRepository,
    pub student_repo: StudentRepository,
    pub teacher_repo: TeacherRepository,
    pub event_repo: EventRepository,
    pub contact_repo: ContactRepository,
    pub attendance_service: AttendanceService,
    pub result_service: ResultService,
    pub schedule_service: ScheduleService,
    pub backfill_service: BackfillService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(config.db_acquire_timeout)
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let student_repo = StudentRepository::new(db_pool.clone());

        Ok(Self {
            auth_service: AuthService::new(config.jwt_secret.clone()),
            school_repo: SchoolRepository::new(db_pool.clone()),
            teacher_repo: TeacherRepository::new(db_pool.clone()),
            event_repo: EventRepository::new(db_pool.clone()),
            contact_repo: ContactRepository::new(db_pool.clone()),
            attendance_service: AttendanceService::new(
                AttendanceRepository::new(),
                student_repo.clone(),
                db_pool.clone(),
            ),
            result_service: ResultService::new(
                ResultRepository::new(),
                student_repo.clone(),
                db_pool.clone(),
            ),
            schedule_service: ScheduleService::new(
                ScheduleRepository::new(),
                student_repo.clone(),
                db_pool.clone(),
            ),
            backfill_service: BackfillService::new(Arc::new(PgRecordStore::new(db_pool.clone()))),
            student_repo,
            db_pool,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn applies_defaults_for_optional_settings() {
        let env = vars(&[("DATABASE_URL", "postgres://localhost/escola"), ("JWT_SECRET", "s")]);
        let config = AppConfig::from_vars(|k| env.get(k).cloned()).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_acquire_timeout, Duration::from_secs(3));
    }

    #[test]
    fn missing_secret_or_bad_number_fails() {
        let env = vars(&[("DATABASE_URL", "postgres://localhost/escola")]);
        assert!(AppConfig::from_vars(|k| env.get(k).cloned()).is_err());

        let env = vars(&[
            ("DATABASE_URL", "postgres://localhost/escola"),
            ("JWT_SECRET", "s"),
            ("DB_MAX_CONNECTIONS", "muitas"),
        ]);
        assert!(AppConfig::from_vars(|k| env.get(k).cloned()).is_err());
    }
}
