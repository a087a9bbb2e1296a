//! Backend entry-point: loads settings, wires adapters, and serves the API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ebooks::domain::ports::{EbookRepository, TranslationService};
use ebooks::inbound::http::health::HealthState;
use ebooks::outbound::memory::InMemoryEbookRepository;
use ebooks::outbound::persistence::{
    DbPool, DieselEbookRepository, PoolConfig, run_pending_migrations,
};
use ebooks::outbound::translation::{HttpTranslationService, UnconfiguredTranslationService};
use ebooks::sample_data::seed_sample_data;
use ebooks::settings::AppSettings;

use server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let repository = build_repository(&settings).await?;
    let translator = build_translator(&settings)?;

    if settings.seed_sample_data {
        seed_sample_data(repository.as_ref())
            .await
            .wrap_err("failed to seed sample catalogue")?;
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        ServerConfig::new(bind_addr, repository, translator),
    )?;
    info!(%bind_addr, "ebooks API listening");
    server.await?;
    Ok(())
}

async fn build_repository(settings: &AppSettings) -> Result<Arc<dyn EbookRepository>> {
    let Some(url) = settings.database_url() else {
        warn!("no database configured; records are kept in memory");
        return Ok(Arc::new(InMemoryEbookRepository::new()));
    };

    run_pending_migrations(url)
        .await
        .wrap_err("failed to apply database migrations")?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_max_connections()))
        .await
        .wrap_err("failed to build database pool")?;
    Ok(Arc::new(DieselEbookRepository::new(pool)))
}

fn build_translator(settings: &AppSettings) -> Result<Arc<dyn TranslationService>> {
    match settings.translation_endpoint()? {
        Some(endpoint) => {
            let translator = HttpTranslationService::new(
                endpoint,
                settings.translation_api_key().map(str::to_owned),
                settings.translation_timeout(),
            )
            .wrap_err("failed to build translation client")?;
            Ok(Arc::new(translator))
        }
        None => {
            warn!("no translation endpoint configured; translation requests will fail");
            Ok(Arc::new(UnconfiguredTranslationService))
        }
    }
}
