use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cupreg_core::{MemoryTeamStore, RateLimiter, Team, TeamStore};
use cupreg_web::config::ServerConfig;
use cupreg_web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cupreg_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load()?;
    let bind_addr = config.bind_addr;
    let tls_config = config.tls.clone();
    let tls_enabled = tls_config.cert_path.is_some() && tls_config.key_path.is_some();

    let teams = Arc::new(MemoryTeamStore::new());
    for seed in &config.teams {
        let team = Team {
            id: uuid::Uuid::new_v4().to_string(),
            name: seed.name.clone(),
            captain_name: seed.captain_name.clone(),
            email: seed.email.trim().to_lowercase(),
            phone: seed.phone.clone(),
            division: seed.division.clone(),
            credential: seed.credential.clone(),
        };
        if let Err(e) = teams.insert(team).await {
            tracing::warn!("Skipping seed team {}: {e}", seed.email);
        }
    }
    if !teams.is_empty() {
        tracing::info!("Team store seeded with {} account(s)", teams.len());
    }

    let limiter = Arc::new(RateLimiter::default());

    // Limiter sweep task: check/record already sweep opportunistically,
    // but an idle process would otherwise hold expired records until the
    // next login touches the map.
    let sweep_limiter = limiter.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            sweep_limiter.sweep_expired();
        }
    });

    let state = AppState {
        config: Arc::new(config),
        limiter,
        teams,
    };

    let app = cupreg_web::app(state, tls_enabled);

    if let (Some(cert), Some(key)) = (&tls_config.cert_path, &tls_config.key_path) {
        use axum_server::tls_rustls::RustlsConfig;
        let rustls_config = RustlsConfig::from_pem_file(cert, key).await?;
        tracing::info!("cupreg-web listening on https://{}", bind_addr);
        axum_server::bind_rustls(bind_addr, rustls_config)
            .serve(app.into_make_service_with_connect_info::<std::net::SocketAddr>())
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(bind_addr).await?;
        tracing::info!("cupreg-web listening on http://{}", bind_addr);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .await?;
    }

    Ok(())
}
