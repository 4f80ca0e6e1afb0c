use callbridge::application::auth::{LoginUseCase, RegisterUseCase};
use callbridge::application::calls::{
    EndCallUseCase, InitiateCallUseCase, StartCallUseCase, TerminateCallUseCase,
    VoiceTokenGenerator,
};
use callbridge::application::history::ListHistoryUseCase;
use callbridge::config::Config;
use callbridge::domain::call::CallRepository;
use callbridge::domain::shared::clock::{Clock, SystemClock};
use callbridge::domain::telephony::TelephonyService;
use callbridge::domain::user::UserRepository;
use callbridge::infrastructure::auth::JwtService;
use callbridge::infrastructure::telephony::{
    TelephonyClient, TelephonyConfig, VoiceTokenConfig, VoiceTokenIssuer,
};
use callbridge::interface::api::{build_router, init_metrics, metrics_handler, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "postgres")]
use callbridge::infrastructure::persistence::{
    create_pool, run_migrations, PgCallRepository, PgUserRepository,
};

#[cfg(not(feature = "postgres"))]
use callbridge::infrastructure::persistence::{MemoryCallRepository, MemoryUserRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting callbridge");

    let config = Config::load();

    // Repositories
    #[cfg(feature = "postgres")]
    let (call_repo, user_repo): (Arc<dyn CallRepository>, Arc<dyn UserRepository>) = {
        let pool = create_pool(&config.database.url).await?;
        run_migrations(&pool).await?;

        (
            Arc::new(PgCallRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
        )
    };

    #[cfg(not(feature = "postgres"))]
    let (call_repo, user_repo): (Arc<dyn CallRepository>, Arc<dyn UserRepository>) = {
        warn!("postgres feature disabled; using in-memory storage");
        (
            Arc::new(MemoryCallRepository::new()),
            Arc::new(MemoryUserRepository::new()),
        )
    };

    // Telephony gateway
    let telephony_client = Arc::new(TelephonyClient::new(&TelephonyConfig {
        provider: config.telephony.provider.clone(),
        account_sid: config.telephony.account_sid.clone(),
        auth_token: config.telephony.auth_token.clone(),
        from_number: config.telephony.from_number.clone(),
        answer_url: config.telephony.answer_url.clone(),
    })?);
    let telephony: Arc<dyn TelephonyService> = telephony_client.clone();
    info!(provider = %config.telephony.provider, "telephony client initialized");

    // Voice SDK token issuer, only when fully configured
    let voice_tokens = {
        let voice_config = VoiceTokenConfig {
            account_sid: config.telephony.account_sid.clone(),
            api_key_sid: config.voice_token.api_key_sid.clone(),
            api_key_secret: config.voice_token.api_key_secret.clone(),
            app_sid: config.voice_token.app_sid.clone(),
        };
        if voice_config.is_complete() {
            info!("voice sdk token issuer configured");
            Some(Arc::new(VoiceTokenIssuer::new(voice_config)?))
        } else {
            warn!("voice sdk credentials not configured; token endpoint disabled");
            None
        }
    };

    let jwt = Arc::new(JwtService::new(config.jwt.secret.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let state = AppState {
        register: Arc::new(RegisterUseCase::new(user_repo.clone(), clock.clone())),
        login: Arc::new(LoginUseCase::new(user_repo.clone(), jwt.clone())),
        start_call: Arc::new(StartCallUseCase::new(call_repo.clone(), clock.clone())),
        end_call: Arc::new(EndCallUseCase::new(call_repo.clone(), clock.clone())),
        initiate_call: Arc::new(InitiateCallUseCase::new(
            call_repo.clone(),
            telephony.clone(),
            voice_tokens
                .clone()
                .map(|issuer| issuer as Arc<dyn VoiceTokenGenerator>),
            clock.clone(),
        )),
        terminate_call: Arc::new(TerminateCallUseCase::new(
            call_repo.clone(),
            telephony.clone(),
            clock.clone(),
        )),
        list_history: Arc::new(ListHistoryUseCase::new(call_repo.clone())),
        jwt,
        voice_tokens,
    };

    let prometheus_handle = init_metrics();

    // Keep the live-session gauge current
    {
        let client = telephony_client.clone();
        tokio::spawn(async move {
            loop {
                metrics_handler::update_active_sessions(client.session_count().await);
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        });
    }

    let app = build_router(state, prometheus_handle);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    telephony_client.close();

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
