use std::{net::Ipv4Addr, sync::Arc, time::Duration};

use polarity::{
    bot::{self, commands},
    config::Config,
    error::AppError,
    router,
    scheduler::reset_signals,
    service::{
        announcer,
        command_registry::CommandRegistry,
        discord::DiscordAnnouncementSink,
        dispatcher::{DispatchOptions, SignalDispatcher},
        url_watcher::HttpLinkResolver,
    },
    startup,
    state::AppState,
};
use tokio_util::sync::CancellationToken;

/// How long shutdown waits for an announcement batch to commit.
const ANNOUNCER_GRACE: Duration = Duration::from_secs(120);

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;
    let resolver = Arc::new(HttpLinkResolver::new(startup::setup_reqwest_client()?));

    let dispatcher = SignalDispatcher::new(
        db.clone(),
        resolver.clone(),
        DispatchOptions {
            poll_interval: config.url_check_interval,
            trigger_without_url_update: config.test_env && config.trigger_without_url_update,
        },
    );

    let registry = CommandRegistry::new(commands::builtin_names());
    registry.load(&db).await?;

    let state = AppState::new(
        db.clone(),
        resolver,
        dispatcher.clone(),
        registry,
        config.clone(),
    );

    tracing::info!("Starting polarity");

    let mut client = bot::start::init_bot(state.clone()).await?;
    let shard_manager = client.shard_manager.clone();

    // Subscribe before resuming so a watch that finishes at once is not missed.
    let sink = Arc::new(DiscordAnnouncementSink::new(client.http.clone()));
    let announcer_shutdown = CancellationToken::new();
    let announcer = tokio::spawn(announcer::listen(
        dispatcher.subscribe(),
        db.clone(),
        sink,
        config.disable_bad_channels,
        announcer_shutdown.clone(),
    ));

    dispatcher.resume_stale().await?;
    let mut scheduler = reset_signals::start_scheduler(dispatcher.clone()).await?;

    let relay_shutdown = CancellationToken::new();
    let listener =
        tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, config.signal_port())).await?;
    tracing::info!("Signal relay listening on {}", listener.local_addr()?);

    let relay = {
        let app = router::router().with_state(state);
        let shutdown = relay_shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
        })
    };

    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                tracing::error!("Discord bot error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
    }

    shard_manager.shutdown_all().await;
    relay_shutdown.cancel();
    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Failed to stop scheduler: {}", e);
    }
    dispatcher.shutdown().await;

    announcer_shutdown.cancel();
    match tokio::time::timeout(ANNOUNCER_GRACE, announcer).await {
        Ok(Err(e)) => tracing::error!("Announcer task failed: {}", e),
        Err(_) => tracing::warn!(
            "Announcer still busy after {}s, its batch will not be committed",
            ANNOUNCER_GRACE.as_secs()
        ),
        Ok(Ok(())) => {}
    }

    match relay.await {
        Ok(Err(e)) => tracing::error!("Signal relay error: {}", e),
        Err(e) => tracing::error!("Signal relay task failed: {}", e),
        Ok(Ok(())) => {}
    }

    tracing::info!("Stopped");

    Ok(())
}
