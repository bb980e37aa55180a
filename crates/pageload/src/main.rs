use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use event_sink::encoders::create_encoder;
use event_sink::http::HttpEventSink;
use event_sink::log::LogSink;
use pageload::config::ReplayArgs;
use pageload::snapshot::BrowserSnapshot;
use pageload::LoadListener;
use pageload::PageLoadEventBuilder;
use pageload::PageSession;
use pageload::SharedSink;
use pageload::UnloadEventBuilder;
use pageload::UnloadListener;
use utils::logging;
use utils::version;

/// Sets up global panic hooks.
fn setup_global_hooks() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        default_hook(panic_info);
        tracing::error!("Thread panicked: {}", panic_info);
    }));
}

fn build_sink(args: &ReplayArgs) -> Result<SharedSink> {
    match args.http_sink_config() {
        Some(config) => {
            tracing::info!(url = %config.event_url(), "delivering events to collector");
            let sink = HttpEventSink::new(config).context("invalid collector configuration")?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(LogSink::new(create_encoder(args.format.as_str())))),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_global_hooks();

    let args = ReplayArgs::parse();
    let _guard = logging::init_with_event_log(args.event_log.as_ref())
        .context("failed to initialise logging")?;

    tracing::info!("Starting pageload-replay {}", &**version::VERSION);

    let snapshot = BrowserSnapshot::from_path(&args.snapshot)
        .map_err(|report| anyhow::anyhow!("{report:?}"))?;
    let ctx = Arc::new(snapshot);
    let sink = build_sink(&args)?;

    let session = Arc::new(PageSession::start(&*ctx));
    let builder = PageLoadEventBuilder::new(session.clone()).with_tracked_assets(args.tracked_assets());
    let listener = LoadListener::new(ctx.clone(), builder, sink.clone());

    let delivery = listener
        .on_load()
        .await
        .context("page-load event was not emitted")?;
    delivery.await.context("page-load delivery task failed")?;

    if args.emit_unload {
        let unload = UnloadListener::new(ctx, UnloadEventBuilder::new(session), sink);
        tokio::task::spawn_blocking(move || unload.on_unload())
            .await
            .context("page-unload delivery task failed")?;
    }

    Ok(())
}
