//! `studierbridge` entry-point: loads settings, wires adapters, and runs one
//! page interaction.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use studierbridge_client::config::ClientSettings;
use studierbridge_client::domain::SessionHandle;
use studierbridge_client::inbound::cli::{self, Cli};
use studierbridge_client::inbound::pages::{PageContext, PagePorts};
use studierbridge_client::outbound::http::HttpApiClient;
use studierbridge_client::outbound::session_store::FileSessionStore;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let mut settings = ClientSettings::load_from_iter([OsString::from("studierbridge")])
        .map_err(|error| eyre!("failed to load configuration: {error}"))?;
    if args.api_base_url.is_some() {
        settings.api_base_url = args.api_base_url.clone();
    }
    if args.session_dir.is_some() {
        settings.session_dir = args.session_dir.clone();
    }
    init_tracing(settings.json_logs);

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(async_main(args, settings))
}

fn init_tracing(json: bool) {
    let subscriber = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    let installed = if json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    if let Err(e) = installed {
        warn!(error = %e, "tracing init failed");
    }
}

async fn async_main(args: Cli, settings: ClientSettings) -> Result<()> {
    let base_url = settings
        .api_base_url()
        .wrap_err("invalid backend base URL")?;
    let store = Arc::new(FileSessionStore::new(settings.session_dir()));
    let session = SessionHandle::new(store);
    let backend = HttpApiClient::new(base_url, settings.request_timeout())
        .wrap_err("failed to build HTTP client")?
        .with_session(session.clone());

    let ctx = PageContext::new(
        PagePorts::from_backend(Arc::new(backend)),
        session,
        Arc::new(DefaultClock),
    );
    cli::run(args.command, ctx, settings.poll_interval()).await
}
