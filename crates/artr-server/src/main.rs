//! ARTR server binary.
//!
//! # Usage
//!
//! ```bash
//! # Serve the page and the transform API
//! artr-server serve --bind 127.0.0.1:3000
//!
//! # Simulate a slow module fetch and flush every two segments
//! artr-server serve --load-delay-ms 2000 --flush-every 2
//!
//! # Write one streamed page to stdout
//! artr-server render --raw 本音
//! ```

use std::{num::NonZeroUsize, time::Duration};

use artr_app::{App, AppEvent};
use artr_core::{CacheOptions, style::DEFAULT_KEY};
use artr_server::{
    DEFAULT_BIND_ADDRESS, RenderOptions, Server, ServerConfig, StreamingRenderer, WriterTransport,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ARTR encoder/decoder server
#[derive(Parser, Debug)]
#[command(name = "artr-server")]
#[command(about = "ARTR encoder/decoder page server")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the page and the transform API
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = DEFAULT_BIND_ADDRESS)]
        bind: String,

        /// Simulated module fetch time in milliseconds
        #[arg(long, default_value = "0")]
        load_delay_ms: u64,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Write one streamed page to stdout
    Render {
        /// Prefill the source text field
        #[arg(long)]
        raw: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },
}

/// Options shared by `serve` and `render`.
#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Style cache key (lowercase letters and '-')
    #[arg(long, default_value = DEFAULT_KEY)]
    cache_key: String,

    /// Do not wrap emitted styles in a cascade layer
    #[arg(long)]
    no_prepend: bool,

    /// Page segments rendered between flush points
    #[arg(long, default_value = "1")]
    flush_every: NonZeroUsize,
}

impl From<RenderArgs> for RenderOptions {
    fn from(args: RenderArgs) -> Self {
        Self {
            cache: CacheOptions::new(args.cache_key).with_prepend(!args.no_prepend),
            flush_every: args.flush_every,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // Logs go to stderr so `render` output stays clean.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match args.command {
        Command::Serve { bind, load_delay_ms, render } => {
            tracing::info!("ARTR server starting");

            let config = ServerConfig {
                bind_address: bind,
                render: render.into(),
                load_delay: Duration::from_millis(load_delay_ms),
            };

            let server = Server::bind(config).await?;

            tracing::info!("Server listening on http://{}", server.local_addr()?);

            server.run().await?;
        },
        Command::Render { raw, render } => {
            let options: RenderOptions = render.into();
            options.cache.validate()?;

            let mut app = App::new();
            if let Some(raw) = raw {
                let _ = app.handle(AppEvent::RawEdited(raw));
            }

            let mut transport = WriterTransport::new(tokio::io::stdout());
            let summary = StreamingRenderer::new(options).render(&app, &mut transport).await?;
            tracing::info!(fragments = summary.fragments, rules = summary.rules, "page written");
        },
    }

    Ok(())
}
