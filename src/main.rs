use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;

use storefront::api::HttpShopApi;
use storefront::config::Config;
use storefront::logging;
use storefront::runtime::Session;
use storefront::view::ConsoleView;

/// Interactive storefront session.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Cli {
    /// Path to a config file (defaults to the per-user config location).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the shop API base URL.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    if let Some(base_url) = cli.base_url {
        config.shop.base_url = base_url;
    }

    let api = HttpShopApi::new(&config.shop);
    let view = ConsoleView::stdout(config.shop.cdn_url.clone());
    let session = Session::new(api, Rc::new(RefCell::new(view)));

    session.bootstrap().await;
    session.run(std::io::stdin().lock()).await;
    Ok(())
}
