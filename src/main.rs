// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;
use pokeshelf::{
    Catalog, CollectionStore, FileStore, PokeApi, PokeShelf,
    core::CatalogSettings,
    flags::{self, Cli},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anywho::Error> {
    // Logs go to stderr, stdout only carries the page
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let flags = flags::flags(&cli)?;
    let messages = cli.command.messages()?;

    let data_dir = flags.config.data_dir()?;
    tracing::debug!(data_dir = %data_dir.display(), "Opening collection store");
    let collections = CollectionStore::new(FileStore::open(data_dir)?);

    let catalog = Catalog::with_settings(
        PokeApi::new(&flags.config.api_base_url),
        CatalogSettings::from(&flags.config),
    );

    let mut app = PokeShelf::new(catalog, collections);
    for message in messages {
        app.update(message).await?;
    }

    print!("{}", app.page());
    Ok(())
}
