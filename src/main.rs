use clap::Parser;
use lifeline_admin::{cli, commands, config, error, interactive, with_resource};
use lifeline_admin::backend::Backend;
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "lifeline_admin=debug"
    } else {
        "lifeline_admin=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    let api_root = config.resolve_api_root(cli.api_root.as_deref());
    let backend = Backend::new(cli.backend, api_root);
    tracing::debug!(api_root = %backend.api_root(), backend = ?backend.kind(), "Starting");

    match cli.command {
        Commands::List { resource } => {
            with_resource!(resource, |R| commands::list::<R>(&backend).await)
        }

        Commands::Show { resource, id } => {
            with_resource!(resource, |R| commands::show::<R>(&backend, &id).await)
        }

        Commands::Create { resource, fields, file } => {
            with_resource!(resource, |R| {
                commands::create::<R>(&backend, &fields, file.as_deref()).await
            })
        }

        Commands::Update { resource, id, fields, file } => {
            with_resource!(resource, |R| {
                commands::update::<R>(&backend, &id, &fields, file.as_deref()).await
            })
        }

        Commands::Delete { resource, id, yes } => {
            with_resource!(resource, |R| commands::delete::<R>(&backend, &id, yes).await)
        }

        Commands::Page { resource } => {
            with_resource!(resource, |R| interactive::run_page::<R>(&backend).await)
        }

        Commands::Config { set_api_root, show } => {
            if let Some(url) = set_api_root {
                config.set_api_root(url)?;
                config.save()?;
                println!("✔ APIルートを設定しました: {}", config.api_root);
            }

            if show {
                let path = Config::config_path()?;
                println!("設定:");
                println!("  設定ファイル: {}", path.display());
                println!("  APIルート: {}", config.api_root);
                println!("  実際に使うAPIルート: {}", backend.api_root());
            }
            Ok(())
        }
    }
}
