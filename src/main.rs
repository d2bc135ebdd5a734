use anyhow::Context;
use clap::Parser;
use flight_binder::utils::{logger, validation::Validate};
use flight_binder::{BinderEngine, BinderSettings, ChartPipeline, CliConfig, LocalCache};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting flight-binder");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let ok = match build_engine(&config) {
        Ok(engine) => {
            let route = config.route();
            engine.execute(&config.name, &route).await
        }
        Err(e) => {
            tracing::error!("❌ Configuration failed: {:#}", e);
            eprintln!("❌ {:#}", e);
            false
        }
    };

    std::process::exit(if ok { 0 } else { 1 });
}

fn build_engine(
    config: &CliConfig,
) -> anyhow::Result<BinderEngine<ChartPipeline<LocalCache, BinderSettings>>> {
    config.validate().context("invalid arguments")?;
    let settings = config.settings().context("invalid settings")?;

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let cache = LocalCache::new(settings.cache_dir.clone());
    let pipeline = ChartPipeline::new(cache, settings, config.today())
        .context("failed to set up the HTTP client")?;

    Ok(BinderEngine::new_with_monitoring(pipeline, config.monitor))
}
