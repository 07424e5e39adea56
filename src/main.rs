use std::{process, sync::Arc};

use sitemeta::{
    application::{data_layer::MetadataQuery, error::AppError, metadata::MetadataService},
    config,
    domain::store::ConfigurationStore,
    infra::{
        data_layer::StaticDataLayer, error::InfraError, images::LocalImagePipeline, store_file,
        telemetry,
    },
    presentation::views::{AffiliateCardView, CarbonAdsBannerView},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let causes = error.chain().join(": ");
    if dispatcher::has_been_set() {
        error!(error = %causes, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %causes, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Show(config::ShowArgs::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Show(args) => run_show(&settings, args.pretty),
        config::Command::Check => run_check(&settings),
        config::Command::Affiliate(args) => run_affiliate(&settings, &args.tags),
        config::Command::Query => {
            print!("{}", MetadataQuery::site_metadata().to_graphql());
            Ok(())
        }
    }
}

fn load_store(settings: &config::Settings) -> Result<Arc<ConfigurationStore>, AppError> {
    let store = match settings.store.file.as_deref() {
        Some(path) => store_file::load_store(path, settings.environment)?,
        None => {
            let store = ConfigurationStore::builtin(settings.environment);
            store.validate()?;
            store
        }
    };
    Ok(Arc::new(store))
}

fn metadata_service(
    settings: &config::Settings,
    store: Arc<ConfigurationStore>,
) -> Result<MetadataService, AppError> {
    if !settings.assets.directory.is_dir() {
        return Err(InfraError::configuration(format!(
            "assets directory `{}` does not exist",
            settings.assets.directory.display()
        ))
        .into());
    }
    let images = Arc::new(LocalImagePipeline::new(settings.assets.directory.clone()));
    let data_layer = Arc::new(StaticDataLayer::new(store, images));
    Ok(MetadataService::new(data_layer))
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), AppError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|err| AppError::unexpected(format!("failed to render output: {err}")))?;
    println!("{out}");
    Ok(())
}

fn run_show(settings: &config::Settings, pretty: bool) -> Result<(), AppError> {
    let store = load_store(settings)?;
    let service = metadata_service(settings, store)?;
    let projected = service.load()?;
    print_json(&projected, pretty)
}

fn run_check(settings: &config::Settings) -> Result<(), AppError> {
    let store = load_store(settings)?;
    let ads = CarbonAdsBannerView::from_service(store.carbon_ads_service());

    info!(
        target = "sitemeta::check",
        op = "check",
        result = "ok",
        environment = %settings.environment,
        "Configuration store is valid"
    );
    println!(
        "store ok: site `{}`, {} affiliate offer(s), environment {}, ads {}",
        store.site_info().title,
        store.affiliates().len(),
        settings.environment,
        if ads.is_some() { "served" } else { "not served" }
    );
    Ok(())
}

fn run_affiliate(settings: &config::Settings, tags: &[String]) -> Result<(), AppError> {
    let store = load_store(settings)?;
    let service = metadata_service(settings, store)?;
    let projected = service.load()?;

    match AffiliateCardView::for_article(&projected, tags) {
        Some(card) => print_json(&card, true),
        None => {
            println!("no affiliate offer matches tags: {}", tags.join(", "));
            Ok(())
        }
    }
}
