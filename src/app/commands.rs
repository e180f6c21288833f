//! Subcommand dispatch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::catalog::{Catalog, CatalogStore, GeoFilter, ServerIndex, ServerRecord};
use crate::config::{Command, Config, UpdateScope};
use crate::connect::{ConnectOutcome, Connector};
use crate::probe::Prober;
use crate::profiles::{profile_path, ProfileSync};

use super::output::{
    city_rows, continent_rows, country_rows, print_table, region_rows, server_rows,
    snapshot_status,
};

/// Runs one subcommand to completion.
///
/// # Errors
///
/// Catalog and profile sync failures, unresolvable connect targets, and a
/// failed VPN client run are returned with context for the user.
pub async fn run_command(
    command: Command,
    config: &Config,
    client: Arc<reqwest::Client>,
) -> Result<()> {
    provision_data_dir(config, &Config::default_data_dir())?;
    let store = CatalogStore::from_config(Arc::clone(&client), config);

    match command {
        Command::Servers { filter, ping } => {
            let catalog = load_catalog(&store).await?;
            list_servers(&catalog, &GeoFilter::from(&filter), ping, config).await;
        }
        Command::Continents => {
            let catalog = load_catalog(&store).await?;
            let continents = ServerIndex::new(&catalog).continents();
            print_table(&["CODE", "CONTINENT"], &continent_rows(&continents));
        }
        Command::Countries { filter } => {
            let catalog = load_catalog(&store).await?;
            let countries = ServerIndex::new(&catalog).countries(&GeoFilter::from(&filter));
            print_table(&["CODE", "COUNTRY", "CONTINENT"], &country_rows(&countries));
        }
        Command::Regions { filter } => {
            let catalog = load_catalog(&store).await?;
            let regions = ServerIndex::new(&catalog).regions(&GeoFilter::from(&filter));
            print_table(&["CODE", "REGION", "COUNTRY"], &region_rows(&regions));
        }
        Command::Cities { filter } => {
            let catalog = load_catalog(&store).await?;
            let cities = ServerIndex::new(&catalog).cities(&GeoFilter::from(&filter));
            print_table(&["CITY", "COUNTRY", "CONTINENT"], &city_rows(&cities));
        }
        Command::Update { scope } => update(scope, &store, client, config).await?,
        Command::Connect { target, ca, extra } => {
            let profile = resolve_profile(&target, &store, config).await?;
            let ca = ca.unwrap_or_else(|| config.ca_path());
            if !ca.is_file() {
                bail!(
                    "CA certificate {} not found; run `vanish update --scope profiles` or pass --ca",
                    ca.display()
                );
            }

            let connector = Connector::from_config(config);
            match connector.connect(&profile, &ca, &extra).await {
                ConnectOutcome::Completed => {}
                ConnectOutcome::Disconnected => println!("{}", "Disconnected".yellow()),
                ConnectOutcome::Failed { command, status } => match status {
                    Some(code) => bail!("`{}` exited with status {}", command, code),
                    None => bail!("`{}` could not be run", command),
                },
            }
        }
    }
    Ok(())
}

/// Creates `data_dir` when the snapshot or the profile directory lives in it.
///
/// Paths configured elsewhere are left alone; a missing parent there stays an
/// error when the snapshot is written.
fn provision_data_dir(config: &Config, data_dir: &Path) -> Result<()> {
    let inside = |path: &Path| path.parent() == Some(data_dir);
    if !(inside(&config.geo_cache_path) || inside(&config.ovpn_configs_path)) {
        return Ok(());
    }
    if !data_dir.is_dir() {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        log::info!("Created data directory {}", data_dir.display());
    }
    Ok(())
}

async fn load_catalog(store: &CatalogStore) -> Result<Catalog> {
    let catalog = store.load_or_init().await.with_context(|| {
        format!(
            "Failed to load the server catalog ({})",
            store.cache_path().display()
        )
    })?;
    if let Some(status) = store.snapshot_age().and_then(snapshot_status) {
        eprintln!("{}", status.yellow());
    }
    Ok(catalog)
}

async fn list_servers(catalog: &Catalog, filter: &GeoFilter, ping: bool, config: &Config) {
    let mut servers: Vec<ServerRecord> = ServerIndex::new(catalog)
        .servers(filter)
        .into_iter()
        .cloned()
        .collect();

    let mut headers = vec!["HOSTNAME", "IP", "CITY", "REGION", "CC", "CONT"];
    if ping {
        headers.push("RTT");
        let report = Prober::from_config(config).ping(&mut servers).await;
        if !report.failures.is_empty() {
            eprintln!(
                "{}",
                format!(
                    "{} of {} servers did not answer",
                    report.failures.len(),
                    report.probed
                )
                .yellow()
            );
        }
    }
    print_table(&headers, &server_rows(&servers, ping));
}

async fn update(
    scope: UpdateScope,
    store: &CatalogStore,
    client: Arc<reqwest::Client>,
    config: &Config,
) -> Result<()> {
    if matches!(scope, UpdateScope::All | UpdateScope::Catalog) {
        let catalog = store
            .refresh()
            .await
            .context("Failed to refresh the server catalog")?;
        println!(
            "{} {} servers saved to {}",
            "catalog".green().bold(),
            catalog.len(),
            store.cache_path().display()
        );
    }

    if matches!(scope, UpdateScope::All | UpdateScope::Profiles) {
        let sync = ProfileSync::from_config(client, config);
        let report = sync
            .update()
            .await
            .context("Failed to sync OpenVPN profiles")?;
        println!(
            "{} {} profiles saved to {}",
            "profiles".green().bold(),
            report.renamed,
            sync.destination().display()
        );
        for name in &report.untouched {
            println!("  {} {}", "kept".yellow(), name);
        }
    }
    Ok(())
}

/// Finds the profile file for a profile id, hostname, short hostname, or IP.
async fn resolve_profile(target: &str, store: &CatalogStore, config: &Config) -> Result<PathBuf> {
    let dir = &config.ovpn_configs_path;

    let direct = profile_path(dir, &target.trim().to_lowercase());
    if direct.is_file() {
        return Ok(direct);
    }

    let catalog = load_catalog(store).await?;
    let server = catalog
        .find(target)
        .with_context(|| format!("No server or profile named {:?}", target))?;
    let profile_id = server.profile_id().with_context(|| {
        format!(
            "Server {} has no profile (unrecognized hostname)",
            server.hostname
        )
    })?;

    let path = profile_path(dir, &profile_id);
    if !path.is_file() {
        bail!(
            "Profile {} not found in {}; run `vanish update --scope profiles`",
            profile_id,
            dir.display()
        );
    }
    Ok(path)
}
