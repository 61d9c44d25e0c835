use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use serde_json::json;

use matrix_provider::config::load_config_value;
use matrix_provider::datasource::DataSource;
use matrix_provider::resource::Resource;
use matrix_provider::{ConfigureRequest, MatrixProvider, SharedClient};

use super::args::{Cli, Command, ConfigureArgs};
use super::render;

pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    let provider = MatrixProvider::new(env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Metadata => {
            let metadata = provider.metadata();
            println!("{} {}", metadata.type_name, metadata.version);
            Ok(ExitCode::SUCCESS)
        }
        Command::Schema => {
            let schema = serde_json::to_string_pretty(&provider.schema())
                .context("Failed to serialize provider schema")?;
            println!("{schema}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Configure(args) => {
            let ready = configure(&provider, args).await?;
            Ok(if ready { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}

/// Returns whether the cycle produced a client.
async fn configure(provider: &MatrixProvider, args: ConfigureArgs) -> Result<bool> {
    let value = load_config_value(args.config.as_deref())?;
    let response = provider.configure(ConfigureRequest::new(value)).await;

    for diagnostic in response.diagnostics() {
        eprintln!("{}\n", render::format_diagnostic(diagnostic));
    }

    let Some(client) = response.client() else {
        return Ok(false);
    };
    println!(
        "{}",
        render::format_ready(client.homeserver().as_str(), client.user_id())
    );

    for name in &args.data_sources {
        let source = find_data_source(provider, client, name)?;
        let value = source
            .read()
            .await
            .with_context(|| format!("Failed to read data source {name}"))?;
        println!("{}", serde_json::to_string_pretty(&json!({ name: value }))?);
    }

    for name in &args.resources {
        let resource = find_resource(provider, client, name)?;
        let value = resource
            .read()
            .await
            .with_context(|| format!("Failed to read resource {name}"))?;
        println!("{}", serde_json::to_string_pretty(&json!({ name: value }))?);
    }

    Ok(true)
}

fn find_data_source(
    provider: &MatrixProvider,
    client: &SharedClient,
    name: &str,
) -> Result<Box<dyn DataSource>> {
    provider
        .data_sources()
        .into_iter()
        .map(|factory| factory(client.clone()))
        .find(|source| source.type_name() == name)
        .ok_or_else(|| anyhow!("Unknown data source '{name}'"))
}

fn find_resource(
    provider: &MatrixProvider,
    client: &SharedClient,
    name: &str,
) -> Result<Box<dyn Resource>> {
    provider
        .resources()
        .into_iter()
        .map(|factory| factory(client.clone()))
        .find(|resource| resource.type_name() == name)
        .ok_or_else(|| anyhow!("Unknown resource '{name}'"))
}
