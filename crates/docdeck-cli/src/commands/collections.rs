use anyhow::{bail, Result};
use dialoguer::Confirm;
use docdeck_core::format::is_valid_collection_name;
use docdeck_core::models::DistanceMetric;
use docdeck_core::RetrievalGateway;

use crate::cli::{CollectionsArgs, CollectionsCommand, CreateCollectionArgs, DeleteCollectionArgs};
use crate::output::OutputWriter;
use crate::output_types::CollectionRow;

pub async fn execute(
    args: CollectionsArgs,
    gateway: &dyn RetrievalGateway,
    output: &OutputWriter,
) -> Result<()> {
    match args.command {
        CollectionsCommand::List => list(gateway, output).await,
        CollectionsCommand::Create(args) => create(args, gateway, output).await,
        CollectionsCommand::Delete(args) => delete(args, gateway, output).await,
    }
}

async fn list(gateway: &dyn RetrievalGateway, output: &OutputWriter) -> Result<()> {
    let collections = gateway.list_collections().await?;
    let rows: Vec<CollectionRow> = collections.iter().map(CollectionRow::from).collect();
    output.table(rows)?;
    Ok(())
}

async fn create(
    args: CreateCollectionArgs,
    gateway: &dyn RetrievalGateway,
    output: &OutputWriter,
) -> Result<()> {
    if !is_valid_collection_name(&args.name) {
        output.error(format!(
            "Invalid collection name '{}': only letters, digits, underscore and hyphen are allowed",
            args.name
        ));
        bail!("invalid collection name");
    }

    gateway
        .create_collection(&args.name, DistanceMetric::Cosine, args.description.as_deref())
        .await?;
    output.success(format!("Created collection '{}'", args.name));
    Ok(())
}

async fn delete(
    args: DeleteCollectionArgs,
    gateway: &dyn RetrievalGateway,
    output: &OutputWriter,
) -> Result<()> {
    if !args.yes && !output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete collection '{}' and all of its documents?",
                args.name
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output.info("Aborted");
            return Ok(());
        }
    }

    gateway.delete_collection(&args.name).await?;
    output.success(format!("Deleted collection '{}'", args.name));
    Ok(())
}
