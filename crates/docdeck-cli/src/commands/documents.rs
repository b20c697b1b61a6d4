use anyhow::Result;
use dialoguer::Confirm;
use docdeck_core::RetrievalGateway;

use crate::cli::{
    DeleteDocumentArgs, DocumentsArgs, DocumentsCommand, ListDocumentsArgs, ShowDocumentArgs,
};
use crate::output::OutputWriter;
use crate::output_types::DocumentRow;

pub async fn execute(
    args: DocumentsArgs,
    gateway: &dyn RetrievalGateway,
    output: &OutputWriter,
) -> Result<()> {
    match args.command {
        DocumentsCommand::List(args) => list(args, gateway, output).await,
        DocumentsCommand::Show(args) => show(args, gateway, output).await,
        DocumentsCommand::Delete(args) => delete(args, gateway, output).await,
    }
}

async fn list(
    args: ListDocumentsArgs,
    gateway: &dyn RetrievalGateway,
    output: &OutputWriter,
) -> Result<()> {
    let listing = gateway.list_documents(&args.collection).await?;
    let rows: Vec<DocumentRow> = listing.documents.iter().map(DocumentRow::from).collect();
    output.table(rows)?;
    if !output.is_json() {
        output.info(format!(
            "{} documents, {} chunks in '{}'",
            listing.total_documents, listing.total_chunks, listing.collection_name
        ));
    }
    Ok(())
}

async fn show(
    args: ShowDocumentArgs,
    gateway: &dyn RetrievalGateway,
    output: &OutputWriter,
) -> Result<()> {
    let detail = gateway.document_detail(&args.collection, &args.document_id).await?;

    if output.is_json() {
        return output.result(&detail);
    }

    output.kv("Document", &detail.file_name);
    output.kv("Type", &detail.file_type);
    output.kv("Chunks", detail.total_chunks);
    for chunk in &detail.chunks {
        output.section(format!("Chunk {} ({} bytes)", chunk.chunk_index, chunk.chunk_size));
        println!("{}", chunk.chunk_text);
    }
    Ok(())
}

async fn delete(
    args: DeleteDocumentArgs,
    gateway: &dyn RetrievalGateway,
    output: &OutputWriter,
) -> Result<()> {
    if !args.yes && !output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete document '{}' from '{}'?",
                args.document_id, args.collection
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            output.info("Aborted");
            return Ok(());
        }
    }

    gateway.delete_document(&args.collection, &args.document_id).await?;
    output.success(format!("Deleted document '{}'", args.document_id));
    Ok(())
}
