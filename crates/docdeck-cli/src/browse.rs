//! Interactive browsing shell over the navigator.
//!
//! A dialoguer-driven loop that renders the current view, forwards each
//! choice to the `Navigator`, and surfaces its error slot after every
//! operation. Search inside the detail view goes through the debouncer,
//! so it behaves exactly like the embedded client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Select};
use docdeck_client::{Navigator, NavigatorSettings, ViewMode};
use docdeck_core::config::ClientConfig;
use docdeck_core::models::{FileUpload, UploadKind};
use docdeck_core::RetrievalGateway;

use crate::output::OutputWriter;
use crate::output_types::SearchRow;

pub async fn execute(
    gateway: Arc<dyn RetrievalGateway>,
    config: &ClientConfig,
    output: &OutputWriter,
) -> Result<()> {
    if output.is_json() {
        bail!("browse is interactive and does not support --json");
    }

    let mut navigator = Navigator::new(gateway, NavigatorSettings::from(config));
    navigator.refresh_collections().await;

    loop {
        report_error(&mut navigator, output);
        let quit = match navigator.state().view() {
            ViewMode::Collections => collections_view(&mut navigator, output).await?,
            ViewMode::Documents => documents_view(&mut navigator, output).await?,
            ViewMode::DocumentDetail => detail_view(&mut navigator, output).await?,
        };
        if quit {
            return Ok(());
        }
    }
}

fn report_error(navigator: &mut Navigator, output: &OutputWriter) {
    if let Some(message) = navigator.state().error() {
        output.error(message);
    }
    // Shown once, then dismissed like a toast.
    navigator.clear_error();
}

async fn collections_view(navigator: &mut Navigator, output: &OutputWriter) -> Result<bool> {
    println!("\n{}", navigator.state().header_title());

    let mut items: Vec<String> = navigator
        .state()
        .collections()
        .iter()
        .map(|c| c.display_name.clone())
        .collect();
    let first_action = items.len();
    items.push("+ Create collection".to_string());
    items.push("Delete a collection".to_string());
    items.push("Refresh".to_string());
    items.push("Quit".to_string());

    let choice = Select::new().with_prompt("Collection").items(&items).default(0).interact()?;

    if choice < first_action {
        let collection = navigator.state().collections()[choice].clone();
        navigator.select_collection(collection).await;
        return Ok(false);
    }

    match choice - first_action {
        0 => create_collection(navigator).await?,
        1 => delete_collection(navigator, output).await?,
        2 => navigator.refresh_collections().await,
        _ => return Ok(true),
    }
    Ok(false)
}

async fn create_collection(navigator: &mut Navigator) -> Result<()> {
    navigator.open_create_dialog();

    let name: String = Input::new().with_prompt("Collection name").interact_text()?;
    let description: String = Input::new()
        .with_prompt("Description (optional)")
        .allow_empty(true)
        .interact_text()?;

    navigator.set_new_collection_name(name);
    navigator.set_new_collection_description(description);
    navigator.submit_create_collection().await;

    // An invalid name or backend failure leaves the dialog open; drop it
    // here since the prompt round is over either way.
    navigator.close_create_dialog();
    Ok(())
}

async fn delete_collection(navigator: &mut Navigator, output: &OutputWriter) -> Result<()> {
    if navigator.state().collections().is_empty() {
        output.info("Nothing to delete");
        return Ok(());
    }

    let names: Vec<String> = navigator
        .state()
        .collections()
        .iter()
        .map(|c| c.display_name.clone())
        .collect();
    let choice = Select::new().with_prompt("Delete which collection?").items(&names).interact()?;
    let collection = navigator.state().collections()[choice].clone();

    navigator.request_delete_collection(collection.clone());
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Delete '{}' and all of its documents?",
            collection.display_name
        ))
        .default(false)
        .interact()?;

    if confirmed {
        navigator.confirm_delete_collection().await;
    } else {
        navigator.cancel_delete_collection();
    }
    Ok(())
}

async fn documents_view(navigator: &mut Navigator, output: &OutputWriter) -> Result<bool> {
    println!("\n{}", navigator.state().header_title());

    let mut items: Vec<String> = navigator
        .state()
        .documents()
        .iter()
        .map(|d| format!("{} ({} chunks)", d.file_name, d.actual_chunks))
        .collect();
    let first_action = items.len();
    items.push("Upload files".to_string());
    items.push("Delete a document".to_string());
    items.push("Back".to_string());

    let choice = Select::new().with_prompt("Document").items(&items).default(0).interact()?;

    if choice < first_action {
        let document = navigator.state().documents()[choice].clone();
        navigator.select_document(document).await;
        return Ok(false);
    }

    match choice - first_action {
        0 => upload_files(navigator, output).await?,
        1 => delete_document(navigator, output).await?,
        _ => navigator.go_back(),
    }
    Ok(false)
}

async fn upload_files(navigator: &mut Navigator, output: &OutputWriter) -> Result<()> {
    let input: String = Input::new()
        .with_prompt("Files to upload (comma-separated paths)")
        .interact_text()?;

    let mut files = Vec::new();
    for raw in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let path = PathBuf::from(raw);
        match std::fs::read(&path) {
            Ok(bytes) => {
                let file_name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| raw.to_string());
                files.push(FileUpload::new(file_name, bytes));
            }
            Err(e) => output.error(format!("Skipping {}: {}", raw, e)),
        }
    }
    if files.is_empty() {
        output.info("Nothing to upload");
        return Ok(());
    }

    let kind = if files.len() > 1 { UploadKind::Folder } else { UploadKind::Single };
    let count = files.len();
    navigator.upload_files(files, kind).await?;
    output.success(format!("Processed {} files", count));
    Ok(())
}

async fn delete_document(navigator: &mut Navigator, output: &OutputWriter) -> Result<()> {
    if navigator.state().documents().is_empty() {
        output.info("Nothing to delete");
        return Ok(());
    }

    let names: Vec<String> =
        navigator.state().documents().iter().map(|d| d.file_name.clone()).collect();
    let choice = Select::new().with_prompt("Delete which document?").items(&names).interact()?;
    let document = navigator.state().documents()[choice].clone();

    navigator.request_delete_document(document.clone());
    let confirmed = Confirm::new()
        .with_prompt(format!("Delete '{}'?", document.file_name))
        .default(false)
        .interact()?;

    if confirmed {
        navigator.confirm_delete_document().await;
    } else {
        navigator.cancel_delete_document();
    }
    Ok(())
}

async fn detail_view(navigator: &mut Navigator, output: &OutputWriter) -> Result<bool> {
    println!("\n{}", navigator.state().header_title());

    if let Some(detail) = navigator.state().document_detail() {
        for chunk in detail.chunks.iter().take(3) {
            let preview: String = chunk.chunk_text.chars().take(100).collect();
            println!("  [{}] {}", chunk.chunk_index, preview);
        }
        if detail.chunks.len() > 3 {
            println!("  … {} more chunks", detail.chunks.len() - 3);
        }
    }

    let items = vec!["Search in this collection", "Back"];
    let choice = Select::new().with_prompt("Action").items(&items).default(0).interact()?;

    match choice {
        0 => {
            let query: String = Input::new()
                .with_prompt("Search query")
                .allow_empty(true)
                .interact_text()?;
            navigator.set_search_query(query.clone());
            if query.trim().is_empty() {
                return Ok(false);
            }

            // Wait out the quiet period and run the settled query.
            navigator.next_settled_search().await;
            let rows: Vec<SearchRow> =
                navigator.state().search_results().iter().map(SearchRow::from).collect();
            output.table(rows)?;
            Ok(false)
        }
        _ => {
            navigator.go_back();
            Ok(false)
        }
    }
}
