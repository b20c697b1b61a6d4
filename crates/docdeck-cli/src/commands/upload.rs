use anyhow::{Context, Result};
use docdeck_client::UploadTracker;
use docdeck_core::config::ClientConfig;
use docdeck_core::models::{FileUpload, UploadKind, UploadStatus};
use docdeck_core::RetrievalGateway;

use crate::cli::UploadArgs;
use crate::output::OutputWriter;
use crate::progress::UploadProgress;

pub async fn execute(
    args: UploadArgs,
    gateway: &dyn RetrievalGateway,
    config: &ClientConfig,
    output: &OutputWriter,
) -> Result<()> {
    let mut files = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        files.push(FileUpload::new(file_name, bytes));
    }

    let kind = if args.folder { UploadKind::Folder } else { UploadKind::Single };

    let progress = if output.is_json() {
        None
    } else {
        let names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
        Some(UploadProgress::new(&names))
    };

    let mut tracker = UploadTracker::new();
    tracker
        .run_batch(
            gateway,
            &args.collection,
            &files,
            kind,
            config.max_chunk_size.value,
            config.chunk_overlap.value,
        )
        .await?;

    if let Some(progress) = &progress {
        progress.update(tracker.items());
    }

    let succeeded = tracker
        .items()
        .iter()
        .filter(|i| i.status == UploadStatus::Success)
        .count();
    let failed = tracker.items().len() - succeeded;

    if output.is_json() {
        output.result(tracker.items())?;
    } else if failed == 0 {
        output.success(format!("Uploaded {} files into '{}'", succeeded, args.collection));
    } else {
        output.error(format!("{} of {} files failed", failed, tracker.items().len()));
    }

    if failed > 0 {
        anyhow::bail!("{} uploads failed", failed);
    }
    Ok(())
}
