use anyhow::Result;
use docdeck_core::config::ClientConfig;
use docdeck_core::{RetrievalGateway, SearchFilter};

use crate::cli::SearchArgs;
use crate::output::OutputWriter;
use crate::output_types::SearchRow;

pub async fn execute(
    args: SearchArgs,
    gateway: &dyn RetrievalGateway,
    config: &ClientConfig,
    output: &OutputWriter,
) -> Result<()> {
    let limit = args.limit.unwrap_or(config.search_limit.value);
    let min_score = args.min_score.unwrap_or(config.min_score.value);
    let filter = args.document.map(|document_id| SearchFilter { document_id });

    let response = gateway
        .search(&args.collection, &args.query, limit, min_score, filter.as_ref())
        .await?;

    let rows: Vec<SearchRow> = response.results.iter().map(SearchRow::from).collect();
    output.table(rows)?;
    if !output.is_json() {
        output.info(format!("{} results for '{}'", response.total, response.query));
    }
    Ok(())
}
