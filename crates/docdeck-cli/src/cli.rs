use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// DocDeck - browse and feed a document-retrieval backend
#[derive(Parser, Debug)]
#[command(name = "docdeck")]
#[command(about = "Browse and feed a document-retrieval backend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Backend base URL (overrides config file and environment)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Gateway backend to use (memory or http)
    #[arg(long, global = true, default_value = "http")]
    pub backend: GatewayBackend,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Gateway backend selection
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum GatewayBackend {
    /// In-process gateway (for development; state lasts one invocation)
    Memory,
    /// REST gateway against a live backend
    Http,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage collections
    Collections(CollectionsArgs),

    /// Manage documents within a collection
    Documents(DocumentsArgs),

    /// Search a collection
    Search(SearchArgs),

    /// Upload files into a collection
    Upload(UploadArgs),

    /// Browse the backend interactively
    Browse(BrowseArgs),

    /// Show the effective configuration and where each value came from
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct CollectionsArgs {
    #[command(subcommand)]
    pub command: CollectionsCommand,
}

#[derive(Subcommand, Debug)]
pub enum CollectionsCommand {
    /// List all collections
    List,

    /// Create a collection
    Create(CreateCollectionArgs),

    /// Delete a collection and everything in it
    Delete(DeleteCollectionArgs),
}

#[derive(Parser, Debug)]
pub struct CreateCollectionArgs {
    /// Collection name (letters, digits, underscore, hyphen)
    pub name: String,

    /// Optional description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteCollectionArgs {
    /// Collection to delete
    pub name: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct DocumentsArgs {
    #[command(subcommand)]
    pub command: DocumentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DocumentsCommand {
    /// List documents of a collection
    List(ListDocumentsArgs),

    /// Show one document with its full chunk text
    Show(ShowDocumentArgs),

    /// Delete one document from a collection
    Delete(DeleteDocumentArgs),
}

#[derive(Parser, Debug)]
pub struct ListDocumentsArgs {
    /// Collection to list
    pub collection: String,
}

#[derive(Parser, Debug)]
pub struct ShowDocumentArgs {
    /// Owning collection
    pub collection: String,

    /// Document identifier
    pub document_id: String,
}

#[derive(Parser, Debug)]
pub struct DeleteDocumentArgs {
    /// Owning collection
    pub collection: String,

    /// Document identifier
    pub document_id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Collection to search
    pub collection: String,

    /// The query text
    pub query: String,

    /// Number of results to return
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,

    /// Minimum score floor
    #[arg(long)]
    pub min_score: Option<f32>,

    /// Narrow the search to one document
    #[arg(long)]
    pub document: Option<String>,
}

#[derive(Parser, Debug)]
pub struct UploadArgs {
    /// Target collection
    pub collection: String,

    /// Files to upload
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Tag the batch as coming from a folder picker
    #[arg(long)]
    pub folder: bool,
}

#[derive(Parser, Debug)]
pub struct BrowseArgs {}

#[derive(Parser, Debug)]
pub struct ConfigArgs {}
