use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use doccorpus::config::DEFAULT_DATABASE;
use doccorpus::document::parse_date;
use doccorpus::ops::{create_document, delete_document, get_index, replace_document, update_document};
use doccorpus::{CorpusConfig, CorpusError, Database, DocId, NewDocument, UpdateStatus};
use tracing_subscriber::{fmt, EnvFilter};

mod load;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Store documents with term statistics and build an inverted index", long_about = None)]
struct Cli {
    /// Database directory (defaults to $DOCCORPUS_DB, then ./doccorpse)
    #[arg(long, global = true)]
    db: Option<String>,
    /// Collection to operate on
    #[arg(long, global = true)]
    collection: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DocArgs {
    /// Document id; all-digit ids are stored as integers
    #[arg(long)]
    id: String,
    #[arg(long)]
    title: String,
    #[arg(long)]
    text: String,
    /// Date in yyyy-mm-dd format, today when omitted
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    category: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new document
    Create(DocArgs),
    /// Recompute and replace an existing document's fields
    Update(DocArgs),
    /// Delete a document and create it again with new fields
    Replace(DocArgs),
    /// Delete a document by id
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Print the inverted index of the collection as JSON
    Index,
    /// Create documents from JSON/JSONL files or a directory of them
    Load {
        #[arg(long)]
        input: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let db_path = cli
        .db
        .or_else(|| std::env::var("DOCCORPUS_DB").ok())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
    let mut config = CorpusConfig::new(&db_path);
    if let Some(name) = cli.collection {
        config = config.with_collection(name);
    }
    let db = Database::open(config).with_context(|| format!("opening database at {db_path}"))?;
    let col = db.default_collection()?;

    match cli.command {
        Commands::Create(args) => {
            create_document(&col, new_document(args)?)?;
        }
        Commands::Update(args) => {
            let id = DocId::parse(&args.id);
            match update_document(&col, new_document(args)?) {
                Ok(UpdateStatus::Modified) => {}
                Ok(UpdateStatus::Unchanged) => tracing::warn!(%id, "no documents were updated"),
                Err(CorpusError::NotFound(id)) => tracing::warn!(%id, "no documents matched"),
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Replace(args) => {
            replace_document(&col, new_document(args)?)?;
        }
        Commands::Delete { id } => match delete_document(&col, &DocId::parse(&id)) {
            Ok(()) => {}
            Err(CorpusError::NotFound(id)) => tracing::warn!(%id, "no document with this id was found"),
            Err(err) => return Err(err.into()),
        },
        Commands::Index => {
            let index = get_index(&col)?;
            println!("{}", serde_json::to_string_pretty(&index.formatted())?);
        }
        Commands::Load { input } => {
            let summary = load::load_path(&col, &input)?;
            tracing::info!(created = summary.created, skipped = summary.skipped, "load complete");
        }
    }

    db.flush()?;
    Ok(())
}

fn new_document(args: DocArgs) -> Result<NewDocument> {
    let date = match args.date {
        Some(raw) => parse_date(&raw).with_context(|| format!("invalid date {raw:?}, expected yyyy-mm-dd"))?,
        None => time::OffsetDateTime::now_utc().date(),
    };
    Ok(NewDocument {
        id: DocId::parse(&args.id),
        title: args.title,
        text: args.text,
        date,
        category: args.category,
    })
}
