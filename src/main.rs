use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{ArgGroup, Parser, Subcommand};
use serde::Serialize;

use obsdesk::api::ApiClient;
use obsdesk::attachment::{
    AttachmentKind, AttachmentPolicy, AttachmentService, SelectedFile, SelectionWarnings,
};
use obsdesk::config::{Config, API_URL_ENV};
use obsdesk::form::validate_record;
use obsdesk::logging::init_tracing;
use obsdesk::model::{RecordDraft, SearchOverrides, SortDirection, WorkflowStatus};
use obsdesk::service::{EndpointMap, HttpEntityService, TransitionKind, TransitionRequest};
use obsdesk::store::EntityStore;

#[derive(Parser)]
#[command(name = "obsdesk", version)]
#[command(about = "Command-line client for the observation / article workflow backend")]
struct Cli {
    /// Config file (default: <config dir>/obsdesk/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API origin, overrides the config file and OBSDESK_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Entity to operate on, as named in the config
    #[arg(long, global = true, default_value = "observation")]
    entity: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search records, one page at a time
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        /// Free-text search term
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        status: Option<WorkflowStatus>,
        #[arg(long = "type")]
        record_type: Option<String>,
        #[arg(long)]
        main_unit: Option<String>,
        #[arg(long)]
        subunit: Option<String>,
        #[arg(long)]
        assignment: Option<String>,
        /// Lower date bound, as the backend expects it (e.g. 2024-01-31)
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
        /// asc or desc
        #[arg(long)]
        sort: Option<SortDirection>,
    },
    /// Show one record
    Show { id: i64 },
    /// Create a record from a JSON draft file
    Create { file: PathBuf },
    /// Replace a record with a JSON draft file
    Update { id: i64, file: PathBuf },
    /// Delete a record
    Delete { id: i64 },
    /// Check a JSON draft file without sending it
    Validate { file: PathBuf },
    /// Apply a workflow transition (submit, approve, reject, archive)
    Transition {
        kind: TransitionKind,
        id: i64,
        /// Required for reject and archive
        #[arg(long)]
        reason: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Dashboard counters
    Stats,
    /// Dropdown values for the record form
    Lookups,
    /// Audit history of a record
    History { id: i64 },
    /// Check whether a title is still free
    TitleCheck {
        title: String,
        /// Record to ignore, when renaming an existing one
        #[arg(long)]
        exclude: Option<i64>,
    },
    /// Validate, encode and upload an attachment
    #[command(group(ArgGroup::new("owner").required(true).args(["observation", "request"])))]
    Upload {
        path: PathBuf,
        #[arg(long)]
        observation: Option<i64>,
        #[arg(long)]
        request: Option<i64>,
        /// Attachment title (default: the file name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Download a stored attachment (fatwa, comment, request)
    Download {
        kind: AttachmentKind,
        id: i64,
        /// Target directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_api_url_override(std::env::var(API_URL_ENV).ok());
            config
        }
        None => Config::load()?,
    };
    config.apply_api_url_override(cli.api_url.clone());
    config.validate()?;
    Ok(config)
}

fn read_draft(path: &Path) -> anyhow::Result<RecordDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid draft in {}", path.display()))
}

/// Fails with the store's error message when an action reported failure.
fn ensure(ok: bool, store: &EntityStore) -> anyhow::Result<()> {
    if ok {
        return Ok(());
    }
    let message = store
        .state()
        .error
        .unwrap_or_else(|| "Request failed".to_string());
    bail!(message)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let client = ApiClient::new(&config.api)?;
    let endpoints = EndpointMap::from(config.entity(&cli.entity)?);
    let service = Arc::new(HttpEntityService::new(client.clone(), endpoints));
    let store = EntityStore::with_page_size(service, config.paging.default_page_size);

    match cli.command {
        Commands::List {
            page,
            size,
            term,
            status,
            record_type,
            main_unit,
            subunit,
            assignment,
            from,
            to,
            sort_by,
            sort,
        } => {
            let overrides = SearchOverrides {
                search_term: term,
                record_type,
                status: status.map(|s| s.to_string()),
                originating_main_unit: main_unit,
                originating_subunit: subunit,
                current_assignment: assignment,
                date_from: from,
                date_to: to,
                page_number: page,
                page_size: size,
                sort_by,
                sort_direction: sort,
            };
            store.load(overrides).await;
            let state = store.state();
            ensure(state.error.is_none(), &store)?;
            print_json(&serde_json::json!({
                "records": state.records,
                "totalCount": state.total_count,
                "pageNumber": state.page_number,
                "pageSize": state.page_size,
                "totalPages": state.total_pages,
            }))?;
        }
        Commands::Show { id } => {
            let record = store.load_by_id(id).await;
            ensure(record.is_some(), &store)?;
            print_json(&record)?;
        }
        Commands::Create { file } => {
            let draft = read_draft(&file)?;
            let created = store.create(&draft).await;
            ensure(created.is_some(), &store)?;
            print_json(&created)?;
        }
        Commands::Update { id, file } => {
            let draft = read_draft(&file)?;
            let ok = store.update(id, &draft).await;
            ensure(ok, &store)?;
            print_json(&serde_json::json!({ "updated": id }))?;
        }
        Commands::Delete { id } => {
            let ok = store.remove(id).await;
            ensure(ok, &store)?;
            print_json(&serde_json::json!({ "deleted": id }))?;
        }
        Commands::Validate { file } => {
            let draft = read_draft(&file)?;
            if let Err(errors) = validate_record(&draft) {
                print_json(&errors)?;
                bail!("{} field(s) invalid", errors.len());
            }
            print_json(&serde_json::json!({ "valid": true }))?;
        }
        Commands::Transition {
            kind,
            id,
            reason,
            notes,
        } => {
            let request = TransitionRequest::new(kind, reason, notes).map_err(anyhow::Error::msg)?;
            let ok = store.transition(id, request).await;
            ensure(ok, &store)?;
            print_json(&serde_json::json!({ "id": id, "transition": kind.as_str() }))?;
        }
        Commands::Stats => {
            store.load_stats().await;
            match store.state().stats {
                Some(stats) => print_json(&stats)?,
                None => bail!("Failed to fetch stats"),
            }
        }
        Commands::Lookups => {
            store.load_lookups().await;
            match store.state().lookups {
                Some(lookups) => print_json(&lookups)?,
                None => bail!("Failed to fetch lookup data"),
            }
        }
        Commands::History { id } => {
            let entries = store.history(id).await;
            ensure(entries.is_some(), &store)?;
            print_json(&entries)?;
        }
        Commands::TitleCheck { title, exclude } => {
            let available = store.check_title_availability(&title, exclude).await;
            print_json(&serde_json::json!({ "title": title, "isAvailable": available }))?;
        }
        Commands::Upload {
            path,
            observation,
            request,
            title,
        } => {
            let policy = AttachmentPolicy::from(&config.attachments);
            let file = SelectedFile::from_path(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mut warnings = SelectionWarnings::default();
            let Some(prepared) = policy.prepare(&file, &mut warnings) else {
                if let Some(message) = warnings.type_message {
                    bail!(message);
                }
                bail!(
                    "{} exceeds the {} MB limit",
                    file.file_name,
                    policy.max_file_size_mb()
                );
            };

            let title = title.unwrap_or_else(|| prepared.file_name.clone());
            let attachments = AttachmentService::new(client);
            let envelope = match (observation, request) {
                (Some(id), _) => {
                    attachments
                        .upload_observation(&prepared.into_observation_attachment(id, title))
                        .await
                }
                (None, Some(id)) => {
                    attachments
                        .upload_request(&prepared.into_request_attachment(id, title))
                        .await
                }
                (None, None) => bail!("--observation or --request is required"),
            };
            if !envelope.success {
                bail!(envelope.message);
            }
            print_json(&envelope)?;
        }
        Commands::Download { kind, id, out } => {
            let file = AttachmentService::new(client).download(kind, id).await?;
            let path = file.save_into(&out).await?;
            print_json(&serde_json::json!({
                "path": path,
                "fileName": file.file_name,
                "size": file.bytes.len(),
            }))?;
        }
    }

    Ok(())
}
