//! CLI entrypoint for scribe
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use scribe_application::{
    DocumentService, DocumentStore, UserStore, WorkflowFacade, WorkflowLogger,
};
use scribe_domain::{BackendKind, SupabaseBackendConfig};
use scribe_infrastructure::{
    ConfigLoader, FileConfig, InMemoryBackend, JsonlWorkflowLogger, ProviderRegistry,
    SupabaseBackend,
};
use scribe_presentation::{
    Cli, Command, DocsCommand, OutputFormatter, exit_code, formatter_for,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let provider_config = config.providers.to_provider_config();
    let registry = ProviderRegistry::with_builtins(&provider_config);

    if cli.show_config {
        println!();
        println!("Providers: {}", registry.registered_kinds().join(", "));
        println!("Default provider: {}", provider_config.kind().0);
        println!("Backend: {}", config.backend.to_backend_config().kind);
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        bail!("No command given. Run `scribe --help` for usage.");
    };

    info!("Starting scribe");

    // === Dependency Injection ===
    let provider = match &cli.provider {
        Some(key) => registry.create(key),
        None => registry.create_kind(provider_config.kind().0),
    };
    info!("AI provider: {}", provider.name());

    let backend_config = config.backend.to_backend_config();
    let backend_kind = cli
        .backend
        .map(BackendKind::from)
        .unwrap_or(backend_config.kind);
    let (users, documents) = build_backend(backend_kind, &backend_config.supabase, &command)?;

    let mut facade = WorkflowFacade::new(provider, users, documents);
    if let Some(logger) = workflow_logger(&config) {
        facade = facade.with_workflow_logger(logger);
    }

    let formatter = formatter_for(cli.output);
    let code = match (command.to_request(), command) {
        (Some(request), _) => {
            let response = facade.dispatch(request).await;
            print!("{}", formatter.format_response(&response));
            exit_code(&response)
        }
        (None, Command::Docs { action }) => {
            run_docs(facade.documents(), action, formatter.as_ref()).await
        }
        (None, other) => bail!("Unsupported command: {:?}", other),
    };

    Ok(ExitCode::from(code))
}

/// Set up stderr diagnostics and, when requested, a second copy in a file.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty());
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender =
                tracing_appender::rolling::never(directory.unwrap_or(Path::new(".")), file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Build the persistence backend.
///
/// Question and completion commands never touch it, so an unconfigured
/// Supabase project only matters for account and document commands.
fn build_backend(
    kind: BackendKind,
    supabase: &SupabaseBackendConfig,
    command: &Command,
) -> Result<(Arc<dyn UserStore>, Arc<dyn DocumentStore>)> {
    if kind == BackendKind::Supabase {
        match SupabaseBackend::new(supabase) {
            Ok(backend) => {
                let backend = Arc::new(backend);
                let users: Arc<dyn UserStore> = backend.clone();
                let documents: Arc<dyn DocumentStore> = backend;
                return Ok((users, documents));
            }
            Err(e) if needs_backend(command) => {
                return Err(e).context("Supabase backend is not configured");
            }
            Err(e) => warn!("{}; using the in-memory backend", e),
        }
    }
    info!("Persistence backend: memory");
    let backend = Arc::new(InMemoryBackend::new());
    let users: Arc<dyn UserStore> = backend.clone();
    let documents: Arc<dyn DocumentStore> = backend;
    Ok((users, documents))
}

fn needs_backend(command: &Command) -> bool {
    matches!(
        command,
        Command::Register { .. } | Command::Login { .. } | Command::Docs { .. }
    )
}

fn workflow_logger(config: &FileConfig) -> Option<Arc<dyn WorkflowLogger>> {
    let path = config.logging.workflow_log.as_ref()?;
    match JsonlWorkflowLogger::open(path) {
        Ok(logger) => {
            info!("Workflow log: {}", logger.path().display());
            Some(Arc::new(logger))
        }
        Err(e) => {
            warn!("Could not open workflow log {}: {}", path.display(), e);
            None
        }
    }
}

async fn run_docs(
    service: &DocumentService,
    action: DocsCommand,
    formatter: &dyn OutputFormatter,
) -> u8 {
    let result = match action {
        DocsCommand::Create { content, email } => service
            .create(&content, &email)
            .await
            .map(|d| formatter.format_document(&d)),
        DocsCommand::List { email } => service
            .list(&email)
            .await
            .map(|list| formatter.format_documents(&list)),
        DocsCommand::Get { id, email } => service
            .get(id, &email)
            .await
            .map(|d| formatter.format_document(&d)),
        DocsCommand::Update { id, content, email } => service
            .update(id, &content, &email)
            .await
            .map(|d| formatter.format_document(&d)),
        DocsCommand::Delete { id, email } => service
            .delete(id, &email)
            .await
            .map(|d| formatter.format_document(&d)),
    };

    match result {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            eprint!("{}", formatter.format_document_error(&e));
            1
        }
    }
}
