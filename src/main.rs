use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use suepr_lib::config::{self, ConfigError, Settings};
use suepr_lib::models::{CaseInput, DraftRequest, LegalProfile, UserDetails};
use suepr_lib::pipeline::cancel::CancellationToken;
use suepr_lib::pipeline::case_analysis::CaseAnalyzer;
use suepr_lib::pipeline::classify::DocumentTypeClassifier;
use suepr_lib::pipeline::drafting::{templates, DocumentDrafter};
use suepr_lib::pipeline::extraction::ExtractorRegistry;
use suepr_lib::pipeline::import::{ImportError, StagingArea, UploadPolicy, UploadedDocument};
use suepr_lib::pipeline::processor::{DocumentProcessor, ProcessingError};
use suepr_lib::pipeline::structuring::{GroqClient, LlmClient, StructuringError};

#[derive(Parser, Debug)]
#[command(name = "suepr", version, about = "Legal document intake and AI analysis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a document's text and produce a legal summary with actions
    Analyze {
        file: PathBuf,
        #[arg(long)]
        case_id: Option<String>,
        /// Give up after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Assess a case from a free-form description and legal profile
    Case {
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        case_type: String,
        #[arg(long)]
        doc_text: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Draft a legal document from case details
    Draft {
        #[arg(long)]
        document_type: String,
        #[arg(long)]
        case_summary: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        opposing_party: String,
        #[arg(long)]
        facts: String,
        #[arg(long)]
        additional_info: Option<String>,
    },
    /// Identify the kind of document and its urgency
    Classify { file: PathBuf },
    /// List the available document templates
    Templates,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error(transparent)]
    Structuring(#[from] StructuringError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Listing templates needs neither credentials nor a model backend.
    if let Command::Templates = cli.command {
        suepr_lib::init_tracing(config::default_log_filter());
        return finish(print_json(&templates()));
    }

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            suepr_lib::init_tracing(config::default_log_filter());
            tracing::error!(error = %e, "Invalid configuration");
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    suepr_lib::init_tracing(&settings.log_filter);
    tracing::info!("{} starting v{}", settings.app_name, config::APP_VERSION);

    finish(run(cli.command, &settings))
}

fn finish(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let CliError::Processing(p) = &e {
                tracing::error!(kind = p.kind().as_str(), error = %p, "Command failed");
            } else {
                tracing::error!(error = %e, "Command failed");
            }
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings: &Settings) -> Result<(), CliError> {
    let groq = GroqClient::from_settings(settings)?;
    tracing::debug!(model = groq.model(), base_url = %settings.groq_base_url, "Model backend configured");
    let llm: Arc<dyn LlmClient> = Arc::new(groq);

    match command {
        Command::Analyze {
            file,
            case_id,
            timeout_secs,
        } => {
            let processor = build_processor(settings, llm);
            let document = read_upload(&file)?;
            UploadPolicy::new(settings.max_file_size).validate_document(&document)?;

            let cancel = match timeout_secs {
                Some(secs) => CancellationToken::with_timeout(Duration::from_secs(secs)),
                None => CancellationToken::new(),
            };
            let outcome = processor.process(
                &document.raw_bytes,
                &document.declared_filename,
                case_id.as_deref(),
                &cancel,
            )?;
            print_json(&outcome)
        }
        Command::Case {
            prompt,
            name,
            state,
            case_type,
            doc_text,
            message,
        } => {
            let input = CaseInput {
                prompt,
                legal_profile: LegalProfile {
                    name,
                    state,
                    case_type,
                },
                doc_text,
                message,
            };
            print_json(&CaseAnalyzer::new(llm).analyze(&input)?)
        }
        Command::Draft {
            document_type,
            case_summary,
            name,
            address,
            opposing_party,
            facts,
            additional_info,
        } => {
            let request = DraftRequest {
                document_type,
                case_summary,
                user_details: UserDetails {
                    name,
                    address,
                    opposing_party,
                    facts,
                    additional_info,
                    tenant_name: None,
                    landlord_name: None,
                    amount: None,
                    issue: None,
                },
            };
            print_json(&DocumentDrafter::new(llm).draft(&request)?)
        }
        Command::Classify { file } => {
            let processor = build_processor(settings, Arc::clone(&llm));
            let document = read_upload(&file)?;
            UploadPolicy::new(settings.max_file_size).validate_document(&document)?;

            let extraction = processor.extract_text(
                &document.raw_bytes,
                &document.declared_filename,
                &CancellationToken::new(),
            )?;
            print_json(&DocumentTypeClassifier::new(llm).classify(&extraction.text)?)
        }
        Command::Templates => print_json(&templates()),
    }
}

fn build_processor(settings: &Settings, llm: Arc<dyn LlmClient>) -> DocumentProcessor {
    let staging = StagingArea::new(&settings.upload_temp_dir);
    // Other runs may share this directory; only sweep files nobody has touched for a while.
    staging.purge_orphans(Duration::from_secs(settings.orphan_max_age_secs));

    let registry = ExtractorRegistry::with_defaults(settings.tessdata_dir.as_deref());
    DocumentProcessor::new(registry, llm, staging)
}

fn read_upload(path: &Path) -> Result<UploadedDocument, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::ReadInput {
        path: path.display().to_string(),
        source,
    })?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(UploadedDocument::new(bytes, &filename))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
