//! Clientele CLI - customer desk in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # First page of customers matching "smith"
//! crm list --query smith
//!
//! # Interactive, debounced search
//! crm browse
//!
//! # Make an address the primary one
//! crm address set-primary 3 5f0c...
//!
//! # Delete without the confirmation prompt
//! crm delete 3 --yes
//! ```
//!
//! Configuration comes from the environment (see `clientele_desk::config`);
//! `--api-url` overrides `CRM_API_BASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use clientele_desk::{CustomerService, DeskConfig, LogFormat};

mod commands;
mod output;

use commands::{AddressFields, CommandError, Confirmation};

#[derive(Parser)]
#[command(name = "crm")]
#[command(author, version, about = "Clientele customer desk")]
struct Cli {
    /// Customer service base URL (overrides `CRM_API_BASE_URL`)
    #[arg(long, global = true)]
    api_url: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List customers, one page at a time
    List {
        /// Case-insensitive search over name, email and phone
        #[arg(short, long, default_value = "")]
        query: String,

        /// Page number (clamped to the available pages)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Interactive list with live search
    Browse,
    /// Show a customer and its addresses
    Show {
        /// Customer ID
        id: String,
    },
    /// Create a customer
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: String,
    },
    /// Update a customer's contact details
    Update {
        /// Customer ID
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        phone: Option<String>,
    },
    /// Delete a customer
    Delete {
        /// Customer ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage a customer's addresses
    Address {
        #[command(subcommand)]
        action: AddressAction,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// Add an address
    Add {
        /// Customer ID
        customer: String,

        #[command(flatten)]
        fields: AddressFields,
    },
    /// Change an existing address
    Update {
        /// Customer ID
        customer: String,

        /// Address ID
        address: String,

        #[command(flatten)]
        fields: AddressFields,
    },
    /// Delete an address
    Delete {
        /// Customer ID
        customer: String,

        /// Address ID
        address: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Make an address the customer's primary address
    SetPrimary {
        /// Customer ID
        customer: String,

        /// Address ID
        address: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &DeskConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clientele_desk=info,clientele_cli=info".into());

    let is_json = format == LogFormat::Json;
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match DeskConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "crm: {e}");
            std::process::exit(1);
        }
    };
    if let Some(url) = cli.api_url.clone() {
        config.api_base_url = url;
    }

    // Sentry before the subscriber so the tracing layer has a client
    let sentry_guard = init_sentry(&config);
    init_tracing(config.log_format);

    let result = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &DeskConfig) -> Result<(), CommandError> {
    let api = CustomerService::new(config).map_err(clientele_desk::AppError::from)?;
    tracing::debug!(base_url = %api.base_url(), "Using customer service");

    match cli.command {
        Commands::List { query, page } => {
            commands::customers::list(api, config.page_size, &query, page).await
        }
        Commands::Browse => {
            commands::browse::run(api, config.page_size, config.search_debounce).await
        }
        Commands::Show { id } => commands::customers::show(api, &id.into()).await,
        Commands::Create { name, email, phone } => {
            commands::customers::create(api, name, email, phone).await
        }
        Commands::Update {
            id,
            name,
            email,
            phone,
        } => commands::customers::update(api, &id.into(), name, email, phone).await,
        Commands::Delete { id, yes } => {
            commands::customers::delete(api, &id.into(), Confirmation::new(yes)).await
        }
        Commands::Address { action } => match action {
            AddressAction::Add { customer, fields } => {
                commands::addresses::add(api, &customer.into(), fields).await
            }
            AddressAction::Update {
                customer,
                address,
                fields,
            } => commands::addresses::update(api, &customer.into(), &address.into(), fields).await,
            AddressAction::Delete {
                customer,
                address,
                yes,
            } => {
                commands::addresses::delete(
                    api,
                    &customer.into(),
                    &address.into(),
                    Confirmation::new(yes),
                )
                .await
            }
            AddressAction::SetPrimary { customer, address } => {
                commands::addresses::set_primary(api, &customer.into(), &address.into()).await
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_address_add() {
        let cli = Cli::try_parse_from([
            "crm", "address", "add", "7", "--name", "Home", "--street", "1 Main St", "--city",
            "Portland", "--state", "OR", "--country", "USA", "--primary",
        ]);
        let Ok(Cli {
            command:
                Commands::Address {
                    action: AddressAction::Add { customer, fields },
                },
            ..
        }) = cli
        else {
            panic!("expected address add");
        };
        assert_eq!(customer, "7");
        assert_eq!(fields.name.as_deref(), Some("Home"));
        assert!(fields.primary);
        assert!(fields.zip.is_none());
    }

    #[test]
    fn test_parse_list_defaults() {
        let cli = Cli::try_parse_from(["crm", "list"]);
        assert!(matches!(
            cli,
            Ok(Cli {
                command: Commands::List { page: 1, .. },
                api_url: None,
            })
        ));
    }
}
