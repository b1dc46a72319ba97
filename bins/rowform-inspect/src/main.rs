use clap::{Parser, Subcommand};
use rowform::SchemaRegistry;
use rowform::config::RegistryConfig;
use rowform_fixtures::Fixture;

#[derive(Parser)]
#[command(name = "rowform-inspect", about = "Inspect derived row schemas and sample conversions")]
struct Cli {
    /// Path to TOML registry configuration file.
    #[arg(long, env = "ROWFORM_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the fixture record types.
    List,
    /// Print the schema derived for a fixture.
    Schema {
        fixture: Fixture,
        /// Print as JSON instead of the one-line summary.
        #[arg(long)]
        json: bool,
    },
    /// Convert a fixture's sample instance to a row and back.
    Sample {
        fixture: Fixture,
        /// Use the every-field-absent sample where there is one.
        #[arg(long)]
        empty: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            tracing::info!(config = %path, "loading configuration");
            match RegistryConfig::load(path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::error!(error = %e, "failed to load config");
                    std::process::exit(1);
                }
            }
        }
        None => RegistryConfig::default(),
    };
    tracing::debug!(max_depth = config.max_depth, "registry configured");
    let registry = SchemaRegistry::with_config(config);

    match cli.command {
        Command::List => {
            for fixture in Fixture::ALL {
                match fixture.schema_in(&registry) {
                    Ok(schema) => println!("{fixture}\t{} fields", schema.len()),
                    Err(e) => println!("{fixture}\t<{e}>"),
                }
            }
        }
        Command::Schema { fixture, json } => {
            let schema = match fixture.schema_in(&registry) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(fixture = %fixture, error = %e, "schema derivation failed");
                    std::process::exit(1);
                }
            };
            if json {
                match serde_json::to_string_pretty(&*schema) {
                    Ok(text) => println!("{text}"),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to serialize schema");
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{schema}");
            }
        }
        Command::Sample { fixture, empty } => {
            let report = match fixture.sample(&registry, empty) {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(fixture = %fixture, error = %e, "sample conversion failed");
                    std::process::exit(1);
                }
            };
            match serde_json::to_string_pretty(&report.row) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize row");
                    std::process::exit(1);
                }
            }
            if !report.round_trip {
                tracing::error!(fixture = %fixture, "decoded instance differs from the sample");
                std::process::exit(1);
            }
            tracing::info!(fixture = %fixture, "sample round trip ok");
        }
    }
}
