use clap::{Parser, Subcommand};
use idsmith_uuid::{
    inspect, node_id_from_env_value, required_fields, GeneratorConfig, Namespace, UuidRequest,
    UuidResult, UuidService, UuidVersion,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "idsmith")]
#[command(about = "Generate, validate and inspect UUIDs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate UUIDs
    Generate {
        /// v1, v4, v5, v6, v7, nil or max
        #[arg(default_value = "v4")]
        version: UuidVersion,
        /// How many to generate (1-100)
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Print upper case hex
        #[arg(short, long)]
        uppercase: bool,
        /// Omit the 8-4-4-4-12 hyphens
        #[arg(long)]
        no_hyphens: bool,
        /// Name to hash (v5)
        #[arg(long)]
        name: Option<String>,
        /// url, dns, custom or a namespace UUID (v5)
        #[arg(long)]
        namespace: Option<Namespace>,
        /// Namespace UUID when --namespace is custom
        #[arg(long)]
        custom_namespace: Option<String>,
    },
    /// Check whether a string is a UUID
    Validate {
        /// Candidate string
        candidate: String,
    },
    /// Show which inputs a version needs
    Fields {
        /// v1, v4, v5, v6, v7, nil or max
        version: UuidVersion,
        /// url, dns, custom or a namespace UUID
        #[arg(long)]
        namespace: Option<Namespace>,
    },
    /// Show the version, variant and timestamp of a UUID
    Inspect {
        /// UUID to decode
        candidate: String,
    },
}

/// Lines to print and whether the command succeeded.
struct Output {
    lines: Vec<String>,
    success: bool,
}

impl Output {
    fn ok(lines: Vec<String>) -> Self {
        Self {
            lines,
            success: true,
        }
    }
}

fn execute(command: Commands, service: &UuidService) -> UuidResult<Output> {
    match command {
        Commands::Generate {
            version,
            count,
            uppercase,
            no_hyphens,
            name,
            namespace,
            custom_namespace,
        } => {
            let request = UuidRequest {
                version,
                count,
                uppercase,
                hyphens: !no_hyphens,
                name,
                namespace,
                custom_namespace,
            };
            Ok(Output::ok(service.generate(&request)?))
        }
        Commands::Validate { candidate } => {
            let valid = UuidService::validate(&candidate);
            Ok(Output {
                lines: vec![if valid { "valid" } else { "invalid" }.to_string()],
                success: valid,
            })
        }
        Commands::Fields { version, namespace } => {
            let fields = required_fields(version, namespace.as_ref());
            Ok(Output::ok(vec![
                format!("name: {}", fields.name),
                format!("namespace: {}", fields.namespace),
                format!("custom_namespace: {}", fields.custom_namespace),
            ]))
        }
        Commands::Inspect { candidate } => {
            let info = inspect(&candidate)?;
            let mut lines = vec![
                format!("version: {}", info.version),
                format!("variant: {:?}", info.variant),
            ];
            if let Some(timestamp) = info.timestamp {
                lines.push(format!("timestamp: {}", timestamp.to_rfc3339()));
            }
            Ok(Output::ok(lines))
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'idsmith --help' for commands");
        return Ok(ExitCode::SUCCESS);
    };

    let node_id = node_id_from_env_value(std::env::var("IDSMITH_NODE_ID").ok())?;
    let service = UuidService::with_config(GeneratorConfig::new(node_id));

    match execute(command, &service) {
        Ok(output) => {
            for line in &output.lines {
                println!("{}", line);
            }
            Ok(if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
