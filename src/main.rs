//! rest-dispatch command line tool.
//!
//! Loads a route document and either lists it, resolves a request name to a
//! concrete URL, or executes a call and prints the JSON response.
//!
//! ```text
//! rest-dispatch --routes communicationsettings.json routes
//! rest-dispatch resolve getUser -p id=42
//! rest-dispatch call search -a cats --timeout 5
//! rest-dispatch call createUser -X POST --body '{"name":"Ann"}'
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use rest_dispatch::config::load_dispatcher_config;
use rest_dispatch::observability::logging::init_logging;
use rest_dispatch::{
    DispatchError, Dispatcher, DispatcherConfig, ExecuteOptions, RequestSpec, RouteTable, Verb,
};

#[derive(Parser)]
#[command(name = "rest-dispatch", version)]
#[command(about = "Resolve and execute named REST requests", long_about = None)]
struct Cli {
    /// Dispatcher settings (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route document, overrides `routes_path` from the settings file
    #[arg(short, long)]
    routes: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the loaded routes
    Routes,
    /// Print the URL a request name resolves to, without sending anything
    Resolve {
        name: String,
        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Execute a request and print the response
    Call {
        name: String,
        /// GET, POST, PUT or DELETE
        #[arg(short = 'X', long, default_value = "GET")]
        verb: String,
        #[command(flatten)]
        template: TemplateArgs,
        /// Per-call timeout in seconds
        #[arg(long)]
        timeout: Option<f64>,
        /// JSON request body (POST and PUT only)
        #[arg(long)]
        body: Option<String>,
    },
}

#[derive(Args)]
struct TemplateArgs {
    /// Named parameter, `key=value`
    #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
    params: Vec<(String, String)>,

    /// Positional argument for `{0}`, `{1}`, ...
    #[arg(short = 'a', long = "arg")]
    args: Vec<String>,
}

impl TemplateArgs {
    fn into_options(self) -> ExecuteOptions {
        let mut options = ExecuteOptions::new().args(self.args);
        for (key, value) in self.params {
            options = options.param(key, value);
        }
        options
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_dispatcher_config(path)?,
        None => DispatcherConfig::default(),
    };
    if let Some(routes) = cli.routes {
        config.routes_path = routes;
    }

    let log_level = cli
        .log_level
        .unwrap_or_else(|| config.observability.log_level.clone());
    init_logging(&log_level);

    tracing::debug!(
        routes_path = %config.routes_path.display(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Routes => {
            let table = RouteTable::load(&config.routes_path)?;
            for route in table.iter() {
                println!("{}\t{}", route.request_name, route.url_template);
            }
        }
        Commands::Resolve { name, template } => {
            let dispatcher = Dispatcher::from_config(&config)?;
            println!("{}", dispatcher.resolve_url(&name, &template.into_options())?);
        }
        Commands::Call {
            name,
            verb,
            template,
            timeout,
            body,
        } => {
            let verb: Verb = verb.parse()?;
            let mut options = template.into_options();
            if let Some(secs) = timeout {
                options = options.timeout(Duration::try_from_secs_f64(secs)?);
            }

            let mut spec = RequestSpec::new(name, verb).options(options);
            if let Some(body) = body {
                spec = spec.json(serde_json::from_str(&body)?);
            }

            let dispatcher = Dispatcher::from_config(&config)?;
            match dispatcher.execute::<Value>(spec).await {
                Ok(result) => {
                    println!("{}", result.status);
                    if !result.data.is_null() {
                        println!("{}", serde_json::to_string_pretty(&result.data)?);
                    }
                }
                Err(DispatchError::Http { status, body }) => {
                    eprintln!("Error: request returned status {}", status);
                    if let Some(text) = body {
                        eprintln!("Response: {}", text);
                    }
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}
