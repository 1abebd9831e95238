//! zabbix-rpc CLI
//!
//! Entry point for the `zabbix-rpc` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zabbix_rpc::api::{self, API_METHODS};
use zabbix_rpc::config::{default_config_path, env_layer};
use zabbix_rpc::{ApiClient, ApiClientError, ClientConfig, EffectiveConfig, Params};

#[derive(Parser)]
#[command(name = "zabbix-rpc")]
#[command(about = "Zabbix JSON-RPC API client", version)]
struct Cli {
    /// Path to config file (default: ~/.config/zabbix-rpc/config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// API endpoint, e.g. http://zabbix.example/api_jsonrpc.php
    #[arg(long, global = true)]
    url: Option<String>,

    /// Login user
    #[arg(long, short = 'u', global = true)]
    user: Option<String>,

    /// Login password
    #[arg(long, global = true)]
    password: Option<String>,

    /// Echo raw requests and responses to stdout
    #[arg(long, global = true)]
    print_communication: bool,

    /// Log level for zabbix_rpc (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call a remote method
    Call {
        /// Method name, e.g. host.get
        method: String,

        /// Parameters as JSON (object, array or scalar)
        #[arg(long, short = 'p')]
        params: Option<String>,

        /// Re-key a list result by this property
        #[arg(long, short = 'k', default_value = "")]
        rekey: String,

        /// Send without the auth token and skip the login
        #[arg(long)]
        no_auth: bool,
    },

    /// Print the remote API version
    Version,

    /// List the methods known to the facade
    Methods {
        /// Only methods of this resource (e.g. host)
        #[arg(long, short = 'r')]
        resource: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration with secrets redacted
    Show,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match &cli.command {
        Commands::Call {
            method,
            params,
            rekey,
            no_auth,
        } => run_call(&cli, method, params.as_deref(), rekey, *no_auth),
        Commands::Version => run_version(&cli),
        Commands::Methods { resource, json } => run_methods(resource.as_deref(), *json),
        Commands::Config {
            action: ConfigCommands::Show,
        } => run_config_show(&cli),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zabbix_rpc={},warn", level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// CLI flags as the highest config layer
fn cli_layer(cli: &Cli) -> Option<Value> {
    let mut api = Map::new();
    if let Some(url) = &cli.url {
        api.insert("url".to_string(), json!(url));
    }
    if let Some(user) = &cli.user {
        api.insert("user".to_string(), json!(user));
    }
    if let Some(password) = &cli.password {
        api.insert("password".to_string(), json!(password));
    }
    if cli.print_communication {
        api.insert("print_communication".to_string(), json!(true));
    }
    if api.is_empty() {
        None
    } else {
        Some(json!({ "api": api }))
    }
}

fn load_effective_config(cli: &Cli) -> EffectiveConfig {
    let path = cli.config.clone().or_else(default_config_path);
    let env = env_layer(|var| std::env::var(var).ok());
    match EffectiveConfig::build(path.as_deref(), env, cli_layer(cli)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn load_client_config(cli: &Cli) -> ClientConfig {
    match load_effective_config(cli).client_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(1);
        }
    }
}

fn fail(err: ApiClientError) -> ! {
    eprintln!("Error: {}", err);
    process::exit(err.exit_code());
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_call(cli: &Cli, method: &str, params: Option<&str>, rekey: &str, no_auth: bool) {
    let params = match params {
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => Params::classify(value),
            Err(e) => {
                eprintln!("Invalid --params JSON: {}", e);
                process::exit(1);
            }
        },
        None => Params::Absent,
    };

    let config = load_client_config(cli);
    let result = if no_auth {
        ApiClient::from_config(&config).call_with_auth(method, params, rekey, false)
    } else {
        ApiClient::connect(&config)
            .and_then(|mut client| invoke_then_logout(&mut client, method, params, rekey))
    };

    match result {
        Ok(value) => print_json(&value),
        Err(e) => fail(e),
    }
}

/// Run one call on a logged-in client, then end the session it holds.
/// A failed logout is logged and does not change the call's outcome.
fn invoke_then_logout(
    client: &mut ApiClient,
    method: &str,
    params: Params,
    rekey: &str,
) -> Result<Value, ApiClientError> {
    let result = client.invoke(method, params, rekey);
    if method != zabbix_protocol::LOGIN_METHOD && client.is_authenticated() {
        if let Err(e) = client.logout(()) {
            tracing::warn!(error = %e, "logout after {} failed", method);
        }
    }
    result
}

fn run_version(cli: &Cli) {
    let config = load_client_config(cli);
    match ApiClient::from_config(&config).apiinfo_version((), "") {
        Ok(Value::String(version)) => println!("{}", version),
        Ok(other) => print_json(&other),
        Err(e) => fail(e),
    }
}

fn run_methods(resource: Option<&str>, json_output: bool) {
    let methods: Vec<_> = match resource {
        Some(resource) => api::methods_for_resource(resource),
        None => API_METHODS.iter().collect(),
    };

    if methods.is_empty() {
        eprintln!("No methods found for resource '{}'.", resource.unwrap_or_default());
        eprintln!("Available resources: {}", api::resources().join(", "));
        process::exit(1);
    }

    if json_output {
        let listing: Vec<Value> = methods
            .iter()
            .map(|m| {
                json!({
                    "method": m.method,
                    "facade": m.facade,
                    "requires_auth": m.requires_auth,
                })
            })
            .collect();
        print_json(&Value::Array(listing));
    } else {
        for m in &methods {
            let marker = if m.requires_auth { "" } else { "  (no auth)" };
            println!("  {:<45} {}{}", m.method, m.facade, marker);
        }
        println!();
        println!("{} methods", methods.len());
    }
}

fn run_config_show(cli: &Cli) {
    let config = load_effective_config(cli);
    match config.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use zabbix_rpc::client::MockTransport;
    use zabbix_rpc::mock::{FailureConfig, MockApi, MOCK_PASSWORD, MOCK_USER};

    fn connected(api: &MockApi) -> ApiClient {
        let config = ClientConfig::new("http://zabbix.test/api_jsonrpc.php")
            .with_credentials(MOCK_USER, MOCK_PASSWORD);
        ApiClient::connect_with_transport(&config, Arc::new(MockTransport::with_api(api.clone())))
            .unwrap()
    }

    #[test]
    fn test_call_ends_session() {
        let api = MockApi::new();
        let mut client = connected(&api);
        assert_eq!(api.active_sessions(), 1);

        invoke_then_logout(&mut client, "hostgroup.get", Params::Absent, "").unwrap();
        let methods: Vec<_> = api.requests().into_iter().map(|r| r.method).collect();
        assert_eq!(methods, ["user.login", "hostgroup.get", "user.logout"]);
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_call_error_still_logs_out() {
        let api = MockApi::new();
        let mut client = connected(&api);

        let err = invoke_then_logout(&mut client, "widget.get", Params::Absent, "").unwrap_err();
        assert_eq!(err.remote_code(), Some(-32601));
        assert_eq!(api.last_request().unwrap().method, "user.logout");
    }

    #[test]
    fn test_failed_logout_keeps_call_result() {
        let api = MockApi::new();
        let mut client = connected(&api);
        api.inject_failure("user.logout", FailureConfig::connection_refused());

        let groups = invoke_then_logout(&mut client, "hostgroup.get", Params::Absent, "").unwrap();
        assert!(groups.is_array());
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_explicit_logout_not_repeated() {
        let api = MockApi::new();
        let mut client = connected(&api);

        invoke_then_logout(&mut client, "user.logout", Params::Absent, "").unwrap();
        let logouts = api.requests().into_iter().filter(|r| r.method == "user.logout").count();
        assert_eq!(logouts, 1);
    }
}
