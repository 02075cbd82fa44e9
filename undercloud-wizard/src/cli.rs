use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[command(flatten)]
    pub global_args: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose_logging: bool,
    /// enable trace output (more detailed than verbose, overrides it if present)
    #[arg(long = "trace", global = true)]
    pub trace_logging: bool,
}

impl GlobalArgs {
    pub fn get_log_level(&self) -> LogLevel {
        if self.trace_logging {
            return LogLevel::Trace;
        }

        if self.verbose_logging {
            return LogLevel::Verbose;
        }

        LogLevel::Normal
    }
}

pub enum LogLevel {
    Normal,
    Verbose,
    Trace,
}

#[derive(Debug, Subcommand)]
#[command(arg_required_else_help = true)]
pub enum Commands {
    /// generate the undercloud.conf network section
    #[command(alias = "g")]
    Generate(GenerateArgs),
    /// show every value derived for the provisioning network
    #[command(alias = "v")]
    Values(ValuesArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Yaml,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// YAML file with a mapping of raw overrides
    #[arg(long)]
    pub overrides_file: Option<PathBuf>,
    /// raw override in the key=value form, can be repeated
    #[arg(short = 's', long = "set", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,
    /// undercloud hostname (defaults to undercloud.localdomain)
    #[arg(long)]
    pub hostname: Option<String>,
    /// provisioning interface name (defaults to eth1)
    #[arg(long)]
    pub local_interface: Option<String>,
    /// provisioning network CIDR (defaults to 192.0.2.0/24)
    #[arg(long)]
    pub network_cidr: Option<String>,
    /// number of nodes the provisioning network must accommodate (defaults to 2)
    #[arg(long)]
    pub node_count: Option<String>,
    /// skip the semantic validation of the derived values
    #[arg(long)]
    pub no_validate: bool,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// if set, the command will write the config to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<String>,
}

#[derive(Debug, Args)]
pub struct ValuesArgs {
    #[command(flatten)]
    pub plan: PlanArgs,
    /// output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{raw}' isn't in the key=value form"))?;

    if key.is_empty() {
        return Err(format!("'{raw}' is missing a key"));
    }

    Ok((key.to_owned(), value.to_owned()))
}
