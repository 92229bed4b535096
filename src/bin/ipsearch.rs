//! ipsearch: CLI tool for looking up IPv4 addresses in range lists.

use clap::{Parser, Subcommand};
use ipsearch::{RangeEntry, RangeType, SearchConfig, SearchEngine};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ipsearch")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Look up IPv4 addresses in CIDR and country range lists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up addresses in a single range list
    Lookup {
        /// Range list file path or HTTP(S) URL
        #[arg(short, long)]
        source: String,

        /// Line format: cidr or geo
        #[arg(short = 't', long = "type", default_value = "cidr")]
        range_type: String,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Addresses to look up
        #[arg(required = true)]
        ips: Vec<String>,
    },

    /// Look up addresses in every source of a YAML config
    Config {
        /// YAML configuration file
        #[arg(short, long)]
        file: PathBuf,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,

        /// Addresses to look up
        #[arg(required = true)]
        ips: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lookup {
            source,
            range_type,
            json,
            ips,
        } => lookup(&source, &range_type, json, &ips),
        Commands::Config { file, json, ips } => lookup_config(&file, json, &ips),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn lookup(source: &str, range_type: &str, json: bool, ips: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let range_type: RangeType = range_type.parse()?;
    let engine = SearchEngine::from_source(source, range_type)?;
    report(source, &engine, json, ips)
}

fn lookup_config(file: &Path, json: bool, ips: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = SearchConfig::from_file(file)?;
    for source in &config.sources {
        let engine = source.build()?;
        report(&source.name, &engine, json, ips)?;
    }
    Ok(())
}

fn report(name: &str, engine: &SearchEngine, json: bool, ips: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    for ip in ips {
        let found = engine.search(ip);
        if json {
            let line = serde_json::json!({
                "source": name,
                "ip": ip,
                "match": found.map(RangeEntry::to_match),
            });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            match found {
                Some(entry) if !entry.country().is_empty() => {
                    println!("[{}] IP [{}] Country Code: {} ({})", name, ip, entry.country(), entry.range());
                }
                Some(entry) => println!("[{}] IP [{}] is in {}", name, ip, entry),
                None => println!("[{}] IP [{}] is not found!", name, ip),
            }
        }
    }
    Ok(())
}
