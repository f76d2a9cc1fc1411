use clap::{Parser, Subcommand};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::actor_context::ActorContext;
use crate::config::ChronicaConfig;
use crate::config_loader::load_config;
use crate::errors::{ChronicaError, ChronicaResult};
use crate::event::ChangeEvent;
use crate::normalizer::EventNormalizer;
use crate::record::LogRecord;
use crate::sink::LogSink;
use crate::sink_jsonl::JsonlSink;
use crate::sink_sled::SledSink;

/// Top-level CLI interface for chronica
#[derive(Parser)]
#[command(
    name = "chronica",
    version = "0.1.0",
    about = "Records administrative change events as an audit trail"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest change events (one JSON object per line) and record them
    Ingest {
        #[arg(short, long)]
        input: String,
    },

    /// List recorded audit entries
    List {
        /// Only show records with this object type
        #[arg(long)]
        object_type: Option<String>,
        /// Maximum number of records to print
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Verify the hash chain of a JSONL audit file
    Verify,
}

pub fn dispatch(cli: Cli) -> ChronicaResult<()> {
    match cli.command {
        Commands::Ingest { input } => ingest(&input),
        Commands::List { object_type, limit } => list(object_type.as_deref(), limit),
        Commands::Verify => verify(),
    }
}

fn jsonl_path(config: &ChronicaConfig) -> String {
    config
        .sink
        .jsonl_path
        .clone()
        .unwrap_or_else(|| format!("{}/audit.jsonl", config.data_dir))
}

fn sled_path(config: &ChronicaConfig) -> String {
    format!("{}/records", config.data_dir)
}

fn open_sink(config: &ChronicaConfig) -> ChronicaResult<Box<dyn LogSink>> {
    match config.sink.backend.as_str() {
        "jsonl" => Ok(Box::new(JsonlSink::new(jsonl_path(config)))),
        _ => Ok(Box::new(SledSink::open(&sled_path(config))?)),
    }
}

fn ingest(input: &str) -> ChronicaResult<()> {
    let config = load_config()?;
    let sink = open_sink(&config)?;
    let normalizer = EventNormalizer::new(ActorContext::from_env());

    let file = File::open(Path::new(input))
        .map_err(|e| ChronicaError::io(format!("opening {input}"), e))?;
    let reader = BufReader::new(file);

    let mut inserted = 0usize;
    let mut suppressed = 0usize;
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ChronicaError::io(format!("reading {input}"), e))?;
        if line.trim().is_empty() {
            continue;
        }
        let event: ChangeEvent = serde_json::from_str(&line)
            .map_err(|e| ChronicaError::serialization(format!("event on line {}", number + 1), e))?;
        match normalizer.normalize(&event) {
            Some(record) => {
                sink.insert(&record)?;
                inserted += 1;
            }
            None => suppressed += 1,
        }
    }

    info!("ingest of {input} finished: {inserted} recorded, {suppressed} suppressed");
    println!("{inserted} recorded, {suppressed} suppressed");
    Ok(())
}

fn list(object_type: Option<&str>, limit: usize) -> ChronicaResult<()> {
    let config = load_config()?;
    let records: Vec<LogRecord> = match config.sink.backend.as_str() {
        "jsonl" => JsonlSink::new(jsonl_path(&config)).records()?,
        _ => SledSink::open(&sled_path(&config))?.records()?,
    };

    for record in records
        .iter()
        .filter(|r| object_type.map_or(true, |t| r.object_type.as_str() == t))
        .take(limit)
    {
        let who = if record.user_id.is_empty() {
            "anonymous"
        } else {
            record.user_id.as_str()
        };
        println!(
            "{} [{}] {}/{} by {}@{} - {}",
            record.event_time_text(),
            record.severity,
            record.object_type,
            record.event_type,
            who,
            record.ip_address,
            record.message,
        );
    }
    Ok(())
}

fn verify() -> ChronicaResult<()> {
    let config = load_config()?;
    if config.sink.backend != "jsonl" {
        return Err(ChronicaError::config(
            "verify applies to the jsonl backend only",
        ));
    }
    let sink = JsonlSink::new(jsonl_path(&config));
    let lines = sink.verify_chain()?;
    println!("chain intact: {lines} records");
    Ok(())
}
