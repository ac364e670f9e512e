//! Thin presentation layer over the engagement core: generate personas,
//! run scripted simulations, or chat interactively while playing the
//! scammer yourself.

use crate::backend::OpenAiCompatibleBackend;
use crate::config::Config;
use crate::engagement::{Engagement, EngagementOptions};
use crate::persona::{PersonaGenerator, ScamType};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use strum::VariantNames;
use tokio::io::{AsyncBufReadExt, BufReader};

/// `lurebird` - conversational scam honeypot.
#[derive(Parser, Debug)]
#[command(name = "lurebird")]
#[command(version = "0.1.0")]
#[command(
    about = "Engage scammers with a synthetic victim and harvest threat intelligence.",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a victim persona and print it as JSON
    Persona {
        /// Scam type to bait for (phishing, tech_support, romance, crypto_investment)
        #[arg(short, long, default_value = "phishing")]
        scam_type: String,
    },

    /// Run a scripted engagement against canned scammer messages
    Simulate {
        /// Scam type to bait for
        #[arg(short, long, default_value = "phishing")]
        scam_type: String,

        /// Seed for reproducible tactic selection
        #[arg(long)]
        seed: Option<u64>,

        /// Write the full engagement as JSON to this path when done
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Interactive engagement: you type the scammer's messages
    Chat {
        /// Scam type to bait for
        #[arg(short, long, default_value = "phishing")]
        scam_type: String,

        /// Seed for reproducible tactic selection
        #[arg(long)]
        seed: Option<u64>,

        /// Write the full engagement as JSON to this path when done
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

const SIMULATED_SCRIPT: [&str; 5] = [
    "Hello! This is David from Commonwealth Bank security. We've detected suspicious activity on your account.",
    "Your account will be locked in 24 hours unless you verify your identity immediately.",
    "Please click this link to verify: https://commbank-security-verify.com",
    "Why haven't you clicked the link yet? Your account is at risk!",
    "You need to act now or you'll lose access to all your money!",
];

pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Persona { scam_type } => {
            let scam_type = parse_scam_type(&scam_type)?;
            let persona = generator(&config)?.generate(scam_type).await?;
            println!("{}", serde_json::to_string_pretty(&persona)?);
            Ok(())
        }
        Commands::Simulate {
            scam_type,
            seed,
            export,
        } => {
            let mut engagement = new_engagement(&config, &scam_type, seed).await?;
            for (i, message) in SIMULATED_SCRIPT.iter().enumerate() {
                println!("SCAMMER (turn {}): {message}", i + 1);
                let reply = engagement.respond(message).await?;
                println!("{}: {reply}\n", engagement.persona().name.to_uppercase());
            }
            finish(&engagement, export.as_deref())
        }
        Commands::Chat {
            scam_type,
            seed,
            export,
        } => {
            let mut engagement = new_engagement(&config, &scam_type, seed).await?;
            println!(
                "Baiting as {} ({}). Type scammer messages; empty line or 'quit' to stop.\n",
                engagement.persona().name,
                engagement.persona().scam_type
            );

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                println!("scammer> ");
                let Some(line) = lines.next_line().await? else {
                    break;
                };
                let message = line.trim();
                if message.is_empty() || message == "quit" || message == "exit" {
                    break;
                }
                let reply = engagement.respond(message).await?;
                println!("{}> {reply}\n", engagement.persona().name);
            }
            finish(&engagement, export.as_deref())
        }
    }
}

fn parse_scam_type(raw: &str) -> Result<ScamType> {
    ScamType::from_str(raw).map_err(|_| {
        anyhow!(
            "unknown scam type {raw:?} (expected one of: {})",
            ScamType::VARIANTS.join(", ")
        )
    })
}

fn build_backend(config: &Config) -> Arc<OpenAiCompatibleBackend> {
    Arc::new(OpenAiCompatibleBackend::new(
        "groq",
        &config.base_url,
        config.api_key.as_deref(),
        Duration::from_secs(config.generation.request_timeout_secs),
    ))
}

fn generator(config: &Config) -> Result<PersonaGenerator> {
    let generator = PersonaGenerator::new(build_backend(config), &config.model)?
        .with_temperature(config.generation.persona_temperature);
    Ok(generator)
}

async fn new_engagement(config: &Config, scam_type: &str, seed: Option<u64>) -> Result<Engagement> {
    let scam_type = parse_scam_type(scam_type)?;
    let persona = generator(config)?.generate(scam_type).await?;
    println!(
        "Generated persona: {} ({}, tech literacy {}/10)\n",
        persona.name, persona.age, persona.tech_literacy
    );

    let backend = build_backend(config);
    let options = EngagementOptions::from_config(config);
    let engagement = match seed {
        Some(seed) => Engagement::seeded(persona, backend, options, seed)?,
        None => Engagement::new(persona, backend, options)?,
    };
    Ok(engagement)
}

fn finish(engagement: &Engagement, export: Option<&Path>) -> Result<()> {
    println!("=== SUMMARY ===");
    println!("{}", serde_json::to_string_pretty(&engagement.summary())?);
    println!("=== THREAT REPORT ===");
    println!("{}", serde_json::to_string_pretty(&engagement.report())?);

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&engagement.export())?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write export to {}", path.display()))?;
        println!("Exported engagement to {}", path.display());
    }
    Ok(())
}
