//! Resume matcher: resume and job description matching service

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{Cli, Commands, ConfigAction, OutputFormat};
use resume_matcher::config::Config;
use resume_matcher::embedding::Model2VecProvider;
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::{AutoExtractor, TextCache};
use resume_matcher::matching::{normalize_scores, PairScorer};
use resume_matcher::server;
use resume_matcher::server::handlers::MatchEntry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config) -> Result<()> {
    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            info!("Starting resume matcher service");
            server::serve(config).await
        }

        Commands::Match {
            resume,
            job,
            output,
        } => {
            let format = resume_matcher::cli::parse_output_format(&output)
                .map_err(ResumeMatcherError::InvalidInput)?;
            run_match(&resume, &job, format, &config)
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration\n");
                    println!("Embedding Model: {}", config.models.embedding_model);
                    println!("Cache Directory: {}", config.cache.cache_dir.display());
                    println!("Text Budget: {} characters", config.cache.max_text_chars);
                    println!("\nSection Weights:");
                    println!("  Title: {:.0}%", config.scoring.weights.title * 100.0);
                    println!("  Skills: {:.0}%", config.scoring.weights.skills * 100.0);
                    println!(
                        "  Experience: {:.0}%",
                        config.scoring.weights.experience * 100.0
                    );
                    println!(
                        "  Education: {:.0}%",
                        config.scoring.weights.education * 100.0
                    );
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    let default_config = Config::default();
                    default_config.save(&Config::config_path())?;
                    println!("✅ Configuration reset successfully!");
                }
            }
            Ok(())
        }
    }
}

fn run_match(
    resumes: &[PathBuf],
    jobs: &[PathBuf],
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    println!("🚀 Resume matching");
    println!("📄 Resumes: {}", resumes.len());
    println!("💼 Job Descriptions: {}", jobs.len());

    println!("\n🧠 Loading embedding model...");
    let provider = Model2VecProvider::from_config(config)?;
    let text_cache = TextCache::new(config.text_cache_dir(), Box::new(AutoExtractor))?;
    let scorer = PairScorer::new(text_cache, Arc::new(provider), config);

    let mut results: HashMap<String, Vec<MatchEntry>> = HashMap::new();

    for job in jobs {
        let job_name = job.to_string_lossy().to_string();
        let mut job_scores: Vec<MatchEntry> = Vec::new();

        for resume in resumes {
            let result = scorer.score_pair(resume, job);
            job_scores.push(MatchEntry {
                resume: resume.to_string_lossy().to_string(),
                match_percent: result.score,
                normalized_percent: None,
                section_scores: result.section_scores,
                explanation: result.explanation,
            });
        }

        job_scores.sort_by(|a, b| {
            b.match_percent
                .partial_cmp(&a.match_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let raw: Vec<f64> = job_scores.iter().map(|e| e.match_percent).collect();
        for (entry, normalized) in job_scores.iter_mut().zip(normalize_scores(&raw)) {
            entry.normalized_percent = Some((normalized * 100.0).round() / 100.0);
        }

        results.insert(job_name, job_scores);
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Console => {
            for (job_name, entries) in &results {
                println!("\n💼 Job: {}", job_name);
                for (i, entry) in entries.iter().enumerate() {
                    println!(
                        "  {}. {} — {:.2}%{}",
                        i + 1,
                        entry.resume,
                        entry.match_percent,
                        entry
                            .normalized_percent
                            .map(|n| format!(" (normalized {:.2})", n))
                            .unwrap_or_default()
                    );
                    println!(
                        "     Sections: title {:.2}, skills {:.2}, experience {:.2}, education {:.2}",
                        entry.section_scores.title,
                        entry.section_scores.skills,
                        entry.section_scores.experience,
                        entry.section_scores.education
                    );
                    println!("     {}", entry.explanation);
                }
            }
        }
    }

    println!("\n✅ Matching completed");
    Ok(())
}
