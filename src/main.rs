use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use gapscan::config::Config;
use gapscan::output::terminal::GapView;

/// gapscan: concept vs application gap detection.
///
/// Reads student answer records, reports accuracy per subject, topic and
/// question type, and flags topics where students handle direct questions
/// but fall apart on the twisted, application-style versions.
#[derive(Parser)]
#[command(name = "gapscan", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full report: every table, the gap check and the classifier
    Report {
        /// Dataset path (overrides GAPSCAN_DATA_PATH)
        #[arg(long)]
        data: Option<String>,

        /// Skip training and scoring the classifier
        #[arg(long)]
        skip_model: bool,

        /// Also write a markdown report to this path
        #[arg(long)]
        markdown: Option<String>,
    },

    /// Show only the Direct vs Twisted gap table and action plan
    Gaps {
        /// Dataset path (overrides GAPSCAN_DATA_PATH)
        #[arg(long)]
        data: Option<String>,

        /// Only list application-weak topics
        #[arg(long)]
        weak_only: bool,
    },

    /// Summarize the dataset (rows, columns, categories)
    Info {
        /// Dataset path (overrides GAPSCAN_DATA_PATH)
        #[arg(long)]
        data: Option<String>,
    },

    /// Serve the interactive dashboard
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 8080)
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

/// Rows of the classifier dataset printed before training.
const ML_HEAD_ROWS: usize = 5;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gapscan=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            data,
            skip_model,
            markdown,
        } => {
            let config = Config::load()?.with_data_path(data);
            let records = gapscan::dataset::load(&config.data_path)?;

            let report = gapscan::pipeline::report::build(&records, &config.gap_threshold);

            use gapscan::output::terminal;
            terminal::display_preview(&report.preview);
            terminal::display_info(&gapscan::info::DatasetInfo::from_records(&records));
            terminal::display_subject_report(&report.subjects);
            terminal::display_topic_report(&report.topics);
            terminal::display_type_report(&report.types);
            terminal::display_gap_report(&report.gaps, GapView::All, report.gap_threshold);
            terminal::display_recommendations(&gapscan::output::recommend::recommendations(
                &report.gaps,
            ));
            terminal::display_subject_chart(&report.subjects);

            let evaluation = if skip_model {
                None
            } else {
                let ml = gapscan::model::dataset::build(&report.gaps);
                terminal::display_ml_head(&ml, ML_HEAD_ROWS);

                match gapscan::model::evaluate(&report.gaps, &config.split) {
                    Ok(eval) => {
                        terminal::display_evaluation(&eval);
                        Some(eval)
                    }
                    Err(e) => {
                        warn!(error = %e, "Classifier stage skipped");
                        println!(
                            "\n  {} Classifier not trained: {:#}",
                            "Warning:".yellow(),
                            e
                        );
                        None
                    }
                }
            };

            if let Some(path) = markdown {
                let written = gapscan::output::markdown::generate_report(
                    &report,
                    evaluation.as_ref(),
                    &path,
                )?;
                println!(
                    "\n{}",
                    format!("Markdown report saved to: {written}").bold()
                );
            }
        }

        Commands::Gaps { data, weak_only } => {
            let config = Config::load()?.with_data_path(data);
            let records = gapscan::dataset::load(&config.data_path)?;
            let report = gapscan::pipeline::report::build(&records, &config.gap_threshold);

            let view = if weak_only {
                GapView::WeakOnly
            } else {
                GapView::All
            };

            gapscan::output::terminal::display_gap_report(
                &report.gaps,
                view,
                report.gap_threshold,
            );
            gapscan::output::terminal::display_recommendations(
                &gapscan::output::recommend::recommendations(&report.gaps),
            );
        }

        Commands::Info { data } => {
            let config = Config::load()?.with_data_path(data);
            let records = gapscan::dataset::load(&config.data_path)?;
            gapscan::info::show(&config.data_path, &records)?;
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            info!(data = %config.data_path, "Starting dashboard");
            println!(
                "Serving dashboard for {} on http://{bind}:{port}",
                config.data_path
            );
            gapscan::web::run_server(config, port, &bind).await?;
        }
    }

    Ok(())
}
