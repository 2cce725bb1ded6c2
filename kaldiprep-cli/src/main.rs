use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use kaldiprep::{AlveoClient, Credentials, DataSummary, PrepareOptions, SplitOptions};

#[derive(Parser)]
#[command(
    name = "kaldiprep",
    about = "Download a speech corpus and generate Kaldi data directories"
)]
struct Cli {
    /// Catalogue CSV with speaker, item, media and prompt columns.
    #[arg(short, long, default_value = "dataset.csv")]
    catalogue: PathBuf,

    /// Directory receiving <speaker>/<encoded_prompt>.wav files.
    #[arg(short, long, default_value = "./audio_data")]
    audio_dir: PathBuf,

    /// Kaldi recipe directory; data files go under <kaldi-root>/data.
    #[arg(short, long, default_value = ".")]
    kaldi_root: PathBuf,

    /// Share of utterances assigned to the training set.
    #[arg(long, default_value = "0.8")]
    train_fraction: f64,

    /// Seed for the train/test split.
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Only regenerate data files from audio already on disk (no credentials needed).
    #[arg(long, conflicts_with = "download_only")]
    skip_download: bool,

    /// Only download audio, do not generate data files.
    #[arg(long)]
    download_only: bool,

    /// Summary format.
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kaldiprep=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Credentials are checked before anything else touches the disk.
    let client = if cli.skip_download {
        None
    } else {
        match Credentials::from_env() {
            Ok(creds) => Some(AlveoClient::new(creds)),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    };

    let split = match SplitOptions::new().train_fraction(cli.train_fraction) {
        Ok(s) => s.seed(cli.seed),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let opts = PrepareOptions::new()
        .catalogue_path(cli.catalogue)
        .audio_root(cli.audio_dir)
        .kaldi_root(cli.kaldi_root)
        .split(split);

    let records = match kaldiprep::catalogue::load(opts.catalogue()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading {}: {e}", opts.catalogue().display());
            std::process::exit(1);
        }
    };

    let download = match &client {
        Some(client) => match kaldiprep::download_audio(&records, client, &opts.audio_root).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let data = if cli.download_only {
        None
    } else {
        match kaldiprep::generate_data(&records, &opts) {
            Ok(summary) => Some(summary),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    };

    match cli.format {
        OutputFormat::Text => {
            if let Some(d) = &download {
                println!("Downloaded {} recordings ({})", d.files, format_bytes(d.bytes));
            }
            if let Some(d) = &data {
                print_data_summary(d);
            }
        }
        OutputFormat::Json => {
            let summary = serde_json::json!({ "download": download, "data": data });
            match serde_json::to_string_pretty(&summary) {
                Ok(j) => println!("{j}"),
                Err(e) => {
                    eprintln!("JSON error: {e}");
                    std::process::exit(1);
                }
            }
        }
    }
}

fn print_data_summary(summary: &DataSummary) {
    println!(
        "{} utterances: {} train, {} test",
        summary.total, summary.train, summary.test
    );
    if summary.collisions > 0 {
        println!(
            "{} utterance ids are shared by more than one record",
            summary.collisions
        );
    }
    println!("{:<8} {:<8} {}", "SPLIT", "LINES", "FILE");
    println!("{:<8} {:<8} {}", "-----", "-----", "----");
    for artifact in &summary.artifacts {
        let split = artifact
            .split
            .map(|s| s.to_string())
            .unwrap_or_else(|| "local".into());
        println!("{split:<8} {:<8} {}", artifact.lines, artifact.path.display());
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1} GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.0} MB", bytes as f64 / 1_000_000.0)
    } else {
        format!("{:.0} KB", bytes as f64 / 1_000.0)
    }
}
