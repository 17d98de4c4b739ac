use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seopipe_core::{Analysis, RawInput, SeoConfig};
use seopipe_suggest::openai_compat::OpenAiCompatRewriter;
use seopipe_suggest::{detect_declared_title, split_batch, Pipeline};
use std::io::Read;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "seopipe")]
#[command(about = "SEO title/meta/slug suggestions for news articles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one article from stdin or --file (json to stdout).
    Analyze(AnalyzeCmd),
    /// Analyze several articles separated by `---` lines (one json row each).
    Batch(BatchCmd),
    /// Print version info.
    Version,
}

#[derive(clap::Args, Debug)]
struct AnalyzeCmd {
    /// Read the article text from this file instead of stdin.
    #[arg(long)]
    file: Option<std::path::PathBuf>,
    /// Original headline, used as a synthesis hint.
    #[arg(long)]
    title: Option<String>,
    /// Treat a short first line of the input as the headline when --title is absent.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    detect_title: bool,
    /// Attempt the AI rewriter (configured via SEOPIPE_OPENAI_COMPAT_* env vars).
    #[arg(long, default_value_t = false)]
    ai: bool,
    #[command(flatten)]
    tuning: TuningArgs,
}

#[derive(clap::Args, Debug)]
struct BatchCmd {
    /// Read the batch text from this file instead of stdin.
    #[arg(long)]
    file: Option<std::path::PathBuf>,
    /// Treat a short first line of each article as its headline.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    detect_title: bool,
    /// Attempt the AI rewriter (configured via SEOPIPE_OPENAI_COMPAT_* env vars).
    #[arg(long, default_value_t = false)]
    ai: bool,
    #[command(flatten)]
    tuning: TuningArgs,
}

#[derive(clap::Args, Debug)]
struct TuningArgs {
    /// Max headline length (characters).
    #[arg(long)]
    title_max_chars: Option<usize>,
    /// How many headline candidates to produce (1-3).
    #[arg(long)]
    titles: Option<usize>,
    /// Max meta description length (characters).
    #[arg(long)]
    meta_max_chars: Option<usize>,
    /// Reject articles whose cleaned body has fewer words than this.
    #[arg(long)]
    min_words: Option<usize>,
    /// How many keywords to rank.
    #[arg(long)]
    keywords: Option<usize>,
    /// How many image alt-text suggestions to produce.
    #[arg(long)]
    image_alts: Option<usize>,
}

impl TuningArgs {
    fn apply(&self, cfg: &mut SeoConfig) {
        if let Some(v) = self.title_max_chars {
            cfg.title_max_chars = v;
        }
        if let Some(v) = self.titles {
            cfg.title_count = v;
        }
        if let Some(v) = self.meta_max_chars {
            cfg.meta_max_chars = v;
        }
        if let Some(v) = self.min_words {
            cfg.min_body_words = v;
        }
        if let Some(v) = self.keywords {
            cfg.keyword_count = v;
        }
        if let Some(v) = self.image_alts {
            cfg.image_alt_count = v;
        }
    }
}

fn read_input(file: Option<&std::path::Path>) -> Result<String> {
    match file {
        Some(p) => {
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn build_pipeline(tuning: &TuningArgs, ai: bool) -> Result<Pipeline> {
    let mut cfg = SeoConfig::default();
    tuning.apply(&mut cfg);
    let mut pipeline = Pipeline::new(cfg);
    if ai {
        let rewriter = OpenAiCompatRewriter::from_env(reqwest::Client::new())
            .context("--ai requires SEOPIPE_OPENAI_COMPAT_BASE_URL and _MODEL")?;
        pipeline = pipeline.with_ai(Arc::new(rewriter));
    }
    Ok(pipeline)
}

fn make_input(text: &str, title: Option<&str>, detect: bool) -> RawInput {
    match title {
        Some(t) => RawInput::with_title(text, t),
        None => {
            let detected = detect.then(|| detect_declared_title(text)).flatten();
            match detected {
                Some(t) => RawInput::with_title(text, t),
                None => RawInput::new(text),
            }
        }
    }
}

fn print_warnings(analysis: &Analysis) {
    for w in &analysis.warnings {
        eprintln!("warning: {w}");
    }
}

async fn run_analyze(cmd: AnalyzeCmd) -> Result<()> {
    let raw = read_input(cmd.file.as_deref())?;
    let pipeline = build_pipeline(&cmd.tuning, cmd.ai)?;
    let input = make_input(&raw, cmd.title.as_deref(), cmd.detect_title);
    let analysis = pipeline.analyze(&input).await?;
    print_warnings(&analysis);
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

async fn run_batch(cmd: BatchCmd) -> Result<()> {
    let raw = read_input(cmd.file.as_deref())?;
    let pipeline = build_pipeline(&cmd.tuning, cmd.ai)?;
    let inputs: Vec<RawInput> = split_batch(&raw)
        .iter()
        .map(|a| make_input(a, None, cmd.detect_title))
        .collect();
    anyhow::ensure!(!inputs.is_empty(), "no articles found in input");

    // One json row per article; a failed article becomes an error row and the
    // rest of the batch still runs.
    for (i, result) in pipeline.analyze_batch(&inputs).await.into_iter().enumerate() {
        match result {
            Ok(analysis) => {
                print_warnings(&analysis);
                let mut row = serde_json::to_value(&analysis)?;
                row["index"] = serde_json::json!(i);
                println!("{row}");
            }
            Err(e) => {
                eprintln!("warning: article {i} skipped: {e}");
                let row = serde_json::json!({ "index": i, "error": e.to_string() });
                println!("{row}");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(cmd) => run_analyze(cmd).await,
        Commands::Batch(cmd) => run_batch(cmd).await,
        Commands::Version => {
            println!("seopipe {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
