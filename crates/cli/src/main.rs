mod echo;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use serialbook_core::{
    DEFAULT_OUTPUT, Denylist, Outcome, PageLayout, PdfSink, Pipeline, PipelineConfig, SiteProfile, TextSink,
    running_header,
};
use url::Url;

use crate::echo::{ConsoleProgress, print_banner, print_error, print_info};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit status when the listing page has no chapters.
const EXIT_NO_CHAPTERS: u8 = 2;

/// Output format for the bound book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Pdf,
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Text => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: pdf, text", s)),
        }
    }
}

fn parse_url(s: &str) -> Result<Url, String> {
    Url::parse(s).map_err(|e| format!("Invalid URL {}: {}", s, e))
}

/// Fetch every chapter of a web novel and bind them into one numbered book
#[derive(Parser, Debug)]
#[command(name = "serialbook")]
#[command(author = "Serialbook Contributors")]
#[command(version)]
#[command(about = "Bind a serialized web novel into a single numbered book", long_about = None)]
struct Args {
    /// Site profile (JSON); fields left out use the built-in profile
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Listing page that links to every chapter
    #[arg(long, value_name = "URL", value_parser = parse_url)]
    base_url: Option<Url>,

    /// Path segment identifying the novel's chapter pages
    #[arg(long, value_name = "SLUG")]
    novel: Option<String>,

    /// Output file (default: Shine_On_Me_Numbered.<ext> in the working directory)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (pdf, text)
    #[arg(short, long, default_value = "pdf", value_name = "FORMAT")]
    format: OutputFormat,

    /// Chapter request timeout in seconds
    #[arg(long, default_value = "20", value_name = "SECS")]
    timeout: u64,

    /// Listing request timeout in seconds
    #[arg(long, default_value = "5", value_name = "SECS")]
    listing_timeout: u64,

    /// Pause between chapter requests in milliseconds
    #[arg(long, default_value = "100", value_name = "MS")]
    delay_ms: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Extra boilerplate keyword to drop (repeatable)
    #[arg(long = "deny", value_name = "KEYWORD")]
    deny: Vec<String>,

    /// Replace the boilerplate keywords with the ones in FILE (one per line)
    #[arg(long, value_name = "FILE")]
    denylist: Option<PathBuf>,

    /// Book title on the title page
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,

    /// Subtitle on the title page
    #[arg(long, value_name = "TEXT")]
    subtitle: Option<String>,

    /// Print the effective site profile as JSON and exit
    #[arg(long)]
    print_profile: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Builds the site profile from the profile file and command line overrides
fn resolve_profile(args: &Args) -> anyhow::Result<SiteProfile> {
    let mut profile = match &args.profile {
        Some(path) => SiteProfile::from_file(path)
            .with_context(|| format!("Failed to load profile: {}", path.display()))?,
        None => SiteProfile::default(),
    };

    if let Some(url) = &args.base_url {
        profile.base_url = url.to_string();
    }
    if let Some(novel) = &args.novel {
        profile.novel_slug = novel.clone();
    }
    if let Some(title) = &args.title {
        profile.book_title = title.clone();
    }
    if let Some(subtitle) = &args.subtitle {
        profile.book_subtitle = Some(subtitle.clone());
    }
    if let Some(path) = &args.denylist {
        let denylist = Denylist::from_file(path)
            .with_context(|| format!("Failed to read denylist: {}", path.display()))?;
        profile.denylist = denylist.keywords().to_vec();
    }
    profile.denylist.extend(args.deny.iter().cloned());

    profile.validate().context("Invalid site profile")?;
    Ok(profile)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let profile = resolve_profile(&args)?;

    if args.print_profile {
        println!("{}", profile.to_json().context("Failed to serialize profile")?);
        return Ok(ExitCode::SUCCESS);
    }

    print_banner();
    if args.verbose {
        print_info("Debug logging enabled");
        eprintln!("  {} {}", "Listing:".dimmed(), profile.base_url.bright_white().underline());
        eprintln!("  {} {}", "Novel:".dimmed(), profile.novel_slug.bright_white());
        eprintln!("  {} {}", "Denylist:".dimmed(), profile.denylist.len().to_string().bright_white());
        eprintln!();
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT).with_extension(args.format.extension()));

    let mut builder = PipelineConfig::builder()
        .profile(profile.clone())
        .timeout(args.timeout)
        .listing_timeout(args.listing_timeout)
        .delay(Duration::from_millis(args.delay_ms))
        .output(&output);
    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    let pipeline = Pipeline::new(builder.build()).context("Failed to set up pipeline")?;

    print_info("Scanning for chapters...");
    let header = profile.header_text.clone().map(running_header);
    let progress = ConsoleProgress { verbose: args.verbose };

    let outcome = match args.format {
        OutputFormat::Pdf => {
            let sink = PdfSink::new(&profile.book_title, PageLayout::default(), header)
                .context("Failed to create PDF document")?;
            pipeline.run(sink, &progress).await
        }
        OutputFormat::Text => pipeline.run(TextSink::new(header), &progress).await,
    }
    .with_context(|| format!("Failed to bind {}", profile.base_url))?;

    match outcome {
        Outcome::Completed(_) => Ok(ExitCode::SUCCESS),
        Outcome::NoChapters => {
            print_error("No chapters found.");
            Ok(ExitCode::from(EXIT_NO_CHAPTERS))
        }
    }
}
