// ABOUTME: CLI binary for the Glassdoor interview-question scraper.
// ABOUTME: Scrapes live pages or saved HTML files and outputs records as JSON, markdown, or text.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use glassdoor_interviews::{
    format_records, load_selectors_file, Client, FixtureSource, OutputFormat, SourceKind,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "interviews")]
#[command(about = "Scrape interview questions for a company from Glassdoor")]
struct Args {
    /// Company name, e.g. "Google"
    company: String,

    /// Only keep questions whose role contains this text (case-insensitive)
    #[arg(short = 'r', long = "role")]
    role: Option<String>,

    /// Maximum number of result pages to visit
    #[arg(short = 'p', long = "max-pages", default_value_t = 3)]
    max_pages: usize,

    /// Output format: json (default), markdown/md, text/txt
    #[arg(short = 'f', long = "format", default_value = "json")]
    format: String,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Saved HTML page to scrape instead of the live site; repeat for several pages
    #[arg(long = "html")]
    html: Vec<PathBuf>,

    /// JSON file replacing the builtin selector set
    #[arg(long = "selectors")]
    selectors: Option<PathBuf>,

    /// Page source: browser (default when built with it) or http
    #[arg(long = "source")]
    source: Option<String>,

    /// Site root to scrape instead of https://www.glassdoor.com
    #[arg(long = "base-url")]
    base_url: Option<String>,

    /// Pause between pages in milliseconds
    #[arg(long = "page-delay-ms", default_value_t = 2000)]
    page_delay_ms: u64,

    /// Seconds to wait for questions to appear on each page
    #[arg(long = "wait-secs", default_value_t = 10)]
    wait_secs: u64,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    if args.company.trim().is_empty() {
        eprintln!("error: company name must not be empty");
        return ExitCode::from(1);
    }

    let mut pages = Vec::new();
    for path in &args.html {
        match fs::read_to_string(path) {
            Ok(html) => pages.push(html),
            Err(e) => {
                eprintln!("error reading file {:?}: {}", path, e);
                return ExitCode::from(1);
            }
        }
    }
    let offline = !pages.is_empty();

    let source_kind = args
        .source
        .as_deref()
        .map(SourceKind::from)
        .unwrap_or_default();
    let mut builder = Client::builder()
        .max_pages(if offline { pages.len() } else { args.max_pages })
        .page_delay(if offline {
            Duration::ZERO
        } else {
            Duration::from_millis(args.page_delay_ms)
        })
        .wait_timeout(Duration::from_secs(args.wait_secs))
        .source(source_kind);
    if let Some(base_url) = &args.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(path) = &args.selectors {
        match load_selectors_file(path) {
            Ok(selectors) => builder = builder.selectors(selectors),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::from(1);
            }
        }
    }
    let client = builder.build();
    let role = args.role.as_deref();

    let start = Instant::now();
    let result = if offline {
        let mut source = FixtureSource::new(pages);
        client.try_questions_with(&mut source, &args.company, role).await
    } else {
        client.try_questions(&args.company, role).await
    };
    let elapsed = start.elapsed();

    let records = match result {
        Ok(records) => records,
        Err(e) => {
            eprintln!("error scraping {}: {}", args.company, e);
            return ExitCode::from(1);
        }
    };

    let format = OutputFormat::from(args.format.as_str());
    let output_str = match format_records(&records, format) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error formatting output: {}", e);
            return ExitCode::from(1);
        }
    };

    let mut had_error = false;
    if let Some(output_path) = &args.output {
        if let Err(e) = fs::write(output_path, &output_str) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            had_error = true;
        }
    } else {
        println!("{}", output_str);
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
