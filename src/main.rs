use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use navscan::core::analyzer::SiteAnalyzer;
use navscan::core::config;
use navscan::core::types::{AnalysisResult, AnalysisStatus};
use navscan::inference::GeminiProvider;

#[derive(Parser)]
#[command(name = "navscan", about = "Search-grounded website navigation analyzer")]
struct Args {
    /// Website URL to analyze (embedded verbatim, not validated)
    url: String,

    /// Model to use (overrides config file and NAVSCAN_MODEL)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to navscan.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("navscan.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("navscan: {e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(&file_config, args.model.as_deref());

    log::info!("Navscan starting up with model: {}", resolved.model_name);

    let provider = Arc::new(GeminiProvider::new(Some(resolved.gemini_base_url.clone())));
    let analyzer = SiteAnalyzer::new(provider, resolved.model_name, resolved.gemini_api_key);

    eprintln!("[{}] {}", AnalysisStatus::Analyzing.label(), args.url);

    match analyzer.analyze(&args.url).await {
        Ok(result) => {
            log::info!(
                "analysis completed: {} link(s), {} source(s)",
                result.links.len(),
                result.grounding_sources.len(),
            );
            eprintln!("[{}]", AnalysisStatus::Completed.label());
            print_result(&result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("analysis failed: {e}");
            eprintln!("[{}] {e}", AnalysisStatus::Error.label());
            ExitCode::FAILURE
        }
    }
}

/// Plain-text rendering: summary, then links, assets, and sources.
fn print_result(result: &AnalysisResult) {
    println!("{}", result.summary);

    if !result.links.is_empty() {
        println!("\nNavigation links:");
        for link in &result.links {
            match &link.description {
                Some(desc) => println!(
                    "  [{}] {} -> {} ({})",
                    link.kind.label(),
                    link.name,
                    link.url,
                    desc
                ),
                None => println!("  [{}] {} -> {}", link.kind.label(), link.name, link.url),
            }
        }
    }

    if !result.scripts_and_stylesheets.is_empty() {
        println!("\nScripts & stylesheets:");
        for asset in &result.scripts_and_stylesheets {
            println!("  {asset}");
        }
    }

    if !result.grounding_sources.is_empty() {
        println!("\nSources:");
        for source in &result.grounding_sources {
            println!("  {} <{}>", source.title, source.uri);
        }
    }
}
