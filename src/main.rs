use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use mira_lang::lsp;
use mira_lang::project::{SearchRoots, Settings, WorkspaceIndex};

fn main() -> ExitCode {
    // stdout carries the protocol when serving; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("lsp") => match lsp::serve_stdio() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("mira-lang: {err}");
                ExitCode::FAILURE
            }
        },
        Some("index") => {
            let Some(dir) = args.get(2) else {
                eprintln!("Usage: mira-lang index <directory>");
                return ExitCode::FAILURE;
            };
            run_index(PathBuf::from(dir))
        }
        _ => {
            eprintln!("Usage: mira-lang [lsp|index <directory>]");
            ExitCode::FAILURE
        }
    }
}

fn run_index(root: PathBuf) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("mira-lang: failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    runtime.block_on(async {
        let index = WorkspaceIndex::new();
        index
            .set_roots(SearchRoots::discover(Some(&root), &Settings::default()))
            .await;
        let summary = index.full_scan().await;
        for (module, table) in index.snapshot().await {
            println!("{module}: {} symbol(s)", table.symbol_count());
        }
        println!(
            "indexed {} file(s), {} failure(s)",
            summary.indexed, summary.failed
        );
        if summary.failed > 0 {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    })
}
