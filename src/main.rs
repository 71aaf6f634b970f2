//! Artifact Sandbox CLI
//!
//! Single-shot mode:
//!   artifact-sandbox <component-file>
//!
//! Server mode (persistent process, line-delimited JSON over stdio):
//!   artifact-sandbox --server
//!
//! Protocol (server mode):
//!   Request (stdin):
//!     {"type":"UPDATE_COMPONENT","code":"export default function W() { ... }"}
//!
//!   Response (stdout):
//!     {"type":"RENDER_COMPLETE","html":"<div>...</div>","logs":[]}
//!     {"type":"RENDER_ERROR","message":"no default-exported component found in source"}
//!
//! The surface emits {"type":"INIT_COMPLETE"} once on startup. Updates are
//! processed in arrival order; the latest source unit supersedes whatever was
//! rendered before it.

use anyhow::{anyhow, Result};
use artifact_sandbox::{
    build_component_factory, create_runtime, render_component, reset_console, HostMessage,
    RenderResult, SurfaceConfig, SurfaceMessage,
};
use deno_core::JsRuntime;
use std::io::{BufRead, Write};

fn print_usage() {
    eprintln!("Artifact Sandbox - isolated component rendering surface");
    eprintln!();
    eprintln!("Single-shot mode:");
    eprintln!("  artifact-sandbox <component-file>");
    eprintln!();
    eprintln!("Server mode (persistent process):");
    eprintln!("  artifact-sandbox --server");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  artifact-sandbox ./widget.jsx");
    eprintln!("  artifact-sandbox --server");
}

async fn render_source(
    runtime: &mut JsRuntime,
    code: &str,
    timeout_ms: Option<u64>,
) -> Result<RenderResult> {
    let factory = build_component_factory(code)?;
    render_component(runtime, &factory, timeout_ms).await
}

/// Transform and render one source file, printing HTML to stdout.
async fn run_single_shot(path: &str) -> Result<()> {
    let code = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read component file '{}': {}", path, e))?;

    let config = SurfaceConfig::default();
    let mut runtime = create_runtime(&config)?;
    let result = render_source(&mut runtime, &code, config.timeout_ms).await?;

    for log in &result.console.logs {
        eprintln!("[LOG] {}", log);
    }
    for warn in &result.console.warns {
        eprintln!("[WARN] {}", warn);
    }
    for err in &result.console.errors {
        eprintln!("[ERROR] {}", err);
    }

    println!("{}", result.html);

    Ok(())
}

/// Run the message loop: host messages in on stdin, surface messages out on
/// stdout, one JSON document per line.
async fn run_server() -> Result<()> {
    let config = SurfaceConfig::default();

    // V8 cold start happens once here; renders reuse the isolate.
    let mut runtime = create_runtime(&config)?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut reader = stdin.lock();

    write_message(&mut stdout, &SurfaceMessage::InitComplete)?;
    tracing::info!("surface ready, reading from stdin");

    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            // EOF - host closed the channel, exit gracefully.
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message: HostMessage = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                write_message(
                    &mut stdout,
                    &SurfaceMessage::RenderError {
                        message: format!("invalid host message: {}", e),
                    },
                )?;
                continue;
            }
        };

        let HostMessage::UpdateComponent { code } = message;

        let response = match render_source(&mut runtime, &code, config.timeout_ms).await {
            Ok(result) => SurfaceMessage::RenderComplete {
                html: result.html,
                logs: result.console.logs,
            },
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "render failed");
                if message.contains("timed out") {
                    // A terminated isolate cannot execute again.
                    runtime = create_runtime(&config)?;
                }
                SurfaceMessage::RenderError { message }
            }
        };

        write_message(&mut stdout, &response)?;
        reset_console(&mut runtime);
    }

    tracing::info!("surface shutting down");
    Ok(())
}

fn write_message(stdout: &mut std::io::Stdout, message: &SurfaceMessage) -> Result<()> {
    serde_json::to_writer(&mut *stdout, message)?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is the protocol channel; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Err(anyhow!("Missing required arguments"));
    }

    if args[1] == "--server" {
        return run_server().await;
    }

    run_single_shot(&args[1]).await
}
