//! Line-oriented chat loop: one session, input on stdin, replies on stdout.
//!
//! `/clear` resets the conversation, `/history` prints it, `/quit` exits.

use std::process::ExitCode;

use chatgate::{ChatGateConfig, build_runtime_from_env, init_tracing, session};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ChatGateConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("chatgate: {error}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format, &config.log_level);

    let runtime = match build_runtime_from_env(&config) {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!(event = "startup_failed", error = %error);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        event = "startup",
        endpoint = %config.endpoint,
        deployment = %config.deployment,
        failure_policy = ?config.failure_policy
    );

    match run(runtime).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("chatgate: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(runtime: chatgate::ChatRuntime) -> Result<(), Box<dyn std::error::Error>> {
    let session_id = session("console");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let output = match line.trim() {
            "/quit" => break,
            "/clear" => {
                runtime.controller.clear(&session_id).await?;
                continue;
            }
            "/history" => runtime.controller.history(&session_id).await?,
            _ => match runtime.controller.send_message(&session_id, &line).await? {
                Some(reply) => format!("AI: {reply}\n\n"),
                None => continue,
            },
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
