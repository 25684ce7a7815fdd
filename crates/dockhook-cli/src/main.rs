//! # dockhook — Docker lifecycle event hook dispatcher
//!
//! Invokes an external handler program once per container lifecycle
//! event, feeding it a JSON snapshot of the affected container's state.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use dockhook_core::command::HandlerCommand;
use dockhook_core::config::DispatchConfig;
use dockhook_core::dispatch::Dispatcher;
use dockhook_core::runtime::DockerRuntime;

/// Dockhook — run a handler program for every container lifecycle event.
///
/// The event name and the full container ID are appended as the final
/// two arguments of every handler invocation; for most events the
/// handler's stdin receives the container's JSON descriptor.
#[derive(Parser, Debug)]
#[command(name = "dockhook", version, about, long_about = None)]
struct Cli {
    /// Handler command to run for each event. Shell-style quoting is
    /// honored, so the executable path and fixed arguments may contain
    /// spaces.
    handler: String,

    /// Forward handler stdout to dockhook's own stdout.
    #[arg(short, long)]
    debug: bool,

    /// Run the handler via $SHELL -c instead of executing it directly.
    #[arg(short, long)]
    shell: bool,

    /// Do not pass dockhook's environment to handler processes.
    #[arg(long)]
    no_env: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .init();

    let cli = Cli::parse();

    let command = HandlerCommand::parse(&cli.handler).context("invalid handler command")?;
    let config = DispatchConfig {
        debug: cli.debug,
        shell: resolve_shell(cli.shell),
        inherit_env: !cli.no_env,
    };

    let runtime = DockerRuntime::connect().context("unable to connect to the Docker daemon")?;
    let dispatcher = Dispatcher::new(Arc::new(runtime), command, config);
    dispatcher.run().await.context("event dispatch ended")
}

/// Resolves the interpreter for shell mode from `$SHELL`, falling back
/// to direct execution with a warning when it is unset.
fn resolve_shell(enabled: bool) -> Option<String> {
    if !enabled {
        return None;
    }
    let shell = std::env::var("SHELL").ok().filter(|s| !s.is_empty());
    if shell.is_none() {
        tracing::warn!("shell mode requested but SHELL is unset; executing handler directly");
    }
    shell
}
