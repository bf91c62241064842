use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jsonform::runtime::Runtime;
use jsonform::source;
use jsonform::state::{AppState, Session};
use jsonform::terminal::Terminal;
use jsonform::ui::renderer::Renderer;
use jsonform::Config;

const LOG_ENV: &str = "JSONFORM_LOG";

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config.log_path())?;

    let source = config.document_source();
    tracing::info!(%source, format = %config.initial_format(), "starting");

    let mut terminal = Terminal::new().context("cannot query terminal size")?;
    terminal
        .enter()
        .context("cannot switch to the alternate screen")?;
    let renderer = Renderer::default();
    terminal
        .render_frame(&renderer.loading(&source.to_string()))
        .context("cannot draw loading screen")?;

    let (document, failure) = source::load_or_empty(&source);
    let session = Session::new(document, config.initial_format())
        .with_approvals(config.approval_set())
        .with_root_order(config.root_order());
    let state = AppState::new(session, source.to_string()).with_notice(failure);

    Runtime::new(state, terminal)
        .with_renderer(renderer)
        .run()
        .context("terminal i/o failed")?;
    tracing::info!("bye");
    Ok(())
}

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
