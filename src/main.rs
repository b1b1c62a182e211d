mod check;
mod cli;
mod config;
mod editor;
mod error;
mod fetch;
mod help;
mod render;
mod session;
mod theme;
mod types;

use clap::Parser;
use cli::{CheckArgs, Cli, Commands, EditArgs, InitArgs};
use config::Config;
use editor::EditorPanel;
use fetch::HttpCheckService;
use help::HelpModal;
use render::TextOptions;
use session::Session;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, trace};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    let code = match cli.command {
        Commands::Init(args) => handle_init(&args).map(|_| check::EXIT_SUCCESS),
        Commands::Check(args) => handle_check(args).await,
        Commands::Edit(args) => handle_edit(args).await.map(|_| check::EXIT_SUCCESS),
        Commands::Guide => {
            println!("{}", HelpModal::render());
            Ok(check::EXIT_SUCCESS)
        }
    };

    match code {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(check::EXIT_FAILURE);
        }
    }
}

fn handle_init(args: &InitArgs) -> anyhow::Result<()> {
    Config::write_default(Path::new(&args.config), args.r#override)?;
    Ok(())
}

async fn handle_check(args: CheckArgs) -> anyhow::Result<i32> {
    let config = args.service.load_config()?;
    debug!("Endpoint: {}", config.endpoint.url);

    let source = editor::read_source(args.file.as_deref())?;
    let service = HttpCheckService::new(&config.endpoint)?;
    let options = TextOptions {
        color: args.service.color.enabled(),
        theme: config.editor.theme,
    };

    let mut stdout = std::io::stdout();
    let outcome = check::run_check(
        &service,
        source,
        config.editor.tab_size,
        args.output.as_deref(),
        options,
        &mut stdout,
    )
    .await?;
    Ok(outcome.exit_code(args.strict))
}

async fn handle_edit(args: EditArgs) -> anyhow::Result<()> {
    let config = args.service.load_config()?;
    let service = Arc::new(HttpCheckService::new(&config.endpoint)?);
    info!("Checking service: {}", service.url());

    let mut editor = EditorPanel::new(config.editor)
        .on_change(|text| trace!("Editor now holds {} lines", text.lines().count()));
    if let Some(path) = &args.file {
        editor.load(Path::new(path))?;
    }
    let session = Session::with_editor(editor);

    session::runner::run(session, service, args.service.color.enabled()).await
}
