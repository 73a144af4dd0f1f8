mod actions;
mod engine;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use arboard::Clipboard;
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender};
use search_core::{
    config::DEFAULT_CONFIG_FILE, dispatch_session_commands, execute_search, load_config,
    load_registry, FileRegistrySource, HttpRegistrySource, QueryParams, RegistrySource,
    SearchSessionController, SessionCommand, SessionEvent,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::{actions::Action, engine::MemoryEngine};

const COMMAND_QUEUE_CAPACITY: usize = 64;

/// Restore a bucket search session from a URL, replay UI actions, and print the view.
#[derive(Parser, Debug)]
struct Args {
    /// Search page URL or bare query string (`?q=git&p=2`) to restore
    #[arg(long, default_value = "")]
    url: String,
    /// JSON array of manifests served by the local engine
    #[arg(long)]
    manifests: PathBuf,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Read the official bucket catalog from disk instead of fetching it
    #[arg(long)]
    catalog_file: Option<PathBuf>,
    /// Print copy requests instead of writing the OS clipboard
    #[arg(long)]
    no_clipboard: bool,
    /// Actions applied in order: edit=<text>, submit, page=<n>, sort=<i>[:asc|desc],
    /// official[=true|false], copy=<result>, copy-bucket=<result>
    actions: Vec<Action>,
}

struct Location {
    base: Option<Url>,
}

impl Location {
    fn parse(raw: &str) -> (Self, QueryParams) {
        match Url::parse(raw) {
            Ok(url) => {
                let params = QueryParams::from_url(&url);
                (Self { base: Some(url) }, params)
            }
            Err(_) => (Self { base: None }, QueryParams::parse(raw)),
        }
    }

    fn render(&self, params: &QueryParams) -> String {
        match &self.base {
            Some(base) => params.apply_to(base).to_string(),
            None if params.is_empty() => String::new(),
            None => format!("?{params}"),
        }
    }
}

struct Session {
    controller: SearchSessionController,
    engine: MemoryEngine,
    catalog_file: Option<PathBuf>,
    clipboard: Option<Clipboard>,
    location: Location,
    cmd_tx: Sender<SessionCommand>,
    cmd_rx: Receiver<SessionCommand>,
}

impl Session {
    fn queue(&self, commands: Vec<SessionCommand>) -> Result<()> {
        dispatch_session_commands(&self.cmd_tx, commands)
            .context("failed to queue session commands")?;
        Ok(())
    }

    /// Drains the queue; completions re-enter the controller and may queue more.
    async fn drain(&mut self) -> Result<()> {
        while let Ok(cmd) = self.cmd_rx.try_recv() {
            let follow_up = self.execute(cmd).await?;
            self.queue(follow_up)?;
        }
        Ok(())
    }

    async fn execute(&mut self, cmd: SessionCommand) -> Result<Vec<SessionCommand>> {
        debug!(command = cmd.name(), "executing session command");
        let follow_up = match cmd {
            SessionCommand::Search(request) => {
                let response = execute_search(&self.engine, &request).await;
                self.controller
                    .handle(SessionEvent::EngineResponded(response))
            }
            SessionCommand::FetchRegistry { catalog_url } => {
                let source: Box<dyn RegistrySource> = match &self.catalog_file {
                    Some(path) => Box::new(FileRegistrySource::new(path.clone())),
                    None => Box::new(HttpRegistrySource::new(catalog_url)),
                };
                let registry = load_registry(source.as_ref()).await;
                self.controller
                    .handle(SessionEvent::RegistryLoaded(registry))
            }
            SessionCommand::ReplaceUrl(_) => {
                info!(
                    url = %self.location.render(self.controller.params()),
                    "replaced history entry"
                );
                Vec::new()
            }
            SessionCommand::ScrollToTop => {
                debug!("scrolled results to top");
                Vec::new()
            }
            SessionCommand::CopyToClipboard(content) => {
                self.write_clipboard(&content);
                self.controller.handle(SessionEvent::ContentCopied)
            }
        };
        Ok(follow_up)
    }

    fn write_clipboard(&mut self, content: &str) {
        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(content.to_string()) {
                Ok(()) => println!("Copied to clipboard: {content}"),
                Err(err) => {
                    warn!(error = %err, "clipboard write failed");
                    println!("Copy: {content}");
                }
            },
            None => println!("Copy: {content}"),
        }
    }

    fn event_for(&self, action: Action) -> Result<SessionEvent> {
        let event = match action {
            Action::Edit(text) => SessionEvent::QueryEdited(text),
            Action::Submit => SessionEvent::QuerySubmitted,
            Action::Page(page) => SessionEvent::PageRequested(page),
            Action::Sort(index, direction) => {
                let direction = direction
                    .unwrap_or_else(|| self.controller.config().default_direction(index));
                SessionEvent::SortChanged { index, direction }
            }
            Action::Official(value) => SessionEvent::OfficialOnlyChanged(value),
            Action::CopyInstall(index) => SessionEvent::CopyRequested(
                self.result_view_command(index, |view| view.install_command())?,
            ),
            Action::CopyBucket(index) => SessionEvent::CopyRequested(
                self.result_view_command(index, |view| view.bucket_add_command())?,
            ),
        };
        Ok(event)
    }

    fn result_view_command(
        &self,
        index: usize,
        render: impl Fn(&search_core::ResultView<'_>) -> String,
    ) -> Result<String> {
        let views = self.controller.result_views();
        let view = views
            .get(index)
            .ok_or_else(|| {
                anyhow!("no result #{index} on the current page ({} shown)", views.len())
            })?;
        Ok(render(view))
    }

    fn print_view(&self) {
        let state = self.controller.state();
        let config = self.controller.config();
        let sort = config
            .sort_mode(state.sort_index)
            .map_or("?", |mode| mode.display_name.as_str());

        println!("URL: {}", self.location.render(self.controller.params()));
        println!(
            "Query: {:?} (submitted: {:?})",
            state.draft_query, state.committed_query
        );
        println!(
            "Page {} of {} ({} results), sort: {sort} {:?}, official only: {}",
            state.page,
            self.controller.page_count(),
            self.controller.results_count(),
            state.sort_direction,
            state.official_only
        );

        if self.controller.results().is_none() {
            println!("  (no results yet)");
            return;
        }
        for (index, view) in self.controller.result_views().iter().enumerate() {
            let manifest = view.manifest;
            println!(
                "  [{index}] {} {} | {} | {} {}",
                manifest.name,
                manifest.version.as_deref().unwrap_or("-"),
                view.bucket_name,
                view.tooltip(),
                view.color()
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let config = load_config(&args.config);
    config.validate().context("invalid search configuration")?;
    let engine = MemoryEngine::from_file(&args.manifests, config.sort_modes.clone())?;

    let clipboard = if args.no_clipboard {
        None
    } else {
        match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                warn!(error = %err, "OS clipboard unavailable; copy requests will be printed");
                None
            }
        }
    };

    let (location, params) = Location::parse(&args.url);
    let (cmd_tx, cmd_rx) = bounded::<SessionCommand>(COMMAND_QUEUE_CAPACITY);
    let mut session = Session {
        controller: SearchSessionController::new(config, params),
        engine,
        catalog_file: args.catalog_file,
        clipboard,
        location,
        cmd_tx,
        cmd_rx,
    };

    let initial = session.controller.start();
    session.queue(initial)?;
    session.drain().await?;

    for action in args.actions {
        let event = session.event_for(action.clone())?;
        let commands = session.controller.handle(event);
        if commands.is_empty() {
            debug!(?action, "action left the session unchanged");
        }
        session.queue(commands)?;
        session.drain().await?;
    }

    if session.controller.pending_copy().is_some() {
        bail!("copy request was not acknowledged");
    }
    session.print_view();
    Ok(())
}
