//! Pokedex catalog TUI built on tui-dispatch.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventOutcome, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use catchdex::action::Action;
use catchdex::api;
use catchdex::effect::Effect;
use catchdex::persist;
use catchdex::reducer::reducer;
use catchdex::state::AppState;
use catchdex::ui;

#[derive(Parser, Debug)]
#[command(name = "catchdex")]
#[command(about = "Pokedex catalog TUI with a persistent catch box")]
struct Args {
    /// Directory for the caught list (defaults to the platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

/// Paths the effect handler needs that do not belong in app state.
struct RuntimeConfig {
    caught_path: PathBuf,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = Arc::new(RuntimeConfig {
        caught_path: caught_file_path(args.data_dir),
    });
    let debug = DebugSession::new(args.debug);

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::new()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, config).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    config: Arc<RuntimeConfig>,
) -> io::Result<DebugRunOutput<AppState>> {
    debug
        .run_effect_app(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(120), || Action::Tick);
            },
            |frame, area, state, _render_ctx: RenderContext| {
                ui::render(frame, area, state);
            },
            |event, state| -> EventOutcome<Action> { ui::handle_event(event, state) },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, config.clone()),
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, config: Arc<RuntimeConfig>) {
    match effect {
        Effect::LoadCatalogPage {
            generation,
            offset,
            limit,
        } => {
            // one fixed key, so a newer load replaces an in-flight one
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::fetch_catalog_page(offset, limit).await {
                    Ok(page) => Action::CatalogPageDidLoad {
                        generation,
                        records: page.records,
                        total: page.total,
                    },
                    Err(error) => Action::CatalogPageDidError { generation, error },
                }
            });
        }
        Effect::LoadRegions => {
            ctx.tasks().spawn(TaskKey::new("regions"), async move {
                match api::fetch_regions().await {
                    Ok(regions) => Action::RegionsDidLoad(regions),
                    Err(error) => Action::RegionsDidError(error),
                }
            });
        }
        Effect::LoadRegionSpecies { generation, region } => {
            ctx.tasks().spawn(TaskKey::new("region"), async move {
                match api::fetch_region_species(&region).await {
                    Ok(species) => Action::RegionSpeciesDidLoad { generation, species },
                    Err(error) => Action::RegionSpeciesDidError { generation, error },
                }
            });
        }
        Effect::LoadRegionPage { generation, refs } => {
            ctx.tasks().spawn(TaskKey::new("region"), async move {
                match api::fetch_region_page(refs).await {
                    Ok(records) => Action::RegionPageDidLoad { generation, records },
                    Err(error) => Action::RegionPageDidError { generation, error },
                }
            });
        }
        Effect::SaveCaught { entries } => {
            let path = config.caught_path.clone();
            ctx.tasks().spawn(TaskKey::new("save_caught"), async move {
                match persist::save_caught(&path, &entries).await {
                    Ok(()) => Action::SaveComplete,
                    Err(error) => Action::SaveError(error),
                }
            });
        }
        Effect::LoadCaught => {
            let path = config.caught_path.clone();
            ctx.tasks().spawn(TaskKey::new("load_caught"), async move {
                match persist::load_caught(&path).await {
                    Ok(entries) => Action::CaughtDidLoad(entries),
                    Err(error) => Action::CaughtDidError(error),
                }
            });
        }
        Effect::ClearCaughtStorage => {
            let path = config.caught_path.clone();
            ctx.tasks().spawn(TaskKey::new("clear_caught"), async move {
                match persist::clear_caught(&path).await {
                    Ok(()) => Action::SaveComplete,
                    Err(error) => Action::SaveError(error),
                }
            });
        }
    }
}

fn caught_file_path(data_dir: Option<PathBuf>) -> PathBuf {
    let base = data_dir.unwrap_or_else(|| {
        dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("catchdex")
    });
    base.join("caught.json")
}
