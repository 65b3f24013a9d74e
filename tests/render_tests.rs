//! Full-screen render checks against the plain-text test buffer.

use tui_dispatch::testing::*;

use catchdex::{
    state::{
        AppState, CaughtPokemon, LoadPhase, PokemonData, PokemonRecord, PokemonStat, PopupState,
        PopupTab,
    },
    ui,
};

fn record(name: &str, id: u16) -> PokemonRecord {
    PokemonRecord {
        name: name.to_string(),
        data: PokemonData {
            id,
            types: vec!["grass".to_string(), "poison".to_string()],
            species: name.to_string(),
            height: 7,
            weight: 69,
            stats: vec![
                PokemonStat {
                    name: "hp".to_string(),
                    value: 45,
                },
                PokemonStat {
                    name: "speed".to_string(),
                    value: 45,
                },
            ],
            artwork_url: None,
            sprite_url: None,
        },
    }
}

/// Five records cached and revealed, nothing caught.
fn grid_state() -> AppState {
    let names = ["bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon"];
    let mut state = AppState::new();
    state.catalog = names
        .iter()
        .enumerate()
        .map(|(i, name)| record(name, i as u16 + 1))
        .collect();
    state.catalog_total = state.catalog.len();
    let available = state.catalog.len();
    state.catalog_pager.render_next_batch(available);
    state
}

fn draw(state: &AppState) -> String {
    let mut render = RenderHarness::new(120, 40);
    render.render_to_string_plain(|frame| {
        ui::render(frame, frame.area(), state);
    })
}

#[test]
fn an_empty_idle_catalog_says_so() {
    let output = draw(&AppState::new());

    assert!(output.contains("CATCHDEX"), "missing header:\n{output}");
    assert!(output.contains("ALL POKEMON"), "missing grid title:\n{output}");
    assert!(output.contains("No Pokemon loaded."));
    assert!(output.contains("Nothing caught yet."));
    assert!(output.contains("Press c on a card to catch it."));
}

#[test]
fn cards_show_number_name_types_and_measurements() {
    let output = draw(&grid_state());

    assert!(output.contains("#0001"));
    assert!(output.contains("Bulbasaur"));
    assert!(output.contains("Charmander"));
    assert!(output.contains("grass / poison"));
    assert!(output.contains("HT 7  WT 69"));
    assert!(output.contains("Shown: 5/5"));
}

#[test]
fn a_caught_card_carries_its_marker_and_fills_the_tray() {
    let mut state = grid_state();
    state.caught.push(CaughtPokemon {
        name: "Bulbasaur".to_string(),
        data: state.catalog[0].data.clone(),
    });

    let output = draw(&state);

    assert!(output.contains("* Bulbasaur"), "missing marker:\n{output}");
    assert!(output.contains("CATCH BOX (1)"));
    assert!(output.contains("01 Bulbasaur #0001"));
}

#[test]
fn the_popup_walks_stats_then_about() {
    let mut state = grid_state();
    state.popup = Some(PopupState {
        index: 0,
        tab: PopupTab::Stats,
    });

    let output = draw(&state);
    assert!(output.contains("#0001 BULBASAUR"), "missing title:\n{output}");
    assert!(output.contains("Stats"));
    assert!(output.contains("About"));
    assert!(output.contains("HP"));
    assert!(output.contains("####"));
    assert!(output.contains("1/5  h/l Navigate  Esc Close"));

    state.popup = Some(PopupState {
        index: 0,
        tab: PopupTab::About,
    });

    let output = draw(&state);
    assert!(output.contains("Species: Bulbasaur"));
    assert!(output.contains("Height: 7  Weight: 69"));
    assert!(output.contains("Types: grass / poison"));
}

#[test]
fn the_search_overlay_lists_matches() {
    let mut state = grid_state();
    state.search.active = true;
    state.search.query = "saur".to_string();
    state.rebuild_search();

    let output = draw(&state);
    assert!(output.contains("Find: saur_"), "missing prompt:\n{output}");
    assert!(output.contains("#0001 Bulbasaur"));
    assert!(output.contains("#0002 Ivysaur"));
    assert!(output.contains("3 match(es)"));

    // under two characters nothing matches yet
    state.search.query = "s".to_string();
    state.rebuild_search();

    let output = draw(&state);
    assert!(output.contains("Type at least two characters."));
}

#[test]
fn the_footer_surfaces_progress_then_messages() {
    let mut state = grid_state();
    state.catalog_phase = LoadPhase::BackgroundLoading;
    state.catalog_total = 151;

    let output = draw(&state);
    assert!(
        output.contains("Loading full catalog... 5/151"),
        "missing progress:\n{output}"
    );

    // a status message outranks the progress line
    state.set_message("Bulbasaur is already caught");
    let output = draw(&state);
    assert!(output.contains("Bulbasaur is already caught"));
}

#[test]
fn the_first_load_covers_the_screen() {
    let mut state = AppState::new();
    state.initial_loading = true;
    state.catalog_phase = LoadPhase::InitialLoading;

    let output = draw(&state);
    assert!(output.contains("Loading Pokedex..."));
    assert!(output.contains("Fetching the first cards"));
}
