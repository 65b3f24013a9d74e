use serde::{Deserialize, Serialize};

use crate::state::{CaughtPokemon, PokemonRecord, RegionInfo, SpeciesRef};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    CatalogPageDidLoad {
        generation: u64,
        records: Vec<PokemonRecord>,
        total: usize,
    },
    CatalogPageDidError {
        generation: u64,
        error: String,
    },

    RegionsDidLoad(Vec<RegionInfo>),
    RegionsDidError(String),
    ViewNext,
    ViewPrev,

    RegionSpeciesDidLoad {
        generation: u64,
        species: Vec<SpeciesRef>,
    },
    RegionSpeciesDidError {
        generation: u64,
        error: String,
    },
    RegionPageDidLoad {
        generation: u64,
        records: Vec<PokemonRecord>,
    },
    RegionPageDidError {
        generation: u64,
        error: String,
    },

    FocusNext,
    SelectionMove(i16),
    ScrollNearBottom,

    Catch(usize),
    Release(usize),
    ClearCaught,
    CaughtDidLoad(Vec<CaughtPokemon>),
    CaughtDidError(String),
    SaveComplete,
    SaveError(String),

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,
    SearchMove(i16),

    PopupOpen(usize),
    PopupClose,
    PopupPrev,
    PopupNext,
    PopupTabToggle,

    #[action(category = "ui")]
    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
