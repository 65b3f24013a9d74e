use crate::state::{CaughtPokemon, SpeciesRef};

/// Side effects requested by the reducer and executed by the runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadRegions,
    LoadCatalogPage {
        generation: u64,
        offset: usize,
        limit: usize,
    },
    LoadRegionSpecies {
        generation: u64,
        region: String,
    },
    LoadRegionPage {
        generation: u64,
        refs: Vec<SpeciesRef>,
    },
    SaveCaught {
        entries: Vec<CaughtPokemon>,
    },
    LoadCaught,
    ClearCaughtStorage,
}
