use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

/// Records fetched per loader chunk and revealed per pagination step.
pub const SCROLL_STEP: usize = 20;
/// Upper bound on how many catalog entries the background loader pulls in.
pub const FULL_CATALOG_LIMIT: usize = 1000;
/// Ticks a status message stays on screen (tick interval is 120ms).
pub const MESSAGE_TICKS: u16 = 25;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

/// The slice of the remote detail object the cards and popup consume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonData {
    pub id: u16,
    pub types: Vec<String>,
    pub species: String,
    pub height: u16,
    pub weight: u16,
    pub stats: Vec<PokemonStat>,
    pub artwork_url: Option<String>,
    pub sprite_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub name: String,
    pub data: PokemonData,
}

/// One caught entry. `name` is display-normalized and is the uniqueness key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaughtPokemon {
    pub name: String,
    pub data: PokemonData,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRef {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub name: String,
    pub label: String,
}

/// A fetched catalog listing page with the listing's reported total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub records: Vec<PokemonRecord>,
    pub total: usize,
}

/// Pagination cursor for one card grid.
///
/// `batch` is the absolute render target; a scroll step raises it by
/// [`SCROLL_STEP`] (or the exact remainder near the end) and it never
/// shrinks. `cursor` is how many records are actually revealed, always
/// clipped to the cache length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pager {
    pub cursor: usize,
    pub batch: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            cursor: 0,
            batch: SCROLL_STEP,
        }
    }
}

impl Pager {
    /// Reveal records up to the current batch target, clipped to `available`.
    pub fn render_next_batch(&mut self, available: usize) {
        self.cursor = self.batch.min(available);
    }

    /// Grow the batch target and reveal the next slice. Returns false when
    /// every cached record is already on screen.
    pub fn scroll_near_bottom(&mut self, available: usize) -> bool {
        if self.cursor >= available {
            return false;
        }
        let remainder = available - self.cursor;
        self.batch += remainder.min(SCROLL_STEP);
        self.render_next_batch(available);
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusArea {
    Grid,
    Tray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopupTab {
    Stats,
    About,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPhase {
    Idle,
    InitialLoading,
    BackgroundLoading,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopupState {
    pub index: usize,
    pub tab: PopupTab,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub focus: FocusArea,
    /// 0 shows the full catalog; 1..=regions.len() shows regions[view - 1].
    pub view: usize,

    pub catalog: Vec<PokemonRecord>,
    pub catalog_pager: Pager,
    pub catalog_phase: LoadPhase,
    pub catalog_generation: u64,
    pub catalog_total: usize,

    pub regions: Vec<RegionInfo>,
    pub region_cache: Vec<PokemonRecord>,
    pub region_species: Vec<SpeciesRef>,
    pub region_pager: Pager,
    pub region_phase: LoadPhase,
    pub region_generation: u64,

    pub caught: Vec<CaughtPokemon>,
    pub selected: usize,
    pub tray_selected: usize,

    pub search: SearchState,
    pub search_results: Vec<usize>,
    pub search_selected: usize,

    pub popup: Option<PopupState>,
    pub message: Option<String>,
    pub message_ticks: u16,
    pub initial_loading: bool,
    pub tick: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            terminal_size: (120, 40),
            focus: FocusArea::Grid,
            view: 0,
            catalog: Vec::new(),
            catalog_pager: Pager::default(),
            catalog_phase: LoadPhase::Idle,
            catalog_generation: 0,
            catalog_total: 0,
            regions: Vec::new(),
            region_cache: Vec::new(),
            region_species: Vec::new(),
            region_pager: Pager::default(),
            region_phase: LoadPhase::Idle,
            region_generation: 0,
            caught: Vec::new(),
            selected: 0,
            tray_selected: 0,
            search: SearchState::default(),
            search_results: Vec::new(),
            search_selected: 0,
            popup: None,
            message: None,
            message_ticks: 0,
            initial_loading: false,
            tick: 0,
        }
    }

    /// The cache backing the current view.
    pub fn active_records(&self) -> &[PokemonRecord] {
        if self.view == 0 {
            &self.catalog
        } else {
            &self.region_cache
        }
    }

    pub fn active_len(&self) -> usize {
        self.active_records().len()
    }

    /// How many records of the active cache are revealed on the grid.
    pub fn visible_len(&self) -> usize {
        if self.view == 0 {
            self.catalog_pager.cursor
        } else {
            self.region_pager.cursor
        }
    }

    pub fn active_phase(&self) -> LoadPhase {
        if self.view == 0 {
            self.catalog_phase
        } else {
            self.region_phase
        }
    }

    /// Run a scroll step on whichever pager backs the current view.
    pub fn scroll_active(&mut self) -> bool {
        let available = self.active_len();
        if self.view == 0 {
            self.catalog_pager.scroll_near_bottom(available)
        } else {
            self.region_pager.scroll_near_bottom(available)
        }
    }

    pub fn view_label(&self) -> &str {
        if self.view == 0 {
            "All Pokemon"
        } else {
            self.regions
                .get(self.view - 1)
                .map(|region| region.label.as_str())
                .unwrap_or("Region")
        }
    }

    pub fn selected_record(&self) -> Option<&PokemonRecord> {
        self.active_records().get(self.selected)
    }

    pub fn popup_record(&self) -> Option<&PokemonRecord> {
        let popup = self.popup.as_ref()?;
        self.active_records().get(popup.index)
    }

    pub fn is_caught(&self, display: &str) -> bool {
        self.caught.iter().any(|entry| entry.name == display)
    }

    pub fn rebuild_search(&mut self) {
        self.search_results = search_matches(&self.catalog, &self.search.query);
        if self.search_selected >= self.search_results.len() {
            self.search_selected = 0;
        }
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(text.into());
        self.message_ticks = MESSAGE_TICKS;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog indices whose record name contains the query, in cache order.
/// Queries shorter than two characters produce no results.
pub fn search_matches(records: &[PokemonRecord], query: &str) -> Vec<usize> {
    if query.len() < 2 {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.name.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

/// First letter upper, rest as stored. The remote API serves lowercase
/// names, so this is the display and uniqueness form for caught entries.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("records", ron_string(&self.catalog.len()))
                .entry("revealed", ron_string(&self.catalog_pager.cursor))
                .entry("batch", ron_string(&self.catalog_pager.batch))
                .entry("total", ron_string(&self.catalog_total))
                .entry("phase", ron_string(&self.catalog_phase))
                .entry("generation", ron_string(&self.catalog_generation)),
            DebugSection::new("Region")
                .entry("view", ron_string(&self.view))
                .entry("regions", ron_string(&self.regions.len()))
                .entry("species", ron_string(&self.region_species.len()))
                .entry("records", ron_string(&self.region_cache.len()))
                .entry("revealed", ron_string(&self.region_pager.cursor))
                .entry("phase", ron_string(&self.region_phase))
                .entry("generation", ron_string(&self.region_generation)),
            DebugSection::new("Caught")
                .entry("entries", ron_string(&self.caught.len()))
                .entry("selected", ron_string(&self.tray_selected)),
            DebugSection::new("Ui")
                .entry("focus", ron_string(&self.focus))
                .entry("selected", ron_string(&self.selected))
                .entry("search", ron_string(&self.search.query))
                .entry("results", ron_string(&self.search_results.len()))
                .entry("popup", ron_string(&self.popup))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
