use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{
    display_name, AppState, CaughtPokemon, FocusArea, LoadPhase, Pager, PopupState, PopupTab,
    SearchState, SpeciesRef, FULL_CATALOG_LIMIT, SCROLL_STEP,
};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.catalog_generation += 1;
            state.catalog_phase = LoadPhase::InitialLoading;
            state.initial_loading = true;
            DispatchResult::changed_with_many(vec![
                Effect::LoadCaught,
                Effect::LoadRegions,
                Effect::LoadCatalogPage {
                    generation: state.catalog_generation,
                    offset: 0,
                    limit: SCROLL_STEP,
                },
            ])
        }

        Action::CatalogPageDidLoad {
            generation,
            records,
            total,
        } => {
            if generation != state.catalog_generation {
                return DispatchResult::unchanged();
            }
            let fresh = records.len();
            state.catalog.extend(records);
            state.catalog_total = total.min(FULL_CATALOG_LIMIT);
            if state.catalog_phase == LoadPhase::InitialLoading {
                state.catalog_pager.render_next_batch(state.catalog.len());
                state.initial_loading = false;
            }
            if fresh == 0 || state.catalog.len() >= state.catalog_total {
                state.catalog_phase = LoadPhase::Idle;
                return DispatchResult::changed();
            }
            // keep pulling from where the cache ends, never from zero
            state.catalog_phase = LoadPhase::BackgroundLoading;
            let offset = state.catalog.len();
            let limit = SCROLL_STEP.min(state.catalog_total - offset);
            DispatchResult::changed_with(Effect::LoadCatalogPage {
                generation,
                offset,
                limit,
            })
        }
        Action::CatalogPageDidError { generation, error } => {
            if generation != state.catalog_generation {
                return DispatchResult::unchanged();
            }
            state.catalog_phase = LoadPhase::Idle;
            state.initial_loading = false;
            state.set_message(format!("Catalog load failed: {error}"));
            DispatchResult::changed()
        }

        Action::RegionsDidLoad(regions) => {
            state.regions = regions;
            DispatchResult::changed()
        }
        Action::RegionsDidError(error) => {
            state.set_message(format!("Region list failed: {error}"));
            DispatchResult::changed()
        }
        Action::ViewNext => cycle_view(state, 1),
        Action::ViewPrev => cycle_view(state, -1),

        Action::RegionSpeciesDidLoad { generation, species } => {
            if generation != state.region_generation {
                return DispatchResult::unchanged();
            }
            state.region_species = species;
            let window: Vec<SpeciesRef> = state
                .region_species
                .iter()
                .take(SCROLL_STEP)
                .cloned()
                .collect();
            if window.is_empty() {
                state.region_phase = LoadPhase::Idle;
                return DispatchResult::changed();
            }
            DispatchResult::changed_with(Effect::LoadRegionPage {
                generation,
                refs: window,
            })
        }
        Action::RegionSpeciesDidError { generation, error } => {
            if generation != state.region_generation {
                return DispatchResult::unchanged();
            }
            state.region_phase = LoadPhase::Idle;
            state.set_message(format!("Region load failed: {error}"));
            DispatchResult::changed()
        }
        Action::RegionPageDidLoad {
            generation,
            records,
        } => {
            if generation != state.region_generation {
                return DispatchResult::unchanged();
            }
            let fresh = records.len();
            state.region_cache.extend(records);
            if state.region_phase == LoadPhase::InitialLoading {
                state
                    .region_pager
                    .render_next_batch(state.region_cache.len());
            }
            let next_offset = state.region_cache.len();
            if fresh == 0 || next_offset >= state.region_species.len() {
                state.region_phase = LoadPhase::Idle;
                return DispatchResult::changed();
            }
            state.region_phase = LoadPhase::BackgroundLoading;
            let window: Vec<SpeciesRef> = state.region_species[next_offset..]
                .iter()
                .take(SCROLL_STEP)
                .cloned()
                .collect();
            DispatchResult::changed_with(Effect::LoadRegionPage {
                generation,
                refs: window,
            })
        }
        Action::RegionPageDidError { generation, error } => {
            if generation != state.region_generation {
                return DispatchResult::unchanged();
            }
            state.region_phase = LoadPhase::Idle;
            state.set_message(format!("Region load failed: {error}"));
            DispatchResult::changed()
        }

        Action::FocusNext => {
            state.focus = match state.focus {
                FocusArea::Grid => FocusArea::Tray,
                FocusArea::Tray => FocusArea::Grid,
            };
            DispatchResult::changed()
        }
        Action::SelectionMove(delta) => move_selection(state, delta),
        Action::ScrollNearBottom => {
            if state.scroll_active() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Catch(index) => catch_record(state, index),
        Action::Release(index) => release_caught(state, index),
        Action::ClearCaught => {
            state.caught.clear();
            state.tray_selected = 0;
            DispatchResult::changed_with(Effect::ClearCaughtStorage)
        }
        Action::CaughtDidLoad(entries) => {
            state.caught = entries;
            if state.tray_selected >= state.caught.len() {
                state.tray_selected = state.caught.len().saturating_sub(1);
            }
            DispatchResult::changed()
        }
        Action::CaughtDidError(error) => {
            state.set_message(error);
            DispatchResult::changed()
        }
        Action::SaveComplete => DispatchResult::unchanged(),
        Action::SaveError(error) => {
            state.set_message(format!("Save failed: {error}"));
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.view != 0 || state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }
        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search = SearchState::default();
            state.search_results.clear();
            state.search_selected = 0;
            DispatchResult::changed()
        }
        Action::SearchSubmit => {
            let Some(&index) = state.search_results.get(state.search_selected) else {
                return DispatchResult::unchanged();
            };
            state.popup = Some(PopupState {
                index,
                tab: PopupTab::Stats,
            });
            DispatchResult::changed()
        }
        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            state.rebuild_search();
            DispatchResult::changed()
        }
        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            state.rebuild_search();
            DispatchResult::changed()
        }
        Action::SearchMove(delta) => {
            let len = state.search_results.len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = clamp_index(state.search_selected as i64 + delta as i64, len);
            if next == state.search_selected {
                return DispatchResult::unchanged();
            }
            state.search_selected = next;
            DispatchResult::changed()
        }

        Action::PopupOpen(index) => {
            if index >= state.active_len() {
                return DispatchResult::unchanged();
            }
            state.popup = Some(PopupState {
                index,
                tab: PopupTab::Stats,
            });
            DispatchResult::changed()
        }
        Action::PopupClose => {
            if state.popup.take().is_none() {
                return DispatchResult::unchanged();
            }
            DispatchResult::changed()
        }
        Action::PopupPrev => move_popup(state, -1),
        Action::PopupNext => move_popup(state, 1),
        Action::PopupTabToggle => {
            let Some(popup) = state.popup.as_mut() else {
                return DispatchResult::unchanged();
            };
            popup.tab = match popup.tab {
                PopupTab::Stats => PopupTab::About,
                PopupTab::About => PopupTab::Stats,
            };
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }
        Action::Tick => tick(state),
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn cycle_view(state: &mut AppState, delta: i16) -> DispatchResult<Effect> {
    let count = state.regions.len() + 1;
    if count == 1 {
        return DispatchResult::unchanged();
    }
    let next = (state.view as i64 + delta as i64).rem_euclid(count as i64) as usize;
    state.view = next;
    state.selected = 0;
    state.focus = FocusArea::Grid;
    state.popup = None;
    state.search = SearchState::default();
    state.search_results.clear();
    state.search_selected = 0;
    if next == 0 {
        // the catalog stays warm while a region was on screen
        return DispatchResult::changed();
    }
    state.region_cache.clear();
    state.region_species.clear();
    state.region_pager = Pager::default();
    state.region_generation += 1;
    state.region_phase = LoadPhase::InitialLoading;
    let region = state.regions[next - 1].name.clone();
    DispatchResult::changed_with(Effect::LoadRegionSpecies {
        generation: state.region_generation,
        region,
    })
}

fn move_selection(state: &mut AppState, delta: i16) -> DispatchResult<Effect> {
    match state.focus {
        FocusArea::Grid => {
            let target = state.selected as i64 + delta as i64;
            let grew = if target >= state.visible_len() as i64 {
                // pushing past the revealed end reveals the next batch
                state.scroll_active()
            } else {
                false
            };
            let visible = state.visible_len();
            if visible == 0 {
                return DispatchResult::unchanged();
            }
            let next = clamp_index(target, visible);
            if next == state.selected {
                if grew {
                    return DispatchResult::changed();
                }
                return DispatchResult::unchanged();
            }
            state.selected = next;
            DispatchResult::changed()
        }
        FocusArea::Tray => {
            let len = state.caught.len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = clamp_index(state.tray_selected as i64 + delta as i64, len);
            if next == state.tray_selected {
                return DispatchResult::unchanged();
            }
            state.tray_selected = next;
            DispatchResult::changed()
        }
    }
}

fn catch_record(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    let Some(record) = state.active_records().get(index) else {
        return DispatchResult::unchanged();
    };
    let name = display_name(&record.name);
    let data = record.data.clone();
    if state.is_caught(&name) {
        state.set_message(format!("{name} is already caught"));
        return DispatchResult::changed();
    }
    state.caught.push(CaughtPokemon { name, data });
    DispatchResult::changed_with(Effect::SaveCaught {
        entries: state.caught.clone(),
    })
}

fn release_caught(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    if index >= state.caught.len() {
        return DispatchResult::unchanged();
    }
    state.caught.remove(index);
    if state.tray_selected >= state.caught.len() {
        state.tray_selected = state.caught.len().saturating_sub(1);
    }
    DispatchResult::changed_with(Effect::SaveCaught {
        entries: state.caught.clone(),
    })
}

fn move_popup(state: &mut AppState, delta: i64) -> DispatchResult<Effect> {
    let len = state.active_len();
    let Some(popup) = state.popup.as_mut() else {
        return DispatchResult::unchanged();
    };
    let target = popup.index as i64 + delta;
    if target < 0 || target >= len as i64 {
        // past either end stays put
        return DispatchResult::unchanged();
    }
    popup.index = target as usize;
    popup.tab = PopupTab::Stats;
    DispatchResult::changed()
}

fn tick(state: &mut AppState) -> DispatchResult<Effect> {
    state.tick = state.tick.wrapping_add(1);
    if state.message.is_some() {
        state.message_ticks = state.message_ticks.saturating_sub(1);
        if state.message_ticks == 0 {
            state.message = None;
        }
        return DispatchResult::changed();
    }
    if state.initial_loading
        || state.catalog_phase != LoadPhase::Idle
        || state.region_phase != LoadPhase::Idle
    {
        return DispatchResult::changed();
    }
    DispatchResult::unchanged()
}

fn clamp_index(target: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    target.clamp(0, len as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::state::{PokemonData, PokemonRecord, RegionInfo};

    fn record(name: &str, id: u16) -> PokemonRecord {
        PokemonRecord {
            name: name.to_string(),
            data: PokemonData {
                id,
                types: vec!["grass".to_string()],
                species: name.to_string(),
                height: 7,
                weight: 69,
                stats: Vec::new(),
                artwork_url: None,
                sprite_url: None,
            },
        }
    }

    fn records(count: usize) -> Vec<PokemonRecord> {
        (0..count)
            .map(|i| record(&format!("pokemon-{i}"), i as u16 + 1))
            .collect()
    }

    fn loaded_state(count: usize) -> AppState {
        let mut state = AppState::new();
        let result = reducer(&mut state, Action::Init);
        assert_eq!(result.effects.len(), 3);
        let generation = state.catalog_generation;
        let result = reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                generation,
                records: records(count),
                total: count,
            },
        );
        assert!(result.changed);
        state
    }

    #[test]
    fn init_restores_captures_and_starts_the_first_page() {
        let mut state = AppState::new();
        let result = reducer(&mut state, Action::Init);
        assert!(result.changed);
        assert!(result.effects.contains(&Effect::LoadCaught));
        assert!(result.effects.contains(&Effect::LoadRegions));
        assert!(result.effects.contains(&Effect::LoadCatalogPage {
            generation: 1,
            offset: 0,
            limit: SCROLL_STEP,
        }));
        assert_eq!(state.catalog_phase, LoadPhase::InitialLoading);
        assert!(state.initial_loading);
    }

    #[test]
    fn first_page_reveals_a_batch_and_resumes_from_the_cache_end() {
        let mut state = AppState::new();
        reducer(&mut state, Action::Init);
        let result = reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                generation: 1,
                records: records(20),
                total: 60,
            },
        );
        assert_eq!(state.catalog_pager.cursor, 20);
        assert!(!state.initial_loading);
        assert_eq!(state.catalog_phase, LoadPhase::BackgroundLoading);
        assert_eq!(
            result.effects,
            vec![Effect::LoadCatalogPage {
                generation: 1,
                offset: 20,
                limit: 20,
            }]
        );
    }

    #[test]
    fn background_pages_append_without_revealing_more() {
        let mut state = AppState::new();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                generation: 1,
                records: records(20),
                total: 50,
            },
        );
        let result = reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                generation: 1,
                records: records(20),
                total: 50,
            },
        );
        assert_eq!(state.catalog.len(), 40);
        assert_eq!(state.catalog_pager.cursor, 20);
        assert_eq!(
            result.effects,
            vec![Effect::LoadCatalogPage {
                generation: 1,
                offset: 40,
                limit: 10,
            }]
        );

        let result = reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                generation: 1,
                records: records(10),
                total: 50,
            },
        );
        assert!(result.effects.is_empty());
        assert_eq!(state.catalog_phase, LoadPhase::Idle);
        assert_eq!(state.catalog.len(), 50);
    }

    #[test]
    fn stale_generation_pages_are_dropped() {
        let mut state = loaded_state(20);
        state.catalog_generation += 1;
        let result = reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                generation: 1,
                records: records(20),
                total: 40,
            },
        );
        assert!(!result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.catalog.len(), 20);
    }

    #[test]
    fn scroll_reveals_in_steps_and_stops_at_the_cache_end() {
        let mut state = AppState::new();
        reducer(&mut state, Action::Init);
        reducer(
            &mut state,
            Action::CatalogPageDidLoad {
                generation: 1,
                records: records(50),
                total: 50,
            },
        );
        assert_eq!(state.catalog_pager.cursor, 20);

        let result = reducer(&mut state, Action::ScrollNearBottom);
        assert!(result.changed);
        assert_eq!(state.catalog_pager.cursor, 40);

        // only ten remain, so the step is exactly the remainder
        reducer(&mut state, Action::ScrollNearBottom);
        assert_eq!(state.catalog_pager.cursor, 50);

        let result = reducer(&mut state, Action::ScrollNearBottom);
        assert!(!result.changed);
        assert_eq!(state.catalog_pager.cursor, 50);
    }

    #[test]
    fn selection_past_the_revealed_end_pulls_the_next_batch() {
        let mut state = loaded_state(50);
        state.selected = 19;
        let result = reducer(&mut state, Action::SelectionMove(4));
        assert!(result.changed);
        assert_eq!(state.catalog_pager.cursor, 40);
        assert_eq!(state.selected, 23);
    }

    #[test]
    fn catch_appends_and_saves_once() {
        let mut state = loaded_state(2);
        let result = reducer(&mut state, Action::Catch(0));
        assert!(result.changed);
        assert_eq!(state.caught.len(), 1);
        assert_eq!(state.caught[0].name, "Pokemon-0");
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(result.effects[0], Effect::SaveCaught { .. }));
    }

    #[test]
    fn duplicate_catch_signals_and_leaves_the_store_alone() {
        let mut state = loaded_state(2);
        reducer(&mut state, Action::Catch(0));
        let result = reducer(&mut state, Action::Catch(0));
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert_eq!(state.caught.len(), 1);
        assert_eq!(
            state.message.as_deref(),
            Some("Pokemon-0 is already caught")
        );
    }

    #[test]
    fn catch_out_of_range_is_a_noop() {
        let mut state = loaded_state(2);
        let result = reducer(&mut state, Action::Catch(7));
        assert!(!result.changed);
        assert!(state.caught.is_empty());
    }

    #[test]
    fn release_removes_and_saves_but_ignores_bad_indices() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::Catch(0));
        reducer(&mut state, Action::Catch(1));

        let result = reducer(&mut state, Action::Release(5));
        assert!(!result.changed);
        assert_eq!(state.caught.len(), 2);

        let result = reducer(&mut state, Action::Release(0));
        assert!(result.changed);
        assert_eq!(state.caught.len(), 1);
        assert_eq!(state.caught[0].name, "Pokemon-1");
        assert!(matches!(result.effects[0], Effect::SaveCaught { .. }));
    }

    #[test]
    fn clear_caught_empties_and_purges_only_the_store() {
        let mut state = loaded_state(2);
        reducer(&mut state, Action::Catch(0));
        let result = reducer(&mut state, Action::ClearCaught);
        assert!(result.changed);
        assert!(state.caught.is_empty());
        assert_eq!(result.effects, vec![Effect::ClearCaughtStorage]);
    }

    #[test]
    fn search_needs_two_characters() {
        let mut state = loaded_state(5);
        reducer(&mut state, Action::SearchStart);
        reducer(&mut state, Action::SearchInput('p'));
        assert!(state.search_results.is_empty());
        reducer(&mut state, Action::SearchInput('o'));
        assert_eq!(state.search_results.len(), 5);
        reducer(&mut state, Action::SearchBackspace);
        assert!(state.search_results.is_empty());
    }

    #[test]
    fn search_cancel_clears_query_and_results() {
        let mut state = loaded_state(5);
        reducer(&mut state, Action::SearchStart);
        reducer(&mut state, Action::SearchInput('p'));
        reducer(&mut state, Action::SearchInput('o'));
        let result = reducer(&mut state, Action::SearchCancel);
        assert!(result.changed);
        assert!(!state.search.active);
        assert!(state.search.query.is_empty());
        assert!(state.search_results.is_empty());
    }

    #[test]
    fn popup_navigation_clamps_at_both_ends() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::PopupOpen(0));
        let result = reducer(&mut state, Action::PopupPrev);
        assert!(!result.changed);
        assert_eq!(state.popup.as_ref().map(|p| p.index), Some(0));

        reducer(&mut state, Action::PopupNext);
        reducer(&mut state, Action::PopupNext);
        let result = reducer(&mut state, Action::PopupNext);
        assert!(!result.changed);
        assert_eq!(state.popup.as_ref().map(|p| p.index), Some(2));
    }

    #[test]
    fn popup_tab_resets_to_stats_on_navigation() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::PopupOpen(0));
        reducer(&mut state, Action::PopupTabToggle);
        assert_eq!(state.popup.as_ref().map(|p| p.tab), Some(PopupTab::About));
        reducer(&mut state, Action::PopupNext);
        assert_eq!(state.popup.as_ref().map(|p| p.tab), Some(PopupTab::Stats));
    }

    #[test]
    fn entering_a_region_resets_its_cache_and_bumps_the_generation() {
        let mut state = loaded_state(20);
        state.regions = vec![RegionInfo {
            name: "kanto".to_string(),
            label: "Kanto".to_string(),
        }];
        let result = reducer(&mut state, Action::ViewNext);
        assert!(result.changed);
        assert_eq!(state.view, 1);
        assert_eq!(state.region_phase, LoadPhase::InitialLoading);
        assert_eq!(
            result.effects,
            vec![Effect::LoadRegionSpecies {
                generation: 1,
                region: "kanto".to_string(),
            }]
        );

        // wrapping back to the catalog keeps it warm
        let result = reducer(&mut state, Action::ViewNext);
        assert!(result.changed);
        assert_eq!(state.view, 0);
        assert!(result.effects.is_empty());
        assert_eq!(state.catalog.len(), 20);
    }

    #[test]
    fn region_species_fan_out_in_windows() {
        let mut state = AppState::new();
        state.regions = vec![RegionInfo {
            name: "kanto".to_string(),
            label: "Kanto".to_string(),
        }];
        reducer(&mut state, Action::ViewNext);
        let species: Vec<SpeciesRef> = (0..30)
            .map(|i| SpeciesRef {
                name: format!("species-{i}"),
                url: format!("https://pokeapi.co/api/v2/pokemon-species/{}/", i + 1),
            })
            .collect();
        let result = reducer(
            &mut state,
            Action::RegionSpeciesDidLoad {
                generation: 1,
                species,
            },
        );
        assert_eq!(result.effects.len(), 1);
        let Effect::LoadRegionPage { generation, refs } = &result.effects[0] else {
            panic!("expected a region page load");
        };
        assert_eq!(*generation, 1);
        assert_eq!(refs.len(), 20);

        let result = reducer(
            &mut state,
            Action::RegionPageDidLoad {
                generation: 1,
                records: records(20),
            },
        );
        assert_eq!(state.region_pager.cursor, 20);
        let Effect::LoadRegionPage { refs, .. } = &result.effects[0] else {
            panic!("expected the next window");
        };
        assert_eq!(refs.len(), 10);
        assert_eq!(refs[0].name, "species-20");

        let result = reducer(
            &mut state,
            Action::RegionPageDidLoad {
                generation: 1,
                records: records(10),
            },
        );
        assert!(result.effects.is_empty());
        assert_eq!(state.region_phase, LoadPhase::Idle);
        assert_eq!(state.region_cache.len(), 30);
    }

    #[test]
    fn message_decays_after_its_ticks_run_out() {
        let mut state = AppState::new();
        state.set_message("hello");
        for _ in 0..crate::state::MESSAGE_TICKS {
            reducer(&mut state, Action::Tick);
        }
        assert_eq!(state.message, None);
    }
}
