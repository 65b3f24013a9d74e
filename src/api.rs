use std::sync::{Arc, OnceLock};

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::state::{CatalogPage, PokemonData, PokemonRecord, PokemonStat, RegionInfo, SpeciesRef};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const DETAIL_CONCURRENCY: usize = 12;

/// Pokedexes offered in the region picker, in display order. The picker
/// only lists the ones the remote listing actually reports.
const REGION_DEXES: [(&str, &str); 9] = [
    ("kanto", "Kanto"),
    ("original-johto", "Johto"),
    ("hoenn", "Hoenn"),
    ("original-sinnoh", "Sinnoh"),
    ("original-unova", "Unova"),
    ("kalos-central", "Kalos"),
    ("original-alola", "Alola"),
    ("galar", "Galar"),
    ("paldea", "Paldea"),
];

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    count: usize,
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokedexResponse {
    pokemon_entries: Vec<PokedexEntryResponse>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokedexEntryResponse {
    entry_number: u16,
    pokemon_species: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesIdResponse {
    id: u16,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    species: NamedResource,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

/// One listing page plus every entry's detail, fetched as a joint batch.
/// Records come back in listing order; any failed fetch fails the page.
pub async fn fetch_catalog_page(offset: usize, limit: usize) -> Result<CatalogPage, String> {
    let url = format!("{API_BASE}/pokemon?offset={offset}&limit={limit}");
    let listing: ListResponse = fetch_json(&url).await?;
    let total = listing.count;
    let urls: Vec<String> = listing
        .results
        .into_iter()
        .map(|entry| entry.url)
        .collect();
    let records = fetch_detail_batch(urls).await?;
    Ok(CatalogPage { records, total })
}

pub async fn fetch_pokemon_detail(url: &str) -> Result<PokemonRecord, String> {
    let response: PokemonResponse = fetch_json(url).await?;
    Ok(map_record(response))
}

pub async fn fetch_regions() -> Result<Vec<RegionInfo>, String> {
    let url = format!("{API_BASE}/pokedex?limit=200");
    let listing: ListResponse = fetch_json(&url).await?;
    let regions = REGION_DEXES
        .iter()
        .filter(|(name, _)| listing.results.iter().any(|entry| entry.name == *name))
        .map(|(name, label)| RegionInfo {
            name: name.to_string(),
            label: label.to_string(),
        })
        .collect();
    Ok(regions)
}

/// Species entries of one pokedex, in entry-number order.
pub async fn fetch_region_species(region: &str) -> Result<Vec<SpeciesRef>, String> {
    let url = format!("{API_BASE}/pokedex/{region}");
    let response: PokedexResponse = fetch_json(&url).await?;
    let mut entries = response.pokemon_entries;
    entries.sort_by_key(|entry| entry.entry_number);
    Ok(entries
        .into_iter()
        .map(|entry| SpeciesRef {
            name: entry.pokemon_species.name,
            url: entry.pokemon_species.url,
        })
        .collect())
}

/// Resolve a window of species refs to full records: species url gives the
/// numeric id, the id gives the detail. Same joint-batch policy as the
/// catalog page.
pub async fn fetch_region_page(refs: Vec<SpeciesRef>) -> Result<Vec<PokemonRecord>, String> {
    if refs.is_empty() {
        return Ok(Vec::new());
    }
    let count = refs.len();
    let semaphore = Arc::new(Semaphore::new(DETAIL_CONCURRENCY));
    let mut join_set = JoinSet::new();
    for (index, species) in refs.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| "Region batch semaphore closed".to_string())?;
            let resolved: SpeciesIdResponse = fetch_json(&species.url).await?;
            let url = format!("{API_BASE}/pokemon/{}", resolved.id);
            let record = fetch_pokemon_detail(&url).await?;
            Ok::<(usize, PokemonRecord), String>((index, record))
        });
    }
    collect_ordered(join_set, count).await
}

async fn fetch_detail_batch(urls: Vec<String>) -> Result<Vec<PokemonRecord>, String> {
    if urls.is_empty() {
        return Ok(Vec::new());
    }
    let count = urls.len();
    let semaphore = Arc::new(Semaphore::new(DETAIL_CONCURRENCY));
    let mut join_set = JoinSet::new();
    for (index, url) in urls.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| "Detail batch semaphore closed".to_string())?;
            let record = fetch_pokemon_detail(&url).await?;
            Ok::<(usize, PokemonRecord), String>((index, record))
        });
    }
    collect_ordered(join_set, count).await
}

async fn collect_ordered(
    mut join_set: JoinSet<Result<(usize, PokemonRecord), String>>,
    count: usize,
) -> Result<Vec<PokemonRecord>, String> {
    let mut indexed = Vec::with_capacity(count);
    while let Some(result) = join_set.join_next().await {
        let entry = result.map_err(|err| err.to_string())??;
        indexed.push(entry);
    }
    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, record)| record).collect())
}

fn map_record(response: PokemonResponse) -> PokemonRecord {
    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();
    let artwork_url = pointer_string(&response.sprites, "/other/official-artwork/front_default");
    let sprite_url = pointer_string(&response.sprites, "/other/dream_world/front_default");

    PokemonRecord {
        name: response.name,
        data: PokemonData {
            id: response.id,
            types,
            species: response.species.name,
            height: response.height,
            weight: response.weight,
            stats,
            artwork_url,
            sprite_url,
        },
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let client = http_client();
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    response.json::<T>().await.map_err(|err| err.to_string())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
