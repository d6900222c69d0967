use serde::{Deserialize, Serialize};

/// Creatures per catalog page.
pub const PAGE_SIZE: u32 = 20;

/// Total reported for the full listing when upstream omits `count`.
pub const DEFAULT_TOTAL_COUNT: u32 = 1302;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub image: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base_stat: u32,
    pub effort: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSet {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_default: Option<String>,
    pub back_shiny: Option<String>,
    pub official_artwork: Option<String>,
}

/// Everything the detail screen shows for one creature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureProfile {
    pub creature: Creature,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub base_experience: Option<u32>,
    pub abilities: Vec<Ability>,
    pub stats: Vec<Stat>,
    pub sprites: SpriteSet,
    pub description: String,
    pub genus: String,
    pub capture_rate: Option<u32>,
    pub growth_rate: Option<String>,
    pub habitat: String,
    pub generation: Option<String>,
}

/// Uniform envelope returned by every catalog query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, current_page: u32, total_count: u32) -> Self {
        Self {
            items,
            current_page,
            total_pages: total_pages(total_count),
            total_count,
        }
    }

    /// "Found nothing", as opposed to an empty page past the end of a result set.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_pages: 0,
            total_count: 0,
        }
    }

    pub fn single(item: T) -> Self {
        Self {
            items: vec![item],
            current_page: 1,
            total_pages: 1,
            total_count: 1,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

pub fn total_pages(total_count: u32) -> u32 {
    total_count.div_ceil(PAGE_SIZE)
}

/// Index range of `page` within a result set of `len` items.
pub fn page_bounds(page: u32, len: usize) -> std::ops::Range<usize> {
    let size = PAGE_SIZE as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub image: String,
}
