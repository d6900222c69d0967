use crate::catalog::CatalogQuery;
use crate::quiz::Generation;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadListing {
        request: u64,
        query: CatalogQuery,
        page: u32,
    },
    LoadTypes,
    LoadSuggestions { query: String },
    LoadProfile { name: String },
    DrawRound {
        seq: u64,
        generation: Option<Generation>,
    },
}
