//! Episode records and the acquisition boundary.

pub mod wikipedia;

use serde::{Deserialize, Serialize};

/// One raw episode record: season, position within the season, synopsis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub season: u32,
    pub episode_in_season: u32,
    /// Synopsis text, when the source page carries one.
    pub synopsis: Option<String>,
}

impl Episode {
    /// Compact episode tag, e.g. `S1E01`. Stamped onto every relationship
    /// extracted from this episode's synopsis.
    pub fn number(&self) -> String {
        format!("S{}E{:02}", self.season, self.episode_in_season)
    }
}

/// Source of raw episode records for a run.
#[allow(async_fn_in_trait)]
pub trait EpisodeSource {
    /// Fetch every episode this source knows about, in airing order.
    async fn fetch(&self) -> crate::Result<Vec<Episode>>;
}
