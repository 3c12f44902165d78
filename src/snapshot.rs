//! In-memory copy of the stats feed
//!
//! Built once during startup and shared read-only with every request handler.

use crate::models::{FeedResponse, RegionalRecord, SummaryRecord};

#[derive(Debug, Clone)]
pub struct Snapshot {
    feed: FeedResponse,
}

impl Snapshot {
    pub fn new(feed: FeedResponse) -> Self {
        Self { feed }
    }

    pub fn summary(&self) -> &SummaryRecord {
        &self.feed.data.summary
    }

    pub fn regional(&self) -> &[RegionalRecord] {
        &self.feed.data.regional
    }

    /// The upstream envelope, as written to the document store
    pub fn document(&self) -> &FeedResponse {
        &self.feed
    }

    /// First region whose name equals `loc` exactly (case-sensitive, no trimming).
    pub fn find_region(&self, loc: &str) -> Option<&RegionalRecord> {
        self.feed.data.regional.iter().find(|r| r.loc == loc)
    }
}

#[cfg(test)]
pub(crate) fn sample_feed() -> FeedResponse {
    use crate::models::FeedData;

    let region = |loc: &str, total: u64| RegionalRecord {
        loc: loc.to_string(),
        confirmed_cases_indian: total,
        confirmed_cases_foreign: 0,
        discharged: 0,
        deaths: 0,
        total_confirmed: total,
    };

    FeedResponse {
        success: true,
        data: FeedData {
            summary: SummaryRecord {
                total: 10,
                confirmed_cases_indian: 10,
                confirmed_cases_foreign: 0,
                discharged: 0,
                deaths: 0,
                confirmed_but_location_unidentified: 0,
            },
            regional: vec![region("Kerala", 3), region("Delhi", 7)],
        },
        last_refreshed: "2020-04-01T10:00:00.000Z".to_string(),
        last_origin_update: "2020-04-01T02:30:00.000Z".to_string(),
    }
}
