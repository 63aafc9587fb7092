use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One competitive match as reported by the match history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    /// Game path of the map, see [`crate::collection::AssetCollection::map_for_path`].
    pub map_id: String,
    pub start_time: DateTime<Utc>,
    pub tier_before: u32,
    pub tier_after: u32,
    pub ranked_rating_before: u32,
    pub ranked_rating_after: u32,
    pub ranked_rating_earned: i32,
    pub performance_bonus: i32,
    pub afk_penalty: i32,
}

impl Match {
    pub fn is_promotion(&self) -> bool {
        self.tier_after > self.tier_before
    }

    pub fn is_demotion(&self) -> bool {
        self.tier_after < self.tier_before
    }
}

/// Locally persisted match history for one user, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchList {
    pub user_id: String,
    pub matches: Vec<Match>,
    /// Lower bound on matches known to exist between stored entries that
    /// were never fetched.
    pub min_missed_matches: u32,
}

impl MatchList {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn newest(&self) -> Option<&Match> {
        self.matches.first()
    }

    /// Merges a freshly fetched newest-first window into the stored list.
    ///
    /// Returns the number of matches that were not known before.
    pub fn merge(&mut self, user_id: &str, page: Vec<Match>) -> usize {
        if self.user_id != user_id {
            *self = MatchList {
                user_id: user_id.to_string(),
                matches: page,
                min_missed_matches: 0,
            };
            return self.matches.len();
        }

        if page.is_empty() {
            return 0;
        }

        let overlap = page
            .iter()
            .position(|new| self.matches.iter().any(|old| old.id == new.id));

        let fresh: Vec<Match> = match overlap {
            Some(index) => page.into_iter().take(index).collect(),
            None => {
                if !self.matches.is_empty() {
                    // The page does not reach back to anything stored, so at
                    // least one match in between was never seen.
                    self.min_missed_matches += 1;
                }
                page
            }
        };

        let added = fresh.len();
        self.matches.splice(0..0, fresh);
        added
    }
}
