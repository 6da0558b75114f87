//! Sports-match catalog backing the wager settlement.
//!
//! Matches are fixtures: seeded once at startup and read-only afterwards.
//! Odds are display/payout multipliers per side — they do not bias the
//! winner draw.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// One fixture match offered for betting.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SportsMatch {
    /// Stable match identifier.
    pub id: String,
    /// The two sides; winners are drawn uniformly between them.
    pub teams: [String; 2],
    /// Sport label.
    pub sport: String,
    /// Scheduled start time.
    pub match_time: DateTime<Utc>,
    /// Venue label.
    pub stadium: String,
    /// Payout multiplier per side, keyed by team name.
    pub odds: HashMap<String, f64>,
    /// Listing status, e.g. `"upcoming"`.
    pub status: String,
    /// Short description for the listing page.
    pub description: String,
}

impl SportsMatch {
    /// Returns the payout multiplier for a side, if it is one of the
    /// match's two teams.
    #[must_use]
    pub fn odds_for(&self, side: &str) -> Option<f64> {
        self.odds.get(side).copied()
    }

    /// Returns `true` if `side` names one of the match's teams.
    #[must_use]
    pub fn has_side(&self, side: &str) -> bool {
        self.teams.iter().any(|t| t == side)
    }
}

/// Read-only catalog of fixture matches.
#[derive(Debug)]
pub struct MatchBook {
    matches: Vec<SportsMatch>,
}

impl MatchBook {
    /// Builds a catalog from the given matches.
    #[must_use]
    pub fn new(matches: Vec<SportsMatch>) -> Self {
        Self { matches }
    }

    /// The default fixture set served by the portal.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let base = Utc::now();
        Self::new(vec![
            fixture(
                "nba-lakers-celtics",
                "Lakers",
                "Celtics",
                "Basketball",
                base + Duration::hours(6),
                "Crypto.com Arena",
                2.0,
                1.5,
                "Western and Eastern conference leaders meet.",
            ),
            fixture(
                "nfl-chiefs-bills",
                "Chiefs",
                "Bills",
                "Football",
                base + Duration::hours(26),
                "Arrowhead Stadium",
                1.8,
                2.1,
                "Divisional rivalry under the lights.",
            ),
            fixture(
                "mlb-yankees-dodgers",
                "Yankees",
                "Dodgers",
                "Baseball",
                base + Duration::hours(50),
                "Yankee Stadium",
                2.2,
                1.6,
                "Coast-to-coast classic.",
            ),
            fixture(
                "mls-galaxy-inter",
                "Galaxy",
                "Inter Miami",
                "Soccer",
                base + Duration::hours(74),
                "Dignity Health Sports Park",
                2.5,
                1.4,
                "League cup rematch.",
            ),
        ])
    }

    /// Looks up a match by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SportsMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// All matches, listing order.
    #[must_use]
    pub fn list(&self) -> &[SportsMatch] {
        &self.matches
    }
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: &str,
    team_a: &str,
    team_b: &str,
    sport: &str,
    match_time: DateTime<Utc>,
    stadium: &str,
    odds_a: f64,
    odds_b: f64,
    description: &str,
) -> SportsMatch {
    let mut odds = HashMap::new();
    odds.insert(team_a.to_string(), odds_a);
    odds.insert(team_b.to_string(), odds_b);
    SportsMatch {
        id: id.to_string(),
        teams: [team_a.to_string(), team_b.to_string()],
        sport: sport.to_string(),
        match_time,
        stadium: stadium.to_string(),
        odds,
        status: "upcoming".to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_have_odds_for_both_sides() {
        let book = MatchBook::with_fixtures();
        assert!(!book.list().is_empty());
        for m in book.list() {
            for team in &m.teams {
                assert!(m.odds_for(team).is_some());
            }
        }
    }

    #[test]
    fn get_finds_by_id() {
        let book = MatchBook::with_fixtures();
        let Some(m) = book.get("nba-lakers-celtics") else {
            panic!("expected fixture");
        };
        assert!(m.has_side("Lakers"));
        assert!(m.has_side("Celtics"));
        assert!(!m.has_side("Knicks"));

        assert!(book.get("missing").is_none());
    }
}
