//! Raw upstream payloads, as delivered by the API or saved to a data file.

use crate::utils::error::{ElexError, Result};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a payload into its typed form, reporting the JSON path of the
/// first value that does not fit.
pub fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_path_to_error::deserialize::<_, T>(payload).map_err(|e| {
        let path = e.path().to_string();
        ElexError::MalformedRecord {
            path,
            message: e.into_inner().to_string(),
        }
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionFeed {
    pub election_date: Option<String>,
    pub timestamp: Option<String>,
    #[serde(default)]
    pub races: Vec<RawRace>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRace {
    #[serde(rename = "raceID")]
    pub race_id: String,
    pub race_type: Option<String>,
    #[serde(rename = "raceTypeID")]
    pub race_type_id: Option<String>,
    #[serde(rename = "officeID")]
    pub office_id: Option<String>,
    pub office_name: Option<String>,
    pub party: Option<String>,
    pub seat_name: Option<String>,
    pub seat_num: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub test: bool,
    #[serde(default)]
    pub national: bool,
    #[serde(default)]
    pub uncontested: bool,
    #[serde(default)]
    pub initialization_data: bool,
    pub last_updated: Option<String>,
    #[serde(default)]
    pub reporting_units: Vec<RawReportingUnit>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReportingUnit {
    pub state_postal: Option<String>,
    pub state_name: Option<String>,
    #[serde(default = "default_level")]
    pub level: String,
    pub last_updated: Option<String>,
    #[serde(rename = "reportingunitID")]
    pub reporting_unit_id: Option<String>,
    #[serde(rename = "reportingunitName")]
    pub reporting_unit_name: Option<String>,
    pub fips_code: Option<String>,
    #[serde(default)]
    pub precincts_reporting: i64,
    #[serde(default)]
    pub precincts_total: i64,
    #[serde(default)]
    pub precincts_reporting_pct: f64,
    #[serde(default)]
    pub candidates: Vec<RawCandidate>,
}

fn default_level() -> String {
    "state".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    pub first: Option<String>,
    pub last: Option<String>,
    pub party: Option<String>,
    #[serde(rename = "candidateID")]
    pub candidate_id: Option<String>,
    #[serde(rename = "polID")]
    pub pol_id: Option<String>,
    pub pol_num: Option<String>,
    #[serde(default)]
    pub ballot_order: i64,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub incumbent: bool,
    /// `X` marks the winner, `R` a runoff advance.
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarFeed {
    #[serde(default)]
    pub elections: Vec<RawElection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawElection {
    pub election_date: String,
    #[serde(default)]
    pub live_results: bool,
    #[serde(default)]
    pub test_results: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegateSumFeed {
    #[serde(rename = "delSum")]
    pub del_sum: DelegateSum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegateSum {
    #[serde(default)]
    pub del: Vec<SumParty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SumParty {
    #[serde(rename = "pId")]
    pub party: String,
    #[serde(rename = "dVotes", deserialize_with = "count")]
    pub votes: i64,
    #[serde(rename = "dNeed", deserialize_with = "count")]
    pub need: i64,
    #[serde(rename = "Cand", default)]
    pub candidates: Vec<SumCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SumCandidate {
    #[serde(rename = "cId")]
    pub candidate_id: String,
    #[serde(rename = "cName")]
    pub name: Option<String>,
    #[serde(rename = "dTot", deserialize_with = "count")]
    pub total: i64,
    #[serde(deserialize_with = "count")]
    pub d1: i64,
    #[serde(deserialize_with = "count")]
    pub d7: i64,
    #[serde(deserialize_with = "count")]
    pub d30: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegateSuperFeed {
    #[serde(rename = "delSuper")]
    pub del_super: DelegateSuper,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegateSuper {
    #[serde(default)]
    pub del: Vec<SuperParty>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuperParty {
    #[serde(rename = "pId")]
    pub party: String,
    #[serde(rename = "dVotes", deserialize_with = "count")]
    pub votes: i64,
    #[serde(rename = "dNeed", deserialize_with = "count")]
    pub need: i64,
    #[serde(rename = "State", default)]
    pub states: Vec<SuperState>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuperState {
    #[serde(rename = "sId")]
    pub state: String,
    #[serde(rename = "Cand", default)]
    pub candidates: Vec<SuperCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuperCandidate {
    #[serde(rename = "cId")]
    pub candidate_id: String,
    #[serde(rename = "cName")]
    pub name: Option<String>,
    #[serde(rename = "dTot", deserialize_with = "count")]
    pub total: i64,
    #[serde(rename = "sdTot", deserialize_with = "count")]
    pub super_total: i64,
}

/// Delegate reports encode counts either as numbers or as numeric strings.
fn count<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a delegate count, found {text:?}"))),
    }
}
