//! Flattening an election feed into races, reporting units, candidates and
//! per-candidate results.

use crate::domain::feed::{ElectionFeed, RawCandidate, RawRace, RawReportingUnit};
use crate::domain::model::{
    BallotMeasure, Candidate, CandidateReportingUnit, Race, ReportingUnit, ResultRow,
};
use std::collections::{HashMap, HashSet};

/// Office id the feed uses for ballot measures.
const BALLOT_MEASURE_OFFICE: &str = "I";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ResultsLevel {
    /// Every reporting unit.
    #[default]
    Ru,
    /// Statewide reporting units only.
    State,
}

/// Filters and adjustments applied while flattening a feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultOptions {
    /// Keep only these races; empty keeps all.
    pub race_ids: Vec<String>,
    /// `Some(true)` keeps national races, `Some(false)` local ones.
    pub national: Option<bool>,
    pub level: ResultsLevel,
    pub set_zero_counts: bool,
}

impl ResultOptions {
    fn keeps_race(&self, race: &RawRace) -> bool {
        let listed = self.race_ids.is_empty() || self.race_ids.iter().any(|id| *id == race.race_id);
        let scope = self.national.map_or(true, |national| race.national == national);
        listed && scope
    }

    fn keeps_unit(&self, unit: &RawReportingUnit) -> bool {
        match self.level {
            ResultsLevel::Ru => true,
            ResultsLevel::State => unit.level == "state",
        }
    }
}

/// Every record type an election feed yields, in feed order.
#[derive(Debug, Clone, Default)]
pub struct ElectionResults {
    pub races: Vec<Race>,
    pub reporting_units: Vec<ReportingUnit>,
    pub candidates: Vec<Candidate>,
    pub candidate_reporting_units: Vec<CandidateReportingUnit>,
    pub results: Vec<ResultRow>,
    pub ballot_measures: Vec<BallotMeasure>,
}

impl ElectionResults {
    pub fn from_feed(feed: ElectionFeed, fallback_date: &str, options: &ResultOptions) -> Self {
        let electiondate = feed
            .election_date
            .clone()
            .unwrap_or_else(|| fallback_date.to_string());
        tracing::debug!(
            "Flattening {} races for {} (feed timestamp: {:?})",
            feed.races.len(),
            electiondate,
            feed.timestamp
        );

        let mut results = ElectionResults::default();
        let mut seen_candidates = HashSet::new();

        for race in feed.races.iter().filter(|race| options.keeps_race(race)) {
            results.races.push(build_race(race, &electiondate));

            if race.office_id.as_deref() == Some(BALLOT_MEASURE_OFFICE) {
                results
                    .ballot_measures
                    .extend(build_ballot_measures(race, &electiondate));
            }

            let mut per_level: HashMap<&str, usize> = HashMap::new();
            for unit in &race.reporting_units {
                // Counted before filtering so a unit keeps its id at every level.
                let position = per_level.entry(unit.level.as_str()).or_default();
                *position += 1;
                if !options.keeps_unit(unit) {
                    continue;
                }

                let tally = UnitTally::new(unit, *position, options.set_zero_counts);
                results
                    .reporting_units
                    .push(build_reporting_unit(race, unit, &tally, &electiondate));

                for candidate in &unit.candidates {
                    let key = candidate_key(candidate);
                    if seen_candidates.insert(key.clone()) {
                        results.candidates.push(build_candidate(candidate, &key));
                    }

                    let outcome = tally.outcome(candidate);
                    results.candidate_reporting_units.push(build_candidate_reporting_unit(
                        race, &tally, candidate, &key, &outcome,
                    ));
                    results.results.push(build_result(
                        race,
                        unit,
                        &tally,
                        candidate,
                        &key,
                        &outcome,
                        &electiondate,
                    ));
                }
            }
        }

        results
    }
}

/// Stable identity of a candidate across races and reporting units.
pub fn candidate_key(candidate: &RawCandidate) -> String {
    if let Some(pol_id) = &candidate.pol_id {
        format!("polid-{pol_id}")
    } else if let Some(pol_num) = &candidate.pol_num {
        format!("polnum-{pol_num}")
    } else if let Some(candidate_id) = &candidate.candidate_id {
        format!("candidate-{candidate_id}")
    } else {
        format!("candidate-ballot-{}", candidate.ballot_order)
    }
}

/// Units without an upstream id are numbered by their position among the
/// race's units of the same level, starting at 1.
fn reporting_unit_id(unit: &RawReportingUnit, position: usize) -> String {
    unit.reporting_unit_id
        .clone()
        .unwrap_or_else(|| format!("{}-{}", unit.level, position))
}

/// Vote share rounded to six decimal places.
fn vote_share(votes: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (votes as f64 / total as f64 * 1_000_000.0).round() / 1_000_000.0
}

struct UnitTally {
    reporting_unit_id: String,
    total_votes: i64,
    precincts_reporting: i64,
    precincts_reporting_pct: f64,
    zeroed: bool,
}

struct Outcome {
    votecount: i64,
    votepct: f64,
    winner: bool,
    runoff: bool,
}

impl UnitTally {
    fn new(unit: &RawReportingUnit, position: usize, zeroed: bool) -> Self {
        let (total_votes, precincts_reporting, precincts_reporting_pct) = if zeroed {
            (0, 0, 0.0)
        } else {
            (
                unit.candidates.iter().map(|c| c.vote_count).sum(),
                unit.precincts_reporting,
                unit.precincts_reporting_pct,
            )
        };

        Self {
            reporting_unit_id: reporting_unit_id(unit, position),
            total_votes,
            precincts_reporting,
            precincts_reporting_pct,
            zeroed,
        }
    }

    fn outcome(&self, candidate: &RawCandidate) -> Outcome {
        if self.zeroed {
            return Outcome {
                votecount: 0,
                votepct: 0.0,
                winner: false,
                runoff: false,
            };
        }

        let flag = candidate.winner.as_deref().map(str::trim);
        Outcome {
            votecount: candidate.vote_count,
            votepct: vote_share(candidate.vote_count, self.total_votes),
            winner: flag == Some("X"),
            runoff: flag == Some("R"),
        }
    }
}

fn build_race(race: &RawRace, electiondate: &str) -> Race {
    let first_unit = race.reporting_units.first();
    Race {
        id: race.race_id.clone(),
        raceid: race.race_id.clone(),
        racetype: race.race_type.clone(),
        racetypeid: race.race_type_id.clone(),
        description: race.description.clone(),
        electiondate: electiondate.to_string(),
        initialization_data: race.initialization_data,
        is_ballot_measure: race.office_id.as_deref() == Some(BALLOT_MEASURE_OFFICE),
        lastupdated: race.last_updated.clone(),
        national: race.national,
        officeid: race.office_id.clone(),
        officename: race.office_name.clone(),
        party: race.party.clone(),
        seatname: race.seat_name.clone(),
        seatnum: race.seat_num.clone(),
        statename: first_unit.and_then(|u| u.state_name.clone()),
        statepostal: first_unit.and_then(|u| u.state_postal.clone()),
        test: race.test,
        uncontested: race.uncontested,
    }
}

fn build_reporting_unit(
    race: &RawRace,
    unit: &RawReportingUnit,
    tally: &UnitTally,
    electiondate: &str,
) -> ReportingUnit {
    ReportingUnit {
        id: format!("{}-{}", race.race_id, tally.reporting_unit_id),
        reportingunitid: tally.reporting_unit_id.clone(),
        reportingunitname: unit.reporting_unit_name.clone(),
        description: race.description.clone(),
        electiondate: electiondate.to_string(),
        fipscode: unit.fips_code.clone(),
        initialization_data: race.initialization_data,
        lastupdated: unit.last_updated.clone(),
        level: unit.level.clone(),
        national: race.national,
        officeid: race.office_id.clone(),
        officename: race.office_name.clone(),
        precinctsreporting: tally.precincts_reporting,
        precinctsreportingpct: tally.precincts_reporting_pct,
        precinctstotal: unit.precincts_total,
        raceid: race.race_id.clone(),
        racetype: race.race_type.clone(),
        racetypeid: race.race_type_id.clone(),
        seatname: race.seat_name.clone(),
        seatnum: race.seat_num.clone(),
        statename: unit.state_name.clone(),
        statepostal: unit.state_postal.clone(),
        test: race.test,
        uncontested: race.uncontested,
        votecount: tally.total_votes,
    }
}

fn build_candidate(candidate: &RawCandidate, key: &str) -> Candidate {
    Candidate {
        id: key.to_string(),
        candidateid: candidate.candidate_id.clone(),
        ballotorder: candidate.ballot_order,
        first: candidate.first.clone(),
        last: candidate.last.clone(),
        party: candidate.party.clone(),
        polid: candidate.pol_id.clone(),
        polnum: candidate.pol_num.clone(),
    }
}

fn build_candidate_reporting_unit(
    race: &RawRace,
    tally: &UnitTally,
    candidate: &RawCandidate,
    key: &str,
    outcome: &Outcome,
) -> CandidateReportingUnit {
    CandidateReportingUnit {
        id: format!("{}-{}-{}", race.race_id, key, tally.reporting_unit_id),
        raceid: race.race_id.clone(),
        reportingunitid: tally.reporting_unit_id.clone(),
        candidateid: candidate.candidate_id.clone(),
        polid: candidate.pol_id.clone(),
        polnum: candidate.pol_num.clone(),
        first: candidate.first.clone(),
        last: candidate.last.clone(),
        party: candidate.party.clone(),
        ballotorder: candidate.ballot_order,
        incumbent: candidate.incumbent,
        votecount: outcome.votecount,
        votepct: outcome.votepct,
        winner: outcome.winner,
        runoff: outcome.runoff,
    }
}

fn build_result(
    race: &RawRace,
    unit: &RawReportingUnit,
    tally: &UnitTally,
    candidate: &RawCandidate,
    key: &str,
    outcome: &Outcome,
    electiondate: &str,
) -> ResultRow {
    ResultRow {
        id: format!("{}-{}-{}", race.race_id, key, tally.reporting_unit_id),
        raceid: race.race_id.clone(),
        racetype: race.race_type.clone(),
        racetypeid: race.race_type_id.clone(),
        ballotorder: candidate.ballot_order,
        candidateid: candidate.candidate_id.clone(),
        description: race.description.clone(),
        electiondate: electiondate.to_string(),
        fipscode: unit.fips_code.clone(),
        first: candidate.first.clone(),
        incumbent: candidate.incumbent,
        initialization_data: race.initialization_data,
        is_ballot_measure: race.office_id.as_deref() == Some(BALLOT_MEASURE_OFFICE),
        last: candidate.last.clone(),
        lastupdated: unit.last_updated.clone(),
        level: unit.level.clone(),
        national: race.national,
        officeid: race.office_id.clone(),
        officename: race.office_name.clone(),
        party: candidate.party.clone(),
        polid: candidate.pol_id.clone(),
        polnum: candidate.pol_num.clone(),
        precinctsreporting: tally.precincts_reporting,
        precinctsreportingpct: tally.precincts_reporting_pct,
        precinctstotal: unit.precincts_total,
        reportingunitid: tally.reporting_unit_id.clone(),
        reportingunitname: unit.reporting_unit_name.clone(),
        runoff: outcome.runoff,
        seatname: race.seat_name.clone(),
        seatnum: race.seat_num.clone(),
        statename: unit.state_name.clone(),
        statepostal: unit.state_postal.clone(),
        test: race.test,
        uncontested: race.uncontested,
        votecount: outcome.votecount,
        votepct: outcome.votepct,
        winner: outcome.winner,
    }
}

/// Ballot measure choices are read from the statewide unit.
fn build_ballot_measures(race: &RawRace, electiondate: &str) -> Vec<BallotMeasure> {
    let unit = race
        .reporting_units
        .iter()
        .find(|unit| unit.level == "state")
        .or_else(|| race.reporting_units.first());

    let Some(unit) = unit else {
        return Vec::new();
    };

    unit.candidates
        .iter()
        .map(|choice| BallotMeasure {
            id: format!(
                "{}-{}",
                race.race_id,
                choice.candidate_id.as_deref().unwrap_or("unknown")
            ),
            raceid: race.race_id.clone(),
            candidateid: choice.candidate_id.clone(),
            ballotorder: choice.ballot_order,
            description: race.description.clone(),
            electiondate: electiondate.to_string(),
            last: choice.last.clone(),
            polid: choice.pol_id.clone(),
            polnum: choice.pol_num.clone(),
            seatname: race.seat_name.clone(),
            statepostal: unit.state_postal.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::parse_payload;
    use serde_json::json;

    fn sample_feed() -> ElectionFeed {
        parse_payload(json!({
            "electionDate": "2015-11-03",
            "races": [
                {
                    "raceID": "18525",
                    "raceType": "General",
                    "raceTypeID": "G",
                    "officeID": "G",
                    "officeName": "Governor",
                    "national": true,
                    "reportingUnits": [
                        {
                            "statePostal": "KY",
                            "stateName": "Kentucky",
                            "level": "state",
                            "precinctsReporting": 3741,
                            "precinctsTotal": 3741,
                            "precinctsReportingPct": 100.0,
                            "candidates": [
                                {"first": "Matt", "last": "Bevin", "party": "GOP", "candidateID": "5266", "polID": "64189", "ballotOrder": 1, "voteCount": 600, "winner": "X"},
                                {"first": "Jack", "last": "Conway", "party": "Dem", "candidateID": "5267", "polID": "6413", "ballotOrder": 2, "voteCount": 400}
                            ]
                        },
                        {
                            "statePostal": "KY",
                            "level": "county",
                            "reportingunitID": "1024",
                            "reportingunitName": "Adair",
                            "fipsCode": "21001",
                            "candidates": [
                                {"first": "Matt", "last": "Bevin", "party": "GOP", "candidateID": "5266", "polID": "64189", "ballotOrder": 1, "voteCount": 2},
                                {"first": "Jack", "last": "Conway", "party": "Dem", "candidateID": "5267", "polID": "6413", "ballotOrder": 2, "voteCount": 1}
                            ]
                        }
                    ]
                },
                {
                    "raceID": "20978",
                    "officeID": "I",
                    "officeName": "Issue 3",
                    "seatName": "Legalize Marijuana",
                    "national": false,
                    "reportingUnits": [
                        {
                            "statePostal": "OH",
                            "level": "state",
                            "candidates": [
                                {"last": "Yes", "candidateID": "28650", "polNum": "31321", "ballotOrder": 1, "voteCount": 0},
                                {"last": "No", "candidateID": "28651", "polNum": "31322", "ballotOrder": 2, "voteCount": 0}
                            ]
                        }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_flatten_counts() {
        let results =
            ElectionResults::from_feed(sample_feed(), "2015-11-03", &ResultOptions::default());

        assert_eq!(results.races.len(), 2);
        assert_eq!(results.reporting_units.len(), 3);
        assert_eq!(results.candidates.len(), 4);
        assert_eq!(results.candidate_reporting_units.len(), 6);
        assert_eq!(results.results.len(), 6);
        assert_eq!(results.ballot_measures.len(), 2);
    }

    #[test]
    fn test_ids_and_vote_share() {
        let results =
            ElectionResults::from_feed(sample_feed(), "2015-11-03", &ResultOptions::default());

        let unit = &results.reporting_units[0];
        assert_eq!(unit.id, "18525-state-1");
        assert_eq!(unit.votecount, 1000);

        let bevin = &results.results[0];
        assert_eq!(bevin.id, "18525-polid-64189-state-1");
        assert_eq!(bevin.votepct, 0.6);
        assert!(bevin.winner);
        assert!(!results.results[1].winner);

        let adair = &results.candidate_reporting_units[2];
        assert_eq!(adair.reportingunitid, "1024");
        assert_eq!(adair.votepct, 0.666667);

        let no_votes = &results.results[5];
        assert_eq!(no_votes.votepct, 0.0);
        assert!(no_votes.is_ballot_measure);
    }

    #[test]
    fn test_candidates_are_unique_in_feed_order() {
        let results =
            ElectionResults::from_feed(sample_feed(), "2015-11-03", &ResultOptions::default());

        let ids: Vec<&str> = results.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["polid-64189", "polid-6413", "polnum-31321", "polnum-31322"]
        );
    }

    #[test]
    fn test_race_filters() {
        let options = ResultOptions {
            race_ids: vec!["20978".to_string()],
            ..ResultOptions::default()
        };
        let results = ElectionResults::from_feed(sample_feed(), "2015-11-03", &options);
        assert_eq!(results.races.len(), 1);
        assert_eq!(results.races[0].raceid, "20978");

        let national = ResultOptions {
            national: Some(true),
            ..ResultOptions::default()
        };
        let results = ElectionResults::from_feed(sample_feed(), "2015-11-03", &national);
        assert_eq!(results.races.len(), 1);
        assert!(results.ballot_measures.is_empty());

        let local = ResultOptions {
            national: Some(false),
            ..ResultOptions::default()
        };
        let results = ElectionResults::from_feed(sample_feed(), "2015-11-03", &local);
        assert_eq!(results.races[0].raceid, "20978");
    }

    #[test]
    fn test_state_level_only() {
        let options = ResultOptions {
            level: ResultsLevel::State,
            ..ResultOptions::default()
        };
        let results = ElectionResults::from_feed(sample_feed(), "2015-11-03", &options);

        assert_eq!(results.reporting_units.len(), 2);
        assert!(results.results.iter().all(|row| row.level == "state"));
    }

    #[test]
    fn test_set_zero_counts() {
        let options = ResultOptions {
            set_zero_counts: true,
            ..ResultOptions::default()
        };
        let results = ElectionResults::from_feed(sample_feed(), "2015-11-03", &options);

        assert!(results.results.iter().all(|row| row.votecount == 0 && !row.winner));
        assert_eq!(results.reporting_units[0].precinctsreporting, 0);
        assert_eq!(results.reporting_units[0].precinctstotal, 3741);
    }

    #[test]
    fn test_fallback_election_date() {
        let mut feed = sample_feed();
        feed.election_date = None;
        let results = ElectionResults::from_feed(feed, "2016-03-01", &ResultOptions::default());

        assert_eq!(results.races[0].electiondate, "2016-03-01");
        assert_eq!(results.races[0].statepostal.as_deref(), Some("KY"));
    }

    #[test]
    fn test_units_and_candidates_without_ids_stay_distinct() {
        let feed: ElectionFeed = parse_payload(json!({
            "races": [{
                "raceID": "900",
                "reportingUnits": [
                    {"level": "state", "candidates": [
                        {"last": "Able", "ballotOrder": 1, "voteCount": 5},
                        {"last": "Baker", "ballotOrder": 2, "voteCount": 3}
                    ]},
                    {"level": "county", "candidates": [
                        {"last": "Able", "ballotOrder": 1, "voteCount": 2}
                    ]},
                    {"level": "county", "candidates": [
                        {"last": "Able", "ballotOrder": 1, "voteCount": 3}
                    ]}
                ]
            }]
        }))
        .unwrap();

        let results =
            ElectionResults::from_feed(feed.clone(), "2015-11-03", &ResultOptions::default());
        let unit_ids: Vec<&str> = results.reporting_units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(unit_ids, vec!["900-state-1", "900-county-1", "900-county-2"]);

        let candidate_ids: Vec<&str> = results.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(candidate_ids, vec!["candidate-ballot-1", "candidate-ballot-2"]);
        assert_eq!(results.results[3].id, "900-candidate-ballot-1-county-2");

        let state_only = ResultOptions {
            level: ResultsLevel::State,
            ..ResultOptions::default()
        };
        let results = ElectionResults::from_feed(feed, "2015-11-03", &state_only);
        assert_eq!(results.reporting_units[0].reportingunitid, "state-1");
    }
}
