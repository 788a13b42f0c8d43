//! Election records and their field-ordered serialization.
//!
//! Every record type lists its fields explicitly in `serialize`; that order
//! is what the CSV header and the JSON key order are built from.

use serde_json::{Map, Value};
use std::fmt;

pub type FieldValue = Value;

/// Field name to value, in insertion order (`serde_json` is built with
/// `preserve_order`).
pub type FieldMap = Map<String, FieldValue>;

pub trait Record: fmt::Debug {
    fn serialize(&self) -> FieldMap;
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn serialize(&self) -> FieldMap {
        (**self).serialize()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn serialize(&self) -> FieldMap {
        (**self).serialize()
    }
}

fn field_map<const N: usize>(fields: [(&str, FieldValue); N]) -> FieldMap {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Text form of a value as it appears in a CSV cell.
pub fn cell_text(value: &FieldValue) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Election {
    pub id: String,
    pub electiondate: String,
    pub liveresults: bool,
    pub testresults: bool,
}

impl Record for Election {
    fn serialize(&self) -> FieldMap {
        field_map([
            ("id", self.id.clone().into()),
            ("electiondate", self.electiondate.clone().into()),
            ("liveresults", self.liveresults.into()),
            ("testresults", self.testresults.into()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Race {
    pub id: String,
    pub raceid: String,
    pub racetype: Option<String>,
    pub racetypeid: Option<String>,
    pub description: Option<String>,
    pub electiondate: String,
    pub initialization_data: bool,
    pub is_ballot_measure: bool,
    pub lastupdated: Option<String>,
    pub national: bool,
    pub officeid: Option<String>,
    pub officename: Option<String>,
    pub party: Option<String>,
    pub seatname: Option<String>,
    pub seatnum: Option<String>,
    pub statename: Option<String>,
    pub statepostal: Option<String>,
    pub test: bool,
    pub uncontested: bool,
}

impl Record for Race {
    fn serialize(&self) -> FieldMap {
        field_map([
            ("id", self.id.clone().into()),
            ("raceid", self.raceid.clone().into()),
            ("racetype", self.racetype.clone().into()),
            ("racetypeid", self.racetypeid.clone().into()),
            ("description", self.description.clone().into()),
            ("electiondate", self.electiondate.clone().into()),
            ("initialization_data", self.initialization_data.into()),
            ("is_ballot_measure", self.is_ballot_measure.into()),
            ("lastupdated", self.lastupdated.clone().into()),
            ("national", self.national.into()),
            ("officeid", self.officeid.clone().into()),
            ("officename", self.officename.clone().into()),
            ("party", self.party.clone().into()),
            ("seatname", self.seatname.clone().into()),
            ("seatnum", self.seatnum.clone().into()),
            ("statename", self.statename.clone().into()),
            ("statepostal", self.statepostal.clone().into()),
            ("test", self.test.into()),
            ("uncontested", self.uncontested.into()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportingUnit {
    pub id: String,
    pub reportingunitid: String,
    pub reportingunitname: Option<String>,
    pub description: Option<String>,
    pub electiondate: String,
    pub fipscode: Option<String>,
    pub initialization_data: bool,
    pub lastupdated: Option<String>,
    pub level: String,
    pub national: bool,
    pub officeid: Option<String>,
    pub officename: Option<String>,
    pub precinctsreporting: i64,
    pub precinctsreportingpct: f64,
    pub precinctstotal: i64,
    pub raceid: String,
    pub racetype: Option<String>,
    pub racetypeid: Option<String>,
    pub seatname: Option<String>,
    pub seatnum: Option<String>,
    pub statename: Option<String>,
    pub statepostal: Option<String>,
    pub test: bool,
    pub uncontested: bool,
    pub votecount: i64,
}

impl Record for ReportingUnit {
    fn serialize(&self) -> FieldMap {
        field_map([
            ("id", self.id.clone().into()),
            ("reportingunitid", self.reportingunitid.clone().into()),
            ("reportingunitname", self.reportingunitname.clone().into()),
            ("description", self.description.clone().into()),
            ("electiondate", self.electiondate.clone().into()),
            ("fipscode", self.fipscode.clone().into()),
            ("initialization_data", self.initialization_data.into()),
            ("lastupdated", self.lastupdated.clone().into()),
            ("level", self.level.clone().into()),
            ("national", self.national.into()),
            ("officeid", self.officeid.clone().into()),
            ("officename", self.officename.clone().into()),
            ("precinctsreporting", self.precinctsreporting.into()),
            ("precinctsreportingpct", self.precinctsreportingpct.into()),
            ("precinctstotal", self.precinctstotal.into()),
            ("raceid", self.raceid.clone().into()),
            ("racetype", self.racetype.clone().into()),
            ("racetypeid", self.racetypeid.clone().into()),
            ("seatname", self.seatname.clone().into()),
            ("seatnum", self.seatnum.clone().into()),
            ("statename", self.statename.clone().into()),
            ("statepostal", self.statepostal.clone().into()),
            ("test", self.test.into()),
            ("uncontested", self.uncontested.into()),
            ("votecount", self.votecount.into()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub candidateid: Option<String>,
    pub ballotorder: i64,
    pub first: Option<String>,
    pub last: Option<String>,
    pub party: Option<String>,
    pub polid: Option<String>,
    pub polnum: Option<String>,
}

impl Record for Candidate {
    fn serialize(&self) -> FieldMap {
        field_map([
            ("id", self.id.clone().into()),
            ("candidateid", self.candidateid.clone().into()),
            ("ballotorder", self.ballotorder.into()),
            ("first", self.first.clone().into()),
            ("last", self.last.clone().into()),
            ("party", self.party.clone().into()),
            ("polid", self.polid.clone().into()),
            ("polnum", self.polnum.clone().into()),
        ])
    }
}

/// One candidate's tally in one reporting unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateReportingUnit {
    pub id: String,
    pub raceid: String,
    pub reportingunitid: String,
    pub candidateid: Option<String>,
    pub polid: Option<String>,
    pub polnum: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
    pub party: Option<String>,
    pub ballotorder: i64,
    pub incumbent: bool,
    pub votecount: i64,
    pub votepct: f64,
    pub winner: bool,
    pub runoff: bool,
}

impl Record for CandidateReportingUnit {
    fn serialize(&self) -> FieldMap {
        field_map([
            ("id", self.id.clone().into()),
            ("raceid", self.raceid.clone().into()),
            ("reportingunitid", self.reportingunitid.clone().into()),
            ("candidateid", self.candidateid.clone().into()),
            ("polid", self.polid.clone().into()),
            ("polnum", self.polnum.clone().into()),
            ("first", self.first.clone().into()),
            ("last", self.last.clone().into()),
            ("party", self.party.clone().into()),
            ("ballotorder", self.ballotorder.into()),
            ("incumbent", self.incumbent.into()),
            ("votecount", self.votecount.into()),
            ("votepct", self.votepct.into()),
            ("winner", self.winner.into()),
            ("runoff", self.runoff.into()),
        ])
    }
}

/// Fully flattened result row: race, reporting unit and candidate in one.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub id: String,
    pub raceid: String,
    pub racetype: Option<String>,
    pub racetypeid: Option<String>,
    pub ballotorder: i64,
    pub candidateid: Option<String>,
    pub description: Option<String>,
    pub electiondate: String,
    pub fipscode: Option<String>,
    pub first: Option<String>,
    pub incumbent: bool,
    pub initialization_data: bool,
    pub is_ballot_measure: bool,
    pub last: Option<String>,
    pub lastupdated: Option<String>,
    pub level: String,
    pub national: bool,
    pub officeid: Option<String>,
    pub officename: Option<String>,
    pub party: Option<String>,
    pub polid: Option<String>,
    pub polnum: Option<String>,
    pub precinctsreporting: i64,
    pub precinctsreportingpct: f64,
    pub precinctstotal: i64,
    pub reportingunitid: String,
    pub reportingunitname: Option<String>,
    pub runoff: bool,
    pub seatname: Option<String>,
    pub seatnum: Option<String>,
    pub statename: Option<String>,
    pub statepostal: Option<String>,
    pub test: bool,
    pub uncontested: bool,
    pub votecount: i64,
    pub votepct: f64,
    pub winner: bool,
}

impl Record for ResultRow {
    fn serialize(&self) -> FieldMap {
        field_map([
            ("id", self.id.clone().into()),
            ("raceid", self.raceid.clone().into()),
            ("racetype", self.racetype.clone().into()),
            ("racetypeid", self.racetypeid.clone().into()),
            ("ballotorder", self.ballotorder.into()),
            ("candidateid", self.candidateid.clone().into()),
            ("description", self.description.clone().into()),
            ("electiondate", self.electiondate.clone().into()),
            ("fipscode", self.fipscode.clone().into()),
            ("first", self.first.clone().into()),
            ("incumbent", self.incumbent.into()),
            ("initialization_data", self.initialization_data.into()),
            ("is_ballot_measure", self.is_ballot_measure.into()),
            ("last", self.last.clone().into()),
            ("lastupdated", self.lastupdated.clone().into()),
            ("level", self.level.clone().into()),
            ("national", self.national.into()),
            ("officeid", self.officeid.clone().into()),
            ("officename", self.officename.clone().into()),
            ("party", self.party.clone().into()),
            ("polid", self.polid.clone().into()),
            ("polnum", self.polnum.clone().into()),
            ("precinctsreporting", self.precinctsreporting.into()),
            ("precinctsreportingpct", self.precinctsreportingpct.into()),
            ("precinctstotal", self.precinctstotal.into()),
            ("reportingunitid", self.reportingunitid.clone().into()),
            ("reportingunitname", self.reportingunitname.clone().into()),
            ("runoff", self.runoff.into()),
            ("seatname", self.seatname.clone().into()),
            ("seatnum", self.seatnum.clone().into()),
            ("statename", self.statename.clone().into()),
            ("statepostal", self.statepostal.clone().into()),
            ("test", self.test.into()),
            ("uncontested", self.uncontested.into()),
            ("votecount", self.votecount.into()),
            ("votepct", self.votepct.into()),
            ("winner", self.winner.into()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BallotMeasure {
    pub id: String,
    pub raceid: String,
    pub candidateid: Option<String>,
    pub ballotorder: i64,
    pub description: Option<String>,
    pub electiondate: String,
    pub last: Option<String>,
    pub polid: Option<String>,
    pub polnum: Option<String>,
    pub seatname: Option<String>,
    pub statepostal: Option<String>,
}

impl Record for BallotMeasure {
    fn serialize(&self) -> FieldMap {
        field_map([
            ("id", self.id.clone().into()),
            ("raceid", self.raceid.clone().into()),
            ("candidateid", self.candidateid.clone().into()),
            ("ballotorder", self.ballotorder.into()),
            ("description", self.description.clone().into()),
            ("electiondate", self.electiondate.clone().into()),
            ("last", self.last.clone().into()),
            ("polid", self.polid.clone().into()),
            ("polnum", self.polnum.clone().into()),
            ("seatname", self.seatname.clone().into()),
            ("statepostal", self.statepostal.clone().into()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DelegateReport {
    pub id: String,
    pub candidateid: String,
    pub last: Option<String>,
    pub party: String,
    pub level: String,
    pub state: String,
    pub delegates_count: i64,
    pub superdelegates_count: i64,
    pub party_total: i64,
    pub party_need: i64,
    pub d1: Option<i64>,
    pub d7: Option<i64>,
    pub d30: Option<i64>,
}

impl Record for DelegateReport {
    fn serialize(&self) -> FieldMap {
        field_map([
            ("id", self.id.clone().into()),
            ("candidateid", self.candidateid.clone().into()),
            ("last", self.last.clone().into()),
            ("party", self.party.clone().into()),
            ("level", self.level.clone().into()),
            ("state", self.state.clone().into()),
            ("delegates_count", self.delegates_count.into()),
            ("superdelegates_count", self.superdelegates_count.into()),
            ("party_total", self.party_total.into()),
            ("party_need", self.party_need.into()),
            ("d1", self.d1.into()),
            ("d7", self.d7.into()),
            ("d30", self.d30.into()),
        ])
    }
}
