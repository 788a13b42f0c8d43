//! Command tokens, what they need, and the records they produce.

use crate::core::calendar;
use crate::core::delegates::delegate_reports;
use crate::core::results::{ElectionResults, ResultOptions};
use crate::domain::feed::{parse_payload, CalendarFeed, DelegateSumFeed, DelegateSuperFeed, ElectionFeed};
use crate::domain::model::Record;
use crate::domain::ports::{DataSource, Resource};
use crate::utils::error::{ElexError, Result};
use crate::utils::validation::{validate_election_date, DATE_FORMAT};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Races,
    Candidates,
    ReportingUnits,
    CandidateReportingUnits,
    Results,
    BallotMeasures,
    Elections,
    NextElection,
    Delegates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Race,
    Candidate,
    ReportingUnit,
    CandidateReportingUnit,
    Result,
    BallotMeasure,
    Election,
    DelegateReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    Required,
    /// Used when given, otherwise today's date.
    Optional,
    /// Accepted and ignored.
    Ignored,
}

/// Parameters shared by every command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub election_date: Option<String>,
    pub options: ResultOptions,
}

impl Query {
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            election_date: Some(date.into()),
            options: ResultOptions::default(),
        }
    }
}

pub type Records = Vec<Box<dyn Record + Send>>;

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Races,
        Command::Candidates,
        Command::ReportingUnits,
        Command::CandidateReportingUnits,
        Command::Results,
        Command::BallotMeasures,
        Command::Elections,
        Command::NextElection,
        Command::Delegates,
    ];

    pub fn resolve(token: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.token() == token)
            .ok_or_else(|| ElexError::UnknownCommand {
                command: token.to_string(),
            })
    }

    pub fn token(self) -> &'static str {
        match self {
            Command::Races => "races",
            Command::Candidates => "candidates",
            Command::ReportingUnits => "reporting-units",
            Command::CandidateReportingUnits => "candidate-reporting-units",
            Command::Results => "results",
            Command::BallotMeasures => "ballot-measures",
            Command::Elections => "elections",
            Command::NextElection => "next-election",
            Command::Delegates => "delegates",
        }
    }

    pub fn record_kind(self) -> RecordKind {
        match self {
            Command::Races => RecordKind::Race,
            Command::Candidates => RecordKind::Candidate,
            Command::ReportingUnits => RecordKind::ReportingUnit,
            Command::CandidateReportingUnits => RecordKind::CandidateReportingUnit,
            Command::Results => RecordKind::Result,
            Command::BallotMeasures => RecordKind::BallotMeasure,
            Command::Elections | Command::NextElection => RecordKind::Election,
            Command::Delegates => RecordKind::DelegateReport,
        }
    }

    pub fn date_policy(self) -> DatePolicy {
        match self {
            Command::Races
            | Command::Candidates
            | Command::ReportingUnits
            | Command::CandidateReportingUnits
            | Command::Results
            | Command::BallotMeasures => DatePolicy::Required,
            Command::NextElection => DatePolicy::Optional,
            Command::Elections | Command::Delegates => DatePolicy::Ignored,
        }
    }

    /// Checks the query against this command's date policy and returns the
    /// date the command will use, if any.
    pub fn election_date(self, query: &Query) -> Result<Option<String>> {
        let supplied = query
            .election_date
            .as_deref()
            .map(validate_election_date)
            .transpose()?;

        match (self.date_policy(), supplied) {
            (DatePolicy::Required, None) => Err(ElexError::MissingArgument {
                argument: format!("election date for `{}`", self.token()),
            }),
            (DatePolicy::Required, Some(date)) => Ok(Some(date.to_string())),
            (DatePolicy::Optional, date) => Ok(Some(date.map_or_else(today, str::to_string))),
            (DatePolicy::Ignored, _) => Ok(None),
        }
    }

    /// Loads the command's resource from `source` and builds its records, in
    /// source order.
    pub async fn fetch<S>(self, source: &S, query: &Query) -> Result<Records>
    where
        S: DataSource + ?Sized,
    {
        let date = self.election_date(query)?;
        tracing::debug!("Fetching `{}` (date: {:?})", self.token(), date);

        match self {
            Command::Elections => {
                let feed: CalendarFeed = parse_payload(source.load(&Resource::Calendar).await?)?;
                Ok(boxed(calendar::elections(feed)?))
            }
            Command::NextElection => {
                let reference = date.unwrap_or_else(today);
                let feed: CalendarFeed = parse_payload(source.load(&Resource::Calendar).await?)?;
                let next = calendar::next_election(calendar::elections(feed)?, &reference);
                Ok(boxed(next.into_iter().collect()))
            }
            Command::Delegates => {
                let sum: DelegateSumFeed =
                    parse_payload(source.load(&Resource::DelegateSum).await?)?;
                let super_report: DelegateSuperFeed =
                    parse_payload(source.load(&Resource::DelegateSuper).await?)?;
                Ok(boxed(delegate_reports(sum, super_report)))
            }
            direct => {
                let date = date.unwrap_or_default();
                let payload = source
                    .load(&Resource::Election { date: date.clone() })
                    .await?;
                let feed: ElectionFeed = parse_payload(payload)?;
                let results = ElectionResults::from_feed(feed, &date, &query.options);
                Ok(direct.select(results))
            }
        }
    }

    fn select(self, results: ElectionResults) -> Records {
        match self {
            Command::Races => boxed(results.races),
            Command::Candidates => boxed(results.candidates),
            Command::ReportingUnits => boxed(results.reporting_units),
            Command::CandidateReportingUnits => boxed(results.candidate_reporting_units),
            Command::BallotMeasures => boxed(results.ballot_measures),
            _ => boxed(results.results),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

fn boxed<R: Record + Send + 'static>(records: Vec<R>) -> Records {
    records
        .into_iter()
        .map(|record| Box::new(record) as Box<dyn Record + Send>)
        .collect()
}

fn today() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}
