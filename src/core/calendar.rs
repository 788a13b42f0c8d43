use crate::domain::feed::CalendarFeed;
use crate::domain::model::Election;
use crate::utils::error::{ElexError, Result};
use crate::utils::validation::parse_iso_date;

/// All known elections ordered by date; equal dates keep their feed order.
pub fn elections(feed: CalendarFeed) -> Result<Vec<Election>> {
    let mut elections = feed
        .elections
        .into_iter()
        .enumerate()
        .map(|(index, raw)| -> Result<Election> {
            parse_iso_date(&raw.election_date).map_err(|message| ElexError::MalformedRecord {
                path: format!("elections[{index}].electionDate"),
                message,
            })?;
            Ok(Election {
                id: raw.election_date.clone(),
                electiondate: raw.election_date,
                liveresults: raw.live_results,
                testresults: raw.test_results,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Dates are validated YYYY-MM-DD, so string order is calendar order.
    elections.sort_by(|a, b| a.electiondate.cmp(&b.electiondate));
    Ok(elections)
}

/// The earliest election strictly after `reference`, if any.
pub fn next_election(elections: Vec<Election>, reference: &str) -> Option<Election> {
    elections
        .into_iter()
        .filter(|election| election.electiondate.as_str() > reference)
        .min_by(|a, b| a.electiondate.cmp(&b.electiondate))
}
