use crate::domain::feed::{DelegateSumFeed, DelegateSuperFeed, SumCandidate};
use crate::domain::model::DelegateReport;
use std::collections::HashMap;

const NATIONAL: &str = "US";

/// Joins the per-state super report with the national summary. One report
/// per party, state and candidate, in super report order.
pub fn delegate_reports(sum: DelegateSumFeed, super_report: DelegateSuperFeed) -> Vec<DelegateReport> {
    let summary: HashMap<(&str, &str), &SumCandidate> = sum
        .del_sum
        .del
        .iter()
        .flat_map(|party| {
            party
                .candidates
                .iter()
                .map(move |c| ((party.party.as_str(), c.candidate_id.as_str()), c))
        })
        .collect();

    let mut reports = Vec::new();
    for party in &super_report.del_super.del {
        for state in &party.states {
            let national = state.state == NATIONAL;
            for candidate in &state.candidates {
                let totals = summary
                    .get(&(party.party.as_str(), candidate.candidate_id.as_str()))
                    .filter(|_| national);

                reports.push(DelegateReport {
                    id: format!("{}-{}-{}", party.party, state.state, candidate.candidate_id),
                    candidateid: candidate.candidate_id.clone(),
                    last: candidate
                        .name
                        .clone()
                        .or_else(|| totals.and_then(|t| t.name.clone())),
                    party: party.party.clone(),
                    level: if national { "nation" } else { "state" }.to_string(),
                    state: state.state.clone(),
                    delegates_count: candidate.total,
                    superdelegates_count: candidate.super_total,
                    party_total: party.votes,
                    party_need: party.need,
                    d1: totals.map(|t| t.d1),
                    d7: totals.map(|t| t.d7),
                    d30: totals.map(|t| t.d30),
                });
            }
        }
    }

    tracing::debug!("Built {} delegate reports", reports.len());
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::parse_payload;
    use serde_json::json;

    fn feeds() -> (DelegateSumFeed, DelegateSuperFeed) {
        let sum = parse_payload(json!({
            "delSum": {"del": [
                {"pId": "Dem", "dVotes": "4763", "dNeed": "2382", "Cand": [
                    {"cId": "1746", "cName": "Clinton", "dTot": "17", "d1": "1", "d7": "4", "d30": "9"}
                ]}
            ]}
        }))
        .unwrap();
        let super_report = parse_payload(json!({
            "delSuper": {"del": [
                {"pId": "Dem", "dVotes": "4763", "dNeed": "2382", "State": [
                    {"sId": "US", "Cand": [
                        {"cId": "1746", "cName": "Clinton", "dTot": "17", "sdTot": "359"},
                        {"cId": "1445", "cName": "Sanders", "dTot": "9", "sdTot": "8"}
                    ]},
                    {"sId": "IA", "Cand": [
                        {"cId": "1746", "cName": "Clinton", "dTot": "0", "sdTot": "4"}
                    ]}
                ]}
            ]}
        }))
        .unwrap();
        (sum, super_report)
    }

    #[test]
    fn test_reports_join_national_totals() {
        let (sum, super_report) = feeds();
        let reports = delegate_reports(sum, super_report);

        assert_eq!(reports.len(), 3);

        let clinton = &reports[0];
        assert_eq!(clinton.id, "Dem-US-1746");
        assert_eq!(clinton.level, "nation");
        assert_eq!(clinton.superdelegates_count, 359);
        assert_eq!(clinton.party_need, 2382);
        assert_eq!((clinton.d1, clinton.d7, clinton.d30), (Some(1), Some(4), Some(9)));
    }

    #[test]
    fn test_state_rows_and_missing_summary() {
        let (sum, super_report) = feeds();
        let reports = delegate_reports(sum, super_report);

        let sanders = &reports[1];
        assert_eq!(sanders.last.as_deref(), Some("Sanders"));
        assert_eq!(sanders.d1, None);

        let iowa = &reports[2];
        assert_eq!(iowa.level, "state");
        assert_eq!(iowa.state, "IA");
        assert_eq!(iowa.d30, None);
        assert_eq!(iowa.superdelegates_count, 4);
    }
}
