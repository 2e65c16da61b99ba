//! Support statistics: counts per regency, village and position.

use crate::address::{OTHER_AREA, UNKNOWN_AREA, parse_regency, parse_village};
use crate::petition::Petitioner;
use serde::Serialize;
use std::collections::HashMap;

/// How many rows the summary panels show before "show all".
pub const TOP_ROWS: usize = 7;

/// One bar of a statistics chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub name: String,
    pub count: usize,
}

impl Tally {
    /// Share of `total` in percent. Zero when `total` is zero.
    pub fn percentage(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 / total as f64 * 100.0
        }
    }
}

/// Count records per key, most frequent first. Ties keep first-seen order.
pub fn tally_by<F>(records: &[Petitioner], mut key: F) -> Vec<Tally>
where
    F: FnMut(&Petitioner) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tallies: Vec<Tally> = Vec::new();

    for record in records {
        let name = key(record);
        match index.get(&name) {
            Some(&i) => tallies[i].count += 1,
            None => {
                index.insert(name.clone(), tallies.len());
                tallies.push(Tally { name, count: 1 });
            }
        }
    }

    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

pub fn regency_stats(records: &[Petitioner]) -> Vec<Tally> {
    tally_by(records, |p| parse_regency(&p.address))
}

pub fn village_stats(records: &[Petitioner]) -> Vec<Tally> {
    tally_by(records, |p| parse_village(&p.address))
}

pub fn position_stats(records: &[Petitioner]) -> Vec<Tally> {
    tally_by(records, |p| {
        let position = p.position.trim();
        if position.is_empty() {
            UNKNOWN_AREA.to_string()
        } else {
            position.to_string()
        }
    })
}

/// Village breakdown is only worth showing if some address named a village.
pub fn village_stats_meaningful(villages: &[Tally]) -> bool {
    villages.iter().any(|t| t.name != OTHER_AREA)
}

/// First `n` rows of a sorted tally.
pub fn top(tallies: &[Tally], n: usize) -> &[Tally] {
    &tallies[..tallies.len().min(n)]
}

/// Printable summary for the admin report page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total: usize,
    pub positions: Vec<Tally>,
    pub regencies: Vec<Tally>,
}

impl Report {
    /// `None` when there is nothing to report.
    pub fn build(records: &[Petitioner]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Self {
            total: records.len(),
            positions: position_stats(records),
            regencies: regency_stats(records),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: i64, position: &str, address: &str) -> Petitioner {
        Petitioner {
            id,
            created_at: None,
            name: format!("P{id}"),
            position: position.into(),
            address: address.into(),
            signature: String::new(),
        }
    }

    fn sample() -> Vec<Petitioner> {
        vec![
            record(1, "Kepala Desa", "Desa Sukamaju, Kab. Bogor"),
            record(2, "Staf Desa", "Jl. Kenanga, Kota Depok"),
            record(3, "Kepala Desa", "Desa Cibodas, Kabupaten Bogor"),
            record(4, "  ", "Jl. Melati"),
        ]
    }

    fn t(name: &str, count: usize) -> Tally {
        Tally {
            name: name.into(),
            count,
        }
    }

    #[test]
    fn regencies_sorted_by_count_then_first_seen() {
        assert_eq!(
            regency_stats(&sample()),
            vec![t("Kab. Bogor", 2), t("Kota Depok", 1), t("Lainnya", 1)]
        );
    }

    #[test]
    fn blank_position_is_unknown() {
        assert_eq!(
            position_stats(&sample()),
            vec![t("Kepala Desa", 2), t("Staf Desa", 1), t("Tidak Diketahui", 1)]
        );
    }

    #[test]
    fn village_breakdown_needs_a_named_village() {
        assert!(village_stats_meaningful(&village_stats(&sample())));
        let only_streets = vec![record(1, "Staf Desa", "Jl. Melati")];
        assert!(!village_stats_meaningful(&village_stats(&only_streets)));
    }

    #[test]
    fn percentage_and_top() {
        let tallies = regency_stats(&sample());
        assert_eq!(tallies[0].percentage(4), 50.0);
        assert_eq!(tallies[0].percentage(0), 0.0);
        assert_eq!(top(&tallies, 2).len(), 2);
        assert_eq!(top(&tallies, TOP_ROWS).len(), 3);
    }

    #[test]
    fn empty_report_is_none() {
        assert!(Report::build(&[]).is_none());
        let report = Report::build(&sample()).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.regencies[0], t("Kab. Bogor", 2));
    }
}
