use std::collections::HashMap;

use super::database::DebateRecord;

/// Counts wins per winner, most wins first. Winners with equal counts keep the
/// order in which they first appear in `records`.
pub fn rank_records(records: &[DebateRecord]) -> Vec<(u64, usize)> {
    let mut positions: HashMap<u64, usize> = HashMap::new();
    let mut rankings: Vec<(u64, usize)> = Vec::new();

    for record in records {
        let index = *positions.entry(record.winner_id).or_insert_with(|| {
            rankings.push((record.winner_id, 0));
            rankings.len() - 1
        });
        rankings[index].1 += 1;
    }

    // stable sort keeps first-seen order for ties
    rankings.sort_by(|a, b| b.1.cmp(&a.1));
    rankings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records_won_by(winners: &[u64]) -> Vec<DebateRecord> {
        winners
            .iter()
            .enumerate()
            .map(|(i, &winner_id)| DebateRecord {
                id: format!("id{}", i),
                user_id_1: winner_id,
                user_id_2: 999,
                topic: "topic".to_string(),
                winner_id,
            })
            .collect()
    }

    #[test]
    fn test_empty() {
        assert!(rank_records(&[]).is_empty());
    }

    #[test]
    fn test_counts_descending() {
        let records = records_won_by(&[1, 2, 1, 3, 2, 1]);
        assert_eq!(rank_records(&records), vec![(1, 3), (2, 2), (3, 1)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        assert_eq!(rank_records(&records_won_by(&[8, 5])), vec![(8, 1), (5, 1)]);
        assert_eq!(
            rank_records(&records_won_by(&[4, 9, 7, 9, 4, 6])),
            vec![(4, 2), (9, 2), (7, 1), (6, 1)]
        );
    }

    #[test]
    fn test_no_truncation() {
        let winners: Vec<u64> = (1..=50).collect();
        assert_eq!(rank_records(&records_won_by(&winners)).len(), 50);
    }
}
