use std::cmp::Reverse;

use crate::models::LiftRecord;

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, 101st.
pub fn ordinal_suffix(rank: u32) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", rank, suffix)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placed<'a> {
    pub record: &'a LiftRecord,
    pub rank: Option<u32>,
    pub placing: String,
}

/// Ranks the lifts of one weight category: higher total first, then the
/// lighter clean-and-jerk, then the earlier clean-and-jerk attempt, then the
/// lower lottery number. Lifts without a total are listed after the ranked
/// ones, unplaced, in their input order.
pub fn rank_weight_category<'a>(records: &[&'a LiftRecord]) -> Vec<Placed<'a>> {
    let (mut ranked, unranked): (Vec<&'a LiftRecord>, Vec<&'a LiftRecord>) =
        records.iter().copied().partition(|record| record.has_total());

    ranked.sort_by_key(|record| {
        (
            Reverse(record.total_lifted),
            record.best_cnj.weight,
            record.best_cnj.ordinal,
            record.lottery_number.unwrap_or(u32::MAX),
        )
    });

    let placed = ranked.into_iter().zip(1..).map(|(record, rank)| Placed {
        record,
        rank: Some(rank),
        placing: ordinal_suffix(rank),
    });
    let unplaced = unranked.into_iter().map(|record| Placed {
        record,
        rank: None,
        placing: "-".to_string(),
    });

    placed.chain(unplaced).collect()
}
