//! Property tests for the aggregator invariants.

use crate::logic::{group_by_date, recommend_day, suggest_time};
use gatherly_common::models::{Availability, AvailabilityKind};
use proptest::prelude::*;

const TODAY: &str = "2026-08-15";

fn arb_date() -> impl Strategy<Value = String> {
    // Around "today" so both past and future dates occur.
    (1u32..=28).prop_map(|day| format!("2026-08-{:02}", day))
}

fn arb_kind() -> impl Strategy<Value = AvailabilityKind> {
    prop_oneof![
        Just(AvailabilityKind::Day),
        Just(AvailabilityKind::Slots),
        Just(AvailabilityKind::Range),
    ]
}

fn arb_record() -> impl Strategy<Value = Availability> {
    (
        0usize..12,
        arb_date(),
        arb_kind(),
        proptest::collection::vec(
            prop_oneof![
                Just("morning".to_string()),
                Just("afternoon".to_string()),
                Just("night".to_string()),
                Just("brunch".to_string()),
            ],
            0..4,
        ),
        0u32..24,
        0u32..24,
    )
        .prop_map(|(user, date, kind, slots, start_hour, end_hour)| {
            let (lo, hi) = if start_hour <= end_hour {
                (start_hour, end_hour)
            } else {
                (end_hour, start_hour)
            };
            Availability {
                id: format!("{}-{}", user, date),
                user_id: format!("user-{}", user),
                group_id: "group-1".to_string(),
                date,
                kind,
                slots,
                start_time: Some(format!("{:02}:00", lo)),
                end_time: Some(format!("{:02}:30", hi)),
                created_at: None,
            }
        })
}

// One record per (user, date), as the store's upsert key guarantees.
fn dedup(mut records: Vec<Availability>) -> Vec<Availability> {
    records.sort_by(|a, b| (&a.user_id, &a.date).cmp(&(&b.user_id, &b.date)));
    records.dedup_by(|a, b| a.user_id == b.user_id && a.date == b.date);
    records
}

proptest! {
    #[test]
    fn recommendation_is_future_nonzero_and_maximal(
        records in proptest::collection::vec(arb_record(), 0..40)
    ) {
        let records = dedup(records);
        let by_date = group_by_date(&records);

        match recommend_day(&by_date, TODAY) {
            None => {
                // Only legitimate when no future date has a record.
                prop_assert!(by_date
                    .iter()
                    .all(|(date, rs)| date.as_str() < TODAY || rs.is_empty()));
            }
            Some(best) => {
                prop_assert!(best.date.as_str() >= TODAY);
                prop_assert!(best.available_count > 0);
                prop_assert_eq!(best.available_count, by_date[&best.date].len());

                for (date, rs) in &by_date {
                    if date.as_str() >= TODAY {
                        // Nothing strictly better, and nothing equal that is
                        // earlier.
                        prop_assert!(rs.len() <= best.available_count);
                        if rs.len() == best.available_count {
                            prop_assert!(best.date <= *date);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn suggestion_votes_never_exceed_the_record_count(
        records in proptest::collection::vec(arb_record(), 0..20)
    ) {
        let records = dedup(records);
        let refs: Vec<&Availability> = records.iter().collect();

        if let Some(suggestion) = suggest_time(&refs) {
            prop_assert!(suggestion.votes >= 1);
            prop_assert!(suggestion.votes <= refs.len());
        }
    }

    #[test]
    fn any_day_record_guarantees_a_suggestion(
        records in proptest::collection::vec(arb_record(), 1..20)
    ) {
        let mut records = dedup(records);
        records[0].kind = AvailabilityKind::Day;
        let refs: Vec<&Availability> = records.iter().collect();

        prop_assert!(suggest_time(&refs).is_some());
    }
}
