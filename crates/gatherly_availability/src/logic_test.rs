use crate::logic::{
    group_by_date, recommend_day, suggest_time, TimeOfDay,
};
use gatherly_common::models::{Availability, AvailabilityKind};

const TODAY: &str = "2026-08-24";

fn day(user: &str, date: &str) -> Availability {
    Availability {
        id: format!("{}-{}", user, date),
        user_id: user.to_string(),
        group_id: "group-1".to_string(),
        date: date.to_string(),
        kind: AvailabilityKind::Day,
        slots: Vec::new(),
        start_time: None,
        end_time: None,
        created_at: None,
    }
}

fn slots(user: &str, date: &str, names: &[&str]) -> Availability {
    Availability {
        kind: AvailabilityKind::Slots,
        slots: names.iter().map(|s| s.to_string()).collect(),
        ..day(user, date)
    }
}

fn range(user: &str, date: &str, start: &str, end: &str) -> Availability {
    Availability {
        kind: AvailabilityKind::Range,
        start_time: Some(start.to_string()),
        end_time: Some(end.to_string()),
        ..day(user, date)
    }
}

mod recommend_day_tests {
    use super::*;

    #[test]
    fn picks_the_highest_count() {
        let records = vec![
            day("alice", "2026-08-25"),
            day("bob", "2026-08-25"),
            day("carol", "2026-08-26"),
        ];

        let best = recommend_day(&group_by_date(&records), TODAY).unwrap();

        assert_eq!(best.date, "2026-08-25");
        assert_eq!(best.available_count, 2);
    }

    #[test]
    fn ties_go_to_the_earliest_date() {
        let records = vec![
            day("alice", "2026-08-27"),
            day("bob", "2026-08-27"),
            day("carol", "2026-08-25"),
            day("dave", "2026-08-25"),
        ];

        let best = recommend_day(&group_by_date(&records), TODAY).unwrap();

        assert_eq!(best.date, "2026-08-25");
    }

    #[test]
    fn past_dates_are_ignored() {
        let records = vec![
            day("alice", "2026-08-20"),
            day("bob", "2026-08-20"),
            day("carol", "2026-08-20"),
            day("dave", "2026-08-30"),
        ];

        let best = recommend_day(&group_by_date(&records), TODAY).unwrap();

        assert_eq!(best.date, "2026-08-30");
        assert_eq!(best.available_count, 1);
    }

    #[test]
    fn today_itself_qualifies() {
        let records = vec![day("alice", TODAY)];

        let best = recommend_day(&group_by_date(&records), TODAY).unwrap();

        assert_eq!(best.date, TODAY);
    }

    #[test]
    fn no_qualifying_date_means_no_recommendation() {
        let past_only = vec![day("alice", "2026-08-01")];
        assert!(recommend_day(&group_by_date(&past_only), TODAY).is_none());
        assert!(recommend_day(&group_by_date(&[]), TODAY).is_none());
    }
}

mod suggest_time_tests {
    use super::*;

    fn suggestion_for(records: Vec<Availability>) -> Option<crate::logic::TimeSuggestion> {
        let refs: Vec<&Availability> = records.iter().collect();
        suggest_time(&refs)
    }

    #[test]
    fn whole_day_votes_for_all_three_buckets() {
        let result = suggestion_for(vec![day("alice", TODAY)]).unwrap();

        // All buckets tie at one vote; morning wins the tie.
        assert_eq!(result.time_of_day, TimeOfDay::Morning);
        assert_eq!(result.votes, 1);
        assert_eq!(result.suggested_time, "10:00");
    }

    #[test]
    fn slot_plus_overlapping_range_elect_morning() {
        let result = suggestion_for(vec![
            slots("alice", TODAY, &["morning"]),
            range("bob", TODAY, "09:00", "12:00"),
        ])
        .unwrap();

        assert_eq!(result.time_of_day, TimeOfDay::Morning);
        assert_eq!(result.votes, 2);
        assert_eq!(result.suggested_time, "10:00");
    }

    #[test]
    fn unknown_slot_names_are_ignored() {
        let result = suggestion_for(vec![slots("alice", TODAY, &["brunch", "night"])]).unwrap();

        assert_eq!(result.time_of_day, TimeOfDay::Night);
        assert_eq!(result.votes, 1);
        assert_eq!(result.suggested_time, "21:00");
    }

    #[test]
    fn afternoon_beats_night_on_a_tie() {
        let result = suggestion_for(vec![slots("alice", TODAY, &["afternoon", "night"])]).unwrap();

        assert_eq!(result.time_of_day, TimeOfDay::Afternoon);
        assert_eq!(result.suggested_time, "17:00");
    }

    #[test]
    fn a_range_starting_at_thirteen_still_counts_as_morning() {
        let result = suggestion_for(vec![range("alice", TODAY, "13:00", "13:30")]).unwrap();

        assert_eq!(result.time_of_day, TimeOfDay::Morning);
    }

    #[test]
    fn a_range_ending_at_twenty_counts_as_night() {
        let records = vec![range("alice", TODAY, "18:00", "20:00")];
        let refs: Vec<&Availability> = records.iter().collect();
        let result = suggest_time(&refs).unwrap();

        // 18:00-20:00 overlaps both afternoon and night; afternoon wins the
        // tie, but the night bucket got its vote.
        assert_eq!(result.time_of_day, TimeOfDay::Afternoon);

        let night_only = vec![range("alice", TODAY, "20:00", "22:00")];
        let refs: Vec<&Availability> = night_only.iter().collect();
        let result = suggest_time(&refs).unwrap();
        assert_eq!(result.time_of_day, TimeOfDay::Night);
    }

    #[test]
    fn an_early_range_votes_for_nothing_but_morning() {
        let result = suggestion_for(vec![range("alice", TODAY, "08:00", "09:00")]).unwrap();

        assert_eq!(result.time_of_day, TimeOfDay::Morning);
        assert_eq!(result.votes, 1);
    }

    #[test]
    fn empty_slots_and_no_records_yield_no_suggestion() {
        assert!(suggestion_for(vec![]).is_none());
        assert!(suggestion_for(vec![slots("alice", TODAY, &["brunch"])]).is_none());
    }
}

mod group_by_date_tests {
    use super::*;

    #[test]
    fn counts_are_per_date() {
        let records = vec![
            day("alice", "2026-08-25"),
            day("bob", "2026-08-25"),
            day("alice", "2026-08-26"),
        ];

        let by_date = group_by_date(&records);

        assert_eq!(by_date.len(), 2);
        assert_eq!(by_date["2026-08-25"].len(), 2);
        assert_eq!(by_date["2026-08-26"].len(), 1);
    }
}
