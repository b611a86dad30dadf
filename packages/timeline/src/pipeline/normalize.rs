//! Event normalization: ordering and year-range filtering.

use crate::types::event::Event;
use crate::years::YearRange;

/// Stable sort ascending by resolved year.
///
/// Events with no resolvable year sort to the front, keeping their
/// relative order.
pub fn sort_events(mut events: Vec<Event>) -> Vec<Event> {
    // `None < Some(_)`, so unresolved dates lead
    events.sort_by_key(Event::year);
    events
}

/// Events whose year resolves and falls within `[start, end]`.
pub fn filter_by_year(events: &[Event], start: i32, end: i32) -> Vec<Event> {
    let range = YearRange::new(start, end);
    events
        .iter()
        .filter(|event| event.year().is_some_and(|year| range.contains(year)))
        .cloned()
        .collect()
}

/// Remove every event whose date has no resolvable year.
pub fn drop_unresolved(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| event.year().is_some())
        .collect()
}

impl YearRange {
    /// Apply this range to a set of events.
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        filter_by_year(events, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dates(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.date.as_str()).collect()
    }

    #[test]
    fn test_sort_ascending_with_bc() {
        let events = vec![
            Event::new("476", "Fall of the West"),
            Event::new("753 BC", "Founding"),
            Event::new("27 BC", "Empire"),
        ];
        let sorted = sort_events(events);
        assert_eq!(dates(&sorted), vec!["753 BC", "27 BC", "476"]);
    }

    #[test]
    fn test_unresolved_sort_first_and_stay_stable() {
        let events = vec![
            Event::new("1945", "a"),
            Event::new("the 1990s", "b"),
            Event::new("1914", "c"),
            Event::new("7th century", "d"),
        ];
        let sorted = sort_events(events);
        assert_eq!(
            dates(&sorted),
            vec!["the 1990s", "7th century", "1914", "1945"]
        );
    }

    #[test]
    fn test_equal_years_keep_input_order() {
        let events = vec![
            Event::new("1066", "first"),
            Event::new("1066", "second"),
            Event::new("1000", "earlier"),
        ];
        let sorted = sort_events(events);
        let summaries: Vec<_> = sorted.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["earlier", "first", "second"]);
    }

    #[test]
    fn test_filter_excludes_unresolved() {
        let events = vec![
            Event::new("100", "a"),
            Event::new("50 BC", "b"),
            Event::new("bad", "c"),
        ];
        let filtered = filter_by_year(&events, -100, 200);
        assert_eq!(dates(&filtered), vec!["100", "50 BC"]);
    }

    #[test]
    fn test_filter_bounds_inclusive() {
        let events = vec![
            Event::new("800 BC", "out"),
            Event::new("753 BC", "in"),
            Event::new("476", "out"),
        ];
        let filtered = YearRange::new(-800, 0).apply(&events[1..]);
        assert_eq!(dates(&filtered), vec!["753 BC"]);

        let filtered = filter_by_year(&events, -800, -753);
        assert_eq!(dates(&filtered), vec!["800 BC", "753 BC"]);
    }

    #[test]
    fn test_drop_unresolved() {
        let events = vec![
            Event::new("1800s", "decade"),
            Event::new("1815", "Waterloo"),
            Event::new("", "blank"),
        ];
        assert_eq!(dates(&drop_unresolved(events)), vec!["1815"]);
    }

    fn arb_date() -> impl Strategy<Value = String> {
        prop_oneof![
            (100u32..2100).prop_map(|y| y.to_string()),
            (1u32..3000).prop_map(|y| format!("{} BC", y)),
            Just("sometime".to_string()),
            Just("the 1920s".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn prop_sorted_years_are_non_decreasing(raw in prop::collection::vec(arb_date(), 0..40)) {
            let events: Vec<_> = raw.iter().enumerate()
                .map(|(i, d)| Event::new(d.clone(), i.to_string()))
                .collect();
            let sorted = sort_events(events.clone());

            prop_assert_eq!(sorted.len(), events.len());
            let years: Vec<_> = sorted.iter().map(Event::year).collect();
            prop_assert!(years.windows(2).all(|w| w[0] <= w[1]));

            // Stability: equal years keep their original (index) order
            for pair in sorted.windows(2) {
                if pair[0].year() == pair[1].year() {
                    let a: usize = pair[0].summary.parse().unwrap();
                    let b: usize = pair[1].summary.parse().unwrap();
                    prop_assert!(a < b);
                }
            }
        }

        #[test]
        fn prop_filter_is_subset_within_range(
            raw in prop::collection::vec(arb_date(), 0..40),
            start in -3000i32..2100,
            span in 0i32..3000,
        ) {
            let events: Vec<_> = raw.iter().map(|d| Event::new(d.clone(), "")).collect();
            let end = start + span;
            let filtered = filter_by_year(&events, start, end);

            prop_assert!(filtered.len() <= events.len());
            for event in &filtered {
                let year = event.year();
                prop_assert!(year.is_some_and(|y| y >= start && y <= end));
            }
        }
    }
}
