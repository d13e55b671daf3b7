//! Property-based tests for the showtime board
//!
//! Invariants of filtering, pagination, selection and the expiry sweep,
//! checked over generated collections, filters and instants.

#![allow(clippy::unwrap_used)] // Test code

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use proptest::collection::vec;
use proptest::prelude::*;
use showtime_board::filter::{matches_status, LocalNow};
use showtime_board::lifecycle::hide_expired;
use showtime_board::pagination::total_pages;
use showtime_board::text::normalize;
use showtime_board::{
    paginate, DateFilter, FilterEngine, Filters, MovieRef, RoomRef, ScheduleCalendar,
    SelectionSet, Showtime, ShowtimeId, ShowtimeStatus, StatusFilter,
};

const MOVIES: [&str; 4] = ["Avéngers: Kỷ Nguyên", "Đà Lạt Mùa Sương", "Titanic", "Mắt Biếc"];
const ROOMS: [&str; 3] = ["Phòng 1", "Phòng VIP", "Hall Ánh Sáng"];

/// Strategy for generating statuses
fn status_strategy() -> impl Strategy<Value = ShowtimeStatus> {
    prop_oneof![Just(ShowtimeStatus::Scheduled), Just(ShowtimeStatus::Hidden)]
}

/// Strategy for generating temporal categories
fn date_filter_strategy() -> impl Strategy<Value = DateFilter> {
    proptest::sample::select(DateFilter::ALL.to_vec())
}

/// Strategy for generating status filters
fn status_filter_strategy() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::All),
        Just(StatusFilter::Scheduled),
        Just(StatusFilter::Hidden)
    ]
}

/// Strategy for generating dates in May to July 2024
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..90).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(offset))
            .unwrap()
    })
}

/// Strategy for generating instants in the same range
fn now_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (date_strategy(), 0u32..24, 0u32..60).prop_map(|(date, hour, minute)| {
        Utc.from_utc_datetime(&date.and_hms_opt(hour, minute, 0).unwrap())
    })
}

/// Strategy for generating one showtime without an id
fn showtime_strategy() -> impl Strategy<Value = (NaiveDate, u32, u32, ShowtimeStatus, usize, usize)> {
    (date_strategy(), 0u32..22, 30u32..120, status_strategy(), 0..MOVIES.len(), 0..ROOMS.len())
}

/// Strategy for generating collections with ids 1..=n
fn showtimes_strategy(max: usize) -> impl Strategy<Value = Vec<Showtime>> {
    vec(showtime_strategy(), 0..max).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (date, hour, minutes, status, movie, room))| {
                let start = NaiveTime::from_hms_opt(hour, 0, 0).unwrap();
                let end = start + chrono::Duration::minutes(i64::from(minutes));
                let mut showtime = Showtime::new(
                    ShowtimeId::new(index as u64 + 1),
                    MovieRef(movie as u64),
                    RoomRef(room as u64),
                    date,
                    start,
                    end,
                );
                showtime.status = status;
                showtime.movie_name = Some(MOVIES[movie].to_string());
                showtime.room_name = Some(ROOMS[room].to_string());
                showtime
            })
            .collect()
    })
}

/// Strategy for generating filters
fn filters_strategy() -> impl Strategy<Value = Filters> {
    (
        prop_oneof![
            Just(String::new()),
            Just("avengers".to_string()),
            Just("DA LAT".to_string()),
            Just("phong".to_string()),
            Just("vip".to_string()),
        ],
        date_filter_strategy(),
        proptest::option::of(date_strategy()),
        status_filter_strategy(),
    )
        .prop_map(|(search, date_filter, custom_date, status_filter)| Filters {
            search,
            date_filter,
            custom_date,
            status_filter,
        })
}

fn engine_strategy() -> impl Strategy<Value = FilterEngine> {
    prop_oneof![Just(Weekday::Mon), Just(Weekday::Sun), Just(Weekday::Sat)]
        .prop_map(|week_start| FilterEngine::new(ScheduleCalendar::utc(week_start)))
}

fn is_subsequence(sub: &[Showtime], full: &[Showtime]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|wanted| rest.any(|candidate| candidate == wanted))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "[a-zA-Z0-9 àáạảãâầấậăằắèéẹêềếìíịòóọôồốơờớùúụưừứỳýđĐÀÉÊƠƯ]{0,24}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_ignores_case(text in "[a-zàáạâầấăằắèéêềếìíòóôồốơờớùúưừứđ ]{0,24}") {
        prop_assert_eq!(normalize(&text.to_uppercase()), normalize(&text));
    }

    #[test]
    fn status_all_matches_everything(showtimes in showtimes_strategy(20)) {
        for showtime in &showtimes {
            prop_assert!(matches_status(showtime, StatusFilter::All));
        }
    }

    #[test]
    fn filter_returns_ordered_subsequence(
        showtimes in showtimes_strategy(30),
        filters in filters_strategy(),
        now in now_strategy(),
        engine in engine_strategy(),
    ) {
        let result = engine.filter(&showtimes, &filters, now);
        prop_assert!(is_subsequence(&result, &showtimes));
    }

    #[test]
    fn today_and_tomorrow_are_exclusive(
        showtimes in showtimes_strategy(30),
        now in now_strategy(),
    ) {
        let engine = FilterEngine::default();
        let local: LocalNow = engine.local_now(now);
        let today = Filters { date_filter: DateFilter::Today, ..Filters::default() };
        let tomorrow = Filters { date_filter: DateFilter::Tomorrow, ..Filters::default() };
        for showtime in &showtimes {
            prop_assert!(
                !(engine.matches_date(showtime, &today, local)
                    && engine.matches_date(showtime, &tomorrow, local))
            );
        }
    }

    #[test]
    fn page_count_formula(len in 0usize..500, page_size in 1usize..50) {
        let items: Vec<usize> = (0..len).collect();
        let page = paginate(&items, page_size, 0);
        prop_assert_eq!(page.total_pages, std::cmp::max(1, len.div_ceil(page_size)));
        prop_assert_eq!(page.total_pages, total_pages(len, page_size));
    }

    #[test]
    fn sweep_hides_exactly_started_scheduled_showtimes(
        showtimes in showtimes_strategy(30),
        now in now_strategy(),
    ) {
        let local_now = now.naive_utc();
        let expected: Vec<ShowtimeId> = showtimes
            .iter()
            .filter(|s| s.status == ShowtimeStatus::Scheduled && s.starts_at() < local_now)
            .map(|s| s.id)
            .collect();

        let mut swept = showtimes.clone();
        let report = hide_expired(&mut swept, local_now);

        prop_assert_eq!(report.hidden_ids.iter().copied().collect::<Vec<_>>(), expected);
        for (before, after) in showtimes.iter().zip(&swept) {
            if report.hidden_ids.contains(&before.id) {
                prop_assert_eq!(after.status, ShowtimeStatus::Hidden);
            } else {
                prop_assert_eq!(after.status, before.status);
            }
        }
    }

    #[test]
    fn select_all_visible_selects_exactly_the_page(
        showtimes in showtimes_strategy(60),
        page_size in 1usize..15,
        page_index in 0usize..5,
    ) {
        let page = paginate(&showtimes, page_size, page_index);
        let page_ids: Vec<ShowtimeId> = page.items.iter().map(|s| s.id).collect();
        let mut selection = SelectionSet::new();

        selection.select_all_visible(&page_ids);

        let mut expected = page_ids.clone();
        expected.sort();
        prop_assert_eq!(selection.ids(), expected);
    }
}
