use crate::models::{MovieSchedule, NewShow};

/// Materialize a schedule template into concrete show drafts: one draft per
/// calendar date from `start_date` to `end_date` inclusive, per showtime
/// label, in date-major order with the showtime list order (and duplicates)
/// preserved. An empty or unparsable showtimes document yields zero drafts
/// rather than an error.
pub fn expand(schedule: &MovieSchedule) -> Vec<NewShow> {
    let times = parse_showtimes(&schedule.showtimes);
    if times.is_empty() {
        return Vec::new();
    }

    let mut drafts = Vec::new();
    let mut date = schedule.start_date;
    while date <= schedule.end_date {
        for time in &times {
            drafts.push(NewShow {
                venue_id: schedule.venue_id,
                schedule_id: schedule.id,
                movie_id: schedule.movie_id,
                show_date: date,
                show_time: time.clone(),
                silver_price: schedule.silver_price,
                gold_price: schedule.gold_price,
                vip_price: schedule.vip_price,
            });
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    drafts
}

fn parse_showtimes(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListingStatus;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn schedule(start: &str, end: &str, showtimes: &str) -> MovieSchedule {
        MovieSchedule {
            id: Uuid::new_v4(),
            venue_id: Uuid::new_v4(),
            movie_id: 550,
            start_date: start.parse::<NaiveDate>().unwrap(),
            end_date: end.parse::<NaiveDate>().unwrap(),
            showtimes: showtimes.to_string(),
            silver_price: Decimal::new(1500, 2),
            gold_price: Decimal::new(2500, 2),
            vip_price: Decimal::new(4000, 2),
            status: ListingStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn expands_every_date_time_combination_in_order() {
        let schedule = schedule("2026-01-01", "2026-01-02", r#"["09:00 AM","06:00 PM"]"#);
        let drafts = expand(&schedule);

        assert_eq!(drafts.len(), 4);
        let pairs: Vec<(String, &str)> = drafts
            .iter()
            .map(|d| (d.show_date.to_string(), d.show_time.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("2026-01-01".to_string(), "09:00 AM"),
                ("2026-01-01".to_string(), "06:00 PM"),
                ("2026-01-02".to_string(), "09:00 AM"),
                ("2026-01-02".to_string(), "06:00 PM"),
            ]
        );
    }

    #[test]
    fn drafts_carry_the_schedule_venue_movie_and_prices() {
        let schedule = schedule("2026-03-10", "2026-03-10", r#"["12:00 PM"]"#);
        let drafts = expand(&schedule);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].venue_id, schedule.venue_id);
        assert_eq!(drafts[0].schedule_id, schedule.id);
        assert_eq!(drafts[0].movie_id, 550);
        assert_eq!(drafts[0].silver_price, Decimal::new(1500, 2));
        assert_eq!(drafts[0].vip_price, Decimal::new(4000, 2));
    }

    #[test]
    fn duplicate_showtimes_are_preserved() {
        let schedule = schedule("2026-01-01", "2026-01-01", r#"["09:00 AM","09:00 AM"]"#);
        assert_eq!(expand(&schedule).len(), 2);
    }

    #[test]
    fn empty_showtimes_yield_zero_drafts() {
        let schedule = schedule("2026-01-01", "2026-01-05", "[]");
        assert!(expand(&schedule).is_empty());
    }

    #[test]
    fn unparsable_showtimes_yield_zero_drafts() {
        let schedule = schedule("2026-01-01", "2026-01-05", "09:00 AM, 12:00 PM");
        assert!(expand(&schedule).is_empty());
    }

    #[test]
    fn end_date_before_start_date_yields_zero_drafts() {
        let schedule = schedule("2026-01-05", "2026-01-01", r#"["09:00 AM"]"#);
        assert!(expand(&schedule).is_empty());
    }
}
