//! Daily briefing composition.
//!
//! The briefing is templated, not generated: it reads the practice snapshot
//! and the date, nothing else. Paragraphs are joined with the same delimiter
//! the model uses so the page renders both through one substitution.

use chrono::NaiveDate;

use crate::clients::PracticeSnapshot;
use crate::format::PARAGRAPH_DELIMITER;

/// Compose the briefing for today's date.
pub fn compose_today(snapshot: &PracticeSnapshot) -> String {
    compose(snapshot, chrono::Local::now().date_naive())
}

pub fn compose(snapshot: &PracticeSnapshot, date: NaiveDate) -> String {
    let mut paragraphs = vec![format!(
        "Good morning! Here's your briefing for {}.",
        date.format("%A, %B %-d")
    )];

    paragraphs.push(format!(
        "You have {} clients on the books and reviews are {}% compliant.",
        snapshot.total_clients,
        snapshot.compliance_rate()
    ));

    match snapshot.overdue_reviews {
        0 => paragraphs.push(
            "No annual reviews are overdue. Use the open time for proactive check-ins.".to_string(),
        ),
        1 => paragraphs.push(
            "1 annual review is overdue. Getting it scheduled today keeps the week clean."
                .to_string(),
        ),
        n => paragraphs.push(format!(
            "{} annual reviews are overdue. Start with the one that's been waiting longest.",
            n
        )),
    }

    paragraphs.push(
        "Priorities: clear the overdue reviews, then check in with anyone you haven't spoken to this quarter."
            .to_string(),
    );

    paragraphs.join(PARAGRAPH_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn test_briefing_carries_date_and_counts() {
        let text = compose(&PracticeSnapshot::fallback(), date());

        assert!(text.contains("Monday, March 3"));
        assert!(text.contains("6 clients"));
        assert!(text.contains("67% compliant"));
        assert!(text.contains("2 annual reviews are overdue"));
    }

    #[test]
    fn test_briefing_paragraphs_use_the_delimiter() {
        let text = compose(&PracticeSnapshot::fallback(), date());
        assert!(text.contains(PARAGRAPH_DELIMITER));
    }

    #[test]
    fn test_briefing_with_nothing_overdue() {
        let snapshot = PracticeSnapshot {
            total_clients: 8,
            overdue_reviews: 0,
        };
        let text = compose(&snapshot, date());

        assert!(text.contains("No annual reviews are overdue"));
        assert!(text.contains("100% compliant"));
    }

    #[test]
    fn test_briefing_with_one_overdue() {
        let snapshot = PracticeSnapshot {
            total_clients: 4,
            overdue_reviews: 1,
        };
        assert!(compose(&snapshot, date()).contains("1 annual review is overdue"));
    }
}
