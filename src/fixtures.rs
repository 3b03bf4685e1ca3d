//! Sample data provider.
//!
//! The dashboard reads all of its entity data through [`DataProvider`] so a
//! real backend can be substituted later without touching view logic. This
//! build ships the in-memory fixture only.

use chrono::{Duration, Local, NaiveDate};

use crate::types::{
    Appointment, AppointmentStatus, CustomerVisit, Interaction, InteractionOutcome, RangeKey,
    Sentiment, SourceChannel,
};

/// Capability boundary between view logic and whatever backs the data.
pub trait DataProvider: Send + Sync {
    fn fetch_appointments(&self, range: RangeKey) -> Vec<Appointment>;
    fn fetch_interactions(&self, range: RangeKey) -> Vec<Interaction>;
    fn customer_history(&self, customer_name: &str) -> Vec<CustomerVisit>;
}

/// Static in-memory dataset standing in for a real backend.
pub struct InMemoryFixture;

impl DataProvider for InMemoryFixture {
    fn fetch_appointments(&self, _range: RangeKey) -> Vec<Appointment> {
        seed_appointments()
    }

    fn fetch_interactions(&self, _range: RangeKey) -> Vec<Interaction> {
        seed_interactions()
    }

    fn customer_history(&self, customer_name: &str) -> Vec<CustomerVisit> {
        // History exists only for customers seeded with past visits.
        if seed_appointments()
            .iter()
            .any(|a| a.customer_name == customer_name)
        {
            seed_customer_history()
        } else {
            Vec::new()
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn appointment(
    id: &str,
    customer_name: &str,
    service: &str,
    time: &str,
    duration_minutes: u32,
    staff: &str,
    status: AppointmentStatus,
    phone: &str,
    email: &str,
    source: SourceChannel,
    notes: &str,
) -> Appointment {
    Appointment {
        id: id.to_string(),
        customer_name: customer_name.to_string(),
        service: service.to_string(),
        date: today(),
        time: time.to_string(),
        duration_minutes,
        staff: staff.to_string(),
        status,
        phone: phone.to_string(),
        email: email.to_string(),
        source,
        notes: notes.to_string(),
    }
}

/// Today's appointment book: 2 confirmed, 2 pending, 1 cancelled.
pub fn seed_appointments() -> Vec<Appointment> {
    vec![
        appointment(
            "apt-1",
            "Ana Martinez",
            "Cut & Style",
            "10:00",
            60,
            "Maria Garcia",
            AppointmentStatus::Confirmed,
            "+34 612 345 678",
            "ana.martinez@example.com",
            SourceChannel::Ai,
            "Regular customer, prefers a classic look",
        ),
        appointment(
            "apt-2",
            "Carlos Rodriguez",
            "Color Treatment",
            "11:30",
            120,
            "Ana Lopez",
            AppointmentStatus::Pending,
            "+34 623 456 789",
            "carlos.rodriguez@example.com",
            SourceChannel::Phone,
            "First colour appointment, walk through the options",
        ),
        appointment(
            "apt-3",
            "Laura Fernandez",
            "Hair Treatment",
            "14:00",
            90,
            "Carmen Ruiz",
            AppointmentStatus::Confirmed,
            "+34 634 567 890",
            "laura.fernandez@example.com",
            SourceChannel::Ai,
            "Damaged hair, needs the intensive treatment",
        ),
        appointment(
            "apt-4",
            "Miguel Torres",
            "Men's Cut",
            "15:30",
            45,
            "Maria Garcia",
            AppointmentStatus::Cancelled,
            "+34 645 678 901",
            "miguel.torres@example.com",
            SourceChannel::Phone,
            "Cancelled, family emergency",
        ),
        appointment(
            "apt-5",
            "Patricia Silva",
            "Manicure",
            "16:00",
            30,
            "Carmen Ruiz",
            AppointmentStatus::Pending,
            "+34 656 789 012",
            "patricia.silva@example.com",
            SourceChannel::Online,
            "",
        ),
    ]
}

pub fn seed_interactions() -> Vec<Interaction> {
    let row = |id: &str,
               customer_name: &str,
               phone: &str,
               message: &str,
               sentiment: Sentiment,
               outcome: InteractionOutcome,
               time_ago: &str| Interaction {
        id: id.to_string(),
        customer_name: customer_name.to_string(),
        phone: phone.to_string(),
        message: message.to_string(),
        sentiment,
        outcome,
        time_ago: time_ago.to_string(),
    };

    vec![
        row(
            "int-1",
            "Sofia Lopez",
            "+34 612 345 678",
            "Hi, I'd like to book a cut and style for Friday afternoon.",
            Sentiment::Positive,
            InteractionOutcome::Booked,
            "5 min ago",
        ),
        row(
            "int-2",
            "David Garcia",
            "+34 623 456 789",
            "Do you have any colour slots this week? I need a change urgently.",
            Sentiment::Neutral,
            InteractionOutcome::Interested,
            "12 min ago",
        ),
        row(
            "int-3",
            "Carmen Ruiz",
            "+34 634 567 890",
            "I wasn't happy with the last service. The prices are too high for the quality.",
            Sentiment::Negative,
            InteractionOutcome::NotInterested,
            "25 min ago",
        ),
        row(
            "int-4",
            "Roberto Jimenez",
            "+34 645 678 901",
            "Excellent service, very professional. Can I book the same stylist as last time?",
            Sentiment::Positive,
            InteractionOutcome::Booked,
            "1 hour ago",
        ),
    ]
}

fn seed_customer_history() -> Vec<CustomerVisit> {
    let base = today();
    let visit = |days_back: i64, service: &str, staff: &str, rating: u8, notes: &str| CustomerVisit {
        date: base - Duration::days(days_back),
        service: service.to_string(),
        staff: staff.to_string(),
        rating,
        notes: notes.to_string(),
    };
    vec![
        visit(30, "Cut & Style", "Maria Garcia", 5, "Very happy with the result"),
        visit(55, "Color Treatment", "Ana Lopez", 4, "Successful colour change"),
        visit(96, "Hair Treatment", "Carmen Ruiz", 5, "Hydrating treatment"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_status_mix_matches_expected_counts() {
        let apts = seed_appointments();
        assert_eq!(apts.len(), 5);
        let count = |s: AppointmentStatus| apts.iter().filter(|a| a.status == s).count();
        assert_eq!(count(AppointmentStatus::Confirmed), 2);
        assert_eq!(count(AppointmentStatus::Pending), 2);
        assert_eq!(count(AppointmentStatus::Cancelled), 1);
    }

    #[test]
    fn test_seed_durations_are_positive() {
        assert!(seed_appointments().iter().all(|a| a.duration_minutes > 0));
    }

    #[test]
    fn test_fixture_returns_history_for_known_customer_only() {
        let fixture = InMemoryFixture;
        assert!(!fixture.customer_history("Ana Martinez").is_empty());
        assert!(fixture.customer_history("Nobody Inparticular").is_empty());
    }

    #[test]
    fn test_fixture_interactions_nonempty_for_every_range() {
        let fixture = InMemoryFixture;
        for range in [RangeKey::Today, RangeKey::Week, RangeKey::Month] {
            assert!(!fixture.fetch_interactions(range).is_empty());
        }
    }
}
