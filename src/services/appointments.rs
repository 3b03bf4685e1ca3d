// Appointment service — management-dashboard derivations and the details
// panel's edit flow. Everything operates on the in-memory appointment book;
// there is no durable storage behind it.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::SalonError;
use crate::types::{
    Appointment, AppointmentDraft, AppointmentStatus, HourlyBooking, QuickBooking, ServiceShare,
    SourceChannel, SourceFilter, StatCard, StatusFilter, TrendDirection, WeekdayBooking,
};

/// Combined filter set for the management calendar. Staff is free-form data,
/// not a closed enum; `None` means all staff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementFilters {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub staff: Option<String>,
    #[serde(default)]
    pub source: SourceFilter,
}

impl ManagementFilters {
    pub fn accepts(&self, apt: &Appointment) -> bool {
        let staff_ok = match self.staff.as_deref() {
            None => true,
            Some(wanted) => wanted.eq_ignore_ascii_case(&apt.staff),
        };
        self.status.accepts(apt.status) && self.source.accepts(apt.source) && staff_ok
    }
}

/// Apply the full management filter set, order-preserving.
pub fn filter_appointments(
    appointments: &[Appointment],
    filters: &ManagementFilters,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| filters.accepts(a))
        .cloned()
        .collect()
}

/// One column of the weekly calendar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Group appointments into the seven days of the week containing
/// `current_date`. Days keep their appointments sorted by slot time.
pub fn weekly_calendar(appointments: &[Appointment], current_date: NaiveDate) -> Vec<DaySchedule> {
    let monday = week_start(current_date);
    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let mut day: Vec<Appointment> = appointments
                .iter()
                .filter(|a| a.date == date)
                .cloned()
                .collect();
            day.sort_by(|a, b| a.time.cmp(&b.time));
            DaySchedule { date, appointments: day }
        })
        .collect()
}

// =============================================================================
// Edit flow
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Viewing,
    Editing,
}

/// Details-panel state machine: `Viewing -> Editing -> Viewing` on Save or
/// Cancel. Quick actions mutate status while staying in `Viewing`, except
/// Reschedule which enters `Editing`.
#[derive(Debug, Clone)]
pub struct EditFlow {
    original: Appointment,
    draft: AppointmentDraft,
    mode: EditMode,
}

impl EditFlow {
    pub fn open(appointment: Appointment) -> Self {
        let draft = AppointmentDraft::from(&appointment);
        EditFlow {
            original: appointment,
            draft,
            mode: EditMode::Viewing,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn appointment_id(&self) -> &str {
        &self.original.id
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn begin_edit(&mut self) {
        self.mode = EditMode::Editing;
    }

    /// Replace the draft wholesale; only meaningful while editing.
    pub fn update_draft(&mut self, draft: AppointmentDraft) {
        if self.mode == EditMode::Editing {
            self.draft = draft;
        }
    }

    /// Merge the draft into the record and return to `Viewing`.
    /// Id and source channel are never editable.
    pub fn save(&mut self) -> Appointment {
        self.original.customer_name = self.draft.customer_name.clone();
        self.original.service = self.draft.service.clone();
        self.original.date = self.draft.date;
        self.original.time = self.draft.time.clone();
        self.original.duration_minutes = self.draft.duration_minutes;
        self.original.staff = self.draft.staff.clone();
        self.original.status = self.draft.status;
        self.original.phone = self.draft.phone.clone();
        self.original.email = self.draft.email.clone();
        self.original.notes = self.draft.notes.clone();
        self.mode = EditMode::Viewing;
        self.original.clone()
    }

    /// Discard edits: reload the draft from the record, return to `Viewing`.
    pub fn cancel(&mut self) {
        self.draft = AppointmentDraft::from(&self.original);
        self.mode = EditMode::Viewing;
    }

    /// Quick action: set status directly without entering edit mode.
    pub fn set_status(&mut self, status: AppointmentStatus) -> Appointment {
        self.original.status = status;
        self.draft.status = status;
        self.original.clone()
    }

    /// Quick action: reschedule opens the full editor.
    pub fn reschedule(&mut self) {
        self.begin_edit();
    }
}

// =============================================================================
// Quick booking
// =============================================================================

/// Validate a quick-booking request and mint the appointment record.
/// New bookings start out `Pending` until staff confirm them.
pub fn create_booking(booking: QuickBooking) -> Result<Appointment, SalonError> {
    if booking.customer_name.trim().is_empty() {
        return Err(SalonError::InvalidBooking("customer name is required".to_string()));
    }
    if booking.service.trim().is_empty() {
        return Err(SalonError::InvalidBooking("service is required".to_string()));
    }
    if booking.duration_minutes == 0 {
        return Err(SalonError::InvalidBooking(
            "duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(Appointment {
        id: uuid::Uuid::new_v4().to_string(),
        customer_name: booking.customer_name.trim().to_string(),
        service: booking.service.trim().to_string(),
        date: booking.date,
        time: booking.time,
        duration_minutes: booking.duration_minutes,
        staff: booking.staff,
        status: AppointmentStatus::Pending,
        phone: booking.phone,
        email: booking.email,
        source: SourceChannel::Walkin,
        notes: String::new(),
    })
}

// =============================================================================
// Statistics & booking analytics
// =============================================================================

/// Sidebar statistic cards for the management dashboard.
pub fn statistics_cards() -> Vec<StatCard> {
    let card = |title: &str, value: &str, trend: TrendDirection, trend_value: f64, icon: &str| {
        StatCard {
            title: title.to_string(),
            value: value.to_string(),
            trend,
            trend_value,
            icon: icon.to_string(),
        }
    };
    vec![
        card("Today's Appointments", "24", TrendDirection::Up, 9.1, "Calendar"),
        card("Cancellation Rate", "8.5%", TrendDirection::Down, 1.2, "XCircle"),
        card("No-show Rate", "3.2%", TrendDirection::Down, 0.8, "UserX"),
        card("Average Ticket", "€2,450", TrendDirection::Up, 4.6, "Receipt"),
    ]
}

pub fn hourly_bookings() -> Vec<HourlyBooking> {
    let row = |hour: &str, bookings: u32, revenue: u32| HourlyBooking {
        hour: hour.to_string(),
        bookings,
        revenue,
    };
    vec![
        row("09:00", 12, 540),
        row("10:00", 18, 810),
        row("11:00", 22, 990),
        row("12:00", 15, 675),
        row("13:00", 8, 360),
        row("14:00", 20, 900),
        row("15:00", 25, 1125),
        row("16:00", 28, 1260),
        row("17:00", 24, 1080),
        row("18:00", 16, 720),
        row("19:00", 10, 450),
        row("20:00", 6, 270),
    ]
}

pub fn bookings_by_weekday() -> Vec<WeekdayBooking> {
    let row = |day: &str, name: &str, bookings: u32| WeekdayBooking {
        day: day.to_string(),
        name: name.to_string(),
        bookings,
    };
    vec![
        row("Mon", "Monday", 45),
        row("Tue", "Tuesday", 52),
        row("Wed", "Wednesday", 48),
        row("Thu", "Thursday", 61),
        row("Fri", "Friday", 68),
        row("Sat", "Saturday", 72),
        row("Sun", "Sunday", 28),
    ]
}

pub fn service_distribution() -> Vec<ServiceShare> {
    let slice = |name: &str, value: u32, color: &str| ServiceShare {
        name: name.to_string(),
        value,
        color: color.to_string(),
    };
    vec![
        slice("Haircut", 35, "#1565C0"),
        slice("Colour", 25, "#42A5F5"),
        slice("Styling", 20, "#90CAF9"),
        slice("Manicure", 12, "#E3F2FD"),
        slice("Treatment", 8, "#BBDEFB"),
    ]
}

/// Hour with the most bookings.
pub fn peak_hour() -> Option<HourlyBooking> {
    hourly_bookings().into_iter().max_by_key(|h| h.bookings)
}

/// Weekday with the most bookings.
pub fn busiest_day() -> Option<WeekdayBooking> {
    bookings_by_weekday().into_iter().max_by_key(|d| d.bookings)
}
