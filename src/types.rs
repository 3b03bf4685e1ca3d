use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Theme
// =============================================================================

/// Appearance mode. Persisted as a plain string in settings.json.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn flip(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Light
    }
}

/// Where the active theme mode came from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    Persisted,
    System,
    Default,
}

/// Snapshot returned to the webview after theme reads and toggles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    pub mode: ThemeMode,
    pub is_transitioning: bool,
    pub source: ThemeSource,
}

/// Contents of ~/.salondesk/settings.json.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemeMode,
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub username: String,
    pub role: String,
}

/// Where the router should send the user for a given path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum RouteOutcome {
    Render { view: String },
    Redirect { to: String },
    NotFound,
}

// =============================================================================
// View state
// =============================================================================

/// Reporting window for the overview dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKey {
    Today,
    Week,
    Month,
}

impl Default for RangeKey {
    fn default() -> Self {
        RangeKey::Today
    }
}

/// Optional custom start/end pair carried alongside a range selection.
/// Presentation-only in this build; derivations key off `RangeKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Area,
    Pie,
}

impl Default for ChartType {
    fn default() -> Self {
        ChartType::Line
    }
}

/// Closed-set predicate over appointment status. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Confirmed,
    Pending,
    Cancelled,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl StatusFilter {
    /// Does the given status pass this filter?
    pub fn accepts(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Confirmed => status == AppointmentStatus::Confirmed,
            StatusFilter::Pending => status == AppointmentStatus::Pending,
            StatusFilter::Cancelled => status == AppointmentStatus::Cancelled,
        }
    }
}

/// Source-channel filter for the management calendar. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFilter {
    All,
    Ai,
    Phone,
    Online,
    Walkin,
}

impl Default for SourceFilter {
    fn default() -> Self {
        SourceFilter::All
    }
}

impl SourceFilter {
    pub fn accepts(&self, source: SourceChannel) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Ai => source == SourceChannel::Ai,
            SourceFilter::Phone => source == SourceChannel::Phone,
            SourceFilter::Online => source == SourceChannel::Online,
            SourceFilter::Walkin => source == SourceChannel::Walkin,
        }
    }
}

// =============================================================================
// Appointments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceChannel {
    Ai,
    Phone,
    Online,
    Walkin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub customer_name: String,
    pub service: String,
    pub date: NaiveDate,
    /// Wall-clock slot, "HH:MM".
    pub time: String,
    pub duration_minutes: u32,
    pub staff: String,
    pub status: AppointmentStatus,
    pub phone: String,
    pub email: String,
    pub source: SourceChannel,
    #[serde(default)]
    pub notes: String,
}

/// Editable subset of an appointment, held by the edit flow while in
/// `Editing`. Merging a draft never touches id or source channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    pub customer_name: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration_minutes: u32,
    pub staff: String,
    pub status: AppointmentStatus,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl From<&Appointment> for AppointmentDraft {
    fn from(apt: &Appointment) -> Self {
        AppointmentDraft {
            customer_name: apt.customer_name.clone(),
            service: apt.service.clone(),
            date: apt.date,
            time: apt.time.clone(),
            duration_minutes: apt.duration_minutes,
            staff: apt.staff.clone(),
            status: apt.status,
            phone: apt.phone.clone(),
            email: apt.email.clone(),
            notes: apt.notes.clone(),
        }
    }
}

/// Request payload for the quick booking form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickBooking {
    pub customer_name: String,
    pub service: String,
    pub date: NaiveDate,
    pub time: String,
    pub duration_minutes: u32,
    pub staff: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// One past visit in a customer's history panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerVisit {
    pub date: NaiveDate,
    pub service: String,
    pub staff: String,
    pub rating: u8,
    pub notes: String,
}

// =============================================================================
// Interactions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionOutcome {
    Booked,
    Interested,
    NotInterested,
}

/// One row in the "recent interactions" feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: String,
    pub customer_name: String,
    pub phone: String,
    pub message: String,
    pub sentiment: Sentiment,
    pub outcome: InteractionOutcome,
    pub time_ago: String,
}

// =============================================================================
// Derived presentation data
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// One summary metric tile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    pub title: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub trend: TrendDirection,
    pub trend_value: f64,
    pub icon: String,
    pub color: String,
    pub is_live: bool,
}

/// One sample in a range's metric series (hourly / daily / weekly bucket).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricPoint {
    pub label: String,
    pub messages: u32,
    pub satisfaction: f64,
    pub appointments: u32,
    pub revenue: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartesianPoint {
    pub x: String,
    pub messages: u32,
    pub appointments: u32,
    pub revenue: u32,
    pub satisfaction: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub name: String,
    pub value: u32,
}

/// Chart-ready series, re-keyed from the metric points for the selected
/// chart shape. Same numeric fields underneath in every case.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSeries {
    Cartesian {
        chart: ChartType,
        points: Vec<CartesianPoint>,
    },
    Pie {
        slices: Vec<PieSlice>,
    },
}

/// Static statistic card on the management sidebar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub trend: TrendDirection,
    pub trend_value: f64,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBooking {
    pub hour: String,
    pub bookings: u32,
    pub revenue: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayBooking {
    pub day: String,
    pub name: String,
    pub bookings: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceShare {
    pub name: String,
    /// Percentage of total bookings; shares sum to 100.
    pub value: u32,
    pub color: String,
}

// =============================================================================
// Notifications & live updates
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Payload of the periodic `live-metrics` event. Cosmetic jitter over the
/// base count for the active range; no consistency guarantee across ticks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMetrics {
    pub range: RangeKey,
    pub message_count: u32,
}

// =============================================================================
// Export
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Csv,
    Xlsx,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// A rendered export, returned to the webview for download.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_flip_round_trips() {
        assert_eq!(ThemeMode::Light.flip(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.flip().flip(), ThemeMode::Light);
    }

    #[test]
    fn test_theme_mode_wire_format() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let parsed: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, ThemeMode::Light);
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        // Closed enums: an out-of-set string fails deserialization instead
        // of falling through silently.
        assert!(serde_json::from_str::<StatusFilter>("\"archived\"").is_err());
        assert!(serde_json::from_str::<ChartType>("\"scatter\"").is_err());
        assert!(serde_json::from_str::<RangeKey>("\"quarter\"").is_err());
    }

    #[test]
    fn test_status_filter_all_accepts_everything() {
        for status in [
            AppointmentStatus::Confirmed,
            AppointmentStatus::Pending,
            AppointmentStatus::Cancelled,
            AppointmentStatus::Completed,
        ] {
            assert!(StatusFilter::All.accepts(status));
        }
    }

    #[test]
    fn test_status_filter_equality_semantics() {
        assert!(StatusFilter::Confirmed.accepts(AppointmentStatus::Confirmed));
        assert!(!StatusFilter::Confirmed.accepts(AppointmentStatus::Pending));
        // Completed passes no specific filter, only All.
        assert!(!StatusFilter::Cancelled.accepts(AppointmentStatus::Completed));
    }

    #[test]
    fn test_draft_from_appointment_copies_editable_fields() {
        let apt = Appointment {
            id: "apt-1".to_string(),
            customer_name: "Ana Martinez".to_string(),
            service: "Cut & Style".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
            time: "10:00".to_string(),
            duration_minutes: 60,
            staff: "Maria Garcia".to_string(),
            status: AppointmentStatus::Confirmed,
            phone: "+34 612 345 678".to_string(),
            email: "ana@example.com".to_string(),
            source: SourceChannel::Ai,
            notes: String::new(),
        };
        let draft = AppointmentDraft::from(&apt);
        assert_eq!(draft.customer_name, apt.customer_name);
        assert_eq!(draft.status, apt.status);
        assert_eq!(draft.duration_minutes, 60);
    }
}
