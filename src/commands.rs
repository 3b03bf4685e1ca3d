// Tauri command layer. Commands stay thin: lock, delegate to a service,
// serialize. Fire-and-forget timers (theme transition, toast dismissal) are
// scheduled here so the stores themselves stay synchronous and testable.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tauri::State;

use crate::auth::resolve_route as resolve;
use crate::error::{SalonError, UiError};
use crate::notify::TOAST_DISMISS_MS;
use crate::services::analytics::{
    chart_series, filter_by_status, kpi_cards, live_message_count, metric_series,
};
use crate::services::appointments::{
    bookings_by_weekday, busiest_day, create_booking, filter_appointments, hourly_bookings,
    peak_hour, service_distribution, statistics_cards, weekly_calendar, DaySchedule, EditFlow,
    EditMode, ManagementFilters,
};
use crate::services::export;
use crate::state::AppState;
use crate::theme::TRANSITION_MS;
use crate::types::{
    Appointment, AppointmentDraft, AppointmentStatus, ChartSeries, ChartType, Credentials,
    CustomRange, CustomerVisit, ExportArtifact, ExportFormat, HourlyBooking, Interaction, KpiCard,
    QuickBooking, RangeKey, RouteOutcome, ServiceShare, SessionUser, StatCard, StatusFilter,
    ThemeSnapshot, Toast, ToastKind, WeekdayBooking,
};

/// p95 latency budget for hot read commands.
const READ_CMD_LATENCY_BUDGET_MS: u128 = 100;

fn poisoned() -> UiError {
    UiError::from(SalonError::LockPoisoned)
}

// =============================================================================
// Theme
// =============================================================================

#[tauri::command]
pub fn get_theme(state: State<'_, Arc<AppState>>) -> Result<ThemeSnapshot, UiError> {
    let theme = state.theme.lock().map_err(|_| poisoned())?;
    Ok(theme.snapshot())
}

/// Called once by the webview on startup with the OS colour-scheme
/// preference; only effective when nothing was persisted.
#[tauri::command]
pub fn init_theme(
    state: State<'_, Arc<AppState>>,
    prefers_dark: bool,
) -> Result<ThemeSnapshot, UiError> {
    let mut theme = state.theme.lock().map_err(|_| poisoned())?;
    theme.apply_system_preference(prefers_dark);
    Ok(theme.snapshot())
}

#[tauri::command]
pub fn toggle_theme(state: State<'_, Arc<AppState>>) -> Result<ThemeSnapshot, UiError> {
    let snapshot = {
        let mut theme = state.theme.lock().map_err(|_| poisoned())?;
        let gen = theme.toggle();

        let timer_state = state.inner().clone();
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(Duration::from_millis(TRANSITION_MS)).await;
            if let Ok(mut theme) = timer_state.theme.lock() {
                theme.end_transition(gen);
            }
        });

        theme.snapshot()
    };
    log::debug!("Theme toggled to {:?}", snapshot.mode);
    Ok(snapshot)
}

// =============================================================================
// Auth & routing
// =============================================================================

#[tauri::command]
pub fn login(
    state: State<'_, Arc<AppState>>,
    credentials: Credentials,
) -> Result<SessionUser, UiError> {
    let mut session = state.session.lock().map_err(|_| poisoned())?;
    session.login(credentials).map_err(UiError::from)
}

#[tauri::command]
pub fn logout(state: State<'_, Arc<AppState>>) -> Result<(), UiError> {
    let mut session = state.session.lock().map_err(|_| poisoned())?;
    session.logout();
    Ok(())
}

#[tauri::command]
pub fn get_session(state: State<'_, Arc<AppState>>) -> Result<Option<SessionUser>, UiError> {
    let session = state.session.lock().map_err(|_| poisoned())?;
    Ok(session.user().cloned())
}

#[tauri::command]
pub fn resolve_route(
    state: State<'_, Arc<AppState>>,
    path: String,
) -> Result<RouteOutcome, UiError> {
    let authenticated = state
        .session
        .lock()
        .map_err(|_| poisoned())?
        .is_authenticated();
    Ok(resolve(&path, authenticated))
}

// =============================================================================
// Overview dashboard
// =============================================================================

/// Everything the overview page renders, derived from current view state.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewData {
    pub selected_range: RangeKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_range: Option<CustomRange>,
    pub chart_type: ChartType,
    pub status_filter: StatusFilter,
    pub real_time_enabled: bool,
    pub live_message_count: u32,
    pub kpis: Vec<KpiCard>,
    pub chart: ChartSeries,
    pub appointments: Vec<Appointment>,
    pub interactions: Vec<Interaction>,
}

fn build_overview_data(state: &AppState) -> Result<OverviewData, UiError> {
    let view = state
        .overview
        .lock()
        .map_err(|_| poisoned())?
        .clone();

    let series = metric_series(view.selected_range);
    // The appointment list comes from the shared in-memory book, not the
    // provider, so edits made on the management page show up here too.
    let appointments = filter_by_status(&state.appointments(), view.status_filter);
    let interactions = state.data.fetch_interactions(view.selected_range);

    Ok(OverviewData {
        selected_range: view.selected_range,
        custom_range: view.custom_range,
        chart_type: view.chart_type,
        status_filter: view.status_filter,
        real_time_enabled: view.real_time_enabled,
        live_message_count: live_message_count(view.selected_range),
        kpis: kpi_cards(view.selected_range),
        chart: chart_series(view.chart_type, &series),
        appointments,
        interactions,
    })
}

#[tauri::command]
pub fn get_overview_data(state: State<'_, Arc<AppState>>) -> Result<OverviewData, UiError> {
    let started = std::time::Instant::now();
    let result = build_overview_data(&state);
    let elapsed_ms = started.elapsed().as_millis();
    if elapsed_ms > READ_CMD_LATENCY_BUDGET_MS {
        log::warn!(
            "get_overview_data exceeded latency budget: {}ms > {}ms",
            elapsed_ms,
            READ_CMD_LATENCY_BUDGET_MS
        );
    } else {
        log::debug!("get_overview_data completed in {}ms", elapsed_ms);
    }
    result
}

fn push_transient_toast(state: &Arc<AppState>, message: String) {
    let id = match state.toasts.lock() {
        Ok(mut toasts) => toasts.push(message, ToastKind::Info),
        Err(_) => return,
    };
    let timer_state = state.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(Duration::from_millis(TOAST_DISMISS_MS)).await;
        if let Ok(mut toasts) = timer_state.toasts.lock() {
            toasts.dismiss(id);
        }
    });
}

fn range_label(range: RangeKey) -> &'static str {
    match range {
        RangeKey::Today => "Today",
        RangeKey::Week => "This week",
        RangeKey::Month => "This month",
    }
}

fn chart_label(chart: ChartType) -> &'static str {
    match chart {
        ChartType::Line => "Line",
        ChartType::Bar => "Bar",
        ChartType::Area => "Area",
        ChartType::Pie => "Pie",
    }
}

#[tauri::command]
pub fn set_range(
    state: State<'_, Arc<AppState>>,
    range: RangeKey,
    custom: Option<CustomRange>,
) -> Result<OverviewData, UiError> {
    {
        let mut view = state.overview.lock().map_err(|_| poisoned())?;
        view.selected_range = range;
        view.custom_range = custom;
    }
    push_transient_toast(
        state.inner(),
        format!("Filter updated: {}", range_label(range)),
    );
    build_overview_data(&state)
}

#[tauri::command]
pub fn set_chart_type(
    state: State<'_, Arc<AppState>>,
    chart_type: ChartType,
) -> Result<OverviewData, UiError> {
    {
        let mut view = state.overview.lock().map_err(|_| poisoned())?;
        view.chart_type = chart_type;
    }
    push_transient_toast(
        state.inner(),
        format!("Chart type changed: {}", chart_label(chart_type)),
    );
    build_overview_data(&state)
}

#[tauri::command]
pub fn set_status_filter(
    state: State<'_, Arc<AppState>>,
    filter: StatusFilter,
) -> Result<OverviewData, UiError> {
    {
        let mut view = state.overview.lock().map_err(|_| poisoned())?;
        view.status_filter = filter;
    }
    build_overview_data(&state)
}

#[tauri::command]
pub fn set_real_time_enabled(
    state: State<'_, Arc<AppState>>,
    enabled: bool,
) -> Result<(), UiError> {
    let mut view = state.overview.lock().map_err(|_| poisoned())?;
    view.real_time_enabled = enabled;
    Ok(())
}

#[tauri::command]
pub fn reset_overview_view(state: State<'_, Arc<AppState>>) -> Result<(), UiError> {
    state.reset_overview_view();
    Ok(())
}

// =============================================================================
// Management dashboard
// =============================================================================

/// Everything the management page renders.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagementData {
    pub current_date: NaiveDate,
    pub filters: ManagementFilters,
    pub week: Vec<DaySchedule>,
    pub statistics: Vec<StatCard>,
    pub hourly_bookings: Vec<HourlyBooking>,
    pub bookings_by_weekday: Vec<WeekdayBooking>,
    pub service_distribution: Vec<ServiceShare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_hour: Option<HourlyBooking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_day: Option<WeekdayBooking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_appointment: Option<Appointment>,
}

fn build_management_data(state: &AppState) -> Result<ManagementData, UiError> {
    let view = state
        .management
        .lock()
        .map_err(|_| poisoned())?
        .clone();

    let book = state.appointments();
    let filtered = filter_appointments(&book, &view.filters);
    let selected = view
        .selected_appointment
        .as_ref()
        .and_then(|id| book.iter().find(|a| &a.id == id).cloned());

    Ok(ManagementData {
        current_date: view.current_date,
        filters: view.filters,
        week: weekly_calendar(&filtered, view.current_date),
        statistics: statistics_cards(),
        hourly_bookings: hourly_bookings(),
        bookings_by_weekday: bookings_by_weekday(),
        service_distribution: service_distribution(),
        peak_hour: peak_hour(),
        busiest_day: busiest_day(),
        selected_appointment: selected,
    })
}

#[tauri::command]
pub fn get_management_data(state: State<'_, Arc<AppState>>) -> Result<ManagementData, UiError> {
    build_management_data(&state)
}

#[tauri::command]
pub fn set_management_filters(
    state: State<'_, Arc<AppState>>,
    filters: ManagementFilters,
) -> Result<ManagementData, UiError> {
    {
        let mut view = state.management.lock().map_err(|_| poisoned())?;
        view.filters = filters;
    }
    build_management_data(&state)
}

#[tauri::command]
pub fn set_current_date(
    state: State<'_, Arc<AppState>>,
    date: NaiveDate,
) -> Result<ManagementData, UiError> {
    {
        let mut view = state.management.lock().map_err(|_| poisoned())?;
        view.current_date = date;
    }
    build_management_data(&state)
}

#[tauri::command]
pub fn reset_management_view(state: State<'_, Arc<AppState>>) -> Result<(), UiError> {
    state.reset_management_view();
    Ok(())
}

// =============================================================================
// Appointment details & edit flow
// =============================================================================

/// Select an appointment for the details panel (or clear the selection).
/// Selecting opens a fresh edit flow in `Viewing`.
#[tauri::command]
pub fn select_appointment(
    state: State<'_, Arc<AppState>>,
    id: Option<String>,
) -> Result<Option<Appointment>, UiError> {
    let mut view = state.management.lock().map_err(|_| poisoned())?;
    let mut editor = state.editor.lock().map_err(|_| poisoned())?;

    match id {
        None => {
            view.selected_appointment = None;
            *editor = None;
            Ok(None)
        }
        Some(id) => {
            let apt = state
                .appointments()
                .into_iter()
                .find(|a| a.id == id)
                .ok_or_else(|| UiError::from(SalonError::AppointmentNotFound(id.clone())))?;
            view.selected_appointment = Some(id);
            *editor = Some(EditFlow::open(apt.clone()));
            Ok(Some(apt))
        }
    }
}

fn with_editor<T>(
    state: &AppState,
    f: impl FnOnce(&mut EditFlow) -> T,
) -> Result<T, UiError> {
    let mut editor = state.editor.lock().map_err(|_| poisoned())?;
    match editor.as_mut() {
        Some(flow) => Ok(f(flow)),
        None => Err(UiError::new("No appointment selected")),
    }
}

#[tauri::command]
pub fn begin_edit(state: State<'_, Arc<AppState>>) -> Result<(), UiError> {
    with_editor(&state, |flow| flow.begin_edit())
}

#[tauri::command]
pub fn update_draft(
    state: State<'_, Arc<AppState>>,
    draft: AppointmentDraft,
) -> Result<(), UiError> {
    with_editor(&state, |flow| flow.update_draft(draft))
}

#[tauri::command]
pub fn save_appointment(state: State<'_, Arc<AppState>>) -> Result<Appointment, UiError> {
    let saved = with_editor(&state, |flow| flow.save())?;
    state.upsert_appointment(saved.clone());
    log::info!("Appointment {} updated", saved.id);
    Ok(saved)
}

#[tauri::command]
pub fn cancel_edit(state: State<'_, Arc<AppState>>) -> Result<(), UiError> {
    with_editor(&state, |flow| flow.cancel())
}

#[tauri::command]
pub fn confirm_appointment(state: State<'_, Arc<AppState>>) -> Result<Appointment, UiError> {
    let updated = with_editor(&state, |flow| flow.set_status(AppointmentStatus::Confirmed))?;
    state.upsert_appointment(updated.clone());
    Ok(updated)
}

#[tauri::command]
pub fn cancel_appointment(state: State<'_, Arc<AppState>>) -> Result<Appointment, UiError> {
    let updated = with_editor(&state, |flow| flow.set_status(AppointmentStatus::Cancelled))?;
    state.upsert_appointment(updated.clone());
    Ok(updated)
}

#[tauri::command]
pub fn reschedule_appointment(state: State<'_, Arc<AppState>>) -> Result<(), UiError> {
    with_editor(&state, |flow| flow.reschedule())
}

#[tauri::command]
pub fn get_edit_mode(state: State<'_, Arc<AppState>>) -> Result<Option<EditMode>, UiError> {
    let editor = state.editor.lock().map_err(|_| poisoned())?;
    Ok(editor.as_ref().map(|flow| flow.mode()))
}

// =============================================================================
// Quick booking & customer history
// =============================================================================

#[tauri::command]
pub fn create_quick_booking(
    state: State<'_, Arc<AppState>>,
    booking: QuickBooking,
) -> Result<Appointment, UiError> {
    let apt = create_booking(booking).map_err(UiError::from)?;
    state.upsert_appointment(apt.clone());
    log::info!("Quick booking created: {} at {}", apt.id, apt.time);
    Ok(apt)
}

#[tauri::command]
pub fn get_customer_history(
    state: State<'_, Arc<AppState>>,
    customer_name: String,
) -> Result<Vec<CustomerVisit>, UiError> {
    Ok(state.data.customer_history(&customer_name))
}

// =============================================================================
// Export
// =============================================================================

#[tauri::command]
pub fn export_report(
    state: State<'_, Arc<AppState>>,
    format: ExportFormat,
) -> Result<ExportArtifact, UiError> {
    let range = state
        .overview
        .lock()
        .map_err(|_| poisoned())?
        .selected_range;
    let series = metric_series(range);
    match export::export_report(format, range, &series) {
        Ok(artifact) => {
            log::info!("Export completed: {}", artifact.file_name);
            Ok(artifact)
        }
        Err(e) => {
            log::error!("Export failed ({}): {}", format, e);
            Err(UiError::from(e))
        }
    }
}

// =============================================================================
// Toasts
// =============================================================================

#[tauri::command]
pub fn get_toasts(state: State<'_, Arc<AppState>>) -> Result<Vec<Toast>, UiError> {
    let toasts = state.toasts.lock().map_err(|_| poisoned())?;
    Ok(toasts.active())
}

#[tauri::command]
pub fn dismiss_toast(state: State<'_, Arc<AppState>>, id: u64) -> Result<bool, UiError> {
    let mut toasts = state.toasts.lock().map_err(|_| poisoned())?;
    Ok(toasts.dismiss(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_data_reflects_view_state() {
        let state = AppState::new();
        {
            let mut view = state.overview.lock().unwrap();
            view.selected_range = RangeKey::Week;
            view.chart_type = ChartType::Area;
            view.status_filter = StatusFilter::Pending;
        }
        let data = build_overview_data(&state).unwrap();
        assert_eq!(data.selected_range, RangeKey::Week);
        assert_eq!(data.live_message_count, 1106);
        assert_eq!(data.kpis.len(), 4);
        assert_eq!(data.appointments.len(), 2);
        match data.chart {
            ChartSeries::Cartesian { chart, ref points } => {
                assert_eq!(chart, ChartType::Area);
                assert_eq!(points.len(), 7);
            }
            ChartSeries::Pie { .. } => panic!("area chart must be cartesian"),
        }
    }

    #[test]
    fn test_overview_reflects_in_memory_edits() {
        let state = AppState::new();
        {
            let mut view = state.overview.lock().unwrap();
            view.status_filter = StatusFilter::Confirmed;
        }
        let before = build_overview_data(&state).unwrap();
        assert_eq!(before.appointments.len(), 2);

        // Confirm a pending appointment through the edit flow; the overview
        // list must pick the change up on the next read.
        let apt = state
            .appointments()
            .into_iter()
            .find(|a| a.id == "apt-2")
            .unwrap();
        let mut flow = EditFlow::open(apt);
        state.upsert_appointment(flow.set_status(AppointmentStatus::Confirmed));

        let after = build_overview_data(&state).unwrap();
        assert_eq!(after.appointments.len(), 3);
    }

    #[test]
    fn test_management_data_filters_the_week() {
        let state = AppState::new();
        {
            let mut view = state.management.lock().unwrap();
            view.filters.status = StatusFilter::Cancelled;
        }
        let data = build_management_data(&state).unwrap();
        assert_eq!(data.week.len(), 7);
        let total: usize = data.week.iter().map(|d| d.appointments.len()).sum();
        assert_eq!(total, 1);
        assert_eq!(data.service_distribution.len(), 5);
    }
}
