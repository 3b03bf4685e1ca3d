//! Application state managed by Tauri.
//!
//! All state is Mutex-guarded and owned here; commands take `&AppState` and
//! services stay pure. View state is UI-local: each dashboard page gets its
//! own struct, reset to defaults when the page unmounts.

use std::sync::Mutex;

use chrono::{Local, NaiveDate};

use crate::auth::AuthSession;
use crate::fixtures::{DataProvider, InMemoryFixture};
use crate::notify::ToastCenter;
use crate::services::appointments::{EditFlow, ManagementFilters};
use crate::theme::{settings_path, ThemeStore};
use crate::types::{Appointment, ChartType, CustomRange, RangeKey, StatusFilter};

/// Filter state for the overview dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewViewState {
    pub selected_range: RangeKey,
    pub custom_range: Option<CustomRange>,
    pub chart_type: ChartType,
    pub status_filter: StatusFilter,
    pub real_time_enabled: bool,
}

impl Default for OverviewViewState {
    fn default() -> Self {
        OverviewViewState {
            selected_range: RangeKey::Today,
            custom_range: None,
            chart_type: ChartType::Line,
            status_filter: StatusFilter::All,
            real_time_enabled: true,
        }
    }
}

/// Filter state for the appointment-management page.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagementViewState {
    pub current_date: NaiveDate,
    pub filters: ManagementFilters,
    pub selected_appointment: Option<String>,
}

impl Default for ManagementViewState {
    fn default() -> Self {
        ManagementViewState {
            current_date: Local::now().date_naive(),
            filters: ManagementFilters::default(),
            selected_appointment: None,
        }
    }
}

pub struct AppState {
    pub theme: Mutex<ThemeStore>,
    pub session: Mutex<AuthSession>,
    pub overview: Mutex<OverviewViewState>,
    pub management: Mutex<ManagementViewState>,
    pub appointments: Mutex<Vec<Appointment>>,
    pub editor: Mutex<Option<EditFlow>>,
    pub toasts: Mutex<ToastCenter>,
    pub data: Box<dyn DataProvider>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_provider(Box::new(InMemoryFixture))
    }

    /// Build state over a specific data provider. Production uses the
    /// in-memory fixture; tests may substitute their own. The provider seeds
    /// the appointment book; afterwards the book is the single source of
    /// truth for both pages.
    pub fn with_provider(data: Box<dyn DataProvider>) -> Self {
        AppState {
            theme: Mutex::new(ThemeStore::load(settings_path())),
            session: Mutex::new(AuthSession::new()),
            overview: Mutex::new(OverviewViewState::default()),
            management: Mutex::new(ManagementViewState::default()),
            appointments: Mutex::new(data.fetch_appointments(RangeKey::Today)),
            editor: Mutex::new(None),
            toasts: Mutex::new(ToastCenter::new()),
            data,
        }
    }

    /// Snapshot the in-memory appointment book.
    pub fn appointments(&self) -> Vec<Appointment> {
        self.appointments
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Replace an appointment in the book by id. Returns false when absent.
    pub fn upsert_appointment(&self, updated: Appointment) -> bool {
        if let Ok(mut guard) = self.appointments.lock() {
            if let Some(existing) = guard.iter_mut().find(|a| a.id == updated.id) {
                *existing = updated;
            } else {
                guard.push(updated);
            }
            true
        } else {
            false
        }
    }

    /// Reset the overview page's view state (page unmount).
    pub fn reset_overview_view(&self) {
        if let Ok(mut guard) = self.overview.lock() {
            *guard = OverviewViewState::default();
        }
    }

    /// Reset the management page's view state and drop any open editor.
    pub fn reset_management_view(&self) {
        if let Ok(mut guard) = self.management.lock() {
            *guard = ManagementViewState::default();
        }
        if let Ok(mut guard) = self.editor.lock() {
            *guard = None;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppointmentStatus;

    #[test]
    fn test_view_state_defaults() {
        let overview = OverviewViewState::default();
        assert_eq!(overview.selected_range, RangeKey::Today);
        assert_eq!(overview.chart_type, ChartType::Line);
        assert_eq!(overview.status_filter, StatusFilter::All);
        assert!(overview.real_time_enabled);

        let management = ManagementViewState::default();
        assert_eq!(management.filters, ManagementFilters::default());
        assert!(management.selected_appointment.is_none());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let state = AppState::new();
        {
            let mut overview = state.overview.lock().unwrap();
            overview.selected_range = RangeKey::Month;
            overview.chart_type = ChartType::Pie;
            overview.status_filter = StatusFilter::Cancelled;
        }
        state.reset_overview_view();
        assert_eq!(*state.overview.lock().unwrap(), OverviewViewState::default());
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let state = AppState::new();
        let mut apt = state.appointments()[0].clone();
        apt.status = AppointmentStatus::Completed;
        assert!(state.upsert_appointment(apt.clone()));

        let book = state.appointments();
        assert_eq!(book.len(), 5);
        assert_eq!(
            book.iter().find(|a| a.id == apt.id).unwrap().status,
            AppointmentStatus::Completed
        );
    }

    #[test]
    fn test_upsert_appends_new_records() {
        let state = AppState::new();
        let mut apt = state.appointments()[0].clone();
        apt.id = "apt-new".to_string();
        state.upsert_appointment(apt);
        assert_eq!(state.appointments().len(), 6);
    }

    #[test]
    fn test_reset_management_drops_editor() {
        let state = AppState::new();
        let apt = state.appointments()[0].clone();
        *state.editor.lock().unwrap() = Some(EditFlow::open(apt));
        state.reset_management_view();
        assert!(state.editor.lock().unwrap().is_none());
    }
}
