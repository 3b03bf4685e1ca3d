pub mod auth;
mod commands;
pub mod error;
pub mod fixtures;
mod live;
pub mod notify;
pub mod services;
pub mod state;
pub mod theme;
pub mod types;

use std::sync::Arc;

use state::AppState;

pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_notification::init())
        .setup(|app| {
            use tauri::Manager;

            let state = Arc::new(AppState::new());
            app.manage(state.clone());

            // Simulated live feed: cosmetic counter jitter while the
            // overview page has real-time updates enabled.
            let ticker_state = state.clone();
            let ticker_handle = app.handle().clone();
            tauri::async_runtime::spawn(async move {
                live::run_live_ticker(ticker_state, ticker_handle).await;
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Theme
            commands::get_theme,
            commands::init_theme,
            commands::toggle_theme,
            // Auth & routing
            commands::login,
            commands::logout,
            commands::get_session,
            commands::resolve_route,
            // Overview dashboard
            commands::get_overview_data,
            commands::set_range,
            commands::set_chart_type,
            commands::set_status_filter,
            commands::set_real_time_enabled,
            commands::reset_overview_view,
            // Management dashboard
            commands::get_management_data,
            commands::set_management_filters,
            commands::set_current_date,
            commands::reset_management_view,
            // Appointment details
            commands::select_appointment,
            commands::begin_edit,
            commands::update_draft,
            commands::save_appointment,
            commands::cancel_edit,
            commands::confirm_appointment,
            commands::cancel_appointment,
            commands::reschedule_appointment,
            commands::get_edit_mode,
            // Quick booking & history
            commands::create_quick_booking,
            commands::get_customer_history,
            // Export
            commands::export_report,
            // Toasts
            commands::get_toasts,
            commands::dismiss_toast,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
