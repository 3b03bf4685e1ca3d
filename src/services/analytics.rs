// Analytics service — derivations for the main overview dashboard.
// All functions here are pure: presented values are recomputed from the
// current filters on every call, never cached.

use crate::types::{
    Appointment, CartesianPoint, ChartSeries, ChartType, KpiCard, MetricPoint, PieSlice, RangeKey,
    StatusFilter, TrendDirection,
};

/// Base live-message count for each range. The live ticker perturbs this
/// with cosmetic jitter; the dashboard shows it as-is on load.
pub fn live_message_count(range: RangeKey) -> u32 {
    match range {
        RangeKey::Today => 127,
        RangeKey::Week => 1106,
        RangeKey::Month => 2635,
    }
}

fn point(label: &str, messages: u32, satisfaction: f64, appointments: u32, revenue: u32) -> MetricPoint {
    MetricPoint {
        label: label.to_string(),
        messages,
        satisfaction,
        appointments,
        revenue,
    }
}

/// Metric series for the selected range: 8 hourly points for today,
/// 7 daily points for the week, 4 weekly points for the month.
pub fn metric_series(range: RangeKey) -> Vec<MetricPoint> {
    match range {
        RangeKey::Today => vec![
            point("09:00", 15, 4.2, 3, 180),
            point("10:00", 23, 4.5, 5, 320),
            point("11:00", 18, 4.3, 4, 280),
            point("12:00", 31, 4.7, 7, 450),
            point("13:00", 25, 4.4, 6, 380),
            point("14:00", 28, 4.6, 8, 520),
            point("15:00", 22, 4.8, 5, 350),
            point("16:00", 35, 4.5, 9, 580),
        ],
        RangeKey::Week => vec![
            point("Mon", 145, 4.3, 28, 1850),
            point("Tue", 167, 4.5, 32, 2100),
            point("Wed", 134, 4.2, 25, 1650),
            point("Thu", 189, 4.7, 35, 2300),
            point("Fri", 201, 4.6, 38, 2450),
            point("Sat", 156, 4.4, 30, 1950),
            point("Sun", 98, 4.1, 22, 1400),
        ],
        RangeKey::Month => vec![
            point("Week 1", 580, 4.2, 115, 7200),
            point("Week 2", 645, 4.4, 128, 8100),
            point("Week 3", 712, 4.6, 142, 8900),
            point("Week 4", 698, 4.5, 138, 8700),
        ],
    }
}

struct KpiRow {
    messages: f64,
    messages_delta: f64,
    bookings: f64,
    bookings_delta: f64,
    satisfaction: f64,
    satisfaction_delta: f64,
    revenue: f64,
    revenue_delta: f64,
}

fn kpi_row(range: RangeKey) -> KpiRow {
    match range {
        RangeKey::Today => KpiRow {
            messages: 127.0,
            messages_delta: 12.5,
            bookings: 34.0,
            bookings_delta: 8.2,
            satisfaction: 4.7,
            satisfaction_delta: 3.1,
            revenue: 1250.0,
            revenue_delta: 5.7,
        },
        RangeKey::Week => KpiRow {
            messages: 1106.0,
            messages_delta: 15.3,
            bookings: 218.0,
            bookings_delta: 12.8,
            satisfaction: 4.5,
            satisfaction_delta: 2.4,
            revenue: 14650.0,
            revenue_delta: 8.9,
        },
        RangeKey::Month => KpiRow {
            messages: 2635.0,
            messages_delta: 18.7,
            bookings: 523.0,
            bookings_delta: 14.2,
            satisfaction: 4.4,
            satisfaction_delta: 1.8,
            revenue: 32900.0,
            revenue_delta: 11.5,
        },
    }
}

fn range_word(range: RangeKey) -> &'static str {
    match range {
        RangeKey::Today => "Today's",
        RangeKey::Week => "This Week's",
        RangeKey::Month => "This Month's",
    }
}

/// The four KPI tiles for the selected range: messages (live), bookings,
/// average satisfaction, revenue.
pub fn kpi_cards(range: RangeKey) -> Vec<KpiCard> {
    let row = kpi_row(range);
    let card = |title: String,
                value: f64,
                trend_value: f64,
                icon: &str,
                color: &str,
                suffix: Option<&str>,
                is_live: bool| KpiCard {
        title,
        value,
        suffix: suffix.map(str::to_string),
        trend: TrendDirection::Up,
        trend_value,
        icon: icon.to_string(),
        color: color.to_string(),
        is_live,
    };

    vec![
        card(
            format!("{} Messages", range_word(range)),
            row.messages,
            row.messages_delta,
            "MessageSquare",
            "blue",
            None,
            true,
        ),
        card(
            "Booked Appointments".to_string(),
            row.bookings,
            row.bookings_delta,
            "Calendar",
            "green",
            None,
            false,
        ),
        card(
            "Average Satisfaction".to_string(),
            row.satisfaction,
            row.satisfaction_delta,
            "Star",
            "yellow",
            Some("/5"),
            false,
        ),
        card(
            format!("{} Revenue", range_word(range)),
            row.revenue,
            row.revenue_delta,
            "DollarSign",
            "purple",
            Some("€"),
            false,
        ),
    ]
}

/// Re-key the metric points for the selected chart shape. Cartesian charts
/// keep per-point rows; the pie aggregates appointments into slices.
pub fn chart_series(chart: ChartType, points: &[MetricPoint]) -> ChartSeries {
    match chart {
        ChartType::Pie => ChartSeries::Pie {
            slices: points
                .iter()
                .map(|p| PieSlice {
                    name: p.label.clone(),
                    value: p.appointments,
                })
                .collect(),
        },
        ChartType::Line | ChartType::Bar | ChartType::Area => ChartSeries::Cartesian {
            chart,
            points: points
                .iter()
                .map(|p| CartesianPoint {
                    x: p.label.clone(),
                    messages: p.messages,
                    appointments: p.appointments,
                    revenue: p.revenue,
                    satisfaction: p.satisfaction,
                })
                .collect(),
        },
    }
}

/// Filter an appointment list by status. `All` is the identity.
pub fn filter_by_status(appointments: &[Appointment], filter: StatusFilter) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| filter.accepts(a.status))
        .cloned()
        .collect()
}
