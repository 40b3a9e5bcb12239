use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use time::{Date, Duration, Month, OffsetDateTime};

use crate::app_state::AppState;
use crate::db::models::ProviderBooking;
use crate::db::repositories::BookingRepository;
use crate::error::AppResult;
use crate::middleware::AuthUser;
use crate::scheduling::day_bounds;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_earnings: Decimal,
    pub total_bookings: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub upcoming_bookings: Vec<ProviderBooking>,
    pub stats: DashboardStats,
}

/// Provider home: bookings for today and tomorrow plus current-month totals.
pub async fn provider_dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DashboardResponse>> {
    user.require_provider()?;

    let today = OffsetDateTime::now_utc().date();

    let (day_start, _) = day_bounds(today);
    let upcoming_bookings =
        BookingRepository::upcoming_for_provider(&state.db, user.id(), day_start, day_start + Duration::days(2))
            .await?;

    let (month_start, month_end) = month_bounds(today);
    let (total_bookings, total_earnings) =
        BookingRepository::stats_for_provider(&state.db, user.id(), month_start, month_end).await?;

    Ok(Json(DashboardResponse {
        upcoming_bookings,
        stats: DashboardStats {
            total_earnings,
            total_bookings,
        },
    }))
}

/// `[first of this month, first of next month)` in UTC.
fn month_bounds(today: Date) -> (OffsetDateTime, OffsetDateTime) {
    // Day 1 exists in every month; the fallback never fires.
    let start = Date::from_calendar_date(today.year(), today.month(), 1).unwrap_or(today);
    let (next_year, next_month) = match today.month() {
        Month::December => (today.year() + 1, Month::January),
        month => (today.year(), month.next()),
    };
    let end = Date::from_calendar_date(next_year, next_month, 1).unwrap_or(today);
    (start.midnight().assume_utc(), end.midnight().assume_utc())
}
