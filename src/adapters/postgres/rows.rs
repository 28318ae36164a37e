//! Row decoding and shared loaders for the Postgres repositories.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Postgres, Row};
use uuid::Uuid;

use crate::domain::activity::{
    Activity, ActivityCategory, BookingInfo, Coordinates, Location, TimeOfDay,
};
use crate::domain::budget::{
    Budget, BudgetCategory, CategoryLedger, ExchangeRateSnapshot, ExpenseItem, PaymentMethod,
};
use crate::domain::foundation::{
    ActivityId, BudgetId, CurrencyCode, DomainError, ErrorCode, ExpenseId, PackingItemId,
    PackingListId, Timestamp, TripId, UserId,
};
use crate::domain::packing::{PackingCategory, PackingItem, PackingList, Priority, WeatherCondition};
use crate::domain::trip::{Itinerary, Trip, TripStatus};

/// Maps a driver error to `DatabaseError` with context.
pub(super) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::database(context, e)
}

/// Foreign-key violation, raised when writing under a trip that no longer exists.
pub(super) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

pub(super) fn trip_not_found(id: &TripId) -> DomainError {
    DomainError::not_found(ErrorCode::TripNotFound, "trip_id", id)
}

pub(super) fn budget_not_found(trip_id: &TripId) -> DomainError {
    DomainError::not_found(ErrorCode::BudgetNotFound, "trip_id", trip_id)
}

pub(super) fn packing_list_not_found(trip_id: &TripId) -> DomainError {
    DomainError::not_found(ErrorCode::PackingListNotFound, "trip_id", trip_id)
}

pub(super) fn expense_not_found(id: &ExpenseId) -> DomainError {
    DomainError::not_found(ErrorCode::ExpenseNotFound, "expense_id", id)
}

pub(super) fn item_not_found(id: &PackingItemId) -> DomainError {
    DomainError::not_found(ErrorCode::PackingItemNotFound, "item_id", id)
}

pub(super) fn activity_not_found(id: &ActivityId) -> DomainError {
    DomainError::not_found(ErrorCode::ActivityNotFound, "activity_id", id)
}

fn col<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database("Failed to decode column", format!("{}: {}", name, e)))
}

fn corrupt(what: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Stored {} is invalid: {}", what, err),
    )
}

fn to_u32(what: &str, value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|e| corrupt(what, e))
}

pub(super) fn day_param(day: u32) -> Result<i32, DomainError> {
    i32::try_from(day).map_err(|e| DomainError::validation("day", e.to_string()))
}

pub(super) fn quantity_param(quantity: u32) -> Result<i32, DomainError> {
    i32::try_from(quantity).map_err(|e| DomainError::validation("quantity", e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Trips
// ─────────────────────────────────────────────────────────────────────────────

pub(super) const TRIP_COLUMNS: &str = "id, user_id, title, description, start_date, end_date, \
     status, is_public, tags, destinations, budget_id, packing_list_id, created_at, updated_at";

pub(super) fn row_to_trip(row: &PgRow, itinerary: Itinerary) -> Result<Trip, DomainError> {
    let user_id: String = col(row, "user_id")?;
    let status: String = col(row, "status")?;
    Ok(Trip::reconstitute(
        TripId::from_uuid(col(row, "id")?),
        UserId::new(user_id).map_err(|e| corrupt("user id", e))?,
        col(row, "title")?,
        col(row, "description")?,
        col::<NaiveDate>(row, "start_date")?,
        col::<NaiveDate>(row, "end_date")?,
        status.parse::<TripStatus>().map_err(|e| corrupt("trip status", e))?,
        col(row, "is_public")?,
        col(row, "tags")?,
        col(row, "destinations")?,
        BudgetId::from_uuid(col(row, "budget_id")?),
        PackingListId::from_uuid(col(row, "packing_list_id")?),
        itinerary,
        Timestamp::from_datetime(col(row, "created_at")?),
        Timestamp::from_datetime(col(row, "updated_at")?),
    ))
}

/// Itinerary rows of the given trips, keyed by trip, in insertion order per day.
pub(super) async fn load_itineraries(
    conn: &mut PgConnection,
    trip_ids: &[Uuid],
) -> Result<Vec<(Uuid, Itinerary)>, DomainError> {
    let rows = sqlx::query(
        r#"
        SELECT trip_id, day, activity_id
        FROM itinerary_entries
        WHERE trip_id = ANY($1)
        ORDER BY trip_id, day, seq
        "#,
    )
    .bind(trip_ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error("Failed to fetch itinerary"))?;

    let mut grouped: Vec<(Uuid, Vec<(u32, ActivityId)>)> = Vec::new();
    for row in &rows {
        let trip_id: Uuid = col(row, "trip_id")?;
        let day = to_u32("itinerary day", col(row, "day")?)?;
        let activity_id = ActivityId::from_uuid(col(row, "activity_id")?);
        match grouped.last_mut() {
            Some((current, entries)) if *current == trip_id => entries.push((day, activity_id)),
            _ => grouped.push((trip_id, vec![(day, activity_id)])),
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(trip_id, entries)| (trip_id, Itinerary::from_entries(entries)))
        .collect())
}

pub(super) async fn load_trip(
    conn: &mut PgConnection,
    id: &TripId,
) -> Result<Option<Trip>, DomainError> {
    let row = sqlx::query(&format!("SELECT {} FROM trips WHERE id = $1", TRIP_COLUMNS))
        .bind(id.as_uuid())
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("Failed to fetch trip"))?;

    let Some(row) = row else {
        return Ok(None);
    };
    let itinerary = load_itineraries(conn, &[*id.as_uuid()])
        .await?
        .pop()
        .map(|(_, itinerary)| itinerary)
        .unwrap_or_default();
    row_to_trip(&row, itinerary).map(Some)
}

pub(super) async fn trip_exists(conn: &mut PgConnection, id: &TripId) -> Result<bool, DomainError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trips WHERE id = $1")
        .bind(id.as_uuid())
        .fetch_one(&mut *conn)
        .await
        .map_err(db_error("Failed to check trip existence"))?;
    Ok(count > 0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Budgets
// ─────────────────────────────────────────────────────────────────────────────

/// Locks a trip's budget row for the rest of the transaction and returns its id.
pub(super) async fn lock_budget(
    conn: &mut PgConnection,
    trip_id: &TripId,
) -> Result<Uuid, DomainError> {
    let row: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM budgets WHERE trip_id = $1 FOR UPDATE")
            .bind(trip_id.as_uuid())
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("Failed to lock budget"))?;
    row.map(|(id,)| id).ok_or_else(|| budget_not_found(trip_id))
}

pub(super) fn row_to_expense(row: &PgRow) -> Result<ExpenseItem, DomainError> {
    let method: String = col(row, "payment_method")?;
    Ok(ExpenseItem {
        id: ExpenseId::from_uuid(col(row, "id")?),
        description: col(row, "description")?,
        amount: col(row, "amount")?,
        date: col(row, "expense_date")?,
        payment_method: PaymentMethod::parse(&method).map_err(|e| corrupt("payment method", e))?,
        receipt: col(row, "receipt")?,
        notes: col(row, "notes")?,
    })
}

pub(super) async fn load_budget(
    conn: &mut PgConnection,
    trip_id: &TripId,
) -> Result<Option<Budget>, DomainError> {
    let row = sqlx::query(
        r#"
        SELECT id, trip_id, total_budget, currency, savings, emergency_fund,
               rate_from, rate_to, rate, rate_fetched_at, last_updated
        FROM budgets
        WHERE trip_id = $1
        "#,
    )
    .bind(trip_id.as_uuid())
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error("Failed to fetch budget"))?;

    let Some(row) = row else {
        return Ok(None);
    };
    let budget_id: Uuid = col(&row, "id")?;

    let category_rows = sqlx::query(
        "SELECT name, allocated, spent FROM budget_categories WHERE budget_id = $1",
    )
    .bind(budget_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error("Failed to fetch budget categories"))?;

    let expense_rows = sqlx::query(
        r#"
        SELECT id, category, description, amount, expense_date, payment_method, receipt, notes
        FROM expense_items
        WHERE budget_id = $1
        ORDER BY seq
        "#,
    )
    .bind(budget_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error("Failed to fetch expenses"))?;

    let mut ledgers: Vec<CategoryLedger> = Vec::with_capacity(category_rows.len());
    for category_row in &category_rows {
        let name: String = col(category_row, "name")?;
        let mut ledger = CategoryLedger::empty(
            name.parse::<BudgetCategory>()
                .map_err(|e| corrupt("budget category", e))?,
        );
        ledger.allocated = col(category_row, "allocated")?;
        ledger.spent = col(category_row, "spent")?;
        ledgers.push(ledger);
    }
    for expense_row in &expense_rows {
        let name: String = col(expense_row, "category")?;
        let category = name
            .parse::<BudgetCategory>()
            .map_err(|e| corrupt("expense category", e))?;
        let item = row_to_expense(expense_row)?;
        match ledgers.iter_mut().find(|ledger| ledger.name == category) {
            Some(ledger) => ledger.items.push(item),
            None => {
                let mut ledger = CategoryLedger::empty(category);
                ledger.items.push(item);
                ledgers.push(ledger);
            }
        }
    }

    let exchange_rate = match (
        col::<Option<String>>(&row, "rate_from")?,
        col::<Option<String>>(&row, "rate_to")?,
        col::<Option<Decimal>>(&row, "rate")?,
        col::<Option<DateTime<Utc>>>(&row, "rate_fetched_at")?,
    ) {
        (Some(from), Some(to), Some(rate), Some(fetched_at)) => Some(ExchangeRateSnapshot {
            from: CurrencyCode::new(from).map_err(|e| corrupt("currency", e))?,
            to: CurrencyCode::new(to).map_err(|e| corrupt("currency", e))?,
            rate,
            fetched_at,
        }),
        _ => None,
    };
    let currency: String = col(&row, "currency")?;

    Ok(Some(Budget::reconstitute(
        BudgetId::from_uuid(budget_id),
        TripId::from_uuid(col(&row, "trip_id")?),
        col(&row, "total_budget")?,
        CurrencyCode::new(currency).map_err(|e| corrupt("currency", e))?,
        ledgers,
        col(&row, "savings")?,
        col(&row, "emergency_fund")?,
        exchange_rate,
        Timestamp::from_datetime(col(&row, "last_updated")?),
    )))
}

/// Reads the budget back after a committed write.
pub(super) async fn reload_budget(
    conn: &mut PgConnection,
    trip_id: &TripId,
) -> Result<Budget, DomainError> {
    load_budget(conn, trip_id)
        .await?
        .ok_or_else(|| budget_not_found(trip_id))
}

// ─────────────────────────────────────────────────────────────────────────────
// Packing lists
// ─────────────────────────────────────────────────────────────────────────────

pub(super) const ITEM_COLUMNS: &str = "id, category, name, quantity, is_packed, notes, priority";

pub(super) fn row_to_item(row: &PgRow) -> Result<(PackingCategory, PackingItem), DomainError> {
    let category: String = col(row, "category")?;
    let priority: String = col(row, "priority")?;
    let item = PackingItem {
        id: PackingItemId::from_uuid(col(row, "id")?),
        name: col(row, "name")?,
        quantity: to_u32("quantity", col(row, "quantity")?)?,
        is_packed: col(row, "is_packed")?,
        notes: col(row, "notes")?,
        priority: Priority::parse(&priority).map_err(|e| corrupt("priority", e))?,
    };
    let category = category
        .parse::<PackingCategory>()
        .map_err(|e| corrupt("packing category", e))?;
    Ok((category, item))
}

pub(super) async fn load_packing_list(
    conn: &mut PgConnection,
    trip_id: &TripId,
) -> Result<Option<PackingList>, DomainError> {
    let row = sqlx::query(
        r#"
        SELECT id, trip_id, weather_considerations, special_requirements, last_updated
        FROM packing_lists
        WHERE trip_id = $1
        "#,
    )
    .bind(trip_id.as_uuid())
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error("Failed to fetch packing list"))?;

    let Some(row) = row else {
        return Ok(None);
    };
    let list_id: Uuid = col(&row, "id")?;

    let item_rows = sqlx::query(&format!(
        "SELECT {} FROM packing_items WHERE packing_list_id = $1 ORDER BY seq",
        ITEM_COLUMNS
    ))
    .bind(list_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error("Failed to fetch packing items"))?;

    let items = item_rows
        .iter()
        .map(row_to_item)
        .collect::<Result<Vec<_>, _>>()?;
    let weather = col::<Vec<String>>(&row, "weather_considerations")?
        .iter()
        .map(|w| w.parse::<WeatherCondition>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| corrupt("weather condition", e))?;

    Ok(Some(PackingList::reconstitute(
        PackingListId::from_uuid(list_id),
        TripId::from_uuid(col(&row, "trip_id")?),
        items,
        weather,
        col(&row, "special_requirements")?,
        Timestamp::from_datetime(col(&row, "last_updated")?),
    )))
}

// ─────────────────────────────────────────────────────────────────────────────
// Activities
// ─────────────────────────────────────────────────────────────────────────────

pub(super) const ACTIVITY_COLUMNS: &str = "id, trip_id, day, name, description, address, \
     latitude, longitude, start_time, end_time, cost, category, eco_rating, booking_required, \
     booking_provider, booking_url, booking_reference, notes, created_at, updated_at";

pub(super) fn row_to_activity(row: &PgRow) -> Result<Activity, DomainError> {
    let coordinates = match (
        col::<Option<f64>>(row, "latitude")?,
        col::<Option<f64>>(row, "longitude")?,
    ) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    };
    let booking_info = match (
        col::<Option<String>>(row, "booking_provider")?,
        col::<Option<String>>(row, "booking_url")?,
        col::<Option<String>>(row, "booking_reference")?,
    ) {
        (None, None, None) => None,
        (provider, url, reference) => Some(BookingInfo {
            provider,
            url,
            reference,
        }),
    };
    let start_time: String = col(row, "start_time")?;
    let end_time: String = col(row, "end_time")?;
    let category: String = col(row, "category")?;
    let eco_rating: i16 = col(row, "eco_rating")?;

    Ok(Activity::reconstitute(
        ActivityId::from_uuid(col(row, "id")?),
        TripId::from_uuid(col(row, "trip_id")?),
        to_u32("activity day", col(row, "day")?)?,
        col(row, "name")?,
        col(row, "description")?,
        Location {
            address: col(row, "address")?,
            coordinates,
        },
        start_time.parse::<TimeOfDay>().map_err(|e| corrupt("start time", e))?,
        end_time.parse::<TimeOfDay>().map_err(|e| corrupt("end time", e))?,
        col(row, "cost")?,
        category
            .parse::<ActivityCategory>()
            .map_err(|e| corrupt("activity category", e))?,
        u8::try_from(eco_rating).map_err(|e| corrupt("eco rating", e))?,
        col(row, "booking_required")?,
        booking_info,
        col(row, "notes")?,
        Timestamp::from_datetime(col(row, "created_at")?),
        Timestamp::from_datetime(col(row, "updated_at")?),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = include_str!("../../../migrations/0001_initial.sql");

    #[test]
    fn day_and_quantity_params_fit_integer_columns() {
        assert_eq!(day_param(1).unwrap(), 1);
        assert_eq!(day_param(i32::MAX as u32).unwrap(), i32::MAX);
        assert_eq!(quantity_param(12).unwrap(), 12);
    }

    #[test]
    fn params_above_integer_range_are_validation_errors() {
        let err = day_param(u32::MAX).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.field(), Some("day"));

        let err = quantity_param(i32::MAX as u32 + 1).unwrap_err();
        assert_eq!(err.field(), Some("quantity"));
    }

    #[test]
    fn negative_stored_counts_are_corrupt() {
        assert_eq!(to_u32("quantity", 3).unwrap(), 3);
        let err = to_u32("itinerary day", -1).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(err.message.contains("itinerary day"));
    }

    #[test]
    fn corrupt_names_the_stored_value() {
        let err = corrupt("trip status", "unknown variant");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Stored trip status is invalid: unknown variant");
    }

    #[test]
    fn non_database_errors_are_not_foreign_key_violations() {
        assert!(!is_foreign_key_violation(&sqlx::Error::RowNotFound));
        assert!(!is_foreign_key_violation(&sqlx::Error::PoolTimedOut));
    }

    #[test]
    fn not_found_helpers_carry_their_codes() {
        let trip_id = TripId::new();
        assert_eq!(trip_not_found(&trip_id).code, ErrorCode::TripNotFound);
        assert_eq!(budget_not_found(&trip_id).code, ErrorCode::BudgetNotFound);
        assert_eq!(packing_list_not_found(&trip_id).code, ErrorCode::PackingListNotFound);
        assert_eq!(
            activity_not_found(&ActivityId::new()).code,
            ErrorCode::ActivityNotFound
        );
    }

    #[test]
    fn stored_enum_names_round_trip() {
        for status in TripStatus::ALL {
            assert_eq!(status.as_str().parse::<TripStatus>().unwrap(), status);
        }
        for category in BudgetCategory::ALL {
            assert_eq!(category.as_str().parse::<BudgetCategory>().unwrap(), category);
        }
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::parse(method.as_str()).unwrap(), method);
        }
        for category in PackingCategory::ALL {
            assert_eq!(category.as_str().parse::<PackingCategory>().unwrap(), category);
        }
        for priority in Priority::ALL {
            assert_eq!(Priority::parse(priority.as_str()).unwrap(), priority);
        }
        for weather in WeatherCondition::ALL {
            assert_eq!(weather.as_str().parse::<WeatherCondition>().unwrap(), weather);
        }
        for category in ActivityCategory::ALL {
            assert_eq!(category.as_str().parse::<ActivityCategory>().unwrap(), category);
        }
    }

    #[test]
    fn stored_time_of_day_round_trips() {
        let time = TimeOfDay::new(9, 5).unwrap();
        assert_eq!(time.to_string().parse::<TimeOfDay>().unwrap(), time);
    }

    #[test]
    fn unknown_stored_names_are_rejected() {
        assert!("archived".parse::<TripStatus>().is_err());
        assert!("souvenirs".parse::<BudgetCategory>().is_err());
        assert!(PaymentMethod::parse("cheque").is_err());
        assert!(Priority::parse("urgent").is_err());
        assert!("foggy".parse::<WeatherCondition>().is_err());
    }

    #[test]
    fn column_lists_match_the_schema() {
        for columns in [TRIP_COLUMNS, ITEM_COLUMNS, ACTIVITY_COLUMNS] {
            for column in columns.split(',').map(str::trim) {
                assert!(SCHEMA.contains(column), "column {} missing from schema", column);
            }
        }
    }
}
