use crate::errors::{AppError, AppResult};
use crate::models::action_target::ActionTarget;
use crate::models::activity::{Activity, DayStatus};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, Result, Row, ToSql, params};

/// Filters for `list_activities`. Empty filter means the whole journal.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub date: Option<NaiveDate>,
    pub kind: Option<ActionTarget>,
    pub newest_first: bool,
}

fn conversion_error(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

pub fn map_row(row: &Row) -> Result<Activity> {
    let kind_str: String = row.get("kind")?;
    let kind = ActionTarget::from_kind_str(&kind_str)
        .ok_or_else(|| conversion_error(AppError::InvalidKind(kind_str.clone())))?;

    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    let time_str: String = row.get("time")?;
    let time = NaiveTime::parse_from_str(&time_str, "%H:%M:%S")
        .map_err(|_| conversion_error(AppError::InvalidDate(time_str.clone())))?;

    Ok(Activity {
        id: row.get("id")?,
        kind,
        date,
        time,
        location: row.get("location")?,
        lat: row.get("lat")?,
        lng: row.get("lng")?,
        photo: row.get("photo")?,
        created_at: row.get("created_at")?,
    })
}

/// Insert an activity and return its id.
pub fn insert_activity(conn: &Connection, a: &Activity) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO activities (kind, date, time, location, lat, lng, photo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;

    stmt.execute(params![
        a.kind.kind_str(),
        a.date_str(),
        a.time_str(),
        a.location,
        a.lat,
        a.lng,
        a.photo,
        a.created_at,
    ])?;

    Ok(conn.last_insert_rowid())
}

pub fn list_activities(conn: &Connection, filter: &ActivityFilter) -> AppResult<Vec<Activity>> {
    let mut query = String::from("SELECT * FROM activities");
    let mut conditions = Vec::new();
    let mut values: Vec<String> = Vec::new();

    if let Some(d) = filter.date {
        conditions.push("date = ?");
        values.push(d.format("%Y-%m-%d").to_string());
    }
    if let Some(k) = filter.kind {
        conditions.push("kind = ?");
        values.push(k.kind_str().to_string());
    }

    if !conditions.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&conditions.join(" AND "));
    }

    if filter.newest_first {
        query.push_str(" ORDER BY date DESC, time DESC, id DESC");
    } else {
        query.push_str(" ORDER BY date ASC, time ASC, id ASC");
    }

    let mut stmt = conn.prepare(&query)?;
    let params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
    let rows = stmt.query_map(params.as_slice(), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Check-in/check-out flags and activities for one day.
pub fn day_status(conn: &Connection, date: NaiveDate) -> AppResult<DayStatus> {
    let activities = list_activities(
        conn,
        &ActivityFilter {
            date: Some(date),
            ..ActivityFilter::default()
        },
    )?;
    Ok(DayStatus::from_activities(date, activities))
}
