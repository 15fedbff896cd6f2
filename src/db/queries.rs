use anyhow::Context;
use chrono::NaiveDateTime;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection};

use crate::models::{
    Booking, BookingFilter, BookingRecord, Classification, DeviceType, Logistics, PreferredTime,
    ServiceRequested,
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const BOOKING_COLUMNS: &str = "id, full_name, whatsapp_number, student_id, device_type, brand_model, \
     service_requested, pickup_or_dropoff, preferred_time, notes, consent_photos_and_terms, \
     classification, priority, created_at";

// ── Bookings ──

pub fn insert_booking(
    conn: &Connection,
    id: &str,
    record: &BookingRecord,
    created_at: &NaiveDateTime,
) -> anyhow::Result<()> {
    let b = &record.booking;
    let preferred_time = b.preferred_time.map(|t| t.to_string());
    let created_at = created_at.format(TIME_FORMAT).to_string();

    conn.execute(
        &format!(
            "INSERT INTO bookings ({BOOKING_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        ),
        params![
            id,
            b.full_name,
            b.whatsapp_number,
            b.student_id,
            b.device_type.as_str(),
            b.brand_model,
            b.service_requested.as_str(),
            b.pickup_or_dropoff.as_str(),
            preferred_time,
            b.notes,
            b.consent_photos_and_terms,
            record.classification.as_str(),
            record.priority,
            created_at,
        ],
    )
    .context("failed to insert booking")?;
    Ok(())
}

pub fn list_bookings(
    conn: &Connection,
    filter: &BookingFilter,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let mut clauses: Vec<&str> = vec![];
    let mut params_vec: Vec<Box<dyn ToSql>> = vec![];

    if let Some(device_type) = &filter.device_type {
        params_vec.push(Box::new(device_type.clone()));
        clauses.push("device_type = ?");
    }
    if let Some(service_requested) = &filter.service_requested {
        params_vec.push(Box::new(service_requested.clone()));
        clauses.push("service_requested = ?");
    }
    if let Some(priority) = filter.priority {
        params_vec.push(Box::new(priority));
        clauses.push("priority = ?");
    }

    let mut sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" LIMIT ?");
    params_vec.push(Box::new(limit));

    let mut stmt = conn.prepare(&sql).context("failed to prepare booking query")?;
    let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt.query_map(params_refs.as_slice(), |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let device_type: String = row.get(4)?;
    let service_requested: String = row.get(6)?;
    let pickup_or_dropoff: String = row.get(7)?;
    let preferred_time: Option<String> = row.get(8)?;
    let classification: String = row.get(11)?;
    let created_at: String = row.get(13)?;

    Ok(Booking {
        id: row.get(0)?,
        full_name: row.get(1)?,
        whatsapp_number: row.get(2)?,
        student_id: row.get(3)?,
        device_type: DeviceType::parse(&device_type)
            .with_context(|| format!("unknown device_type in store: {device_type}"))?,
        brand_model: row.get(5)?,
        service_requested: ServiceRequested::parse(&service_requested)
            .with_context(|| format!("unknown service_requested in store: {service_requested}"))?,
        pickup_or_dropoff: Logistics::parse(&pickup_or_dropoff)
            .with_context(|| format!("unknown pickup_or_dropoff in store: {pickup_or_dropoff}"))?,
        preferred_time: preferred_time
            .map(|t| {
                PreferredTime::parse(&t).with_context(|| format!("invalid preferred_time in store: {t}"))
            })
            .transpose()?,
        notes: row.get(9)?,
        consent_photos_and_terms: row.get(10)?,
        classification: Classification::parse(&classification)
            .with_context(|| format!("unknown classification in store: {classification}"))?,
        priority: row.get(12)?,
        created_at: NaiveDateTime::parse_from_str(&created_at, TIME_FORMAT)
            .context("invalid created_at in store")?,
    })
}

// ── Diagnostics ──

pub fn ping(conn: &Connection) -> anyhow::Result<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .context("database did not answer")?;
    Ok(())
}

/// User tables, excluding SQLite internals and the migration ledger.
pub fn list_tables(conn: &Connection, limit: i64) -> anyhow::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_migrations'
         ORDER BY name LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| row.get::<_, String>(0))?;

    let mut names = vec![];
    for row in rows {
        names.push(row?);
    }
    Ok(names)
}
