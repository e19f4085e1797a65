//! Integration tests for the salon availability engine.
//!
//! Every test runs against the sample configuration in `./config/salon`
//! (Asia/Colombo, +05:30). Covered:
//! - Day availability with breaks, blocks and conflict resolution
//! - Schedule selection when rules overlap
//! - Slot matching across employees and services
//! - Employee status
//! - Output formatting and error cases

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use uuid::Uuid;

use salon_availability::availability::{AvailabilityEngine, OperatingZone};
use salon_availability::config::ConfigLoader;
use salon_availability::error::EngineError;
use salon_availability::models::{
    DayAvailabilityRequest, EmployeeMatch, SlotFormat, SlotMatchRequest, TimeInterval,
};
use salon_availability::store::MemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

const NADIA: &str = "11111111-1111-4111-8111-111111111111";
const KAMAL: &str = "22222222-2222-4222-8222-222222222222";
const PRIYA: &str = "33333333-3333-4333-8333-333333333333";
const RUWAN: &str = "44444444-4444-4444-8444-444444444444";

const HAIRCUT: &str = "aaaaaaaa-aaaa-4aaa-8aaa-aaaaaaaaaaaa";
const COLOUR: &str = "bbbbbbbb-bbbb-4bbb-8bbb-bbbbbbbbbbbb";
const MANICURE: &str = "cccccccc-cccc-4ccc-8ccc-cccccccccccc";

fn id(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn instant(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn create_test_engine() -> (ConfigLoader, AvailabilityEngine<MemoryStore>) {
    let config = ConfigLoader::load("./config/salon").expect("Failed to load config");
    let engine = config.engine().expect("Failed to load roster");
    (config, engine)
}

/// Renders intervals as local "HH:MM-HH:MM" for compact assertions.
fn clock(zone: &OperatingZone, intervals: impl IntoIterator<Item = TimeInterval>) -> Vec<String> {
    intervals
        .into_iter()
        .map(|i| format!("{}-{}", zone.format_clock(i.start), zone.format_clock(i.end)))
        .collect()
}

fn slot_request(services: &[&str], start: &str, end: &str) -> SlotMatchRequest {
    SlotMatchRequest {
        service_ids: services.iter().map(|s| s.to_string()).collect(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

fn match_for<'a>(matches: &'a [EmployeeMatch], employee: &str) -> Option<&'a EmployeeMatch> {
    matches.iter().find(|m| m.employee_id == id(employee))
}

// =============================================================================
// Day Availability
// =============================================================================

#[tokio::test]
async fn test_break_with_no_blocks() {
    let (_, engine) = create_test_engine();
    let day = engine
        .build_day_availability(id(NADIA), date("2024-07-01"))
        .await
        .unwrap();

    assert_eq!(clock(engine.zone(), [day.schedule]), vec!["09:00-17:00"]);
    assert!(day.onetime_blocks.is_empty());
    assert_eq!(
        clock(engine.zone(), day.breaks.iter().map(|b| b.interval)),
        vec!["12:00-13:00"]
    );
    assert_eq!(day.breaks[0].reason, "Lunch");
}

#[tokio::test]
async fn test_block_inside_break_splits_it() {
    let (_, engine) = create_test_engine();
    let day = engine
        .build_day_availability(id(NADIA), date("2024-07-02"))
        .await
        .unwrap();

    assert_eq!(
        clock(engine.zone(), day.onetime_blocks.iter().map(|b| b.interval)),
        vec!["12:30-12:45"]
    );
    assert_eq!(
        clock(engine.zone(), day.breaks.iter().map(|b| b.interval)),
        vec!["12:00-12:30", "12:45-13:00"]
    );
    assert!(day.breaks.iter().all(|b| b.reason == "Lunch"));
}

#[tokio::test]
async fn test_full_day_block_removes_break() {
    let (_, engine) = create_test_engine();
    let day = engine
        .build_day_availability(id(NADIA), date("2024-07-09"))
        .await
        .unwrap();

    assert!(day.breaks.is_empty());
    assert_eq!(day.onetime_blocks.len(), 1);
    assert_eq!(day.onetime_blocks[0].reason, "Sick leave");
    assert!(day.free_intervals().is_empty());
}

#[tokio::test]
async fn test_latest_schedule_row_wins() {
    let (_, engine) = create_test_engine();
    let schedule = engine
        .resolve_schedule(id(KAMAL), date("2024-07-01"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(schedule.valid_from, date("2024-06-01"));

    let day = engine
        .build_day_availability(id(KAMAL), date("2024-07-01"))
        .await
        .unwrap();
    assert_eq!(clock(engine.zone(), [day.schedule]), vec!["09:00-17:00"]);
}

#[tokio::test]
async fn test_older_schedule_applies_before_change() {
    let (_, engine) = create_test_engine();
    let day = engine
        .build_day_availability(id(KAMAL), date("2024-05-27"))
        .await
        .unwrap();
    assert_eq!(clock(engine.zone(), [day.schedule]), vec!["08:00-16:00"]);
}

#[tokio::test]
async fn test_no_schedule_for_weekday() {
    let (_, engine) = create_test_engine();
    let result = engine
        .build_day_availability(id(PRIYA), date("2024-07-01"))
        .await;

    match result {
        Err(err @ EngineError::NoScheduleForDate { .. }) => assert!(err.is_client_error()),
        other => panic!("Expected NoScheduleForDate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_employee() {
    let (_, engine) = create_test_engine();
    let result = engine
        .build_day_availability(Uuid::new_v4(), date("2024-07-01"))
        .await;
    assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
}

#[tokio::test]
async fn test_day_request_with_timestamp_date() {
    let (_, engine) = create_test_engine();
    let request = DayAvailabilityRequest {
        employee_id: NADIA.to_string(),
        // 19:00Z on 2024-07-01 is already Tuesday in Colombo.
        date: "2024-07-01T19:00:00Z".to_string(),
    };
    let day = engine.day_availability_for(&request).await.unwrap();
    assert_eq!(day.date, date("2024-07-02"));
}

#[tokio::test]
async fn test_day_availability_json_shape() {
    let (_, engine) = create_test_engine();
    let day = engine
        .build_day_availability(id(NADIA), date("2024-07-01"))
        .await
        .unwrap();
    let body: Value = serde_json::to_value(&day).unwrap();

    assert_eq!(body["date"], "2024-07-01");
    assert_eq!(body["employee_id"], NADIA);
    assert_eq!(body["schedule"]["start_time"], "2024-07-01T03:30:00Z");
    assert_eq!(body["schedule"]["end_time"], "2024-07-01T11:30:00Z");
    assert_eq!(body["onetime_blocks"], json!([]));
    assert_eq!(body["breaks"][0]["reason"], "Lunch");
}

#[tokio::test]
async fn test_day_availability_is_idempotent() {
    let (_, engine) = create_test_engine();
    let first = engine
        .build_day_availability(id(NADIA), date("2024-07-02"))
        .await
        .unwrap();
    let second = engine
        .build_day_availability(id(NADIA), date("2024-07-02"))
        .await
        .unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Slot Matching
// =============================================================================

#[tokio::test]
async fn test_match_window_around_break() {
    let (_, engine) = create_test_engine();
    let matches = engine
        .match_request(&slot_request(
            &[HAIRCUT],
            "2024-07-01T10:00:00+05:30",
            "2024-07-01T11:00:00+05:30",
        ))
        .await
        .unwrap();

    let kamal = match_for(&matches, KAMAL).expect("Kamal should match");
    assert_eq!(
        clock(engine.zone(), kamal.free_slots.iter().copied()),
        vec!["10:00-10:30", "10:45-11:00"]
    );
    assert_eq!(kamal.free_minutes(), 45);
    assert_eq!(kamal.free_hours(), Decimal::new(75, 2));

    let nadia = match_for(&matches, NADIA).expect("Nadia should match");
    assert_eq!(
        clock(engine.zone(), nadia.free_slots.iter().copied()),
        vec!["10:00-11:00"]
    );
}

#[tokio::test]
async fn test_match_skips_unscheduled_and_inactive() {
    let (_, engine) = create_test_engine();
    let matches = engine
        .match_request(&slot_request(
            &[HAIRCUT, MANICURE],
            "2024-07-01T10:00:00+05:30",
            "2024-07-01T11:00:00+05:30",
        ))
        .await
        .unwrap();

    let ids: Vec<Uuid> = matches.iter().map(|m| m.employee_id).collect();
    assert_eq!(ids, vec![id(NADIA), id(KAMAL)]);
    assert!(match_for(&matches, PRIYA).is_none());
    assert!(match_for(&matches, RUWAN).is_none());
}

#[tokio::test]
async fn test_match_subtracts_booked_slot() {
    let (_, engine) = create_test_engine();
    let matches = engine
        .match_request(&slot_request(
            &[COLOUR],
            "2024-07-01T13:30:00+05:30",
            "2024-07-01T16:00:00+05:30",
        ))
        .await
        .unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(
        clock(engine.zone(), matches[0].free_slots.iter().copied()),
        vec!["13:30-14:00", "15:00-16:00"]
    );
}

#[tokio::test]
async fn test_match_vetoed_by_block() {
    let (_, engine) = create_test_engine();
    let matches = engine
        .match_request(&slot_request(
            &[COLOUR],
            "2024-07-02T12:00:00+05:30",
            "2024-07-02T14:00:00+05:30",
        ))
        .await
        .unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_match_keeps_requested_service_order() {
    let (_, engine) = create_test_engine();
    let matches = engine
        .match_request(&slot_request(
            &[COLOUR, HAIRCUT, COLOUR],
            "2024-07-01T09:00:00+05:30",
            "2024-07-01T10:00:00+05:30",
        ))
        .await
        .unwrap();

    let nadia = match_for(&matches, NADIA).unwrap();
    assert_eq!(nadia.service_ids, vec![id(COLOUR), id(HAIRCUT)]);
    let kamal = match_for(&matches, KAMAL).unwrap();
    assert_eq!(kamal.service_ids, vec![id(HAIRCUT)]);
}

#[tokio::test]
async fn test_cross_midnight_window_is_rejected() {
    let (_, engine) = create_test_engine();
    let result = engine
        .match_request(&slot_request(
            &[HAIRCUT],
            "2024-07-01T23:00:00+05:30",
            "2024-07-02T00:00:00+05:30",
        ))
        .await;

    match result {
        Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "end_time"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reversed_window_is_rejected() {
    let (_, engine) = create_test_engine();
    let result = engine
        .match_request(&slot_request(
            &[HAIRCUT],
            "2024-07-01T11:00:00+05:30",
            "2024-07-01T10:00:00+05:30",
        ))
        .await;
    assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_empty_services_are_rejected() {
    let (_, engine) = create_test_engine();
    let result = engine
        .match_request(&slot_request(
            &[],
            "2024-07-01T10:00:00+05:30",
            "2024-07-01T11:00:00+05:30",
        ))
        .await;
    match result {
        Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "service_ids"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

// =============================================================================
// Formatting
// =============================================================================

#[tokio::test]
async fn test_clock_format_from_config() {
    let (config, engine) = create_test_engine();
    let matches = engine
        .match_request(&slot_request(
            &[HAIRCUT],
            "2024-07-01T10:00:00+05:30",
            "2024-07-01T11:00:00+05:30",
        ))
        .await
        .unwrap();

    let kamal = match_for(&matches, KAMAL).unwrap();
    let body = serde_json::to_value(kamal.formatted(engine.zone(), config.slot_format())).unwrap();
    assert_eq!(
        body,
        json!({
            "staffId": KAMAL,
            "serviceIds": [HAIRCUT],
            "availability": ["10:00-10:30", "10:45-11:00"],
        })
    );
}

#[tokio::test]
async fn test_timestamp_format_carries_local_offset() {
    let (_, engine) = create_test_engine();
    let matches = engine
        .match_request(&slot_request(
            &[HAIRCUT],
            "2024-07-01T10:00:00+05:30",
            "2024-07-01T11:00:00+05:30",
        ))
        .await
        .unwrap();

    let nadia = match_for(&matches, NADIA).unwrap();
    let body =
        serde_json::to_value(nadia.formatted(engine.zone(), SlotFormat::Timestamp)).unwrap();
    assert_eq!(
        body["availability"],
        json!([{
            "start": "2024-07-01T10:00:00+05:30",
            "end": "2024-07-01T11:00:00+05:30",
        }])
    );
}

// =============================================================================
// Employee Status
// =============================================================================

#[tokio::test]
async fn test_status_during_booking() {
    let (_, engine) = create_test_engine();
    let report = engine
        .employee_status(instant("2024-07-01T14:30:00+05:30"))
        .await
        .unwrap();

    assert_eq!(report.serving, vec![id(NADIA)]);
    assert_eq!(report.idle, vec![id(KAMAL)]);
    assert_eq!(report.out, vec![id(PRIYA)]);
}

#[tokio::test]
async fn test_status_during_break() {
    let (_, engine) = create_test_engine();
    let report = engine
        .employee_status(instant("2024-07-01T10:35:00+05:30"))
        .await
        .unwrap();

    assert!(report.serving.is_empty());
    assert_eq!(report.idle, vec![id(NADIA)]);
    assert_eq!(report.out, vec![id(KAMAL), id(PRIYA)]);
}

#[tokio::test]
async fn test_status_after_hours() {
    let (_, engine) = create_test_engine();
    let report = engine
        .employee_status(instant("2024-07-01T20:00:00+05:30"))
        .await
        .unwrap();

    assert!(report.serving.is_empty());
    assert!(report.idle.is_empty());
    assert_eq!(report.out, vec![id(NADIA), id(KAMAL), id(PRIYA)]);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_unknown_timezone_falls_back_to_offset() {
    let zone = OperatingZone::resolve("Asia/Atlantis", 330).unwrap();
    assert_eq!(zone.name(), "+05:30");
    let colombo = OperatingZone::resolve("Asia/Colombo", 330).unwrap();
    let d = date("2024-07-01");
    assert_eq!(zone.day_bounds(d), colombo.day_bounds(d));
}

#[tokio::test]
async fn test_employee_services_from_roster() {
    let (_, engine) = create_test_engine();
    let services = engine.employee_services(id(PRIYA)).await.unwrap();
    assert_eq!(services, vec![id(MANICURE), id(HAIRCUT)]);
}
