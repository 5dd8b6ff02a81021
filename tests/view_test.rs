use std::sync::Arc;

use chrono::{Duration, FixedOffset, NaiveDate};
use flight_log::engine::{ListingStatus, SortKey};
use flight_log::models::search::Catalog;
use flight_log::services::flight_service::FlightService;
use flight_log::services::search_service::SearchService;
use flight_log::utils::error::AppError;
use flight_log::utils::jwt::Session;
use flight_log::view::{FlightForm, FlightListView, FormError, Severity};

mod common;
use common::{at, record, utc, FakeIndex, InMemoryFlightStore};

fn sample_flights() -> Vec<flight_log::models::flight::FlightRecord> {
    let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
    vec![
        record(1, "Alice", ("YYZ", "YUL"), at(utc(), 2024, 1, 1, 10, 0), at(utc(), 2024, 1, 1, 12, 0)),
        record(2, "Bob", ("YUL", "YYZ"), at(utc(), 2024, 1, 2, 8, 0), at(utc(), 2024, 1, 2, 9, 0)),
        record(3, "Alice", ("YYZ", "LHR"), at(eastern, 2024, 1, 2, 23, 30), at(utc(), 2024, 1, 3, 11, 0)),
    ]
}

#[test]
fn test_load_success_sorts_by_default_and_notifies() {
    let mut view = FlightListView::new();
    view.load(Ok(sample_flights()));

    assert_eq!(view.filters().sort, SortKey::EarliestDeparture);
    assert_eq!(view.visible().iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(view.options().passengers, vec!["Alice", "Bob"]);

    let notice = view.take_notice().unwrap();
    assert_eq!(notice.severity, Severity::Success);
    assert!(view.take_notice().is_none());
}

#[test]
fn test_load_failure_shows_empty_list_and_error() {
    let mut view = FlightListView::new();
    view.load(Ok(sample_flights()));
    view.load(Err(AppError::DatabaseError("down".to_string())));

    assert!(view.visible().is_empty());
    assert_eq!(view.status(), ListingStatus::NoRecords);
    let notice = view.take_notice().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.message, "Failed to load your flights.");
}

#[test]
fn test_every_handler_keeps_the_whole_selection() {
    let mut view = FlightListView::new();
    view.load(Ok(sample_flights()));

    view.set_departure_date(NaiveDate::from_ymd_opt(2024, 1, 2));
    assert_eq!(view.visible().iter().map(|f| f.id).collect::<Vec<_>>(), vec![2, 3]);

    // a later filter change must not drop the date filter
    view.set_passenger(Some("Alice".to_string()));
    assert_eq!(view.visible().iter().map(|f| f.id).collect::<Vec<_>>(), vec![3]);

    view.set_sort(SortKey::LatestArrival);
    assert_eq!(view.visible().iter().map(|f| f.id).collect::<Vec<_>>(), vec![3]);

    view.set_arrival_airport(Some("YUL".to_string()));
    assert_eq!(view.status(), ListingStatus::NoMatches);

    view.set_arrival_airport(None);
    view.set_passenger(None);
    view.set_departure_date(None);
    assert_eq!(view.visible().iter().map(|f| f.id).collect::<Vec<_>>(), vec![3, 2, 1]);
}

#[test]
fn test_airline_handler_combines_with_other_filters() {
    let mut flights = sample_flights();
    flights[1].airline_name = "WestJet".to_string();
    flights[2].airline_name = "WestJet".to_string();

    let mut view = FlightListView::new();
    view.load(Ok(flights));
    assert_eq!(view.options().airlines, vec!["Air Canada", "WestJet"]);

    view.set_airline(Some("WestJet".to_string()));
    assert_eq!(view.visible().iter().map(|f| f.id).collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(view.status(), ListingStatus::Matches);

    view.set_passenger(Some("Alice".to_string()));
    assert_eq!(view.visible().iter().map(|f| f.id).collect::<Vec<_>>(), vec![3]);

    view.set_airline(Some("Porter Airlines".to_string()));
    assert!(view.visible().is_empty());
    assert_eq!(view.status(), ListingStatus::NoMatches);
    assert_eq!(view.filters().passenger.as_deref(), Some("Alice"));
}

#[tokio::test]
async fn test_refresh_threads_the_session() {
    let store = Arc::new(InMemoryFlightStore::default());
    let service = FlightService::new(store);
    let departure = at(utc(), 2024, 6, 1, 7, 0);
    service
        .add_flight(&Session::new(5), common::new_flight("Dana", departure, departure + Duration::hours(2)))
        .await
        .unwrap();

    let mut view = FlightListView::new();
    view.refresh(&service, &Session::new(5)).await;
    assert_eq!(view.visible().len(), 1);

    view.refresh(&service, &Session::new(6)).await;
    assert_eq!(view.status(), ListingStatus::NoRecords);
}

async fn filled_form(search: &SearchService) -> FlightForm {
    let mut form = FlightForm::new(FixedOffset::west_opt(5 * 3600).unwrap());
    form.passenger_name = "Alice".to_string();
    form.flight_number = "401".to_string();
    form.departure_time = "2024-01-02T23:30".to_string();
    form.arrival_time = "2024-01-03T01:00".to_string();

    form.airline.search("canada", search).await;
    let airline = form.airline.options()[0].clone();
    form.airline.select(Some(airline));

    form.departure_airport.search("pearson", search).await;
    let from = form.departure_airport.options()[0].clone();
    form.departure_airport.select(Some(from));

    form.arrival_airport.search("montreal", search).await;
    let to = form.arrival_airport.options()[0].clone();
    form.arrival_airport.select(Some(to));
    form
}

#[tokio::test]
async fn test_form_submit_builds_request_in_local_offset() {
    let search = SearchService::new(Arc::new(FakeIndex::with_catalogs()));
    let mut form = filled_form(&search).await;

    let request = form.submit().unwrap();

    assert_eq!(form.error(), None);
    assert_eq!(request.airline_id, "ac");
    assert_eq!(request.departure_airport_code, "YYZ");
    assert_eq!(request.arrival_airport_code, "YUL");
    assert_eq!(request.flight_number, 401);
    assert_eq!(request.departure_time.offset().local_minus_utc(), -5 * 3600);
    assert_eq!(request.departure_time.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
}

#[tokio::test]
async fn test_form_reports_missing_fields() {
    let search = SearchService::new(Arc::new(FakeIndex::with_catalogs()));
    let mut form = filled_form(&search).await;
    form.arrival_airport.select(None);

    assert_eq!(form.submit(), Err(FormError::MissingFields));
    assert_eq!(form.error(), Some("All fields are required."));
}

#[tokio::test]
async fn test_form_reports_time_order_and_number_errors() {
    let search = SearchService::new(Arc::new(FakeIndex::with_catalogs()));
    let mut form = filled_form(&search).await;

    form.arrival_time = "2024-01-02T23:30".to_string();
    assert_eq!(form.submit(), Err(FormError::ArrivalNotAfterDeparture));
    assert_eq!(form.error(), Some("Arrival time must be after departure time."));

    form.arrival_time = "2024-01-03T01:00".to_string();
    form.flight_number = "-3".to_string();
    assert_eq!(form.submit(), Err(FormError::InvalidFlightNumber));

    form.flight_number = "12".to_string();
    form.departure_time = "yesterday".to_string();
    assert_eq!(form.submit(), Err(FormError::InvalidDateTime("Departure time")));

    form.departure_time = "2024-01-02T23:30".to_string();
    assert!(form.submit().is_ok());
    assert_eq!(form.error(), None);
}

#[tokio::test]
async fn test_form_save_stores_through_service() {
    let search = SearchService::new(Arc::new(FakeIndex::with_catalogs()));
    let store = Arc::new(InMemoryFlightStore::default());
    let service = FlightService::new(store.clone());
    let mut form = filled_form(&search).await;

    let flight = form.save(&service, &Session::new(9)).await.unwrap();
    assert_eq!(flight.user_id, 9);
    assert_eq!(store.len().await, 1);

    let failing = FlightService::new(Arc::new(InMemoryFlightStore::failing()));
    let err = form.save(&failing, &Session::new(9)).await.unwrap_err();
    assert!(matches!(err, FormError::Rejected(AppError::DatabaseError(_))));
    assert!(form.error().is_some());
}

#[test]
fn test_form_fields_use_their_catalogs() {
    let form = FlightForm::new(utc());
    assert_eq!(form.airline.catalog(), Catalog::Airline);
    assert_eq!(form.departure_airport.catalog(), Catalog::Airport);
    assert_eq!(form.arrival_airport.catalog(), Catalog::Airport);
}
