#![cfg(feature = "async")]

mod common;

use cashcrew_sdk::pages::{GroupPage, HomePage, ReportsPage};
use cashcrew_sdk::transport::Method;
use cashcrew_sdk::{AsyncCashCrew, CashCrewError, Lifetime, ReportFilter};
use common::{category_json, group_json, logged_in_sdk, tx_json, MockTransport};
use serde_json::json;

fn async_sdk(mock: &std::sync::Arc<MockTransport>) -> AsyncCashCrew {
    AsyncCashCrew::from_sdk(logged_in_sdk(mock, "tok"))
}

#[tokio::test]
async fn run_executes_on_blocking_pool() {
    let mock = MockTransport::new();
    mock.on(Method::Get, "/groups", 200, json!([group_json("g1", "Trip", vec![])]));
    let sdk = async_sdk(&mock);

    let groups = sdk.run(|s| s.groups().list()).await.unwrap();
    assert_eq!(groups[0].name, "Trip");
}

#[tokio::test]
async fn run_scoped_refuses_cancelled_lifetime() {
    let mock = MockTransport::new();
    let sdk = async_sdk(&mock);
    let lifetime = Lifetime::new();
    lifetime.cancel();

    let result = sdk.run_scoped(&lifetime, |s| s.groups().list()).await;
    assert!(matches!(result, Err(CashCrewError::Cancelled)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn loads_home_and_group_pages() {
    let mock = MockTransport::new();
    mock.on(Method::Get, "/groups", 200, json!([group_json("g1", "Trip", vec![])]));
    mock.on(Method::Get, "/groups/g1", 200, group_json("g1", "Trip", vec![]));
    mock.on(Method::Get, "/groups/g1/categories", 200, json!([category_json("c1", "Food", "g1")]));
    mock.on(
        Method::Get,
        "/transactions",
        200,
        json!([tx_json("t1", "expense", 9.0, "2025-06-01", "c1", "u1")]),
    );
    let sdk = async_sdk(&mock);

    let mut home = HomePage::new();
    assert!(sdk.load_home_page(&mut home).await.unwrap());
    assert_eq!(home.groups.items().len(), 1);

    let mut group = GroupPage::new("g1");
    assert!(sdk.load_group_page(&mut group).await.unwrap());
    assert_eq!(group.aggregates().total_expense(), 9.0);

    let mut reports = ReportsPage::new("g1", ReportFilter::default());
    assert!(sdk.load_reports_page(&mut reports).await.unwrap());
    assert_eq!(reports.report.loaded().unwrap().total_expense, 9.0);
}

#[tokio::test]
async fn closed_page_is_left_alone() {
    let mock = MockTransport::new();
    let sdk = async_sdk(&mock);
    let mut page = GroupPage::new("g1");
    page.unmount();

    assert!(!sdk.load_group_page(&mut page).await.unwrap());
    assert!(page.group.loaded().is_none());
    assert!(mock.requests().is_empty());
}
