use pretty_assertions::assert_eq;

use super::support::{at, listing_fields, request_fields, RecordingPage, ScriptedDirectory};
use crate::directory::{Collection, MemoryDirectory};
use crate::feed::{FetchOutcome, ListingFeed};
use crate::models::FieldValue;
use crate::page::{GridId, GridState, View};

fn feed_on(
    view: View,
) -> (
    MemoryDirectory,
    RecordingPage,
    ListingFeed<MemoryDirectory, RecordingPage>,
) {
    let directory = MemoryDirectory::new();
    let page = RecordingPage::on(view);
    let feed = ListingFeed::new(directory.clone(), page.clone());
    (directory, page, feed)
}

#[tokio::test]
async fn renders_one_card_per_record_newest_first() {
    let (directory, page, feed) = feed_on(View::BuySell);
    directory.seed(Collection::SaleItems, listing_fields("Kettle", "other", 8.0), at(9));
    directory.seed(Collection::SaleItems, listing_fields("Laptop", "electronics", 300.0), at(11));
    directory.seed(Collection::SaleItems, listing_fields("Atlas", "books", 15.5), at(10));

    let outcome = feed.fetch_items(Collection::SaleItems, GridId::SaleItems).await;

    assert_eq!(outcome, FetchOutcome::Rendered(3));
    assert_eq!(page.card_names(GridId::SaleItems), ["Laptop", "Atlas", "Kettle"]);

    let grid = page.grid(GridId::SaleItems).unwrap();
    let laptop = &grid.cards()[0];
    assert_eq!(laptop.icon_class, "fas fa-laptop");
    assert_eq!(laptop.bg_color, "#e3f2fd");
    assert_eq!(laptop.price, "$300");
    assert_eq!(grid.cards()[1].price, "$15.50");
}

#[tokio::test]
async fn shows_loading_before_results() {
    let (directory, page, feed) = feed_on(View::Browse);
    directory.seed(Collection::LendingItems, listing_fields("Tent", "other", 5.0), at(8));

    feed.fetch_items(Collection::LendingItems, GridId::LendingItems).await;

    let log = page.log();
    assert_eq!(log.listings.len(), 2);
    assert_eq!(log.listings[0], (GridId::LendingItems, GridState::Loading));
    assert!(matches!(log.listings[1].1, GridState::Ready(_)));
}

#[tokio::test]
async fn empty_collection_renders_empty_state() {
    let (_directory, page, feed) = feed_on(View::LendBorrow);

    let outcome = feed.fetch_items(Collection::LendingItems, GridId::LendingItems).await;

    assert_eq!(outcome, FetchOutcome::Empty);
    let state = page.grid(GridId::LendingItems).unwrap();
    assert_eq!(state, GridState::Empty);
    assert_eq!(
        state.placeholder(GridId::LendingItems),
        Some("No items available for lending yet.")
    );
}

#[tokio::test]
async fn read_failure_renders_error_state() {
    let (directory, page, feed) = feed_on(View::BuySell);
    directory.seed(Collection::SaleItems, listing_fields("Kettle", "other", 8.0), at(9));
    directory.set_fail_reads(true);

    let outcome = feed.fetch_items(Collection::SaleItems, GridId::SaleItems).await;

    assert_eq!(outcome, FetchOutcome::Failed);
    assert_eq!(page.grid(GridId::SaleItems), Some(GridState::Failed));
    assert!(page.log().notices.is_empty());
}

#[tokio::test]
async fn missing_grid_is_a_silent_no_op() {
    let (directory, page, feed) = feed_on(View::Home);
    directory.seed(Collection::SaleItems, listing_fields("Kettle", "other", 8.0), at(9));
    page.unmount(GridId::SaleItems);

    let outcome = feed.fetch_items(Collection::SaleItems, GridId::SaleItems).await;

    assert_eq!(outcome, FetchOutcome::Detached);
    assert!(page.log().listings.is_empty());
}

#[tokio::test]
async fn malformed_records_do_not_sink_the_grid() {
    let (directory, page, feed) = feed_on(View::BuySell);
    let mut broken = listing_fields("Broken", "books", 1.0);
    broken.insert("price".to_string(), FieldValue::from("free"));
    directory.seed(Collection::SaleItems, broken, at(12));
    directory.seed(Collection::SaleItems, listing_fields("Atlas", "books", 15.0), at(10));

    let outcome = feed.fetch_items(Collection::SaleItems, GridId::SaleItems).await;

    assert_eq!(outcome, FetchOutcome::Rendered(1));
    assert_eq!(page.card_names(GridId::SaleItems), ["Atlas"]);
}

#[tokio::test]
async fn requests_render_as_request_cards() {
    let (directory, page, feed) = feed_on(View::Requests);
    directory.seed(Collection::BorrowRequests, request_fields("Calculator", 1), at(9));
    directory.seed(Collection::BorrowRequests, request_fields("Drill", 4), at(10));

    let outcome = feed.fetch_requests().await;

    assert_eq!(outcome, FetchOutcome::Rendered(2));
    let log = page.log();
    let cards = log.requests.last().unwrap().cards();
    assert_eq!(cards[0].item_name, "Drill");
    assert_eq!(cards[0].duration, "4 days");
    assert_eq!(cards[1].duration, "1 day");
    assert_eq!(cards[1].budget, "up to $3 / day");
}

#[tokio::test]
async fn stale_fetch_result_is_dropped() {
    let memory = MemoryDirectory::new();
    memory.seed(Collection::SaleItems, listing_fields("Kettle", "other", 8.0), at(9));
    let directory = ScriptedDirectory::new(memory.clone());
    let page = RecordingPage::on(View::BuySell);
    let feed = ListingFeed::new(directory.clone(), page.clone());

    directory.hold_next_query();
    let (first, second) = tokio::join!(
        feed.fetch_items(Collection::SaleItems, GridId::SaleItems),
        async {
            memory.seed(Collection::SaleItems, listing_fields("Lamp", "furniture", 4.0), at(10));
            let outcome = feed.fetch_items(Collection::SaleItems, GridId::SaleItems).await;
            directory.release();
            outcome
        }
    );

    assert_eq!(first, FetchOutcome::Stale);
    assert_eq!(second, FetchOutcome::Rendered(2));
    assert_eq!(page.card_names(GridId::SaleItems), ["Lamp", "Kettle"]);
    assert_eq!(page.log().listings.len(), 3);
}
