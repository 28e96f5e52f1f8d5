use pretty_assertions::assert_eq;

use super::support::{at, listing_fields, RecordingPage};
use crate::directory::{Collection, MemoryDirectory};
use crate::feed::{FetchOutcome, ListingFeed};
use crate::models::{FieldValue, Identity};
use crate::page::{FormKind, GridId, Severity, View};
use crate::submit::{
    BorrowRequestForm, ListingForm, ListingSubmission, Marketplace, RequestSubmission,
    SubmitOutcome, LISTING_SUBMITTED_MESSAGE, LOGIN_REQUIRED_MESSAGE, REQUEST_SUBMITTED_MESSAGE,
    SUBMIT_FAILED_MESSAGE,
};

fn bike_form() -> ListingForm {
    ListingForm {
        name: "Road bike".to_string(),
        category: "vehicle".to_string(),
        price: "25".to_string(),
        condition: "Used".to_string(),
        description: "Lights included".to_string(),
        period: String::new(),
    }
}

fn listing_flow(
    market: Marketplace,
    view: View,
) -> (
    MemoryDirectory,
    RecordingPage,
    ListingSubmission<MemoryDirectory, RecordingPage>,
) {
    let directory = MemoryDirectory::new();
    let page = RecordingPage::on(view);
    let feed = ListingFeed::new(directory.clone(), page.clone());
    (directory, page, ListingSubmission::new(market, feed))
}

#[tokio::test]
async fn submitting_without_identity_writes_nothing() {
    let (directory, page, submission) = listing_flow(Marketplace::Sale, View::BuySell);

    let outcome = submission.submit(&bike_form()).await;

    assert_eq!(outcome, SubmitOutcome::LoginRequired);
    assert_eq!(directory.write_count(), 0);
    assert_eq!(
        page.last_notice(),
        Some((LOGIN_REQUIRED_MESSAGE.to_string(), Severity::Error))
    );
    assert!(page.log().listings.is_empty());
}

#[tokio::test]
async fn new_listing_appears_first_after_submission() {
    let (directory, page, submission) = listing_flow(Marketplace::Lending, View::LendBorrow);
    for (hour, name) in [(8, "Tent"), (9, "Projector")] {
        directory.seed(Collection::LendingItems, listing_fields(name, "other", 5.0), at(hour));
    }
    directory.sign_in_as(Identity::new("uid-9", Some("Mina".to_string())));

    let outcome = submission.submit(&bike_form()).await;

    assert!(outcome.is_written());
    assert_eq!(directory.len(Collection::LendingItems), 3);
    assert_eq!(
        page.card_names(GridId::LendingItems),
        ["Road bike", "Projector", "Tent"]
    );

    let grid = page.grid(GridId::LendingItems).unwrap();
    let card = &grid.cards()[0];
    assert_eq!(card.price, "$25 / day");
    assert_eq!(card.icon_class, "fas fa-bicycle");
    assert_eq!(card.seller, "Mina");

    let log = page.log();
    assert_eq!(
        log.notices,
        [(LISTING_SUBMITTED_MESSAGE.to_string(), Severity::Success)]
    );
    assert_eq!(log.resets, [FormKind::LendItem]);
    assert_eq!(log.hidden, [FormKind::LendItem]);
}

#[tokio::test]
async fn sale_submission_targets_sale_collection_only() {
    let (directory, _page, submission) = listing_flow(Marketplace::Sale, View::BuySell);
    directory.sign_in_as(Identity::new("uid-9", None));

    submission.submit(&bike_form()).await;

    assert_eq!(directory.len(Collection::SaleItems), 1);
    assert!(directory.is_empty(Collection::LendingItems));
    let stored = &directory.documents(Collection::SaleItems)[0];
    assert_eq!(stored.fields.get("period"), None);
}

#[tokio::test]
async fn owner_without_display_name_is_stored_as_anonymous() {
    let (directory, page, submission) = listing_flow(Marketplace::Sale, View::BuySell);
    directory.sign_in_as(Identity::new("uid-3", Some("  ".to_string())));

    submission.submit(&bike_form()).await;

    let stored = &directory.documents(Collection::SaleItems)[0];
    assert_eq!(
        stored.fields.get("sellerName"),
        Some(&FieldValue::String("Anonymous".to_string()))
    );
    assert_eq!(
        stored.fields.get("sellerId"),
        Some(&FieldValue::String("uid-3".to_string()))
    );
    assert!(stored.created_at().is_some());
    assert_eq!(page.card_names(GridId::SaleItems), ["Road bike"]);
}

#[tokio::test]
async fn write_failure_keeps_the_form() {
    let (directory, page, submission) = listing_flow(Marketplace::Sale, View::BuySell);
    directory.sign_in_as(Identity::new("uid-9", None));
    directory.set_fail_writes(true);

    let outcome = submission.submit(&bike_form()).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(directory.write_count(), 0);
    let log = page.log();
    assert_eq!(
        log.notices,
        [(SUBMIT_FAILED_MESSAGE.to_string(), Severity::Error)]
    );
    assert!(log.resets.is_empty());
    assert!(log.hidden.is_empty());
    assert!(log.listings.is_empty());
}

#[tokio::test]
async fn unparseable_price_aborts_before_writing() {
    let (directory, page, submission) = listing_flow(Marketplace::Sale, View::BuySell);
    directory.sign_in_as(Identity::new("uid-9", None));
    let form = ListingForm {
        price: "a lot".to_string(),
        ..bike_form()
    };

    let outcome = submission.submit(&form).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(directory.write_count(), 0);
    assert_eq!(page.last_notice().map(|(_, severity)| severity), Some(Severity::Error));
    assert!(page.log().hidden.is_empty());
}

#[tokio::test]
async fn borrow_request_is_written_and_listed() {
    let directory = MemoryDirectory::new();
    let page = RecordingPage::on(View::Requests);
    let submission = RequestSubmission::new(ListingFeed::new(directory.clone(), page.clone()));
    directory.sign_in_as(Identity::new("uid-4", Some("Tomas".to_string())));

    let outcome = submission
        .submit(&BorrowRequestForm {
            item_name: "Camping stove".to_string(),
            duration_days: "2".to_string(),
            max_price: "6".to_string(),
            description: "Weekend trip".to_string(),
        })
        .await;

    assert!(outcome.is_written());
    assert_eq!(directory.len(Collection::BorrowRequests), 1);
    let log = page.log();
    assert_eq!(
        log.notices,
        [(REQUEST_SUBMITTED_MESSAGE.to_string(), Severity::Success)]
    );
    assert_eq!(log.hidden, [FormKind::BorrowRequest]);
    let cards = log.requests.last().unwrap().cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].requester, "Tomas");
    assert_eq!(cards[0].budget, "up to $6 / day");
}

#[tokio::test]
async fn submission_completes_after_grid_unmounts() {
    let directory = MemoryDirectory::new();
    let page = RecordingPage::on(View::BuySell);
    let feed = ListingFeed::new(directory.clone(), page.clone());
    let submission = ListingSubmission::new(Marketplace::Sale, feed.clone());
    directory.sign_in_as(Identity::new("uid-9", Some("Mina".to_string())));

    // The user left for another view while the form was still open
    page.unmount(GridId::SaleItems);
    page.navigate(View::Browse);

    let outcome = submission.submit(&bike_form()).await;

    assert!(outcome.is_written());
    assert_eq!(directory.len(Collection::SaleItems), 1);
    {
        let log = page.log();
        assert_eq!(
            log.notices,
            [(LISTING_SUBMITTED_MESSAGE.to_string(), Severity::Success)]
        );
        assert_eq!(log.resets, [FormKind::SellItem]);
        assert_eq!(log.hidden, [FormKind::SellItem]);
        assert!(log.listings.is_empty());
    }
    assert_eq!(
        feed.fetch_items(Collection::SaleItems, GridId::SaleItems).await,
        FetchOutcome::Detached
    );
}
