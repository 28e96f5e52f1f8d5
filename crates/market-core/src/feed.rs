//! Listing feed: fetch a collection and render it into a card grid.
//!
//! Every fetch is a fresh, unpaginated read ordered newest first. Fetches
//! for the same grid may overlap; each takes a generation ticket up front
//! and only the most recently started fetch is allowed to render.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::card::{Card, RequestCard};
use crate::directory::{Collection, OrderBy, RemoteDirectory};
use crate::models::{BorrowRequest, Document, Listing, RecordError};
use crate::page::{GridId, GridState, PageSurface};

/// Result of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Cards rendered (count)
    Rendered(usize),
    Empty,
    Failed,
    /// A newer fetch for the same grid started; this result was dropped
    Stale,
    /// The grid is not on the page
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    grid: GridId,
    generation: u64,
}

/// Latest fetch generation per grid
#[derive(Debug, Default)]
pub struct FetchGenerations {
    latest: RefCell<HashMap<GridId, u64>>,
}

impl FetchGenerations {
    pub fn begin(&self, grid: GridId) -> FetchTicket {
        let mut latest = self.latest.borrow_mut();
        let generation = latest.entry(grid).or_insert(0);
        *generation += 1;
        FetchTicket {
            grid,
            generation: *generation,
        }
    }

    #[must_use]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.borrow().get(&ticket.grid).copied() == Some(ticket.generation)
    }
}

#[derive(Clone)]
pub struct ListingFeed<D, P> {
    directory: D,
    page: P,
    generations: Rc<FetchGenerations>,
}

impl<D: RemoteDirectory, P: PageSurface> ListingFeed<D, P> {
    pub fn new(directory: D, page: P) -> Self {
        Self {
            directory,
            page,
            generations: Rc::new(FetchGenerations::default()),
        }
    }

    pub const fn directory(&self) -> &D {
        &self.directory
    }

    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Fetch listings from `collection` into `grid`.
    pub async fn fetch_items(&self, collection: Collection, grid: GridId) -> FetchOutcome {
        self.fetch_into::<Listing, Card>(collection, grid, |page, state| {
            page.render_listings(grid, state)
        })
        .await
    }

    /// Fetch borrow requests into the request grid.
    pub async fn fetch_requests(&self) -> FetchOutcome {
        self.fetch_into::<BorrowRequest, RequestCard>(
            Collection::BorrowRequests,
            GridId::Requests,
            |page, state| page.render_requests(state),
        )
        .await
    }

    async fn fetch_into<R, C>(
        &self,
        collection: Collection,
        grid: GridId,
        render: impl Fn(&P, GridState<C>) -> bool,
    ) -> FetchOutcome
    where
        R: for<'a> TryFrom<&'a Document, Error = RecordError>,
        C: for<'a> From<&'a R>,
    {
        let ticket = self.generations.begin(grid);
        if !render(&self.page, GridState::Loading) {
            return FetchOutcome::Detached;
        }

        let result = self
            .directory
            .query_documents(collection, OrderBy::newest_first())
            .await;

        if !self.generations.is_current(ticket) {
            tracing::debug!("Dropping stale {} fetch for {:?}", collection, grid);
            return FetchOutcome::Stale;
        }

        let (state, outcome) = match result {
            Ok(documents) => {
                let cards = to_cards::<R, C>(collection, &documents);
                if cards.is_empty() {
                    (GridState::Empty, FetchOutcome::Empty)
                } else {
                    let count = cards.len();
                    (GridState::Ready(cards), FetchOutcome::Rendered(count))
                }
            }
            Err(error) => {
                tracing::error!("Failed to fetch {}: {}", collection, error);
                (GridState::Failed, FetchOutcome::Failed)
            }
        };

        if render(&self.page, state) {
            outcome
        } else {
            FetchOutcome::Detached
        }
    }
}

/// Convert documents in order, skipping (and logging) malformed ones.
fn to_cards<R, C>(collection: Collection, documents: &[Document]) -> Vec<C>
where
    R: for<'a> TryFrom<&'a Document, Error = RecordError>,
    C: for<'a> From<&'a R>,
{
    documents
        .iter()
        .filter_map(|doc| match R::try_from(doc) {
            Ok(record) => Some(C::from(&record)),
            Err(error) => {
                tracing::warn!("Skipping malformed record in {}: {}", collection, error);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{DocumentId, FieldValue, Fields, CREATED_AT_FIELD};

    #[test]
    fn later_ticket_supersedes_earlier_one() {
        let generations = FetchGenerations::default();
        let first = generations.begin(GridId::SaleItems);
        assert!(generations.is_current(first));

        let second = generations.begin(GridId::SaleItems);
        assert!(!generations.is_current(first));
        assert!(generations.is_current(second));
    }

    #[test]
    fn tickets_are_tracked_per_grid() {
        let generations = FetchGenerations::default();
        let sale = generations.begin(GridId::SaleItems);
        let lending = generations.begin(GridId::LendingItems);
        assert!(generations.is_current(sale));
        assert!(generations.is_current(lending));
    }

    #[test]
    fn malformed_documents_are_skipped() {
        let mut good = Fields::new();
        good.insert("name".to_string(), FieldValue::from("Chair"));
        good.insert("price".to_string(), FieldValue::Integer(10));
        good.insert("sellerId".to_string(), FieldValue::from("uid-1"));
        good.insert(CREATED_AT_FIELD.to_string(), FieldValue::from(Utc::now()));

        let mut missing_price = good.clone();
        missing_price.remove("price");

        let documents = vec![
            Document::new(DocumentId::from("bad"), missing_price),
            Document::new(DocumentId::from("good"), good),
        ];
        let cards = to_cards::<Listing, Card>(Collection::SaleItems, &documents);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id.as_str(), "good");
        assert_eq!(cards[0].price, "$10");
    }
}
