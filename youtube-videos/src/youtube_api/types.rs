//! Shared types and pagination infrastructure for the Data API client.

use crate::error::RetrievalError;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::{Stream, StreamExt};

/// One page of results: the items on it and the token for the page after it, if any.
pub type Page<T> = (VecDeque<T>, Option<String>);

type OneFuturePage<'a, F, T> =
    Pin<Box<dyn Future<Output = Result<(F, Page<T>), RetrievalError>> + 'a + Send>>;

/// A paginated stream that fetches subsequent pages from a Data API list endpoint on demand.
///
/// Items are yielded one by one. The next page is only requested once every item of the
/// current page has been consumed, so a consumer that stops early never causes extra
/// requests. Only forward pagination is supported.
///
/// The first request is not issued until the stream is first polled.
///
/// Caps are applied from outside with [`StreamExt::take`] (see [`collect_capped`]). Because a
/// page's continuation token is only turned into a request once that page is drained, a cap
/// that lands exactly on a page boundary never fetches the following page. A cap that lands
/// mid-page leaves the rest of that page unread. Pages are never sized to fit the cap.
pub struct PagedStream<'a, T, F> {
    /// Items from the most recent page that have not been yielded yet
    current_items: VecDeque<T>,
    /// The request for the next page, if there is one
    pending_request: Option<OneFuturePage<'a, F, T>>,
    /// Whether the last page has been seen (or a request failed)
    is_done: bool,
}

impl<'a, T, F> PagedStream<'a, T, F> {
    /// Creates a stream that calls `fetcher` with `None` for the first page, and with the
    /// previous page's continuation token for every page after that.
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = Result<Page<T>, RetrievalError>> + Send + 'a,
    {
        let first_page = async move {
            let results = fetcher(None).await?;
            Ok((fetcher, results))
        };
        Self {
            pending_request: Some(Box::pin(first_page)),
            current_items: VecDeque::new(),
            is_done: false,
        }
    }
}

impl<'a, T: Unpin, F> Unpin for PagedStream<'a, T, F> {}

impl<'a, T: Unpin, F, Fut> Stream for PagedStream<'a, T, F>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = Result<Page<T>, RetrievalError>> + Send + 'a,
{
    type Item = Result<T, RetrievalError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if self.is_done {
                return Poll::Ready(None);
            }

            let Some(pending) = self.pending_request.as_mut() else {
                self.is_done = true;
                return Poll::Ready(None);
            };

            match pending.as_mut().poll(cx) {
                Poll::Ready(Ok((fetcher, (items, next_token)))) => {
                    self.current_items.extend(items);

                    if let Some(next_token) = next_token {
                        // Set up the request for the next page, but don't poll it until
                        // this page has been drained.
                        self.pending_request = Some(Box::pin(async move {
                            let results = fetcher(Some(next_token)).await?;
                            Ok((fetcher, results))
                        }));
                    } else {
                        self.is_done = true;
                        self.pending_request = None;
                    }
                }
                Poll::Ready(Err(e)) => {
                    self.pending_request = None;
                    self.is_done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Drains `stream` until `cap` items have been collected or the stream ends.
///
/// The first error aborts collection and is returned in place of everything gathered so far.
pub async fn collect_capped<T, S>(stream: S, cap: usize) -> Result<Vec<T>, RetrievalError>
where
    S: Stream<Item = Result<T, RetrievalError>>,
{
    let mut stream = std::pin::pin!(stream.take(cap));
    let mut collected = Vec::new();
    while let Some(item) = stream.next().await {
        collected.push(item?);
    }
    Ok(collected)
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: u32,
}
