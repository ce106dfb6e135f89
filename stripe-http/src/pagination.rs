//! Auto-pagination over list endpoints.
//!
//! [`paginate`] turns a page-fetching function into a lazy stream of
//! items. Each page is requested only when the previous one is exhausted,
//! and the cursor of the next request is the id of the last item yielded,
//! so consecutive pages never overlap.
//!
//! When the initial parameters carry `ending_before` (and no
//! `starting_after`), the stream walks backwards: the next cursor is the
//! id of the first (newest) item of each page, and each page is
//! yielded reversed, so items come out in ascending creation order.

use std::collections::VecDeque;
use std::future::Future;

use futures_util::Stream;
use futures_util::stream::try_unfold;
use stripe_types::list::{HasId, List, Paginate};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

struct State<P, T, F> {
    next: Option<P>,
    buffer: VecDeque<T>,
    direction: Direction,
    fetch: F,
}

/// Streams every item of a list, fetching pages lazily with `fetch`.
///
/// The stream ends after the first error.
pub fn paginate<P, T, F, Fut>(params: P, fetch: F) -> impl Stream<Item = Result<T, Error>>
where
    P: Paginate + Clone,
    T: HasId,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = Result<List<T>, Error>>,
{
    let direction = if params.ending_before().is_some() && params.starting_after().is_none() {
        Direction::Backward
    } else {
        Direction::Forward
    };
    let state = State {
        next: Some(params),
        buffer: VecDeque::new(),
        direction,
        fetch,
    };

    try_unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.buffer.pop_front() {
                return Ok::<_, Error>(Some((item, state)));
            }
            let Some(params) = state.next.take() else {
                return Ok(None);
            };
            let page = (state.fetch)(params.clone()).await?;

            #[cfg(feature = "telemetry")]
            tracing::debug!(
                items = page.data.len(),
                has_more = page.has_more,
                url = %page.url,
                "stripe.list_page"
            );

            state.next = next_params(params, &page, state.direction);
            match state.direction {
                Direction::Forward => state.buffer.extend(page.data),
                Direction::Backward => state.buffer.extend(page.data.into_iter().rev()),
            }
        }
    })
}

/// Parameters of the page after `page`, or `None` when the list is exhausted.
fn next_params<P, T>(mut params: P, page: &List<T>, direction: Direction) -> Option<P>
where
    P: Paginate,
    T: HasId,
{
    if !page.has_more {
        return None;
    }
    match direction {
        Direction::Forward => {
            let cursor = page.data.last()?.id().to_owned();
            params.set_starting_after(Some(cursor));
        }
        Direction::Backward => {
            let cursor = page.data.first()?.id().to_owned();
            params.set_ending_before(Some(cursor));
        }
    }
    Some(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::TryStreamExt;
    use std::sync::{Arc, Mutex};
    use stripe_types::setup_intent::SetupIntentListParams;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(String);

    impl HasId for Item {
        fn id(&self) -> &str {
            &self.0
        }
    }

    /// Serves `ids` newest-first in pages of `limit`, honouring both cursors.
    fn serve(ids: &[&str], params: &SetupIntentListParams) -> List<Item> {
        let limit = usize::from(params.limit.unwrap_or(10));
        let all: Vec<String> = ids.iter().map(|s| (*s).to_owned()).collect();
        let (start, end) = match (&params.starting_after, &params.ending_before) {
            (Some(after), _) => {
                let pos = all.iter().position(|i| i == after).map_or(0, |p| p + 1);
                (pos, (pos + limit).min(all.len()))
            }
            (None, Some(before)) => {
                let pos = all.iter().position(|i| i == before).unwrap_or(0);
                (pos.saturating_sub(limit), pos)
            }
            (None, None) => (0, limit.min(all.len())),
        };
        let has_more = match (&params.starting_after, &params.ending_before) {
            (None, Some(_)) => start > 0,
            _ => end < all.len(),
        };
        List {
            object: "list".to_owned(),
            data: all[start..end].iter().cloned().map(Item).collect(),
            has_more,
            url: "/v1/setup_intents".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_forward_pages_do_not_overlap() {
        let ids = ["seti_5", "seti_4", "seti_3", "seti_2", "seti_1"];
        let seen = Arc::new(Mutex::new(Vec::new()));
        let params = SetupIntentListParams {
            limit: Some(2),
            ..SetupIntentListParams::default()
        };
        let calls = Arc::clone(&seen);
        let items: Vec<Item> = paginate(params, move |p: SetupIntentListParams| {
            calls.lock().unwrap().push(p.starting_after.clone());
            let page = serve(&ids, &p);
            async move { Ok(page) }
        })
        .try_collect()
        .await
        .unwrap();

        let got: Vec<&str> = items.iter().map(|i| i.0.as_str()).collect();
        assert_eq!(got, ids);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("seti_4".to_owned()), Some("seti_2".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_backward_walk_is_ascending() {
        let ids = ["seti_5", "seti_4", "seti_3", "seti_2", "seti_1"];
        let seen = Arc::new(Mutex::new(Vec::new()));
        let params = SetupIntentListParams {
            limit: Some(2),
            ending_before: Some("seti_1".to_owned()),
            ..SetupIntentListParams::default()
        };
        let calls = Arc::clone(&seen);
        let items: Vec<Item> = paginate(params, move |p: SetupIntentListParams| {
            calls.lock().unwrap().push(p.ending_before.clone());
            let page = serve(&ids, &p);
            async move { Ok(page) }
        })
        .try_collect()
        .await
        .unwrap();

        let got: Vec<&str> = items.iter().map(|i| i.0.as_str()).collect();
        assert_eq!(got, ["seti_2", "seti_3", "seti_4", "seti_5"]);
        let created: Vec<u32> = got
            .iter()
            .map(|id| id.trim_start_matches("seti_").parse().unwrap())
            .collect();
        assert!(created.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("seti_1".to_owned()), Some("seti_3".to_owned())]
        );
    }

    #[tokio::test]
    async fn test_error_ends_stream() {
        let params = SetupIntentListParams::default();
        let mut stream = Box::pin(paginate(params, |_p: SetupIntentListParams| async {
            Err::<List<Item>, _>(Error::from(stripe_types::InvalidParameters::new(
                "limit", "bad",
            )))
        }));
        assert!(stream.try_next().await.is_err());
        assert!(stream.try_next().await.unwrap().is_none());
    }

    #[test]
    fn test_no_more_pages() {
        let page = List::<Item> {
            data: vec![Item("seti_1".to_owned())],
            ..List::default()
        };
        assert!(next_params(SetupIntentListParams::default(), &page, Direction::Forward).is_none());
    }
}
