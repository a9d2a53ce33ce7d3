//! Diagnostic count tests.
//!
//! Every failed public lookup reports exactly one warning, wherever in the
//! request chain the failure happened.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

use metascore_core::{
    testing::{fixtures, MockHttpFetcher},
    ClientConfig, MetacriticClient, RecordKind, TransportError,
};

const HOMEPAGE: &str = "https://www.metacritic.com/";
const SEARCH: &str = "https://backend.metacritic.com/composer/metacritic/pages/search/";
const GAMES: &str = "https://backend.metacritic.com/composer/metacritic/pages/games/";

/// Counts WARN events seen by the subscriber.
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `fut` on a current-thread runtime and return how many warnings it
/// emitted.
fn count_warnings<F: Future<Output = ()>>(fut: F) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    tracing::subscriber::with_default(subscriber, || runtime.block_on(fut));

    count.load(Ordering::SeqCst)
}

fn client(fetcher: &Arc<MockHttpFetcher>) -> MetacriticClient {
    let config = ClientConfig {
        user_agent: Some("metascore-tests".to_string()),
        ..ClientConfig::default()
    };
    MetacriticClient::with_fetcher(config, fetcher.clone())
}

#[test]
fn test_no_token_warns_once() {
    let warnings = count_warnings(async {
        let fetcher = Arc::new(MockHttpFetcher::new());
        fetcher
            .respond(HOMEPAGE, 200, "<html><script>var nothing;</script></html>")
            .await;
        let client = client(&fetcher);

        assert!(client.search("Test Game", None, true).await.is_empty());
    });
    assert_eq!(warnings, 1);

    let warnings = count_warnings(async {
        let fetcher = Arc::new(MockHttpFetcher::new());
        fetcher.respond(HOMEPAGE, 503, "unavailable").await;
        let client = client(&fetcher);

        assert!(client
            .get_detail("Test Game", RecordKind::Game, true)
            .await
            .is_none());
    });
    assert_eq!(warnings, 1);
}

#[test]
fn test_transport_failure_warns_once() {
    let warnings = count_warnings(async {
        let fetcher = Arc::new(MockHttpFetcher::new());
        fetcher
            .respond(HOMEPAGE, 200, fixtures::homepage_html("key"))
            .await;
        fetcher.fail(SEARCH, TransportError::Timeout).await;
        let client = client(&fetcher);

        assert!(client.search("Test Game", None, true).await.is_empty());
    });
    assert_eq!(warnings, 1);

    let warnings = count_warnings(async {
        let fetcher = Arc::new(MockHttpFetcher::new());
        fetcher
            .respond(HOMEPAGE, 200, fixtures::homepage_html("key"))
            .await;
        fetcher
            .respond(SEARCH, 200, fixtures::search_bag(&[fixtures::search_item(1, "Test Game")]))
            .await;
        fetcher
            .fail(GAMES, TransportError::Connection("reset".to_string()))
            .await;
        let client = client(&fetcher);

        assert!(client
            .get_detail("Test Game", RecordKind::Game, true)
            .await
            .is_none());
    });
    assert_eq!(warnings, 1);
}

#[test]
fn test_decode_failure_warns_once() {
    let warnings = count_warnings(async {
        let fetcher = Arc::new(MockHttpFetcher::new());
        fetcher
            .respond(HOMEPAGE, 200, fixtures::homepage_html("key"))
            .await;
        fetcher.respond(SEARCH, 200, "Invalid JSON").await;
        let client = client(&fetcher);

        assert!(client.search("Test Game", None, true).await.is_empty());
    });
    assert_eq!(warnings, 1);

    let warnings = count_warnings(async {
        let fetcher = Arc::new(MockHttpFetcher::new());
        fetcher
            .respond(HOMEPAGE, 200, fixtures::homepage_html("key"))
            .await;
        fetcher
            .respond(SEARCH, 200, fixtures::search_bag(&[fixtures::search_item(1, "Test Game")]))
            .await;
        fetcher.respond(GAMES, 200, "Invalid JSON").await;
        let client = client(&fetcher);

        assert!(client
            .get_detail("Test Game", RecordKind::Game, true)
            .await
            .is_none());
    });
    assert_eq!(warnings, 1);
}

#[test]
fn test_unsupported_type_id_warns_once() {
    let warnings = count_warnings(async {
        let fetcher = Arc::new(MockHttpFetcher::new());
        let client = client(&fetcher);

        assert!(client
            .get_detail_by_type_id("Test Game", 7, true)
            .await
            .is_none());
        assert_eq!(fetcher.total_requests().await, 0);
    });
    assert_eq!(warnings, 1);
}

#[test]
fn test_success_and_empty_result_do_not_warn() {
    let warnings = count_warnings(async {
        let fetcher = Arc::new(MockHttpFetcher::new());
        fetcher
            .respond(HOMEPAGE, 200, fixtures::homepage_html("key"))
            .await;
        fetcher
            .respond(SEARCH, 200, fixtures::search_bag(&[fixtures::search_item(1, "Portal")]))
            .await;
        let client = client(&fetcher);

        assert!(client.search("Test Game", None, true).await.is_empty());
        assert!(client.search("", None, true).await.is_empty());
    });
    assert_eq!(warnings, 0);
}
