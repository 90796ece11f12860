use super::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use futures::channel::oneshot;
use futures::executor::block_on;

use crate::util::object_url::ObjectUrlTable;

#[derive(Default)]
struct CountingTable {
    created: AtomicUsize,
    revoked: AtomicUsize,
    revoked_urls: Mutex<Vec<String>>,
    fail_create: AtomicBool,
}

impl ObjectUrlTable for CountingTable {
    fn create(&self, _payload: &ImagePayload) -> Result<String, String> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err("decode failed".to_owned());
        }
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("blob:test/{n}"))
    }

    fn revoke(&self, url: &str) {
        self.revoked.fetch_add(1, Ordering::SeqCst);
        self.revoked_urls.lock().unwrap().push(url.to_owned());
    }
}

impl CountingTable {
    fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    fn revoked(&self) -> usize {
        self.revoked.load(Ordering::SeqCst)
    }
}

type Statuses = Arc<Mutex<Vec<ImageStatus>>>;

fn recorder() -> (Statuses, impl Fn(ImageStatus) + 'static) {
    let statuses: Statuses = Arc::default();
    let sink_statuses = statuses.clone();
    (statuses, move |status| sink_statuses.lock().unwrap().push(status))
}

fn payload() -> ImagePayload {
    ImagePayload { bytes: vec![0x89, b'P', b'N', b'G'], content_type: Some("image/png".to_owned()) }
}

fn ok_fetcher() -> ImageFetcher {
    ImageFetcher::new(|| async { Ok(payload()) })
}

fn failing_fetcher() -> ImageFetcher {
    ImageFetcher::new(|| async { Err("401 unauthorized".to_owned()) })
}

/// A fetcher whose single response is delivered by the returned sender.
fn deferred_fetcher() -> (ImageFetcher, oneshot::Sender<Result<ImagePayload, String>>) {
    let (tx, rx) = oneshot::channel();
    let rx = Mutex::new(Some(rx));
    let fetcher = ImageFetcher::new(move || {
        let rx = rx.lock().unwrap().take();
        async move {
            match rx {
                Some(rx) => rx.await.unwrap_or_else(|_| Err("dropped".to_owned())),
                None => Err("already fetched".to_owned()),
            }
        }
    });
    (fetcher, tx)
}

fn setup() -> (Arc<CountingTable>, ImageLoader) {
    let table = Arc::new(CountingTable::default());
    let shared: SharedUrlTable = table.clone();
    (table, ImageLoader::new(shared))
}

#[test]
fn successful_fetch_reports_loading_then_ready() {
    let (table, loader) = setup();
    let (statuses, sink) = recorder();

    block_on(loader.start(&ok_fetcher(), sink));

    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ImageStatus::Loading, ImageStatus::Ready("blob:test/1".to_owned())]
    );
    assert_eq!(table.created(), 1);
    assert_eq!(table.revoked(), 0);
    assert_eq!(loader.live_handles(), 1);
}

#[test]
fn dispose_releases_handle_exactly_once() {
    let (table, loader) = setup();
    let (_statuses, sink) = recorder();
    block_on(loader.start(&ok_fetcher(), sink));

    loader.dispose();
    loader.dispose();

    assert_eq!(table.revoked(), 1);
    assert_eq!(*table.revoked_urls.lock().unwrap(), vec!["blob:test/1".to_owned()]);
    assert_eq!(loader.live_handles(), 0);
}

#[test]
fn rejected_fetch_ends_in_failed_state() {
    let (table, loader) = setup();
    let (statuses, sink) = recorder();

    block_on(loader.start(&failing_fetcher(), sink));

    assert_eq!(*statuses.lock().unwrap(), vec![ImageStatus::Loading, ImageStatus::Failed]);
    assert_eq!(table.created(), 0);
    loader.dispose();
    assert_eq!(table.revoked(), 0);
}

#[test]
fn url_creation_failure_is_reported_as_failed() {
    let (table, loader) = setup();
    table.fail_create.store(true, Ordering::SeqCst);
    let (statuses, sink) = recorder();

    block_on(loader.start(&ok_fetcher(), sink));

    assert_eq!(statuses.lock().unwrap().last(), Some(&ImageStatus::Failed));
    assert_eq!(loader.live_handles(), 0);
}

#[test]
fn result_after_unmount_is_ignored_without_leak() {
    let (table, loader) = setup();
    let (statuses, sink) = recorder();
    let (fetcher, tx) = deferred_fetcher();

    let task = loader.start(&fetcher, sink);
    loader.dispose();
    tx.send(Ok(payload())).unwrap();
    block_on(task);

    assert_eq!(*statuses.lock().unwrap(), vec![ImageStatus::Loading]);
    assert_eq!(table.created(), table.revoked());
    assert_eq!(table.created(), 0);
}

#[test]
fn failure_after_unmount_does_not_touch_state() {
    let (_table, loader) = setup();
    let (statuses, sink) = recorder();
    let (fetcher, tx) = deferred_fetcher();

    let task = loader.start(&fetcher, sink);
    loader.dispose();
    tx.send(Err("boom".to_owned())).unwrap();
    block_on(task);

    assert_eq!(*statuses.lock().unwrap(), vec![ImageStatus::Loading]);
}

#[test]
fn superseded_cycle_result_is_ignored() {
    let (table, loader) = setup();
    let (statuses, sink) = recorder();
    let (first, first_tx) = deferred_fetcher();
    let (second, second_tx) = deferred_fetcher();
    let sink = Arc::new(sink);

    let first_sink = sink.clone();
    let first_task = loader.start(&first, move |s| (*first_sink)(s));
    let second_sink = sink.clone();
    let second_task = loader.start(&second, move |s| (*second_sink)(s));

    first_tx.send(Ok(payload())).unwrap();
    block_on(first_task);
    second_tx.send(Ok(payload())).unwrap();
    block_on(second_task);

    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ImageStatus::Loading, ImageStatus::Loading, ImageStatus::Ready("blob:test/1".to_owned())]
    );
    assert_eq!(table.created(), 1);
    assert_eq!(table.revoked(), 0);
    assert_eq!(loader.live_handles(), 1);
}

#[test]
fn refetch_releases_previous_handle_before_new_cycle() {
    let (table, loader) = setup();
    let (_statuses, sink) = recorder();
    let sink = Arc::new(sink);

    let first_sink = sink.clone();
    block_on(loader.start(&ok_fetcher(), move |s| (*first_sink)(s)));
    assert_eq!(table.revoked(), 0);

    let second_sink = sink.clone();
    let second_task = loader.start(&ok_fetcher(), move |s| (*second_sink)(s));
    assert_eq!(table.revoked(), 1);
    assert_eq!(loader.live_handles(), 0);

    block_on(second_task);
    assert_eq!(table.created(), 2);
    assert_eq!(loader.live_handles(), 1);

    loader.dispose();
    assert_eq!(table.revoked(), 2);
}

#[test]
fn rapid_remount_sequence_balances_create_and_revoke() {
    let (table, loader) = setup();
    for round in 0..5 {
        let (_statuses, sink) = recorder();
        let task = loader.start(&ok_fetcher(), sink);
        if round % 2 == 0 {
            block_on(task);
        } else {
            drop(task);
        }
        loader.dispose();
    }
    assert_eq!(table.created(), 3);
    assert_eq!(table.revoked(), table.created());
}

#[test]
fn fetcher_identity_is_pointer_equality() {
    let a = ok_fetcher();
    let a_clone = a.clone();
    let b = ok_fetcher();
    assert_eq!(a, a_clone);
    assert_ne!(a, b);
}
