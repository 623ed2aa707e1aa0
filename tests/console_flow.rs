// SPDX-License-Identifier: MPL-2.0
//! End-to-end flows across config, store, host and the media plumbing.

use challan_review::config::{self, Config, ToastSettings};
use challan_review::media::{PresignedUrl, ReviewQueue, UrlPrefetchCache};
use challan_review::notify::{host, Host, Placement, Store, Timeout, Toasts};
use std::time::{Duration, Instant};
use tempfile::tempdir;

#[test]
fn toast_defaults_follow_the_saved_config() {
    let dir = tempdir().expect("failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let saved = Config {
        toast: ToastSettings {
            max_visible: Some(2),
            timeout_ms: Some(1500),
            placement: Some(Placement::TopRight),
            pause_on_hover: Some(false),
        },
        ..Config::default()
    };
    config::save_to_path(&saved, &config_path).expect("failed to write config file");

    let loaded = config::load_from_path(&config_path).expect("failed to load config");
    let toasts = Toasts::new(loaded.store_config());

    let id = toasts.info("plain notification");
    toasts.with(|store| {
        let n = store.notification(id).expect("notification should be live");
        assert_eq!(n.placement_anchor(), Some(Placement::TopRight));
        assert_eq!(
            n.dismiss_timeout(),
            Some(Timeout::After(Duration::from_millis(1500)))
        );
        assert_eq!(n.pauses_on_hover(), Some(false));
        assert_eq!(store.config().max_visible, 2);
    });
}

#[test]
fn overflow_queues_and_promotes_through_a_host_dismissal() {
    let toasts = Toasts::default(); // max_visible = 5
    let mut host = Host::new();
    let t0 = Instant::now();

    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(toasts.neutral(format!("notification {i}")));
    }
    toasts.with(|store| {
        assert_eq!(store.active_count(), 5);
        assert_eq!(store.queued_count(), 1);
    });

    // Dismiss one visible toast through the host: fade out, then removal.
    host.update(host::Message::Tick(t0), &toasts);
    host.update(host::Message::Dismiss(ids[4]), &toasts);
    host.update(
        host::Message::Tick(t0 + Duration::from_millis(400)),
        &toasts,
    );

    toasts.with(|store| {
        assert_eq!(store.active_count(), 5);
        assert_eq!(store.queued_count(), 0);
        assert!(store.notification(ids[4]).is_none());
    });
}

#[test]
fn sticky_error_survives_ticks_until_escape() {
    let toasts = Toasts::default();
    let mut host = Host::new();
    let t0 = Instant::now();

    let id = toasts.error("registry unreachable");
    host.update(host::Message::Tick(t0), &toasts);
    for i in 1..50 {
        host.update(
            host::Message::Tick(t0 + Duration::from_millis(100 * i)),
            &toasts,
        );
    }
    assert!(toasts.with(|store| store.notification(id).is_some()));

    host.update(host::Message::DismissFront, &toasts);
    host.update(host::Message::Tick(t0 + Duration::from_secs(6)), &toasts);
    assert!(toasts.with(Store::is_empty));
}

#[test]
fn queue_navigation_keeps_the_prefetch_window_fresh() {
    let mut queue = ReviewQueue::from_items(
        (1..=8).map(|i| format!("img-{i:02}")).collect(),
    );
    let mut cache = UrlPrefetchCache::with_defaults();

    // Walk the whole queue, minting URLs the way the fetch task would.
    loop {
        let window = queue.prefetch_window(cache.window()).to_vec();
        for id in cache.ids_to_prefetch(&window) {
            let url = format!("https://storage.test/{id}");
            assert!(cache.insert(id, PresignedUrl::new(url, Duration::from_secs(600))));
        }
        for id in &window {
            assert!(cache.contains(id), "window entry {id} should be cached");
        }
        if queue.advance().is_none() {
            break;
        }
        // The image being shown now was prefetched before we arrived.
        let current = queue.current().expect("queue is not empty");
        assert!(cache.url(current).is_some());
    }

    assert!(cache.stats().hits >= 7);
    assert_eq!(cache.stats().expirations, 0);
}
