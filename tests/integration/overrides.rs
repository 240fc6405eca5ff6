use chrono::{TimeZone, Utc};
use schedbot::agent::{BroadcastAgent, BroadcastConfig};
use schedbot::cache::{CacheStore, FileSlotStorage, SlotKey, SlotState};
use schedbot::driver::{Action, Driver, RunOptions};
use schedbot::fetch::{Content, Fetcher};
use std::fs;
use tempfile::TempDir;

use crate::integration::support::{feed, MapTransport, RecordingPoster, FEED_URL};

fn at(h: u32, m: u32) -> RunOptions {
    RunOptions::at(Utc.with_ymd_and_hms(2026, 10, 18, h, m, 0).unwrap())
}

fn driver(dir: &TempDir, transport: &MapTransport) -> Driver {
    Driver::new(
        Box::new(BroadcastAgent::new("tweenies", BroadcastConfig::for_programme("b006m9ry")).unwrap()),
        Box::new(FileSlotStorage::new(dir.path())),
        Fetcher::new(Box::new(transport.clone())),
        Box::new(RecordingPoster::new(&[("masto", 500)])),
    )
}

#[test]
fn hand_written_override_wins_until_the_next_new_fetch() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    transport.serve(FEED_URL, Content::Text(feed(&["2026-10-18T07:05:00Z"])));
    let driver = driver(&dir, &transport);
    driver.execute(Action::Fetch, &at(6, 0)).unwrap();

    let override_path = dir.path().join("tweenies-schedule-override");
    fs::write(&override_path, feed(&["2026-10-18T09:30:00Z", "2026-10-18T10:30:00Z"])).unwrap();

    let listing = driver.execute(Action::Test, &at(6, 0)).unwrap();
    assert!(listing.contains("2026-10-18T09:30:00+00:00"));
    assert!(!listing.contains("2026-10-18T07:05:00+00:00"));

    // unchanged upstream: override survives
    driver.execute(Action::Fetch, &at(6, 5)).unwrap();
    assert!(override_path.exists());

    transport.serve(FEED_URL, Content::Text(feed(&["2026-10-18T08:00:00Z"])));
    let report = driver.execute(Action::Fetch, &at(6, 10)).unwrap();
    assert!(report.contains("2026-10-18T08:00:00+00:00"));
    assert!(!override_path.exists());
}

#[test]
fn slot_state_follows_files_on_disk() {
    let dir = TempDir::new().unwrap();
    let storage = FileSlotStorage::new(dir.path());
    let cache = CacheStore::new(&storage, SlotKey::new("abovebrum", "iss"));
    assert_eq!(cache.state().unwrap(), SlotState::Empty);

    fs::write(dir.path().join("abovebrum-iss-override"), "manual").unwrap();
    assert_eq!(cache.state().unwrap(), SlotState::Override);
    assert_eq!(cache.read_effective(false).unwrap().as_deref(), Some("manual"));

    assert!(cache
        .commit_if_changed("fetched", schedbot::cache::content_differs, None)
        .unwrap());
    assert_eq!(cache.state().unwrap(), SlotState::Primary);
    assert_eq!(cache.read_effective(false).unwrap().as_deref(), Some("fetched"));
    assert!(!dir.path().join("abovebrum-iss.tmp").exists());
}
