use chrono::{TimeZone, Utc};
use schedbot::agent::{BroadcastAgent, BroadcastConfig};
use schedbot::cache::FileSlotStorage;
use schedbot::driver::{Action, Driver, RunOptions};
use schedbot::error::BotError;
use schedbot::fetch::{Content, Fetcher};
use schedbot::render::ELLIPSIS;
use tempfile::TempDir;

use crate::integration::support::{feed, MapTransport, RecordingPoster, FEED_URL, IMAGE_URL};

const MORNING: &str = "2026-10-18T07:05:00Z";
const EVENING: &str = "2026-10-18T17:25:00Z";

fn driver(dir: &TempDir, transport: &MapTransport, poster: &RecordingPoster) -> Driver {
    let agent = BroadcastAgent::new("tweenies", BroadcastConfig::for_programme("b006m9ry")).unwrap();
    Driver::new(
        Box::new(agent),
        Box::new(FileSlotStorage::new(dir.path())),
        Fetcher::new(Box::new(transport.clone())),
        Box::new(poster.clone()),
    )
}

fn at(h: u32, m: u32) -> RunOptions {
    RunOptions::at(Utc.with_ymd_and_hms(2026, 10, 18, h, m, 0).unwrap())
}

#[test]
fn fetch_writes_primary_then_ignores_identical_content() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    transport.serve(FEED_URL, Content::Text(feed(&[MORNING, EVENING])));
    let poster = RecordingPoster::new(&[("masto", 500)]);
    let driver = driver(&dir, &transport, &poster);

    let report = driver.execute(Action::Fetch, &at(6, 0)).unwrap();
    assert!(report.starts_with("New schedule downloaded"));
    assert!(report.contains("Episode 1 (s3e1) starting shortly!"));
    let primary = dir.path().join("tweenies-schedule");
    assert_eq!(std::fs::read_to_string(&primary).unwrap(), feed(&[MORNING, EVENING]));

    assert_eq!(driver.execute(Action::Fetch, &at(6, 5)).unwrap(), "");
    assert!(poster.sent.borrow().is_empty());
}

#[test]
fn maintenance_page_never_replaces_a_good_schedule() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    transport.serve(FEED_URL, Content::Text(feed(&[MORNING])));
    let poster = RecordingPoster::new(&[("masto", 500)]);
    let driver = driver(&dir, &transport, &poster);
    driver.execute(Action::Fetch, &at(6, 0)).unwrap();

    transport.serve(
        FEED_URL,
        Content::Text("<h1>Maintenance mode</h1> back soon".to_string()),
    );
    assert_eq!(driver.execute(Action::Fetch, &at(6, 5)).unwrap(), "");
    let kept = std::fs::read_to_string(dir.path().join("tweenies-schedule")).unwrap();
    assert_eq!(kept, feed(&[MORNING]));
}

#[test]
fn unreachable_feed_leaves_cache_untouched() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    let poster = RecordingPoster::new(&[("masto", 500)]);
    let driver = driver(&dir, &transport, &poster);

    assert_eq!(driver.execute(Action::Fetch, &at(6, 0)).unwrap(), "");
    assert!(!dir.path().join("tweenies-schedule").exists());
    assert_eq!(driver.execute(Action::Test, &at(6, 0)).unwrap(), "No events.");
}

#[test]
fn post_sends_the_imminent_episode_with_its_thumbnail() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    transport.serve(FEED_URL, Content::Text(feed(&[MORNING, EVENING])));
    transport.serve(IMAGE_URL, Content::Binary(vec![0xff, 0xd8, 0xff, 0xe0]));
    let poster = RecordingPoster::new(&[("masto", 500), ("bird", 280)]);
    let driver = driver(&dir, &transport, &poster);
    driver.execute(Action::Fetch, &at(6, 0)).unwrap();

    let report = driver.execute(Action::Post, &at(17, 20)).unwrap();
    assert_eq!(report, "Posted 1 event(s) in 1 message(s)");

    let sent = poster.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].text,
        "Episode 2 (s3e2) starting shortly!\n\u{201c}The gang go on an adventure.\u{201d}"
    );
    assert_eq!(sent[0].targets, vec!["masto", "bird"]);
    assert_eq!(sent[0].image_bytes, Some(4));
    assert!(sent[0].in_reply_to.is_empty());
    assert!(!sent[0].text.contains(ELLIPSIS));
}

#[test]
fn post_between_windows_does_nothing() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    transport.serve(FEED_URL, Content::Text(feed(&[MORNING, EVENING])));
    let poster = RecordingPoster::new(&[("masto", 500)]);
    let driver = driver(&dir, &transport, &poster);
    driver.execute(Action::Fetch, &at(6, 0)).unwrap();

    assert_eq!(driver.execute(Action::Post, &at(12, 0)).unwrap(), "");
    assert!(poster.sent.borrow().is_empty());
    assert_eq!(transport.calls(IMAGE_URL), 0);
}

#[test]
fn missing_thumbnail_aborts_after_three_attempts() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    transport.serve(FEED_URL, Content::Text(feed(&[MORNING])));
    let poster = RecordingPoster::new(&[("masto", 500)]);
    let driver = driver(&dir, &transport, &poster);
    driver.execute(Action::Fetch, &at(6, 0)).unwrap();

    let err = driver.execute(Action::Post, &at(7, 0)).unwrap_err();
    assert!(matches!(err, BotError::ImageFetchExhausted { attempts: 3, .. }));
    assert_eq!(transport.calls(IMAGE_URL), 3);
    assert!(poster.sent.borrow().is_empty());
}

#[test]
fn weather_is_not_a_broadcast_action() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    let poster = RecordingPoster::new(&[("masto", 500)]);
    let err = driver(&dir, &transport, &poster)
        .execute(Action::Weather, &at(6, 0))
        .unwrap_err();
    assert!(matches!(err, BotError::UnsupportedAction { .. }));
}
