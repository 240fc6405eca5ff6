use chrono::{Duration, TimeZone, Utc};
use schedbot::agent::{PassesAgent, PassesConfig};
use schedbot::cache::FileSlotStorage;
use schedbot::driver::{Action, Driver, RunOptions};
use schedbot::fetch::{Content, Fetcher};
use tempfile::TempDir;

use crate::integration::support::{MapTransport, RecordingPoster};

const PASSES_URL: &str = "http://passes.example/summary";
const WEATHER_URL: &str = "https://weather.example/forecast";

const TABLE: &str = r#"<tr class="clickableRow" onclick="go()"><td><a href="passdetails.aspx?n=1" title="details">19 Oct</a></td><td>-3.4</td><td>19:30:05</td><td>10°</td><td>WSW</td><td>19:33:20</td><td>67°</td><td>SSE</td><td>19:36:35</td><td>10°</td><td>ENE</td><td>visible</td></tr>"#;

fn driver(dir: &TempDir, transport: &MapTransport, poster: &RecordingPoster) -> Driver {
    let mut config = PassesConfig::at(52.48, -1.89, 140);
    config.passes_url = PASSES_URL.to_string();
    config.weather_url = Some(WEATHER_URL.to_string());
    Driver::new(
        Box::new(PassesAgent::new("abovebrum", config).unwrap()),
        Box::new(FileSlotStorage::new(dir.path())),
        Fetcher::new(Box::new(transport.clone())),
        Box::new(poster.clone()),
    )
}

#[test]
fn pass_is_announced_half_an_hour_ahead_with_weather() {
    let dir = TempDir::new().unwrap();
    let transport = MapTransport::default();
    transport.serve(PASSES_URL, Content::Text(TABLE.to_string()));
    transport.serve(
        WEATHER_URL,
        Content::Text(r#"{"currently": {"summary": "Clear"}}"#.to_string()),
    );
    let poster = RecordingPoster::new(&[("masto", 500)]);
    let driver = driver(&dir, &transport, &poster);
    let morning = RunOptions::at(Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap());

    assert!(driver.execute(Action::Fetch, &morning).unwrap().contains("No events."));
    assert_eq!(driver.execute(Action::Weather, &morning).unwrap(), "Weather updated");

    let pass = Utc.with_ymd_and_hms(2026, 10, 19, 19, 30, 5).unwrap();
    driver
        .execute(Action::Post, &RunOptions::at(pass - Duration::minutes(31)))
        .unwrap();
    assert!(poster.sent.borrow().is_empty());

    driver
        .execute(Action::Post, &RunOptions::at(pass - Duration::minutes(28)))
        .unwrap();
    let sent = poster.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.starts_with("ISS pass: magnitude -3.4"));
    assert!(sent[0].text.ends_with("Weather: Clear."));
    assert!(dir.path().join("abovebrum-iss").exists());
    assert!(dir.path().join("abovebrum-weather").exists());
}
