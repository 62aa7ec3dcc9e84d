// Integration tests for holiday resolution and preference persistence
use std::fs;
use std::fs::File;

use holiday_clock::services::assets::{load_background, DirAssetCatalog};
use holiday_clock::services::holiday::{HolidayResolver, DEFAULT_BACKGROUND};
use holiday_clock::services::preferences::{FileSettingsStore, SettingsStore};
use holiday_clock::services::timekeeper::TimeKeeper;
use chrono::TimeZone;
use tempfile::TempDir;

fn write_png(dir: &TempDir, relative: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let file = File::create(&path).unwrap();
    let mut encoder = png::Encoder::new(file, 4, 4);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(&[0u8; 64]).unwrap();
}

#[test]
fn test_holiday_resolution_end_to_end() {
    let assets = TempDir::new().unwrap();
    fs::create_dir_all(assets.path().join("holidays")).unwrap();
    fs::write(
        assets.path().join("holidays/holidays.json"),
        r#"{
            "02-23": "defenders_day.png",
            "05-09": { "image": "victory_day.png", "text": "Victory Day" }
        }"#,
    )
    .unwrap();
    write_png(&assets, "holidays/victory_day.png");
    write_png(&assets, "images/defenders_day.png");
    write_png(&assets, DEFAULT_BACKGROUND);

    let resolver = HolidayResolver::new(assets.path().join("holidays/holidays.json"));
    let catalog = DirAssetCatalog::new(assets.path());

    // Present in both table and holidays/ directory: exact load.
    let path = resolver.resolve_background_path("05-09");
    assert_eq!(path.as_ref(), "holidays/victory_day.png");
    assert!(load_background(&catalog, &path).is_some());

    // Present in the table but only shipped under images/: fallback hit.
    let path = resolver.resolve_background_path("02-23");
    assert_eq!(path.as_ref(), "holidays/defenders_day.png");
    assert!(load_background(&catalog, &path).is_some());

    // Not a holiday: default sentinel.
    let path = resolver.resolve_background_path("01-15");
    assert_eq!(path.as_ref(), DEFAULT_BACKGROUND);
    assert!(load_background(&catalog, &path).is_some());
}

#[test]
fn test_preferences_survive_an_app_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");

    // First launch: defaults, then the user enables auto-start.
    {
        let mut store = FileSettingsStore::open(&path);
        assert!(store.first_launch());
        assert!(!store.auto_start_enabled());

        store.set_first_launch(false).unwrap();
        store.set_auto_start_enabled(true).unwrap();
    }

    // Second launch: both flags persisted.
    {
        let store = FileSettingsStore::open(&path);
        assert!(!store.first_launch());
        assert!(store.auto_start_enabled());
    }
}

#[test]
fn test_midnight_rollover_drives_background_changes() {
    let resolver = HolidayResolver::from_json(r#"{ "01-01": "new_year.png" }"#);
    let zone = chrono_tz::Europe::Moscow;

    let mut keeper = TimeKeeper::seeded_at(
        zone.with_ymd_and_hms(2024, 12, 31, 23, 59, 58).unwrap(),
        &resolver,
    );
    assert_eq!(keeper.state().background_path.as_ref(), DEFAULT_BACKGROUND);

    // One more second of the old year: time only.
    let state = keeper
        .tick_at(
            zone.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap(),
            &resolver,
        )
        .clone();
    assert_eq!(state.background_path.as_ref(), DEFAULT_BACKGROUND);

    // Midnight: the holiday background appears.
    let state = keeper
        .tick_at(
            zone.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            &resolver,
        )
        .clone();
    assert_eq!(state.background_path.as_ref(), "holidays/new_year.png");
}
