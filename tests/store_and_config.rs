// Tests for persisted schedules and configuration, using an isolated context.
use chrono::NaiveDate;
use schedai::config::Config;
use schedai::context::{AppContext, TestContext};
use schedai::engine::Engine;
use schedai::model::{Category, Locale, Schedule};
use schedai::prompt::build_system_prompt;
use schedai::storage::ScheduleStore;
use std::fs;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

#[test]
fn test_append_accumulates_records() {
    let ctx = TestContext::new();
    assert!(ScheduleStore::load(&ctx).unwrap().is_empty());

    let engine = Engine::new(Locale::english()).unwrap();
    let cats = vec![Category::new("cat-1", "Work")];
    let first = engine.parse_on("Standup tomorrow at 09:30\nCategory: Work", &cats, today());
    let second = engine.parse_on("Groceries", &cats, today());

    assert_eq!(ScheduleStore::append(&ctx, &first.records).unwrap(), 1);
    assert_eq!(ScheduleStore::append(&ctx, &second.records).unwrap(), 2);

    let loaded = ScheduleStore::load(&ctx).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], first.records[0]);
    assert_eq!(loaded[0].category_id.as_deref(), Some("cat-1"));
    let d = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    assert!(matches!(loaded[0].schedule(), Some(Schedule::Timed { start, .. }) if start.date() == d));
    assert_eq!(loaded[1].schedule(), Some(Schedule::AllDay(today())));
}

#[test]
fn test_saved_file_is_versioned_camel_case() {
    let ctx = TestContext::new();
    let engine = Engine::new(Locale::english()).unwrap();
    let out = engine.parse_on("Title: Call\nTime: 14:00", &[], today());
    ScheduleStore::save(&ctx, &out.records).unwrap();

    let json = fs::read_to_string(ctx.get_schedules_path().unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], 1);
    let rec = &value["records"][0];
    assert_eq!(rec["isAllDay"], false);
    assert_eq!(rec["start"], "2026-10-16T14:00");
    assert_eq!(rec["end"], "2026-10-16T15:00");
    assert!(rec["categoryId"].is_null());
    assert_eq!(rec["subtasks"], serde_json::json!([]));
}

#[test]
fn test_config_roundtrip_drives_locale_and_prompt() {
    let ctx = TestContext::new();
    let mut cfg = Config::default();
    cfg.locale = "ru".to_string();
    cfg.categories = vec![Category::new("u1", "Учёба")];
    cfg.profile.occupation = "студент".to_string();
    cfg.save(&ctx).unwrap();

    let loaded = Config::load(&ctx).unwrap();
    assert_eq!(loaded, cfg);

    let locale = loaded.resolve_locale();
    assert_eq!(locale.separator, "--- НОВАЯ ЗАДАЧА ---");

    let prompt = build_system_prompt(&loaded.profile, &loaded.categories, &locale, today());
    assert!(prompt.contains("пятница, 16 октября 2026 г."));
    assert!(prompt.contains("Род занятий: студент."));
    assert!(prompt.contains("Категории задач: Учёба."));
}

#[test]
fn test_custom_locale_from_config_is_used_by_engine() {
    let mut custom = Locale::english();
    custom.separator = "===".to_string();
    custom.labels.title.push("subject".to_string());
    let cfg = Config {
        custom_locale: Some(custom),
        ..Config::default()
    };

    let ctx = TestContext::new();
    cfg.save(&ctx).unwrap();
    let locale = Config::load(&ctx).unwrap().resolve_locale();

    let engine = Engine::new(locale).unwrap();
    let out = engine.parse_on("Subject: Budget review\n===\nSubject: Retro", &[], today());
    let titles: Vec<&str> = out.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Budget review", "Retro"]);
}
