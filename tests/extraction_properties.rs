// Tests for end-to-end extraction behaviour through the public API.
use chrono::NaiveDate;
use schedai::engine::{Engine, render_block};
use schedai::model::{Category, Locale, Priority, Schedule, TaskRecord};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn categories() -> Vec<Category> {
    vec![
        Category::new("cat-1", "Work"),
        Category::new("cat-2", "Personal"),
        Category::new("cat-3", "Study"),
    ]
}

fn en() -> Engine {
    Engine::new(Locale::english()).unwrap()
}

fn ru() -> Engine {
    Engine::new(Locale::russian()).unwrap()
}

#[test]
fn test_gym_block_is_timed_with_category_and_priority() {
    let raw = "Title: Gym\nDate: tomorrow\nTime: 18:00-19:30\nCategory: Personal\nPriority: High";
    let out = en().parse_on(raw, &categories(), today());

    assert!(out.warning.is_none());
    assert_eq!(out.records.len(), 1);
    let r = &out.records[0];
    assert_eq!(r.title, "Gym");
    assert!(!r.is_all_day);
    assert_eq!(r.start, "2026-10-17T18:00");
    assert_eq!(r.end, "2026-10-17T19:30");
    assert_eq!(r.category_id.as_deref(), Some("cat-2"));
    assert_eq!(r.priority, Priority::High);
}

#[test]
fn test_date_label_with_all_day_phrase() {
    let raw = "Название: Конференция\nДата: 20.11.2026\nВесь день";
    let out = ru().parse_on(raw, &categories(), today());

    let r = &out.records[0];
    assert!(r.is_all_day);
    assert_eq!(r.start, "2026-11-20");
    assert_eq!(r.start, r.end);
}

#[test]
fn test_out_of_range_time_means_all_day_today() {
    let out = en().parse_on("Title: Run\nTime: 25:99", &categories(), today());
    let r = &out.records[0];
    assert!(r.is_all_day);
    assert_eq!(r.start, "2026-10-16");
}

#[test]
fn test_empty_block_between_separators_is_reported() {
    let engine = ru();
    let sep = &engine.locale().separator;
    let raw = format!("Купить хлеб\n{sep}\n\n{sep}\nПозвонить маме завтра");
    let out = engine.parse_on(&raw, &categories(), today());

    let titles: Vec<&str> = out.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Купить хлеб", "Позвонить маме"]);
    assert_eq!(out.warning.as_deref(), Some("блок #2 пуст"));
}

#[test]
fn test_malformed_block_does_not_sink_the_rest() {
    let engine = en();
    let sep = &engine.locale().separator;
    let raw = format!("Priority: Low\nCategory: Work\n{sep}\nTitle: Report\nDate: 2026-11-02");
    let out = engine.parse_on(&raw, &categories(), today());

    assert!(out.is_success());
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].title, "Report");
    assert_eq!(out.records[0].start, "2026-11-02");
    assert_eq!(
        out.warning.as_deref(),
        Some("block #1 does not contain enough information to create a task")
    );
}

#[test]
fn test_nothing_usable_is_a_failure() {
    let out = en().parse_on("Priority: Low", &categories(), today());
    assert!(!out.is_success());
    assert!(out.warning.is_some());

    let out = en().parse_on("", &categories(), today());
    assert_eq!(out.warning.as_deref(), Some("no text to parse."));
}

#[test]
fn test_high_priority_wins_over_low() {
    let out = en().parse_on("Title: Taxes\nurgent, but low effort", &categories(), today());
    assert_eq!(out.records[0].priority, Priority::High);

    let out = ru().parse_on("Отчёт\nПриоритет: низкий, но срочно", &categories(), today());
    assert_eq!(out.records[0].priority, Priority::High);
}

#[test]
fn test_separator_count_gives_block_count() {
    let engine = en();
    let sep = engine.locale().separator.clone();
    for n in 0..4usize {
        let raw = (0..=n)
            .map(|i| format!("Task number {}", i))
            .collect::<Vec<_>>()
            .join(&format!("\n{}\n", sep));
        let out = engine.parse_on(&raw, &categories(), today());
        assert_eq!(out.records.len(), n + 1);
        assert!(out.warning.is_none());
    }
}

fn comparable(r: &TaskRecord) -> (String, Option<Schedule>, String, String, Option<String>, Priority) {
    (
        r.title.clone(),
        r.schedule(),
        r.description.clone(),
        r.location.clone(),
        r.category_id.clone(),
        r.priority,
    )
}

#[test]
fn test_rendered_block_reparses_to_same_fields() {
    let replies = [
        (
            Locale::english(),
            "Team sync tomorrow from 10:00 to 11:15\nbring the slides\nLocation: Room 4\nCategory: Work\n--- NEW TASK ---\nTitle: Dentist\nDate: 2026-11-03\nTime: all day\nPriority: Unimportant\n--- NEW TASK ---\nRead a chapter in the evening",
        ),
        (
            Locale::russian(),
            "Название: Созвон с клиентом\nДата: послезавтра\nВремя: с 15:00 до 16:00\nОписание: обсудить договор\nи сроки\nМесто: офис\nПриоритет: Важно\n--- НОВАЯ ЗАДАЧА ---\nЛекция\nКатегория: Study\nДата: 02.12.2026",
        ),
    ];

    for (locale, reply) in replies {
        let engine = Engine::new(locale.clone()).unwrap();
        let first = engine.parse_on(reply, &categories(), today());
        assert!(first.warning.is_none(), "{:?}", first.warning);
        assert!(first.records.len() >= 2);

        for record in &first.records {
            let block = render_block(record, &locale);
            let again = engine.parse_on(&block, &categories(), today());
            assert_eq!(again.records.len(), 1, "block:\n{}", block);
            assert_eq!(comparable(&again.records[0]), comparable(record), "block:\n{}", block);
        }
    }
}
