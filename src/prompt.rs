// File: ./src/prompt.rs
// System prompt that makes the assistant answer in the block format the
// engine parses. Separator and labels come from the same `Locale`.
use crate::config::AssistantProfile;
use crate::engine::format::label_name;
use crate::model::{Category, Locale};
use chrono::{Datelike, NaiveDate};

const RU_WEEKDAYS: [&str; 7] = [
    "понедельник",
    "вторник",
    "среда",
    "четверг",
    "пятница",
    "суббота",
    "воскресенье",
];

const RU_MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

fn long_date(date: NaiveDate, locale: &Locale) -> String {
    if locale.is_russian() {
        format!(
            "{}, {} {} {} г.",
            RU_WEEKDAYS[date.weekday().num_days_from_monday() as usize],
            date.day(),
            RU_MONTHS_GENITIVE[date.month0() as usize],
            date.year()
        )
    } else {
        date.format("%A, %-d %B %Y").to_string()
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.trim().to_string()
    }
}

struct Names {
    title: String,
    date: String,
    time: String,
    description: String,
    location: String,
    category: String,
    priority: String,
}

impl Names {
    fn of(locale: &Locale) -> Self {
        let l = &locale.labels;
        Self {
            title: label_name(&l.title, "Title"),
            date: label_name(&l.date, "Date"),
            time: label_name(&l.time, "Time"),
            description: label_name(&l.description, "Description"),
            location: label_name(&l.location, "Location"),
            category: label_name(&l.category, "Category"),
            priority: label_name(&l.priority, "Priority"),
        }
    }
}

pub fn build_system_prompt(
    profile: &AssistantProfile,
    categories: &[Category],
    locale: &Locale,
    today: NaiveDate,
) -> String {
    let n = Names::of(locale);
    let sep = locale.separator.trim();
    let first_cat = categories
        .first()
        .map(|c| c.name.clone())
        .unwrap_or_else(|| n.category.clone());
    let high = label_name(&locale.keywords.high_priority, "High");
    let tomorrow = locale
        .keywords
        .tomorrow
        .first()
        .cloned()
        .unwrap_or_default();
    let e = &profile.energy;

    if locale.is_russian() {
        let cats = categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Ты - AI ассистент для планирования задач в календаре. Текущая дата: {date}.
Пользовательские настройки (для контекста):
- Род занятий: {occupation}.
- Рабочее время: с {start} до {end}.
- Рабочие дни: {days}.
- Энергия (утро/день/вечер/ночь): {em}/{ea}/{ee}/{en}.
- Блоки работы: {chunk} мин, перерывы: {brk} мин.
- Категории задач: {cats}.
- Заметки: {notes}.

Твоя задача: проанализировать запрос пользователя и описать ОДНУ или НЕСКОЛЬКО задач для календаря.
Каждую задачу описывай отдельно, разделяя задачи строкой \"{sep}\".

Для каждой задачи используй строки вида \"Метка: значение\":
1. {t}: четкое название задачи.
2. {d}: \"сегодня\", \"завтра\", \"послезавтра\" или дата ДД.ММ.ГГГГ.
3. {tm}: время начала (\"14:30\") или промежуток (\"с 10:00 до 12:00\", \"14:00-16:30\"). Если время не указано, напиши \"весь день\".
4. {ds}: краткое описание (если есть детали).
5. {l}: место (если указано).
6. {c}: одна из категорий выше.
7. {p}: \"Важно\" или \"Неважно\".

Пример ответа для \"Встреча с Петровым завтра в 11 и созвон с клиентом с 15:00 до 16:00\":
{t}: Встреча с Петровым
{d}: {tomorrow}
{tm}: 11:00
{c}: {cat}
{sep}
{t}: Созвон с клиентом
{d}: {tomorrow}
{tm}: с 15:00 до 16:00
{c}: {cat}
{p}: {high}

Отвечай ТОЛЬКО текстом описания задач, разделенных маркером. Без приветствий.
",
            date = long_date(today, locale),
            occupation = or_placeholder(&profile.occupation, "не указан"),
            start = or_placeholder(&profile.work_start_time, "N/A"),
            end = or_placeholder(&profile.work_end_time, "N/A"),
            days = or_placeholder(&profile.preferred_work_days.join(", "), "N/A"),
            em = e.morning,
            ea = e.afternoon,
            ee = e.evening,
            en = e.night,
            chunk = profile.task_chunking_minutes,
            brk = profile.break_minutes,
            cats = or_placeholder(&cats, "Нет категорий"),
            notes = or_placeholder(&profile.notes, "нет"),
            sep = sep,
            t = n.title,
            d = n.date,
            tm = n.time,
            ds = n.description,
            l = n.location,
            c = n.category,
            p = n.priority,
            tomorrow = tomorrow,
            cat = first_cat,
            high = high,
        )
    } else {
        let cats = categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "You are an AI assistant that plans tasks in a calendar. Today is {date}.
User settings (for context):
- Occupation: {occupation}.
- Working hours: {start} to {end}.
- Working days: {days}.
- Energy (morning/afternoon/evening/night): {em}/{ea}/{ee}/{en}.
- Focus blocks: {chunk} min, breaks: {brk} min.
- Task categories: {cats}.
- Notes: {notes}.

Your job: read the user's request and describe ONE or MORE calendar tasks.
Describe each task separately and put the line \"{sep}\" between tasks.

For each task write \"Label: value\" lines:
1. {t}: a clear task title.
2. {d}: \"today\", \"tomorrow\", \"day after tomorrow\" or a date as YYYY-MM-DD.
3. {tm}: start time (\"14:30\") or a range (\"from 10:00 to 12:00\", \"14:00-16:30\"). If there is no time, write \"all day\".
4. {ds}: a short description (if there are details).
5. {l}: the place (if given).
6. {c}: one of the categories above.
7. {p}: \"Important\" or \"Unimportant\".

Example answer for \"Meeting with Peter tomorrow at 11 and a client call from 15:00 to 16:00\":
{t}: Meeting with Peter
{d}: {tomorrow}
{tm}: 11:00
{c}: {cat}
{sep}
{t}: Client call
{d}: {tomorrow}
{tm}: from 15:00 to 16:00
{c}: {cat}
{p}: {high}

Answer ONLY with the task descriptions separated by the marker. No greetings.
",
            date = long_date(today, locale),
            occupation = or_placeholder(&profile.occupation, "not specified"),
            start = or_placeholder(&profile.work_start_time, "N/A"),
            end = or_placeholder(&profile.work_end_time, "N/A"),
            days = or_placeholder(&profile.preferred_work_days.join(", "), "N/A"),
            em = e.morning,
            ea = e.afternoon,
            ee = e.evening,
            en = e.night,
            chunk = profile.task_chunking_minutes,
            brk = profile.break_minutes,
            cats = or_placeholder(&cats, "No categories"),
            notes = or_placeholder(&profile.notes, "none"),
            sep = sep,
            t = n.title,
            d = n.date,
            tm = n.time,
            ds = n.description,
            l = n.location,
            c = n.category,
            p = n.priority,
            tomorrow = tomorrow,
            cat = first_cat,
            high = high,
        )
    }
}

/// The worked example at the end of a prompt, as the engine would see it.
pub fn example_reply(prompt: &str) -> Option<&str> {
    let start = prompt.find("\":\n")? + 3;
    let end = prompt.rfind("\n\n")?;
    (start < end).then(|| &prompt[start..end])
}
