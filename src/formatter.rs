//! Text rendering of month grids, keypads and appointment pages with
//! localization and color support.

use chrono::{Datelike, Locale, NaiveDate, NaiveTime, Weekday};
use unicode_width::UnicodeWidthStr;

use crate::calendar::weekday_order;
use crate::error::Error;
use crate::keypad::{Decimal, NumberOptions};
use crate::types::{COLOR_RESET, ColumnsMode, DayCell, GRID_WIDTH, MonthGrid, RenderContext};

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .ok()
        .and_then(|tag| parse_locale(&tag).ok())
        .unwrap_or(Locale::en_US)
}

/// Parse a locale tag such as `it`, `it-IT`, `it_IT` or `it_IT.UTF-8`.
///
/// A bare language code maps to the locale of the same-named country.
pub fn parse_locale(tag: &str) -> Result<Locale, Error> {
    let base = tag
        .split('.')
        .next()
        .unwrap_or(tag)
        .split('@')
        .next()
        .unwrap_or(tag)
        .replace('-', "_");

    if let Ok(locale) = base.parse::<Locale>() {
        return Ok(locale);
    }
    if !base.contains('_') {
        let fallback = match base.as_str() {
            "en" => "en_US".to_string(),
            lang => format!("{}_{}", lang, lang.to_uppercase()),
        };
        if let Ok(locale) = fallback.parse::<Locale>() {
            return Ok(locale);
        }
    }
    Err(Error::UnknownLocale(tag.to_string()))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalized month name for `locale`.
pub fn get_month_name(month: u32, locale: Locale) -> String {
    match NaiveDate::from_ymd_opt(2000, month, 1) {
        Some(date) => capitalize(&date.format_localized("%B", locale).to_string()),
        None => month.to_string(),
    }
}

/// Center text within a specified width, accounting for Unicode character widths.
fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

fn paint(ctx: &RenderContext, color: &str, text: &str) -> String {
    if ctx.color {
        format!("{}{}{}", color, text, COLOR_RESET)
    } else {
        text.to_string()
    }
}

/// Format month header with optional year and color.
pub fn format_month_header(ctx: &RenderContext, year: i32, month: u32, width: usize) -> String {
    let month_name = get_month_name(month, ctx.locale);
    let header = if ctx.show_year_in_header {
        format!("{} {}", month_name, year)
    } else {
        month_name
    };
    paint(ctx, ctx.theme.header, &center_text(&header, width))
}

/// Get 2-character weekday abbreviation for `locale`.
pub fn get_weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    // 2000-01-02 was a Sunday
    let base_date = NaiveDate::from_ymd_opt(2000, 1, 2).unwrap_or_default();
    let date = base_date + chrono::Days::new(u64::from(weekday.num_days_from_sunday()));
    let day_name = date.format_localized("%a", locale).to_string();
    capitalize(&day_name.chars().take(2).collect::<String>())
}

/// Format weekday header row in the grid's column order.
pub fn format_weekday_headers(ctx: &RenderContext) -> String {
    let names: Vec<String> = weekday_order(ctx.week_offset)
        .iter()
        .map(|&w| format!("{:>2}", get_weekday_short_name(w, ctx.locale)))
        .collect();
    paint(ctx, ctx.theme.weekdays, &names.join(" "))
}

/// Format day cell with color highlighting.
///
/// Color priority: selected > today > overflow > weekend > regular
fn format_day(ctx: &RenderContext, cell: &DayCell, selected: Option<NaiveDate>) -> String {
    if cell.is_overflow() && !ctx.show_overflow {
        return "  ".to_string();
    }

    let day_str = format!("{:>2}", cell.day());
    let color = if selected == Some(cell.date) {
        Some(ctx.theme.selected)
    } else if ctx.today == cell.date {
        Some(ctx.theme.today)
    } else if cell.is_overflow() {
        Some(ctx.theme.overflow)
    } else if matches!(cell.weekday(), Weekday::Sat | Weekday::Sun) {
        Some(ctx.theme.weekend)
    } else {
        None
    };

    match color {
        Some(color) => paint(ctx, color, &day_str),
        None => day_str,
    }
}

/// Format month as lines: header, weekday names, then six week rows.
pub fn format_month_grid(
    ctx: &RenderContext,
    grid: &MonthGrid,
    selected: Option<NaiveDate>,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);
    lines.push(format_month_header(ctx, grid.year(), grid.month(), GRID_WIDTH));
    lines.push(format_weekday_headers(ctx));

    for week in grid.weeks() {
        let days: Vec<String> = week
            .iter()
            .map(|cell| format_day(ctx, cell, selected))
            .collect();
        lines.push(days.join(" "));
    }

    lines
}

/// Lay out several month grids side by side.
pub fn format_months_side_by_side(
    ctx: &RenderContext,
    grids: &[MonthGrid],
    selected: Option<NaiveDate>,
) -> Vec<String> {
    let rendered: Vec<Vec<String>> = grids
        .iter()
        .map(|g| format_month_grid(ctx, g, selected))
        .collect();
    let max_height = rendered.iter().map(|g| g.len()).max().unwrap_or(0);

    (0..max_height)
        .map(|row| {
            let mut line = String::new();
            for (i, lines) in rendered.iter().enumerate() {
                let text = lines.get(row).map(String::as_str).unwrap_or("");
                line.push_str(text);
                // Escape codes have no width, measure the plain text
                let visible = strip_ansi(text).width();
                line.push_str(&" ".repeat(GRID_WIDTH.saturating_sub(visible)));
                if i < rendered.len() - 1 {
                    line.push_str(&" ".repeat(ctx.gutter_width));
                }
            }
            line.trim_end().to_string()
        })
        .collect()
}

fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for code in chars.by_ref() {
                if code == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Number of months per row for multi-month output.
pub fn months_per_row(ctx: &RenderContext) -> u32 {
    match ctx.columns {
        ColumnsMode::Fixed(n) => n,
        ColumnsMode::Auto => {
            // clamp to 1-3 for readability
            let month_width = GRID_WIDTH + ctx.gutter_width;
            if let Some(term_width) = get_terminal_width() {
                (term_width / month_width as u32).clamp(1, 3)
            } else {
                3
            }
        }
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<u32> {
    terminal_size::terminal_size().map(|(w, _)| u32::from(w.0))
}

/// Keypad layout with keys unavailable under `options` left blank.
pub fn format_keypad(options: &NumberOptions) -> Vec<String> {
    let minus = if options.negative { "[-]" } else { "[ ]" };
    let point = if options.decimal == Decimal::Disabled {
        "[ ]"
    } else {
        "[.]"
    };
    vec![
        "[7] [8] [9]".to_string(),
        "[4] [5] [6]".to_string(),
        "[1] [2] [3]".to_string(),
        format!("{} [0] {}", minus, point),
    ]
}

/// One line per day: weekday, date and the bookable times.
pub fn format_appointment_page(
    ctx: &RenderContext,
    page: &[(NaiveDate, &[NaiveTime])],
    selected: Option<chrono::NaiveDateTime>,
) -> Vec<String> {
    page.iter()
        .map(|(date, times)| {
            let times: Vec<String> = times
                .iter()
                .map(|t| {
                    let text = t.format("%H:%M").to_string();
                    if selected == Some(date.and_time(*t)) {
                        paint(ctx, ctx.theme.selected, &text)
                    } else {
                        text
                    }
                })
                .collect();
            format!(
                "{} {:02}.{:02}  {}",
                get_weekday_short_name(date.weekday(), ctx.locale),
                date.day(),
                date.month(),
                times.join(" ")
            )
        })
        .collect()
}

/// Print single month grid.
pub fn print_month(ctx: &RenderContext, grid: &MonthGrid, selected: Option<NaiveDate>) {
    for line in format_month_grid(ctx, grid, selected) {
        println!("{}", line);
    }
}

/// Print months in rows of [`months_per_row`].
pub fn print_months(ctx: &RenderContext, grids: &[MonthGrid], selected: Option<NaiveDate>) {
    let per_row = months_per_row(ctx).max(1) as usize;
    for chunk in grids.chunks(per_row) {
        for line in format_months_side_by_side(ctx, chunk, selected) {
            println!("{}", line);
        }
    }
}
