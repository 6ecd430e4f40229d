//! Editor demo CLI.
//!
//! # Usage
//! ```ignore
//! numpad calendar               // Current month
//! numpad calendar -m 2 2024     // February 2024, Monday first
//! numpad calendar --select 1978-12-29 --time-format ' HH:mm' --time 1000
//! numpad number --decimal 2 12.5
//! numpad datetime -f HH:mm 2145
//! numpad appointment '03-06-2024 09:00' '03-06-2024 10:30'
//! ```

use chrono::Months;

use numpad::appointment::{AppointmentBook, AppointmentPicker};
use numpad::args::{
    AppointmentArgs, Args, CalendarArgs, Command, DateTimeArgs, NumberArgs, get_display_month,
    parse_iso_date,
};
use numpad::calendar::{CalendarView, DateTimePicker};
use numpad::datetime::{DateFormat, DateTimeEditor, DateTimeValue};
use numpad::error::Error;
use numpad::formatter::{format_appointment_page, format_keypad, print_month, print_months};
use numpad::keypad::{NumberEditor, NumberOptions, parse_keys};
use numpad::types::{MonthGrid, RenderContext};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("numpad: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let ctx = RenderContext::new(args)?;

    match &args.command {
        Command::Calendar(cal) => run_calendar(&ctx, cal),
        Command::Number(number) => run_number(number),
        Command::Datetime(datetime) => run_datetime(datetime),
        Command::Appointment(appointment) => run_appointment(&ctx, appointment),
    }
}

fn run_calendar(ctx: &RenderContext, args: &CalendarArgs) -> Result<(), Error> {
    if args.months_count == 0 {
        return Err(Error::Usage("Number of months must be positive".to_string()));
    }
    let format = DateFormat::parse(&args.format)?;

    let selected = args.select.as_deref().map(parse_iso_date).transpose()?;
    let mut view = CalendarView::new(selected.unwrap_or(ctx.today));
    if args.month_arg.is_some() || selected.is_none() {
        view.month = get_display_month(args, ctx.today, ctx.locale)?;
    }
    for &navigation in &args.navigation {
        view = view.navigate(navigation.into());
    }

    let grids = (0..args.months_count)
        .map(|i| {
            let month = view
                .month
                .checked_add_months(Months::new(i))
                .ok_or(Error::DateOutOfRange)?;
            MonthGrid::build(month, ctx.week_offset)
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let [grid] = grids.as_slice() {
        print_month(ctx, grid, selected);
    } else {
        print_months(ctx, &grids, selected);
    }

    match &args.time_format {
        Some(time_format) => {
            let time_format = DateFormat::parse(time_format)?;
            let mut picker =
                DateTimePicker::new(selected.unwrap_or(ctx.today), format, time_format)?;
            let keys = parse_keys(args.time_keys.as_deref().unwrap_or(""))?;
            let rejected = keys.into_iter().filter(|&key| !picker.press(key)).count();

            println!();
            println!("selected: {}", picker.display(ctx.locale));
            if rejected > 0 {
                println!("rejected: {}", rejected);
            }
            if picker.is_complete() {
                println!("value: {}", picker.value()?);
            }
        }
        None => {
            if let Some(date) = selected {
                println!();
                println!(
                    "selected: {}",
                    format.format(DateTimeValue::Date(date), ctx.locale)
                );
            }
        }
    }
    Ok(())
}

/// Positive odd integers only.
fn odd_validator(value: &str) -> bool {
    value.parse::<i64>().is_ok_and(|n| n > 0 && n % 2 != 0)
}

fn run_number(args: &NumberArgs) -> Result<(), Error> {
    let options = NumberOptions {
        decimal: args.decimal,
        negative: !args.no_negative,
        key_validator: args.odd.then_some(odd_validator as fn(&str) -> bool),
    };
    let mut editor = match &args.value {
        Some(value) => NumberEditor::with_value(options, value)?,
        None => NumberEditor::new(options),
    };

    let rejected = parse_keys(&args.keys)?
        .into_iter()
        .filter(|&key| !editor.press(key))
        .count();

    for line in format_keypad(editor.options()) {
        println!("{}", line);
    }
    println!("display: {}", editor.display());
    if rejected > 0 {
        println!("rejected: {}", rejected);
    }
    match editor.confirm() {
        Some(value) => println!("value: {}", value),
        None => println!("value: none"),
    }
    Ok(())
}

fn run_datetime(args: &DateTimeArgs) -> Result<(), Error> {
    let format = DateFormat::parse(&args.format)?;
    let mut editor = match &args.value {
        Some(value) => DateTimeEditor::with_value(format, value)?,
        None => DateTimeEditor::new(format)?,
    };

    let rejected = parse_keys(&args.keys)?
        .into_iter()
        .filter(|&key| !editor.press(key))
        .count();

    println!("display: {}", editor.display());
    if rejected > 0 {
        println!("rejected: {}", rejected);
    }
    if editor.is_complete() {
        println!("value: {}", editor.value()?);
    } else {
        println!("value: incomplete");
    }
    Ok(())
}

fn run_appointment(ctx: &RenderContext, args: &AppointmentArgs) -> Result<(), Error> {
    let format = DateFormat::parse(&args.format)?;
    let book = AppointmentBook::parse(&args.slots, &format)?;
    let from = args.from.as_deref().map(parse_iso_date).transpose()?;

    let mut picker =
        AppointmentPicker::new(book, args.days).starting_at(from.unwrap_or(ctx.today));
    if let Some(slot) = &args.select {
        match format.parse_value(slot)? {
            DateTimeValue::DateTime(slot) => picker.select(slot)?,
            _ => {
                return Err(Error::Parse {
                    value: slot.clone(),
                    format: format.pattern().to_string(),
                });
            }
        }
    }

    let page = picker.current_page();
    if page.is_empty() {
        println!("no appointments available");
    }
    for line in format_appointment_page(ctx, &page, picker.selection()) {
        println!("{}", line);
    }
    if let Some(slot) = picker.selection() {
        println!();
        println!(
            "selected: {}",
            format.format(DateTimeValue::DateTime(slot), ctx.locale)
        );
    }
    Ok(())
}
