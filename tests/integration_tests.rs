//! Integration tests: grid properties over many months, and the CLI end to end.

use assert_cmd::Command;
use chrono::{Datelike, Days, NaiveDate};
use predicates::prelude::*;

use numpad::calendar::{build_month_grid, days_in_month};
use numpad::types::{CELLS_PER_MONTH, WeekOffset};

fn numpad() -> Command {
    let mut cmd = Command::cargo_bin("numpad").unwrap();
    cmd.env("NUMPAD_TEST_TIME", "2026-02-18")
        .env_remove("RUST_LOG")
        .args(["--no-color", "--locale", "en_US"]);
    cmd
}

fn month_starts() -> impl Iterator<Item = NaiveDate> {
    [1899, 1900, 1999, 2000, 2023, 2024, 2100]
        .into_iter()
        .flat_map(|year| (1..=12).map(move |month| NaiveDate::from_ymd_opt(year, month, 1).unwrap()))
}

fn offsets() -> impl Iterator<Item = WeekOffset> {
    (0..7).map(|offset| WeekOffset::new(offset).unwrap())
}

// ===========================================================================
// Grid properties
// ===========================================================================

mod grid_properties {
    use super::*;

    #[test]
    fn always_forty_two_contiguous_days() {
        for start in month_starts() {
            for offset in offsets() {
                let grid = build_month_grid(start, offset).unwrap();
                let cells = grid.cells();
                assert_eq!(cells.len(), CELLS_PER_MONTH, "{start} offset {offset:?}");
                for pair in cells.windows(2) {
                    assert_eq!(pair[0].date + Days::new(1), pair[1].date);
                }
            }
        }
    }

    #[test]
    fn first_cell_in_first_column() {
        for start in month_starts() {
            for offset in offsets() {
                let grid = build_month_grid(start, offset).unwrap();
                assert_eq!(grid.cells()[0].weekday(), offset.first_weekday());
                assert!(grid.leading_overflow() < 7);
            }
        }
    }

    #[test]
    fn month_cells_match_month_length() {
        for start in month_starts() {
            for offset in offsets() {
                let grid = build_month_grid(start, offset).unwrap();
                let in_month: Vec<_> = grid.cells().iter().filter(|c| !c.is_overflow()).collect();
                assert_eq!(
                    in_month.len() as u32,
                    days_in_month(start.year(), start.month())
                );
                assert!(
                    in_month
                        .iter()
                        .all(|c| c.date.month() == start.month() && c.date.year() == start.year())
                );
                assert_eq!(in_month[0].date, start);
            }
        }
    }

    #[test]
    fn overflow_flags_ordered() {
        for start in month_starts() {
            for offset in offsets() {
                let grid = build_month_grid(start, offset).unwrap();
                let cells = grid.cells();
                let lead = grid.leading_overflow();
                let trail = grid.trailing_overflow();

                assert!(cells[..lead].iter().all(|c| c.belongs_to_previous_month));
                assert!(cells[CELLS_PER_MONTH - trail..]
                    .iter()
                    .all(|c| c.belongs_to_next_month));
                assert!(
                    cells
                        .iter()
                        .all(|c| !(c.belongs_to_previous_month && c.belongs_to_next_month))
                );
                assert!(trail >= 1, "six rows always reach the next month");
            }
        }
    }

    #[test]
    fn rebuilding_is_stable() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let first = build_month_grid(start, WeekOffset::MONDAY).unwrap();
        let second = build_month_grid(start, WeekOffset::MONDAY).unwrap();
        assert_eq!(first, second);
    }
}

// ===========================================================================
// Calendar command
// ===========================================================================

mod calendar_cli {
    use super::*;

    #[test]
    fn current_month_by_default() {
        numpad()
            .arg("calendar")
            .assert()
            .success()
            .stdout(predicate::str::contains("February 2026"))
            .stdout(predicate::str::contains(" 1  2  3  4  5  6  7"));
    }

    #[test]
    fn leap_february_sunday_first() {
        numpad()
            .args(["calendar", "2", "2024"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Su Mo Tu We Th Fr Sa"))
            .stdout(predicate::str::contains("28 29 30 31  1  2  3"))
            .stdout(predicate::str::contains(" 3  4  5  6  7  8  9"));
    }

    #[test]
    fn monday_first() {
        numpad()
            .args(["calendar", "-m", "feb", "2023"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Mo Tu We Th Fr Sa Su"))
            .stdout(predicate::str::contains("30 31  1  2  3  4  5"));
    }

    #[test]
    fn selection_in_locale_format() {
        numpad()
            .args([
                "calendar",
                "--locale",
                "it",
                "--select",
                "2024-02-14",
                "-f",
                "DD MMMM YYYY",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Febbraio 2024"))
            .stdout(predicate::str::contains("selected: 14 febbraio 2024"));
    }

    #[test]
    fn navigation_moves_month() {
        numpad()
            .args(["calendar", "12", "2024", "--go", "next", "--go", "next"])
            .assert()
            .success()
            .stdout(predicate::str::contains("February 2025"));
    }

    #[test]
    fn several_months() {
        numpad()
            .args(["calendar", "-n", "2", "-c", "2", "1", "2024"])
            .assert()
            .success()
            .stdout(predicate::str::contains("January 2024").and(predicate::str::contains(
                "February 2024",
            )));
    }

    #[test]
    fn selection_with_time() {
        numpad()
            .args([
                "calendar",
                "--select",
                "1978-12-29",
                "--time-format",
                " HH:mm",
                "--time",
                "1000",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("December 1978"))
            .stdout(predicate::str::contains("selected: 29.12.1978 10:00"))
            .stdout(predicate::str::contains("value: 1978-12-29 10:00:00"));
    }

    #[test]
    fn partial_time() {
        numpad()
            .args([
                "calendar",
                "--select",
                "1978-12-29",
                "-f",
                "DD-MM-YYYY",
                "--time-format",
                " HH:mm",
                "--time",
                "10",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("selected: 29-12-1978 10:__"))
            .stdout(predicate::str::contains("value:").not());
    }

    #[test]
    fn time_keys_need_time_format() {
        numpad()
            .args(["calendar", "--time", "1000"])
            .assert()
            .failure();
    }

    #[test]
    fn week_offset_out_of_range() {
        numpad()
            .args(["calendar", "-o", "7"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid week offset: 7"));
    }

    #[test]
    fn zero_months() {
        numpad()
            .args(["calendar", "-n", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must be positive"));
    }

    #[test]
    fn invalid_month() {
        numpad()
            .args(["calendar", "13", "2024"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid month: 13"));
    }
}

// ===========================================================================
// Number command
// ===========================================================================

mod number_cli {
    use super::*;

    #[test]
    fn negative_with_two_decimals() {
        numpad()
            .args(["number", "--decimal", "2", "--", "-12.345"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[-] [0] [.]"))
            .stdout(predicate::str::contains("display: -12.34"))
            .stdout(predicate::str::contains("rejected: 1"))
            .stdout(predicate::str::contains("value: -12.34"));
    }

    #[test]
    fn negative_disabled() {
        numpad()
            .args(["number", "--no-negative", "--", "-5"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[ ] [0] [.]"))
            .stdout(predicate::str::contains("value: 5"));
    }

    #[test]
    fn odd_validator() {
        numpad()
            .args(["number", "--odd", "12"])
            .assert()
            .success()
            .stdout(predicate::str::contains("rejected: 1"))
            .stdout(predicate::str::contains("value: 1"));
    }

    #[test]
    fn empty_value() {
        numpad()
            .arg("number")
            .assert()
            .success()
            .stdout(predicate::str::contains("display: 0"))
            .stdout(predicate::str::contains("value: none"));
    }

    #[test]
    fn unknown_key() {
        numpad()
            .args(["number", "12x"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("numpad:"));
    }
}

// ===========================================================================
// Datetime command
// ===========================================================================

mod datetime_cli {
    use super::*;

    #[test]
    fn full_datetime() {
        numpad()
            .args(["datetime", "-f", "DD-MM-YYYY HH:mm", "291219781000"])
            .assert()
            .success()
            .stdout(predicate::str::contains("display: 29-12-1978 10:00"))
            .stdout(predicate::str::contains("value: 1978-12-29 10:00:00"));
    }

    #[test]
    fn partial_time() {
        numpad()
            .args(["datetime", "21"])
            .assert()
            .success()
            .stdout(predicate::str::contains("display: 21:__"))
            .stdout(predicate::str::contains("value: incomplete"));
    }

    #[test]
    fn initial_value() {
        numpad()
            .args(["datetime", "--value", "21:45"])
            .assert()
            .success()
            .stdout(predicate::str::contains("value: 21:45:00"));
    }

    #[test]
    fn partial_formats() {
        numpad()
            .args(["datetime", "-f", "MM/YY", "1225"])
            .assert()
            .success()
            .stdout(predicate::str::contains("value: 2025-12-01"));
        numpad()
            .args(["datetime", "-f", "DD.MM", "2912"])
            .assert()
            .success()
            .stdout(predicate::str::contains("value: 2026-12-29"));
        numpad()
            .args(["datetime", "-f", "HH", "21"])
            .assert()
            .success()
            .stdout(predicate::str::contains("value: 21:00:00"));
    }

    #[test]
    fn impossible_date() {
        numpad()
            .args(["datetime", "-f", "DD-MM-YYYY", "31022023"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cannot parse `31-02-2023`"));
    }

    #[test]
    fn textual_format_rejected() {
        numpad()
            .args(["datetime", "-f", "DD MMMM YYYY"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid date format"));
    }
}

// ===========================================================================
// Appointment command
// ===========================================================================

mod appointment_cli {
    use super::*;

    #[test]
    fn lists_and_selects_slots() {
        numpad()
            .args([
                "appointment",
                "--from",
                "2024-06-03",
                "--select",
                "03-06-2024 10:30",
                "03-06-2024 10:30",
                "03-06-2024 09:00",
                "04-06-2024 11:00",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Mo 03.06  09:00 10:30"))
            .stdout(predicate::str::contains("Tu 04.06  11:00"))
            .stdout(predicate::str::contains("selected: 03-06-2024 10:30"));
    }

    #[test]
    fn nothing_after_start() {
        numpad()
            .args(["appointment", "--from", "2024-07-01", "03-06-2024 09:00"])
            .assert()
            .success()
            .stdout(predicate::str::contains("no appointments available"));
    }

    #[test]
    fn unavailable_selection() {
        numpad()
            .args([
                "appointment",
                "--from",
                "2024-06-03",
                "--select",
                "03-06-2024 12:00",
                "03-06-2024 09:00",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not available"));
    }

    #[test]
    fn help_lists_examples() {
        numpad()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Examples:"));
    }
}
