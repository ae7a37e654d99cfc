use std::path::Path;

use console::Style;
use feedwatch_core::level::{CalibrationReference, FillStatus, LevelReading};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

fn status_style(status: FillStatus) -> Style {
    match status {
        FillStatus::Empty | FillStatus::VeryLow => Style::new().red().bold(),
        FillStatus::Low => Style::new().yellow().bold(),
        FillStatus::Medium => Style::new().yellow(),
        FillStatus::Good | FillStatus::Full => Style::new().green().bold(),
    }
}

/// Print a one-shot measurement report.
pub fn print_measurement(photo: &Path, reference: &CalibrationReference, reading: &LevelReading) {
    let s = Styles::new();
    let status = status_style(reading.status);

    println!();
    println!("  {}", s.title.apply_to("Feed Level"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(10)));
    println!();
    println!(
        "  {:<16}{}",
        s.label.apply_to("Photo"),
        s.path.apply_to(photo.display())
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Empty density"),
        s.value.apply_to(format!("{:.2}%", reference.empty_density))
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Full density"),
        s.value.apply_to(format!("{:.2}%", reference.full_density))
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Current density"),
        s.value.apply_to(format!("{:.2}%", reading.density))
    );
    println!();
    println!(
        "  {:<16}{}",
        s.label.apply_to("Level"),
        status.apply_to(format!("{:.0}%", reading.level))
    );
    println!(
        "  {:<16}{}",
        s.label.apply_to("Status"),
        status.apply_to(reading.status)
    );
    println!();
}
