use macroquad::prelude::*;

use crate::application::SimStats;

/// Format large numbers with K/M suffixes
fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draw simulation counters in the top-left corner
pub fn draw_overlay(stats: &SimStats, rule_name: &str, tick_rate: f64) {
    draw_rectangle(4.0, 4.0, 190.0, 84.0, Color::from_rgba(0, 0, 0, 180));

    let failed_color = if stats.failed_ticks == 0 {
        Color::from_rgba(150, 150, 150, 255)
    } else {
        Color::from_rgba(255, 80, 80, 255)
    };

    let lines = [
        (format!("{} @ {:.0} gen/s", rule_name, tick_rate), WHITE),
        (
            format!("Generation: {}", format_number(stats.generation)),
            Color::from_rgba(0, 255, 150, 255),
        ),
        (format!("Edits: {}", format_number(stats.edits_applied)), GRAY),
        (format!("Failed ticks: {}", stats.failed_ticks), failed_color),
        (format!("FPS: {}", get_fps()), GRAY),
    ];

    for (i, (text, color)) in lines.iter().enumerate() {
        draw_text(text, 10.0, 20.0 + i as f32 * 15.0, 16.0, *color);
    }
}
