//! Terminal rendering of journal data.

use crate::db::log::LogEntry;
use crate::models::action_target::ActionTarget;
use crate::models::activity::{Activity, DayStatus};
use ansi_term::Colour;
use regex::Regex;
use std::sync::OnceLock;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ansi pattern is valid"));
    re.replace_all(s, "").into_owned()
}

fn colour_for_kind(kind: ActionTarget) -> Colour {
    match kind {
        ActionTarget::CheckIn => Colour::Green,
        ActionTarget::CheckOut => Colour::Red,
    }
}

/// Color for an internal log operation
fn colour_for_operation(op: &str) -> Colour {
    match op {
        "login" => Colour::Green,
        "logout" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn yes_no(flag: bool) -> String {
    if flag {
        Colour::Green.paint("yes").to_string()
    } else {
        Colour::Fixed(8).paint("no").to_string()
    }
}

pub fn activity_line(a: &Activity) -> String {
    let coords = match (a.lat, a.lng) {
        (Some(lat), Some(lng)) => format!(" ({}, {})", lat, lng),
        _ => String::new(),
    };
    let photo = if a.photo.is_empty() { "" } else { " 📷" };

    format!(
        "{} {} {} {}{}{}",
        a.date_str(),
        a.time_str(),
        colour_for_kind(a.kind).paint(a.kind.title()),
        a.location,
        coords,
        photo
    )
}

pub fn print_status(status: &DayStatus) {
    println!("📅 {}", status.date.format("%A, %Y-%m-%d"));
    println!("   Checked in : {}", yes_no(status.has_login));
    println!("   Checked out: {}", yes_no(status.has_logout));

    if status.activities.is_empty() {
        println!("\n   No activity recorded today.");
        return;
    }

    println!();
    for a in &status.activities {
        println!("   {}", activity_line(a));
    }
}

pub fn print_activities(activities: &[Activity]) {
    if activities.is_empty() {
        println!("No activity found.");
        return;
    }
    for a in activities {
        println!("{:>4}: {}", a.id, activity_line(a));
    }
}

pub fn print_log(entries: &[LogEntry]) {
    println!("📜 Internal log:\n");

    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);

    for e in entries {
        let date = chrono::DateTime::parse_from_rfc3339(&e.date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or_else(|_| e.date.clone());

        let mut op_target = if e.target.is_empty() {
            e.operation.clone()
        } else {
            format!("{} ({})", e.operation, e.target)
        };
        if op_target.chars().count() > MAX_OP_WIDTH {
            op_target = op_target.chars().take(MAX_OP_WIDTH - 3).collect::<String>() + "...";
        }

        // only the operation word is coloured
        let colour = colour_for_operation(&e.operation);
        let painted = match op_target.split_once(' ') {
            Some((op, rest)) => format!("{} {}", colour.paint(op), rest),
            None => colour.paint(op_target.as_str()).to_string(),
        };
        let padding = " ".repeat(MAX_OP_WIDTH.saturating_sub(strip_ansi(&painted).chars().count()));

        println!(
            "{:>id_w$}: {} | {}{} => {}",
            e.id,
            date,
            painted,
            padding,
            e.message,
            id_w = id_w
        );
    }
}
