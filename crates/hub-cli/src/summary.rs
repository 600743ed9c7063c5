use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use hub_cli::replay::ReplayOutcome;
use hub_nav::Mount;

use crate::commands::{ConfigReport, Resolution};

pub fn print_config(report: &ConfigReport) {
    let status = if report.saved { "saved" } else { "effective" };
    println!("# {} ({status})", report.path.display());
    print!("{}", report.rendered);
}

pub fn print_resolution(resolution: &Resolution) {
    let who = match &resolution.principal.identity_id {
        Some(_) => resolution.principal.role.to_string(),
        None => "anonymous".to_string(),
    };
    println!("Principal: {who}");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Mount"), mount_cell(&resolution.mount)]);
    match resolution.mount {
        Mount::Screen { screen } => {
            table.add_row(vec![Cell::new("Screen"), Cell::new(screen.as_str())]);
        }
        Mount::NotFound { back } => {
            table.add_row(vec![Cell::new("Back to"), Cell::new(back.as_str())]);
        }
        Mount::Landing | Mount::Nothing => {}
    }
    let chrome = resolution.chrome;
    table.add_row(vec![Cell::new("Navbar"), flag_cell(chrome.navbar)]);
    table.add_row(vec![Cell::new("Footer"), flag_cell(chrome.footer)]);
    table.add_row(vec![Cell::new("Custom cursor"), flag_cell(chrome.custom_cursor)]);
    table.add_row(vec![Cell::new("Scroll to top"), flag_cell(chrome.scroll_to_top)]);
    if !resolution.sidebar.is_empty() {
        table.add_row(vec![
            Cell::new("Sidebar"),
            Cell::new(resolution.sidebar.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_replay_json(outcome: &ReplayOutcome) -> Result<()> {
    let json = serde_json::to_string_pretty(outcome).context("serialize replay")?;
    println!("{json}");
    Ok(())
}

pub fn print_replay_table(outcome: &ReplayOutcome) {
    let bootstrap = &outcome.bootstrap;
    println!(
        "Bootstrap: {} after {} ms, landed on {}",
        bootstrap.outcome,
        bootstrap.elapsed.as_millis(),
        bootstrap.current
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Action"),
        header_cell("Current"),
        header_cell("Depth"),
        header_cell("Resource"),
        header_cell("Role"),
        header_cell("Effects"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in &outcome.steps {
        let effects = if row.effects.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(row.effects.join(", "))
        };
        table.add_row(vec![
            Cell::new(row.step),
            Cell::new(row.action),
            Cell::new(row.current.as_str()),
            Cell::new(row.depth),
            match &row.resource {
                Some(id) => Cell::new(id),
                None => dim_cell("-"),
            },
            Cell::new(row.role.as_str()),
            effects,
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn mount_cell(mount: &Mount) -> Cell {
    let color = match mount {
        Mount::Screen { .. } => Color::Green,
        Mount::Landing => Color::Cyan,
        Mount::Nothing => Color::Yellow,
        Mount::NotFound { .. } => Color::Red,
    };
    Cell::new(mount.label()).fg(color)
}

fn flag_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("✓").fg(Color::Green)
    } else {
        dim_cell("-")
    }
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
