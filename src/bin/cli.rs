use resource_planner::report::{allocations_frame, render_frame, role_costs_frame};
use resource_planner::{
    BoardView, Planner, PlanMetadata, PlannerConfig, format_cost, format_currency,
    load_config_from_json,
};
use std::io::{self, Write};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "resource_planner=warn".into()),
    );
    // stdout belongs to the REPL
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn config_path() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next();
        }
    }
    std::env::var("PLANNER_CONFIG").ok()
}

fn load_config() -> PlannerConfig {
    match config_path() {
        Some(path) => match load_config_from_json(&path) {
            Ok(config) => {
                tracing::info!("loaded config from {path}");
                config
            }
            Err(e) => {
                eprintln!("Ignoring config {path}: {e}");
                PlannerConfig::default()
            }
        },
        None => PlannerConfig::default(),
    }
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the board\n  table                              Show allocations as a table\n  add                                Add a group with default placement\n  hours   <group_id> <delta|+|->     Change a group's total weekly hours\n  weeks   <allocation_id> <delta>    Change a group's duration\n  start   <allocation_id> <delta>    Move a group's start week\n  role    <allocation_id> <dir>      Cycle the group's role (1 or -1)\n  delete  <group_id>                 Delete a group\n  select  <allocation_id|none>       Select an allocation\n  collapse <group_id>                Toggle a group's collapsed state\n  drag    <allocation_id> <from_x> <to_x>\n                                     Drag a bar by pointer coordinates\n  undo | redo                        Walk the history\n  warnings                           Show over-allocation warnings\n  summary                            Show project cost summary\n  json                               Print the board view as JSON\n  quit|exit                          Exit"
    );
}

fn print_board(planner: &Planner) {
    let view = BoardView::from_planner(planner);
    if view.groups.is_empty() {
        println!("No allocations yet. Use 'add' to get started.");
        return;
    }
    let (index, len) = planner.history_position();
    println!(
        "{} (history {}/{}, selected: {})",
        view.project_name,
        index + 1,
        len,
        planner
            .selection()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    if let (Some(first), Some(last)) = (view.week_dates.first(), view.week_dates.last()) {
        println!(
            "Weeks 0-{} : {} .. {}",
            view.week_dates.len() - 1,
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        );
    }
    let weeks = planner.timeline().weeks() as usize;
    for group in &view.groups {
        let marker = if group.collapsed { "+" } else { "-" };
        println!(
            "{marker} group {} [{}] {}",
            group.rollup.group_id, group.rollup.role, group.caption
        );
        for row in &group.rows {
            let start = row.allocation.start_week as usize;
            let span = row.allocation.weeks as usize;
            let track: String = (0..weeks)
                .map(|w| if w >= start && w < start + span { '#' } else { '.' })
                .collect();
            let selected = if row.selected { "*" } else { " " };
            println!(
                "  {selected}{:>4} {:<20} {:>3}h {track}",
                row.allocation.id, row.label, row.allocation.hours_per_week
            );
        }
    }
}

fn print_warnings(planner: &Planner) {
    let warnings = planner.warnings();
    if warnings.is_empty() {
        println!("No over-allocation warnings.");
    }
    for warning in warnings {
        println!("Warning: {}", warning.message());
    }
}

fn print_summary(planner: &Planner) {
    let summary = planner.cost_summary();
    println!("Total Allocations : {}", summary.group_count);
    println!("Total Hours       : {}h/week", summary.total_hours);
    println!("Scheduled Hours   : {}h", summary.scheduled_hours);
    println!("Total Cost        : {}", format_currency(summary.total_cost));
    println!("Unique Roles      : {}", summary.role_count);
    if summary.role_costs.is_empty() {
        return;
    }
    match role_costs_frame(&summary) {
        Ok(df) => print!("{}", render_frame(&df)),
        Err(e) => {
            for rc in &summary.role_costs {
                println!("  {:<20} {}", rc.role, format_cost(rc.cost));
            }
            tracing::warn!("role cost table unavailable: {e}");
        }
    }
}

fn parse_id(s: Option<&str>) -> Option<u32> {
    s.and_then(|v| v.parse::<u32>().ok())
}

fn parse_delta(s: Option<&str>) -> Option<i64> {
    s.and_then(|v| v.trim_start_matches('+').parse::<i64>().ok())
}

/// `+`/`-` step by the configured hours step; anything else is a number.
fn parse_hours_delta(s: Option<&str>, step: u32) -> Option<i64> {
    match s {
        Some("+") => Some(i64::from(step)),
        Some("-") => Some(-i64::from(step)),
        other => parse_delta(other),
    }
}

fn report_change(changed: bool, what: &str, planner: &Planner) {
    if changed {
        println!("{what}.");
        print_board(planner);
    } else {
        println!("No change.");
    }
}

fn main() {
    init_tracing();
    let config = load_config();
    let mut planner = match Planner::with_config(config, PlanMetadata::default()) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            Planner::new()
        }
    };

    println!("Resource Planner (CLI) - type 'help' for commands\n");
    print_board(&planner);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_board(&planner),
            "table" => {
                match allocations_frame(planner.allocations(), planner.config().hourly_rate) {
                    Ok(df) => print!("{}", render_frame(&df)),
                    Err(e) => println!("Error building table: {e}"),
                }
            }
            "add" => {
                let id = planner.add_group();
                println!("Added allocation {id}.");
                print_board(&planner);
            }
            "hours" => match (
                parse_id(parts.next()),
                parse_hours_delta(parts.next(), planner.config().hours_step),
            ) {
                (Some(group_id), Some(delta)) => {
                    let changed = planner.adjust_group_hours(group_id, delta);
                    report_change(changed, "Hours updated", &planner);
                }
                _ => println!("Usage: hours <group_id> <delta|+|->"),
            },
            "weeks" | "start" => match (parse_id(parts.next()), parse_delta(parts.next())) {
                (Some(id), Some(delta)) => {
                    let changed = if cmd == "weeks" {
                        planner.adjust_weeks(id, delta)
                    } else {
                        planner.adjust_start_week(id, delta)
                    };
                    report_change(changed, "Timeline updated", &planner);
                }
                _ => println!("Usage: {cmd} <allocation_id> <delta>"),
            },
            "role" => match (parse_id(parts.next()), parse_delta(parts.next())) {
                (Some(id), Some(direction)) => {
                    let direction = direction.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
                    let changed = planner.cycle_role(id, direction as i32);
                    report_change(changed, "Role updated", &planner);
                }
                _ => println!("Usage: role <allocation_id> <1|-1>"),
            },
            "delete" => match parse_id(parts.next()) {
                Some(group_id) => {
                    planner.delete_group(group_id);
                    println!("Deleted group {group_id}.");
                    print_board(&planner);
                }
                None => println!("Usage: delete <group_id>"),
            },
            "select" => match parts.next() {
                Some("none") => {
                    planner.select(None);
                    println!("Selection cleared.");
                }
                other => match parse_id(other) {
                    Some(id) => match planner.select(Some(id)) {
                        Some(selected) if selected == id => println!("Selected {id}."),
                        _ => println!("Allocation {id} not found."),
                    },
                    None => println!("Usage: select <allocation_id|none>"),
                },
            },
            "collapse" => match parse_id(parts.next()) {
                Some(group_id) => {
                    if planner.toggle_group_collapsed(group_id) {
                        println!("Group {group_id} collapsed.");
                    } else {
                        println!("Group {group_id} expanded.");
                    }
                }
                None => println!("Usage: collapse <group_id>"),
            },
            "drag" => {
                let id = parse_id(parts.next());
                let from = parts.next().and_then(|v| v.parse::<f64>().ok());
                let to = parts.next().and_then(|v| v.parse::<f64>().ok());
                match (id, from, to) {
                    (Some(id), Some(from), Some(to)) => {
                        if !planner.begin_drag(id, from) {
                            println!("Allocation {id} not found.");
                            continue;
                        }
                        planner.update_drag(to);
                        let committed = planner.end_drag();
                        report_change(committed, "Moved", &planner);
                    }
                    _ => println!("Usage: drag <allocation_id> <from_x> <to_x>"),
                }
            }
            "undo" => {
                if planner.undo() {
                    println!("Undone.");
                    print_board(&planner);
                } else {
                    println!("Nothing to undo.");
                }
            }
            "redo" => {
                if planner.redo() {
                    println!("Redone.");
                    print_board(&planner);
                } else {
                    println!("Nothing to redo.");
                }
            }
            "warnings" => print_warnings(&planner),
            "summary" => print_summary(&planner),
            "json" => match serde_json::to_string_pretty(&BoardView::from_planner(&planner)) {
                Ok(json) => println!("{json}"),
                Err(e) => println!("Error: {e}"),
            },
            _ => println!("Unknown command '{cmd}'. Type 'help'."),
        }
    }
}
