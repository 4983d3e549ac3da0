use crate::aggregates::{CostSummary, format_cost};
use crate::allocation::Allocation;
use polars::prelude::*;

pub fn allocations_frame(allocations: &[Allocation], hourly_rate: u32) -> PolarsResult<DataFrame> {
    let ids: Vec<u32> = allocations.iter().map(|a| a.id).collect();
    let groups: Vec<u32> = allocations.iter().map(|a| a.group_id).collect();
    let roles: Vec<&str> = allocations.iter().map(|a| a.role.as_str()).collect();
    let hours: Vec<u32> = allocations.iter().map(|a| a.hours_per_week).collect();
    let weeks: Vec<u32> = allocations.iter().map(|a| a.weeks).collect();
    let starts: Vec<u32> = allocations.iter().map(|a| a.start_week).collect();
    let costs: Vec<u64> = allocations.iter().map(|a| a.cost(hourly_rate)).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("group_id"), groups).into_column(),
        Series::new(PlSmallStr::from_static("role"), roles).into_column(),
        Series::new(PlSmallStr::from_static("hours_per_week"), hours).into_column(),
        Series::new(PlSmallStr::from_static("weeks"), weeks).into_column(),
        Series::new(PlSmallStr::from_static("start_week"), starts).into_column(),
        Series::new(PlSmallStr::from_static("cost"), costs).into_column(),
    ])
}

pub fn role_costs_frame(summary: &CostSummary) -> PolarsResult<DataFrame> {
    let roles: Vec<&str> = summary.role_costs.iter().map(|rc| rc.role.as_str()).collect();
    let costs: Vec<u64> = summary.role_costs.iter().map(|rc| rc.cost).collect();
    let formatted: Vec<String> = summary
        .role_costs
        .iter()
        .map(|rc| format_cost(rc.cost))
        .collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("role"), roles).into_column(),
        Series::new(PlSmallStr::from_static("cost"), costs).into_column(),
        Series::new(PlSmallStr::from_static("formatted"), formatted).into_column(),
    ])
}

fn cell_text(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}

/// Renders a frame as a boxed ASCII table.
pub fn render_frame(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .map(|av| cell_text(&av))
                    .unwrap_or_default()
            })
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&names, &widths));
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row, &widths));
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" |");
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::cost_summary;
    use crate::role::Role;

    fn sample() -> Vec<Allocation> {
        vec![
            Allocation::new(1, 1, Role::SeniorDeveloper, 40, 2, 1),
            Allocation::new(2, 2, Role::Designer, 10, 4, 0),
        ]
    }

    #[test]
    fn allocations_frame_has_one_row_per_allocation() {
        let df = allocations_frame(&sample(), 250).unwrap();
        assert_eq!(df.height(), 2);
        let costs: Vec<Option<u64>> = df.column("cost").unwrap().u64().unwrap().into_iter().collect();
        assert_eq!(costs, vec![Some(20_000), Some(10_000)]);
    }

    #[test]
    fn rendered_table_lists_role_costs() {
        let summary = cost_summary(&sample(), 250);
        let df = role_costs_frame(&summary).unwrap();
        let table = render_frame(&df);
        assert!(table.contains("Senior Developer"));
        assert!(table.contains("$20.0k"));
        assert!(table.contains("| role"));
    }
}
