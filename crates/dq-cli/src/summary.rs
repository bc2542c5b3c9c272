use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dq_cli::types::{CleanResult, ProfileResult};
use dq_model::{AuditEntry, ColumnKind, Severity};

pub fn print_clean_summary(result: &CleanResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.outputs.table {
        println!("Cleaned table: {}", path.display());
    }
    if let Some(path) = &result.outputs.report {
        println!("Quality report: {}", path.display());
    }
    if let Some(path) = &result.outputs.audit {
        println!("Audit trail: {}", path.display());
    }

    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table, 80);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Rows"),
        Cell::new(format!(
            "{} -> {}",
            report.original_row_count, report.cleaned_row_count
        )),
    ]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(report.columns_processed)]);
    table.add_row(vec![
        Cell::new("Completeness"),
        Cell::new(format!(
            "{}% -> {}%",
            report.original_completeness_pct, report.overall_completeness_pct
        ))
        .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Duplicates removed"),
        count_cell(report.duplicates_removed, Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Values imputed"),
        count_cell(report.values_imputed, Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Outliers clipped"),
        count_cell(report.outliers_clipped, Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Invalid values"),
        count_cell(report.invalid_values_flagged, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Unparseable dates"),
        count_cell(report.date_standardization_failures, Color::Yellow),
    ]);
    println!("{table}");

    let mut columns = Table::new();
    columns.set_header(vec![header_cell("Column"), header_cell("Completeness")]);
    apply_table_style(&mut columns, 80);
    align_column(&mut columns, 1, CellAlignment::Right);
    for (name, pct) in &report.per_column_completeness_pct {
        columns.add_row(vec![Cell::new(name), completeness_cell(*pct)]);
    }
    println!("{columns}");

    print_warning_table(&result.warnings);
}

fn print_warning_table(warnings: &[AuditEntry]) {
    if warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Stage"),
        header_cell("Column"),
        header_cell("Row"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table, 160);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for entry in warnings {
        table.add_row(vec![
            severity_cell(entry.severity),
            Cell::new(entry.stage),
            Cell::new(entry.column.as_deref().unwrap_or("-")),
            entry.row.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(&entry.message),
        ]);
    }
    println!();
    println!("Warnings:");
    println!("{table}");
}

pub fn print_profile(result: &ProfileResult) {
    println!("Input: {} ({} rows)", result.input.display(), result.rows);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Canonical"),
        header_cell("Type"),
        header_cell("Present"),
        header_cell("Missing"),
        header_cell("Completeness"),
    ]);
    apply_table_style(&mut table, 120);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for column in &result.columns {
        table.add_row(vec![
            Cell::new(&column.name),
            dim_cell(&column.canonical),
            kind_cell(column.kind),
            Cell::new(column.present),
            count_cell(column.missing, Color::Yellow),
            completeness_cell(column.completeness_pct),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(width);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn completeness_cell(pct: f64) -> Cell {
    let color = if pct >= 100.0 {
        Color::Green
    } else if pct >= 80.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{pct}%")).fg(color)
}

fn kind_cell(kind: ColumnKind) -> Cell {
    let color = match kind {
        ColumnKind::Numeric => Color::Blue,
        ColumnKind::Date => Color::Magenta,
        ColumnKind::Categorical => Color::White,
    };
    Cell::new(kind).fg(color)
}

fn severity_cell(severity: Severity) -> Cell {
    let color = match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info | Severity::Debug => Color::DarkGrey,
    };
    Cell::new(severity.as_str())
        .fg(color)
        .add_attribute(Attribute::Bold)
}
