//! Format standardization: canonical dates and consistent text case.

use chrono::format::{Item, StrftimeItems};

use dq_model::{
    AuditEntry, AuditKind, AuditLog, CellValue, CleanError, ColumnKind, Result, Severity, Stage,
    Table,
};

use crate::classify::{DateParser, classify_column};
use crate::pipeline::{CleaningStage, StageContext};

/// Text case applied to a categorical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextCase {
    Title,
    Lower,
}

impl TextCase {
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::Title => title_case(value.trim()),
            Self::Lower => value.trim().to_lowercase(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title case",
            Self::Lower => "lowercase",
        }
    }
}

/// Uppercases the first letter of every run of letters and lowercases the rest.
///
/// Any non-letter, digits included, starts a new run, so `"o'neil"` becomes
/// `"O'Neil"` and `"3rd"` becomes `"3Rd"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Parsed output format, checked once so formatting can never fail.
#[derive(Debug, Clone)]
pub struct DateFormat<'a> {
    items: Vec<Item<'a>>,
}

impl<'a> DateFormat<'a> {
    pub fn parse(format: &'a str) -> Result<Self> {
        let items: Vec<Item<'a>> = StrftimeItems::new(format).collect();
        if items.contains(&Item::Error) {
            return Err(CleanError::InvalidDateFormat {
                format: format.to_string(),
            });
        }
        Ok(Self { items })
    }

    pub fn format(&self, date: chrono::NaiveDate) -> String {
        date.format_with_items(self.items.iter()).to_string()
    }
}

pub struct StandardizeStage;

impl CleaningStage for StandardizeStage {
    fn execute(&self, table: &mut Table, ctx: &StageContext, log: &mut AuditLog) -> Result<()> {
        let output = DateFormat::parse(&ctx.options.output_date_format)?;
        for idx in 0..table.width() {
            let column = &table.columns()[idx];
            let name = column.name.clone();
            let kind = classify_column(column, &ctx.dates);
            let date_named = kind == ColumnKind::Categorical
                && ctx.options.is_date_named(&name)
                && column
                    .present()
                    .any(|(_, value)| ctx.dates.parse_cell(value).is_some());
            let Some(values) = table.values_mut(idx) else {
                continue;
            };
            match kind {
                ColumnKind::Date => {
                    standardize_dates(&name, values, &ctx.dates, &output, log);
                }
                ColumnKind::Categorical if date_named => {
                    standardize_dates(&name, values, &ctx.dates, &output, log);
                }
                ColumnKind::Categorical => {
                    let case = if ctx.options.is_title_like(&name) {
                        TextCase::Title
                    } else {
                        TextCase::Lower
                    };
                    standardize_text(&name, values, case, log);
                }
                ColumnKind::Numeric => {}
            }
        }
        Ok(())
    }

    fn stage(&self) -> Stage {
        Stage::FormatStandardizer
    }
}

/// Rewrites every parseable date to `output`. Values that do not parse are
/// left as they are and logged. Returns the number of failures.
pub fn standardize_dates(
    column: &str,
    values: &mut [CellValue],
    dates: &DateParser,
    output: &DateFormat<'_>,
    log: &mut AuditLog,
) -> usize {
    let mut rewritten = 0;
    let mut failures = 0;
    for (row, value) in values.iter_mut().enumerate() {
        if value.is_missing() {
            continue;
        }
        match dates.parse_cell(value) {
            Some(date) => {
                let formatted = CellValue::Text(output.format(date));
                if *value != formatted {
                    *value = formatted;
                    rewritten += 1;
                }
            }
            None => {
                failures += 1;
                log.push(
                    AuditEntry::new(
                        Stage::FormatStandardizer,
                        AuditKind::DateParseFailure,
                        Severity::Warning,
                        format!("could not parse '{column}' row {row} as a date"),
                    )
                    .with_column(column)
                    .with_row(row)
                    .with_affected(1),
                );
            }
        }
    }
    log.push(
        AuditEntry::new(
            Stage::FormatStandardizer,
            AuditKind::DatesStandardized,
            Severity::Info,
            format!("standardized {rewritten} dates in '{column}'"),
        )
        .with_column(column)
        .with_affected(rewritten),
    );
    failures
}

/// Applies `case` to every present value, coercing non-text values to text.
/// Returns the number of values changed.
pub fn standardize_text(
    column: &str,
    values: &mut [CellValue],
    case: TextCase,
    log: &mut AuditLog,
) -> usize {
    let mut changed = 0;
    for value in values.iter_mut() {
        let Some(text) = value.to_text() else {
            continue;
        };
        let updated = CellValue::Text(case.apply(&text));
        if *value != updated {
            *value = updated;
            changed += 1;
        }
    }
    log.push(
        AuditEntry::new(
            Stage::FormatStandardizer,
            AuditKind::TextCaseApplied,
            Severity::Info,
            format!("applied {} to '{column}', {changed} values changed", case.as_str()),
        )
        .with_column(column)
        .with_affected(changed),
    );
    changed
}
