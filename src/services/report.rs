use bigdecimal::BigDecimal;

use super::payroll::{PayrollEntry, PayrollReport};
use crate::database::models::{Category, PaymentBreakdown};
use crate::database::utils::{format_hours, round_total};

const WIDTH: usize = 127;

/// Half-up to cents with a comma separator, as totals appear in reports.
pub fn format_total(value: &BigDecimal) -> String {
    round_total(value).to_string().replace('.', ",")
}

fn title(category: Category) -> &'static str {
    match category {
        Category::Hourly => "HOURLY",
        Category::Salaried => "SALARIED",
        Category::Commissioned => "COMMISSIONED",
    }
}

fn column_widths(category: Category) -> &'static [usize] {
    match category {
        Category::Hourly => &[36, 5, 5, 13, 9, 15, 38],
        Category::Salaried => &[48, 13, 9, 15, 38],
        Category::Commissioned => &[21, 8, 8, 8, 13, 9, 15, 38],
    }
}

fn banner(category: Category) -> [String; 3] {
    let rule = "=".repeat(WIDTH);
    let heading = format!("===================== {} ", title(category));
    [rule.clone(), format!("{:=<width$}", heading, width = WIDTH), rule]
}

fn header(category: Category) -> [String; 2] {
    let columns = match category {
        Category::Hourly => format!(
            "{:<36} {:>5} {:>5} {:>13} {:>9} {:>15} {}",
            "Name", "Hours", "Extra", "Gross Pay", "Deduct", "Net Pay", "Method"
        ),
        Category::Salaried => format!(
            "{:<48} {:>13} {:>9} {:>15} {}",
            "Name", "Gross Pay", "Deduct", "Net Pay", "Method"
        ),
        Category::Commissioned => format!(
            "{:<21} {:>8} {:>8} {:>8} {:>13} {:>9} {:>15} {}",
            "Name", "Fixed", "Sales", "Commiss", "Gross Pay", "Deduct", "Net Pay", "Method"
        ),
    };
    let underline = column_widths(category)
        .iter()
        .map(|w| "=".repeat(*w))
        .collect::<Vec<_>>()
        .join(" ");
    [columns, underline]
}

fn row(entry: &PayrollEntry) -> String {
    let result = &entry.result;
    match &result.breakdown {
        PaymentBreakdown::Hourly {
            normal_hours,
            overtime_hours,
        } => format!(
            "{:<36} {:>5} {:>5} {:>13} {:>9} {:>15} {}",
            entry.name,
            format_hours(normal_hours),
            format_hours(overtime_hours),
            format_total(&result.gross),
            format_total(&result.deductions),
            format_total(&result.net),
            entry.payment_method
        ),
        PaymentBreakdown::Salaried => format!(
            "{:<48} {:>13} {:>9} {:>15} {}",
            entry.name,
            format_total(&result.gross),
            format_total(&result.deductions),
            format_total(&result.net),
            entry.payment_method
        ),
        PaymentBreakdown::Commissioned {
            fixed,
            sales,
            commission,
        } => format!(
            "{:<21} {:>8} {:>8} {:>8} {:>13} {:>9} {:>15} {}",
            entry.name,
            format_total(fixed),
            format_total(sales),
            format_total(commission),
            format_total(&result.gross),
            format_total(&result.deductions),
            format_total(&result.net),
            entry.payment_method
        ),
    }
}

fn totals_line(report: &PayrollReport, category: Category) -> String {
    let totals = report.totals(category);
    match category {
        Category::Hourly => format!(
            "TOTAL HOURLY {:>29} {:>5} {:>13} {:>9} {:>15}",
            format_hours(&totals.normal_hours),
            format_hours(&totals.overtime_hours),
            format_total(&totals.gross),
            format_total(&totals.deductions),
            format_total(&totals.net)
        ),
        Category::Salaried => format!(
            "TOTAL SALARIED {:>47} {:>9} {:>15}",
            format_total(&totals.gross),
            format_total(&totals.deductions),
            format_total(&totals.net)
        ),
        Category::Commissioned => format!(
            "TOTAL COMMISSIONED {:>11} {:>8} {:>8} {:>13} {:>9} {:>15}",
            format_total(&totals.fixed),
            format_total(&totals.sales),
            format_total(&totals.commission),
            format_total(&totals.gross),
            format_total(&totals.deductions),
            format_total(&totals.net)
        ),
    }
}

/// Fixed-width payroll report: one section per category, then the total gross pay.
pub fn render(report: &PayrollReport) -> String {
    let mut lines = vec![
        format!("PAYROLL FOR {}", report.date.format("%Y-%m-%d")),
        "=".repeat(36),
        String::new(),
    ];

    for category in Category::ALL {
        lines.extend(banner(category));
        lines.extend(header(category));
        lines.extend(report.section(category).map(row));
        lines.push(String::new());
        lines.push(totals_line(report, category));
        lines.push(String::new());
    }

    lines.push(format!("TOTAL PAYROLL: {}", format_total(&report.total_gross())));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
