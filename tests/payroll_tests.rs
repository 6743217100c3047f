use bigdecimal::{BigDecimal, Zero};
use pretty_assertions::assert_eq;
use std::fs;

use payroll::AppError;
use payroll::database::models::{PaymentBreakdown, PaymentMethod};

mod common;
use common::{MockData, TestContext, date, dec};

#[test]
fn test_commissioned_first_biweekly_period() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let id = ctx
        .system
        .hire_worker(&MockData::commissioned("Carla Dias", "1000", "0,10"))
        .unwrap();
    ctx.system.post_sale(id, "3/1/2005", "300").unwrap();
    ctx.system.post_sale(id, "10/1/2005", "200").unwrap();

    let report = ctx.system.preview_payroll(date(2005, 1, 14));
    assert_eq!(report.entries.len(), 1);

    let result = &report.entries[0].result;
    assert_eq!(result.period.start, date(2005, 1, 1));
    assert_eq!(
        result.breakdown,
        PaymentBreakdown::Commissioned {
            fixed: dec("461.53"),
            sales: dec("500"),
            commission: dec("50.00"),
        }
    );
    assert_eq!(result.gross, dec("511.53"));
    assert_eq!(result.net, dec("511.53"));
}

#[test]
fn test_hourly_overtime_and_weekly_dues() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let id = ctx.system.hire_worker(&MockData::hourly("Davi Reis", "10")).unwrap();
    ctx.system.post_time_card(id, "5/1/2005", "5").unwrap();
    ctx.system.post_time_card(id, "5/1/2005", "6").unwrap();
    ctx.system
        .set_union_membership(id, Some(&MockData::union("u-1", "2")))
        .unwrap();

    let report = ctx.system.preview_payroll(date(2005, 1, 7));
    let result = &report.entries[0].result;

    assert_eq!(
        result.breakdown,
        PaymentBreakdown::Hourly {
            normal_hours: dec("8"),
            overtime_hours: dec("3"),
        }
    );
    assert_eq!(result.gross, dec("125"));
    // Period runs from the first time card, 5/1 to 7/1
    assert_eq!(result.deductions, dec("6"));
    assert_eq!(result.net, dec("119"));
}

#[test]
fn test_hourly_without_pay_is_not_charged() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let id = ctx.system.hire_worker(&MockData::hourly("Eva Melo", "10")).unwrap();
    ctx.system
        .set_union_membership(id, Some(&MockData::union("u-2", "5")))
        .unwrap();
    ctx.system.post_service_fee("u-2", "6/1/2005", "40").unwrap();

    let report = ctx.system.preview_payroll(date(2005, 1, 7));
    let result = &report.entries[0].result;
    assert!(result.gross.is_zero());
    assert!(result.deductions.is_zero());
    assert!(result.net.is_zero());
}

#[test]
fn test_salaried_monthly_dues_and_fees() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let id = ctx.system.hire_worker(&MockData::salaried("Fabio Nunes", "2000")).unwrap();
    ctx.system
        .set_union_membership(id, Some(&MockData::union("u-3", "1")))
        .unwrap();
    ctx.system.post_service_fee("u-3", "15/1/2005", "19,50").unwrap();
    ctx.system.post_service_fee("u-3", "1/2/2005", "100").unwrap();

    // 2005-01-31 is a Monday, the last business day of January
    let report = ctx.system.preview_payroll(date(2005, 1, 31));
    let result = &report.entries[0].result;
    assert_eq!(result.gross, dec("2000"));
    assert_eq!(result.deductions, dec("50.50"));
    assert_eq!(result.net, dec("1949.50"));
}

#[test]
fn test_total_payroll_is_read_only() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let id = ctx
        .system
        .hire_worker(&MockData::commissioned("Carla Dias", "1000", "0,10"))
        .unwrap();
    ctx.system.post_sale(id, "3/1/2005", "500").unwrap();
    ctx.system.hire_worker(&MockData::hourly("Davi Reis", "10")).unwrap();
    let before = ctx.system.registry().clone();

    assert_eq!(ctx.system.total_payroll(date(2005, 1, 14)), dec("511.53"));
    assert_eq!(ctx.system.total_payroll(date(2005, 1, 13)), BigDecimal::zero());
    assert_eq!(ctx.system.registry(), &before);
}

#[test]
fn test_run_marks_only_workers_with_positive_net() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let paid = ctx
        .system
        .hire_worker(&MockData::commissioned("Carla Dias", "1000", "0,10"))
        .unwrap();
    let idle = ctx.system.hire_worker(&MockData::hourly("Davi Reis", "10")).unwrap();

    let report = ctx.system.run_payroll(date(2005, 1, 14), None).unwrap();
    assert_eq!(report.entries.len(), 2);

    assert_eq!(ctx.system.worker(paid).unwrap().last_paid, Some(date(2005, 1, 14)));
    assert_eq!(ctx.system.worker(idle).unwrap().last_paid, None);

    // The next period starts the day after the last payment
    let next = ctx.system.preview_payroll(date(2005, 1, 28));
    let entry = next.entries.iter().find(|e| e.worker_id == paid).unwrap();
    assert_eq!(entry.result.period.start, date(2005, 1, 15));
}

#[test]
fn test_second_run_on_same_date_pays_nothing() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let id = ctx.system.hire_worker(&MockData::salaried("Fabio Nunes", "1000")).unwrap();

    let first = ctx.system.run_payroll(date(2005, 1, 31), None).unwrap();
    assert_eq!(first.total_gross(), dec("1000"));

    assert!(ctx.system.total_payroll(date(2005, 1, 31)).is_zero());
    let second = ctx.system.run_payroll(date(2005, 1, 31), None).unwrap();
    assert!(second.entries.is_empty());
    assert_eq!(ctx.system.worker(id).unwrap().last_paid, Some(date(2005, 1, 31)));
}

#[test]
fn test_run_writes_report_and_is_undoable() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let id = ctx
        .system
        .hire_worker(&MockData::commissioned("Carla Dias", "1000", "0,10"))
        .unwrap();
    ctx.system
        .set_payment_method(
            id,
            PaymentMethod::Bank {
                bank: "Banco Azul".to_string(),
                agency: "123".to_string(),
                account: "456-7".to_string(),
            },
        )
        .unwrap();

    let output = ctx.config.report_path(date(2005, 1, 14));
    ctx.system.run_payroll(date(2005, 1, 14), Some(&output)).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("Carla Dias"));
    assert!(text.contains("Banco Azul, Ag. 123 CC 456-7"));
    assert!(text.contains("TOTAL PAYROLL: 461,53"));

    ctx.system.undo().unwrap();
    assert_eq!(ctx.system.worker(id).unwrap().last_paid, None);
}

#[test]
fn test_run_rolls_back_when_report_cannot_be_written() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    let id = ctx
        .system
        .hire_worker(&MockData::commissioned("Carla Dias", "1000", "0,10"))
        .unwrap();
    let blocker = ctx.temp_dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let before = ctx.system.registry().clone();

    let result = ctx
        .system
        .run_payroll(date(2005, 1, 14), Some(&blocker.join("report.txt")));

    assert!(matches!(result, Err(AppError::Io(_))));
    assert_eq!(ctx.system.registry(), &before);
    assert_eq!(ctx.system.worker(id).unwrap().last_paid, None);
}

#[test]
fn test_report_entries_sorted_by_name() {
    common::setup_test_env();
    let mut ctx = TestContext::new().unwrap();
    ctx.system.hire_worker(&MockData::salaried("Zeca Prado", "1000")).unwrap();
    ctx.system.hire_worker(&MockData::salaried("Ana Lima", "1500")).unwrap();

    let report = ctx.system.preview_payroll(date(2005, 1, 31));
    let names: Vec<&str> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ana Lima", "Zeca Prado"]);
}
