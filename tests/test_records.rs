//! RecordQuery integration tests: column projection, type coercion, nulls.

mod common;

use chrono::NaiveDate;
use rust_decimal::{dec, Decimal};
use workorder_dash::queries::RecordQuery;
use workorder_dash::{ColumnMap, RecordStore};

#[test]
fn all_decodes_every_row() {
    let conn = common::setup_sample_db();
    let columns = ColumnMap::default();
    let records = RecordQuery::new(&conn, "clear_dash_new", &columns)
        .all()
        .unwrap();

    assert_eq!(records.len(), 5);
    let total: Decimal = records.iter().map(|r| r.sum).sum();
    assert_eq!(total, dec!(6000));
}

#[test]
fn all_orders_by_month() {
    let conn = common::setup_sample_db();
    let columns = ColumnMap::default();
    let records = RecordQuery::new(&conn, "clear_dash_new", &columns)
        .all()
        .unwrap();

    let months: Vec<&str> = records.iter().map(|r| r.month.as_str()).collect();
    let mut sorted = months.clone();
    sorted.sort();
    assert_eq!(months, sorted);
    assert_eq!(months[0], "2023-12");
}

#[test]
fn date_column_decodes_to_timestamp() {
    let conn = common::setup_sample_db();
    let columns = ColumnMap::default();
    let records = RecordQuery::new(&conn, "clear_dash_new", &columns)
        .all()
        .unwrap();

    let december = records.iter().find(|r| r.month == "2023-12").unwrap();
    assert_eq!(
        december.payment_date,
        NaiveDate::from_ymd_opt(2023, 12, 20)
            .unwrap()
            .and_hms_opt(0, 0, 0)
    );
    assert_eq!(december.exec_time, Some(2.0));
    assert_eq!(december.payment_time, Some(5.0));
    assert!(december.is_paid());
}

#[test]
fn null_payment_date_means_unpaid() {
    let conn = common::setup_sample_db();
    let columns = ColumnMap::default();
    let records = RecordQuery::new(&conn, "clear_dash_new", &columns)
        .all()
        .unwrap();

    let unpaid: Vec<_> = records.iter().filter(|r| !r.is_paid()).collect();
    assert_eq!(unpaid.len(), 2);
    assert!(unpaid.iter().all(|r| r.payment_time.is_none()));
}

#[test]
fn null_cells_do_not_abort_the_read() {
    let conn = common::setup_sample_db();
    common::register_ndjson(
        &conn,
        "sparse",
        &[
            serde_json::json!({
                "month": "2024-03",
                "Department": null,
                "Customer": "Acme",
                "Responsible": null,
                "Sum": null,
                "Exec_time": null,
                "Payment_time": null,
                "Payment_date": "not a date"
            }),
            serde_json::json!({
                "month": "2024-03",
                "Department": "Ops",
                "Customer": "Acme",
                "Responsible": "Иванов",
                "Sum": 10,
                "Exec_time": 1.5,
                "Payment_time": null,
                "Payment_date": null
            }),
        ],
    );
    let columns = ColumnMap::default();
    let records = RecordQuery::new(&conn, "sparse", &columns).all().unwrap();

    assert_eq!(records.len(), 2);
    let first = records.iter().find(|r| r.department.is_empty()).unwrap();
    assert_eq!(first.responsible, "");
    assert_eq!(first.sum, Decimal::ZERO);
    assert_eq!(first.exec_time, None);
    assert!(!first.is_paid());
}

#[test]
fn custom_column_map() {
    let conn = common::setup_sample_db();
    common::register_ndjson(
        &conn,
        "invoices",
        &[serde_json::json!({
            "period": "2024-05",
            "dept": "Ops",
            "client": "Acme",
            "owner": "Иванов",
            "amount": 42.5,
            "exec_days": 3,
            "pay_days": 1,
            "paid_at": "2024-05-07 12:30:00"
        })],
    );
    let columns = ColumnMap {
        month: "period".into(),
        department: "dept".into(),
        customer: "client".into(),
        responsible: "owner".into(),
        sum: "amount".into(),
        exec_time: "exec_days".into(),
        payment_time: "pay_days".into(),
        payment_date: "paid_at".into(),
    };
    let records = RecordQuery::new(&conn, "invoices", &columns).all().unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.month, "2024-05");
    assert_eq!(r.department, "Ops");
    assert_eq!(r.sum, dec!(42.5));
    assert_eq!(r.exec_time, Some(3.0));
    assert_eq!(
        r.payment_date,
        NaiveDate::from_ymd_opt(2024, 5, 7)
            .unwrap()
            .and_hms_opt(12, 30, 0)
    );
}

#[test]
fn non_numeric_text_cells_read_as_missing() {
    let conn = common::setup_sample_db();
    conn.raw()
        .execute_batch(
            "CREATE TABLE txt AS SELECT * FROM (VALUES \
             ('2024-04', 'Ops', 'Acme', 'Иванов', '1200.50', '3', 'N/A', NULL), \
             ('2024-04', 'Ops', 'Acme', 'Иванов', 'N/A', '', '7', '2024-04-10')) \
             AS t(month, \"Department\", \"Customer\", \"Responsible\", \
                  \"Sum\", \"Exec_time\", \"Payment_time\", \"Payment_date\")",
        )
        .unwrap();
    let columns = ColumnMap::default();
    let records = RecordQuery::new(&conn, "txt", &columns).all().unwrap();

    assert_eq!(records.len(), 2);
    let unpaid = records.iter().find(|r| !r.is_paid()).unwrap();
    assert_eq!(unpaid.sum, dec!(1200.50));
    assert_eq!(unpaid.exec_time, Some(3.0));
    assert_eq!(unpaid.payment_time, None);

    let paid = records.iter().find(|r| r.is_paid()).unwrap();
    assert_eq!(paid.sum, Decimal::ZERO);
    assert_eq!(paid.exec_time, None);
    assert_eq!(paid.payment_time, Some(7.0));
}

#[test]
fn fractional_amounts_read_exactly() {
    let conn = common::setup_sample_db();
    common::register_ndjson(
        &conn,
        "kopecks",
        &[("A", 0.1), ("B", 0.2), ("C", 0.3)]
            .iter()
            .map(|(customer, sum)| {
                serde_json::json!({
                    "month": "2024-01",
                    "Department": "Ops",
                    "Customer": customer,
                    "Responsible": "Иванов",
                    "Sum": sum,
                    "Exec_time": 1.0,
                    "Payment_time": null,
                    "Payment_date": null
                })
            })
            .collect::<Vec<_>>(),
    );
    let columns = ColumnMap::default();
    let records = RecordQuery::new(&conn, "kopecks", &columns).all().unwrap();

    let sums: Vec<Decimal> = records.iter().map(|r| r.sum).collect();
    assert!(sums.contains(&dec!(0.1)));
    assert!(sums.contains(&dec!(0.2)));
    assert!(sums.contains(&dec!(0.3)));
    assert_eq!(sums.iter().sum::<Decimal>(), dec!(0.6));
}

#[test]
fn count_and_fetch_all() {
    let conn = common::setup_sample_db();
    let columns = ColumnMap::default();
    let query = RecordQuery::new(&conn, "clear_dash_new", &columns);

    assert_eq!(query.count().unwrap(), 5);
    assert_eq!(query.fetch_all().unwrap().len(), 5);
}

#[test]
fn missing_table_is_an_error() {
    let conn = common::setup_sample_db();
    let columns = ColumnMap::default();
    let query = RecordQuery::new(&conn, "no_such_table", &columns);
    assert!(query.all().is_err());
    assert!(query.count().is_err());
}
