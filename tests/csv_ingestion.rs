use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use tabserve::ingestion::csv::read_csv_table;
use tabserve::types::{DataType, Value};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tabserve-{name}-{nanos}.csv"))
}

#[test]
fn infers_column_types_from_values() {
    let path = tmp_file("infer");
    std::fs::write(
        &path,
        "id,score,active,seen,label\n1,1.5,true,2024-03-01,alpha\n2,2.5,false,2024-03-02,beta\n",
    )
    .unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.shape(), (2, 5));

    let types: Vec<DataType> = table.columns.iter().map(|c| c.data_type).collect();
    assert_eq!(
        types,
        vec![
            DataType::Int64,
            DataType::Float64,
            DataType::Bool,
            DataType::DateTime,
            DataType::Utf8,
        ]
    );

    assert_eq!(table.rows[0][0], Value::Int64(1));
    assert_eq!(table.rows[1][1], Value::Float64(2.5));
    assert_eq!(table.rows[1][2], Value::Bool(false));
    assert_eq!(
        table.rows[0][3],
        Value::DateTime(
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        )
    );
    assert_eq!(table.rows[0][4], Value::Utf8("alpha".to_string()));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn mixed_int_and_float_column_unifies_to_float() {
    let path = tmp_file("mixed");
    std::fs::write(&path, "x\n1\n2.5\n3\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.columns[0].data_type, DataType::Float64);
    assert_eq!(table.rows[0][0], Value::Float64(1.0));
    assert_eq!(table.rows[1][0], Value::Float64(2.5));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn mixed_type_column_falls_back_to_text() {
    let path = tmp_file("fallback");
    std::fs::write(&path, "x\n1\nhello\ntrue\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.columns[0].data_type, DataType::Utf8);
    assert_eq!(table.rows[0][0], Value::Utf8("1".to_string()));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_cells_map_to_null() {
    let path = tmp_file("nulls");
    std::fs::write(&path, "a,b\n1,x\n,y\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.columns[0].data_type, DataType::Int64);
    assert_eq!(table.rows[1][0], Value::Null);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn all_null_column_infers_as_float() {
    let path = tmp_file("allnull");
    std::fs::write(&path, "a,b\n,x\n,y\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.columns[0].data_type, DataType::Float64);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn header_only_file_has_zero_rows() {
    let path = tmp_file("empty");
    std::fs::write(&path, "a,b,c\n").unwrap();

    let table = read_csv_table(&path).unwrap();
    assert_eq!(table.shape(), (0, 3));
    assert_eq!(table.column_names(), vec!["a", "b", "c"]);

    let _ = std::fs::remove_file(&path);
}
