use serde_json::json;
use tabserve::service::TabularService;

#[test]
fn classifies_csv_columns_into_buckets() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("t.csv"),
        "id,name,score\n1,a,1.5\n2,b,2.5\n3,c,3.5\n",
    )
    .unwrap();
    let svc = TabularService::new(dir.path());

    // Sheet name is ignored for CSV; passing one is harmless.
    let info = svc.column_info("t.csv", "ignored").unwrap();
    assert_eq!(info["message"], json!("Column information by data types"));
    assert_eq!(info["shape"], json!([3, 3]));

    let buckets = &info["column_info"];
    assert_eq!(buckets["int_columns"], json!(["id"]));
    assert_eq!(buckets["float_columns"], json!(["score"]));
    assert_eq!(buckets["object_columns"], json!(["name"]));
    assert_eq!(buckets["bool_columns"], json!([]));
    assert_eq!(buckets["datetime_columns"], json!([]));
    assert_eq!(buckets["all_columns"], json!(["id", "name", "score"]));
}

#[test]
fn bucket_sizes_sum_to_column_count() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mixed.csv"),
        "a,b,c,d,e\n1,2.5,true,2024-01-01,x\n2,3.5,false,2024-01-02,y\n",
    )
    .unwrap();
    let svc = TabularService::new(dir.path());

    let info = svc.column_info("mixed.csv", "-").unwrap();
    let buckets = &info["column_info"];
    let total: usize = [
        "float_columns",
        "int_columns",
        "bool_columns",
        "datetime_columns",
        "object_columns",
    ]
    .iter()
    .map(|k| buckets[k].as_array().unwrap().len())
    .sum();

    assert_eq!(total, 5);
    assert_eq!(buckets["all_columns"].as_array().unwrap().len(), 5);
    assert_eq!(info["shape"], json!([2, 5]));

    assert_eq!(buckets["int_columns"], json!(["a"]));
    assert_eq!(buckets["float_columns"], json!(["b"]));
    assert_eq!(buckets["bool_columns"], json!(["c"]));
    assert_eq!(buckets["datetime_columns"], json!(["d"]));
    assert_eq!(buckets["object_columns"], json!(["e"]));
}

#[test]
fn classifies_excel_sheet_columns() {
    use rust_xlsxwriter::Workbook;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Sheet1").unwrap();
    ws.write_string(0, 0, "id").unwrap();
    ws.write_string(0, 1, "name").unwrap();
    ws.write_string(0, 2, "score").unwrap();
    ws.write_number(1, 0, 1).unwrap();
    ws.write_string(1, 1, "Ada").unwrap();
    ws.write_number(1, 2, 98.5).unwrap();
    ws.write_number(2, 0, 2).unwrap();
    ws.write_string(2, 1, "Grace").unwrap();
    ws.write_number(2, 2, 87.25).unwrap();
    wb.save(&path).unwrap();

    let svc = TabularService::new(dir.path());
    let info = svc.column_info("book.xlsx", "Sheet1").unwrap();
    let buckets = &info["column_info"];

    // Whole-valued numeric cells classify as integers, like pandas.
    assert_eq!(buckets["int_columns"], json!(["id"]));
    assert_eq!(buckets["float_columns"], json!(["score"]));
    assert_eq!(buckets["object_columns"], json!(["name"]));
    assert_eq!(info["shape"], json!([2, 3]));
}

#[test]
fn missing_sheet_is_a_soft_failure() {
    use rust_xlsxwriter::Workbook;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Only").unwrap();
    ws.write_string(0, 0, "id").unwrap();
    wb.save(&path).unwrap();

    let svc = TabularService::new(dir.path());
    assert_eq!(
        svc.column_info("book.xlsx", "Missing").unwrap(),
        json!({ "file_name": "book.xlsx", "message": "Sheet does not exist" })
    );
}

#[test]
fn unsupported_extension_never_touches_the_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.parquet"), b"\x00\x01garbage").unwrap();
    let svc = TabularService::new(dir.path());

    assert_eq!(
        svc.column_info("data.parquet", "-").unwrap(),
        json!({ "file_name": "data.parquet", "message": "Unsupported file format" })
    );
}

#[test]
fn null_cells_do_not_demote_an_integer_column() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gaps.csv"), "id,name\n1,a\n,b\n3,c\n").unwrap();
    let svc = TabularService::new(dir.path());

    let info = svc.column_info("gaps.csv", "-").unwrap();
    assert_eq!(info["column_info"]["int_columns"], json!(["id"]));
    assert_eq!(info["shape"], json!([3, 2]));
}
