use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use calamine::{Data, Reader, Xlsx, open_workbook};
use pretty_assertions::assert_eq;
use rosterkit_core::{FormatError, SpecFormatOptions};
use rosterkit_io_xlsx::{
    C_SHEET_NAME_DEFAULT, XlsxIoError, format_files_to_buffer, format_files_to_xlsx,
    format_uploads_to_buffer, read_source_table,
};
use rust_xlsxwriter::Workbook;

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new() -> Self {
        let n = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("rosterkit_xlsx_test_{n}"));
        std::fs::create_dir_all(&path).expect("create test dir");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

enum TestCell {
    Text(&'static str),
    Num(f64),
    Blank,
}

fn write_source(path: &Path, rows: &[Vec<TestCell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (row_num, col_num) = (row_idx as u32, col_idx as u16);
            match cell {
                TestCell::Text(val) => {
                    worksheet.write_string(row_num, col_num, *val).expect("write string");
                }
                TestCell::Num(val) => {
                    worksheet.write_number(row_num, col_num, *val).expect("write number");
                }
                TestCell::Blank => {}
            }
        }
    }
    workbook.save(path).expect("save source");
}

fn write_two_sources(dir: &Path) -> Vec<PathBuf> {
    use TestCell::{Num, Text};

    let path_a = dir.join("a.xlsx");
    let path_b = dir.join("b.xlsx");
    write_source(
        &path_a,
        &[
            vec![Text("S. No."), Text("Name"), Text("Roll No"), Text("Cgpa")],
            vec![Num(1.0), Text("beta"), Text("r2"), Num(8.1)],
            vec![Num(2.0), Text("Alpha"), Text("r1"), Num(9.0)],
        ],
    );
    write_source(
        &path_b,
        &[
            vec![Text("Name"), Text("Cgpa")],
            vec![Text("Gamma"), Num(7.5)],
        ],
    );
    vec![path_a, path_b]
}

fn read_cell(range: &calamine::Range<Data>, row_idx: u32, col_idx: u32) -> Data {
    range
        .get_value((row_idx, col_idx))
        .cloned()
        .unwrap_or(Data::Empty)
}

#[test]
fn two_workbooks_format_into_one_sheet() {
    let tmp = TestDir::new();
    let paths = write_two_sources(tmp.path());
    let path_out = tmp.path().join("Formatted.xlsx");

    let report = format_files_to_xlsx(
        &paths,
        "Semester Roster",
        &SpecFormatOptions::default(),
        &path_out,
    )
    .expect("format files");
    assert_eq!(report.n_sources, 2);
    assert_eq!(report.n_rows, 3);
    assert_eq!(report.columns, vec!["Name", "Roll No", "Cgpa"]);

    let mut workbook: Xlsx<_> = open_workbook(&path_out).expect("open output");
    assert_eq!(workbook.sheet_names(), vec![C_SHEET_NAME_DEFAULT.to_string()]);
    let range = workbook
        .worksheet_range(C_SHEET_NAME_DEFAULT)
        .expect("output sheet");

    assert_eq!(
        read_cell(&range, 1, 1),
        Data::String("Semester Roster".to_string())
    );
    let l_header: Vec<Data> = (1..=4).map(|col_idx| read_cell(&range, 2, col_idx)).collect();
    assert_eq!(
        l_header,
        vec![
            Data::String("S. No.".to_string()),
            Data::String("Name".to_string()),
            Data::String("Roll. No.".to_string()),
            Data::String("CGPA".to_string()),
        ]
    );

    let l_rows: Vec<Vec<Data>> = (3..=5)
        .map(|row_idx| (1..=3).map(|col_idx| read_cell(&range, row_idx, col_idx)).collect())
        .collect();
    assert_eq!(
        l_rows,
        vec![
            vec![
                Data::Float(1.0),
                Data::String("Alpha".to_string()),
                Data::String("R1".to_string())
            ],
            vec![
                Data::Float(2.0),
                Data::String("Beta".to_string()),
                Data::String("R2".to_string())
            ],
            vec![Data::Float(3.0), Data::String("Gamma".to_string()), Data::Empty],
        ]
    );
    assert_eq!(read_cell(&range, 5, 4), Data::Float(7.5));

    // Margin row 0 and margin column 0 stay empty.
    assert_eq!(read_cell(&range, 0, 1), Data::Empty);
    assert_eq!(read_cell(&range, 3, 0), Data::Empty);
}

#[test]
fn title_is_merged_across_the_data_columns() {
    let tmp = TestDir::new();
    let paths = write_two_sources(tmp.path());
    let path_out = tmp.path().join("Formatted.xlsx");
    format_files_to_xlsx(&paths, "Roster", &SpecFormatOptions::default(), &path_out)
        .expect("format files");

    let mut workbook: Xlsx<_> = open_workbook(&path_out).expect("open output");
    workbook.load_merged_regions().expect("merged regions");
    let l_merges = workbook
        .worksheet_merge_cells(C_SHEET_NAME_DEFAULT)
        .expect("sheet exists")
        .expect("merge cells");

    assert_eq!(l_merges.len(), 1);
    assert_eq!(l_merges[0].start, (1, 1));
    assert_eq!(l_merges[0].end, (1, 4));
}

#[test]
fn selection_keeps_only_requested_columns() {
    let tmp = TestDir::new();
    let paths = write_two_sources(tmp.path());
    let options = SpecFormatOptions {
        cols_selected: Some(vec!["Name".to_string()]),
        ..Default::default()
    };

    let (v_bytes, report) = format_files_to_buffer(&paths, "Roster", &options).expect("buffer");
    assert_eq!(report.columns, vec!["Name"]);

    let path_out = tmp.path().join("selected.xlsx");
    std::fs::write(&path_out, v_bytes).expect("write buffer");
    let source = read_source_table(&path_out).expect("read back");
    let l_texts: Vec<String> = source
        .rows
        .iter()
        .flat_map(|row| row.iter().filter_map(|cell| cell.as_str().map(str::to_string)))
        .collect();
    assert_eq!(l_texts, vec!["Roster", "S. No.", "Name", "Alpha", "Beta", "Gamma"]);
}

#[test]
fn unreadable_source_aborts_without_output() {
    let tmp = TestDir::new();
    let mut paths = write_two_sources(tmp.path());
    let path_bad = tmp.path().join("notes.xlsx");
    std::fs::write(&path_bad, "plain text, not a workbook").expect("write bad source");
    paths.push(path_bad);
    let path_out = tmp.path().join("Formatted.xlsx");

    let err = format_files_to_xlsx(&paths, "Roster", &SpecFormatOptions::default(), &path_out)
        .expect_err("bad source");
    assert!(matches!(
        err,
        XlsxIoError::Format(FormatError::MalformedSource { ref source_name, .. })
            if source_name == "notes.xlsx"
    ));
    assert!(!path_out.exists());
}

#[test]
fn header_only_sources_are_empty_input() {
    let tmp = TestDir::new();
    let path_src = tmp.path().join("ids.xlsx");
    write_source(&path_src, &[vec![TestCell::Text("S. No."), TestCell::Blank]]);

    let err = format_files_to_buffer(&[&path_src], "Roster", &SpecFormatOptions::default())
        .expect_err("nothing to keep");
    assert!(matches!(
        err,
        XlsxIoError::Format(FormatError::EmptyInput { n_sources: 1 })
    ));
}

#[test]
fn uploads_are_read_from_memory() {
    let tmp = TestDir::new();
    let paths = write_two_sources(tmp.path());
    let uploads: Vec<(String, Vec<u8>)> = paths
        .iter()
        .map(|path| {
            let c_name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .expect("file name");
            (c_name, std::fs::read(path).expect("read source"))
        })
        .collect();

    let (v_bytes, report) =
        format_uploads_to_buffer(&uploads, "Roster", &SpecFormatOptions::default())
            .expect("uploads");
    assert!(v_bytes.starts_with(b"PK"));
    assert_eq!(report.n_rows, 3);
    assert_eq!(report.sort_column.as_deref(), Some("Name"));
}
