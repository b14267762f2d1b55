//! Survey export fixtures shared by the integration tests.
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;

use course_ranker::{ChartStyle, SurveyConfig};
use zip::write::FileOptions;
use zip::ZipWriter;

/// Question codes in the column order of the export.
pub const CODES: [&str; 8] = [
    "Q35_1", "Q35_2", "Q35_3", "Q35_4", "Q35_5", "Q35_8", "Q35_9", "Q35_10",
];

/// Ranks per respondent, in `CODES` order. `None` = left blank.
pub const RESPONSES: [[Option<u8>; 8]; 3] = [
    [Some(1), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7), Some(8)],
    [Some(2), Some(1), Some(3), Some(5), Some(4), Some(6), Some(8), Some(7)],
    [None, Some(3), Some(1), Some(4), Some(2), Some(5), Some(7), Some(8)],
];

/// Course labels with their expected mean rank, in ranking order.
pub fn expected_ranking() -> Vec<(&'static str, f64)> {
    vec![
        ("ACC 6060: Pro. & Leadership", 1.5),
        ("ACC 6400: Adv. Tax Entities", 2.0),
        ("ACC 6540: Pro. Ethics", 7.0 / 3.0),
        ("ACC 6300: Data Analytics", 11.0 / 3.0),
        ("ACC 6510: Financial Audit", 13.0 / 3.0),
        ("ACC 6560: Fin. Theory I", 17.0 / 3.0),
        ("ACC 6350: Mgmt Control Sys", 22.0 / 3.0),
        ("ACC 6600: Business Law", 23.0 / 3.0),
    ]
}

/// Header row, the two label rows, then one row per respondent.
pub fn survey_rows(codes: &[&str]) -> Vec<Vec<String>> {
    let mut header = vec!["ResponseId".to_string()];
    header.extend(codes.iter().map(|c| c.to_string()));
    header.push("Q40".to_string());

    let mut labels = vec!["Response ID".to_string()];
    labels.extend(codes.iter().map(|c| format!("Rank the core courses - {}", c)));
    labels.push("Comments".to_string());

    let mut import_ids = vec!["ImportId:_recordId".to_string()];
    import_ids.extend(codes.iter().map(|c| format!("ImportId:QID{}", &c[1..])));
    import_ids.push("ImportId:QID40".to_string());

    let mut rows = vec![header, labels, import_ids];
    for (i, ranks) in RESPONSES.iter().enumerate() {
        let mut row = vec![format!("R_{}", i + 1)];
        row.extend(codes.iter().map(|code| {
            CODES
                .iter()
                .position(|k| k == code)
                .and_then(|idx| ranks[idx])
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        row.push(String::new());
        rows.push(row);
    }
    rows
}

pub fn write_csv(path: &Path, rows: &[Vec<String>]) {
    write_delimited(path, rows, ",");
}

pub fn write_tsv(path: &Path, rows: &[Vec<String>]) {
    write_delimited(path, rows, "\t");
}

fn write_delimited(path: &Path, rows: &[Vec<String>], separator: &str) {
    let text: String = rows.iter().map(|r| r.join(separator) + "\n").collect();
    std::fs::write(path, text).unwrap();
}

/// Minimal single-sheet xlsx: numbers as values, text as inline strings.
pub fn write_xlsx(path: &Path, rows: &[Vec<String>]) {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        sheet.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let cell_ref = format!("{}{}", column_letter(c), r + 1);
            if value.parse::<f64>().is_ok() {
                sheet.push_str(&format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, value));
            } else {
                sheet.push_str(&format!(
                    r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    cell_ref,
                    escape_xml(value)
                ));
            }
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let parts = [
        (
            "[Content_Types].xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#.to_string(),
        ),
        (
            "_rels/.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#.to_string(),
        ),
        (
            "xl/workbook.xml",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#.to_string(),
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#.to_string(),
        ),
        ("xl/worksheets/sheet1.xml", sheet),
    ];

    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();
    for (name, body) in parts.iter() {
        zip.start_file(*name, options).unwrap();
        zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn column_letter(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.iter().rev().collect()
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Default configuration pointed at a scratch directory.
pub fn config_for(input: &Path, output_dir: &Path) -> SurveyConfig {
    SurveyConfig {
        input_path: input.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        chart: ChartStyle {
            width: 800,
            height: 480,
            ..ChartStyle::default()
        },
        ..SurveyConfig::default()
    }
}
