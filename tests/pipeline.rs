//! End-to-end pipeline tests against synthetic CP-Seeker workbooks.
//!
//! Fixtures mirror the shape of real CP-Seeker output: per sheet, a two-row
//! header over a scores block (`Score` + variant columns, default range
//! `A:AC`) and an intensities block (`Intensities` + variant columns,
//! default range `AD:BF`). Workbooks are built in memory and fed to the
//! pipeline through a `Cursor`, so no files touch disk.

use std::io::Cursor;

use proptest::prelude::*;
use rust_xlsxwriter::Workbook;

use cpmerge::{run_pipeline, to_csv_bytes, PipelineParams};

const N_ROWS: usize = 31;
const N_VARIANTS: usize = 28;

fn formula(i: usize) -> String {
    format!("C{}H{}", 9 + i, 2 * (9 + i))
}

fn variant(j: usize) -> String {
    format!("Cl{}", 4 + j)
}

/// Build a CP-Seeker-shaped workbook: one sheet, `rows` formulas by
/// `variants` chlorine columns, every score and intensity cell taken from
/// the supplied closures.
fn workbook(
    sheet: &str,
    rows: usize,
    variants: usize,
    score: impl Fn(usize, usize) -> f64,
    intensity: impl Fn(usize, usize) -> f64,
) -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name(sheet).unwrap();

    let int_offset = (variants + 1) as u16;

    // Row 0: the title row the reader must skip.
    ws.write_string(0, 0, "CP-Seeker results").unwrap();
    ws.write_string(0, int_offset, "CP-Seeker results").unwrap();

    // Row 1: column names for both blocks.
    ws.write_string(1, 0, "Score").unwrap();
    ws.write_string(1, int_offset, "Intensities").unwrap();
    for j in 0..variants {
        ws.write_string(1, (1 + j) as u16, &variant(j)).unwrap();
        ws.write_string(1, int_offset + 1 + j as u16, &variant(j))
            .unwrap();
    }

    // Rows 2+: data. Both blocks carry the formula in their label column.
    for i in 0..rows {
        let r = (2 + i) as u32;
        ws.write_string(r, 0, &formula(i)).unwrap();
        ws.write_string(r, int_offset, &formula(i)).unwrap();
        for j in 0..variants {
            ws.write_number(r, (1 + j) as u16, score(i, j)).unwrap();
            ws.write_number(r, int_offset + 1 + j as u16, intensity(i, j))
                .unwrap();
        }
    }

    wb.save_to_buffer().unwrap()
}

/// Default-shaped fixture with uniform scores and all intensities = 1,
/// matching the CP-Seeker test exports (31 rows x 28 variants = 868 keys).
fn uniform_fixture(score: f64) -> Vec<u8> {
    workbook("test", N_ROWS, N_VARIANTS, |_, _| score, |_, _| 1.0)
}

fn params(threshold: u32) -> PipelineParams {
    PipelineParams {
        threshold,
        ..PipelineParams::default()
    }
}

fn col_letters(mut idx: usize) -> String {
    let mut s = String::new();
    idx += 1;
    while idx > 0 {
        let rem = (idx - 1) % 26;
        s.insert(0, (b'A' + rem as u8) as char);
        idx = (idx - 1) / 26;
    }
    s
}

/// Ranges matching a `workbook(..)` fixture with the given variant count:
/// scores at columns `0..=variants`, intensities right after.
fn params_for(variants: usize, threshold: u32) -> PipelineParams {
    PipelineParams {
        threshold,
        location_scores: format!("A:{}", col_letters(variants)),
        location_intensities: format!(
            "{}:{}",
            col_letters(variants + 1),
            col_letters(2 * variants + 1)
        ),
    }
}

fn run_one(bytes: Vec<u8>, threshold: u32) -> cpmerge::MergedTable {
    run_pipeline(
        vec![("fixture".to_string(), Cursor::new(bytes))],
        &params(threshold),
    )
    .unwrap()
}

fn retained_cells(table: &cpmerge::MergedTable) -> usize {
    table
        .rows
        .iter()
        .flat_map(|row| row.iter())
        .filter(|cell| cell.is_some())
        .count()
}

// ---------------------------------------------------------------------------
// Spec scenarios: uniform confidence vs threshold
// ---------------------------------------------------------------------------

#[test]
fn confidence_80_threshold_80_retains_everything() {
    let merged = run_one(uniform_fixture(80.0), 80);
    assert_eq!(merged.num_rows(), N_ROWS * N_VARIANTS);
    assert_eq!(merged.num_columns(), 1);
    assert_eq!(retained_cells(&merged), 868);
}

#[test]
fn confidence_10_threshold_80_drops_everything() {
    let merged = run_one(uniform_fixture(10.0), 80);
    assert_eq!(merged.num_rows(), 0);
    assert_eq!(merged.num_columns(), 1);
}

#[test]
fn confidence_10_threshold_5_retains_everything() {
    let merged = run_one(uniform_fixture(10.0), 5);
    assert_eq!(merged.num_rows(), 868);
    assert_eq!(retained_cells(&merged), 868);
}

#[test]
fn threshold_0_retains_all_scored_cells() {
    let merged = run_one(uniform_fixture(1.0), 0);
    assert_eq!(retained_cells(&merged), 868);
}

#[test]
fn threshold_100_retains_only_perfect_scores() {
    // Exactly one cell scores 100, everything else 99.
    let bytes = workbook(
        "test",
        N_ROWS,
        N_VARIANTS,
        |i, j| if i == 0 && j == 0 { 100.0 } else { 99.0 },
        |_, _| 1.0,
    );
    let merged = run_one(bytes, 100);
    assert_eq!(merged.num_rows(), 1);
    assert_eq!(merged.keys, vec![format!("{}{}", formula(0), variant(0))]);
}

// ---------------------------------------------------------------------------
// Key construction and ordering
// ---------------------------------------------------------------------------

#[test]
fn keys_follow_row_major_traversal() {
    let merged = run_one(uniform_fixture(80.0), 80);

    let mut expected = Vec::new();
    for i in 0..N_ROWS {
        for j in 0..N_VARIANTS {
            expected.push(format!("{}{}", formula(i), variant(j)));
        }
    }
    assert_eq!(merged.keys, expected);
}

#[test]
fn pipeline_is_deterministic() {
    let a = run_one(uniform_fixture(80.0), 80);
    let b = run_one(uniform_fixture(80.0), 80);
    assert_eq!(a.keys, b.keys);
    assert_eq!(to_csv_bytes(&a).unwrap(), to_csv_bytes(&b).unwrap());
}

#[test]
fn sheets_are_processed_in_workbook_order() {
    let mut wb = Workbook::new();
    for sheet in ["run_b", "run_a"] {
        let ws = wb.add_worksheet();
        ws.set_name(sheet).unwrap();
        ws.write_string(0, 0, "title").unwrap();
        ws.write_string(1, 0, "Score").unwrap();
        ws.write_string(1, 1, "Cl4").unwrap();
        ws.write_string(1, 2, "Intensities").unwrap();
        ws.write_string(1, 3, "Cl4").unwrap();
        ws.write_string(2, 0, sheet).unwrap();
        ws.write_number(2, 1, 90.0).unwrap();
        ws.write_string(2, 2, sheet).unwrap();
        ws.write_number(2, 3, 1.0).unwrap();
    }
    let bytes = wb.save_to_buffer().unwrap();

    let merged = run_pipeline(
        vec![("f".to_string(), Cursor::new(bytes))],
        &PipelineParams {
            threshold: 80,
            location_scores: "A:B".to_string(),
            location_intensities: "C:D".to_string(),
        },
    )
    .unwrap();

    // Sheet order, not alphabetical order.
    assert_eq!(merged.keys, vec!["run_bCl4", "run_aCl4"]);
}

// ---------------------------------------------------------------------------
// Multi-file merge
// ---------------------------------------------------------------------------

#[test]
fn two_file_merge_outer_aligns_on_key() {
    // File A scores pass only in the first row; file B only in the second.
    let a = workbook(
        "s",
        2,
        2,
        |i, _| if i == 0 { 90.0 } else { 10.0 },
        |_, _| 1.0,
    );
    let b = workbook(
        "s",
        2,
        2,
        |i, _| if i == 1 { 90.0 } else { 10.0 },
        |_, _| 2.0,
    );

    let merged = run_pipeline(
        vec![
            ("a".to_string(), Cursor::new(a)),
            ("b".to_string(), Cursor::new(b)),
        ],
        &params_for(2, 80),
    )
    .unwrap();

    assert_eq!(merged.columns, vec!["a", "b"]);
    // Outer alignment keeps every key that any file filled.
    assert_eq!(merged.num_rows(), 4);
    for (key, row) in merged.keys.iter().zip(&merged.rows) {
        let from_a = key.starts_with(&formula(0));
        assert_eq!(row[0].is_some(), from_a, "key {key}");
        assert_eq!(row[1].is_some(), !from_a, "key {key}");
    }
}

#[test]
fn merged_row_count_never_below_either_input() {
    let a = uniform_fixture(80.0);
    let b = uniform_fixture(10.0);

    let alone = run_one(a.clone(), 80);
    let merged = run_pipeline(
        vec![
            ("a".to_string(), Cursor::new(a)),
            ("b".to_string(), Cursor::new(b)),
        ],
        &params(80),
    )
    .unwrap();

    assert!(merged.num_rows() >= alone.num_rows());
    assert_eq!(merged.num_columns(), 2);
}

// ---------------------------------------------------------------------------
// CSV output
// ---------------------------------------------------------------------------

#[test]
fn csv_starts_with_key_column_and_file_headers() {
    let merged = run_one(uniform_fixture(80.0), 80);
    let text = String::from_utf8(to_csv_bytes(&merged).unwrap()).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("formula,fixture"));
    assert_eq!(
        lines.next(),
        Some(format!("{}{},1", formula(0), variant(0)).as_str())
    );
    // Header plus one record per retained key.
    assert_eq!(text.lines().count(), 1 + 868);
}

// ---------------------------------------------------------------------------
// Threshold monotonicity (property)
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Raising the threshold never retains more cells, lowering it never
    /// retains fewer.
    #[test]
    fn retention_is_monotone_in_threshold(
        scores in proptest::collection::vec(0u32..=100, 6),
        t1 in 0u32..=100,
        t2 in 0u32..=100,
    ) {
        let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

        // 2 formulas x 3 variants, scores drawn from the proptest vector.
        let bytes = workbook(
            "s",
            2,
            3,
            |i, j| f64::from(scores[i * 3 + j]),
            |_, _| 1.0,
        );
        let run = |threshold: u32| {
            run_pipeline(
                vec![("f".to_string(), Cursor::new(bytes.clone()))],
                &params_for(3, threshold),
            )
            .unwrap()
        };

        let at_lo = retained_cells(&run(lo));
        let at_hi = retained_cells(&run(hi));
        prop_assert!(at_hi <= at_lo);

        // Inclusive contract: threshold 0 keeps every scored cell.
        prop_assert_eq!(retained_cells(&run(0)), 6);
    }
}
