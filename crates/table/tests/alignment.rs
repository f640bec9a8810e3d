use optreport_table::{
    display_width, log_header, log_row, Cell, ColumnType, Columns, FormatRegistry, TableOptions,
};

const TYPES: [ColumnType; 4] = [
    ColumnType::Float,
    ColumnType::Integer,
    ColumnType::Text,
    ColumnType::Tag,
];

fn sample(column_type: ColumnType) -> Cell {
    match column_type {
        ColumnType::Float => Cell::from(-2.5e-7),
        ColumnType::Integer => Cell::from(17),
        ColumnType::Text => Cell::from("cg"),
        ColumnType::Tag => Cell::tag("small_step"),
        ColumnType::Generic => Cell::generic("g"),
    }
}

/// Byte offsets where each column starts in a line built with separator `colsep`.
fn column_starts(widths: &[usize], colsep: usize) -> Vec<usize> {
    let mut starts = Vec::with_capacity(widths.len());
    let mut offset = 0;
    for width in widths {
        starts.push(offset);
        offset += width + colsep;
    }
    starts
}

#[test]
fn placeholder_width_matches_value_width() {
    for column_type in TYPES {
        let value = log_row(&[sample(column_type)], 2).unwrap();
        let missing = log_row(&[Cell::Missing(column_type)], 2).unwrap();
        assert_eq!(value.len(), missing.len(), "{column_type}");
        assert!(missing.contains('-'));
    }
}

#[test]
fn header_and_rows_share_column_boundaries() {
    let names = ["iter", "objective", "method", "status"];
    let types = [
        ColumnType::Integer,
        ColumnType::Float,
        ColumnType::Text,
        ColumnType::Tag,
    ];
    for colsep in [0, 1, 2, 4] {
        let options = TableOptions::default().with_colsep(colsep);
        let header = log_header(&names, &types, &options).unwrap();
        let full = log_row(&types.map(sample), colsep).unwrap();
        let gaps = log_row(
            &[
                Cell::from(3),
                Cell::Missing(ColumnType::Float),
                Cell::Missing(ColumnType::Text),
                Cell::tag("first_order"),
            ],
            colsep,
        )
        .unwrap();

        assert_eq!(header.len(), full.len());
        assert_eq!(full.len(), gaps.len());

        let registry = FormatRegistry::standard();
        let widths: Vec<_> = types
            .iter()
            .map(|t| registry.format(*t).unwrap().width)
            .collect();
        for start in column_starts(&widths, colsep).into_iter().skip(1) {
            for line in [&header, &full, &gaps] {
                assert_eq!(&line[start - colsep..start], " ".repeat(colsep), "{line:?}");
            }
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let columns = Columns::standard()
        .column("iter", ColumnType::Integer)
        .column("dual_feas", ColumnType::Float);
    let first = (columns.header().unwrap(), columns.row(&[Cell::from(1), Cell::from(0.5)]).unwrap());
    let second = (columns.header().unwrap(), columns.row(&[Cell::from(1), Cell::from(0.5)]).unwrap());
    assert_eq!(first, second);
    assert_eq!(first.0, "  iter      Dual");
    assert_eq!(first.1, "     1   5.0e-01");
}

#[test]
fn wide_labels_and_values_keep_alignment() {
    let options = TableOptions::default().with_label("elapsed_time", "時間");
    let names = ["elapsed_time", "method"];
    let types = [ColumnType::Float, ColumnType::Text];
    let header = log_header(&names, &types, &options).unwrap();
    let full = log_row(&[Cell::from(1.0), Cell::from("最適化")], 2).unwrap();
    let gaps = log_row(&[Cell::Missing(ColumnType::Float), Cell::Missing(ColumnType::Text)], 2).unwrap();

    assert_eq!(header, "    時間  method         ");
    assert_eq!(display_width(&header), display_width(&full));
    assert_eq!(display_width(&full), display_width(&gaps));
    assert_eq!(display_width(&log_row(&[Cell::from("最適化")], 2).unwrap()), 15);
}
