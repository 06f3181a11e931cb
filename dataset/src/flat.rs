use crate::common::*;
use annot::RawField;

/// One row of a flat annotation table: `filename, x, y, w, h, class`.
///
/// The column names follow the common corner-plus-size layout, but the
/// configured format tag decides how the four numbers are interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecord {
    pub filename: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub class: String,
}

impl FlatRecord {
    pub fn to_raw(&self) -> Vec<RawField<f64>> {
        vec![
            RawField::num(self.x),
            RawField::num(self.y),
            RawField::num(self.w),
            RawField::num(self.h),
            RawField::text(self.class.clone()),
        ]
    }

    /// Builds a record from the first 6 columns; trailing columns are
    /// ignored.
    fn from_fields(fields: &[&str]) -> Result<Self> {
        ensure!(fields.len() >= 6, "expected 6 columns, found {}", fields.len());

        let parse = |index: usize| -> Result<f64> {
            fields[index]
                .parse()
                .with_context(|| format!("non-numeric value '{}' in column {}", fields[index], index + 1))
        };

        Ok(Self {
            filename: fields[0].to_owned(),
            x: parse(1)?,
            y: parse(2)?,
            w: parse(3)?,
            h: parse(4)?,
            class: fields[5].to_owned(),
        })
    }
}

/// Reads a flat annotation table, comma-delimited for `.csv` and
/// whitespace-delimited otherwise. Malformed rows are skipped.
pub fn parse_flat_file(file: &Path) -> Result<Vec<FlatRecord>> {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => parse_comma_table(file),
        _ => parse_whitespace_table(file),
    }
}

fn parse_comma_table(file: &Path) -> Result<Vec<FlatRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(file)
        .with_context(|| format!("failed to open annotation table '{}'", file.display()))?;

    let mut records = vec![];
    for (row_index, row) in reader.records().enumerate() {
        let parsed = row.map_err(anyhow::Error::from).and_then(|row| {
            let fields: Vec<_> = row.iter().collect();
            FlatRecord::from_fields(&fields)
        });
        match parsed {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(
                    "skipping row {} of '{}': {}",
                    row_index + 1,
                    file.display(),
                    err
                );
            }
        }
    }

    Ok(records)
}

fn parse_whitespace_table(file: &Path) -> Result<Vec<FlatRecord>> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to open annotation table '{}'", file.display()))?;

    let mut records = vec![];
    for (row_index, line) in text.lines().enumerate() {
        // Any run of spaces or tabs separates columns.
        let fields: Vec<_> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        match FlatRecord::from_fields(&fields) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(
                    "skipping row {} of '{}': {}",
                    row_index + 1,
                    file.display(),
                    err
                );
            }
        }
    }

    Ok(records)
}
