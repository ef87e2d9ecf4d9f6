//! Header lookup and typed cell access shared by the table readers.

use csv::StringRecord;

use gd_core::ExtraFields;

use crate::{LoadError, LoadResult};

/// Column positions of one table, by header name.
pub(crate) struct Columns {
    file: &'static str,
    names: Vec<String>,
}

impl Columns {
    pub(crate) fn new(file: &'static str, headers: &StringRecord) -> Self {
        Self { file, names: headers.iter().map(|h| h.trim().to_owned()).collect() }
    }

    pub(crate) fn optional(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub(crate) fn required(&self, name: &'static str) -> LoadResult<usize> {
        self.optional(name).ok_or(LoadError::MissingColumn { file: self.file, column: name })
    }

    /// Positions not claimed by the core schema.
    pub(crate) fn extras(&self, used: &[Option<usize>]) -> Vec<usize> {
        (0..self.names.len()).filter(|i| !used.contains(&Some(*i))).collect()
    }

    pub(crate) fn row<'a>(&'a self, row: usize, record: &'a StringRecord) -> Row<'a> {
        Row { cols: self, row, record }
    }
}

/// One data row.  `row` is 1-based, not counting the header.
pub(crate) struct Row<'a> {
    cols: &'a Columns,
    row: usize,
    record: &'a StringRecord,
}

impl Row<'_> {
    pub(crate) fn number(&self) -> usize {
        self.row
    }

    /// Trimmed cell text; `""` for a short row.
    pub(crate) fn text(&self, idx: usize) -> &str {
        self.record.get(idx).map_or("", str::trim)
    }

    /// Cell text if the column exists and the cell is non-empty.
    pub(crate) fn opt_text(&self, idx: Option<usize>) -> Option<&str> {
        idx.map(|i| self.text(i)).filter(|s| !s.is_empty())
    }

    fn invalid(&self, idx: usize) -> LoadError {
        LoadError::InvalidValue {
            file: self.cols.file,
            row: self.row,
            column: self.cols.names.get(idx).cloned().unwrap_or_default(),
            value: self.text(idx).to_owned(),
        }
    }

    pub(crate) fn f64(&self, idx: usize) -> LoadResult<f64> {
        self.text(idx).parse::<f64>().map_err(|_| self.invalid(idx))
    }

    pub(crate) fn opt_f64(&self, idx: Option<usize>) -> LoadResult<Option<f64>> {
        match idx {
            Some(i) if !self.text(i).is_empty() => self.f64(i).map(Some),
            _ => Ok(None),
        }
    }

    /// Integer id.  Integral floats (`"12.0"`) are accepted since spreadsheet
    /// tools write ids that way once a column holds blanks.
    pub(crate) fn id(&self, idx: usize) -> LoadResult<u64> {
        let s = self.text(idx);
        if let Ok(v) = s.parse::<u64>() {
            return Ok(v);
        }
        match s.parse::<f64>() {
            Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
            _ => Err(self.invalid(idx)),
        }
    }

    pub(crate) fn opt_id(&self, idx: Option<usize>) -> LoadResult<Option<u64>> {
        match idx {
            Some(i) if !self.text(i).is_empty() => self.id(i).map(Some),
            _ => Ok(None),
        }
    }

    /// `0`/`1`/`true`/`false`; empty or absent is `false`.
    pub(crate) fn flag(&self, idx: Option<usize>) -> LoadResult<bool> {
        let Some(i) = idx else { return Ok(false) };
        match self.text(i).to_ascii_lowercase().as_str() {
            "" | "0" | "0.0" | "false" => Ok(false),
            "1" | "1.0" | "true" => Ok(true),
            _ => Err(self.invalid(i)),
        }
    }

    pub(crate) fn extra(&self, extras: &[usize]) -> ExtraFields {
        extras
            .iter()
            .map(|&i| (self.cols.names[i].clone(), self.text(i).to_owned()))
            .collect()
    }
}

/// Keep the last row for each id, at the position of its first occurrence.
pub(crate) fn dedupe_by_key<T, K: Ord + Copy>(rows: Vec<T>, key: impl Fn(&T) -> K, file: &str) -> Vec<T> {
    use std::collections::BTreeMap;

    let mut position: BTreeMap<K, usize> = BTreeMap::new();
    let mut out: Vec<T> = Vec::with_capacity(rows.len());
    let mut replaced = 0usize;
    for row in rows {
        match position.get(&key(&row)) {
            Some(&i) => {
                out[i] = row;
                replaced += 1;
            }
            None => {
                position.insert(key(&row), out.len());
                out.push(row);
            }
        }
    }
    if replaced > 0 {
        log::warn!("{file}: {replaced} rows repeat an earlier id and replace it");
    }
    out
}
