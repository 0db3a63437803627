use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use hindo_types::RankedRow;
use tempfile::NamedTempFile;

use crate::dictionary::parent_or_current;

pub const HEADER: [&str; 5] = ["Rank", "Word", "Hiragana", "Translation", "Frequency"];

const RANK_COLUMN: usize = 0;
const FREQUENCY_COLUMN: usize = 4;

/// The ranked table as stored on disk: a header row plus raw string rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RankedTable {
    pub fn from_rows(rows: &[RankedRow]) -> Self {
        Self {
            header: HEADER.iter().map(|s| s.to_string()).collect(),
            rows: rows.iter().map(|row| row.to_record().to_vec()).collect(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Err(TableError::MissingHeader(path.to_path_buf())),
        };

        let mut rows = Vec::new();
        for record in records {
            rows.push(record?.iter().map(str::to_string).collect());
        }

        Ok(Self { header, rows })
    }

    /// Replace the whole file at `path` via a temp file and rename
    pub fn write(&self, path: &Path) -> Result<(), TableError> {
        let parent_dir = parent_or_current(path);
        let mut temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(temp_file.as_file_mut());
            writer.write_record(&self.header)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        temp_file.persist(path)?;
        Ok(())
    }

    /// Stable sort on the frequency column, highest first.
    /// Rows whose frequency is not a non-negative integer go to the end.
    pub fn sort_by_frequency(&mut self) {
        self.rows.sort_by_key(|row| Reverse(frequency_of(row)));
    }

    /// Set the rank column to the 1-based row position
    pub fn renumber(&mut self) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            let rank = (i + 1).to_string();
            match row.get_mut(RANK_COLUMN) {
                Some(field) => *field = rank,
                None => row.push(rank),
            }
        }
    }
}

fn frequency_of(row: &[String]) -> Option<u64> {
    row.get(FREQUENCY_COLUMN)
        .and_then(|field| field.trim().parse::<u64>().ok())
}

/// Persist freshly enriched rows
pub fn write_table(path: &Path, rows: &[RankedRow]) -> Result<(), TableError> {
    RankedTable::from_rows(rows).write(path)?;
    tracing::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Re-sort the table file by frequency, descending
pub fn freq_order(path: &Path) -> Result<(), TableError> {
    let mut table = RankedTable::read(path)?;
    table.sort_by_frequency();
    table.write(path)
}

/// Rewrite the rank column as 1..N
pub fn order_num(path: &Path) -> Result<(), TableError> {
    let mut table = RankedTable::read(path)?;
    table.renumber();
    table.write(path)
}

/// `freq_order` followed by `order_num`
pub fn resort(path: &Path) -> Result<(), TableError> {
    freq_order(path)?;
    order_num(path)?;
    tracing::info!("Re-sorted {}", path.display());
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table has no header row: {0}")]
    MissingHeader(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to replace table: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use hindo_types::LookupOutcome;

    use super::*;

    fn write_raw(path: &Path, rows: &[[&str; 5]]) {
        let table = RankedTable {
            header: HEADER.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        };
        table.write(path).unwrap();
    }

    fn column(table: &RankedTable, index: usize) -> Vec<String> {
        table.rows.iter().map(|row| row[index].clone()).collect()
    }

    #[test]
    fn resort_orders_by_frequency_and_renumbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("word_frequency.csv");
        write_raw(
            &path,
            &[
                ["1", "犬", "いぬ", "dog", "3"],
                ["2", "本", "ほん", "book", "5"],
                ["3", "猫", "ねこ", "cat", "1"],
            ],
        );

        resort(&path).unwrap();

        let table = RankedTable::read(&path).unwrap();
        assert_eq!(table.header, HEADER.to_vec());
        assert_eq!(column(&table, 4), vec!["5", "3", "1"]);
        assert_eq!(column(&table, 0), vec!["1", "2", "3"]);
        assert_eq!(column(&table, 1), vec!["本", "犬", "猫"]);
    }

    #[test]
    fn resort_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_raw(
            &path,
            &[
                ["7", "a", "", "x, y; z", "2"],
                ["3", "b", "", "\"quoted\"", "9"],
                ["3", "c", "", "no definition found", "2"],
                ["9", "d", "", "w", "oops"],
                ["1", "e", "", "v", "4"],
            ],
        );

        resort(&path).unwrap();
        let once = std::fs::read(&path).unwrap();
        resort(&path).unwrap();
        let twice = std::fs::read(&path).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn equal_frequencies_keep_their_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_raw(
            &path,
            &[
                ["1", "c", "", "", "2"],
                ["2", "a", "", "", "2"],
                ["3", "b", "", "", "8"],
                ["4", "d", "", "", "2"],
            ],
        );

        freq_order(&path).unwrap();

        let table = RankedTable::read(&path).unwrap();
        assert_eq!(column(&table, 1), vec!["b", "c", "a", "d"]);
        // freq_order alone leaves ranks untouched
        assert_eq!(column(&table, 0), vec!["3", "1", "2", "4"]);
    }

    #[test]
    fn unparseable_frequency_sorts_last() {
        let mut table = RankedTable {
            header: HEADER.iter().map(|s| s.to_string()).collect(),
            rows: vec![
                vec!["1".into(), "a".into(), "".into(), "".into(), "n/a".into()],
                vec!["2".into(), "b".into(), "".into(), "".into(), "1".into()],
                vec!["3".into(), "c".into()],
                vec!["4".into(), "d".into(), "".into(), "".into(), "10".into()],
            ],
        };

        table.sort_by_frequency();
        table.renumber();

        let terms: Vec<&str> = table.rows.iter().map(|row| row[1].as_str()).collect();
        assert_eq!(terms, vec!["d", "b", "a", "c"]);
        let ranks: Vec<&str> = table.rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(ranks, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn order_num_produces_dense_ranks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        write_raw(
            &path,
            &[
                ["5", "a", "", "", "3"],
                ["5", "b", "", "", "2"],
                ["12", "c", "", "", "1"],
            ],
        );

        order_num(&path).unwrap();

        let table = RankedTable::read(&path).unwrap();
        assert_eq!(column(&table, 0), vec!["1", "2", "3"]);
    }

    #[test]
    fn written_rows_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        let rows = vec![RankedRow::new(
            1,
            "上".into(),
            4,
            LookupOutcome::Found {
                definition: "above, up; top".into(),
                reading: "うえ".into(),
            },
        )];

        write_table(&path, &rows).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Rank,Word,Hiragana,Translation,Frequency\n"));
        assert_eq!(RankedTable::read(&path).unwrap(), RankedTable::from_rows(&rows));
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resort(&dir.path().join("absent.csv")).is_err());
    }

    #[test]
    fn empty_file_has_no_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            RankedTable::read(&path),
            Err(TableError::MissingHeader(_))
        ));
    }
}
