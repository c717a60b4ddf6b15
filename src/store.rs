use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{QuoteStyle, StringRecord, Terminator, WriterBuilder};
use log::{debug, info};

use crate::error::{Result, StorageError};
use crate::models::{parse_amount, parse_date, Category, Transaction, TransactionInput, DATE_FORMAT};

pub const HEADER: [&str; 4] = ["date", "amount", "category", "description"];

const TORN_ENTRY: &str = "incomplete entry at end of file (interrupted write?)";

type StorageResult<T> = std::result::Result<T, StorageError>;

/// Append-only CSV file holding every transaction, one per line.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file with its header row if absent. An existing file only has
    /// its header checked.
    pub fn initialize(&self) -> Result<()> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > 0 => {
                self.check_header()?;
                debug!("data file {} already initialized", self.path.display());
                return Ok(());
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StorageError::Io(e).into()),
        }
        self.create()?;
        info!("created data file {}", self.path.display());
        Ok(())
    }

    /// Validate and persist one record. The line is on disk when this returns.
    pub fn append(&self, txn: &Transaction) -> Result<()> {
        txn.validate()?;
        if !self.path.exists() {
            return Err(StorageError::Missing(self.path.clone()).into());
        }
        self.check_header()?;
        self.write_row(txn)?;
        info!(
            "appended {} {} on {} to {}",
            txn.category,
            txn.amount,
            txn.date,
            self.path.display()
        );
        Ok(())
    }

    pub fn append_input(&self, input: &TransactionInput) -> Result<Transaction> {
        let txn = input.validate()?;
        self.append(&txn)?;
        Ok(txn)
    }

    /// Read every record in file order. Any malformed entry fails the whole load.
    pub fn load_all(&self) -> Result<Vec<Transaction>> {
        let data = self.read_existing()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data.as_slice());
        let mut rows = rdr.records();

        let header = rows
            .next()
            .ok_or(StorageError::MissingHeader)?
            .map_err(StorageError::from)?;
        verify_header(&header)?;
        let mut last = header.position().cloned();

        let mut txns = Vec::new();
        for row in rows {
            let row = row.map_err(StorageError::from)?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let txn = parse_row(&row).map_err(|reason| StorageError::MalformedEntry { line, reason })?;
            txns.push(txn);
            last = row.position().cloned();
        }

        // The reader closes a quote left open at EOF, so a torn final entry
        // would otherwise parse.
        if let Some(pos) = last {
            let start = usize::try_from(pos.byte()).unwrap_or(data.len()).min(data.len());
            if !is_terminated(&data[start..]) {
                return Err(StorageError::MalformedEntry {
                    line: pos.line(),
                    reason: TORN_ENTRY.to_string(),
                }
                .into());
            }
        }
        debug!("loaded {} transactions from {}", txns.len(), self.path.display());
        Ok(txns)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.load_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // -----------------------------------------------------------------------
    // File plumbing
    // -----------------------------------------------------------------------

    fn open_existing(&self) -> StorageResult<File> {
        File::open(&self.path).map_err(|e| self.missing_or_io(e))
    }

    fn read_existing(&self) -> StorageResult<Vec<u8>> {
        fs::read(&self.path).map_err(|e| self.missing_or_io(e))
    }

    fn missing_or_io(&self, e: io::Error) -> StorageError {
        match e.kind() {
            io::ErrorKind::NotFound => StorageError::Missing(self.path.clone()),
            _ => StorageError::Io(e),
        }
    }

    fn create(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(&encode(&HEADER)?)?;
        file.sync_all()?;
        Ok(())
    }

    fn check_header(&self) -> StorageResult<()> {
        let file = self.open_existing()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);
        let mut header = StringRecord::new();
        if !rdr.read_record(&mut header)? {
            return Err(StorageError::MissingHeader);
        }
        verify_header(&header)
    }

    fn write_row(&self, txn: &Transaction) -> StorageResult<()> {
        let date = txn.date.format(DATE_FORMAT).to_string();
        let amount = txn.amount.to_string();
        let buf = encode(&[
            date.as_str(),
            amount.as_str(),
            txn.category.label(),
            txn.description.as_str(),
        ])?;

        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        // A partial last line may hold an open quote that would swallow our row.
        if !ends_with_newline(&mut file)? {
            return Err(StorageError::MalformedEntry {
                line: last_line_number(&self.path)?,
                reason: TORN_ENTRY.to_string(),
            });
        }
        file.write_all(&buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(())
    }
}

/// One CSV line, quoted only where needed.
fn encode(fields: &[&str]) -> StorageResult<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(fields)?;
    wtr.into_inner().map_err(|e| StorageError::Io(e.into_error()))
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Physical line number of the last line in the file.
fn last_line_number(path: &Path) -> io::Result<u64> {
    let data = fs::read(path)?;
    let newlines = data.iter().filter(|b| **b == b'\n').count() as u64;
    Ok(newlines + 1)
}

/// True when `tail`, the bytes of the final record, ends on a newline outside quotes.
fn is_terminated(tail: &[u8]) -> bool {
    let quotes = tail.iter().filter(|b| **b == b'"').count();
    quotes % 2 == 0 && tail.ends_with(b"\n")
}

fn verify_header(record: &StringRecord) -> StorageResult<()> {
    if record.iter().eq(HEADER.iter().copied()) {
        return Ok(());
    }
    Err(StorageError::HeaderMismatch {
        found: record.iter().collect::<Vec<_>>().join(","),
        expected: HEADER.join(","),
    })
}

fn parse_row(row: &StringRecord) -> std::result::Result<Transaction, String> {
    if row.len() != HEADER.len() {
        return Err(format!("expected {} fields, found {}", HEADER.len(), row.len()));
    }
    let date = parse_date(&row[0]).ok_or_else(|| format!("invalid date '{}'", &row[0]))?;
    let amount = parse_amount(&row[1]).ok_or_else(|| format!("invalid amount '{}'", &row[1]))?;
    let category = Category::from_str(&row[2]).map_err(|e| e.to_string())?;
    let txn = Transaction::new(date, amount, category, &row[3]);
    txn.validate().map_err(|e| e.to_string())?;
    Ok(txn)
}
