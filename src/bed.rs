//! Streaming BED reader and writer.
//!
//! The reader yields one typed record per data line, attributing any failure
//! to its 1-based line number. Blank lines are skipped; header lines
//! (`#`, `track`, `browser`) are either skipped or surfaced verbatim.

use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::marker::PhantomData;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{BedError, FormatError, Result};
use crate::format::{self, Decode, Delimiter, Encode};
use crate::record::Schema;

/// One non-blank line of a BED file.
#[derive(Debug, Clone, PartialEq)]
pub enum BedLine<T> {
    /// A header or comment line, without its line terminator.
    Comment(String),
    Record(T),
}

/// A streaming reader of records of kind `T`.
pub struct BedReader<R: Read, T> {
    reader: BufReader<R>,
    delimiter: Delimiter,
    line_number: usize,
    buffer: String,
    _kind: PhantomData<fn() -> T>,
}

/// Open a file for reading, decompressing `.gz` and `.bgz` files.
///
/// BGZF files are concatenated gzip members, so both go through
/// [`MultiGzDecoder`].
pub fn open_path<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn Read>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_gzipped = matches!(
        path.extension().and_then(OsStr::to_str),
        Some("gz") | Some("bgz")
    );
    Ok(match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    })
}

impl<T: Decode> BedReader<Box<dyn Read>, T> {
    /// Open a BED file from a path, gzip-compressed or not.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(open_path(path)?))
    }
}

impl<R: Read, T: Decode> BedReader<R, T> {
    /// Create a new BED reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 64 * 1024)
    }

    /// Create a BED reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            delimiter: Delimiter::Tab,
            line_number: 0,
            buffer: String::with_capacity(1024),
            _kind: PhantomData,
        }
    }

    /// Split columns on `delimiter` instead of single tabs.
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The 1-based number of the last line read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read the next non-blank line.
    pub fn read_line_item(&mut self) -> Result<Option<BedLine<T>>> {
        loop {
            self.buffer.clear();
            let bytes_read = self
                .reader
                .read_line(&mut self.buffer)
                .map_err(|e| BedError::from(e).at_line(self.line_number + 1))?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = format::trim_line_end(&self.buffer);
            if line.trim().is_empty() {
                continue;
            }
            if format::is_comment(line) {
                return Ok(Some(BedLine::Comment(line.to_string())));
            }

            return format::decode_line(line, self.delimiter)
                .map(|record| Some(BedLine::Record(record)))
                .map_err(|e| e.at_line(self.line_number));
        }
    }

    /// Read the next record, skipping comments.
    pub fn read_record(&mut self) -> Result<Option<T>> {
        while let Some(item) = self.read_line_item()? {
            if let BedLine::Record(record) = item {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Iterate over records, skipping comments.
    pub fn records(self) -> Records<R, T> {
        Records { reader: self }
    }

    /// Iterate over records and comments in file order.
    pub fn lines(self) -> Lines<R, T> {
        Lines { reader: self }
    }
}

/// Iterator over BED records.
pub struct Records<R: Read, T> {
    reader: BedReader<R, T>,
}

impl<R: Read, T: Decode> Iterator for Records<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_record().transpose()
    }
}

/// Iterator over records and comments.
pub struct Lines<R: Read, T> {
    reader: BedReader<R, T>,
}

impl<R: Read, T: Decode> Iterator for Lines<R, T> {
    type Item = Result<BedLine<T>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_line_item().transpose()
    }
}

/// A writer of records of one kind, one tab-delimited line each.
///
/// The first record fixes the layout; writing a record with a different
/// layout afterwards (possible through [`AnyBed`](crate::record::AnyBed)) is
/// a [`FormatError::MixedRecordKinds`].
pub struct BedWriter<W: Write, T: ?Sized> {
    writer: W,
    layout: Option<Schema>,
    _kind: PhantomData<fn(&T)>,
}

impl<T: Encode + ?Sized> BedWriter<BufWriter<File>, T> {
    /// Create or truncate a BED file at a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::with_capacity(256 * 1024, file)))
    }
}

impl<W: Write, T: Encode + ?Sized> BedWriter<W, T> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            layout: None,
            _kind: PhantomData,
        }
    }

    /// Write one record.
    pub fn write(&mut self, record: &T) -> Result<()> {
        let layout = record.layout();
        match &self.layout {
            Some(expected) if *expected != layout => {
                return Err(FormatError::MixedRecordKinds {
                    expected: expected.name().to_string(),
                    found: layout.name().to_string(),
                }
                .into());
            }
            Some(_) => {}
            None => self.layout = Some(layout),
        }
        let line = format::encode_line(record);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write every record from an iterator.
    pub fn write_all<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Write a comment, one output line per line of `comment`.
    ///
    /// Lines that already start with a comment prefix are written as-is;
    /// others get a `# ` prefix.
    pub fn write_comment(&mut self, comment: &str) -> Result<()> {
        for line in comment.lines() {
            if !format::is_comment(line) {
                self.writer.write_all(b"# ")?;
            }
            self.writer.write_all(line.as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Read all records of kind `T` from a file, gzip-compressed or not.
pub fn read_records<T: Decode, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let reader = BedReader::from_path(path)?;
    reader.records().collect()
}

/// Parse records from a string (useful for testing).
pub fn parse_records<T: Decode>(content: &str) -> Result<Vec<T>> {
    let reader = BedReader::new(content.as_bytes());
    reader.records().collect()
}

/// Write records to a file, creating or truncating it.
pub fn write_records<T: Encode, P: AsRef<Path>>(path: P, records: &[T]) -> Result<()> {
    let mut writer = BedWriter::from_path(path)?;
    writer.write_all(records)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::error::ValidationError;
    use crate::interval::{Interval, Strand};
    use crate::record::{AnyBed, Bed3, Bed4, Bed6, BedGraph};

    #[test]
    fn test_parse_bed3() {
        let content = "chr1\t100\t200\nchr1\t300\t400\n";
        let records: Vec<Bed3> = parse_records(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference_name(), "chr1");
        assert_eq!(records[0].start(), 100);
        assert_eq!(records[0].end(), 200);
    }

    #[test]
    fn test_parse_bed6() {
        let content = "chr1\t100\t200\tgene1\t500\t+\n";
        let records: Vec<Bed6> = parse_records(content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), Some("gene1"));
        assert_eq!(records[0].score(), Some(500));
        assert_eq!(records[0].strand(), Strand::Forward);
    }

    #[test]
    fn test_skip_comments_and_blank_lines() {
        let content = "track name=test\nbrowser position chr1:1-1000\n# c\n\nchr1\t100\t200\n\n";
        let records: Vec<Bed3> = parse_records(content).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_lines_surface_comments() {
        let content = "# header\r\nchr1\t1\t2\n";
        let lines: Vec<BedLine<Bed3>> = BedReader::new(content.as_bytes())
            .lines()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            lines,
            vec![
                BedLine::Comment("# header".to_string()),
                BedLine::Record(Bed3::new("chr1", 1, 2).unwrap()),
            ]
        );
    }

    #[test]
    fn test_error_carries_line_number() {
        let content = "chr1\t1\t2\n# c\nchr1\t5\t1\n";
        let err = parse_records::<Bed3>(content).unwrap_err();
        match err {
            BedError::Parse { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(
                    *source,
                    BedError::Validation(ValidationError::EndBeforeStart { .. })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_failure_carries_line_number() {
        let content: &[u8] = b"chr1\t1\t2\n\xff\xfe\t1\t2\n";
        let err = BedReader::<_, Bed3>::new(content)
            .records()
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        match err {
            BedError::Parse { line, source } => {
                assert_eq!(line, 2);
                assert!(matches!(*source, BedError::Io(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_gzipped_input() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let content = "# peaks\nchr1\t1\t2\nchr2\t5\t9\n";
        for name in ["peaks.bed.gz", "peaks.bed.bgz"] {
            let path = dir.path().join(name);
            // two members, as bgzip writes them
            let mut file = File::create(&path).unwrap();
            for part in content.split_inclusive("chr1\t1\t2\n") {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(part.as_bytes()).unwrap();
                file.write_all(&encoder.finish().unwrap()).unwrap();
            }
            drop(file);

            let records: Vec<Bed3> = read_records(&path).unwrap();
            assert_eq!(
                records,
                vec![
                    Bed3::new("chr1", 1, 2).unwrap(),
                    Bed3::new("chr2", 5, 9).unwrap(),
                ]
            );
        }

        // plain files still read as-is
        let plain = dir.path().join("peaks.bed");
        fs::write(&plain, content).unwrap();
        assert_eq!(read_records::<Bed3, _>(&plain).unwrap().len(), 2);
    }

    #[test]
    fn test_wrong_column_count() {
        let err = parse_records::<Bed4>("chr1\t100\t200\n").unwrap_err();
        assert!(err.to_string().contains("BED4 expects 4 columns but found 3"));
    }

    #[test]
    fn test_whitespace_delimiter() {
        let reader: BedReader<_, Bed3> =
            BedReader::new("chr1 1   2\n".as_bytes()).with_delimiter(Delimiter::Whitespace);
        let records: Vec<Bed3> = reader.records().collect::<Result<_>>().unwrap();
        assert_eq!(records, vec![Bed3::new("chr1", 1, 2).unwrap()]);
    }

    #[test]
    fn test_writer_output() {
        let mut writer = BedWriter::new(Vec::new());
        writer.write_comment("hello\ntrack name=x").unwrap();
        writer
            .write(&BedGraph::new("chr1", 1, 2, 0.2).unwrap())
            .unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(out, "# hello\ntrack name=x\nchr1\t1\t2\t0.2\n");
    }

    #[test]
    fn test_writer_rejects_mixed_kinds() {
        let mut writer = BedWriter::new(Vec::new());
        writer
            .write(&AnyBed::from(Bed3::new("chr1", 1, 2).unwrap()))
            .unwrap();
        writer
            .write(&AnyBed::from(Bed3::new("chr1", 5, 9).unwrap()))
            .unwrap();
        let err = writer
            .write(&AnyBed::from(Bed4::new("chr1", 1, 2, None).unwrap()))
            .unwrap_err();
        assert!(matches!(
            err,
            BedError::Format(FormatError::MixedRecordKinds { .. })
        ));
    }

    #[test]
    fn test_any_bed_reading() {
        let content = "chr1\t5\nchr1\t1\t2\tfoo\n";
        let records: Vec<AnyBed> = parse_records(content).unwrap();
        assert!(matches!(records[0], AnyBed::Bed2(_)));
        assert!(matches!(records[1], AnyBed::Bed4(_)));
    }
}
