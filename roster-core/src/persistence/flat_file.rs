use super::types::{PersistenceError, Result, StorageConfig};
use crate::core::{Student, validation};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

const DELIMITER: char = ',';

/// Full-rewrite flat file adapter.
///
/// One record per line: `name,roll_no,department,marks,contact`. Grade is
/// not written; it is recomputed from marks on load.
pub struct FlatFile {
    config: StorageConfig,
}

impl FlatFile {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Read every record from the backing file.
    ///
    /// A missing file is an empty roster. A file that exists but cannot be
    /// read is an error.
    pub fn load(&self) -> Result<Vec<Student>> {
        let path = &self.config.path;
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No data file at {:?}, starting empty", path);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if line.trim().is_empty() {
                continue;
            }

            let student = decode_line(line_no, line)?;

            if let Err(source) = validation::validate_marks(student.marks())
                .and_then(|_| validation::validate_contact(student.contact()))
            {
                if self.config.validate_on_load {
                    return Err(PersistenceError::InvalidRecord {
                        line: line_no,
                        source,
                    });
                }
                warn!("Accepting invalid record at line {}: {}", line_no, source);
            }

            records.push(student);
        }

        info!("Loaded {} records from {:?}", records.len(), path);
        Ok(records)
    }

    /// Overwrite the backing file with the given records
    pub fn save(&self, records: &[Student]) -> Result<()> {
        let path = &self.config.path;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for student in records {
            writeln!(writer, "{}", encode_line(student))?;
        }

        writer.flush()?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;

        debug!("Saved {} records to {:?}", records.len(), path);
        Ok(())
    }
}

/// Encode a record as a single line without terminator
pub fn encode_line(student: &Student) -> String {
    format!(
        "{name}{d}{roll}{d}{dept}{d}{marks}{d}{contact}",
        name = student.name(),
        roll = student.roll_no(),
        dept = student.department(),
        marks = student.marks(),
        contact = student.contact(),
        d = DELIMITER,
    )
}

/// Decode a single line.
///
/// The first three fields are comma-terminated, marks is a float token, and
/// everything after the comma following marks is the contact, verbatim.
pub fn decode_line(line_no: usize, line: &str) -> Result<Student> {
    let malformed = |reason: String| PersistenceError::MalformedLine {
        line: line_no,
        reason,
    };

    let mut parts = line.splitn(4, DELIMITER);
    let name = parts.next().unwrap_or_default();
    let roll_no = parts
        .next()
        .ok_or_else(|| malformed("missing roll number".to_string()))?;
    let department = parts
        .next()
        .ok_or_else(|| malformed("missing department".to_string()))?;
    let rest = parts
        .next()
        .ok_or_else(|| malformed("missing marks".to_string()))?;

    let (marks_token, contact) = rest
        .split_once(DELIMITER)
        .ok_or_else(|| malformed("missing contact".to_string()))?;

    let marks = marks_token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .ok_or_else(|| malformed(format!("invalid marks '{}'", marks_token)))?;

    Ok(Student::new(name, roll_no, department, marks, contact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Grade;

    #[test]
    fn test_encode_plain_number() {
        let student = Student::new("Alice", "R1", "CS", 95.0, "1234567890");
        assert_eq!(encode_line(&student), "Alice,R1,CS,95,1234567890");

        let student = Student::new("Bob", "R2", "EE", 89.5, "2345678901");
        assert_eq!(encode_line(&student), "Bob,R2,EE,89.5,2345678901");
    }

    #[test]
    fn test_decode_recomputes_grade() {
        let student = decode_line(1, "Alice,R1,CS,89.9,1234567890").unwrap();

        assert_eq!(student.name(), "Alice");
        assert_eq!(student.roll_no(), "R1");
        assert_eq!(student.department(), "CS");
        assert_eq!(student.marks(), 89.9);
        assert_eq!(student.grade(), Grade::A);
        assert_eq!(student.contact(), "1234567890");
    }

    #[test]
    fn test_decode_contact_is_remainder() {
        let student = decode_line(1, "Alice,R1,CS,70,12345,67890").unwrap();
        assert_eq!(student.contact(), "12345,67890");
    }

    #[test]
    fn test_decode_keeps_spaces_in_text() {
        let student = decode_line(1, "Alice Smith,R 1,Computer Science,70,1234567890").unwrap();
        assert_eq!(student.name(), "Alice Smith");
        assert_eq!(student.roll_no(), "R 1");
        assert_eq!(student.department(), "Computer Science");
    }

    #[test]
    fn test_decode_malformed() {
        for (line, reason) in [
            ("Alice", "missing roll number"),
            ("Alice,R1", "missing department"),
            ("Alice,R1,CS", "missing marks"),
            ("Alice,R1,CS,95", "missing contact"),
            ("Alice,R1,CS,abc,1234567890", "invalid marks"),
            ("Alice,R1,CS,NaN,1234567890", "invalid marks"),
        ] {
            match decode_line(7, line) {
                Err(PersistenceError::MalformedLine { line: 7, reason: r }) => {
                    assert!(r.contains(reason), "line={:?} reason={}", line, r)
                }
                other => panic!("Expected MalformedLine for {:?}, got {:?}", line, other),
            }
        }
    }
}
