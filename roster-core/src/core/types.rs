use super::error::RosterError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Letter grade derived from marks
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Threshold lookup: >=90 A+, >=80 A, >=70 B, >=60 C, >=50 D, else F
    pub fn from_marks(marks: f64) -> Self {
        if marks >= 90.0 {
            Self::APlus
        } else if marks >= 80.0 {
            Self::A
        } else if marks >= 70.0 {
            Self::B
        } else if marks >= 60.0 {
            Self::C
        } else if marks >= 50.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so table columns honour width specifiers
        f.pad(self.as_str())
    }
}

/// Names a student field in errors and commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    RollNo,
    Department,
    Marks,
    Contact,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::RollNo => "roll number",
            Self::Department => "department",
            Self::Marks => "marks",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "roll" | "rollno" | "roll_no" => Ok(Self::RollNo),
            "dept" | "department" => Ok(Self::Department),
            "marks" => Ok(Self::Marks),
            "contact" => Ok(Self::Contact),
            _ => Err(RosterError::UnknownField(s.to_string())),
        }
    }
}

/// A single-field change applied by [`RecordStore::update`](super::RecordStore::update).
///
/// The roll number is the record key and has no variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Name(String),
    Department(String),
    Marks(f64),
    Contact(String),
}

impl FieldUpdate {
    pub fn field(&self) -> Field {
        match self {
            Self::Name(_) => Field::Name,
            Self::Department(_) => Field::Department,
            Self::Marks(_) => Field::Marks,
            Self::Contact(_) => Field::Contact,
        }
    }
}

/// Student record
///
/// `grade` is never stored independently: every constructor and every marks
/// change goes through [`Grade::from_marks`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    name: String,
    roll_no: String,
    department: String,
    marks: f64,
    grade: Grade,
    contact: String,
}

impl Student {
    /// Build a record without validating it.
    ///
    /// This is the path used when decoding persisted lines; interactive input
    /// goes through [`RecordStore::add`](super::RecordStore::add).
    pub fn new(
        name: impl Into<String>,
        roll_no: impl Into<String>,
        department: impl Into<String>,
        marks: f64,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            roll_no: roll_no.into(),
            department: department.into(),
            marks,
            grade: Grade::from_marks(marks),
            contact: contact.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roll_no(&self) -> &str {
        &self.roll_no
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn marks(&self) -> f64 {
        self.marks
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_department(&mut self, department: String) {
        self.department = department;
    }

    pub(crate) fn set_marks(&mut self, marks: f64) {
        self.marks = marks;
        self.grade = Grade::from_marks(marks);
    }

    pub(crate) fn set_contact(&mut self, contact: String) {
        self.contact = contact;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        let cases = [
            (100.0, Grade::APlus),
            (90.0, Grade::APlus),
            (89.9, Grade::A),
            (80.0, Grade::A),
            (79.9, Grade::B),
            (70.0, Grade::B),
            (69.9, Grade::C),
            (60.0, Grade::C),
            (59.9, Grade::D),
            (50.0, Grade::D),
            (49.9, Grade::F),
            (0.0, Grade::F),
        ];

        for (marks, expected) in cases {
            assert_eq!(Grade::from_marks(marks), expected, "marks={}", marks);
        }
    }

    #[test]
    fn test_grade_display() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::F.to_string(), "F");
        assert_eq!(format!("{:<4}|", Grade::B), "B   |");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("Name".parse::<Field>().unwrap(), Field::Name);
        assert_eq!("DEPT".parse::<Field>().unwrap(), Field::Department);
        assert_eq!("roll_no".parse::<Field>().unwrap(), Field::RollNo);
        assert!(matches!(
            "age".parse::<Field>(),
            Err(RosterError::UnknownField(f)) if f == "age"
        ));
    }

    #[test]
    fn test_set_marks_recomputes_grade() {
        let mut student = Student::new("Alice", "R1", "CS", 65.0, "1234567890");
        assert_eq!(student.grade(), Grade::C);

        student.set_marks(75.0);
        assert_eq!(student.marks(), 75.0);
        assert_eq!(student.grade(), Grade::B);
    }

    #[test]
    fn test_student_serializes_grade_symbol() {
        let student = Student::new("Alice", "R1", "CS", 95.0, "1234567890");
        let json = serde_json::to_value(&student).unwrap();

        assert_eq!(json["grade"], "A+");
        assert_eq!(json["roll_no"], "R1");
        assert_eq!(json["marks"], 95.0);
    }
}
