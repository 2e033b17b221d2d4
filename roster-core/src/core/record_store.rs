use super::error::{Result, RosterError};
use super::types::{Field, FieldUpdate, Student};
use super::validation;
use tracing::debug;

/// Ordered collection of student records keyed by roll number.
///
/// Lookup is a linear scan; insertion order is kept for display.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordStore {
    records: Vec<Student>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted records.
    ///
    /// Records are taken as given apart from roll number uniqueness.
    pub fn from_records(records: Vec<Student>) -> Result<Self> {
        let mut store = Self::new();
        for record in records {
            if store.find(record.roll_no()).is_some() {
                return Err(RosterError::DuplicateKey(record.roll_no().to_string()));
            }
            store.records.push(record);
        }
        debug!("Store built with {} records", store.records.len());
        Ok(store)
    }

    /// Add a new validated record at the end of the store
    pub fn add(
        &mut self,
        name: &str,
        roll_no: &str,
        department: &str,
        marks: f64,
        contact: &str,
    ) -> Result<&Student> {
        debug!("ADD roll_no={}, marks={}", roll_no, marks);

        validation::validate_text(Field::RollNo, roll_no)?;
        if self.find(roll_no).is_some() {
            return Err(RosterError::DuplicateKey(roll_no.to_string()));
        }
        validation::validate_text(Field::Name, name)?;
        validation::validate_text(Field::Department, department)?;
        validation::validate_marks(marks)?;
        validation::validate_contact(contact)?;

        self.records
            .push(Student::new(name, roll_no, department, marks, contact));
        Ok(&self.records[self.records.len() - 1])
    }

    /// Position of the first record with this roll number (exact, case-sensitive)
    pub fn find(&self, roll_no: &str) -> Option<usize> {
        self.records.iter().position(|s| s.roll_no() == roll_no)
    }

    pub fn get(&self, roll_no: &str) -> Option<&Student> {
        self.find(roll_no).map(|index| &self.records[index])
    }

    /// Apply a single-field change.
    ///
    /// The new value is validated before anything is written, so a rejected
    /// update leaves the record untouched. Marks and grade change together.
    pub fn update(&mut self, roll_no: &str, change: FieldUpdate) -> Result<&Student> {
        debug!("UPDATE roll_no={}, field={}", roll_no, change.field());

        let index = self
            .find(roll_no)
            .ok_or_else(|| RosterError::NotFound(roll_no.to_string()))?;

        match &change {
            FieldUpdate::Name(name) => validation::validate_text(Field::Name, name)?,
            FieldUpdate::Department(department) => {
                validation::validate_text(Field::Department, department)?
            }
            FieldUpdate::Marks(marks) => validation::validate_marks(*marks)?,
            FieldUpdate::Contact(contact) => validation::validate_contact(contact)?,
        }

        let student = &mut self.records[index];
        match change {
            FieldUpdate::Name(name) => student.set_name(name),
            FieldUpdate::Department(department) => student.set_department(department),
            FieldUpdate::Marks(marks) => student.set_marks(marks),
            FieldUpdate::Contact(contact) => student.set_contact(contact),
        }

        Ok(student)
    }

    /// Remove a record, keeping the relative order of the rest
    pub fn delete(&mut self, roll_no: &str) -> Result<Student> {
        debug!("DELETE roll_no={}", roll_no);

        let index = self
            .find(roll_no)
            .ok_or_else(|| RosterError::NotFound(roll_no.to_string()))?;
        Ok(self.records.remove(index))
    }

    /// All records in store order
    pub fn list_all(&self) -> &[Student] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
