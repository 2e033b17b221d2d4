use crate::core::error::{Result, RosterError};
use crate::core::{FieldUpdate, RecordStore, Student};
use crate::persistence::{FlatFile, StorageConfig};
use tracing::{error, info};

/// Record store paired with its backing file.
///
/// Every successful mutation rewrites the whole file. When the in-memory
/// change succeeds but the write fails, the change is kept and the
/// persistence error is returned; [`Roster::save`] retries the write.
pub struct Roster {
    store: RecordStore,
    file: FlatFile,
}

impl Roster {
    /// Load the backing file into a fresh store
    pub fn open(config: StorageConfig) -> Result<Self> {
        let file = FlatFile::new(config);
        let store = RecordStore::from_records(file.load()?)?;

        info!(
            "Roster opened with {} records from {:?}",
            store.len(),
            file.path()
        );

        Ok(Self { store, file })
    }

    pub fn add(
        &mut self,
        name: &str,
        roll_no: &str,
        department: &str,
        marks: f64,
        contact: &str,
    ) -> Result<&Student> {
        self.store.add(name, roll_no, department, marks, contact)?;
        self.save()?;
        self.fetch(roll_no)
    }

    pub fn update(&mut self, roll_no: &str, change: FieldUpdate) -> Result<&Student> {
        self.store.update(roll_no, change)?;
        self.save()?;
        self.fetch(roll_no)
    }

    pub fn delete(&mut self, roll_no: &str) -> Result<Student> {
        let removed = self.store.delete(roll_no)?;
        self.save()?;
        Ok(removed)
    }

    /// Rewrite the backing file from memory
    pub fn save(&self) -> Result<()> {
        self.file.save(self.store.list_all()).map_err(|e| {
            error!("Failed to save roster to {:?}: {}", self.file.path(), e);
            RosterError::from(e)
        })
    }

    pub fn find(&self, roll_no: &str) -> Option<usize> {
        self.store.find(roll_no)
    }

    pub fn get(&self, roll_no: &str) -> Option<&Student> {
        self.store.get(roll_no)
    }

    pub fn list_all(&self) -> &[Student] {
        self.store.list_all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Backing file location
    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    fn fetch(&self, roll_no: &str) -> Result<&Student> {
        self.store
            .get(roll_no)
            .ok_or_else(|| RosterError::NotFound(roll_no.to_string()))
    }
}
