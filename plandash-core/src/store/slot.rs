//! Durable slots holding the serialized dashboard.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{PlanDashError, PlanDashResult};

/// A single named location for the serialized dashboard document.
pub trait Slot {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> PlanDashResult<Option<String>>;

    fn write(&self, contents: &str) -> PlanDashResult<()>;
}

/// A JSON file at `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: &Path, key: &str) -> Self {
        FileSlot {
            path: dir.join(format!("{key}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    fn read(&self) -> PlanDashResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| PlanDashError::StorageRead(format!("{}: {e}", self.path.display())))
    }

    fn write(&self, contents: &str) -> PlanDashResult<()> {
        let write_err = |e: std::io::Error| {
            PlanDashError::StorageWrite(format!("{}: {e}", self.path.display()))
        };

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(write_err)?;
        }

        // Temp file + rename: the slot is always either old or new content
        let temp = self.path.with_extension("json.tmp");
        std::fs::write(&temp, contents).map_err(write_err)?;
        std::fs::rename(&temp, &self.path).map_err(write_err)?;

        Ok(())
    }
}

/// An in-memory slot. Clones share the same contents, so a clone handed to a
/// second store sees what the first one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        let slot = Self::new();
        *slot.contents.borrow_mut() = Some(contents.to_string());
        slot
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Make subsequent writes fail, as if the device storage were full.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> PlanDashResult<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> PlanDashResult<()> {
        if *self.fail_writes.borrow() {
            return Err(PlanDashError::StorageWrite("memory slot is read-only".into()));
        }
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}
