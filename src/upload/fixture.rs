use super::FileSource;
use crate::form::{FieldRules, FormBinder};
use std::cell::RefCell;

/// Stand-in for a browser `File` in native tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeFile {
    pub name: String,
    pub mime: String,
    pub size: f64,
}

impl FakeFile {
    pub fn new(name: &str, mime: &str) -> Self {
        Self {
            name: name.to_string(),
            mime: mime.to_string(),
            size: 1024.0,
        }
    }
}

impl FileSource for FakeFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn mime_type(&self) -> String {
        self.mime.clone()
    }

    fn size(&self) -> f64 {
        self.size
    }
}

/// Binder that records every call it receives, in order.
#[derive(Default)]
pub struct RecordingBinder {
    calls: RefCell<Vec<String>>,
}

impl RecordingBinder {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl FormBinder<FakeFile> for RecordingBinder {
    fn register(&self, name: &str, rules: FieldRules) {
        self.calls.borrow_mut().push(format!("register {} {}", name, rules.required));
    }

    fn set_value(&self, name: &str, value: Option<FakeFile>) {
        let shown = value.map(|f| f.name).unwrap_or_else(|| "none".to_string());
        self.calls.borrow_mut().push(format!("set {} {}", name, shown));
    }
}
