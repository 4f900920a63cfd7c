//! Form state the upload widget writes into.
//!
//! The widget never touches form state directly. It is handed a [`Binder`]
//! and calls `register` once at mount and `set_value` whenever its selection
//! changes; the host decides where those calls land.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use web_sys::File;

/// Constraints a field is registered with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldRules {
    pub required: bool,
}

impl FieldRules {
    pub fn required() -> Self {
        Self { required: true }
    }
}

/// The two capabilities a widget needs from its form.
pub trait FormBinder<V = File> {
    fn register(&self, name: &str, rules: FieldRules);
    fn set_value(&self, name: &str, value: Option<V>);
}

/// Shared handle to a [`FormBinder`], usable as a component property.
///
/// Two handles are equal when they point at the same binder.
#[derive(Clone)]
pub struct Binder(Rc<dyn FormBinder>);

impl Binder {
    pub fn new(binder: impl FormBinder + 'static) -> Self {
        Self(Rc::new(binder))
    }
}

impl Deref for Binder {
    type Target = dyn FormBinder;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for Binder {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Binder")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => f.write_str("is required"),
        }
    }
}

/// Validation errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<FieldError> {
        self.fields.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, error: FieldError) {
        self.fields.insert(name.into(), error);
    }

    pub fn clear_field(&mut self, name: &str) {
        self.fields.remove(name);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Registered rules, one value slot per field, and current errors.
#[derive(Debug)]
pub struct FormState<V = File> {
    rules: BTreeMap<String, FieldRules>,
    values: BTreeMap<String, V>,
    errors: ValidationErrors,
}

impl<V> Default for FormState<V> {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
            values: BTreeMap::new(),
            errors: ValidationErrors::default(),
        }
    }
}

impl<V> FormState<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `rules` for `name`. Returns `false` when the field was
    /// already registered; its rules are replaced either way.
    pub fn register(&mut self, name: &str, rules: FieldRules) -> bool {
        self.rules.insert(name.to_string(), rules).is_none()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Fills or clears the slot for `name`. A filled slot drops any error
    /// recorded for it.
    pub fn set_value(&mut self, name: &str, value: Option<V>) {
        match value {
            Some(value) => {
                self.values.insert(name.to_string(), value);
                self.errors.clear_field(name);
            }
            None => {
                self.values.remove(name);
            }
        }
    }

    pub fn value(&self, name: &str) -> Option<&V> {
        self.values.get(name)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Recomputes errors for every registered field and reports whether the
    /// form is valid.
    pub fn validate(&mut self) -> bool {
        let mut errors = ValidationErrors::new();
        for (name, rules) in &self.rules {
            if rules.required && !self.values.contains_key(name) {
                errors.insert(name.clone(), FieldError::Required);
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Empties all slots and errors, keeping registrations.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors = ValidationErrors::new();
    }
}

impl<V> FormBinder<V> for RefCell<FormState<V>> {
    fn register(&self, name: &str, rules: FieldRules) {
        self.borrow_mut().register(name, rules);
    }

    fn set_value(&self, name: &str, value: Option<V>) {
        self.borrow_mut().set_value(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::fixture::FakeFile;

    #[test]
    fn required_field_without_value_is_flagged() {
        let mut form: FormState<FakeFile> = FormState::new();
        assert!(form.register("courseImage", FieldRules::required()));

        assert!(!form.validate());
        assert!(form.errors().has("courseImage"));
        assert_eq!(form.errors().get("courseImage"), Some(FieldError::Required));
    }

    #[test]
    fn setting_a_value_clears_the_error() {
        let mut form = FormState::new();
        form.register("courseImage", FieldRules::required());
        form.validate();

        form.set_value("courseImage", Some(FakeFile::new("photo.png", "image/png")));
        assert!(!form.errors().has("courseImage"));
        assert_eq!(form.value("courseImage").map(|f| f.name.as_str()), Some("photo.png"));
        assert!(form.validate());
    }

    #[test]
    fn slot_holds_one_file_and_clears_to_absent() {
        let mut form = FormState::new();
        form.register("introVideo", FieldRules::required());

        form.set_value("introVideo", Some(FakeFile::new("a.mp4", "video/mp4")));
        form.set_value("introVideo", Some(FakeFile::new("b.mp4", "video/mp4")));
        assert_eq!(form.value("introVideo").map(|f| f.name.as_str()), Some("b.mp4"));

        form.set_value("introVideo", None);
        assert!(form.value("introVideo").is_none());
        assert!(!form.validate());
    }

    #[test]
    fn registering_twice_is_idempotent() {
        let mut form: FormState<FakeFile> = FormState::new();
        assert!(form.register("courseImage", FieldRules::required()));
        assert!(!form.register("courseImage", FieldRules::required()));
        form.validate();
        assert_eq!(form.errors().field_names().count(), 1);
    }

    #[test]
    fn optional_fields_pass_validation() {
        let mut form: FormState<FakeFile> = FormState::new();
        form.register("banner", FieldRules::default());
        assert!(form.validate());
    }

    #[test]
    fn reset_keeps_registrations() {
        let mut form = FormState::new();
        form.register("courseImage", FieldRules::required());
        form.set_value("courseImage", Some(FakeFile::new("photo.png", "image/png")));

        form.reset();
        assert!(form.is_registered("courseImage"));
        assert!(form.value("courseImage").is_none());
        assert!(form.errors().is_empty());
    }

    struct NoopBinder;

    impl FormBinder for NoopBinder {
        fn register(&self, _name: &str, _rules: FieldRules) {}
        fn set_value(&self, _name: &str, _value: Option<File>) {}
    }

    #[test]
    fn binder_handles_compare_by_identity() {
        let a = Binder::new(NoopBinder);
        let b = a.clone();
        let c = Binder::new(NoopBinder);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn form_state_acts_as_a_binder() {
        let form: RefCell<FormState<FakeFile>> = RefCell::new(FormState::new());
        let binder: &dyn FormBinder<FakeFile> = &form;

        binder.register("courseImage", FieldRules::required());
        binder.set_value("courseImage", Some(FakeFile::new("photo.png", "image/png")));
        assert_eq!(
            form.borrow().value("courseImage").map(|f| f.name.clone()),
            Some("photo.png".to_string())
        );

        binder.set_value("courseImage", None);
        assert!(!form.borrow_mut().validate());
    }
}
