//! Form modal controller.
//!
//! `FormModel` is the state machine behind every create/edit modal:
//! `Closed` or `Open` in create or edit mode. Opening in edit mode seeds
//! the draft from the selected record, opening in create mode starts
//! blank, and closing silently discards unsaved edits. Validation runs
//! on submit attempts only and recomputes the field error map from
//! scratch each time; a failed validation emits no command at all.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Catalogue, Collection, Id, NamePayload, Product, ProductPayload};

/// Field name to message map shown inline next to the inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// An editable copy of one record's fields plus its validation rules.
pub trait Draft: Default + Clone {
    type Record;
    type Payload: Serialize;

    fn from_record(record: &Self::Record) -> Self;

    /// Synchronous whole-form validation: either a submittable payload
    /// or the complete error map for this attempt.
    fn validate(&self) -> Result<Self::Payload, FieldErrors>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitCmd<P> {
    Create(P),
    Update(Id, P),
}

#[derive(Debug, Clone)]
pub struct OpenForm<D> {
    /// `Some` while editing an existing record, `None` while creating.
    pub editing: Option<Id>,
    pub draft: D,
    pub errors: FieldErrors,
    pub saving: bool,
}

#[derive(Debug, Clone)]
pub enum FormModel<D> {
    Closed,
    Open(OpenForm<D>),
}

impl<D> Default for FormModel<D> {
    fn default() -> Self {
        FormModel::Closed
    }
}

impl<D: Draft> FormModel<D> {
    pub fn open_create(&mut self) {
        *self = FormModel::Open(OpenForm {
            editing: None,
            draft: D::default(),
            errors: FieldErrors::default(),
            saving: false,
        });
    }

    pub fn open_edit(&mut self, id: Id, record: &D::Record) {
        *self = FormModel::Open(OpenForm {
            editing: Some(id),
            draft: D::from_record(record),
            errors: FieldErrors::default(),
            saving: false,
        });
    }

    /// Discards any unsaved edits.
    pub fn close(&mut self) {
        *self = FormModel::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormModel::Open(_))
    }

    pub fn open_ref(&self) -> Option<&OpenForm<D>> {
        match self {
            FormModel::Open(form) => Some(form),
            FormModel::Closed => None,
        }
    }

    pub fn open_mut(&mut self) -> Option<&mut OpenForm<D>> {
        match self {
            FormModel::Open(form) => Some(form),
            FormModel::Closed => None,
        }
    }

    /// Validates the draft and, when it passes, returns the request to
    /// dispatch. On failure the error map is stored and nothing is
    /// returned, so no network call can happen.
    pub fn submit(&mut self) -> Option<SubmitCmd<D::Payload>> {
        let form = self.open_mut()?;
        if form.saving {
            return None;
        }
        match form.draft.validate() {
            Ok(payload) => {
                form.errors = FieldErrors::default();
                form.saving = true;
                Some(match form.editing {
                    Some(id) => SubmitCmd::Update(id, payload),
                    None => SubmitCmd::Create(payload),
                })
            }
            Err(errors) => {
                form.errors = errors;
                None
            }
        }
    }

    /// The modal stays open with the entered data intact so the user
    /// can retry.
    pub fn submit_failed(&mut self) {
        if let Some(form) = self.open_mut() {
            form.saving = false;
        }
    }
}

/// Result of a bulk image upload: best effort, partial success allowed.
/// Failed files are counted (and logged by the caller) rather than
/// surfaced as field errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadOutcome {
    pub succeeded: Vec<String>,
    pub failed: usize,
}

impl UploadOutcome {
    pub fn collect(results: impl IntoIterator<Item = Result<String, String>>) -> Self {
        let mut outcome = UploadOutcome::default();
        for result in results {
            match result {
                Ok(url) => outcome.succeeded.push(url),
                Err(_) => outcome.failed += 1,
            }
        }
        outcome
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    /// Kept as entered; parsed on submit.
    pub price: String,
    pub category: String,
    pub images: Vec<String>,
}

impl ProductDraft {
    /// Uploads are additive: new URLs append to whatever is already
    /// there, they never replace it.
    pub fn merge_uploads(&mut self, outcome: UploadOutcome) {
        self.images.extend(outcome.succeeded);
    }

    /// Local removal only; the server copy changes on the next submit.
    pub fn remove_image(&mut self, url: &str) {
        self.images.retain(|image| image != url);
    }
}

impl Draft for ProductDraft {
    type Record = Product;
    type Payload = ProductPayload;

    fn from_record(record: &Product) -> Self {
        ProductDraft {
            name: record.name.clone(),
            description: record.description.clone(),
            price: record.price.to_string(),
            category: record.category.clone(),
            images: record.images.clone(),
        }
    }

    fn validate(&self) -> Result<ProductPayload, FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.insert("productName", "Product name is required.");
        }
        if self.description.trim().is_empty() {
            errors.insert("productDescription", "Description is required.");
        }
        let price = self.price.trim().parse::<f64>().ok().filter(|p| *p > 0.0);
        if price.is_none() {
            errors.insert("productPrice", "Price must be a positive number.");
        }
        if self.category.trim().is_empty() {
            errors.insert("productCategory", "Category is required.");
        }
        if self.images.is_empty() {
            errors.insert("productImages", "At least one image is required.");
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: price.unwrap_or_default(),
            category: self.category.clone(),
            images: self.images.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectionDraft {
    pub name: String,
}

impl Draft for CollectionDraft {
    type Record = Collection;
    type Payload = NamePayload;

    fn from_record(record: &Collection) -> Self {
        CollectionDraft {
            name: record.name.clone(),
        }
    }

    fn validate(&self) -> Result<NamePayload, FieldErrors> {
        validate_name(&self.name, "Collection name is required.")
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogueDraft {
    pub name: String,
}

impl Draft for CatalogueDraft {
    type Record = Catalogue;
    type Payload = NamePayload;

    fn from_record(record: &Catalogue) -> Self {
        CatalogueDraft {
            name: record.name.clone(),
        }
    }

    fn validate(&self) -> Result<NamePayload, FieldErrors> {
        validate_name(&self.name, "Catalogue name is required.")
    }
}

fn validate_name(name: &str, message: &'static str) -> Result<NamePayload, FieldErrors> {
    if name.trim().is_empty() {
        let mut errors = FieldErrors::default();
        errors.insert("name", message);
        return Err(errors);
    }
    Ok(NamePayload {
        name: name.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "Leather ball".into(),
            description: "Hand stitched".into(),
            price: "19.99".into(),
            category: "Cricket".into(),
            images: vec!["https://img/1.png".into()],
        }
    }

    #[test]
    fn valid_product_draft_builds_payload() {
        let payload = valid_draft().validate().unwrap();
        assert_eq!(payload.name, "Leather ball");
        assert!((payload.price - 19.99).abs() < f64::EPSILON);
        assert_eq!(payload.images.len(), 1);
    }

    #[test]
    fn each_missing_field_reports_exactly_that_field() {
        let mut draft = valid_draft();
        draft.name = "  ".into();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("productName"), Some("Product name is required."));

        let mut draft = valid_draft();
        draft.description = String::new();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("productDescription"),
            Some("Description is required.")
        );

        let mut draft = valid_draft();
        draft.category = String::new();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("productCategory"), Some("Category is required."));
    }

    #[test]
    fn price_must_be_a_positive_number() {
        for bad in ["", "abc", "-5", "0"] {
            let mut draft = valid_draft();
            draft.price = bad.into();
            let errors = draft.validate().unwrap_err();
            assert_eq!(
                errors.get("productPrice"),
                Some("Price must be a positive number."),
                "price {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn empty_image_list_blocks_submit_with_the_exact_message() {
        let mut draft = valid_draft();
        draft.images.clear();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("productImages"),
            Some("At least one image is required.")
        );

        // And through the form machine: no command means no request.
        let mut form = FormModel::<ProductDraft>::default();
        form.open_create();
        form.open_mut().unwrap().draft = draft;
        assert!(form.submit().is_none());
        assert_eq!(form.open_ref().unwrap().errors.len(), 1);
        assert!(!form.open_ref().unwrap().saving);
    }

    #[test]
    fn partial_upload_failure_keeps_only_succeeded_urls() {
        let outcome = UploadOutcome::collect(vec![
            Ok("url1".to_string()),
            Err("network".to_string()),
        ]);
        assert_eq!(outcome.succeeded, vec!["url1".to_string()]);
        assert_eq!(outcome.failed, 1);

        let mut draft = valid_draft();
        draft.merge_uploads(outcome);
        assert_eq!(
            draft.images,
            vec!["https://img/1.png".to_string(), "url1".to_string()]
        );
    }

    #[test]
    fn removing_an_image_is_a_local_filter() {
        let mut draft = valid_draft();
        draft.images.push("url2".into());
        draft.remove_image("https://img/1.png");
        assert_eq!(draft.images, vec!["url2".to_string()]);
    }

    #[test]
    fn open_edit_seeds_every_field_and_open_create_clears() {
        let record = Product {
            id: 4,
            name: "Bat".into(),
            description: "Willow".into(),
            price: 120.0,
            category: "Cricket".into(),
            images: vec!["u".into()],
        };

        let mut form = FormModel::<ProductDraft>::default();
        form.open_edit(record.id, &record);
        {
            let open = form.open_ref().unwrap();
            assert_eq!(open.editing, Some(4));
            assert_eq!(open.draft.name, "Bat");
            assert_eq!(open.draft.price, "120");
            assert_eq!(open.draft.images, vec!["u".to_string()]);
        }

        form.open_create();
        let open = form.open_ref().unwrap();
        assert_eq!(open.editing, None);
        assert!(open.draft.name.is_empty());
        assert!(open.draft.images.is_empty());
    }

    #[test]
    fn submit_routes_to_create_or_update() {
        let mut form = FormModel::<ProductDraft>::default();
        form.open_create();
        form.open_mut().unwrap().draft = valid_draft();
        match form.submit() {
            Some(SubmitCmd::Create(payload)) => assert_eq!(payload.name, "Leather ball"),
            other => panic!("expected create, got {:?}", other.is_some()),
        }
        assert!(form.open_ref().unwrap().saving);

        let record = Product {
            id: 9,
            ..Product::default()
        };
        form.open_edit(record.id, &record);
        form.open_mut().unwrap().draft = valid_draft();
        match form.submit() {
            Some(SubmitCmd::Update(id, _)) => assert_eq!(id, 9),
            other => panic!("expected update, got {:?}", other.is_some()),
        }
    }

    #[test]
    fn failed_submit_keeps_the_modal_open_with_data_intact() {
        let mut form = FormModel::<ProductDraft>::default();
        form.open_create();
        form.open_mut().unwrap().draft = valid_draft();
        assert!(form.submit().is_some());

        form.submit_failed();
        let open = form.open_ref().unwrap();
        assert!(!open.saving);
        assert_eq!(open.draft.name, "Leather ball");
    }

    #[test]
    fn close_discards_silently() {
        let mut form = FormModel::<ProductDraft>::default();
        form.open_create();
        form.open_mut().unwrap().draft.name = "half typed".into();
        form.close();
        assert!(!form.is_open());

        form.open_create();
        assert!(form.open_ref().unwrap().draft.name.is_empty());
    }

    #[test]
    fn name_only_drafts_require_a_trimmed_name() {
        let draft = CollectionDraft { name: " ".into() };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Collection name is required."));

        let draft = CatalogueDraft {
            name: "Summer".into(),
        };
        assert_eq!(draft.validate().unwrap().name, "Summer");
    }
}
