//! # Form Builder
//!
//! The editing model behind the create and edit screens. A [`Builder`] holds a
//! private copy of a [`Form`]; nothing it does is visible to the store until
//! [`Builder::save`] hands the finished form to a caller-supplied callback.
//!
//! The builder never decides between adding and updating. The route that
//! opened it does: the create route saves with `add_form`, the edit route
//! with `update_form`.

use crate::error::{FormzError, Result};
use crate::model::{FieldType, Form, FormField};
use crate::router::Route;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderMode {
    Create,
    Edit,
}

/// Result of opening the builder.
#[derive(Debug)]
pub enum BuilderEntry {
    Editing(Builder),
    /// The requested form does not exist; navigate instead of editing.
    Redirect(Route),
}

#[derive(Debug, Clone)]
pub struct Builder {
    mode: BuilderMode,
    form: Form,
}

impl Builder {
    /// A fresh, unsaved form.
    pub fn create() -> Self {
        Self {
            mode: BuilderMode::Create,
            form: Form::new(),
        }
    }

    /// Opens `id` for editing, or redirects to the list when it is unknown.
    pub fn edit(forms: &[Form], id: &str) -> BuilderEntry {
        match forms.iter().find(|f| f.id == id) {
            Some(form) => BuilderEntry::Editing(Self {
                mode: BuilderMode::Edit,
                form: form.clone(),
            }),
            None => {
                debug!(id, "no form to edit");
                BuilderEntry::Redirect(Route::List)
            }
        }
    }

    /// Create mode without an id, edit mode with one.
    pub fn open(forms: &[Form], id: Option<&str>) -> BuilderEntry {
        match id {
            Some(id) => Self::edit(forms, id),
            None => BuilderEntry::Editing(Self::create()),
        }
    }

    pub fn mode(&self) -> BuilderMode {
        self.mode
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn fields(&self) -> &[FormField] {
        &self.form.fields
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.form.description = description.into();
    }

    /// Appends a blank field and returns its position.
    pub fn add_field(&mut self, field_type: FieldType) -> usize {
        self.form.fields.push(FormField::new(field_type));
        self.form.fields.len() - 1
    }

    /// Replaces the field at `index`. Options are kept only on choice fields;
    /// a field that becomes a choice field without any gets one empty option.
    pub fn update_field(&mut self, index: usize, mut field: FormField) -> Result<()> {
        if !field.field_type.is_choice() {
            field.options = None;
        } else if field.options.is_none() {
            field.options = Some(vec![String::new()]);
        }
        let slot = self.field_mut(index)?;
        *slot = field;
        Ok(())
    }

    /// Removes the field at `index`; later fields shift left.
    pub fn remove_field(&mut self, index: usize) -> Result<FormField> {
        self.field_mut(index)?;
        Ok(self.form.fields.remove(index))
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        let mut field = self.field(index)?.clone();
        field.label = label.into();
        self.update_field(index, field)
    }

    pub fn set_required(&mut self, index: usize, required: bool) -> Result<()> {
        let mut field = self.field(index)?.clone();
        field.required = required;
        self.update_field(index, field)
    }

    /// Appends an empty option to a choice field and returns its position.
    pub fn add_option(&mut self, index: usize) -> Result<usize> {
        let mut field = self.choice_field(index)?.clone();
        let options = field.options.get_or_insert_with(Vec::new);
        options.push(String::new());
        let pos = options.len() - 1;
        self.update_field(index, field)?;
        Ok(pos)
    }

    pub fn set_option(
        &mut self,
        index: usize,
        option: usize,
        text: impl Into<String>,
    ) -> Result<()> {
        let mut field = self.choice_field(index)?.clone();
        let slot = field
            .options
            .as_mut()
            .and_then(|options| options.get_mut(option))
            .ok_or_else(|| {
                FormzError::Api(format!(
                    "Field {} has no option at position {}",
                    index + 1,
                    option + 1
                ))
            })?;
        *slot = text.into();
        self.update_field(index, field)
    }

    /// Title and every field label must be filled in before saving.
    pub fn check_required(&self) -> Result<()> {
        if self.form.title.is_empty() {
            return Err(FormzError::Validation("Form title cannot be empty".into()));
        }
        if let Some(pos) = self
            .form
            .fields
            .iter()
            .position(|f| f.label.is_empty())
        {
            return Err(FormzError::Validation(format!(
                "Field {} needs a question label",
                pos + 1
            )));
        }
        Ok(())
    }

    /// Hands the edited form to `on_save`.
    pub fn save<T, F>(self, on_save: F) -> Result<T>
    where
        F: FnOnce(Form) -> Result<T>,
    {
        self.check_required()?;
        on_save(self.form)
    }

    fn field(&self, index: usize) -> Result<&FormField> {
        self.form.fields.get(index).ok_or_else(|| no_field(index))
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut FormField> {
        self.form.fields.get_mut(index).ok_or_else(|| no_field(index))
    }

    fn choice_field(&self, index: usize) -> Result<&FormField> {
        let field = self.field(index)?;
        if !field.field_type.is_choice() {
            return Err(FormzError::Api(format!(
                "Field {} is a {} field and has no options",
                index + 1,
                field.field_type
            )));
        }
        Ok(field)
    }
}

fn no_field(index: usize) -> FormzError {
    FormzError::Api(format!("No field at position {}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{field, form, StoreFixture};

    fn editing(entry: BuilderEntry) -> Builder {
        match entry {
            BuilderEntry::Editing(b) => b,
            BuilderEntry::Redirect(route) => panic!("unexpected redirect to {}", route),
        }
    }

    #[test]
    fn create_mode_starts_blank() {
        let builder = editing(Builder::open(&[], None));
        assert_eq!(builder.mode(), BuilderMode::Create);
        assert!(builder.form().title.is_empty());
        assert!(builder.fields().is_empty());
        assert!(!builder.form().id.is_empty());
    }

    #[test]
    fn edit_mode_loads_a_copy() {
        let forms = vec![form("f1", "Survey")];
        let mut builder = editing(Builder::open(&forms, Some("f1")));
        assert_eq!(builder.mode(), BuilderMode::Edit);
        builder.set_title("Changed");
        assert_eq!(forms[0].title, "Survey");
    }

    #[test]
    fn edit_of_unknown_form_redirects_to_list() {
        match Builder::open(&[form("f1", "Survey")], Some("nope")) {
            BuilderEntry::Redirect(route) => assert_eq!(route, Route::List),
            BuilderEntry::Editing(_) => panic!("expected redirect"),
        }
    }

    #[test]
    fn add_field_appends() {
        let mut builder = Builder::create();
        builder.add_field(FieldType::Text);
        let before: Vec<_> = builder.fields().to_vec();

        let pos = builder.add_field(FieldType::SingleChoice);
        assert_eq!(pos, 1);
        assert_eq!(&builder.fields()[..1], before.as_slice());
        assert_eq!(builder.fields()[1].field_type, FieldType::SingleChoice);
        assert_eq!(builder.fields()[1].options, Some(vec![String::new()]));
    }

    #[test]
    fn remove_field_preserves_order() {
        let mut builder = Builder::create();
        for t in [FieldType::Text, FieldType::SingleChoice, FieldType::MultiChoice] {
            builder.add_field(t);
        }
        let ids: Vec<_> = builder.fields().iter().map(|f| f.id.clone()).collect();

        builder.remove_field(1).unwrap();
        let remaining: Vec<_> = builder.fields().iter().map(|f| f.id.clone()).collect();
        assert_eq!(remaining, vec![ids[0].clone(), ids[2].clone()]);
    }

    #[test]
    fn remove_first_of_two_fields() {
        let mut survey = form("f1", "Survey");
        survey.fields = vec![
            field("a", FieldType::Text, "First", &[]),
            field("b", FieldType::Text, "Second", &[]),
        ];
        let second = survey.fields[1].clone();
        let mut builder = editing(Builder::edit(&[survey], "f1"));

        builder.remove_field(0).unwrap();
        assert_eq!(builder.fields(), &[second]);
    }

    #[test]
    fn out_of_range_positions_are_errors() {
        let mut builder = Builder::create();
        assert!(builder.remove_field(0).is_err());
        assert!(builder.set_label(3, "x").is_err());
        builder.add_field(FieldType::Text);
        assert!(builder.add_option(0).is_err());
    }

    #[test]
    fn options_can_be_added_and_edited() {
        let mut builder = Builder::create();
        builder.add_field(FieldType::MultiChoice);
        builder.set_option(0, 0, "A").unwrap();
        let pos = builder.add_option(0).unwrap();
        builder.set_option(0, pos, "B").unwrap();

        assert_eq!(builder.fields()[0].options(), &["A".to_string(), "B".to_string()]);
        assert!(builder.set_option(0, 5, "C").is_err());
    }

    #[test]
    fn save_requires_title_and_labels() {
        let mut builder = Builder::create();
        builder.add_field(FieldType::Text);
        let err = builder.clone().save(|_| Ok(())).unwrap_err();
        assert!(matches!(err, FormzError::Validation(_)));

        builder.set_title("Survey");
        let err = builder.clone().save(|_| Ok(())).unwrap_err();
        assert!(err.to_string().contains("Field 1"));

        builder.set_label(0, "Name").unwrap();
        let saved = builder.save(Ok).unwrap();
        assert_eq!(saved.title, "Survey");
        assert_eq!(saved.fields[0].label, "Name");
    }

    #[test]
    fn choice_field_with_empty_options_is_saveable() {
        let mut builder = Builder::create();
        builder.set_title("Poll");
        builder.add_field(FieldType::SingleChoice);
        builder.set_label(0, "Pick").unwrap();
        assert!(builder.save(Ok).is_ok());
    }

    #[test]
    fn edits_are_invisible_until_saved() {
        let mut fixture = StoreFixture::new().with_form(form("f1", "Survey"));
        let mut builder = editing(Builder::edit(fixture.store.forms(), "f1"));
        builder.set_title("Survey v2");
        assert_eq!(fixture.store.forms()[0].title, "Survey");

        builder
            .save(|f| fixture.store.update_form(f))
            .unwrap();
        assert_eq!(fixture.store.forms()[0].title, "Survey v2");
    }

    #[test]
    fn changing_field_type_reshapes_options() {
        let mut builder = Builder::create();
        let i = builder.add_field(FieldType::SingleChoice);
        builder.set_option(i, 0, "Red").unwrap();

        let mut field = builder.fields()[i].clone();
        field.field_type = FieldType::Text;
        builder.update_field(i, field).unwrap();
        assert_eq!(builder.fields()[i].options, None);

        let mut field = builder.fields()[i].clone();
        field.field_type = FieldType::MultiChoice;
        builder.update_field(i, field).unwrap();
        assert_eq!(builder.fields()[i].options, Some(vec![String::new()]));
    }

    #[test]
    fn whitespace_title_and_label_are_present() {
        let mut builder = Builder::create();
        builder.set_title(" ");
        let i = builder.add_field(FieldType::Text);
        builder.set_label(i, " ").unwrap();
        assert!(builder.check_required().is_ok());

        builder.set_label(i, "").unwrap();
        assert!(matches!(
            builder.check_required(),
            Err(FormzError::Validation(_))
        ));
    }

    #[test]
    fn create_route_saves_with_add() {
        let mut fixture = StoreFixture::new();
        let mut builder = Builder::create();
        builder.set_title("New");
        let id = builder.form().id.clone();

        builder.save(|f| fixture.store.add_form(f)).unwrap();
        assert_eq!(fixture.store.forms()[0].id, id);
    }
}
