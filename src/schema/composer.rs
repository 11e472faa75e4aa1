//! Schema composer - editable field list with a derived extraction schema

use crate::schema::{ExtractionSchema, FieldDraft, FieldType};
use crate::ValidationError;

/// Derives the schema shown for a set of drafts
///
/// Non-empty drafts always produce the custom schema; with no drafts the
/// externally supplied seed (if any) is shown as-is.
pub fn derive_schema(
    fields: &[FieldDraft],
    seed: Option<&ExtractionSchema>,
) -> Option<ExtractionSchema> {
    if fields.is_empty() {
        return seed.cloned();
    }

    Some(ExtractionSchema::custom(
        fields.iter().map(FieldDraft::to_field).collect(),
    ))
}

/// Ordered list of field drafts plus the schema derived from them
///
/// Every mutation re-runs [`derive_schema`], so [`SchemaComposer::schema`]
/// always reflects the current drafts.
#[derive(Debug, Clone, Default)]
pub struct SchemaComposer {
    fields: Vec<FieldDraft>,
    seed: Option<ExtractionSchema>,
    derived: Option<ExtractionSchema>,
}

impl SchemaComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a composer seeded with an external schema
    pub fn with_seed(seed: Option<ExtractionSchema>) -> Self {
        let mut composer = Self::new();
        composer.reseed(seed);
        composer
    }

    /// Loads an externally supplied schema (e.g. from a history entry)
    ///
    /// The drafts are replaced only when the new seed has fields; an empty or
    /// absent seed leaves in-progress drafts untouched.
    pub fn reseed(&mut self, seed: Option<ExtractionSchema>) {
        if let Some(schema) = seed.as_ref().filter(|s| !s.is_empty()) {
            self.fields = schema.fields.iter().map(FieldDraft::from).collect();
        }
        self.seed = seed;
        self.recompute();
    }

    /// Appends an empty text field and returns its index
    pub fn add_field(&mut self) -> usize {
        self.push_field(FieldDraft::new("", "", Some(FieldType::Text)))
    }

    /// Appends the given draft and returns its index
    pub fn push_field(&mut self, draft: FieldDraft) -> usize {
        self.fields.push(draft);
        self.recompute();
        self.fields.len() - 1
    }

    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), ValidationError> {
        self.field_mut(index)?.name = name.into();
        self.recompute();
        Ok(())
    }

    pub fn set_selector(
        &mut self,
        index: usize,
        selector: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.field_mut(index)?.selector = selector.into();
        self.recompute();
        Ok(())
    }

    /// Sets the type from raw input; blank input unsets it
    pub fn set_type(&mut self, index: usize, field_type: &str) -> Result<(), ValidationError> {
        let parsed = FieldType::parse_optional(field_type)?;
        self.field_mut(index)?.field_type = parsed;
        self.recompute();
        Ok(())
    }

    /// Removes a field, keeping the relative order of the others
    pub fn remove_field(&mut self, index: usize) -> Result<FieldDraft, ValidationError> {
        self.check_index(index)?;
        let removed = self.fields.remove(index);
        self.recompute();
        Ok(removed)
    }

    pub fn fields(&self) -> &[FieldDraft] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The schema as currently displayed, which may be an empty seed
    pub fn schema(&self) -> Option<&ExtractionSchema> {
        self.derived.as_ref()
    }

    /// The schema as it goes into a request: empty schemas collapse to `None`
    pub fn request_schema(&self) -> Option<ExtractionSchema> {
        self.derived.clone().and_then(ExtractionSchema::collapse)
    }

    fn field_mut(&mut self, index: usize) -> Result<&mut FieldDraft, ValidationError> {
        self.check_index(index)?;
        Ok(&mut self.fields[index])
    }

    fn check_index(&self, index: usize) -> Result<(), ValidationError> {
        if index >= self.fields.len() {
            return Err(ValidationError::FieldIndex {
                index,
                len: self.fields.len(),
            });
        }
        Ok(())
    }

    fn recompute(&mut self) {
        self.derived = derive_schema(&self.fields, self.seed.as_ref());
    }
}
