use crate::history::HistoryEntry;
use crate::request::{compose, CrawlRequest, RequestDefaults, RequestOverrides};
use crate::schema::SchemaComposer;
use crate::ValidationError;

/// Live editing state: what the user has typed but not yet submitted
#[derive(Debug, Clone, Default)]
pub struct Editor {
    pub url: String,
    pub instruction: String,
    pub overrides: RequestOverrides,
    pub schema: SchemaComposer,
    defaults: RequestDefaults,
}

impl Editor {
    pub fn new(defaults: RequestDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn defaults(&self) -> &RequestDefaults {
        &self.defaults
    }

    /// Returns true if the current input would pass validation
    pub fn can_submit(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Composes the request for the current input
    ///
    /// The schema composer's output takes precedence over any schema in the
    /// overrides.
    pub fn compose(&self) -> Result<CrawlRequest, ValidationError> {
        let mut overrides = self.overrides.clone();
        if let Some(schema) = self.schema.request_schema() {
            overrides.extraction_schema = Some(schema);
        }
        compose(&self.defaults, &overrides, &self.url, Some(self.instruction.as_str()))
    }

    /// Restores the input that produced a history entry
    pub fn load_entry(&mut self, entry: &HistoryEntry) {
        let options = &entry.request_options;
        self.url = entry.url.clone();
        self.instruction = options.instruction.clone().unwrap_or_default();
        self.overrides = RequestOverrides::from_request(options);
        self.overrides.extraction_schema = None;
        self.schema.reseed(options.extraction_schema.clone());
    }
}
