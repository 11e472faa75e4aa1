use crate::request::{CrawlRequest, RequestDefaults, RequestOverrides};
use crate::ValidationError;

/// Composes a crawl request from the default and override layers
///
/// Overrides win over defaults field by field. `url` and `instruction` always
/// come from the live editing state. The url is trimmed; a blank instruction
/// is treated as absent, and an extraction schema without fields is dropped.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyUrl`] when the trimmed url is empty; callers
/// must not submit anything in that case.
pub fn compose(
    defaults: &RequestDefaults,
    overrides: &RequestOverrides,
    url: &str,
    instruction: Option<&str>,
) -> Result<CrawlRequest, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let instruction = instruction
        .filter(|i| !i.trim().is_empty())
        .map(str::to_string);

    Ok(CrawlRequest {
        url: url.to_string(),
        instruction,
        screenshot: overrides.screenshot.unwrap_or(defaults.screenshot),
        bypass_cache: overrides.bypass_cache.unwrap_or(defaults.bypass_cache),
        smart_mode: overrides.smart_mode.unwrap_or(defaults.smart_mode),
        word_count_threshold: overrides
            .word_count_threshold
            .unwrap_or(defaults.word_count_threshold),
        css_selector: overrides
            .css_selector
            .clone()
            .or_else(|| defaults.css_selector.clone()),
        extraction_schema: overrides
            .extraction_schema
            .clone()
            .and_then(|schema| schema.collapse()),
    })
}
