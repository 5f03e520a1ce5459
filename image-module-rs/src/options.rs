//! Plugin configuration.

use crate::error::ImageModuleError;
use regex::Regex;
use serde::Deserialize;

/// A single include/exclude pattern.
#[derive(Debug, Clone)]
pub enum FilterPattern {
    /// Glob matched against the normalized identifier
    Glob(String),
    /// Regular expression tested against the normalized identifier
    Regex(Regex),
}

impl From<&str> for FilterPattern {
    fn from(glob: &str) -> Self {
        FilterPattern::Glob(glob.to_string())
    }
}

impl From<String> for FilterPattern {
    fn from(glob: String) -> Self {
        FilterPattern::Glob(glob)
    }
}

impl From<Regex> for FilterPattern {
    fn from(re: Regex) -> Self {
        FilterPattern::Regex(re)
    }
}

/// Options accepted by the image plugin.
///
/// Immutable once the loader has been constructed.
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    /// Export an `Image` object instead of a data URI string
    pub dom: bool,
    pub include: Vec<FilterPattern>,
    pub exclude: Vec<FilterPattern>,
}

/// `null`, one pattern, or a list of patterns
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PatternArg {
    One(String),
    Many(Vec<String>),
}

/// Unknown fields are ignored, as bundler configs often share one object between plugins
#[derive(Debug, Default, Deserialize)]
struct RawOptions {
    dom: Option<bool>,
    include: Option<PatternArg>,
    exclude: Option<PatternArg>,
}

fn into_patterns(arg: Option<PatternArg>) -> Vec<FilterPattern> {
    match arg {
        None => Vec::new(),
        Some(PatternArg::One(glob)) => vec![FilterPattern::Glob(glob)],
        Some(PatternArg::Many(globs)) => globs.into_iter().map(FilterPattern::Glob).collect(),
    }
}

impl ImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dom(mut self, dom: bool) -> Self {
        self.dom = dom;
        self
    }

    pub fn include(mut self, pattern: impl Into<FilterPattern>) -> Self {
        self.include.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<FilterPattern>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Builds options from a JSON object such as `{"dom": true, "exclude": "**/icons/*"}`.
    ///
    /// Fields that are missing or `null` keep their defaults.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ImageModuleError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let raw: RawOptions = serde_json::from_value(value)?;
        Ok(Self {
            dom: raw.dom.unwrap_or(false),
            include: into_patterns(raw.include),
            exclude: into_patterns(raw.exclude),
        })
    }

    pub fn from_json_str(s: &str) -> Result<Self, ImageModuleError> {
        Self::from_json(serde_json::from_str(s)?)
    }

    /// Applies the non-default fields of `overrides` on top of `self`.
    ///
    /// `dom` is enabled if either side enables it and patterns are appended.
    pub fn merge(mut self, overrides: ImageOptions) -> Self {
        self.dom |= overrides.dom;
        self.include.extend(overrides.include);
        self.exclude.extend(overrides.exclude);
        self
    }
}
