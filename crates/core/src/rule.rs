//! Rules and stages: the file-pattern to transform-chain mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::mode::{BuildMode, ModeGate};
use crate::options::OptValue;
use crate::pattern::FilePattern;

/// One named transform step with options, optionally gated by build mode.
///
/// The stage name refers to a transform the external engine knows how to run
/// ("ts", "babel", "postcss", ...); the resolver treats it as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
  pub name: String,
  #[serde(default)]
  pub options: BTreeMap<String, OptValue>,
  #[serde(default)]
  pub gate: ModeGate,
}

impl Stage {
  pub fn new(name: impl Into<String>) -> Self {
    Stage {
      name: name.into(),
      options: BTreeMap::new(),
      gate: ModeGate::Any,
    }
  }

  pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptValue>) -> Self {
    self.options.insert(key.into(), value.into());
    self
  }

  pub fn only(mut self, mode: BuildMode) -> Self {
    self.gate = ModeGate::Only(mode);
    self
  }
}

/// Maps a file pattern to an ordered chain of stages.
///
/// Declaration order across the rule set is priority order: the first rule
/// whose pattern matches a file (and whose exclude does not) owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
  pub name: String,
  pub pattern: FilePattern,
  #[serde(default)]
  pub exclude: Option<FilePattern>,
  pub stages: Vec<Stage>,
}

impl Rule {
  pub fn new(name: impl Into<String>, pattern: FilePattern, stages: Vec<Stage>) -> Self {
    Rule {
      name: name.into(),
      pattern,
      exclude: None,
      stages,
    }
  }

  pub fn exclude(mut self, pattern: FilePattern) -> Self {
    self.exclude = Some(pattern);
    self
  }

  /// Structural validation of the rule's patterns.
  pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
    self.validate_pattern(&self.pattern)?;
    if let Some(exclude) = &self.exclude {
      self.validate_pattern(exclude)?;
    }
    Ok(())
  }

  fn validate_pattern(&self, pattern: &FilePattern) -> Result<(), ConfigurationError> {
    match pattern {
      FilePattern::Extensions(exts) => {
        if exts.is_empty() {
          return Err(ConfigurationError::EmptyPattern {
            rule: self.name.clone(),
          });
        }
        for ext in exts {
          if !ext.starts_with('.') {
            return Err(ConfigurationError::MalformedPattern {
              rule: self.name.clone(),
              entry: ext.clone(),
            });
          }
        }
        Ok(())
      }
      FilePattern::Suffix(suffix) if suffix.is_empty() => Err(ConfigurationError::EmptyPattern {
        rule: self.name.clone(),
      }),
      FilePattern::Segment(segment) if segment.is_empty() => Err(ConfigurationError::EmptyPattern {
        rule: self.name.clone(),
      }),
      _ => Ok(()),
    }
  }
}
