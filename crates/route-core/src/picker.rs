//! Single-select chooser for nearest-feature labels.
//!
//! At most one picker is open at a time. Confirming hands the chosen label
//! back together with the description field it targets; cancelling drops the
//! options and leaves the field alone.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickerError {
    #[error("a label picker is already open for desc_{0}")]
    AlreadyOpen(usize),

    #[error("No options available.")]
    NoOptions,

    #[error("no label picker is open")]
    NotOpen,

    #[error("'{0}' is not one of the offered labels")]
    UnknownOption(String),
}

/// The picker currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPicker {
    /// Segment index of the `desc_<i>` field being filled
    pub target: usize,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LabelPicker {
    open: Option<OpenPicker>,
}

impl LabelPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&OpenPicker> {
        self.open.as_ref()
    }

    /// Fails with [`PickerError::AlreadyOpen`] before any lookup result is
    /// considered, so callers can check it ahead of a network call.
    pub fn ensure_closed(&self) -> Result<(), PickerError> {
        match &self.open {
            Some(open) => Err(PickerError::AlreadyOpen(open.target)),
            None => Ok(()),
        }
    }

    /// Show `options` for the description of segment `target`.
    ///
    /// A failed lookup (`None`) and an empty result both report
    /// [`PickerError::NoOptions`] and leave the picker closed.
    pub fn open(&mut self, target: usize, options: Option<Vec<String>>) -> Result<&OpenPicker, PickerError> {
        self.ensure_closed()?;

        let options = match options {
            Some(options) if !options.is_empty() => options,
            _ => return Err(PickerError::NoOptions),
        };

        tracing::debug!("Opening label picker for desc_{} with {} options", target, options.len());
        Ok(self.open.insert(OpenPicker { target, options }))
    }

    /// Close the picker and return `(target, label)` for the chosen option.
    ///
    /// An unknown label keeps the picker open.
    pub fn confirm(&mut self, label: &str) -> Result<(usize, String), PickerError> {
        let open = self.open.as_ref().ok_or(PickerError::NotOpen)?;
        if !open.options.iter().any(|o| o == label) {
            return Err(PickerError::UnknownOption(label.to_string()));
        }

        let target = open.target;
        self.open = None;
        Ok((target, label.to_string()))
    }

    /// Close without choosing. Returns the picker that was open, if any.
    pub fn cancel(&mut self) -> Option<OpenPicker> {
        self.open.take()
    }
}
