//! Edit form save flow state.

use gameshelf_api::FormFields;

/// Fields that must not be blank when the form carries them.
pub(crate) const REQUIRED_FIELDS: [&str; 2] = ["name", "platform"];

/// Where the edit form's save sequence currently is.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Idle,
    /// Waiting for the user to confirm the save.
    Confirming { action: String, fields: FormFields },
    /// Request in flight.
    Saving,
    /// Last save failed; the form stays editable and may be resubmitted.
    Failed {
        action: String,
        fields: FormFields,
        message: String,
    },
}

impl EditState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Fields kept for the user to retry with, if any.
    pub fn retained_fields(&self) -> Option<&FormFields> {
        match self {
            Self::Confirming { fields, .. } | Self::Failed { fields, .. } => Some(fields),
            Self::Idle | Self::Saving => None,
        }
    }
}

/// Trims every value; returns the name of a required field left blank.
pub(crate) fn normalize_fields(fields: FormFields) -> Result<FormFields, &'static str> {
    let fields: FormFields = fields
        .into_iter()
        .map(|(k, v)| (k, v.trim().to_string()))
        .collect();

    for key in REQUIRED_FIELDS {
        if fields.get(key).is_some_and(|v| v.is_empty()) {
            return Err(key);
        }
    }
    Ok(fields)
}
