//! Change detection for editable ticket fields.
//!
//! Each tracked field declares how it is compared and rendered into history
//! entries. Values are compared by their rendered form, so two values that
//! render identically count as unchanged.

use serde::Serialize;

use crate::photo::PhotoOption;

/// How a tracked field is compared and written into history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStrategy {
    /// Plain text.
    Scalar,
    /// Structural (JSON) equality of a list.
    ArrayStructural,
    /// Comma-joined photo labels; an empty list renders as `(none)`.
    PhotoLabelList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedField {
    Style,
    Priority,
    Partner,
    Instructions,
    ReferencePhotos,
    PartnerPhotos,
}

/// Tracked fields in detection order. History entries for one update are
/// appended in this order.
pub const TRACKED_FIELDS: &[(TrackedField, FieldStrategy)] = &[
    (TrackedField::Style, FieldStrategy::Scalar),
    (TrackedField::Priority, FieldStrategy::Scalar),
    (TrackedField::Partner, FieldStrategy::Scalar),
    (TrackedField::Instructions, FieldStrategy::ArrayStructural),
    (TrackedField::ReferencePhotos, FieldStrategy::PhotoLabelList),
    (TrackedField::PartnerPhotos, FieldStrategy::PhotoLabelList),
];

pub const EMPTY_PHOTO_LIST: &str = "(none)";

impl TrackedField {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackedField::Style => "style",
            TrackedField::Priority => "priority",
            TrackedField::Partner => "partner",
            TrackedField::Instructions => "instructions",
            TrackedField::ReferencePhotos => "referencePhotos",
            TrackedField::PartnerPhotos => "partnerPhotos",
        }
    }

    pub fn strategy(self) -> FieldStrategy {
        TRACKED_FIELDS
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, strategy)| *strategy)
            .unwrap_or(FieldStrategy::ArrayStructural)
    }
}

/// A borrowed view of a field value, old or new.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Photos(&'a [PhotoOption]),
}

impl FieldValue<'_> {
    /// Render this value the way `strategy` prescribes.
    pub fn render(&self, strategy: FieldStrategy) -> String {
        match (strategy, self) {
            (FieldStrategy::Scalar, FieldValue::Text(text)) => (*text).to_string(),
            (FieldStrategy::PhotoLabelList, FieldValue::Photos(photos)) => {
                render_photo_labels(photos)
            }
            (_, value) => serde_json::to_string(value).unwrap_or_default(),
        }
    }
}

pub fn render_photo_labels(photos: &[PhotoOption]) -> String {
    if photos.is_empty() {
        return EMPTY_PHOTO_LIST.to_string();
    }
    photos
        .iter()
        .map(PhotoOption::display_label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One detected difference between a stored field and an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: TrackedField,
    pub old_value: String,
    pub new_value: String,
}

/// Compare `old` and `new` under the field's strategy. `None` when they
/// render identically.
pub fn detect_change(
    field: TrackedField,
    old: FieldValue<'_>,
    new: FieldValue<'_>,
) -> Option<FieldChange> {
    let strategy = field.strategy();
    let old_value = old.render(strategy);
    let new_value = new.render(strategy);
    (old_value != new_value).then_some(FieldChange {
        field,
        old_value,
        new_value,
    })
}
