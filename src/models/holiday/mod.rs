// Holiday table entry model

use serde::{Deserialize, Serialize};

/// One entry of the holiday table: a background image plus an optional
/// overlay caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// Bare image filename with no directory prefix. Empty when the
    /// configuration entry carried no usable image.
    pub image: String,
    /// Overlay caption shown over the background. `None` when the
    /// configuration had no text (or an empty string).
    pub text: Option<String>,
}

impl HolidayEntry {
    pub fn has_image(&self) -> bool {
        !self.image.is_empty()
    }
}
