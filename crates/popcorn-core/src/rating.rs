/// Star selector: hovering previews a value, clicking commits it.
///
/// A committed value of 0 means "not rated yet".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingInput {
    max_rating: u8,
    icon_size: u16,
    hover: Option<u8>,
    committed: u8,
}

impl RatingInput {
    pub fn new(max_rating: u8, icon_size: u16) -> Self {
        Self {
            max_rating: max_rating.max(1),
            icon_size,
            hover: None,
            committed: 0,
        }
    }

    pub fn max_rating(&self) -> u8 {
        self.max_rating
    }

    pub fn icon_size(&self) -> u16 {
        self.icon_size
    }

    fn in_range(&self, index: u8) -> bool {
        (1..=self.max_rating).contains(&index)
    }

    /// Preview `index` without committing. Out-of-range indices are ignored.
    pub fn hover(&mut self, index: u8) -> bool {
        if !self.in_range(index) {
            return false;
        }
        self.hover = Some(index);
        true
    }

    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Commit `index` and emit it.
    pub fn click(&mut self, index: u8) -> Option<u8> {
        if !self.in_range(index) {
            return None;
        }
        self.committed = index;
        Some(index)
    }

    pub fn committed(&self) -> u8 {
        self.committed
    }

    /// What the stars currently show: the hover preview, else the committed value.
    pub fn displayed(&self) -> u8 {
        self.hover.unwrap_or(self.committed)
    }

    pub fn reset(&mut self) {
        self.hover = None;
        self.committed = 0;
    }

    /// `★★★☆☆ 3`, with the number omitted while nothing is shown.
    pub fn render(&self) -> String {
        let shown = self.displayed();
        let mut out = String::new();
        for i in 1..=self.max_rating {
            out.push(if i <= shown { '★' } else { '☆' });
        }
        if shown > 0 {
            out.push(' ');
            out.push_str(&shown.to_string());
        }
        out
    }
}

impl Default for RatingInput {
    fn default() -> Self {
        Self::new(10, 24)
    }
}
