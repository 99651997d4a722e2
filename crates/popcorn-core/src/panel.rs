/// Collapse/expand toggle for a list panel. Starts open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    open: bool,
}

impl Panel {
    pub fn new() -> Self {
        Self { open: true }
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Button label: `-` collapses, `+` expands
    pub fn marker(&self) -> &'static str {
        if self.open {
            "-"
        } else {
            "+"
        }
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}
