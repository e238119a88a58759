/// A named area that can be shown or hidden, e.g. a loading indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    visible: bool,
}

impl Region {
    pub fn hidden(name: &'static str) -> Self {
        Self { name, visible: false }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// A dialog with an active/inactive state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub name: &'static str,
    active: bool,
}

impl Modal {
    pub fn closed(name: &'static str) -> Self {
        Self { name, active: false }
    }

    pub fn open(&mut self) {
        self.active = true;
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Fill state of a 0–100 progress bar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressBar {
    percent: f64,
}

impl ProgressBar {
    pub fn set(&mut self, percent: f64) {
        self.percent = percent.clamp(0.0, 100.0);
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Width of the filled part, e.g. `"33.333333333333336%"`.
    pub fn fill_width(&self) -> String {
        format!("{}%", self.percent)
    }

    /// Label shown next to the bar, rounded to a whole percent.
    pub fn text(&self) -> String {
        format!("{}%", self.percent.round())
    }

    /// Text bar of `width` cells.
    pub fn render(&self, width: usize) -> String {
        let filled = ((self.percent / 100.0) * width as f64).round() as usize;
        format!(
            "[{}{}] {}",
            "█".repeat(filled),
            "░".repeat(width.saturating_sub(filled)),
            self.text()
        )
    }
}
