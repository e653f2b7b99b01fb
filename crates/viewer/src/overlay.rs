//! Overlay presenter for the desktop viewer: statistics go to the log and the window title.

use morph::{format_percent, split_lead_phrase, step_bars, OverlayPresenter, OverlayUpdate};

pub struct TitleOverlay {
    base: String,
    title: String,
    /// Set when `title` changed since the last [`TitleOverlay::take_title`].
    changed: bool,
}

impl TitleOverlay {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            title: base.clone(),
            base,
            changed: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The new title, once per change.
    pub fn take_title(&mut self) -> Option<&str> {
        if !self.changed {
            return None;
        }
        self.changed = false;
        Some(&self.title)
    }

    fn set_title(&mut self, title: String) {
        if title != self.title {
            self.title = title;
            self.changed = true;
        }
    }
}

impl OverlayPresenter for TitleOverlay {
    fn update(&mut self, update: &OverlayUpdate) {
        if !update.show {
            self.set_title(self.base.clone());
            return;
        }

        let percent = format_percent(update.contamination_rate);
        let (lead, rest) = split_lead_phrase(&update.description);
        let steps = match (update.step, update.total_steps) {
            (Some(step), Some(total)) => step_bars(step, total),
            _ => String::new(),
        };
        log::info!("{} | {} | {}", update.year, update.event, update.species);
        log::info!("{} {}{}", percent, lead.to_uppercase(), rest);
        if let Some(references) = &update.references {
            log::info!("Source: {}", references);
        }

        self.set_title(format!(
            "{} | {} {} | {} {} {}",
            self.base, update.year, update.event, update.species, percent, steps
        ));
    }

    fn set_intro_visible(&mut self, visible: bool) {
        if visible {
            log::info!("Scroll down or press the down arrow to begin");
            self.set_title(format!("{} | scroll to begin", self.base));
        }
    }

    fn set_outro_visible(&mut self, visible: bool) {
        if visible {
            log::info!("End of the timeline");
            self.set_title(format!("{} | end of timeline", self.base));
        }
    }
}
