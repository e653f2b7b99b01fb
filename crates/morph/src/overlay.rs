//! Overlay presenter interface plus text helpers shared by presenter implementations.

use crate::timeline::TimelineEntry;

/// Content of one overlay call. `show: false` returns the overlay to its neutral, hidden state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayUpdate {
    pub year: String,
    pub event: String,
    pub species: String,
    pub contamination_rate: f64,
    pub description: String,
    pub references: Option<String>,
    pub show: bool,
    /// 1-based position among mesh states.
    pub step: Option<usize>,
    pub total_steps: Option<usize>,
}

impl OverlayUpdate {
    /// The neutral "hide everything" call.
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Reveal `entry`'s statistics with a step indicator.
    pub fn for_entry(entry: &TimelineEntry, step: usize, total_steps: usize) -> Self {
        Self {
            year: entry.year.clone(),
            event: entry.event.clone(),
            species: entry.species.clone(),
            contamination_rate: entry.contamination_rate,
            description: entry.description.clone(),
            references: entry.references.clone(),
            show: true,
            step: Some(step),
            total_steps: Some(total_steps),
        }
    }
}

/// Receives state-change notifications from the controller.
///
/// Calls are idempotent and the most recent one wins.
pub trait OverlayPresenter {
    /// Show or hide the statistics block.
    fn update(&mut self, update: &OverlayUpdate);
    /// The welcome overlay shown before the first gesture and after returning to the start.
    fn set_intro_visible(&mut self, visible: bool);
    /// The end-of-timeline overlay shown on the final cloud.
    fn set_outro_visible(&mut self, visible: bool);
}

/// One recorded presenter call.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayEvent {
    Update(OverlayUpdate),
    Intro(bool),
    Outro(bool),
}

/// Presenter that keeps every call, for headless runs and tests.
#[derive(Debug, Default)]
pub struct RecordingOverlay {
    events: Vec<OverlayEvent>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[OverlayEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Most recent statistics update.
    pub fn last_update(&self) -> Option<&OverlayUpdate> {
        self.events.iter().rev().find_map(|e| match e {
            OverlayEvent::Update(u) => Some(u),
            _ => None,
        })
    }

    /// Every update that revealed content, oldest first.
    pub fn shown(&self) -> Vec<&OverlayUpdate> {
        self.events
            .iter()
            .filter_map(|e| match e {
                OverlayEvent::Update(u) if u.show => Some(u),
                _ => None,
            })
            .collect()
    }

    pub fn intro_visible(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            OverlayEvent::Intro(v) => Some(*v),
            _ => None,
        })
    }

    pub fn outro_visible(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|e| match e {
            OverlayEvent::Outro(v) => Some(*v),
            _ => None,
        })
    }
}

impl OverlayPresenter for RecordingOverlay {
    fn update(&mut self, update: &OverlayUpdate) {
        self.events.push(OverlayEvent::Update(update.clone()));
    }

    fn set_intro_visible(&mut self, visible: bool) {
        self.events.push(OverlayEvent::Intro(visible));
    }

    fn set_outro_visible(&mut self, visible: bool) {
        self.events.push(OverlayEvent::Outro(visible));
    }
}

/// Contamination rate as a whole percentage, zero-padded to two digits (`0.07` → `"07%"`).
pub fn format_percent(rate: f64) -> String {
    let pct = (rate.clamp(0.0, 1.0) * 100.0).round() as u32;
    format!("{:02}%", pct)
}

/// Split a leading `of <word>` phrase (case-insensitive) from the rest of a description.
///
/// The phrase ends at the first comma or whitespace after the word. Descriptions
/// without the phrase come back as `("", description)`.
pub fn split_lead_phrase(description: &str) -> (&str, &str) {
    let starts_with_of = description
        .get(..3)
        .is_some_and(|p| p.eq_ignore_ascii_case("of "));
    if !starts_with_of {
        return ("", description);
    }
    let rest = &description[3..];
    let word_end = rest
        .find(|c: char| c == ',' || c.is_whitespace())
        .unwrap_or(rest.len());
    let word_end = if word_end > 0 {
        word_end
    } else {
        rest.find(char::is_whitespace).unwrap_or(rest.len())
    };
    if word_end == 0 {
        return ("", description);
    }
    description.split_at(3 + word_end)
}

/// Step indicator, one bar per mesh state with the active one filled.
pub fn step_bars(step: usize, total_steps: usize) -> String {
    (1..=total_steps)
        .map(|i| if i == step { '■' } else { '□' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::entry;

    #[test]
    fn percent_is_zero_padded() {
        assert_eq!(format_percent(0.07), "07%");
        assert_eq!(format_percent(0.0), "00%");
        assert_eq!(format_percent(0.456), "46%");
        assert_eq!(format_percent(1.0), "100%");
    }

    #[test]
    fn lead_phrase_is_split_off() {
        assert_eq!(
            split_lead_phrase("of seabirds, have ingested plastic"),
            ("of seabirds", ", have ingested plastic")
        );
        assert_eq!(split_lead_phrase("Of turtles studied"), ("Of turtles", " studied"));
        assert_eq!(split_lead_phrase("of ,odd"), ("of ,odd", ""));
        assert_eq!(split_lead_phrase("offshore samples"), ("", "offshore samples"));
        assert_eq!(split_lead_phrase("of "), ("", "of "));
        assert_eq!(split_lead_phrase(""), ("", ""));
    }

    #[test]
    fn step_bars_mark_active_step() {
        assert_eq!(step_bars(2, 4), "□■□□");
        assert_eq!(step_bars(1, 0), "");
    }

    #[test]
    fn entry_update_carries_step_and_content() {
        let e = entry("a", 0.42);
        let update = OverlayUpdate::for_entry(&e, 2, 5);
        assert!(update.show);
        assert_eq!(update.year, "1950");
        assert_eq!(update.contamination_rate, 0.42);
        assert_eq!((update.step, update.total_steps), (Some(2), Some(5)));
        assert!(!OverlayUpdate::hidden().show);
    }

    #[test]
    fn recording_overlay_tracks_latest_state() {
        let mut overlay = RecordingOverlay::new();
        overlay.set_intro_visible(true);
        overlay.update(&OverlayUpdate::hidden());
        overlay.set_intro_visible(false);
        assert_eq!(overlay.intro_visible(), Some(false));
        assert_eq!(overlay.outro_visible(), None);
        assert_eq!(overlay.last_update(), Some(&OverlayUpdate::hidden()));
        assert!(overlay.shown().is_empty());
    }
}
