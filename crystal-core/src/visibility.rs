//! One-way reveal tracking for page sections
//!
//! Sections start hidden and become visible the first time enough of them
//! intersects the viewport. Once visible they stay visible.

/// Result of feeding an intersection update to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// The section just became visible; the host should mark it
    Revealed,
    /// Still hidden, or already visible
    Unchanged,
    /// The section is not being watched
    Unknown,
}

#[derive(Debug, Clone)]
struct Section {
    id: String,
    visible: bool,
}

/// Tracks which watched sections have been revealed
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    threshold: f32,
    sections: Vec<Section>,
}

impl VisibilityTracker {
    /// `threshold` is the fraction of a section's area that must be in view
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            sections: Vec::new(),
        }
    }

    /// Start watching a section; watching the same id twice is a no-op
    pub fn watch(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.position(&id).is_none() {
            self.sections.push(Section { id, visible: false });
        }
    }

    /// Record that `ratio` of the section's area is currently in view
    pub fn update(&mut self, id: &str, ratio: f32) -> Reveal {
        let threshold = self.threshold;
        let Some(index) = self.position(id) else {
            return Reveal::Unknown;
        };

        let section = &mut self.sections[index];
        if section.visible || ratio < threshold {
            return Reveal::Unchanged;
        }

        section.visible = true;
        tracing::debug!(section = %section.id, ratio, "section revealed");
        Reveal::Revealed
    }

    pub fn is_visible(&self, id: &str) -> Option<bool> {
        self.position(id).map(|index| self.sections[index].visible)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.sections.iter().filter(|section| section.visible).count()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.id == id)
    }
}
