use crate::common::{SessionSnapshot, ThemePreference};

/// Local UI state: the latest engine snapshot plus the widget buffers the
/// engine doesn't care about until they're submitted.
pub struct AppState {
    pub snapshot: SessionSnapshot,
    pub input_text: String,
    pub search_text: String,
    pub sidebar_open: bool,
    /// Theme whose visuals are currently installed in the egui context.
    pub applied_theme: Option<ThemePreference>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            snapshot: SessionSnapshot::default(),
            input_text: String::new(),
            search_text: String::new(),
            sidebar_open: true,
            applied_theme: None,
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: SessionSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn theme(&self) -> ThemePreference {
        self.snapshot.theme
    }

    /// True when the egui visuals are stale for the current theme.
    pub fn needs_visuals(&self) -> bool {
        self.applied_theme != Some(self.theme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visuals_refresh_only_when_theme_changes() {
        let mut state = AppState::new();
        assert!(state.needs_visuals());

        state.applied_theme = Some(ThemePreference::Light);
        assert!(!state.needs_visuals());

        state.apply_snapshot(SessionSnapshot {
            theme: ThemePreference::Dark,
            ..SessionSnapshot::default()
        });
        assert!(state.needs_visuals());
    }
}
