/*
 * Menu Module
 *
 * Keeps track of which backdrop effect is selected. Activating an entry
 * highlights it, hides the others and arms a fallback deadline; the menu is
 * restored when the effect reports that it ended, or when the deadline passes
 * without that report.
 */

use tracing::warn;

use crate::simulation::LifecycleEvent;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuEntry<K> {
    pub key: K,
    pub label: String,
    pub fallback_ms: f64,
    pub visible: bool,
    pub highlighted: bool,
}

#[derive(Clone, Debug)]
pub struct Menu<K> {
    entries: Vec<MenuEntry<K>>,
    active: Option<K>,
    deadline: Option<f64>,
}

impl<K> Default for Menu<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            active: None,
            deadline: None,
        }
    }
}

impl<K: Copy + PartialEq + std::fmt::Debug> Menu<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, key: K, label: impl Into<String>, fallback_ms: f64) {
        self.entries.push(MenuEntry {
            key,
            label: label.into(),
            fallback_ms,
            visible: true,
            highlighted: false,
        });
    }

    pub fn entries(&self) -> &[MenuEntry<K>] {
        &self.entries
    }

    pub fn active(&self) -> Option<K> {
        self.active
    }

    pub fn deadline(&self) -> Option<f64> {
        self.deadline
    }

    // Select `key` at host time `now_ms`, replacing any earlier selection and
    // its deadline. Unknown keys are ignored.
    pub fn activate(&mut self, key: K, now_ms: f64) -> bool {
        let Some(fallback_ms) = self.entry(key).map(|e| e.fallback_ms) else {
            return false;
        };

        self.active = Some(key);
        self.deadline = Some(now_ms + fallback_ms);
        for entry in &mut self.entries {
            let selected = entry.key == key;
            entry.visible = selected;
            entry.highlighted = selected;
        }
        true
    }

    // React to an effect's lifecycle report
    pub fn handle(&mut self, key: K, event: LifecycleEvent, now_ms: f64) {
        match event {
            LifecycleEvent::Started => {
                if self.active != Some(key) {
                    self.activate(key, now_ms);
                }
            }
            LifecycleEvent::Ended => self.restore(key),
        }
    }

    // Un-highlight `key`; if it was the active entry, clear the selection.
    // Every entry becomes visible again.
    pub fn restore(&mut self, key: K) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.highlighted = false;
        }

        if self.active == Some(key) {
            self.active = None;
            self.deadline = None;
        }

        for entry in &mut self.entries {
            entry.visible = true;
        }
    }

    // Restore the active entry if its deadline has passed, returning it so the
    // caller can wind the effect down
    pub fn poll(&mut self, now_ms: f64) -> Option<K> {
        let key = self.active?;
        let deadline = self.deadline?;
        if now_ms < deadline {
            return None;
        }

        warn!(entry = ?key, "no end reported before the fallback deadline; restoring menu");
        self.restore(key);
        Some(key)
    }

    fn entry(&self, key: K) -> Option<&MenuEntry<K>> {
        self.entries.iter().find(|e| e.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Effect {
        Boids,
        Lorenz,
    }

    fn menu() -> Menu<Effect> {
        let mut menu = Menu::new();
        menu.add_entry(Effect::Boids, "boids", 10_000.0);
        menu.add_entry(Effect::Lorenz, "lorenz", 5_000.0);
        menu
    }

    #[test]
    fn activation_hides_other_entries() {
        let mut menu = menu();
        assert!(menu.activate(Effect::Boids, 0.0));

        let boids = &menu.entries()[0];
        let lorenz = &menu.entries()[1];
        assert!(boids.visible && boids.highlighted);
        assert!(!lorenz.visible && !lorenz.highlighted);
        assert_eq!(menu.deadline(), Some(10_000.0));
    }

    #[test]
    fn ended_event_restores_everything() {
        let mut menu = menu();
        menu.activate(Effect::Boids, 0.0);
        menu.handle(Effect::Boids, LifecycleEvent::Ended, 4_000.0);

        assert_eq!(menu.active(), None);
        assert_eq!(menu.deadline(), None);
        assert!(menu.entries().iter().all(|e| e.visible && !e.highlighted));
    }

    #[test]
    fn started_event_activates_unselected_entry() {
        let mut menu = menu();
        menu.handle(Effect::Lorenz, LifecycleEvent::Started, 100.0);
        assert_eq!(menu.active(), Some(Effect::Lorenz));
        assert_eq!(menu.deadline(), Some(5_100.0));

        // A repeated start does not push the deadline out
        menu.handle(Effect::Lorenz, LifecycleEvent::Started, 900.0);
        assert_eq!(menu.deadline(), Some(5_100.0));
    }

    #[test]
    fn reselecting_replaces_previous_deadline() {
        let mut menu = menu();
        menu.activate(Effect::Boids, 0.0);
        menu.activate(Effect::Lorenz, 1_000.0);
        assert_eq!(menu.active(), Some(Effect::Lorenz));
        assert_eq!(menu.deadline(), Some(6_000.0));
        assert!(!menu.entries()[0].highlighted);
    }

    #[test]
    fn poll_restores_after_fallback() {
        let mut menu = menu();
        menu.activate(Effect::Boids, 0.0);
        assert_eq!(menu.poll(9_999.0), None);
        assert_eq!(menu.poll(10_000.0), Some(Effect::Boids));
        assert_eq!(menu.active(), None);
        assert_eq!(menu.poll(20_000.0), None);
    }

    #[test]
    fn stale_end_does_not_clear_new_selection() {
        let mut menu = menu();
        menu.activate(Effect::Boids, 0.0);
        menu.activate(Effect::Lorenz, 10.0);
        menu.restore(Effect::Boids);
        assert_eq!(menu.active(), Some(Effect::Lorenz));
        assert!(menu.entries().iter().all(|e| e.visible));
    }
}
