//! # Livestream grid
//!
//! Client-only list of Twitch channels. Players are revealed one at a time:
//! the first is always visible and each next one appears once its predecessor
//! reported loaded, so a page full of embeds does not start at once.

use std::collections::HashSet;

use rand::seq::SliceRandom;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamGrid {
    channels: Vec<String>,
    loaded: HashSet<String>,
    pub columns: u8,
}

/// Outcome of [`StreamGrid::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddChannel {
    Added(String),
    Empty,
    Duplicate,
}

impl StreamGrid {
    /// Grid over `channels` in a random order.
    pub fn shuffled(channels: &[String]) -> Self {
        let mut channels = channels.to_vec();
        channels.shuffle(&mut rand::thread_rng());
        Self::new(channels)
    }

    pub fn new(channels: Vec<String>) -> Self {
        Self {
            channels,
            loaded: HashSet::new(),
            columns: 2,
        }
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn mark_loaded(&mut self, channel: &str) {
        self.loaded.insert(channel.to_string());
    }

    pub fn is_loaded(&self, channel: &str) -> bool {
        self.loaded.contains(channel)
    }

    /// The first channel, then each next one while its predecessor has
    /// loaded.
    pub fn visible(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for (i, channel) in self.channels.iter().enumerate() {
            if i > 0 && !self.loaded.contains(&self.channels[i - 1]) {
                break;
            }
            out.push(channel.as_str());
        }
        out
    }

    /// Trimmed, lowercased and prepended.
    pub fn add(&mut self, input: &str) -> AddChannel {
        let name = input.trim().to_lowercase();
        if name.is_empty() {
            return AddChannel::Empty;
        }
        if self.channels.contains(&name) {
            return AddChannel::Duplicate;
        }
        self.channels.insert(0, name.clone());
        AddChannel::Added(name)
    }

    pub fn remove(&mut self, channel: &str) {
        self.channels.retain(|c| c != channel);
        self.loaded.remove(channel);
    }

    /// Switch between one and two columns.
    pub fn toggle_columns(&mut self) {
        self.columns = if self.columns == 1 { 2 } else { 1 };
    }
}

/// Twitch player URL. Only the first player autoplays.
pub fn embed_url(channel: &str, parent_domain: &str, index: usize) -> String {
    format!(
        "https://player.twitch.tv/?channel={channel}&parent={parent_domain}&autoplay={}",
        index == 0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(names: &[&str]) -> StreamGrid {
        StreamGrid::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_visibility_stops_at_first_unloaded_predecessor() {
        let mut g = grid(&["a", "b", "c", "d"]);
        assert_eq!(g.visible(), ["a"]);
        g.mark_loaded("a");
        assert_eq!(g.visible(), ["a", "b"]);
        // "c" loaded out of order does not reveal "d" while "b" is pending.
        g.mark_loaded("c");
        assert_eq!(g.visible(), ["a", "b"]);
        g.mark_loaded("b");
        assert_eq!(g.visible(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_add_normalizes_and_prepends() {
        let mut g = grid(&["kreo"]);
        assert_eq!(g.add("  Cented "), AddChannel::Added("cented".into()));
        assert_eq!(g.channels(), ["cented", "kreo"]);
        assert_eq!(g.add("KREO"), AddChannel::Duplicate);
        assert_eq!(g.add("   "), AddChannel::Empty);
        assert_eq!(g.channels().len(), 2);
    }

    #[test]
    fn test_remove_forgets_loaded_state() {
        let mut g = grid(&["a", "b"]);
        g.mark_loaded("a");
        g.remove("a");
        assert!(!g.is_loaded("a"));
        assert_eq!(g.visible(), ["b"]);
    }

    #[test]
    fn test_shuffle_keeps_channels() {
        let names: Vec<String> = (0..8).map(|i| format!("c{i}")).collect();
        let g = StreamGrid::shuffled(&names);
        let mut got = g.channels().to_vec();
        got.sort();
        assert_eq!(got, names);
    }

    #[test]
    fn test_columns_and_embed_url() {
        let mut g = grid(&[]);
        assert_eq!(g.columns, 2);
        g.toggle_columns();
        assert_eq!(g.columns, 1);
        g.toggle_columns();
        assert_eq!(g.columns, 2);

        assert_eq!(
            embed_url("kreo", "example.app", 0),
            "https://player.twitch.tv/?channel=kreo&parent=example.app&autoplay=true"
        );
        assert!(embed_url("kreo", "example.app", 3).ends_with("autoplay=false"));
    }
}
