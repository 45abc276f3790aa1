use crate::plugins::traits::TrackerPlugin;

/// Matches listing text against an ordered list of accepted size labels.
///
/// Matching is plain substring containment and the first label found wins,
/// so `"4 in"` also matches text such as `"14 in"`.
pub struct SizeTracker {
    sizes: Vec<String>,
}

impl SizeTracker {
    pub fn new(sizes: Vec<String>) -> Self {
        Self { sizes }
    }
}

impl TrackerPlugin for SizeTracker {
    type Value = String;

    fn name(&self) -> &str {
        "Size Tracker"
    }

    fn plugin_type(&self) -> &str {
        "size"
    }

    fn parse(&self, text: &str) -> Option<String> {
        self.sizes
            .iter()
            .find(|size| text.contains(size.as_str()))
            .cloned()
    }
}
