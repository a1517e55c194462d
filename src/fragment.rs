//! The ambient navigation fragment, abstracted as a small read/write port.
//!
//! A browser exposes this as `location.hash`. Here it is an explicit value
//! handed to the KVP adapter at construction, so the adapter can run against
//! an in-memory fragment (the service) or any other host.

use tracing::debug;

/// Read/write access to the current navigation fragment.
pub trait FragmentPort {
    /// Current fragment, including any leading `#`.
    fn read(&self) -> String;

    /// Replace the current fragment.
    fn write(&mut self, value: &str);
}

/// In-memory fragment with `location.hash` semantics: a non-empty value is
/// read back with a leading `#`, an empty one reads back as `""`.
#[derive(Clone, Debug, Default)]
pub struct MemoryFragment {
    hash: String,
}

impl MemoryFragment {
    pub fn new(initial: &str) -> Self {
        let mut f = Self::default();
        f.write(initial);
        f
    }
}

impl FragmentPort for MemoryFragment {
    fn read(&self) -> String {
        self.hash.clone()
    }

    fn write(&mut self, value: &str) {
        let value = value.strip_prefix('#').unwrap_or(value);
        self.hash = if value.is_empty() { String::new() } else { format!("#{}", value) };
        debug!(target: "helper_kit::fragment", hash = %self.hash, "Fragment replaced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_adds_marker() {
        let mut f = MemoryFragment::default();
        f.write("a=1");
        assert_eq!(f.read(), "#a=1");
    }

    #[test]
    fn test_write_keeps_single_marker() {
        let f = MemoryFragment::new("#nav&a=1");
        assert_eq!(f.read(), "#nav&a=1");
    }

    #[test]
    fn test_empty_reads_empty() {
        let mut f = MemoryFragment::new("x");
        f.write("");
        assert_eq!(f.read(), "");
    }
}
