use gpui::{ElementId, SharedString};

/// Stable component identity derived from the construction callsite, so a
/// component keeps the same id across frames without the caller having to
/// name it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ComponentId(SharedString);

impl ComponentId {
    #[track_caller]
    pub fn auto(prefix: &str) -> Self {
        Self(stable_auto_id(prefix).into())
    }

    pub fn named(id: impl Into<SharedString>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_ref()
    }

    /// Derives the id of a named sub-element, e.g. the error line of a field.
    pub fn slot(&self, name: &str) -> ElementId {
        ElementId::Name(format!("{}-{name}", self.0).into())
    }

    /// Derives the id of a named child component.
    pub fn child(&self, name: &str) -> ComponentId {
        Self::named(format!("{}-{name}", self.0))
    }
}

impl From<&'static str> for ComponentId {
    fn from(value: &'static str) -> Self {
        Self::named(value)
    }
}

impl From<ComponentId> for ElementId {
    fn from(value: ComponentId) -> Self {
        ElementId::Name(value.0)
    }
}

#[track_caller]
pub fn stable_auto_id(prefix: &str) -> String {
    let location = std::panic::Location::caller();
    let seed = format!(
        "{prefix}:{}:{}:{}",
        location.file(),
        location.line(),
        location.column()
    );
    format!("{prefix}-{:016x}", fnv1a64(seed.as_bytes()))
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x00000100000001b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn call_once() -> String {
        stable_auto_id("input")
    }

    #[test]
    fn id_is_stable_for_same_callsite() {
        let ids = (0..3).map(|_| call_once()).collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn id_differs_for_different_callsites() {
        let first = call_once();
        let second = {
            // Different callsite by design.
            stable_auto_id("input")
        };
        assert_ne!(first, second);
    }

    #[test]
    fn slot_appends_suffix_to_component_id() {
        let id = ComponentId::named("contact-email");
        let ElementId::Name(slot) = id.slot("error") else {
            panic!("slot should produce a named element id");
        };
        assert_eq!(slot.as_ref(), "contact-email-error");
    }
}
