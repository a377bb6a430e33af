//! Drag-Disablement Policy
//!
//! Decides, per scope, whether rows are registered as drag sources at all.
//! Evaluated when a list is rendered, not when something is dropped.

/// Scope key of the virtual "unclassified" bucket
pub const UNCLASSIFIED_SCOPE_KEY: &str = "untagged";

/// Pure predicate over a scope key
pub trait DragPolicy {
    fn is_drag_enabled(&self, scope_key: &str) -> bool;
}

impl<F> DragPolicy for F
where
    F: Fn(&str) -> bool,
{
    fn is_drag_enabled(&self, scope_key: &str) -> bool {
        self(scope_key)
    }
}

/// Disables dragging in a fixed set of virtual scopes
#[derive(Debug, Clone)]
pub struct VirtualBucketPolicy {
    disabled: Vec<String>,
}

impl VirtualBucketPolicy {
    pub fn new<I, S>(disabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            disabled: disabled.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for VirtualBucketPolicy {
    fn default() -> Self {
        Self::new([UNCLASSIFIED_SCOPE_KEY])
    }
}

impl DragPolicy for VirtualBucketPolicy {
    fn is_drag_enabled(&self, scope_key: &str) -> bool {
        !self.disabled.iter().any(|k| k == scope_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclassified_bucket_disabled_by_default() {
        let policy = VirtualBucketPolicy::default();
        assert!(!policy.is_drag_enabled(UNCLASSIFIED_SCOPE_KEY));
        assert!(policy.is_drag_enabled("tag:work"));
    }

    #[test]
    fn test_closure_policy() {
        let policy = |key: &str| key.starts_with("playlist:");
        assert!(policy.is_drag_enabled("playlist:abc"));
        assert!(!policy.is_drag_enabled("tag:work"));
    }
}
