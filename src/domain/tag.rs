use crate::domain::Version;

/// Composite deployment tag value combining the two sub-project versions.
///
/// The value is `{minorA}.{patchA}.{minorB}.{patchB}` in back-then-web
/// order. Majors are deliberately excluded: they are assumed to be kept in
/// lockstep outside this tool and are not part of the deploy identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeTag {
    pub value: String,
}

impl CompositeTag {
    /// Derive the composite tag value from the two sub-project versions
    pub fn derive(back: &Version, web: &Version) -> Self {
        CompositeTag {
            value: format!(
                "{}.{}.{}.{}",
                back.minor, back.patch, web.minor, web.patch
            ),
        }
    }

    /// Wrap a stored tag value (e.g., read back from the env store)
    pub fn from_value(value: impl Into<String>) -> Self {
        CompositeTag {
            value: value.into(),
        }
    }

    /// The git tag name for this value (e.g., "v2.3.5.6")
    pub fn tag_name(&self) -> String {
        format!("v{}", self.value)
    }
}
