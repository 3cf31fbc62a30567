use crate::StrSpan;

/// The name of a node, with an optional prefix:
/// `prefix:local`
#[derive(Debug, Clone)]
pub struct NodeName<'src> {
    prefix: Option<StrSpan<'src>>,
    local: StrSpan<'src>,
}
impl<'src> NodeName<'src> {
    pub(crate) fn new<T: Into<StrSpan<'src>>>(prefix: Option<T>, local: T) -> Self {
        Self {
            prefix: prefix.map(Into::into),
            local: local.into(),
        }
    }

    /// Builds a name from the tokenizer's prefix/local pair; an empty prefix means none.
    pub(crate) fn from_tokens(
        prefix: xmlparser::StrSpan<'src>,
        local: xmlparser::StrSpan<'src>,
    ) -> Self {
        let prefix = (!prefix.as_str().is_empty()).then_some(prefix);
        Self::new(prefix, local)
    }
}
impl std::fmt::Display for NodeName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(prefix) = self.prefix {
            write!(f, "{prefix}:{local}", local = self.local)
        } else {
            write!(f, "{local}", local = self.local)
        }
    }
}
impl PartialEq for NodeName<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.prefix.map(|s| s.as_str()) == other.prefix.map(|s| s.as_str())
            && self.local.as_str() == other.local.as_str()
    }
}
impl PartialEq<&str> for NodeName<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.to_string().as_str() == *other
    }
}
impl PartialEq<str> for NodeName<'_> {
    fn eq(&self, other: &str) -> bool {
        self.to_string().as_str() == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(NodeName::new(Some("soap"), "Body").to_string(), "soap:Body");
        assert_eq!(NodeName::new(None, "Body").to_string(), "Body");
    }

    #[test]
    fn test_equality_ignores_offsets() {
        let a = NodeName::new(None, StrSpan::new("item", 3));
        let b = NodeName::new(None, StrSpan::new("item", 40));
        assert_eq!(a, b);
        assert_eq!(a, "item");
        assert_ne!(a, NodeName::new(Some("x"), "item"));
    }
}
