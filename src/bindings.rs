//! Runtime Binding Table.
//!
//! The fixed mapping from import sources to the binding objects injected into
//! the compiled factory. This table is the entire capability surface reachable
//! from transformed code: adding a recognized module is a data change here,
//! never a code change in the rewriter.

/// How an import source is matched against a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMatch {
    /// The import source must equal the entry's source exactly.
    Exact,
    /// The import source must start with the entry's source. Used for
    /// design-system path imports such as `@/components/ui/button`.
    Prefix,
}

/// One row of the Runtime Binding Table.
#[derive(Debug, Clone, Copy)]
pub struct BindingEntry {
    /// The recognized import source identifier.
    pub source: &'static str,
    /// The binding-object name used inside generated code, and the name of
    /// the corresponding global installed by the surface bootstrap.
    pub object: &'static str,
    pub matches: SourceMatch,
}

/// Process-wide, read-only table. Order matters: the compiled factory's
/// parameter list and its invocation argument list are both derived from this
/// order, so the two can never disagree.
pub const RUNTIME_BINDINGS: &[BindingEntry] = &[
    BindingEntry {
        source: "react",
        object: "React",
        matches: SourceMatch::Exact,
    },
    BindingEntry {
        source: "@/components/ui",
        object: "uiComponents",
        matches: SourceMatch::Prefix,
    },
    BindingEntry {
        source: "lucide-react",
        object: "lucide",
        matches: SourceMatch::Exact,
    },
    BindingEntry {
        source: "recharts",
        object: "recharts",
        matches: SourceMatch::Exact,
    },
];

/// Resolve an import source to a binding-object name.
///
/// Unrecognized sources pass through unchanged as their own binding-object
/// name. Code importing an unknown module therefore fails at invocation time
/// with an unbound-name error, not at transform time.
pub fn object_name_for_source(source: &str) -> &str {
    for entry in RUNTIME_BINDINGS {
        let hit = match entry.matches {
            SourceMatch::Exact => source == entry.source,
            SourceMatch::Prefix => source.starts_with(entry.source),
        };
        if hit {
            return entry.object;
        }
    }
    source
}

/// The factory parameter names, in table order.
pub fn parameter_names() -> Vec<&'static str> {
    RUNTIME_BINDINGS.iter().map(|entry| entry.object).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(object_name_for_source("react"), "React");
        assert_eq!(object_name_for_source("lucide-react"), "lucide");
        assert_eq!(object_name_for_source("recharts"), "recharts");
    }

    #[test]
    fn test_prefix_match_for_design_system() {
        assert_eq!(object_name_for_source("@/components/ui"), "uiComponents");
        assert_eq!(
            object_name_for_source("@/components/ui/button"),
            "uiComponents"
        );
        // Not a prefix hit: different root
        assert_eq!(object_name_for_source("@/lib/utils"), "@/lib/utils");
    }

    #[test]
    fn test_unrecognized_source_passes_through() {
        assert_eq!(object_name_for_source("some-lib"), "some-lib");
        assert_eq!(object_name_for_source("react-dom"), "react-dom");
    }

    #[test]
    fn test_parameter_order_follows_table() {
        assert_eq!(
            parameter_names(),
            vec!["React", "uiComponents", "lucide", "recharts"]
        );
    }
}
