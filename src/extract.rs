//! Default-export extraction.
//!
//! Locates the single default-exported entry symbol in a source unit and
//! removes the export syntax so the remaining code is a plain, executable
//! script fragment. This pass is textual on purpose: apart from the removed
//! export syntax the source must survive character-for-character, so the
//! rewrite happens before any parsing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Form (a): `export default function ComponentName(...)`.
    static ref EXPORT_DEFAULT_FUNCTION_RE: Regex =
        Regex::new(r"export\s+default\s+function\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap();

    /// The keyword pair stripped from form (a), keeping the declaration.
    static ref EXPORT_DEFAULT_KEYWORDS_RE: Regex =
        Regex::new(r"export\s+default\s+function").unwrap();

    /// Form (b): `export default ComponentName;` referencing a previously
    /// declared symbol. The whole statement is removed.
    static ref EXPORT_DEFAULT_IDENTIFIER_RE: Regex =
        Regex::new(r"export\s+default\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*;?").unwrap();
}

/// Result of neutralizing the default export of one source unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDescriptor {
    /// The source with its default-export declaration neutralized.
    pub rewritten_source: String,
    /// The identifier of the exported entry symbol. `None` means no usable
    /// entry point; the caller must treat that as a transformation failure.
    pub entry_symbol: Option<String>,
}

/// Strip the default export from `source` and record the entry symbol.
///
/// Form (a) is detected first; only the first match of each form is honored.
/// Multiple default exports are unsupported and produce undefined behavior.
/// Absence of a match is a representable result, not a failure.
pub fn strip_default_export(source: &str) -> ExportDescriptor {
    if let Some(caps) = EXPORT_DEFAULT_FUNCTION_RE.captures(source) {
        return ExportDescriptor {
            rewritten_source: EXPORT_DEFAULT_KEYWORDS_RE
                .replace(source, "function")
                .into_owned(),
            entry_symbol: Some(caps[1].to_string()),
        };
    }

    if let Some(caps) = EXPORT_DEFAULT_IDENTIFIER_RE.captures(source) {
        return ExportDescriptor {
            rewritten_source: EXPORT_DEFAULT_IDENTIFIER_RE
                .replace(source, "")
                .into_owned(),
            entry_symbol: Some(caps[1].to_string()),
        };
    }

    ExportDescriptor {
        rewritten_source: source.to_string(),
        entry_symbol: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exported_function_declaration() {
        let src = "export default function Widget() { return null; }";
        let descriptor = strip_default_export(src);
        assert_eq!(descriptor.entry_symbol.as_deref(), Some("Widget"));
        assert_eq!(
            descriptor.rewritten_source,
            "function Widget() { return null; }"
        );
    }

    #[test]
    fn test_exported_function_preserves_body() {
        let src = "export default function Widget() {\n  const x = { a: { b: 1 } };\n  return x;\n}";
        let descriptor = strip_default_export(src);
        assert_eq!(descriptor.entry_symbol.as_deref(), Some("Widget"));
        // Body is untouched apart from the stripped keyword pair.
        assert_eq!(
            descriptor.rewritten_source,
            "function Widget() {\n  const x = { a: { b: 1 } };\n  return x;\n}"
        );
        assert!(!descriptor.rewritten_source.contains("export default"));
    }

    #[test]
    fn test_exported_identifier_statement() {
        let src = "function Widget() { return null; }\nexport default Widget;\n";
        let descriptor = strip_default_export(src);
        assert_eq!(descriptor.entry_symbol.as_deref(), Some("Widget"));
        assert_eq!(
            descriptor.rewritten_source,
            "function Widget() { return null; }\n\n"
        );
    }

    #[test]
    fn test_identifier_statement_without_semicolon() {
        let src = "const Card = () => null;\nexport default Card";
        let descriptor = strip_default_export(src);
        assert_eq!(descriptor.entry_symbol.as_deref(), Some("Card"));
        assert!(!descriptor.rewritten_source.contains("export default"));
    }

    #[test]
    fn test_no_default_export() {
        let src = "function Widget() { return null; }";
        let descriptor = strip_default_export(src);
        assert_eq!(descriptor.entry_symbol, None);
        assert_eq!(descriptor.rewritten_source, src);
    }

    #[test]
    fn test_function_form_wins_over_identifier_form() {
        // `export default function` must never be parsed as form (b) with
        // `function` as the entry symbol.
        let src = "export default function App() { return 1; }";
        let descriptor = strip_default_export(src);
        assert_eq!(descriptor.entry_symbol.as_deref(), Some("App"));
    }

    #[test]
    fn test_only_first_match_is_honored() {
        let src = "export default A;\nexport default B;";
        let descriptor = strip_default_export(src);
        assert_eq!(descriptor.entry_symbol.as_deref(), Some("A"));
        assert!(descriptor.rewritten_source.contains("export default B"));
    }
}
