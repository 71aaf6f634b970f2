//! Component factory building.
//!
//! Sequences extraction, syntax transformation and templating into one
//! compiled factory. The factory is call-local: it is never cached or reused
//! across source units.

use crate::bindings::parameter_names;
use crate::error::TransformError;
use crate::extract::strip_default_export;
use crate::transform::transform_source;

/// An executable factory template plus the data needed to invoke it.
///
/// `source` has the shape `function(<params>) { <body>; return <entry>; }`.
/// `parameters` is the table-ordered list used both to build the template
/// and to generate the invocation argument list, so the two cannot drift.
#[derive(Debug, Clone)]
pub struct ComponentFactory {
    pub source: String,
    pub parameters: Vec<&'static str>,
    pub entry_symbol: String,
}

/// Build a compiled factory from one raw source unit.
///
/// State machine: Extracting -> Rewriting -> Templating. Materializing and
/// Invoking happen inside the rendering surface, which is the single place
/// that knows how template text becomes a callable.
pub fn build_component_factory(source: &str) -> Result<ComponentFactory, TransformError> {
    let descriptor = strip_default_export(source);

    let transpiled = transform_source(&descriptor.rewritten_source)?;
    if transpiled.trim().is_empty() {
        return Err(TransformError::syntax("transformation produced no output"));
    }

    let entry_symbol = descriptor
        .entry_symbol
        .ok_or(TransformError::MissingDefaultExport)?;

    let parameters = parameter_names();
    let source = factory_template(&transpiled, &entry_symbol, &parameters);
    tracing::debug!(entry = %entry_symbol, "compiled component factory");

    Ok(ComponentFactory {
        source,
        parameters,
        entry_symbol,
    })
}

fn factory_template(code: &str, entry_symbol: &str, parameters: &[&'static str]) -> String {
    format!(
        "function({}) {{\n{}\nreturn {};\n}}",
        parameters.join(", "),
        code,
        entry_symbol
    )
}
