//! # Artifact Sandbox
//!
//! Renders an untrusted, single-file component source string into a live,
//! invocable component inside an isolated V8 rendering surface.
//!
//! The core is the source-to-component pipeline: the ES-module-shaped source
//! is parsed, its import statements are rewritten into destructuring lookups
//! against a fixed Runtime Binding Table, JSX is lowered to plain
//! `React.createElement` calls, the default-exported entry symbol is
//! extracted, and the result is wrapped in a factory template whose parameter
//! list enumerates the entire capability surface reachable from the code.
//! The template is materialized into a callable inside the isolate and
//! invoked with the concrete binding objects.
//!
//! ## Capability surface
//!
//! | import source | binding object |
//! |---|---|
//! | `react` | `React` |
//! | `@/components/ui` (prefix) | `uiComponents` |
//! | `lucide-react` | `lucide` |
//! | `recharts` | `recharts` |
//!
//! Unrecognized sources pass through as their own binding name and fail at
//! invocation time, not at transform time.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use artifact_sandbox::{build_component_factory, create_runtime, render_component, SurfaceConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let factory = build_component_factory(
//!         "export default function Widget() { return <div>hi</div>; }",
//!     )
//!     .unwrap();
//!
//!     let mut runtime = create_runtime(&SurfaceConfig::default()).unwrap();
//!     let result = render_component(&mut runtime, &factory, None).await.unwrap();
//!
//!     println!("{}", result.html);
//! }
//! ```

mod bindings;
mod error;
mod extract;
mod factory;
mod jsx_lowerer;
mod protocol;
mod rewrite;
mod runtime;
mod transform;

#[cfg(test)]
mod pipeline_tests;

pub use bindings::{
    object_name_for_source, parameter_names, BindingEntry, SourceMatch, RUNTIME_BINDINGS,
};
pub use error::TransformError;
pub use extract::{strip_default_export, ExportDescriptor};
pub use factory::{build_component_factory, ComponentFactory};
pub use protocol::{HostMessage, SurfaceMessage};
pub use runtime::{
    create_runtime, render_component, reset_console, ConsoleOutput, RenderResult, SurfaceConfig,
};
pub use transform::transform_source;
