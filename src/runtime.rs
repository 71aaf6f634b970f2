//! Rendering surface - materializes compiled factories in a sandboxed V8
//! isolate.
//!
//! The isolate carries only what the bootstrap installs:
//! - console.log/warn/error (captured, not printed)
//! - the runtime binding objects (React, uiComponents, lucide, recharts)
//! - No fs, net, env, timers or other system access
//!
//! Materialization is the single point where template text becomes a
//! callable; everything upstream of this module is agnostic to how that
//! happens.

use anyhow::{anyhow, Error};
use deno_core::{op2, JsRuntime, OpState, RuntimeOptions};

use crate::factory::ComponentFactory;

/// Captured console output from the sandboxed surface.
#[derive(Debug, Default, Clone)]
pub struct ConsoleOutput {
    pub logs: Vec<String>,
    pub warns: Vec<String>,
    pub errors: Vec<String>,
}

/// Result of rendering one component factory.
#[derive(Debug)]
pub struct RenderResult {
    pub html: String,
    pub console: ConsoleOutput,
}

// ============================================================================
// Console Ops
// ============================================================================

#[op2(fast)]
fn op_console_log(state: &mut OpState, #[string] msg: &str) {
    if let Some(output) = state.try_borrow_mut::<ConsoleOutput>() {
        output.logs.push(msg.to_string());
    }
}

#[op2(fast)]
fn op_console_warn(state: &mut OpState, #[string] msg: &str) {
    if let Some(output) = state.try_borrow_mut::<ConsoleOutput>() {
        output.warns.push(msg.to_string());
    }
}

#[op2(fast)]
fn op_console_error(state: &mut OpState, #[string] msg: &str) {
    if let Some(output) = state.try_borrow_mut::<ConsoleOutput>() {
        output.errors.push(msg.to_string());
    }
}

deno_core::extension!(
    surface_runtime,
    ops = [op_console_log, op_console_warn, op_console_error],
    esm_entry_point = "ext:surface_runtime/bootstrap.js",
    esm = ["ext:surface_runtime/bootstrap.js" = "src/bootstrap.js"],
);

/// Configuration for the rendering surface.
pub struct SurfaceConfig {
    /// Maximum heap size in bytes (None = unlimited)
    pub max_heap_size: Option<usize>,
    /// Maximum time for a single render in milliseconds (None = unlimited)
    pub timeout_ms: Option<u64>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            max_heap_size: Some(64 * 1024 * 1024),
            timeout_ms: Some(10_000),
        }
    }
}

/// Create a sandboxed isolate with the surface bootstrap installed.
pub fn create_runtime(config: &SurfaceConfig) -> Result<JsRuntime, Error> {
    let create_params = config
        .max_heap_size
        .map(|max_bytes| deno_core::v8::Isolate::create_params().heap_limits(0, max_bytes));

    let mut runtime = JsRuntime::new(RuntimeOptions {
        extensions: vec![surface_runtime::init_ops_and_esm()],
        create_params,
        ..Default::default()
    });

    if config.max_heap_size.is_some() {
        runtime.add_near_heap_limit_callback(|current, initial| {
            // Keep the limit where it is so V8 raises OOM instead of aborting.
            tracing::warn!(
                current_mb = current / (1024 * 1024),
                initial_mb = initial / (1024 * 1024),
                "surface near heap limit"
            );
            current
        });
    }

    runtime.op_state().borrow_mut().put(ConsoleOutput::default());

    Ok(runtime)
}

/// Clear captured console output between renders.
pub fn reset_console(runtime: &mut JsRuntime) {
    runtime.op_state().borrow_mut().put(ConsoleOutput::default());
}

/// Materialize, invoke and mount one compiled factory, returning the
/// rendered HTML and the console output captured during the render.
///
/// With a timeout, a watchdog terminates isolate execution once the deadline
/// passes; the isolate is unusable afterwards and must be recreated by the
/// caller.
pub async fn render_component(
    runtime: &mut JsRuntime,
    factory: &ComponentFactory,
    timeout_ms: Option<u64>,
) -> Result<RenderResult, Error> {
    match timeout_ms {
        Some(ms) => {
            let isolate_handle = runtime.v8_isolate().thread_safe_handle();

            let timeout_handle = tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
                isolate_handle.terminate_execution();
            });

            let result = render_inner(runtime, factory);
            timeout_handle.abort();

            match &result {
                Err(e) if e.to_string().contains("terminated") => {
                    Err(anyhow!("render timed out after {}ms", ms))
                }
                _ => result,
            }
        }
        None => render_inner(runtime, factory),
    }
}

fn render_inner(runtime: &mut JsRuntime, factory: &ComponentFactory) -> Result<RenderResult, Error> {
    materialize(runtime, factory)?;
    invoke(runtime, factory)?;
    let html = mount(runtime)?;

    let console = runtime
        .op_state()
        .borrow()
        .borrow::<ConsoleOutput>()
        .clone();

    Ok(RenderResult { html, console })
}

/// Evaluate the factory template into a callable. The function expression
/// executes in global scope: no implicit access to anything beyond the
/// bootstrap globals exists.
fn materialize(runtime: &mut JsRuntime, factory: &ComponentFactory) -> Result<(), Error> {
    let script = format!("globalThis.__surface__.factory = ({});", factory.source);
    runtime.execute_script("<materialize>", script)?;
    Ok(())
}

/// Call the materialized factory with the binding objects, in the same table
/// order used to build the parameter list.
fn invoke(runtime: &mut JsRuntime, factory: &ComponentFactory) -> Result<(), Error> {
    let script = format!(
        "globalThis.__surface__.component = globalThis.__surface__.factory({});",
        factory.parameters.join(", ")
    );
    runtime.execute_script("<invoke>", script)?;
    Ok(())
}

/// Mount the component the way the host shell would, producing HTML.
fn mount(runtime: &mut JsRuntime) -> Result<String, Error> {
    let script = r#"
(() => {
  const component = globalThis.__surface__.component;
  if (typeof component !== "function") {
    throw new Error("factory did not return an invocable component");
  }
  return React.renderToString(React.createElement(component, null));
})()
"#
    .to_string();

    let html_global = runtime.execute_script("<mount>", script)?;

    let scope = &mut runtime.handle_scope();
    let local = deno_core::v8::Local::new(scope, &html_global);
    if local.is_string() {
        Ok(local.to_rust_string_lossy(scope))
    } else {
        Err(anyhow!("mount did not produce an HTML string"))
    }
}
