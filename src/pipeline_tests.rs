//! End-to-end pipeline tests against the real isolate.
//!
//! Each test runs the whole chain: extraction, syntax transformation,
//! templating, materialization, invocation and mounting.

#[cfg(test)]
mod tests {
    use crate::error::TransformError;
    use crate::factory::build_component_factory;
    use crate::runtime::{create_runtime, render_component, RenderResult, SurfaceConfig};

    fn fresh_runtime() -> deno_core::JsRuntime {
        create_runtime(&SurfaceConfig::default()).expect("surface runtime")
    }

    async fn render(code: &str) -> anyhow::Result<RenderResult> {
        let factory = build_component_factory(code)?;
        let mut runtime = fresh_runtime();
        render_component(&mut runtime, &factory, None).await
    }

    #[tokio::test]
    async fn test_inline_function_export_renders_div() {
        let result = render("export default function Widget(){ return <div>hi</div>; }")
            .await
            .unwrap();
        assert_eq!(result.html, "<div>hi</div>");
    }

    #[tokio::test]
    async fn test_design_system_import_binds_button() {
        let code = r#"import { Button } from "@/components/ui";
function Widget() { return <Button>Go</Button>; }
export default Widget;"#;

        let factory = build_component_factory(code).unwrap();
        // No residual import statement in the generated code.
        assert!(!factory.source.contains("import"));
        assert!(factory.source.contains("uiComponents"));

        let mut runtime = fresh_runtime();
        let result = render_component(&mut runtime, &factory, None).await.unwrap();
        assert!(result.html.contains("<button"));
        assert!(result.html.contains("ui-button"));
        assert!(result.html.contains("Go"));
    }

    #[tokio::test]
    async fn test_unknown_import_fails_at_invocation_not_transform() {
        let code = r#"import { Foo } from "someLib";
export default function Widget() { return <div>{Foo}</div>; }"#;

        // Transformation succeeds structurally; the pass-through binding name
        // survives into the factory body.
        let factory = build_component_factory(code).unwrap();
        assert!(factory.source.contains("someLib"));

        let mut runtime = fresh_runtime();
        let err = render_component(&mut runtime, &factory, None)
            .await
            .unwrap_err();
        // The failure is attributable to the unbound name.
        assert!(err.to_string().contains("someLib"), "got: {}", err);
    }

    #[tokio::test]
    async fn test_round_trip_yields_equivalent_output() {
        let code = r#"import { Badge } from "@/components/ui";
function Widget() { return <Badge>v1</Badge>; }
export default Widget;"#;

        let first = render(code).await.unwrap();
        let second = render(code).await.unwrap();
        assert_eq!(first.html, second.html);
        assert!(!first.html.is_empty());
    }

    #[tokio::test]
    async fn test_no_default_export_is_an_extraction_failure() {
        let err = build_component_factory("function Widget() { return null; }").unwrap_err();
        assert!(matches!(err, TransformError::MissingDefaultExport));
    }

    #[tokio::test]
    async fn test_console_output_is_captured() {
        let result = render(
            r#"export default function Widget() {
  console.log("mounted", { n: 1 });
  console.warn("careful");
  return <div />;
}"#,
        )
        .await
        .unwrap();
        assert_eq!(result.console.logs, vec![r#"mounted {"n":1}"#.to_string()]);
        assert_eq!(result.console.warns, vec!["careful".to_string()]);
    }

    #[tokio::test]
    async fn test_hooks_render_initial_state() {
        let code = r#"import { useState } from "react";
function Counter() {
  const [count] = useState(5);
  return <span>{count}</span>;
}
export default Counter;"#;
        let result = render(code).await.unwrap();
        assert_eq!(result.html, "<span>5</span>");
    }

    #[tokio::test]
    async fn test_lucide_icon_resolves_by_name() {
        let code = r#"import { ArrowRight } from "lucide-react";
export default function Widget() { return <ArrowRight size={16} />; }"#;
        let result = render(code).await.unwrap();
        assert!(result.html.contains("lucide-arrow-right"));
        assert!(result.html.contains(r#"width="16""#));
    }

    #[tokio::test]
    async fn test_recharts_chart_renders_placeholder_surface() {
        let code = r#"import { LineChart, Line, XAxis } from "recharts";
function Chart() {
  return (
    <LineChart width={200} height={100}>
      <XAxis />
      <Line />
    </LineChart>
  );
}
export default Chart;"#;
        let result = render(code).await.unwrap();
        assert!(result.html.contains("recharts-line-chart"));
        assert!(result.html.contains("recharts-xaxis"));
    }

    #[tokio::test]
    async fn test_user_exception_surfaces_unmodified() {
        let code = r#"export default function Widget() { throw new Error("widget exploded"); }"#;
        let factory = build_component_factory(code).unwrap();
        let mut runtime = fresh_runtime();
        let err = render_component(&mut runtime, &factory, None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("widget exploded"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_runaway_render_is_terminated() {
        let code = "export default function Widget() { while (true) {} }";
        let factory = build_component_factory(code).unwrap();
        let mut runtime = fresh_runtime();
        let err = render_component(&mut runtime, &factory, Some(500))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("timed out"), "got: {}", err);
    }

    #[tokio::test]
    async fn test_escaping_of_text_content() {
        let code = r#"export default function Widget() { return <div>{"<script>"}</div>; }"#;
        let result = render(code).await.unwrap();
        assert_eq!(result.html, "<div>&lt;script&gt;</div>");
    }
}
