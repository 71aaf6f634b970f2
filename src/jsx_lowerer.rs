//! JSX lowering.
//!
//! Lowers JSX elements and fragments into plain `React.createElement(...)`
//! calls so the transformed code can execute in a plain function body. Also
//! peels TypeScript expression wrappers, mirroring the type-only statement
//! stripping done by the syntax transformation before codegen.

use oxc_allocator::{Allocator, Box as oxc_box, CloneIn};
use oxc_ast::ast::*;
use oxc_ast::AstBuilder;
use oxc_ast_visit::walk_mut::walk_expression;
use oxc_ast_visit::VisitMut;
use oxc_span::SPAN;

// ═══════════════════════════════════════════════════════════════════════════════
// JSX LOWERER
// Transforms JSX elements into React.createElement() calls
// ═══════════════════════════════════════════════════════════════════════════════

pub struct JsxLowerer<'a> {
    pub ast: AstBuilder<'a>,
}

impl<'a> JsxLowerer<'a> {
    pub fn new(allocator: &'a Allocator) -> Self {
        Self {
            ast: AstBuilder::new(allocator),
        }
    }

    /// `React.createElement`
    fn create_element_callee(&self) -> Expression<'a> {
        Expression::from(self.ast.member_expression_static(
            SPAN,
            self.ast.expression_identifier(SPAN, "React"),
            self.ast.identifier_name(SPAN, "createElement"),
            false,
        ))
    }

    /// `React.Fragment`
    fn fragment_type(&self) -> Expression<'a> {
        Expression::from(self.ast.member_expression_static(
            SPAN,
            self.ast.expression_identifier(SPAN, "React"),
            self.ast.identifier_name(SPAN, "Fragment"),
            false,
        ))
    }

    fn lower_jsx_element(&mut self, element: &JSXElement<'a>) -> Expression<'a> {
        let type_expr = self.element_type_expression(&element.opening_element.name);

        let mut current_obj_props = self.ast.vec();
        for item in &element.opening_element.attributes {
            match item {
                JSXAttributeItem::Attribute(attr) => {
                    let name = match &attr.name {
                        JSXAttributeName::Identifier(id) => self.property_key(&id.name),
                        JSXAttributeName::NamespacedName(ns) => {
                            let ns_name = format!("{}:{}", ns.namespace.name, ns.name.name);
                            self.property_key(&ns_name)
                        }
                    };

                    let value = match &attr.value {
                        Some(JSXAttributeValue::StringLiteral(s)) => {
                            Expression::StringLiteral(self.ast.alloc((**s).clone()))
                        }
                        Some(JSXAttributeValue::Element(el)) => self.lower_jsx_element(el),
                        Some(JSXAttributeValue::ExpressionContainer(container)) => {
                            self.lower_jsx_expression(&container.expression)
                        }
                        Some(JSXAttributeValue::Fragment(frag)) => self.lower_jsx_fragment(frag),
                        None => self.ast.expression_boolean_literal(SPAN, true),
                    };

                    current_obj_props.push(self.ast.object_property_kind_object_property(
                        SPAN,
                        PropertyKind::Init,
                        name,
                        value,
                        false,
                        false,
                        false,
                    ));
                }
                JSXAttributeItem::SpreadAttribute(spread) => {
                    let mut spread_expr = spread.argument.clone_in(self.ast.allocator);
                    self.visit_expression(&mut spread_expr);
                    current_obj_props.push(
                        self.ast
                            .object_property_kind_spread_property(SPAN, spread_expr),
                    );
                }
            }
        }

        let props_expr = if current_obj_props.is_empty() {
            self.ast.expression_null_literal(SPAN)
        } else {
            self.ast.expression_object(SPAN, current_obj_props)
        };

        let mut args = self.ast.vec();
        args.push(Argument::from(type_expr));
        args.push(Argument::from(props_expr));
        self.push_child_args(&element.children, &mut args);

        self.ast.expression_call(
            SPAN,
            self.create_element_callee(),
            None::<oxc_box<TSTypeParameterInstantiation>>,
            args,
            false,
        )
    }

    fn lower_jsx_fragment(&mut self, fragment: &JSXFragment<'a>) -> Expression<'a> {
        let mut args = self.ast.vec();
        args.push(Argument::from(self.fragment_type()));
        args.push(Argument::from(self.ast.expression_null_literal(SPAN)));
        self.push_child_args(&fragment.children, &mut args);

        self.ast.expression_call(
            SPAN,
            self.create_element_callee(),
            None::<oxc_box<TSTypeParameterInstantiation>>,
            args,
            false,
        )
    }

    /// Children become trailing `createElement` arguments. Whitespace-only
    /// text between elements is dropped; other text is trimmed.
    fn push_child_args(
        &mut self,
        children: &[JSXChild<'a>],
        args: &mut oxc_allocator::Vec<'a, Argument<'a>>,
    ) {
        for child in children {
            match child {
                JSXChild::Text(t) => {
                    let text = t.value.trim();
                    if !text.is_empty() {
                        let text_atom = self.ast.allocator.alloc_str(text);
                        args.push(Argument::from(self.ast.expression_string_literal(
                            SPAN, text_atom, None,
                        )));
                    }
                }
                JSXChild::Element(el) => {
                    args.push(Argument::from(self.lower_jsx_element(el)));
                }
                JSXChild::Fragment(frag) => {
                    args.push(Argument::from(self.lower_jsx_fragment(frag)));
                }
                JSXChild::ExpressionContainer(container) => {
                    args.push(Argument::from(
                        self.lower_jsx_expression(&container.expression),
                    ));
                }
                JSXChild::Spread(spread) => {
                    let mut arg = spread.expression.clone_in(self.ast.allocator);
                    self.visit_expression(&mut arg);
                    args.push(Argument::from(arg));
                }
            }
        }
    }

    /// Intrinsic tags (lowercase) become string literals; component tags
    /// stay identifier or member-expression references so they resolve
    /// against the factory's bindings.
    fn element_type_expression(&self, name: &JSXElementName<'a>) -> Expression<'a> {
        match name {
            JSXElementName::Identifier(id) => {
                if id.name.chars().next().is_some_and(|c| c.is_uppercase()) {
                    self.ast.expression_identifier(SPAN, id.name.clone())
                } else {
                    let tag_atom = self.ast.allocator.alloc_str(&id.name);
                    self.ast.expression_string_literal(SPAN, tag_atom, None)
                }
            }
            JSXElementName::IdentifierReference(id) => {
                self.ast.expression_identifier(SPAN, id.name.clone())
            }
            JSXElementName::MemberExpression(me) => self.member_type_expression(me),
            JSXElementName::NamespacedName(ns) => {
                let ns_name = format!("{}:{}", ns.namespace.name, ns.name.name);
                let ns_atom = self.ast.allocator.alloc_str(&ns_name);
                self.ast.expression_string_literal(SPAN, ns_atom, None)
            }
            JSXElementName::ThisExpression(_) => self.ast.expression_this(SPAN),
        }
    }

    fn member_type_expression(&self, me: &JSXMemberExpression<'a>) -> Expression<'a> {
        let object = match &me.object {
            JSXMemberExpressionObject::IdentifierReference(id) => {
                self.ast.expression_identifier(SPAN, id.name.clone())
            }
            JSXMemberExpressionObject::MemberExpression(inner) => {
                self.member_type_expression(inner)
            }
            _ => self.ast.expression_this(SPAN),
        };
        Expression::from(self.ast.member_expression_static(
            SPAN,
            object,
            self.ast.identifier_name(SPAN, me.property.name.clone()),
            false,
        ))
    }

    fn lower_jsx_expression(&mut self, jsx_expr: &JSXExpression<'a>) -> Expression<'a> {
        if let Some(mut e) = jsx_expr
            .as_expression()
            .map(|e| e.clone_in(self.ast.allocator))
        {
            self.visit_expression(&mut e);
            e
        } else {
            self.ast.expression_identifier(SPAN, "undefined")
        }
    }

    fn property_key(&self, name: &str) -> PropertyKey<'a> {
        let atom = self.ast.allocator.alloc_str(name);
        if is_identifier_name(name) {
            PropertyKey::StaticIdentifier(self.ast.alloc(self.ast.identifier_name(SPAN, atom)))
        } else {
            // Names like `data-testid` or `xlink:href` need string keys.
            PropertyKey::StringLiteral(self.ast.alloc(self.ast.string_literal(SPAN, atom, None)))
        }
    }
}

fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl<'a> VisitMut<'a> for JsxLowerer<'a> {
    fn visit_expression(&mut self, expr: &mut Expression<'a>) {
        // TS expression wrappers are peeled off before lowering.
        if let Expression::TSAsExpression(as_expr) = expr {
            let inner = as_expr.expression.clone_in(self.ast.allocator);
            *expr = inner;
            self.visit_expression(expr);
            return;
        }
        if let Expression::TSNonNullExpression(nn_expr) = expr {
            let inner = nn_expr.expression.clone_in(self.ast.allocator);
            *expr = inner;
            self.visit_expression(expr);
            return;
        }
        if let Expression::TSSatisfiesExpression(sat_expr) = expr {
            let inner = sat_expr.expression.clone_in(self.ast.allocator);
            *expr = inner;
            self.visit_expression(expr);
            return;
        }

        match expr {
            Expression::JSXElement(element) => {
                let lowered = self.lower_jsx_element(element);
                *expr = lowered;
            }
            Expression::JSXFragment(fragment) => {
                let lowered = self.lower_jsx_fragment(fragment);
                *expr = lowered;
            }
            _ => {
                walk_expression(self, expr);
            }
        }
    }
}
