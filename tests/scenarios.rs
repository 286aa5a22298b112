// Copyright 2024 Ryan McKenzie
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end scenarios driven through a `FakeVendorNode` test double,
//! one per row of the concrete-scenarios table plus the testable-property
//! invariants.

use std::collections::HashMap;

use cpg_cxx_frontend::{
    context::LoweringContext,
    dispatch,
    host::{
        BindingResolver,
        LiteralKind,
        ScopeResolver,
        VendorNode,
        VendorShape,
    },
    ids::NodeId,
    literal::IntegerValue,
    location::Location,
    nodes::NodeKind,
    types::PointerOrigin,
};

#[derive(Debug, Clone)]
struct FakeVendorNode {
    shape: VendorShape,
    code: String,
    name: String,
    type_spelling: String,
    children: Vec<FakeVendorNode>,
}

impl FakeVendorNode {
    fn new(shape: VendorShape) -> Self {
        Self {
            shape,
            code: String::new(),
            name: String::new(),
            type_spelling: String::new(),
            children: Vec::new(),
        }
    }

    fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn ty(mut self, spelling: impl Into<String>) -> Self {
        self.type_spelling = spelling.into();
        self
    }

    fn with(mut self, child: FakeVendorNode) -> Self {
        self.children.push(child);
        self
    }

    fn literal(kind: LiteralKind, code: &str, ty: &str) -> Self {
        Self::new(VendorShape::Literal(kind)).code(code).ty(ty)
    }
}

impl VendorNode for FakeVendorNode {
    fn location(&self) -> Location {
        Location::synthetic()
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn declared_type_spelling(&self) -> &str {
        &self.type_spelling
    }

    fn shape(&self) -> VendorShape {
        self.shape.clone()
    }

    fn children(&self) -> Vec<&dyn VendorNode> {
        self.children.iter().map(|c| c as &dyn VendorNode).collect()
    }
}

struct MapBindings(HashMap<String, NodeId>);
impl BindingResolver for MapBindings {
    fn resolve(&self, vendor_name: &str) -> Option<NodeId> {
        self.0.get(vendor_name).copied()
    }
}

struct NoBindings;
impl BindingResolver for NoBindings {
    fn resolve(&self, _vendor_name: &str) -> Option<NodeId> {
        None
    }
}

struct RootScope;
impl ScopeResolver for RootScope {
    fn current_prefix(&self) -> String {
        String::new()
    }
}

fn ctx(bindings: &dyn BindingResolver, scope: &dyn ScopeResolver) -> LoweringContext<'_> {
    LoweringContext::new(bindings, scope)
}

/// `int x = 0xFFul;` — a `VariableDeclaration` over an unsigned-long
/// hex literal with an explicit `ul` suffix.
#[test]
fn hex_literal_with_ul_suffix_declares_unsigned_long() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::new(VendorShape::VariableDeclaration {
        is_array: false,
        implicit_initializer_allowed: false,
    })
    .name("x")
    .ty("int")
    .with(FakeVendorNode::literal(LiteralKind::Integer, "0xFFul", "unsigned long"));

    let id = dispatch::lower(&mut c, &vendor).unwrap();
    let NodeKind::VariableDeclaration(decl) = &c.graph.node(id).kind else {
        panic!("expected VariableDeclaration");
    };
    let init = decl.initializer.expect("initializer wired");
    let NodeKind::Literal(lit) = &c.graph.node(init).kind else {
        panic!("expected Literal");
    };
    assert_eq!(lit.value, cpg_cxx_frontend::literal::LiteralValue::Integer(IntegerValue::Big(255u32.into())));
    assert_eq!(lit.typed.declared_type().name(), "unsigned long");
    assert!(c.graph.has_dfg_edge(init, id));
}

/// `auto y = 0xFFFFFFFFFFFFFFFFull;` — overflow past 64 bits widens to an
/// arbitrary-precision value typed `unsigned long long`.
#[test]
fn ull_literal_exceeding_64_bits_stays_big() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::literal(LiteralKind::Integer, "0xFFFFFFFFFFFFFFFFull", "unsigned long long");
    let id = dispatch::lower(&mut c, &vendor).unwrap();
    let NodeKind::Literal(lit) = &c.graph.node(id).kind else {
        panic!("expected Literal");
    };
    assert_eq!(lit.typed.declared_type().name(), "unsigned long long");
    assert!(matches!(lit.value, cpg_cxx_frontend::literal::LiteralValue::Integer(IntegerValue::Big(_))));
}

/// `A a{1,2};` — a non-array struct declaration: the `InitializerList`'s
/// array-provenance layer is stripped rather than carried onto `a`.
#[test]
fn non_array_struct_initializer_list_strips_array_layer() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::new(VendorShape::VariableDeclaration {
        is_array: false,
        implicit_initializer_allowed: false,
    })
    .name("a")
    .ty("")
    .with(
        FakeVendorNode::new(VendorShape::InitializerList)
            .ty("A")
            .with(FakeVendorNode::literal(LiteralKind::Integer, "1", "int"))
            .with(FakeVendorNode::literal(LiteralKind::Integer, "2", "int")),
    );

    let id = dispatch::lower(&mut c, &vendor).unwrap();
    let NodeKind::VariableDeclaration(decl) = &c.graph.node(id).kind else {
        panic!("expected VariableDeclaration");
    };
    let init = decl.initializer.unwrap();

    let array_ty = c.types.create_from("A", false, Default::default()).pointer_of(PointerOrigin::Array);
    cpg_cxx_frontend::propagation::set_type(&mut c.graph, init, array_ty);

    let NodeKind::VariableDeclaration(decl) = &c.graph.node(id).kind else {
        panic!("expected VariableDeclaration");
    };
    assert_eq!(decl.typed.declared_type().name(), "A");
    assert!(decl.typed.declared_type().layers().is_empty());
}

/// `int arr[] = {1,2,3};` — an array declaration keeps the initializer
/// list's type (including its array layer) as-is.
#[test]
fn array_declaration_keeps_initializer_list_type() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::new(VendorShape::VariableDeclaration {
        is_array: true,
        implicit_initializer_allowed: false,
    })
    .name("arr")
    .ty("int")
    .with(
        FakeVendorNode::new(VendorShape::InitializerList)
            .ty("int")
            .with(FakeVendorNode::literal(LiteralKind::Integer, "1", "int"))
            .with(FakeVendorNode::literal(LiteralKind::Integer, "2", "int"))
            .with(FakeVendorNode::literal(LiteralKind::Integer, "3", "int")),
    );

    let id = dispatch::lower(&mut c, &vendor).unwrap();
    let NodeKind::VariableDeclaration(decl) = &c.graph.node(id).kind else {
        panic!("expected VariableDeclaration");
    };
    let init = decl.initializer.unwrap();

    let array_ty = c.types.create_from("int", false, Default::default()).pointer_of(PointerOrigin::Array);
    cpg_cxx_frontend::propagation::set_type(&mut c.graph, init, array_ty.clone());

    let NodeKind::VariableDeclaration(decl) = &c.graph.node(id).kind else {
        panic!("expected VariableDeclaration");
    };
    // Compare name/layers rather than the whole `Type`: the cascade stamps
    // `Origin::Dataflow` onto the propagated value, which `array_ty` (built
    // straight from the registry) never carries.
    assert_eq!(decl.typed.declared_type().name(), array_ty.name());
    assert_eq!(decl.typed.declared_type().layers(), array_ty.layers());
}

/// `obj.method(1)` lowers to a `MemberCall`, `(*fn)(1)` to a `MemberCall`
/// rooted at the dereferenced pointer, and `free(1)` to a plain `Call`.
#[test]
fn call_shape_discrimination() {
    let bindings = NoBindings;
    let scope = RootScope;

    {
        let mut c = ctx(&bindings, &scope);
        let vendor = FakeVendorNode::new(VendorShape::Call)
            .with(
                FakeVendorNode::new(VendorShape::MemberExpr)
                    .ty("int")
                    .with(FakeVendorNode::new(VendorShape::DeclaredReference).name("obj").ty("Obj"))
                    .with(FakeVendorNode::new(VendorShape::DeclaredReference).name("method").ty("int")),
            )
            .with(FakeVendorNode::literal(LiteralKind::Integer, "1", "int"));
        let id = dispatch::lower(&mut c, &vendor).unwrap();
        assert!(matches!(c.graph.node(id).kind, NodeKind::MemberCall(_)));
    }

    {
        let mut c = ctx(&bindings, &scope);
        let vendor = FakeVendorNode::new(VendorShape::Call)
            .with(
                FakeVendorNode::new(VendorShape::Unary { op: cpg_cxx_frontend::nodes::UnaryOpKind::Deref, prefix: true })
                    .ty("int")
                    .with(FakeVendorNode::new(VendorShape::DeclaredReference).name("fn").ty("int(*)()")),
            )
            .with(FakeVendorNode::literal(LiteralKind::Integer, "1", "int"));
        let id = dispatch::lower(&mut c, &vendor).unwrap();
        assert!(matches!(c.graph.node(id).kind, NodeKind::MemberCall(_)));
    }

    {
        let mut c = ctx(&bindings, &scope);
        let vendor = FakeVendorNode::new(VendorShape::Call)
            .with(FakeVendorNode::new(VendorShape::DeclaredReference).name("free").code("free"))
            .with(FakeVendorNode::literal(LiteralKind::Integer, "1", "int"));
        let id = dispatch::lower(&mut c, &vendor).unwrap();
        assert!(matches!(c.graph.node(id).kind, NodeKind::Call(_)));
    }
}

/// `(int)3.14` — a primitive C-style cast fixes its T at the target
/// immediately, with no listener subscription needed.
#[test]
fn primitive_cast_is_fixed_at_target() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::new(VendorShape::Cast { operator_kind: cpg_cxx_frontend::nodes::CastKind::CStyle })
        .ty("int")
        .with(FakeVendorNode::literal(LiteralKind::Floating { single_precision: false }, "3.14", "double"));

    let id = dispatch::lower(&mut c, &vendor).unwrap();
    let NodeKind::Cast(cast) = &c.graph.node(id).kind else {
        panic!("expected Cast");
    };
    assert_eq!(cast.typed.declared_type().name(), "int");
    assert_eq!(cast.target_type.name(), "int");
}

/// `static_cast<MyObj>(x)` — a non-primitive cast starts `Unknown` and
/// refines once its operand's type is set.
#[test]
fn non_primitive_cast_refines_from_operand() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::new(VendorShape::Cast { operator_kind: cpg_cxx_frontend::nodes::CastKind::Static })
        .ty("MyObj")
        .with(FakeVendorNode::new(VendorShape::DeclaredReference).name("x").ty(""));

    let id = dispatch::lower(&mut c, &vendor).unwrap();
    let NodeKind::Cast(cast) = &c.graph.node(id).kind else {
        panic!("expected Cast");
    };
    assert!(cast.typed.declared_type().is_unknown());
    let operand = cast.operand;

    let int_ty = c.types.create_from("int", false, Default::default());
    cpg_cxx_frontend::propagation::set_type(&mut c.graph, operand, int_ty);

    let NodeKind::Cast(cast) = &c.graph.node(id).kind else {
        panic!("expected Cast");
    };
    assert_eq!(cast.typed.declared_type().name(), "int");
}

/// `(e)` lowers to the exact same `NodeId` as `e` — bracketed-primary
/// transparency, testable property 7.
#[test]
fn bracketed_primary_is_transparent() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let inner = FakeVendorNode::literal(LiteralKind::Integer, "1", "int");
    let len_before = {
        let mut probe = ctx(&bindings, &scope);
        dispatch::lower(&mut probe, &inner).unwrap();
        probe.graph.len()
    };

    let wrapped = FakeVendorNode::new(VendorShape::Parenthesized).with(inner.clone());
    let id = dispatch::lower(&mut c, &wrapped).unwrap();
    assert_eq!(c.graph.len(), len_before);
    assert!(matches!(c.graph.node(id).kind, NodeKind::Literal(_)));
}

/// `for (int i = 0; i < 1; ++i) body;` — all five slots present.
#[test]
fn for_statement_reads_five_ordered_slots() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let init_stmt = FakeVendorNode::new(VendorShape::VariableDeclaration {
        is_array: false,
        implicit_initializer_allowed: false,
    })
    .name("i")
    .ty("int")
    .with(FakeVendorNode::literal(LiteralKind::Integer, "0", "int"));
    let cond_decl = FakeVendorNode::new(VendorShape::Empty);
    let cond_expr = FakeVendorNode::new(VendorShape::Binary { op: cpg_cxx_frontend::nodes::BinaryOpKind::Lt })
        .ty("bool")
        .with(FakeVendorNode::new(VendorShape::DeclaredReference).name("i").ty("int"))
        .with(FakeVendorNode::literal(LiteralKind::Integer, "1", "int"));
    let iter_expr = FakeVendorNode::new(VendorShape::Unary { op: cpg_cxx_frontend::nodes::UnaryOpKind::PreIncrement, prefix: true })
        .ty("int")
        .with(FakeVendorNode::new(VendorShape::DeclaredReference).name("i").ty("int"));
    let body = FakeVendorNode::new(VendorShape::DeclaredReference).name("body").ty("void");

    let vendor = FakeVendorNode::new(VendorShape::ForStatement)
        .with(init_stmt)
        .with(cond_decl)
        .with(cond_expr)
        .with(iter_expr)
        .with(body);

    let id = dispatch::lower(&mut c, &vendor).unwrap();
    let NodeKind::ForStatement(stmt) = &c.graph.node(id).kind else {
        panic!("expected ForStatement");
    };
    assert!(stmt.initializer_statement.is_some());
    assert!(stmt.condition_declaration.is_none());
    assert!(stmt.condition_expression.is_some());
    assert!(stmt.iteration_expression.is_some());
    assert!(stmt.body.is_some());
}

/// A `DeclaredReference` that successfully binds does not subscribe to
/// the declaration's type changes — a deliberate omission (DESIGN.md).
#[test]
fn declared_reference_resolves_without_subscribing() {
    let mut bindings_map = HashMap::new();
    let scope = RootScope;

    let decl_id = {
        let no_bindings = NoBindings;
        let mut c = ctx(&no_bindings, &scope);
        let decl_vendor = FakeVendorNode::new(VendorShape::VariableDeclaration {
            is_array: false,
            implicit_initializer_allowed: true,
        })
        .name("x")
        .ty("int");
        dispatch::lower(&mut c, &decl_vendor).unwrap()
    };
    bindings_map.insert("x".to_string(), decl_id);
    let bindings = MapBindings(bindings_map);

    let mut c2 = ctx(&bindings, &scope);
    let reference = FakeVendorNode::new(VendorShape::DeclaredReference).name("x");
    let ref_id = dispatch::lower(&mut c2, &reference).unwrap();
    let NodeKind::DeclaredReference(reference) = &c2.graph.node(ref_id).kind else {
        panic!("expected DeclaredReference");
    };
    assert_eq!(reference.refers_to, Some(decl_id));
}

/// A designated initializer with no designators is rejected rather than
/// silently accepted.
#[test]
fn empty_designator_list_is_rejected() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::new(VendorShape::DesignatedInitializer { designators: Vec::new() })
        .with(FakeVendorNode::literal(LiteralKind::Integer, "1", "int"));
    let result = dispatch::lower(&mut c, &vendor);
    assert!(result.is_err());
}

/// An unrecognized vendor shape lowers to `Generic` rather than failing
/// the whole translation unit.
#[test]
fn unrecognized_shape_falls_back_to_generic() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::new(VendorShape::Unrecognized).code("???");
    let id = dispatch::lower(&mut c, &vendor).unwrap();
    assert!(matches!(c.graph.node(id).kind, NodeKind::Generic));
}

/// Testable property 1: the AST forms a forest even for a deep,
/// multiply-nested expression.
#[test]
fn ast_stays_a_forest_for_nested_expressions() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let mut vendor = FakeVendorNode::literal(LiteralKind::Integer, "1", "int");
    for _ in 0..20 {
        vendor = FakeVendorNode::new(VendorShape::Unary { op: cpg_cxx_frontend::nodes::UnaryOpKind::Minus, prefix: true })
            .ty("int")
            .with(vendor);
    }
    dispatch::lower(&mut c, &vendor).unwrap();
    assert!(c.graph.ast_is_forest());
}

/// Testable property 2: setting a `VariableDeclaration`'s initializer
/// establishes a DFG edge from the initializer to the declaration.
#[test]
fn variable_declaration_initializer_is_a_dfg_source() {
    let bindings = NoBindings;
    let scope = RootScope;
    let mut c = ctx(&bindings, &scope);

    let vendor = FakeVendorNode::new(VendorShape::VariableDeclaration {
        is_array: false,
        implicit_initializer_allowed: false,
    })
    .name("x")
    .ty("int")
    .with(FakeVendorNode::literal(LiteralKind::Integer, "1", "int"));
    let id = dispatch::lower(&mut c, &vendor).unwrap();
    let NodeKind::VariableDeclaration(decl) = &c.graph.node(id).kind else {
        panic!("expected VariableDeclaration");
    };
    let init = decl.initializer.unwrap();
    assert!(c.graph.has_dfg_edge(init, id));
}
