#![no_main]

use cpg_cxx_frontend::{
    context::LoweringContext,
    dispatch,
    host::{
        BindingResolver,
        LiteralKind,
        ScopeResolver,
        VendorDesignator,
        VendorNode,
        VendorShape,
    },
    ids::NodeId,
    location::Location,
    nodes::{
        BinaryOpKind,
        CastKind,
        TypeIdOperator,
        UnaryOpKind,
    },
};
use libfuzzer_sys::fuzz_target;

/// A synthetic vendor node built directly from the fuzzer's input bytes,
/// generalizing the teacher's `basic.rs` (which hands raw bytes straight to
/// `demangle`) to a tree shape the dispatcher can walk.
#[derive(Debug)]
struct FuzzNode {
    shape: VendorShape,
    children: Vec<FuzzNode>,
    type_spelling: &'static str,
}

impl VendorNode for FuzzNode {
    fn location(&self) -> Location {
        Location::synthetic()
    }

    fn code(&self) -> &str {
        "42"
    }

    fn name(&self) -> &str {
        "fuzz"
    }

    fn declared_type_spelling(&self) -> &str {
        self.type_spelling
    }

    fn shape(&self) -> VendorShape {
        self.shape.clone()
    }

    fn children(&self) -> Vec<&dyn VendorNode> {
        self.children.iter().map(|c| c as &dyn VendorNode).collect()
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

/// Consumes bytes to build a small tree, capping depth so the fuzzer can't
/// force unbounded recursion.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn byte(&mut self) -> u8 {
        let b = self.data.get(self.pos).copied().unwrap_or(0);
        self.pos += 1;
        b
    }

    fn leaf(&mut self) -> FuzzNode {
        FuzzNode {
            shape: VendorShape::Literal(LiteralKind::Integer),
            children: Vec::new(),
            type_spelling: "int",
        }
    }

    fn node(&mut self, depth: u8) -> FuzzNode {
        if depth == 0 {
            return self.leaf();
        }
        match self.byte() % 14 {
            0 => self.leaf(),
            1 => FuzzNode {
                shape: VendorShape::Unary { op: UnaryOpKind::Minus, prefix: true },
                children: vec![self.node(depth - 1)],
                type_spelling: "int",
            },
            2 => FuzzNode {
                shape: VendorShape::Binary { op: BinaryOpKind::Add },
                children: vec![self.node(depth - 1), self.node(depth - 1)],
                type_spelling: "int",
            },
            3 => FuzzNode {
                shape: VendorShape::Conditional,
                children: vec![self.node(depth - 1), self.node(depth - 1), self.node(depth - 1)],
                type_spelling: "int",
            },
            4 => FuzzNode {
                shape: VendorShape::Cast { operator_kind: CastKind::CStyle },
                children: vec![self.node(depth - 1)],
                type_spelling: "int",
            },
            5 => FuzzNode {
                shape: VendorShape::Call,
                children: vec![self.leaf(), self.node(depth - 1)],
                type_spelling: "int",
            },
            6 => FuzzNode {
                shape: VendorShape::New,
                children: if self.byte() % 2 == 0 { vec![self.node(depth - 1)] } else { Vec::new() },
                type_spelling: "MyObj",
            },
            7 => FuzzNode {
                shape: VendorShape::Delete,
                children: vec![self.node(depth - 1)],
                type_spelling: "void",
            },
            8 => FuzzNode {
                shape: VendorShape::InitializerList,
                children: vec![self.node(depth - 1), self.node(depth - 1)],
                type_spelling: "int*",
            },
            9 => FuzzNode {
                shape: VendorShape::DesignatedInitializer { designators: vec![VendorDesignator::Index(0)] },
                children: vec![self.node(depth - 1), self.node(depth - 1)],
                type_spelling: "int",
            },
            10 => FuzzNode {
                shape: VendorShape::TypeIdExpr { operator: TypeIdOperator::SizeOf },
                children: Vec::new(),
                type_spelling: "int",
            },
            11 => FuzzNode {
                shape: VendorShape::DeclaredReference,
                children: Vec::new(),
                type_spelling: "int",
            },
            12 => FuzzNode {
                shape: VendorShape::ArraySubscript,
                children: vec![self.node(depth - 1), self.node(depth - 1)],
                type_spelling: "int",
            },
            _ => FuzzNode {
                shape: VendorShape::VariableDeclaration { is_array: false, implicit_initializer_allowed: true },
                children: vec![self.node(depth - 1)],
                type_spelling: "int",
            },
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor { data, pos: 0 };
    let root = cursor.node(5);
    let bindings = NoBindings;
    let scope = RootScope;
    let mut ctx = LoweringContext::new(&bindings, &scope);
    let _ = dispatch::lower(&mut ctx, &root);
});
