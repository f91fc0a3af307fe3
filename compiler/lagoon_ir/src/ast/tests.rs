use super::*;
use crate::Span;

#[test]
fn test_arena_ids_are_dense() {
    let mut arena = ExprArena::new();
    let a = arena.alloc_expr(Expr::new(ExprKind::Int(1), Span::new(0, 1)));
    let b = arena.alloc_expr(Expr::new(ExprKind::Int(2), Span::new(4, 5)));
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena.expr_count(), 2);
    assert_eq!(arena.expr(b).kind, ExprKind::Int(2));
}

#[test]
fn test_arena_statements() {
    let mut arena = ExprArena::new();
    let value = arena.alloc_expr(Expr::new(ExprKind::Int(3), Span::new(4, 5)));
    let stmt = arena.alloc_stmt(Stmt::new(
        StmtKind::Assign {
            target: Target::Name {
                name: "x".into(),
                span: Span::new(0, 1),
            },
            op: AssignOp::Assign,
            values: vec![value],
        },
        Span::new(0, 5),
    ));
    assert_eq!(arena.stmt_count(), 1);
    assert!(matches!(arena.stmt(stmt).kind, StmtKind::Assign { .. }));
}

#[test]
fn test_target_span_and_shape() {
    let target = Target::Tuple {
        elements: vec![
            Target::Name {
                name: "a".into(),
                span: Span::new(0, 1),
            },
            Target::Name {
                name: "b".into(),
                span: Span::new(3, 4),
            },
        ],
        span: Span::new(0, 4),
    };
    assert!(target.is_destructuring());
    assert_eq!(target.span(), Span::new(0, 4));
}

#[test]
fn test_compound_assign_ops() {
    assert_eq!(AssignOp::Assign.binary_op(), None);
    assert_eq!(AssignOp::Div.binary_op(), Some(BinaryOp::Div));
    assert_eq!(AssignOp::Mul.as_symbol(), "*=");
    assert!(BinaryOp::Isa.is_comparison());
    assert!(!BinaryOp::Pow.is_comparison());
}
