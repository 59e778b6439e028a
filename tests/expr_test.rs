//! Evaluation, rendering and traversal behavior of expression trees

use std::collections::HashMap;

use rstest::{fixture, rstest};

use exprtree::domain::traversal::format_tokens;
use exprtree::util::testing;
use exprtree::{DivisionMode, Expr, ExprError, Operator, Order, Sample, Token};

#[fixture]
fn classic() -> Expr {
    testing::init_test_setup();
    Sample::Classic.build()
}

fn joined(expr: &Expr, order: Order) -> String {
    format_tokens(&expr.tokens(order), " ")
}

/// Trees of different shapes; operand values are distinct so positions can be
/// identified in token sequences.
fn shapes() -> Vec<Expr> {
    vec![
        Expr::leaf(1),
        Expr::add(Expr::leaf(1), Expr::leaf(2)),
        Sample::Classic.build(),
        // left spine
        Expr::mul(
            Expr::sub(Expr::div(Expr::leaf(81), Expr::leaf(3)), Expr::leaf(4)),
            Expr::leaf(5),
        ),
        // right spine
        Expr::add(
            Expr::leaf(6),
            Expr::mul(Expr::leaf(7), Expr::sub(Expr::leaf(8), Expr::leaf(9))),
        ),
    ]
}

// ============================================================
// Classic expression: ((4 + 3) * (10 - 5)) / 2
// ============================================================

#[rstest]
fn given_classic_tree_when_rendering_then_every_operator_is_parenthesized(classic: Expr) {
    assert_eq!(classic.to_string(), "(((4 + 3) * (10 - 5)) / 2)");
}

#[rstest]
fn given_classic_tree_when_evaluating_then_returns_seventeen(classic: Expr) {
    assert_eq!(classic.evaluate(), Ok(17));
    assert_eq!(classic.evaluate_with(DivisionMode::Floor), Ok(17));
}

#[rstest]
#[case(Order::PreOrder, "/ * + 4 3 - 10 5 2")]
#[case(Order::InOrder, "4 + 3 * 10 - 5 / 2")]
#[case(Order::PostOrder, "4 3 + 10 5 - * 2 /")]
#[case(Order::LevelOrder, "/ * 2 + - 4 3 10 5")]
fn given_classic_tree_when_traversing_then_emits_expected_sequence(
    classic: Expr,
    #[case] order: Order,
    #[case] expected: &str,
) {
    assert_eq!(joined(&classic, order), expected);
}

#[rstest]
fn given_classic_tree_when_built_from_symbols_then_equals_typed_construction(classic: Expr) {
    let built = Expr::from_symbol(
        "/",
        Expr::from_symbol(
            "*",
            Expr::from_symbol("+", Expr::leaf(4), Expr::leaf(3)).unwrap(),
            Expr::from_symbol("-", Expr::leaf(10), Expr::leaf(5)).unwrap(),
        )
        .unwrap(),
        Expr::leaf(2),
    )
    .unwrap();
    assert_eq!(built, classic);
}

// ============================================================
// Single leaf
// ============================================================

#[rstest]
#[case(Order::PreOrder)]
#[case(Order::InOrder)]
#[case(Order::PostOrder)]
#[case(Order::LevelOrder)]
fn given_single_leaf_when_traversing_then_emits_only_its_value(#[case] order: Order) {
    let leaf = Expr::leaf(5);
    assert_eq!(leaf.tokens(order), vec![Token::Operand(5)]);
    assert_eq!(leaf.to_string(), "5");
    assert_eq!(leaf.evaluate(), Ok(5));
    assert!(!leaf.is_operator());
}

// ============================================================
// Errors
// ============================================================

#[test]
fn given_division_by_zero_when_evaluating_then_error_not_value() {
    let expr = Sample::DivByZero.build();
    assert_eq!(expr.to_string(), "(1 / 0)");
    let err = expr.evaluate().unwrap_err();
    assert_eq!(err, ExprError::DivisionByZero { dividend: 1 });
    assert_eq!(err.to_string(), "division by zero: 1 / 0");
}

#[test]
fn given_division_by_zero_deep_in_tree_when_evaluating_then_error_propagates() {
    let expr = Expr::add(
        Expr::leaf(1),
        Expr::mul(Expr::leaf(2), Expr::div(Expr::leaf(3), Expr::leaf(0))),
    );
    assert!(matches!(
        expr.evaluate(),
        Err(ExprError::DivisionByZero { dividend: 3 })
    ));
}

#[rstest]
#[case(Expr::add(Expr::leaf(i64::MAX), Expr::leaf(1)), Operator::Add)]
#[case(Expr::sub(Expr::leaf(i64::MIN), Expr::leaf(1)), Operator::Subtract)]
#[case(Expr::mul(Expr::leaf(i64::MAX), Expr::leaf(2)), Operator::Multiply)]
#[case(Expr::div(Expr::leaf(i64::MIN), Expr::leaf(-1)), Operator::Divide)]
fn given_out_of_range_result_when_evaluating_then_overflow(
    #[case] expr: Expr,
    #[case] op: Operator,
) {
    match expr.evaluate() {
        Err(ExprError::Overflow { op: failed, .. }) => assert_eq!(failed, op),
        other => panic!("expected overflow, got {:?}", other),
    }
}

#[rstest]
#[case("%")]
#[case("^")]
#[case("")]
#[case("+-")]
fn given_unknown_operator_symbol_when_building_then_invalid_node(#[case] symbol: &str) {
    let result = Expr::from_symbol(symbol, Expr::leaf(1), Expr::leaf(2));
    assert!(matches!(result, Err(ExprError::InvalidNode(_))));
}

// ============================================================
// Properties over several shapes
// ============================================================

#[test]
fn given_any_tree_when_evaluating_or_rendering_twice_then_identical() {
    for expr in shapes() {
        assert_eq!(expr.evaluate(), expr.evaluate());
        assert_eq!(expr.to_string(), expr.to_string());
    }
}

fn check_depth_first(expr: &Expr) {
    let node = Token::of(expr);
    if let Some((left, right)) = expr.children() {
        let (l_pre, r_pre) = (left.tokens(Order::PreOrder), right.tokens(Order::PreOrder));
        let mut pre = vec![node];
        pre.extend(l_pre.iter().copied());
        pre.extend(r_pre.iter().copied());
        assert_eq!(expr.tokens(Order::PreOrder), pre, "preorder of {expr}");

        let mut ino = left.tokens(Order::InOrder);
        ino.push(node);
        ino.extend(right.tokens(Order::InOrder));
        assert_eq!(expr.tokens(Order::InOrder), ino, "inorder of {expr}");

        let mut post = left.tokens(Order::PostOrder);
        post.extend(right.tokens(Order::PostOrder));
        post.push(node);
        assert_eq!(expr.tokens(Order::PostOrder), post, "postorder of {expr}");

        check_depth_first(left);
        check_depth_first(right);
    }
}

#[test]
fn given_any_operator_node_when_walking_depth_first_then_node_placed_relative_to_subtrees() {
    for expr in shapes() {
        check_depth_first(&expr);
    }
}

fn operand_depths(expr: &Expr, depth: usize, depths: &mut HashMap<i64, usize>) {
    match expr.children() {
        None => {
            if let Token::Operand(value) = Token::of(expr) {
                depths.insert(value, depth);
            }
        }
        Some((left, right)) => {
            operand_depths(left, depth + 1, depths);
            operand_depths(right, depth + 1, depths);
        }
    }
}

#[test]
fn given_any_tree_when_walking_level_order_then_operand_depths_never_decrease() {
    for expr in shapes() {
        let mut depths = HashMap::new();
        operand_depths(&expr, 0, &mut depths);

        let seen: Vec<usize> = expr
            .tokens(Order::LevelOrder)
            .into_iter()
            .filter_map(|token| match token {
                Token::Operand(value) => depths.get(&value).copied(),
                Token::Operator(_) => None,
            })
            .collect();
        assert!(
            seen.windows(2).all(|w| w[0] <= w[1]),
            "level order of {expr} visited depths {seen:?}"
        );
        assert_eq!(expr.tokens(Order::LevelOrder).len(), expr.node_count());
    }
}

#[test]
fn given_any_tree_when_iterating_lazily_then_matches_visitor_walks() {
    for expr in shapes() {
        assert_eq!(expr.iter_pre_order().collect::<Vec<_>>(), expr.pre_order_tokens());
        assert_eq!(expr.iter_in_order().collect::<Vec<_>>(), expr.in_order_tokens());
        assert_eq!(expr.iter_post_order().collect::<Vec<_>>(), expr.post_order_tokens());
        assert_eq!(expr.iter_level_order().collect::<Vec<_>>(), expr.level_order_tokens());
    }
}

#[test]
fn given_closure_visitor_when_traversing_then_receives_same_sequence_as_collector() {
    let expr = Sample::Classic.build();
    let mut printed = String::new();
    expr.traverse(Order::PostOrder, &mut |token: Token| {
        printed.push_str(&token.to_string());
        printed.push(' ');
    });
    assert_eq!(printed.trim_end(), joined(&expr, Order::PostOrder));
}

#[test]
fn given_inorder_tokens_when_compared_to_rendering_then_same_without_parentheses() {
    let expr = Sample::Classic.build();
    let stripped: String = expr
        .to_string()
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect();
    assert_eq!(stripped, joined(&expr, Order::InOrder));
}
