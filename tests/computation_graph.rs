use std::f64::consts::PI;
use std::sync::Barrier;
use std::thread;

use approx::assert_abs_diff_eq;
use ndarray::array;
use rust_fad::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn identical_expressions_share_one_node() -> Result<()> {
    init_logger();
    let s = Session::new();
    let x = s.variable("x", 2.0)?;
    let y = s.variable("y", 5.0)?;

    let a = (&x + &y)?;
    let stored = s.count_nodes_stored();
    let computed = s.nodes_computed();
    let b = (&y + &x)?;

    assert!(Node::ptr_eq(&a, &b));
    assert_eq!(a.symbol(), "(x+y)");
    assert_eq!(s.count_nodes_stored(), stored);
    assert_eq!(s.nodes_computed(), computed);

    let p = (&x * &y)?;
    let q = (&y * &x)?;
    assert!(Node::ptr_eq(&p, &q));
    Ok(())
}

#[test]
fn non_commutative_operators_keep_order() -> Result<()> {
    let s = Session::new();
    let x = s.variable("x", 2.0)?;
    let y = s.variable("y", 5.0)?;
    assert_eq!((&y - &x)?.symbol(), "(y-x)");
    assert_eq!((&x - &y)?.symbol(), "(x-y)");
    assert_eq!((&y / &x)?.symbol(), "(y/x)");
    assert_eq!(y.try_pow(&x)?.symbol(), "(y**x)");
    assert_eq!(x.try_pow(&y)?.symbol(), "(x**y)");
    Ok(())
}

#[test]
fn overwrite_mode_recomputes_everything() -> Result<()> {
    let s = Session::new();
    let x = s.variable("x", 1.0)?;
    s.set_overwrite_mode(true);

    let a = x.sin()?;
    let b = x.sin()?;
    assert!(!Node::ptr_eq(&a, &b));
    assert_eq!(a, b);
    assert_eq!(s.count_nodes_stored(), 0);

    s.set_overwrite_mode(false);
    let c = x.sin()?;
    let d = x.sin()?;
    assert!(Node::ptr_eq(&c, &d));
    assert_eq!(s.count_nodes_stored(), 1);
    Ok(())
}

#[test]
fn sessions_are_independent() -> Result<()> {
    let s1 = Session::new();
    let s2 = Session::new();
    let x1 = s1.node("x", 1.0, 1.0)?;
    let x2 = s2.node("x", 2.0, 1.0)?;
    assert_eq!(x1.value(), 1.0);
    assert_eq!(x2.value(), 2.0);
    assert_eq!(x1.exp()?.value(), 1f64.exp());
    assert!(!s2.contains("exp(x)"));
    Ok(())
}

#[test]
fn mixing_sessions_does_not_pollute_the_cache() -> Result<()> {
    init_logger();
    let a = Session::new();
    let b = Session::new();
    let xa = a.node("x", 1.0, 1.0)?;
    let xb = b.node("x", 2.0, 1.0)?;

    assert_eq!(&xa + &xb, Err(ADError::SessionMismatch("x".into())));
    assert!(!a.contains("(x+x)"));
    assert!(!b.contains("(x+x)"));

    let twice = (&xa + &xa)?;
    assert_eq!(twice.value(), 2.0);
    assert_eq!(twice.derivative(), &Derivative::Scalar(2.0));
    Ok(())
}

#[test]
fn jacobian_of_two_functions() -> Result<()> {
    init_logger();
    let s = Session::new();
    let x1 = s.seeded_node("x1", PI, 1, vec![1.0, 0.0])?;
    let x2 = s.seeded_node("x2", PI / 2.0, 1, vec![0.0, 1.0])?;

    let f1 = ((&x1 * &x2)? + x1.sin()?)?;
    let f2 = (((&x1 + &x2)?) + (&x1 * &x2)?.sin()?)?;
    let f = VectorFunction::new(vec![f1, f2])?;

    assert_eq!(f.symbol(), "['((x1*x2)+sin(x1))' '((x1+x2)+sin((x1*x2)))']");

    let expected_value = array![
        PI * PI / 2.0 + PI.sin(),
        PI + PI / 2.0 + (PI * PI / 2.0).sin()
    ];
    for (got, want) in f.value().iter().zip(expected_value.iter()) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1e-10);
    }

    let c = (PI * PI / 2.0).cos();
    let expected_jacobian = array![
        [PI / 2.0 + PI.cos(), PI],
        [1.0 + PI / 2.0 * c, 1.0 + PI * c]
    ];
    let jacobian = f.jacobian()?;
    assert_eq!(jacobian.dim(), (2, 2));
    for (got, want) in jacobian.iter().zip(expected_jacobian.iter()) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1e-10);
    }
    Ok(())
}

#[test]
fn three_variable_gradient() -> Result<()> {
    let s = Session::new();
    let v = s.variables(&[("x1", PI / 2.0), ("x2", PI / 16.0), ("x3", 1f64.exp())])?;
    let f = (&v[0] + (&v[1] * &v[2])?)?;
    let grad = f.derivative().as_vector().unwrap();
    assert_abs_diff_eq!(grad[0], 1.0);
    assert_abs_diff_eq!(grad[1], 1f64.exp(), epsilon = 1e-12);
    assert_abs_diff_eq!(grad[2], PI / 16.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn concurrent_construction_publishes_one_instance() {
    let s = Session::new();
    let x = s.variable("x", 0.3).unwrap();
    let barrier = Barrier::new(8);

    let nodes: Vec<Node> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let (s, x, barrier) = (s.clone(), x.clone(), &barrier);
                scope.spawn(move || {
                    barrier.wait();
                    s.add(&x, s.sin(&x)?)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect()
    });

    for n in &nodes[1..] {
        assert!(Node::ptr_eq(&nodes[0], n));
    }
    assert!(Node::ptr_eq(&s.get("(sin(x)+x)").unwrap(), &nodes[0]));
    assert_eq!(s.count_nodes_stored(), 3);
}
