use tradeloop::indicators::trend::{
    kernel_estimate, kernel_regression_at, kernel_weight, KernelParams, KERNEL_WINDOW,
};

#[test]
fn test_kernel_estimate_is_deterministic() {
    let recent_first = [12.0, 11.5, 11.0, 10.2, 10.0, 9.8, 9.5];
    let a = kernel_estimate(&recent_first, KernelParams::BASELINE).unwrap();
    let b = kernel_estimate(&recent_first, KernelParams::BASELINE).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_short_window_returns_latest_price() {
    let recent_first = [12.0, 11.0, 10.0];
    assert_eq!(kernel_estimate(&recent_first, KernelParams::FAST), Some(12.0));
    assert_eq!(kernel_estimate(&[], KernelParams::FAST), None);
}

#[test]
fn test_flat_window_returns_the_price() {
    let flat = [42.0; KERNEL_WINDOW];
    assert_eq!(kernel_estimate(&flat, KernelParams::BASELINE), Some(42.0));
    assert_eq!(kernel_estimate(&flat, KernelParams::FAST), Some(42.0));
}

#[test]
fn test_only_six_most_recent_prices_count() {
    let mut a = vec![11.0, 10.0, 10.0, 10.0, 10.0, 10.0];
    let mut b = a.clone();
    a.push(1_000.0);
    b.push(-5.0);
    assert_eq!(
        kernel_estimate(&a, KernelParams::BASELINE),
        kernel_estimate(&b, KernelParams::BASELINE)
    );
}

#[test]
fn test_estimate_stays_within_window_range() {
    let recent_first = [11.0, 10.0, 10.0, 10.0, 10.0, 10.0];
    let fast = kernel_estimate(&recent_first, KernelParams::FAST).unwrap();
    let slow = kernel_estimate(&recent_first, KernelParams::BASELINE).unwrap();
    assert!(fast > 10.0 && fast < 11.0);
    assert!(slow > 10.0 && slow < 11.0);
    // The narrower bandwidth leans harder on the latest price.
    assert!(fast > slow);
}

#[test]
fn test_non_finite_price_gives_none() {
    let recent_first = [11.0, 10.0, f64::NAN, 10.0, 10.0, 10.0];
    assert_eq!(kernel_estimate(&recent_first, KernelParams::FAST), None);
}

#[test]
fn test_weight_decays_with_lag() {
    let w1 = kernel_weight(1, KernelParams::FAST);
    assert!((w1 - 0.6113).abs() < 1e-3);
    let w1_slow = kernel_weight(1, KernelParams::BASELINE);
    assert!((w1_slow - 0.9461).abs() < 1e-3);
}

#[test]
fn test_regression_at_reads_closes_oldest_first() {
    let closes = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0];
    let at_last = kernel_regression_at(&closes, 6, KernelParams::FAST).unwrap();
    let direct = kernel_estimate(&[11.0, 10.0, 10.0, 10.0, 10.0, 10.0], KernelParams::FAST).unwrap();
    assert_eq!(at_last, direct);
    assert_eq!(kernel_regression_at(&closes, 5, KernelParams::FAST), Some(10.0));
}
