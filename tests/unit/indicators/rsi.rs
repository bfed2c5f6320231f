use tradeloop::indicators::momentum::{calculate_momentum, calculate_rsi, calculate_rsi_default};

#[test]
fn test_rsi_requires_period_plus_one_closes() {
    let closes: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
    assert_eq!(calculate_rsi(&closes, 14), None);
    assert!(calculate_rsi(&closes, 13).is_some());
    assert_eq!(calculate_rsi(&closes, 0), None);
}

#[test]
fn test_rsi_saturates_without_losses() {
    let rising: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
    assert_eq!(calculate_rsi_default(&rising), Some(100.0));

    let flat = vec![100.0; 15];
    assert_eq!(calculate_rsi_default(&flat), Some(100.0));
}

#[test]
fn test_rsi_is_zero_without_gains() {
    let falling: Vec<f64> = (0..15).map(|i| 100.0 - i as f64).collect();
    assert_eq!(calculate_rsi_default(&falling), Some(0.0));
}

#[test]
fn test_rsi_balanced_moves_is_fifty() {
    let closes: Vec<f64> = (0..15).map(|i| if i % 2 == 0 { 100.0 } else { 101.0 }).collect();
    let rsi = calculate_rsi_default(&closes).unwrap();
    assert!((rsi - 50.0).abs() < 1e-9);
}

#[test]
fn test_rsi_stays_in_bounds() {
    let closes = [
        44.3, 44.1, 44.6, 43.9, 44.2, 44.8, 45.1, 45.4, 45.8, 46.1, 45.9, 46.3, 46.0, 46.4, 46.2, 45.6,
        46.2, 46.8,
    ];
    let rsi = calculate_rsi_default(&closes).unwrap();
    assert!((0.0..=100.0).contains(&rsi));
}

#[test]
fn test_rsi_rejects_non_finite_window() {
    let mut closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
    closes[10] = f64::INFINITY;
    assert_eq!(calculate_rsi_default(&closes), None);
}

#[test]
fn test_momentum_is_fractional_change() {
    let closes = [100.0, 101.0, 102.0, 103.0, 104.0, 110.0];
    let momentum = calculate_momentum(&closes, 5).unwrap();
    assert!((momentum - 0.10).abs() < 1e-12);
    assert_eq!(calculate_momentum(&closes[1..], 5), None);
    assert_eq!(calculate_momentum(&[0.0, 1.0], 1), None);
}
