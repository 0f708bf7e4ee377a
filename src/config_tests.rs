use crate::application::ml::forecaster::InitialEstimate;
use crate::config::Config;
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const KEYS: &[&str] = &[
    "GENERATOR_ROWS",
    "BOOST_ROUNDS",
    "BOOST_INITIAL_ESTIMATE",
    "SUPPLY_CHAIN_TIERS",
    "PER_TIER_AMPLIFICATION",
    "HIGH_RISK_THRESHOLD",
    "LEDGER_TIMEOUT_MS",
];

fn clear_keys() {
    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_keys();

    let config = Config::from_env().unwrap();

    assert_eq!(config.generator.rows, 5000);
    assert_eq!(config.forecaster.boosting.n_rounds, 200);
    assert_eq!(config.forecaster.boosting.max_depth, 5);
    assert!((config.forecaster.boosting.learning_rate - 0.05).abs() < 1e-12);
    assert_eq!(config.risk.policy.tiers, 4);
    assert!((config.risk.policy.per_tier_amplification - 1.15).abs() < 1e-12);
    assert!((config.risk.policy.high_risk_threshold - 1.2).abs() < 1e-12);
    assert_eq!(config.ledger.timeout.as_millis(), 5000);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_keys();
    unsafe {
        env::set_var("GENERATOR_ROWS", "1200");
        env::set_var("BOOST_INITIAL_ESTIMATE", "mean");
        env::set_var("SUPPLY_CHAIN_TIERS", "3");
        env::set_var("HIGH_RISK_THRESHOLD", "1.5");
    }

    let config = Config::from_env().unwrap();

    assert_eq!(config.generator.rows, 1200);
    assert_eq!(
        config.forecaster.boosting.initial_estimate,
        InitialEstimate::Mean
    );
    assert_eq!(config.risk.policy.tiers, 3);
    assert!((config.risk.policy.high_risk_threshold - 1.5).abs() < 1e-12);

    // Cleanup
    clear_keys();
}

#[test]
fn test_config_rejects_garbage() {
    let _guard = get_env_lock().lock().unwrap();
    clear_keys();
    unsafe {
        env::set_var("BOOST_ROUNDS", "lots");
    }

    let err = Config::from_env().unwrap_err();
    assert!(format!("{:#}", err).contains("BOOST_ROUNDS"));

    clear_keys();
}

#[test]
fn test_config_rejects_invalid_policy() {
    let _guard = get_env_lock().lock().unwrap();
    clear_keys();
    unsafe {
        env::set_var("PER_TIER_AMPLIFICATION", "-1.0");
    }

    assert!(Config::from_env().is_err());

    clear_keys();
}
