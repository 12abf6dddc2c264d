//! Tests for settings files.

use std::io::Write;

use qtevo_varqte::settings::env;
use qtevo_varqte::{ConfigError, EvolutionSettings, GradMethod, QfiMethod, Regularization};

#[test]
fn full_file_roundtrips_through_yaml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "evolution:\n  qfi_method: overlap_diag\n  grad_method: fin_diff\n  regularization: perturb_diag\nnum_time_steps: 64\nlogging:\n  level: debug\n  format: json"
    )
    .unwrap();

    let settings = EvolutionSettings::from_file(file.path()).unwrap();
    assert_eq!(settings.evolution.qfi_method, QfiMethod::OverlapDiag);
    assert_eq!(settings.evolution.grad_method, GradMethod::FinDiff);
    assert_eq!(settings.evolution.regularization, Regularization::PerturbDiag);
    assert_eq!(settings.num_time_steps, 64);
    assert_eq!(settings.logging.level, "debug");
    assert_eq!(settings.logging.format, "json");

    let yaml = serde_yaml_ng::to_string(&settings).unwrap();
    assert_eq!(EvolutionSettings::from_yaml(&yaml).unwrap(), settings);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EvolutionSettings::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn custom_tags_survive_file_and_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "evolution:\n  regularization: my_tikhonov").unwrap();

    let settings = EvolutionSettings::from_file(file.path())
        .unwrap()
        .merge_vars([(env::GRAD_METHOD, "spsa")])
        .unwrap();
    assert_eq!(
        settings.evolution.regularization,
        Regularization::Custom("my_tikhonov".to_string())
    );
    assert_eq!(
        settings.evolution.grad_method,
        GradMethod::Custom("spsa".to_string())
    );
}

#[test]
fn env_override_can_invalidate_settings() {
    let settings = EvolutionSettings::default()
        .merge_vars([(env::LOG_FORMAT, "xml")])
        .unwrap();
    assert!(settings.validate().is_err());
}
