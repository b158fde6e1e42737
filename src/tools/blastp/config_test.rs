use crate::tools::blastp::*;
use crate::tools::{ConfigError, LAUNCHER_ENV, RuntimeEnv};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

const VARS: [&str; 5] = [
    DB_PATH_ENV,
    MM_ENV_ENV,
    OUTPUT_PATH_ENV,
    AUTO_UPDATE_ENV,
    LAUNCHER_ENV,
];

fn clear_env() {
    for var in VARS {
        unsafe {
            env::remove_var(var);
        }
    }
}

#[test]
#[serial]
fn test_from_env_requires_db_path() {
    clear_env();

    let err = BlastpConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingDbPath));
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    unsafe {
        env::set_var(DB_PATH_ENV, "/data/blast_db");
    }

    let config = BlastpConfig::from_env().unwrap();

    assert_eq!(config.db_path, PathBuf::from("/data/blast_db"));
    assert_eq!(config.output_dir, PathBuf::from("blast_output"));
    assert_eq!(config.env, RuntimeEnv::micromamba("blast"));
    assert!(!config.auto_update);

    clear_env();
}

#[test]
#[serial]
fn test_from_env_reads_overrides() {
    clear_env();
    unsafe {
        env::set_var(DB_PATH_ENV, "/data/blast_db");
        env::set_var(MM_ENV_ENV, "blast-2.16");
        env::set_var(OUTPUT_PATH_ENV, "/tmp/blast-out");
        env::set_var(AUTO_UPDATE_ENV, "TRUE");
        env::set_var(LAUNCHER_ENV, "/usr/local/bin/micromamba");
    }

    let config = BlastpConfig::from_env().unwrap();

    assert_eq!(config.output_dir, PathBuf::from("/tmp/blast-out"));
    assert_eq!(config.env.name(), Some("blast-2.16"));
    assert_eq!(config.env.launcher(), "/usr/local/bin/micromamba");
    assert!(config.auto_update);

    clear_env();
}

#[test]
#[serial]
fn test_explicit_db_path_wins_over_env() {
    clear_env();
    unsafe {
        env::set_var(DB_PATH_ENV, "/data/from-env");
    }

    let config = BlastpConfig::from_env_or(Some(PathBuf::from("/data/from-flag"))).unwrap();
    assert_eq!(config.db_path, PathBuf::from("/data/from-flag"));

    clear_env();
}

#[test]
#[serial]
fn test_auto_update_only_true_enables() {
    clear_env();
    unsafe {
        env::set_var(DB_PATH_ENV, "/data/blast_db");
        env::set_var(AUTO_UPDATE_ENV, "yes");
    }

    assert!(!BlastpConfig::from_env().unwrap().auto_update);

    clear_env();
}

#[test]
#[serial]
fn test_blank_env_name_runs_on_host() {
    clear_env();
    unsafe {
        env::set_var(DB_PATH_ENV, "/data/blast_db");
        env::set_var(MM_ENV_ENV, "");
    }

    let config = BlastpConfig::from_env().unwrap();
    assert_eq!(config.env, RuntimeEnv::host());

    clear_env();
}

#[test]
fn test_prepare_creates_directories() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("db");
    let output_dir = temp_dir.path().join("out");

    let config = BlastpConfig::new(&db_path).with_output_dir(&output_dir);
    config.prepare().unwrap();

    assert!(db_path.is_dir());
    assert!(output_dir.is_dir());
}

#[test]
fn test_prepare_rejects_file_as_db_path() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("not-a-dir");
    std::fs::write(&db_path, "x").unwrap();

    let err = BlastpConfig::new(&db_path).prepare().unwrap_err();
    assert!(matches!(err, ConfigError::NotWritable { .. }));
}

#[test]
fn test_database_path_joins_name() {
    let config = BlastpConfig::new("/data/blast_db");
    assert_eq!(config.database("pdbaa"), PathBuf::from("/data/blast_db/pdbaa"));
}
