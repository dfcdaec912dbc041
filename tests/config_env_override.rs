use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use sync_guard::config::{load_or_init, LoadResult};
use sync_guard::{default_config_path, NamingRules, CONFIG_ENV_VAR};

fn with_env<T>(value: &std::path::Path, f: impl FnOnce() -> T) -> T {
    unsafe {
        std::env::set_var(CONFIG_ENV_VAR, value);
    }
    let out = f();
    unsafe {
        std::env::remove_var(CONFIG_ENV_VAR);
    }
    out
}

#[test]
#[serial]
fn env_override_file_is_loaded() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("custom_config.xml");
    let sync = base.join("mirror");
    fs::create_dir_all(&sync).unwrap();
    fs::write(
        &cfg,
        format!(
            "<config>\n  <local_root>{}</local_root>\n  <language>fr</language>\n  \
             <remote_rules>unix</remote_rules>\n</config>",
            sync.display()
        ),
    )
    .unwrap();

    let (resolved, loaded) =
        with_env(&cfg, || (default_config_path().unwrap(), load_or_init().unwrap()));
    assert_eq!(resolved, cfg);
    match loaded {
        LoadResult::Loaded(c) => {
            assert_eq!(c.local_root.as_deref(), Some(sync.as_path()));
            assert_eq!(c.language, "fr");
            assert_eq!(c.remote_rules, NamingRules::Unix);
        }
        other => panic!("expected Loaded, got {other:?}"),
    }
}

#[test]
#[serial]
fn env_override_directory_means_config_xml_inside() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    fs::write(base.join("config.xml"), "<config><language>nl</language></config>").unwrap();

    let (resolved, loaded) =
        with_env(&base, || (default_config_path().unwrap(), load_or_init().unwrap()));
    assert_eq!(resolved, base.join("config.xml"));
    assert!(matches!(loaded, LoadResult::Loaded(c) if c.language == "nl"));
}

#[test]
#[serial]
fn env_override_to_missing_file_is_an_error_and_writes_nothing() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("absent.xml");

    let err = with_env(&cfg, || load_or_init().unwrap_err());
    assert!(err.to_string().contains("does not exist"), "{err}");
    assert!(!cfg.exists());
}

#[test]
#[serial]
fn malformed_override_reports_the_file() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("broken.xml");
    fs::write(&cfg, "<config><remote_rules>amiga</remote_rules></config>").unwrap();

    let err = with_env(&cfg, || load_or_init().unwrap_err());
    let chain = format!("{err:#}");
    assert!(chain.contains("broken.xml"), "{chain}");
    assert!(chain.contains("amiga"), "{chain}");
}
