//! Rebuilding trees from prefixed environment variables.

use anyhow::{Context, Result, ensure};
use entity_tree::EnvTable;
use rstest::rstest;
use serde_json::{Value, json};
use test_helpers::figment::with_jail;

#[rstest]
fn prefixed_variables_become_a_tree() -> Result<()> {
    with_jail(|j| {
        j.set_env("ETREE_DB_HOST", "localhost");
        j.set_env("ETREE_DB_PORT", "5432");
        j.set_env("ETREE_MODE", "fast");
        j.set_env("OTHER_DB_HOST", "ignored");
        let tree = EnvTable::new("ETREE_").tree('_');
        ensure!(
            tree.to_json()
                == json!({
                    "DB": {
                        "HOST": {"_value": "localhost"},
                        "PORT": {"_value": "5432"},
                    },
                    "MODE": {"_value": "fast"},
                }),
            "unexpected tree {}",
            tree.to_json()
        );
        Ok(())
    })
}

#[rstest]
fn entries_keep_prefix_and_sort_by_name() -> Result<()> {
    with_jail(|j| {
        j.set_env("ETREE_ZETA", "z");
        j.set_env("ETREE_ALPHA", "a");
        let entries = EnvTable::new("ETREE_").entries();
        let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        ensure!(
            names == ["ETREE_ALPHA", "ETREE_ZETA"],
            "unexpected names {names:?}"
        );
        ensure!(
            entries.iter().all(|(_, value)| value.is_string()),
            "values should stay strings"
        );
        Ok(())
    })
}

#[rstest]
fn lowercase_folds_names() -> Result<()> {
    with_jail(|j| {
        j.set_env("ETREE_DB_HOST", "localhost");
        let table = EnvTable::new("ETREE_").lowercase(true);
        let host = table
            .tree('_')
            .lookup(&["db", "host"])
            .cloned()
            .context("db.host missing")?;
        ensure!(host == Value::from("localhost"), "unexpected host {host}");
        Ok(())
    })
}

#[rstest]
fn prefix_match_is_case_sensitive() -> Result<()> {
    with_jail(|j| {
        j.set_env("etree_db_host", "localhost");
        let tree = EnvTable::new("ETREE_").tree('_');
        ensure!(tree.is_empty(), "unexpected tree {}", tree.to_json());
        Ok(())
    })
}
