//! End-to-end checks of the parse-then-rewrite pipeline, the way the
//! preload layer drives it at process start.

use anyhow::Result;
use pathshift_core::rewrite::{rewrite_into, RewriteOutcome};
use pathshift_core::table::MappingTable;

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}

fn rewrite(table: &MappingTable, path: &[u8]) -> Option<Vec<u8>> {
    let mut buf = [0u8; 4096];
    match rewrite_into(table, path, &mut buf[..4095]) {
        RewriteOutcome::Mapped { len } => Some(buf[..len].to_vec()),
        RewriteOutcome::Unmapped | RewriteOutcome::Overflow => None,
    }
}

#[test]
fn parses_and_rewrites_a_configured_mapping() -> Result<()> {
    init_tracing();
    let table = MappingTable::from_config(Some(b"/etc/app:/home/user/.etc/app".as_slice()))?;
    assert_eq!(
        rewrite(&table, b"/etc/app/config.ini").as_deref(),
        Some(b"/home/user/.etc/app/config.ini".as_slice())
    );
    assert_eq!(rewrite(&table, b"/etc/application"), None);
    Ok(())
}

#[test]
fn odd_token_count_is_rejected_before_any_rewrite() {
    init_tracing();
    let err = MappingTable::from_config(Some(b"/a:/b:/c".as_slice())).unwrap_err();
    assert!(err.to_string().contains("odd number"));
}

#[test]
fn multi_entry_configs_keep_declaration_order() -> Result<()> {
    init_tracing();
    let table =
        MappingTable::from_config(Some(b"/etc:/first:/etc/app:/second".as_slice()))?;
    // First match wins even though the second entry is more specific.
    assert_eq!(
        rewrite(&table, b"/etc/app/x").as_deref(),
        Some(b"/first/app/x".as_slice())
    );
    Ok(())
}

#[test]
fn two_path_operations_rewrite_both_arguments_independently() -> Result<()> {
    init_tracing();
    let table = MappingTable::from_config(Some(b"/etc/app:/home/user/.etc/app".as_slice()))?;
    // The shim rewrites each argument of a rename through its own buffer;
    // this is the same sequence of calls it makes.
    let old = rewrite(&table, b"/etc/app/x");
    let new = rewrite(&table, b"/etc/app/y");
    assert_eq!(old.as_deref(), Some(b"/home/user/.etc/app/x".as_slice()));
    assert_eq!(new.as_deref(), Some(b"/home/user/.etc/app/y".as_slice()));
    Ok(())
}

#[test]
fn oversized_rewrites_keep_the_original_path() -> Result<()> {
    init_tracing();
    let table = MappingTable::from_config(Some(b"/etc/app:/home/user/.etc/app".as_slice()))?;
    let mut buf = [0u8; 10];
    assert_eq!(
        rewrite_into(&table, b"/etc/app/config.ini", &mut buf[..9]),
        RewriteOutcome::Overflow
    );
    Ok(())
}
