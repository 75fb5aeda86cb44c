//! Architecture contract tests.

mod support;

use support::architecture::{functions_in_mod_files, lines_containing, path_exists};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::runtime",
            "tokio::",
            "reqwest::",
            "tokio_tungstenite::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = lines_containing(
        "src/port",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::runtime",
        ],
    );

    assert!(hits.is_empty(), "ports should depend only on domain: {hits:#?}");
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = lines_containing("src/application", &["crate::adapter::", "crate::infrastructure::"]);
    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn runtime_knows_nothing_about_lnd() {
    let hits = lines_containing("src/runtime", &["crate::adapter::", "lnd::"]);
    assert!(
        hits.is_empty(),
        "supervisor should only see the NodeClient port: {hits:#?}"
    );
}

#[test]
fn mod_rs_files_define_no_functions() {
    let hits = functions_in_mod_files("src");
    assert!(
        hits.is_empty(),
        "found function definitions in mod.rs files: {hits:#?}"
    );
}

#[test]
fn lnd_adapter_lives_in_outbound_adapters() {
    for file in [
        "src/adapter/outbound/lnd/client.rs",
        "src/adapter/outbound/lnd/classifier.rs",
        "src/port/node.rs",
        "src/port/classifier.rs",
    ] {
        assert!(path_exists(file), "expected module `{file}`");
    }
}
