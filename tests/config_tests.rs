//! Configuration loading from a home directory.

mod support;

use lndwarden::error::{ConfigError, Error};
use lndwarden::infrastructure::config::Config;

use support::home::TempHome;

#[test]
fn missing_default_file_means_defaults() {
    let home = TempHome::new();

    let config = Config::load_from_home(Some(home.path()), None).unwrap();

    assert_eq!(config.home, home.path());
    assert!(config.channel_acceptor.enabled);
    assert_eq!(config.channel_acceptor.min_channel_size_private, 0);
    assert_eq!(config.channel_acceptor.max_channel_size_public, 16_777_215);
    assert!(config.monitors.htlc_events);
    assert!(!config.monitors.graph_updates);
}

#[test]
fn partial_section_keeps_remaining_defaults() {
    let home = TempHome::with_config(
        r#"
[channel_acceptor]
min_channel_size_public = 1000000

[monitors]
graph_updates = true
"#,
    );

    let config = Config::load_from_home(Some(home.path()), None).unwrap();
    let policy = config.size_policy();

    assert_eq!(policy.public.min, 1_000_000);
    assert_eq!(policy.public.max, 16_777_215);
    assert_eq!(policy.private.min, 0);
    assert!(config.monitors.graph_updates);
    assert!(config.monitors.htlc_events);
}

#[test]
fn explicit_config_path_replaces_home_file() {
    let home = TempHome::with_config("[channel_acceptor]\nqueue_depth = 8\n");
    let other = home.write("other.toml", "[channel_acceptor]\nqueue_depth = 2\n");

    let config = Config::load_from_home(Some(home.path()), Some(&other)).unwrap();

    assert_eq!(config.channel_acceptor.queue_depth, 2);
    assert_eq!(config.home, home.path());
}

#[test]
fn missing_explicit_config_path_is_an_error() {
    let home = TempHome::new();
    let missing = home.path().join("nope.toml");

    let err = Config::load_from_home(Some(home.path()), Some(&missing)).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn malformed_threshold_is_fatal() {
    let home = TempHome::with_config("[channel_acceptor]\nmax_channel_size_private = -5\n");

    let err = Config::load_from_home(Some(home.path()), None).unwrap_err();

    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn relative_credential_paths_resolve_against_home() {
    let home = TempHome::with_config(
        r#"
[node]
tls_cert = "lnd/tls.cert"
macaroon = "lnd/admin.macaroon"
"#,
    );

    let config = Config::load_from_home(Some(home.path()), None).unwrap();
    let credentials = config.node.credentials(&config.home).unwrap();

    assert_eq!(credentials.tls_cert, home.path().join("lnd/tls.cert"));
    assert_eq!(credentials.macaroon, home.path().join("lnd/admin.macaroon"));
}
