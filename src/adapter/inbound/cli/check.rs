//! Handler for the `check-config` command.

use std::fmt::Display;

use crate::adapter::inbound::cli::command::LocationArgs;
use crate::domain::SizeBounds;
use crate::error::Result;
use crate::infrastructure::config::settings::CONFIG_FILE_NAME;
use crate::infrastructure::config::Config;

/// Validate configuration without starting the daemon.
pub fn execute(args: &LocationArgs) -> Result<()> {
    let config = Config::load_from_home(args.home.as_deref(), args.config.as_deref())?;

    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => {
            let path = config.home.join(CONFIG_FILE_NAME);
            if path.exists() {
                path.display().to_string()
            } else {
                format!("{} (not found, using defaults)", path.display())
            }
        }
    };

    println!("Configuration is valid");
    field("Home", config.home.display());
    field("Config", source);
    field("REST URL", &config.node.rest_url);

    let acceptor = &config.channel_acceptor;
    if acceptor.enabled {
        let policy = acceptor.size_policy();
        field("Private peers", bounds(policy.private));
        field("Public peers", bounds(policy.public));
        field("Queue depth", acceptor.queue_depth);
        field("Classify timeout", format!("{}s", acceptor.classify_timeout_secs));
    } else {
        field("Channel acceptor", "disabled");
    }

    field("HTLC monitor", on_off(config.monitors.htlc_events));
    field("Graph monitor", on_off(config.monitors.graph_updates));
    field(
        "Shutdown timeout",
        format!("{}s", config.supervisor.shutdown_timeout_secs),
    );
    field(
        "On unit failure",
        if config.supervisor.cascade_on_failure {
            "stop all units"
        } else {
            "keep others running"
        },
    );

    Ok(())
}

fn field(label: &str, value: impl Display) {
    println!("  {:<18} {value}", format!("{label}:"));
}

fn bounds(bounds: SizeBounds) -> String {
    format!("{} < amount < {} sat", bounds.min, bounds.max)
}

const fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "enabled"
    } else {
        "disabled"
    }
}
