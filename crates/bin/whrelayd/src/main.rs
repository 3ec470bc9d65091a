//! # whrelayd — water heater relay daemon
//!
//! Composition root that wires a registry adapter to the controller and runs
//! the scheduler.
//!
//! ## Responsibilities
//! - Parse configuration (env vars, config file)
//! - Initialize logging
//! - Connect to the configured registry (D-Bus or the in-memory demo)
//! - Run the locate, initialize, and monitor steps forever
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use anyhow::Context;
use whrelay_adapter_dbus_zbus::DbusRegistry;
use whrelay_adapter_virtual::VirtualRegistry;
use whrelay_app::config::ControllerConfig;
use whrelay_app::controller::WaterHeaterController;
use whrelay_app::ports::BusRegistry;
use whrelay_app::scheduler::Scheduler;

use crate::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter()?)
        .init();

    let controller = config.controller()?;
    tracing::info!(
        bus = ?config.bus.kind,
        labels = %controller.target_labels,
        max_slots = controller.max_slots,
        "starting whrelayd"
    );

    if let Some(dbus) = config.dbus() {
        let registry = DbusRegistry::connect(&dbus)
            .await
            .context("connecting to D-Bus")?;
        run(registry, &controller).await;
    } else {
        run(VirtualRegistry::demo(&controller.layout), &controller).await;
    }

    Ok(())
}

async fn run<R: BusRegistry>(registry: R, config: &ControllerConfig) {
    let controller = WaterHeaterController::new(registry, config);
    Scheduler::new(controller, config.intervals).run().await;
}
