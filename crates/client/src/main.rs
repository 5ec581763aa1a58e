//! Agent simulation binary.
//!
//! Places a player and a few NPCs on a grid and drives every agent's action
//! queue once per tick until the player's scripted orders are carried out.
//!
//! # Examples
//!
//! ```bash
//! # Fast run with default settings
//! cargo run -p agent-sim
//!
//! # Watch it tick, with queue transitions in the log
//! SIM_TICK_MS=250 RUST_LOG=info,action_queue=debug cargo run -p agent-sim
//! ```

use agent_sim::{SimConfig, Simulation, logging};
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = SimConfig::from_env();

    // 2. Setup logging (guard flushes the log file on exit)
    let _guard = logging::setup_logging(&config)?;

    tracing::info!("Starting agent simulation");
    tracing::info!("Session ID: {:?}", config.session_id);
    tracing::info!("Seed: {}, NPCs: {}", config.seed, config.npc_count);

    // 3. Build and run
    let simulation = Simulation::builder().config(config).build()?;
    let summary = simulation.run().await?;

    tracing::info!(
        ticks = summary.ticks,
        events = summary.events,
        completed = summary.completed,
        player = ?summary.player_state,
        "Simulation finished"
    );
    Ok(())
}
