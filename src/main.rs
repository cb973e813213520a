// Cap report entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, env-filtered)
// 2. Load config
// 3. Load the league snapshot JSON exports
// 4. Resolve toilet-bowl winners and the predicted draft order
// 5. Replay trades into pick ownership and merge traded picks
// 6. Print the draft report

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use capkeeper::config;
use capkeeper::draft::assets::extract_assets_from_transactions;
use capkeeper::draft::order::{apply_traded_picks, calculate_draft_order, TeamMeta};
use capkeeper::draft::toilet_bowl::extract_toilet_bowl_winners;
use capkeeper::feed;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} franchises, {} draft rounds",
        config.league.name, config.league.num_franchises, config.league.draft_rounds
    );

    // 3. Load the snapshot exports
    let snapshot = feed::load_snapshot(Path::new("."), &config.data_paths)
        .context("failed to load league snapshot")?;
    info!(
        "Snapshot loaded: {} standings rows, {} transactions, {} draft results",
        snapshot.standings.len(),
        snapshot.transactions.len(),
        snapshot.draft_results.len()
    );

    // 4. Toilet bowl and draft order
    let toilet_bowl = extract_toilet_bowl_winners(&snapshot.playoff_brackets);
    info!("Resolved {} toilet-bowl winners", toilet_bowl.len());

    let teams: HashMap<String, TeamMeta> = config
        .league
        .franchises
        .iter()
        .map(|(id, name)| {
            (
                feed::normalize_franchise_id(id),
                TeamMeta {
                    name: name.clone(),
                    icon: None,
                },
            )
        })
        .collect();

    let mut predictions = calculate_draft_order(
        &snapshot.standings,
        &teams,
        None,
        &toilet_bowl,
        config.league.draft_rounds,
    )
    .context("failed to compute the draft order")?;

    // 5. Trade replay
    let franchise_ids: Vec<String> = snapshot
        .standings
        .iter()
        .map(|f| feed::normalize_franchise_id(&f.id))
        .collect();
    match extract_assets_from_transactions(
        &snapshot.transactions,
        &franchise_ids,
        config.league.season,
        config.league.draft_rounds,
    ) {
        Ok(assets) => apply_traded_picks(&mut predictions, &assets, &teams),
        Err(e) => warn!("skipping traded-pick merge: {e}"),
    }

    // 6. Report
    println!(
        "{} — predicted {} draft order ({} picks)",
        config.league.name,
        config.league.season,
        predictions.len()
    );
    println!();
    for p in &predictions {
        let record = p
            .standing
            .as_ref()
            .map(|s| s.record.clone())
            .unwrap_or_else(|| "-".to_string());
        let mut notes = Vec::new();
        if let Some(level) = p.toilet_bowl {
            notes.push(format!("toilet bowl: {}", level.label()));
        }
        if let Some(trade) = &p.trade {
            notes.push(format!("via {}", trade.original_franchise_id));
        }
        if p.is_league_winner {
            notes.push("league winner".to_string());
        }
        println!(
            "{:>3}. {}.{:<2} {:<24} {:>8}  {}",
            p.overall_pick_number,
            p.round,
            p.pick_in_round,
            p.team.name,
            record,
            notes.join(", ")
        );
    }

    Ok(())
}
