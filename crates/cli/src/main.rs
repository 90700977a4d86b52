//! Command line demo driver for the time-locked position ledger.
use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::sync::Arc;
use timelock_lp_coordinator::{
    Clock, InMemoryPositionTokens, InMemoryVault, LockCoordinator, ManualClock, PositionTokens,
    SingleAdmin, Vault,
};
use timelock_lp_domain::ids::{Address, AssetId};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "timelock-lp")]
#[command(about = "Time-locked liquidity position ledger demo", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the canonical register, lock, unlock walkthrough
    Demo {
        /// Lock duration in seconds
        #[arg(short, long, default_value_t = 10)]
        duration: u64,

        /// Lock amount in asset units
        #[arg(short, long, default_value_t = 100_000_000)]
        amount: u64,
    },
    /// Exercise several pools and positions
    Scenario {
        /// Number of pools to register
        #[arg(long, default_value_t = 3)]
        pools: u64,

        /// Locks per pool
        #[arg(long, default_value_t = 2)]
        locks: u64,

        /// Lock duration in seconds
        #[arg(long, default_value_t = 60)]
        duration: u64,

        /// Lock amount per position in asset units
        #[arg(long, default_value_t = 1_000_000)]
        amount: u64,
    },
}

struct Stack {
    coordinator: LockCoordinator,
    vault: Arc<InMemoryVault>,
    tokens: Arc<InMemoryPositionTokens>,
    clock: Arc<ManualClock>,
    admin: Address,
}

fn build_stack() -> Stack {
    let vault = Arc::new(InMemoryVault::new());
    let tokens = Arc::new(InMemoryPositionTokens::new());
    let clock = Arc::new(ManualClock::new(1_000));
    let admin = Address::from("admin");
    let coordinator = LockCoordinator::new(
        Address::from("lock-custodian"),
        Arc::clone(&vault) as Arc<dyn Vault>,
        Arc::clone(&tokens) as Arc<dyn PositionTokens>,
        Arc::new(SingleAdmin::new(admin.clone())),
        Arc::clone(&clock) as Arc<dyn Clock>,
    );
    Stack {
        coordinator,
        vault,
        tokens,
        clock,
        admin,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { duration, amount } => run_demo(duration, u128::from(amount)).await,
        Commands::Scenario {
            pools,
            locks,
            duration,
            amount,
        } => run_scenario(pools, locks, duration, u128::from(amount)).await,
    }
}

async fn run_demo(duration: u64, amount: u128) -> Result<()> {
    let stack = build_stack();
    let depositor = Address::from("depositor");
    let pool = Address::from("sgl-pool");
    let asset = AssetId(7);

    stack.vault.register_asset(asset).await;
    stack.vault.credit(&depositor, asset, amount).await?;
    stack
        .coordinator
        .register_singularity(&stack.admin, pool.clone(), asset)
        .await?;
    info!(singularities = ?stack.coordinator.singularities().await, "registered");

    let id = stack
        .coordinator
        .lock(&depositor, &depositor, &pool, duration, amount)
        .await?;
    let owner = stack.tokens.owner_of(id).await?;
    info!(position_id = %id, owner = %owner, "locked");
    info!(
        total_deposited = stack.coordinator.singularity_of(&pool).await.total_deposited,
        "pool accounting after lock"
    );

    // An immediate unlock must be refused.
    if let Err(err) = stack
        .coordinator
        .unlock(&depositor, id, &pool, &depositor)
        .await
    {
        warn!(%err, "early unlock refused");
    }

    stack.clock.advance(duration);
    stack
        .coordinator
        .unlock(&depositor, id, &pool, &depositor)
        .await?;
    info!(
        total_deposited = stack.coordinator.singularity_of(&pool).await.total_deposited,
        balance = stack.vault.balance_of(&depositor, asset).await,
        "unlocked"
    );

    let journal = stack.coordinator.journal().events().await;
    println!("{}", serde_json::to_string_pretty(&journal)?);
    Ok(())
}

async fn run_scenario(pools: u64, locks: u64, duration: u64, amount: u128) -> Result<()> {
    let stack = build_stack();

    for p in 0..pools {
        let pool = Address::new(format!("sgl-pool-{p}"));
        let asset = AssetId(p + 1);
        stack.vault.register_asset(asset).await;
        stack
            .coordinator
            .register_singularity(&stack.admin, pool.clone(), asset)
            .await?;

        for l in 0..locks {
            let user = Address::new(format!("user-{p}-{l}"));
            stack.vault.credit(&user, asset, amount).await?;
            let id = stack
                .coordinator
                .lock(&user, &user, &pool, duration, amount)
                .await?;
            info!(position_id = %id, pool = %pool, user = %user, "locked");
        }
    }

    info!(
        singularities = ?stack.coordinator.singularities().await,
        minted = stack.coordinator.minted_positions().await,
        "all pools funded"
    );

    stack.clock.advance(duration);

    let mut released = 0u64;
    for p in 0..pools {
        let pool = Address::new(format!("sgl-pool-{p}"));
        for l in 0..locks {
            let user = Address::new(format!("user-{p}-{l}"));
            let id = timelock_lp_domain::ids::PositionId(p * locks + l);
            stack.coordinator.unlock(&user, id, &pool, &user).await?;
            released += 1;
        }
    }

    for p in 0..pools {
        let pool = Address::new(format!("sgl-pool-{p}"));
        let record = stack.coordinator.singularity_of(&pool).await;
        println!(
            "{}: active={} asset_id={} total_deposited={}",
            pool,
            record.is_active(),
            record.asset_id,
            record.total_deposited
        );
    }
    println!(
        "released {} positions, {} events recorded",
        released,
        stack.coordinator.journal().len().await
    );
    Ok(())
}
