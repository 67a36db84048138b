//! Prints the hard-fork and staking rules in force at a height
//!
//! Usage: `sn-rules [HEIGHT]`. Without a height the first height of the top
//! known hard fork is used. Configuration comes from the TOML file named by
//! `SN_RULES_CONFIG`, or from `SN_RULES_NETWORK` / `SN_RULES_RELEASE`.

use anyhow::Context;
use hardfork::limits::{burns_fees, max_transaction_type, max_transaction_version, TxType, TxVersion};
use hardfork::{Config, HardFork, HardForkInfo, NetworkState, NetworkType, NetworkVersion};
use serde::Serialize;
use service_nodes::constants::{MAX_NUMBER_OF_CONTRIBUTORS, STAKING_PORTIONS};
use service_nodes::{
    get_max_node_contribution, get_min_node_contribution, get_staking_requirement,
    registration_staking_requirement,
};
use tracing::info;

#[derive(Debug, Serialize)]
struct Report<'a> {
    network: NetworkType,
    height: u64,
    hard_forks: &'a [HardFork],
    min_version: NetworkVersion,
    max_version: NetworkVersion,
    ideal_version: NetworkVersion,
    hard_fork: HardForkInfo,
    max_transaction_version: TxVersion,
    max_transaction_type: TxType,
    burns_fees: bool,
    staking: StakingReport,
}

#[derive(Debug, Serialize)]
struct StakingReport {
    requirement: u64,
    registration_requirement: u64,
    min_operator_contribution: u64,
    max_operator_contribution: u64,
    max_contributors: usize,
    staking_portions: u64,
}

fn load_config() -> anyhow::Result<Config> {
    match std::env::var("SN_RULES_CONFIG") {
        Ok(path) => Config::from_file(&path).with_context(|| format!("loading {}", path)),
        Err(_) => Config::from_env().context("reading environment"),
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, the report to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let chain = config.chain_config()?;
    let network = config.network;

    info!(%network, release = ?chain.release(), "Configuration loaded");

    let hard_forks = chain.get_hard_forks(network);
    let height = match std::env::args().nth(1) {
        Some(arg) => arg
            .parse::<u64>()
            .with_context(|| format!("invalid height: {}", arg))?,
        None => hard_forks.last().map(|hf| hf.height).unwrap_or(0),
    };

    let (min_version, max_version) = chain.get_network_versions_for_height(network, height);
    let state = NetworkState::new(network, min_version);
    let requirement = get_staking_requirement(&chain, state, height);

    let report = Report {
        network,
        height,
        hard_forks,
        min_version,
        max_version,
        ideal_version: chain.get_ideal_network_version(network, height),
        hard_fork: chain.hard_fork_info(network, min_version, min_version),
        max_transaction_version: max_transaction_version(&chain, state),
        max_transaction_type: max_transaction_type(&chain, state),
        burns_fees: burns_fees(&chain, state),
        staking: StakingReport {
            requirement,
            registration_requirement: registration_staking_requirement(&chain, state, height),
            min_operator_contribution: get_min_node_contribution(&chain, state, requirement, 0, 0),
            max_operator_contribution: get_max_node_contribution(&chain, state, requirement, 0),
            max_contributors: MAX_NUMBER_OF_CONTRIBUTORS,
            staking_portions: STAKING_PORTIONS,
        },
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
