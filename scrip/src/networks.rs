//! Known community-currency network deployments.
//!
//! Maps human-readable network names (e.g. `"celo"`) to canonical chain
//! identifiers and back. Pools are deployed on Celo and Gnosis; the
//! matching testnets and the local devnet are listed for development
//! flows.

use crate::chain::ChainId;

/// Celo Mainnet chain ID.
pub const CELO_MAINNET: ChainId = ChainId::new(42220);

/// Celo Alfajores (testnet) chain ID.
pub const CELO_ALFAJORES: ChainId = ChainId::new(44787);

/// Gnosis Chain chain ID.
pub const GNOSIS_MAINNET: ChainId = ChainId::new(100);

/// Gnosis Chiado (testnet) chain ID.
pub const GNOSIS_CHIADO: ChainId = ChainId::new(10200);

/// Local development node (Anvil/Hardhat default) chain ID.
pub const LOCAL_DEVNET: ChainId = ChainId::new(31337);

/// A known network definition with its chain ID and human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Human-readable network name (e.g., "celo", "gnosis-chiado").
    pub name: &'static str,
    /// Canonical chain identifier.
    pub chain_id: ChainId,
}

/// All networks the application knows by name.
pub const KNOWN_NETWORKS: &[NetworkInfo] = &[
    NetworkInfo {
        name: "celo",
        chain_id: CELO_MAINNET,
    },
    NetworkInfo {
        name: "celo-alfajores",
        chain_id: CELO_ALFAJORES,
    },
    NetworkInfo {
        name: "gnosis",
        chain_id: GNOSIS_MAINNET,
    },
    NetworkInfo {
        name: "gnosis-chiado",
        chain_id: GNOSIS_CHIADO,
    },
    NetworkInfo {
        name: "localhost",
        chain_id: LOCAL_DEVNET,
    },
];

/// Looks up a [`ChainId`] by its human-readable network name.
#[must_use]
pub fn chain_id_by_network_name(name: &str) -> Option<ChainId> {
    KNOWN_NETWORKS
        .iter()
        .find(|info| info.name == name)
        .map(|info| info.chain_id)
}

/// Looks up a human-readable network name by its [`ChainId`].
#[must_use]
pub fn network_name_by_chain_id(chain_id: ChainId) -> Option<&'static str> {
    KNOWN_NETWORKS
        .iter()
        .find(|info| info.chain_id == chain_id)
        .map(|info| info.name)
}
