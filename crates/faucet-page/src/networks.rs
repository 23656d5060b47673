//! Details about the networks the faucet serves.

use crate::config::NetworkConfig;

/// Summary consumed by the faucet details card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDetails {
    pub network_count: usize,
    pub sorted_networks: Vec<NetworkConfig>,
}

/// Collect the configured networks, ordered by chain id
pub fn network_details(networks: &[NetworkConfig]) -> NetworkDetails {
    let mut sorted_networks = networks.to_vec();
    sorted_networks.sort_by(|a, b| a.chain_id.cmp(&b.chain_id).then_with(|| a.name.cmp(&b.name)));

    NetworkDetails {
        network_count: sorted_networks.len(),
        sorted_networks,
    }
}
