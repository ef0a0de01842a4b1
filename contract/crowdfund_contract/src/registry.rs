use soroban_sdk::{contractclient, Address, Env};

use crate::storage_types::{AssetControls, Error};

/// Token issuance service: reports which control authorities an issuer kept
/// over an asset.
#[contractclient(name = "AssetRegistryClient")]
pub trait AssetRegistry {
    fn controls(env: Env, asset: Address) -> AssetControls;
}

/// Rejects reward assets whose issuer could freeze or claw back holdings,
/// or that start frozen.
pub fn require_uncontrolled(e: &Env, registry: &Address, asset: &Address) -> Result<(), Error> {
    let controls = AssetRegistryClient::new(e, registry).controls(asset);
    if controls.freeze.is_some() || controls.clawback.is_some() || controls.default_frozen {
        return Err(Error::AssetControlled);
    }
    Ok(())
}
