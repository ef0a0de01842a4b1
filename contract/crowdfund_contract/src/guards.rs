use soroban_sdk::{Address, Env};

use crate::storage_types::{Campaign, Error, Funding, Phase, RewardPool, Vault};

pub fn is_past_deadline(campaign: &Campaign, now: u64) -> bool {
    now > campaign.deadline
}

pub fn is_funded(campaign: &Campaign) -> bool {
    campaign.funding == Funding::Funded
}

/// Accepting contributions: not funded and the deadline has not passed
pub fn is_open(campaign: &Campaign, now: u64) -> bool {
    !is_funded(campaign) && !is_past_deadline(campaign, now)
}

/// Goal missed: not funded and the deadline has passed
pub fn is_failed(campaign: &Campaign, now: u64) -> bool {
    !is_funded(campaign) && is_past_deadline(campaign, now)
}

pub fn is_set_up(campaign: &Campaign) -> bool {
    matches!(campaign.pool, RewardPool::Set(_))
}

pub fn is_closed(campaign: &Campaign) -> bool {
    campaign.vault == Vault::Closed
}

pub fn phase(campaign: &Campaign, now: u64) -> Phase {
    if is_closed(campaign) {
        Phase::Closed
    } else if is_funded(campaign) {
        Phase::Funded
    } else if is_past_deadline(campaign, now) {
        Phase::Failed
    } else if !is_set_up(campaign) {
        Phase::AwaitingSetup
    } else {
        Phase::Open
    }
}

pub fn require_active(campaign: &Campaign) -> Result<(), Error> {
    if is_closed(campaign) {
        return Err(Error::VaultClosed);
    }
    Ok(())
}

pub fn require_creator(campaign: &Campaign, caller: &Address) -> Result<(), Error> {
    if *caller != campaign.creator {
        return Err(Error::NotCreator);
    }
    Ok(())
}

pub fn require_open(e: &Env, campaign: &Campaign) -> Result<(), Error> {
    if is_funded(campaign) {
        return Err(Error::AlreadyFunded);
    }
    if is_past_deadline(campaign, e.ledger().timestamp()) {
        return Err(Error::DeadlinePassed);
    }
    Ok(())
}

pub fn require_funded(campaign: &Campaign) -> Result<(), Error> {
    if !is_funded(campaign) {
        return Err(Error::NotFunded);
    }
    Ok(())
}

pub fn require_failed(e: &Env, campaign: &Campaign) -> Result<(), Error> {
    if is_funded(campaign) {
        return Err(Error::AlreadyFunded);
    }
    if !is_past_deadline(campaign, e.ledger().timestamp()) {
        return Err(Error::DeadlineNotPassed);
    }
    Ok(())
}

pub fn require_past_deadline(e: &Env, campaign: &Campaign) -> Result<(), Error> {
    if !is_past_deadline(campaign, e.ledger().timestamp()) {
        return Err(Error::DeadlineNotPassed);
    }
    Ok(())
}

pub fn require_set_up(campaign: &Campaign) -> Result<Address, Error> {
    match &campaign.pool {
        RewardPool::Set(asset) => Ok(asset.clone()),
        RewardPool::Unset => Err(Error::NotSetUp),
    }
}
