#![no_std]


mod bundle;
mod events;
mod guards;
mod payout;
mod registry;
mod storage_types;
mod utils;

pub use bundle::{Invocation, Payment, Step, CONTRIBUTE_METHOD, SETUP_METHOD};
pub use registry::{AssetRegistry, AssetRegistryClient};
pub use storage_types::{
    AssetControls, Campaign, Collateral, ContributorRecord, CreatorPayout, Error, Funding,
    Holding, LedgerConfig, Phase, RewardPool, Vault, RATE_DENOMINATOR,
};

use bundle::{ContributeBundle, SetupBundle};
use payout::Payouts;
use storage_types::{DataKey, PersistentKey, TTL_INSTANCE, TTL_PERSISTENT};

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, Vec};

#[contract]
pub struct CrowdfundContract;

#[contractimpl]
impl CrowdfundContract {
    /// Create the campaign. One contract instance runs exactly one campaign.
    pub fn initialize(
        e: Env,
        creator: Address,
        admin: Address,
        goal: i128,
        rate: i128,
        deadline: u64,
        config: LedgerConfig,
    ) -> Result<(), Error> {
        if e.storage().instance().has(&DataKey::Campaign) {
            return Err(Error::AlreadyInitialized);
        }
        creator.require_auth();

        if goal <= 0 {
            return Err(Error::InvalidGoal);
        }
        if rate <= 0 {
            return Err(Error::InvalidRate);
        }
        if deadline <= e.ledger().timestamp() {
            return Err(Error::InvalidDeadline);
        }
        if config.base_reserve < 0 || config.holding_reserve < 0 || config.native == config.registry {
            return Err(Error::InvalidConfig);
        }
        // Reject parameters whose pool or collateral math cannot be represented
        utils::tokens_owed(goal, rate)?;
        utils::collateral_for(goal)?;

        let campaign = Campaign {
            creator: creator.clone(),
            admin: admin.clone(),
            goal,
            rate,
            deadline,
            pool: RewardPool::Unset,
            raised: 0,
            claimed: 0,
            collateral: Collateral::Unposted,
            funding: Funding::Open,
            payout: CreatorPayout::Pending,
            holding: Holding::Absent,
            vault: Vault::Active,
        };

        e.storage().instance().set(&DataKey::Config, &config);
        save_campaign(&e, &campaign);

        events::emit_campaign_created(
            &e,
            events::CampaignCreatedEvent {
                creator,
                admin,
                goal,
                rate,
                deadline,
            },
        );
        Ok(())
    }

    /// Register a participant with a zero contribution record
    pub fn opt_in(e: Env, participant: Address) -> Result<(), Error> {
        participant.require_auth();
        let campaign = load_campaign(&e)?;
        guards::require_active(&campaign)?;

        let key = PersistentKey::Contributor(participant.clone());
        if e.storage().persistent().has(&key) {
            return Err(Error::AlreadyOptedIn);
        }
        save_contributor(&e, &participant, &ContributorRecord { contributed: 0 });
        extend_instance(&e);

        events::emit_opted_in(&e, participant);
        Ok(())
    }

    /// Drop a participant's record. Refused while it still holds value.
    pub fn close_out(e: Env, participant: Address) -> Result<(), Error> {
        participant.require_auth();
        load_campaign(&e)?;

        let record = load_contributor(&e, &participant)?;
        if record.contributed != 0 {
            return Err(Error::ContributionOutstanding);
        }
        e.storage()
            .persistent()
            .remove(&PersistentKey::Contributor(participant.clone()));

        events::emit_closed_out(&e, participant);
        Ok(())
    }

    /// One-time setup: `[collateral payment, setup call, token seed]`
    pub fn setup(e: Env, asset: Address, group: Vec<Step>) -> Result<(), Error> {
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;

        let bundle = SetupBundle::parse(&group)?;
        let creator = bundle.caller().clone();
        creator.require_auth();
        guards::require_creator(&campaign, &creator)?;

        if guards::is_set_up(&campaign)
            || campaign.collateral != Collateral::Unposted
            || campaign.raised != 0
            || guards::is_funded(&campaign)
        {
            return Err(Error::AlreadySetUp);
        }
        if asset == config.native {
            return Err(Error::InvalidAsset);
        }

        let deposit = utils::collateral_for(campaign.goal)?;
        bundle.verify(&e, &creator, &asset, &config.native, deposit)?;
        let required_pool = utils::tokens_owed(campaign.goal, campaign.rate)?;
        if bundle.seed().amount < required_pool {
            return Err(Error::SeedTooSmall);
        }
        registry::require_uncontrolled(&e, &config.registry, &asset)?;

        let mut payouts = Payouts::new(&e, &config, &campaign.holding, bundle.fee_budget(), 1)?;
        payout::collect(&e, bundle.collateral());
        campaign.holding = payouts.open_holding()?;
        payout::collect(&e, bundle.seed());

        campaign.pool = RewardPool::Set(asset.clone());
        campaign.collateral = Collateral::Held(deposit);
        save_campaign(&e, &campaign);

        log!(&e, "campaign set up", deposit, bundle.seed().amount);
        events::emit_campaign_set_up(
            &e,
            events::CampaignSetUpEvent {
                asset,
                deposit,
                seeded: bundle.seed().amount,
            },
        );
        Ok(())
    }

    /// Contribute native currency: `[contribute call, payment]`
    pub fn contribute(e: Env, group: Vec<Step>) -> Result<(), Error> {
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;

        let bundle = ContributeBundle::parse(&group)?;
        let investor = bundle.caller().clone();
        investor.require_auth();

        let mut record = load_contributor(&e, &investor)?;
        guards::require_set_up(&campaign)?;
        guards::require_open(&e, &campaign)?;
        bundle.verify(&e, &config.native)?;

        let amount = bundle.payment().amount;
        if amount <= 0 {
            return Err(Error::AmountTooSmall);
        }
        let raised = campaign.raised.checked_add(amount).ok_or(Error::Overflow)?;
        if raised > campaign.goal {
            return Err(Error::Oversubscribed);
        }

        payout::collect(&e, bundle.payment());

        record.contributed = record.contributed.checked_add(amount).ok_or(Error::Overflow)?;
        campaign.raised = raised;
        let just_funded = raised == campaign.goal;
        if just_funded {
            campaign.funding = Funding::Funded;
        }

        save_contributor(&e, &investor, &record);
        save_campaign(&e, &campaign);

        events::emit_contributed(
            &e,
            events::ContributedEvent {
                investor,
                amount,
                raised,
            },
        );
        if just_funded {
            log!(&e, "goal reached", raised);
            events::emit_funded(
                &e,
                events::FundedEvent {
                    raised,
                    funded_at: e.ledger().timestamp(),
                },
            );
        }
        Ok(())
    }

    /// Success path: pay the caller's reward tokens and settle their record
    pub fn claim(e: Env, investor: Address, fee_budget: u32) -> Result<i128, Error> {
        investor.require_auth();
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;
        guards::require_funded(&campaign)?;
        let asset = guards::require_set_up(&campaign)?;

        let mut record = load_contributor(&e, &investor)?;
        let contributed = record.contributed;
        if contributed <= 0 {
            return Err(Error::NothingContributed);
        }

        let tokens = utils::tokens_owed(contributed, campaign.rate)?;
        let mut payouts = Payouts::new(&e, &config, &campaign.holding, fee_budget, 1)?;
        payouts.send_asset(&asset, &investor, tokens)?;

        record.contributed = 0;
        campaign.claimed = campaign.claimed.checked_add(contributed).ok_or(Error::Overflow)?;
        save_contributor(&e, &investor, &record);
        save_campaign(&e, &campaign);

        events::emit_claimed(
            &e,
            events::ClaimedEvent {
                investor,
                contributed,
                tokens,
            },
        );
        Ok(tokens)
    }

    /// Success path: admin fee and creator payout from the unlocked balance.
    /// The escrow stays open at its minimum balance.
    pub fn withdraw(e: Env, creator: Address, fee_budget: u32) -> Result<(), Error> {
        creator.require_auth();
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;
        guards::require_creator(&campaign, &creator)?;
        guards::require_funded(&campaign)?;
        if campaign.payout == CreatorPayout::Withdrawn {
            return Err(Error::AlreadyWithdrawn);
        }

        let mut payouts = Payouts::new(&e, &config, &campaign.holding, fee_budget, 2)?;
        let (admin_fee, to_creator) = utils::success_split(campaign.raised, payouts.unlocked())?;
        payouts.pay(&campaign.admin, admin_fee)?;
        payouts.pay(&campaign.creator, to_creator)?;

        campaign.payout = CreatorPayout::Withdrawn;
        save_campaign(&e, &campaign);

        log!(&e, "withdrawn", admin_fee, to_creator);
        events::emit_withdrawn(
            &e,
            events::WithdrawnEvent {
                admin_fee,
                to_creator,
            },
        );
        Ok(())
    }

    /// Failure path: return the caller's contribution
    pub fn refund(e: Env, investor: Address, fee_budget: u32) -> Result<i128, Error> {
        investor.require_auth();
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;
        guards::require_failed(&e, &campaign)?;

        let mut record = load_contributor(&e, &investor)?;
        let amount = record.contributed;
        if amount <= 0 {
            return Err(Error::NothingContributed);
        }

        let mut payouts = Payouts::new(&e, &config, &campaign.holding, fee_budget, 1)?;
        payouts.pay(&investor, amount)?;

        record.contributed = 0;
        campaign.raised -= amount;
        save_contributor(&e, &investor, &record);
        save_campaign(&e, &campaign);

        events::emit_refunded(
            &e,
            events::RefundedEvent {
                investor,
                amount,
                raised: campaign.raised,
            },
        );
        Ok(amount)
    }

    /// Failure path, once, after every refund: split the deposit between
    /// admin and creator within the unlocked balance
    pub fn reclaim(e: Env, creator: Address, fee_budget: u32) -> Result<(), Error> {
        creator.require_auth();
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;
        guards::require_creator(&campaign, &creator)?;
        guards::require_failed(&e, &campaign)?;
        if campaign.raised != 0 {
            return Err(Error::RefundsOutstanding);
        }
        let deposit = match campaign.collateral {
            Collateral::Held(deposit) => deposit,
            Collateral::Unposted | Collateral::Reclaimed => return Err(Error::CollateralNotHeld),
        };

        let mut payouts = Payouts::new(&e, &config, &campaign.holding, fee_budget, 2)?;
        let (to_admin, to_creator) = utils::collateral_split(deposit, payouts.unlocked());
        payouts.pay(&campaign.admin, to_admin)?;
        payouts.pay(&campaign.creator, to_creator)?;

        campaign.collateral = Collateral::Reclaimed;
        save_campaign(&e, &campaign);

        log!(&e, "collateral reclaimed", to_admin, to_creator);
        events::emit_reclaimed(
            &e,
            events::ReclaimedEvent {
                deposit,
                to_admin,
                to_creator,
            },
        );
        Ok(())
    }

    /// Failure path: return the unused reward pool and close the holding
    pub fn sweep_asa_failed(e: Env, creator: Address, fee_budget: u32) -> Result<i128, Error> {
        creator.require_auth();
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;
        guards::require_creator(&campaign, &creator)?;
        guards::require_failed(&e, &campaign)?;
        if campaign.raised != 0 {
            return Err(Error::RefundsOutstanding);
        }
        if let Collateral::Held(_) = campaign.collateral {
            return Err(Error::CollateralHeld);
        }
        let asset = guards::require_set_up(&campaign)?;

        let mut payouts = Payouts::new(&e, &config, &campaign.holding, fee_budget, 1)?;
        let amount = payouts.close_holding(&asset, &creator)?;
        campaign.holding = payouts.holding();
        save_campaign(&e, &campaign);

        events::emit_swept(
            &e,
            events::SweptEvent {
                asset,
                amount,
                funded: false,
            },
        );
        Ok(amount)
    }

    /// Success path, after the deadline and every claim: return rounding
    /// dust and close the holding
    pub fn sweep_asa_success(e: Env, creator: Address, fee_budget: u32) -> Result<i128, Error> {
        creator.require_auth();
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;
        guards::require_creator(&campaign, &creator)?;
        guards::require_funded(&campaign)?;
        guards::require_past_deadline(&e, &campaign)?;
        if campaign.claimed != campaign.raised {
            return Err(Error::ClaimsOutstanding);
        }
        let asset = guards::require_set_up(&campaign)?;

        let mut payouts = Payouts::new(&e, &config, &campaign.holding, fee_budget, 1)?;
        let amount = payouts.close_holding(&asset, &creator)?;
        campaign.holding = payouts.holding();
        save_campaign(&e, &campaign);

        events::emit_swept(
            &e,
            events::SweptEvent {
                asset,
                amount,
                funded: true,
            },
        );
        Ok(amount)
    }

    /// Terminal: empty the escrow to the creator. Fails on a second call.
    pub fn close_vault(e: Env, creator: Address, fee_budget: u32) -> Result<i128, Error> {
        creator.require_auth();
        let mut campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        guards::require_active(&campaign)?;
        guards::require_creator(&campaign, &creator)?;

        if guards::is_funded(&campaign) {
            if campaign.payout != CreatorPayout::Withdrawn {
                return Err(Error::NotWithdrawn);
            }
        } else {
            guards::require_failed(&e, &campaign)?;
            if campaign.raised != 0 {
                return Err(Error::RefundsOutstanding);
            }
            if let Collateral::Held(_) = campaign.collateral {
                return Err(Error::CollateralHeld);
            }
        }
        if campaign.holding == Holding::OptedIn {
            return Err(Error::HoldingOpen);
        }

        let mut payouts = Payouts::new(&e, &config, &campaign.holding, fee_budget, 1)?;
        let amount = payouts.close_account(&creator)?;
        campaign.vault = Vault::Closed;
        save_campaign(&e, &campaign);

        log!(&e, "vault closed", amount);
        events::emit_vault_closed(&e, events::VaultClosedEvent { creator, amount });
        Ok(amount)
    }

    /// View functions
    pub fn get_campaign(e: Env) -> Result<Campaign, Error> {
        load_campaign(&e)
    }

    pub fn get_config(e: Env) -> Result<LedgerConfig, Error> {
        load_config(&e)
    }

    pub fn get_contributor(e: Env, participant: Address) -> Option<ContributorRecord> {
        e.storage()
            .persistent()
            .get(&PersistentKey::Contributor(participant))
    }

    pub fn phase(e: Env) -> Result<Phase, Error> {
        let campaign = load_campaign(&e)?;
        Ok(guards::phase(&campaign, e.ledger().timestamp()))
    }

    /// Native balance above the escrow's current minimum
    pub fn unlocked_balance(e: Env) -> Result<i128, Error> {
        let campaign = load_campaign(&e)?;
        let config = load_config(&e)?;
        let balance = token::Client::new(&e, &config.native).balance(&e.current_contract_address());
        Ok(utils::unlocked(balance, utils::min_balance(&config, &campaign.holding)))
    }
}

// Helper functions
fn extend_instance(e: &Env) {
    e.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(e: &Env, key: &PersistentKey) {
    e.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn load_campaign(e: &Env) -> Result<Campaign, Error> {
    e.storage()
        .instance()
        .get(&DataKey::Campaign)
        .ok_or(Error::NotInitialized)
}

fn save_campaign(e: &Env, campaign: &Campaign) {
    e.storage().instance().set(&DataKey::Campaign, campaign);
    extend_instance(e);
}

fn load_config(e: &Env) -> Result<LedgerConfig, Error> {
    e.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

fn load_contributor(e: &Env, participant: &Address) -> Result<ContributorRecord, Error> {
    e.storage()
        .persistent()
        .get(&PersistentKey::Contributor(participant.clone()))
        .ok_or(Error::NotOptedIn)
}

fn save_contributor(e: &Env, participant: &Address, record: &ContributorRecord) {
    let key = PersistentKey::Contributor(participant.clone());
    e.storage().persistent().set(&key, record);
    extend_persistent(e, &key);
}
