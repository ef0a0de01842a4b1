use soroban_sdk::{log, token, Address, Env};

use crate::bundle::Payment;
use crate::storage_types::{Error, Holding, LedgerConfig};
use crate::utils;

/// Settle a validated companion payment into the escrow
pub fn collect(e: &Env, payment: &Payment) {
    if payment.amount <= 0 {
        return;
    }
    let token_client = token::Client::new(e, &payment.asset);
    token_client.transfer(&payment.sender, &payment.receiver, &payment.amount);
}

/// Emits every outgoing transfer of one operation. Native payouts are capped
/// by the balance above the escrow's minimum, and the number of emitted
/// transfers never exceeds the caller's fee budget.
pub struct Payouts<'a> {
    env: &'a Env,
    config: &'a LedgerConfig,
    escrow: Address,
    holding: Holding,
    budget: u32,
}

impl<'a> Payouts<'a> {
    /// `needed` is the worst-case number of outgoing transfers the operation
    /// may emit.
    pub fn new(
        env: &'a Env,
        config: &'a LedgerConfig,
        holding: &Holding,
        budget: u32,
        needed: u32,
    ) -> Result<Self, Error> {
        if budget < needed {
            return Err(Error::FeeBudgetTooLow);
        }
        Ok(Payouts {
            env,
            config,
            escrow: env.current_contract_address(),
            holding: holding.clone(),
            budget,
        })
    }

    pub fn holding(&self) -> Holding {
        self.holding.clone()
    }

    pub fn balance(&self) -> i128 {
        token::Client::new(self.env, &self.config.native).balance(&self.escrow)
    }

    pub fn min_balance(&self) -> i128 {
        utils::min_balance(self.config, &self.holding)
    }

    pub fn unlocked(&self) -> i128 {
        utils::unlocked(self.balance(), self.min_balance())
    }

    /// Native payment out of the unlocked balance; zero amounts are skipped
    pub fn pay(&mut self, to: &Address, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Ok(());
        }
        if amount > self.unlocked() {
            return Err(Error::InsufficientUnlocked);
        }
        self.spend()?;
        token::Client::new(self.env, &self.config.native).transfer(&self.escrow, to, &amount);
        Ok(())
    }

    /// Reward-token transfer out of the pool; zero amounts are skipped
    pub fn send_asset(&mut self, asset: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Ok(());
        }
        self.spend()?;
        token::Client::new(self.env, asset).transfer(&self.escrow, to, &amount);
        Ok(())
    }

    /// Opens the escrow's reward holding. The raised minimum balance must
    /// already be covered.
    pub fn open_holding(&mut self) -> Result<Holding, Error> {
        self.spend()?;
        self.holding = Holding::OptedIn;
        if self.balance() < self.min_balance() {
            return Err(Error::ReserveUnderfunded);
        }
        Ok(self.holding())
    }

    /// Moves the whole residual holding to `to` and closes it. Returns the
    /// amount moved.
    pub fn close_holding(&mut self, asset: &Address, to: &Address) -> Result<i128, Error> {
        if self.holding != Holding::OptedIn {
            return Err(Error::HoldingNotOpen);
        }
        self.spend()?;
        let token_client = token::Client::new(self.env, asset);
        let residual = token_client.balance(&self.escrow);
        if residual > 0 {
            token_client.transfer(&self.escrow, to, &residual);
        }
        self.holding = Holding::Closed;
        log!(self.env, "holding closed", residual);
        Ok(residual)
    }

    /// Empties the escrow's native balance, reserve included. Terminal.
    pub fn close_account(&mut self, to: &Address) -> Result<i128, Error> {
        self.spend()?;
        let amount = self.balance();
        if amount > 0 {
            token::Client::new(self.env, &self.config.native).transfer(&self.escrow, to, &amount);
        }
        Ok(amount)
    }

    fn spend(&mut self) -> Result<(), Error> {
        if self.budget == 0 {
            return Err(Error::FeeBudgetExhausted);
        }
        self.budget -= 1;
        Ok(())
    }
}
