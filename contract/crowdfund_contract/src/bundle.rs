use soroban_sdk::{contracttype, Address, Env, Symbol, Vec};

use crate::storage_types::Error;

pub const SETUP_METHOD: &str = "setup";
pub const CONTRIBUTE_METHOD: &str = "contribute";

/// A value transfer declared as a companion step
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Payment {
    pub sender: Address,
    pub receiver: Address,
    pub asset: Address,
    pub amount: i128,
    pub close_to: Option<Address>,     // Must be None, no remainder redirection
    pub rekey_to: Option<Address>,     // Must be None, no ownership reassignment
}

impl Payment {
    pub fn plain(sender: &Address, receiver: &Address, asset: &Address, amount: i128) -> Self {
        Payment {
            sender: sender.clone(),
            receiver: receiver.clone(),
            asset: asset.clone(),
            amount,
            close_to: None,
            rekey_to: None,
        }
    }
}

/// The engine call itself, as it sits in the group
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Invocation {
    pub sender: Address,
    pub method: Symbol,
    pub asset: Option<Address>,
    pub fee_budget: u32,               // Outgoing transfers the sender pays for
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub enum Step {
    Pay(Payment),                      // Native currency
    Call(Invocation),
    AssetXfer(Payment),                // Reward token
}

/// `[collateral payment, setup call, token seed]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetupBundle(pub Payment, pub Invocation, pub Payment);

/// `[contribute call, payment]`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContributeBundle(pub Invocation, pub Payment);

impl SetupBundle {
    pub fn parse(group: &Vec<Step>) -> Result<Self, Error> {
        if group.len() != 3 {
            return Err(Error::BundleShape);
        }
        match (group.get(0), group.get(1), group.get(2)) {
            (Some(Step::Pay(collateral)), Some(Step::Call(call)), Some(Step::AssetXfer(seed))) => {
                Ok(SetupBundle(collateral, call, seed))
            }
            _ => Err(Error::BundleShape),
        }
    }

    pub fn caller(&self) -> &Address {
        &self.1.sender
    }

    pub fn fee_budget(&self) -> u32 {
        self.1.fee_budget
    }

    pub fn collateral(&self) -> &Payment {
        &self.0
    }

    pub fn seed(&self) -> &Payment {
        &self.2
    }

    /// Everything except the seed amount must match exactly; the seed is a
    /// lower bound checked by the caller.
    pub fn verify(
        &self,
        e: &Env,
        creator: &Address,
        asset: &Address,
        native: &Address,
        deposit: i128,
    ) -> Result<(), Error> {
        let escrow = e.current_contract_address();
        let expected = SetupBundle(
            Payment::plain(creator, &escrow, native, deposit),
            Invocation {
                sender: creator.clone(),
                method: Symbol::new(e, SETUP_METHOD),
                asset: Some(asset.clone()),
                fee_budget: self.fee_budget(),
            },
            Payment::plain(creator, &escrow, asset, self.2.amount),
        );
        if *self != expected {
            return Err(Error::BundleMismatch);
        }
        Ok(())
    }
}

impl ContributeBundle {
    pub fn parse(group: &Vec<Step>) -> Result<Self, Error> {
        if group.len() != 2 {
            return Err(Error::BundleShape);
        }
        match (group.get(0), group.get(1)) {
            (Some(Step::Call(call)), Some(Step::Pay(payment))) => Ok(ContributeBundle(call, payment)),
            _ => Err(Error::BundleShape),
        }
    }

    pub fn caller(&self) -> &Address {
        &self.0.sender
    }

    pub fn payment(&self) -> &Payment {
        &self.1
    }

    /// The payment must come from the caller, land in the escrow in native
    /// currency, and carry no side channel. Amount is free.
    pub fn verify(&self, e: &Env, native: &Address) -> Result<(), Error> {
        let caller = self.caller();
        let expected = ContributeBundle(
            Invocation {
                sender: caller.clone(),
                method: Symbol::new(e, CONTRIBUTE_METHOD),
                asset: None,
                fee_budget: self.0.fee_budget,
            },
            Payment::plain(caller, &e.current_contract_address(), native, self.1.amount),
        );
        if *self != expected {
            return Err(Error::BundleMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::Address as _;
    use soroban_sdk::vec;

    struct Parties {
        escrow: Address,
        investor: Address,
        native: Address,
    }

    fn parties(env: &Env) -> Parties {
        Parties {
            escrow: Address::generate(env),
            investor: Address::generate(env),
            native: Address::generate(env),
        }
    }

    fn call(env: &Env, sender: &Address, method: &str) -> Invocation {
        Invocation {
            sender: sender.clone(),
            method: Symbol::new(env, method),
            asset: None,
            fee_budget: 0,
        }
    }

    #[test]
    fn contribute_bundle_requires_exact_size() {
        let env = Env::default();
        let p = parties(&env);
        let pay = Payment::plain(&p.investor, &p.escrow, &p.native, 10);

        let short = vec![&env, Step::Call(call(&env, &p.investor, CONTRIBUTE_METHOD))];
        assert_eq!(ContributeBundle::parse(&short), Err(Error::BundleShape));

        let long = vec![
            &env,
            Step::Call(call(&env, &p.investor, CONTRIBUTE_METHOD)),
            Step::Pay(pay.clone()),
            Step::Pay(pay.clone()),
        ];
        assert_eq!(ContributeBundle::parse(&long), Err(Error::BundleShape));
    }

    #[test]
    fn contribute_bundle_requires_order() {
        let env = Env::default();
        let p = parties(&env);
        let pay = Payment::plain(&p.investor, &p.escrow, &p.native, 10);

        let swapped = vec![
            &env,
            Step::Pay(pay.clone()),
            Step::Call(call(&env, &p.investor, CONTRIBUTE_METHOD)),
        ];
        assert_eq!(ContributeBundle::parse(&swapped), Err(Error::BundleShape));

        let wrong_kind = vec![
            &env,
            Step::Call(call(&env, &p.investor, CONTRIBUTE_METHOD)),
            Step::AssetXfer(pay),
        ];
        assert_eq!(ContributeBundle::parse(&wrong_kind), Err(Error::BundleShape));
    }

    #[test]
    fn setup_bundle_parses_fixed_order() {
        let env = Env::default();
        let p = parties(&env);
        let asset = Address::generate(&env);
        let collateral = Payment::plain(&p.investor, &p.escrow, &p.native, 20);
        let seed = Payment::plain(&p.investor, &p.escrow, &asset, 1_000);
        let setup = call(&env, &p.investor, SETUP_METHOD);

        let group = vec![
            &env,
            Step::Pay(collateral.clone()),
            Step::Call(setup.clone()),
            Step::AssetXfer(seed.clone()),
        ];
        let bundle = SetupBundle::parse(&group).unwrap();
        assert_eq!(bundle.collateral(), &collateral);
        assert_eq!(bundle.seed(), &seed);
        assert_eq!(bundle.caller(), &p.investor);

        let reordered = vec![
            &env,
            Step::Call(setup),
            Step::Pay(collateral),
            Step::AssetXfer(seed),
        ];
        assert_eq!(SetupBundle::parse(&reordered), Err(Error::BundleShape));
    }
}
