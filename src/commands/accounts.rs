// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Account;
use crate::store::{Accounts, Store};
use crate::utils::{next_id, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let kind = sub.get_one::<String>("type").unwrap();
            let ccy = sub.get_one::<String>("currency").unwrap().to_uppercase();
            let mut accounts = store.get::<Accounts>();
            accounts.push(Account {
                id: next_id(&accounts, |a| a.id),
                name: name.clone(),
                kind: kind.clone(),
                currency: ccy.clone(),
            });
            store.set::<Accounts>(&accounts)?;
            println!("Added account '{}' ({}, {})", name, kind, ccy);
        }
        Some(("list", _)) => {
            let mut accounts = store.get::<Accounts>();
            accounts.sort_by(|a, b| a.name.cmp(&b.name));
            let data = accounts
                .iter()
                .map(|a| vec![a.name.clone(), a.kind.clone(), a.currency.clone()])
                .collect();
            println!("{}", pretty_table(&["Name", "Type", "Currency"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let mut accounts = store.get::<Accounts>();
            accounts.retain(|a| &a.name != name);
            store.set::<Accounts>(&accounts)?;
            println!("Removed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
