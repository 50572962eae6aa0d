// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Category;
use crate::store::{Categories, Store};
use crate::utils::{next_id, pretty_table};
use anyhow::Result;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let icon = sub.get_one::<String>("icon").unwrap();
            let color = sub.get_one::<String>("color").map(|s| s.to_string());
            let mut categories = store.get::<Categories>();
            categories.push(Category {
                id: next_id(&categories, |c| c.id),
                name: name.clone(),
                icon: icon.clone(),
                color,
                budget: None,
            });
            store.set::<Categories>(&categories)?;
            println!("Added category '{}'", name);
        }
        Some(("list", _)) => {
            let mut categories = store.get::<Categories>();
            categories.sort_by(|a, b| a.name.cmp(&b.name));
            let data = categories
                .iter()
                .map(|c| vec![c.name.clone(), c.icon.clone()])
                .collect();
            println!("{}", pretty_table(&["Category", "Icon"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let mut categories = store.get::<Categories>();
            categories.retain(|c| &c.name != name);
            store.set::<Categories>(&categories)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
