// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("budgetit")
        .about("Personal-finance CLI with predictive spending insights")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the data store and seed sample data"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("type").long("type").default_value("checking"))
                        .arg(Arg::new("currency").long("currency").default_value("ARS")),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("icon").long("icon").default_value("Tag"))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .value_parser(["income", "expense"])
                                .default_value("expense"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("note").long("note"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append))
                        .arg(
                            Arg::new("recurring")
                                .long("recurring")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("kind").long("kind").value_parser(["income", "expense"]))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage category budgets")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .value_parser(["monthly", "weekly", "yearly"])
                                .default_value("monthly"),
                        )
                        .arg(Arg::new("start").long("start")),
                )
                .subcommand(json_flags(Command::new("list"))),
        )
        .subcommand(
            Command::new("currency")
                .about("Manage currencies and exchange rates")
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("code").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("symbol").long("symbol").required(true))
                        .arg(Arg::new("rate").long("rate").required(true))
                        .arg(
                            Arg::new("primary")
                                .long("primary")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("hidden").long("hidden").action(ArgAction::SetTrue)),
                )
                .subcommand(Command::new("set-primary").arg(Arg::new("code").required(true)))
                .subcommand(
                    Command::new("visible")
                        .arg(Arg::new("codes").num_args(1..).required(true)),
                )
                .subcommand(
                    Command::new("convert")
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                )
                .subcommand(
                    Command::new("fetch")
                        .about("Refresh exchange rates from the network (6h cache)")
                        .arg(Arg::new("force").long("force").action(ArgAction::SetTrue)),
                ),
        )
        .subcommand(
            Command::new("insights")
                .about("Predictive spending analytics")
                .subcommand(json_flags(
                    Command::new("analyze").about("Recompute predictions and refresh the cache"),
                ))
                .subcommand(json_flags(
                    Command::new("show").about("Show cached predictions, recomputing when stale"),
                ))
                .subcommand(json_flags(
                    Command::new("projections")
                        .about("Project per-category spend forward")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32))
                                .default_value("3"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("alerts").about("Budget-risk alerts for the current period"),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export stored data")
                .subcommand(
                    Command::new("backup")
                        .about("Write a versioned JSON backup of all buckets")
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("csv")
                        .about("Write one bucket as CSV")
                        .arg(
                            Arg::new("bucket")
                                .long("bucket")
                                .value_parser(["transactions", "categories", "budgets", "accounts"])
                                .required(true),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore buckets from a JSON backup")
                .arg(Arg::new("file").long("file").required(true))
                .arg(
                    Arg::new("overwrite")
                        .long("overwrite")
                        .action(ArgAction::SetTrue)
                        .help("Replace existing buckets instead of only filling empty ones"),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
