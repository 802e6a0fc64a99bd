// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendline::{cli, commands, config::Settings, logging, store::CsvStore, tracker::Tracker};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    logging::init(matches.get_flag("verbose"));

    let settings = Settings::resolve(matches.get_one::<String>("file").map(String::as_str))?;
    let mut tracker = Tracker::open(CsvStore::new(&settings.data_file));

    let interactive = matches!(matches.subcommand(), None | Some(("menu", _)));
    if !interactive {
        if let Some(warning) = tracker.load_warning() {
            eprintln!("{}", warning);
        }
    }

    match matches.subcommand() {
        Some(("add", sub)) => commands::transactions::add(&mut tracker, sub)?,
        Some(("list", sub)) => commands::transactions::list(&tracker, sub)?,
        Some(("summary", sub)) => commands::reports::summary(tracker.ledger(), sub)?,
        Some(("analyze", sub)) => commands::reports::analyze(tracker.ledger(), sub)?,
        Some(("export", sub)) => commands::exporter::export_transactions(tracker.ledger(), sub)?,
        Some(("import", sub)) => commands::importer::import_transactions(&mut tracker, sub)?,
        _ => {
            let stdin = std::io::stdin();
            commands::menu::run(&mut tracker, stdin.lock(), std::io::stdout(), 40)?;
        }
    }
    Ok(())
}
