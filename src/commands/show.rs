//! Show command implementation

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::Result;
use crate::target::{format_selection, format_selection_json, format_tree, TargetTree, TreeOptions};

/// Run the show command
pub fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let mut options = TreeOptions::from(&config.picker);
    if args.no_hidden {
        options = options.with_hidden(false);
    }

    tracing::info!(path = %args.path.display(), "Loading target tree");

    let mut tree = TargetTree::new(options);
    tree.populate(&args.path)?;
    if args.all {
        tree.expand_all();
    }

    let items = tree.items_to_delete();
    let summary = tree.selection_summary();

    if args.json {
        println!("{}", format_selection_json(&items, summary, true)?);
        return Ok(());
    }

    print!("{}", format_tree(&tree));
    println!();
    println!(
        "Selected: {} item{}, {}",
        summary.count,
        if summary.count == 1 { "" } else { "s" },
        humansize::format_size(summary.total_size, humansize::BINARY)
    );
    println!("{}", format_selection(&items));

    Ok(())
}
