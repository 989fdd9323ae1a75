use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::model::{Filter, RecordId};
use crate::ops::store::{FileStore, RecordStore};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(
    command: Commands,
    data_file: &Path,
    max_length: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open(data_file)?.with_max_length(max_length);
    tracing::debug!(path = %data_file.display(), "opened store");

    match command {
        // Read commands
        Commands::List(args) => cmd_list(&store, args),

        // Write commands
        Commands::Add(args) => cmd_add(&mut store, args),
        Commands::Done(args) => cmd_done(&mut store, args),
        Commands::Rm(args) => cmd_rm(&mut store, args),
        Commands::ClearCompleted => cmd_clear_completed(&mut store),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve(store: &FileStore, needle: &str) -> Result<RecordId, Box<dyn std::error::Error>> {
    store
        .resolve_id(needle)
        .ok_or_else(|| format!("no todo matches '{}'", needle).into())
}

fn print_record(store: &FileStore, id: &RecordId) {
    if let Some(record) = store.records().find(id) {
        println!("{}", format_record_line(record));
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &FileStore, args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let filter = Filter::parse(&args.filter).ok_or_else(|| {
        format!(
            "unknown filter '{}' (expected all, active or completed)",
            args.filter
        )
    })?;
    let records = store.list_filtered(filter);
    let counts = store.counts();

    if args.json {
        let out = ListJson {
            filter: filter.label().to_lowercase(),
            shown: records.len(),
            total: counts.total,
            todos: records.iter().map(record_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", filter.empty_message());
    }
    for record in &records {
        println!("{}", format_record_line(record));
    }
    println!("{}", format_counter(records.len(), &counts));
    Ok(())
}

fn cmd_add(store: &mut FileStore, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = args.text.join(" ");
    let id = store.add(&text)?;
    print_record(store, &id);
    Ok(())
}

fn cmd_done(store: &mut FileStore, args: IdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = resolve(store, &args.id)?;
    if !store.toggle(&id)? {
        return Err(format!("no todo matches '{}'", args.id).into());
    }
    print_record(store, &id);
    Ok(())
}

fn cmd_rm(store: &mut FileStore, args: IdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let id = resolve(store, &args.id)?;
    let text = store
        .records()
        .find(&id)
        .map(|r| r.text.clone())
        .unwrap_or_default();
    if !store.delete(&id)? {
        return Err(format!("no todo matches '{}'", args.id).into());
    }
    println!("deleted: {}", text);
    Ok(())
}

fn cmd_clear_completed(store: &mut FileStore) -> Result<(), Box<dyn std::error::Error>> {
    let removed = store.clear_completed()?;
    let plural = if removed == 1 { "" } else { "s" };
    println!("cleared {} completed todo{}", removed, plural);
    Ok(())
}
