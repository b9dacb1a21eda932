//! Save command implementation.

use super::{cast_label, open_catalog, render_card};
use clap::Args;
use routecard_core::{FormDraft, Ledger, LedgerConfig};

/// Form fields accepted by `save`.
///
/// Dates and control time default to now, the way the form prefills them.
#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Cluster number; allocated from the gluing date when omitted
    #[arg(long)]
    pub cluster: Option<String>,

    /// Cast (model) number
    #[arg(long, default_value = "")]
    pub cast_number: String,

    /// Cast (model) name
    #[arg(long, default_value = "")]
    pub cast_name: String,

    /// Gluing date, dd.mm.yyyy
    #[arg(long)]
    pub gluing_date: Option<String>,

    /// Gluing executor
    #[arg(long, default_value = "")]
    pub gluing_executor: String,

    /// Gluing quantity
    #[arg(long, default_value = "")]
    pub gluing_quantity: String,

    /// Gluing notes
    #[arg(long, default_value = "")]
    pub gluing_notes: String,

    /// Assembly control date, dd.mm.yyyy
    #[arg(long)]
    pub control_date: Option<String>,

    /// Assembly control time, HH:MM
    #[arg(long)]
    pub control_time: Option<String>,

    /// Assembly control executor
    #[arg(long, default_value = "")]
    pub control_executor: String,

    /// Assembly control quantity
    #[arg(long, default_value = "")]
    pub control_quantity: String,

    /// Assembly control notes
    #[arg(long, default_value = "")]
    pub control_notes: String,
}

impl SaveArgs {
    /// Fills a prefilled draft with the arguments that were given.
    fn apply(self, mut draft: FormDraft) -> FormDraft {
        if let Some(cluster) = self.cluster {
            draft.cluster_number = cluster;
        }
        if let Some(date) = self.gluing_date {
            draft.gluing_date = date;
        }
        if let Some(date) = self.control_date {
            draft.control_date = date;
        }
        if let Some(time) = self.control_time {
            draft.control_time = time;
        }
        draft.cast_number = self.cast_number;
        draft.cast_name = self.cast_name;
        draft.gluing_executor = self.gluing_executor;
        draft.gluing_quantity = self.gluing_quantity;
        draft.gluing_notes = self.gluing_notes;
        draft.control_executor = self.control_executor;
        draft.control_quantity = self.control_quantity;
        draft.control_notes = self.control_notes;
        draft
    }
}

/// Records a completed route card and prints it.
pub fn run(config: &LedgerConfig, args: SaveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::open(config)?;
    let mut draft = args.apply(FormDraft::today());

    if draft.cluster_number.trim().is_empty() {
        let number = ledger.allocate_next(draft.gluing_day()?)?;
        draft.cluster_number = number.to_string();
    }

    let record = draft.into_record()?;
    let card = ledger.save(&record)?;

    let catalog = open_catalog(config);
    println!("✓ Route card recorded");
    println!("{}", render_card(&card, &cast_label(&card, catalog.as_ref())));
    Ok(())
}
